//! User accounts, both dealership staff and internal staff.
//!
//! A user belongs to a dealership when `dealership_id` is set; the role
//! name is interpreted against the role list of that actor kind.

use glassworks_core::roles::{DEALERSHIP_ROLES, STAFF_ROLES};
use glassworks_core::shape::{canonical, FieldType, Shape};

pub const NAME: &str = "User";

/// Every role name a user record may carry, without duplicates.
pub fn role_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = Vec::new();
    for &name in DEALERSHIP_ROLES.iter().chain(STAFF_ROLES) {
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

pub fn definition() -> Shape {
    canonical(
        Shape::new(NAME)
            .field("email", FieldType::String)
            .field("display_name", FieldType::String)
            .field("role", FieldType::enumeration(role_names()))
            .field("dealership_id", FieldType::nullable(FieldType::Integer))
            .field("is_active", FieldType::Boolean)
            .optional_field("last_login_at", FieldType::nullable(FieldType::Timestamp)),
    )
}
