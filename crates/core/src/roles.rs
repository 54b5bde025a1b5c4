//! Well-known role name constants.
//!
//! Dealership users and internal staff draw their roles from two disjoint
//! vocabularies. `admin` appears in both; which one applies is decided by
//! the kind of the user, never by the role string alone.

// ---------------------------------------------------------------------------
// Dealership roles
// ---------------------------------------------------------------------------

pub const ROLE_VIEWER: &str = "viewer";
pub const ROLE_SUBMITTER: &str = "submitter";
pub const ROLE_APPROVER: &str = "approver";
pub const ROLE_DEALERSHIP_ADMIN: &str = "admin";

/// All valid dealership role names.
pub const DEALERSHIP_ROLES: &[&str] = &[
    ROLE_VIEWER,
    ROLE_SUBMITTER,
    ROLE_APPROVER,
    ROLE_DEALERSHIP_ADMIN,
];

// ---------------------------------------------------------------------------
// Internal staff roles
// ---------------------------------------------------------------------------

pub const ROLE_DESIGNER: &str = "designer";
pub const ROLE_PRODUCTION: &str = "production";
pub const ROLE_BILLING: &str = "billing";
pub const ROLE_STAFF_ADMIN: &str = "admin";

/// All valid internal staff role names.
pub const STAFF_ROLES: &[&str] = &[ROLE_DESIGNER, ROLE_PRODUCTION, ROLE_BILLING, ROLE_STAFF_ADMIN];
