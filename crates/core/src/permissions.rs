//! Action permission table for dealership users and internal staff.
//!
//! A user is a dealership user when it carries a `dealership_id`, and
//! internal staff otherwise. Each action has an explicit allow-list of
//! roles per kind; anything not listed is denied, including unknown
//! actions, unknown roles, and the absence of a signed-in user.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::roles::{
    ROLE_APPROVER, ROLE_BILLING, ROLE_DEALERSHIP_ADMIN, ROLE_DESIGNER, ROLE_PRODUCTION,
    ROLE_STAFF_ADMIN, ROLE_SUBMITTER, ROLE_VIEWER,
};
use crate::types::DbId;

// ---------------------------------------------------------------------------
// User account
// ---------------------------------------------------------------------------

/// The signed-in user as returned by the `/me` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: DbId,
    pub uuid: uuid::Uuid,
    pub email: String,
    pub display_name: String,
    pub role: String,
    /// Present only for users affiliated with a dealership.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dealership_id: Option<DbId>,
}

impl UserAccount {
    pub fn kind(&self) -> ActorKind {
        if self.dealership_id.is_some() {
            ActorKind::Dealership
        } else {
            ActorKind::Internal
        }
    }
}

// ---------------------------------------------------------------------------
// Actor kinds and roles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorKind {
    Dealership,
    Internal,
}

impl ActorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dealership => "dealership",
            Self::Internal => "internal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DealershipRole {
    Viewer,
    Submitter,
    Approver,
    Admin,
}

impl DealershipRole {
    pub const ALL: &'static [DealershipRole] =
        &[Self::Viewer, Self::Submitter, Self::Approver, Self::Admin];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            ROLE_VIEWER => Some(Self::Viewer),
            ROLE_SUBMITTER => Some(Self::Submitter),
            ROLE_APPROVER => Some(Self::Approver),
            ROLE_DEALERSHIP_ADMIN => Some(Self::Admin),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Viewer => ROLE_VIEWER,
            Self::Submitter => ROLE_SUBMITTER,
            Self::Approver => ROLE_APPROVER,
            Self::Admin => ROLE_DEALERSHIP_ADMIN,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    Designer,
    Production,
    Billing,
    Admin,
}

impl StaffRole {
    pub const ALL: &'static [StaffRole] =
        &[Self::Designer, Self::Production, Self::Billing, Self::Admin];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            ROLE_DESIGNER => Some(Self::Designer),
            ROLE_PRODUCTION => Some(Self::Production),
            ROLE_BILLING => Some(Self::Billing),
            ROLE_STAFF_ADMIN => Some(Self::Admin),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Designer => ROLE_DESIGNER,
            Self::Production => ROLE_PRODUCTION,
            Self::Billing => ROLE_BILLING,
            Self::Admin => ROLE_STAFF_ADMIN,
        }
    }
}

/// A user resolved to its kind and a recognised role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    Dealership {
        dealership_id: DbId,
        role: DealershipRole,
    },
    Internal {
        role: StaffRole,
    },
}

impl Actor {
    /// Resolve a user account. Returns `None` when the role string is not
    /// valid for the user's kind.
    pub fn from_user(user: &UserAccount) -> Option<Self> {
        match user.dealership_id {
            Some(dealership_id) => DealershipRole::from_name(&user.role)
                .map(|role| Actor::Dealership {
                    dealership_id,
                    role,
                }),
            None => StaffRole::from_name(&user.role).map(|role| Actor::Internal { role }),
        }
    }

    pub fn kind(&self) -> ActorKind {
        match self {
            Self::Dealership { .. } => ActorKind::Dealership,
            Self::Internal { .. } => ActorKind::Internal,
        }
    }

    pub fn role_name(&self) -> &'static str {
        match self {
            Self::Dealership { role, .. } => role.as_str(),
            Self::Internal { role } => role.as_str(),
        }
    }

    pub fn can(&self, action: Action) -> bool {
        match self {
            Self::Dealership { role, .. } => dealership_allow_list(action).contains(role),
            Self::Internal { role } => staff_allow_list(action).contains(role),
        }
    }
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    CreateProject,
    ApproveProof,
    PlaceOrder,
    PayInvoice,
    ManageDealershipUsers,
    ViewProjects,
    ViewInvoices,
    CreateProof,
    ManageKanban,
    CreateBlocker,
    CreateInvoice,
    ManageInternalUsers,
    ViewAll,
}

impl Action {
    pub const ALL: &'static [Action] = &[
        Self::CreateProject,
        Self::ApproveProof,
        Self::PlaceOrder,
        Self::PayInvoice,
        Self::ManageDealershipUsers,
        Self::ViewProjects,
        Self::ViewInvoices,
        Self::CreateProof,
        Self::ManageKanban,
        Self::CreateBlocker,
        Self::CreateInvoice,
        Self::ManageInternalUsers,
        Self::ViewAll,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateProject => "create_project",
            Self::ApproveProof => "approve_proof",
            Self::PlaceOrder => "place_order",
            Self::PayInvoice => "pay_invoice",
            Self::ManageDealershipUsers => "manage_dealership_users",
            Self::ViewProjects => "view_projects",
            Self::ViewInvoices => "view_invoices",
            Self::CreateProof => "create_proof",
            Self::ManageKanban => "manage_kanban",
            Self::CreateBlocker => "create_blocker",
            Self::CreateInvoice => "create_invoice",
            Self::ManageInternalUsers => "manage_internal_users",
            Self::ViewAll => "view_all",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.as_str() == name)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn dealership_allow_list(action: Action) -> &'static [DealershipRole] {
    use DealershipRole::*;
    match action {
        Action::CreateProject => &[Submitter, Approver, Admin],
        Action::ApproveProof => &[Approver, Admin],
        Action::PlaceOrder => &[Approver, Admin],
        Action::PayInvoice => &[Admin],
        Action::ManageDealershipUsers => &[Admin],
        Action::ViewProjects => &[Viewer, Submitter, Approver, Admin],
        Action::ViewInvoices => &[Approver, Admin],
        _ => &[],
    }
}

fn staff_allow_list(action: Action) -> &'static [StaffRole] {
    use StaffRole::*;
    match action {
        Action::CreateProof => &[Designer, Admin],
        Action::ManageKanban => &[Designer, Production, Admin],
        Action::CreateBlocker => &[Designer, Production, Admin],
        Action::CreateInvoice => &[Billing, Admin],
        Action::ManageInternalUsers => &[Admin],
        Action::ViewAll => &[Designer, Production, Billing, Admin],
        _ => &[],
    }
}

// ---------------------------------------------------------------------------
// Predicate
// ---------------------------------------------------------------------------

/// Whether `user` may perform the action named `action`.
///
/// No user, an unrecognised role, or an unknown action name all yield
/// `false`.
pub fn can(user: Option<&UserAccount>, action: &str) -> bool {
    let Some(actor) = user.and_then(Actor::from_user) else {
        return false;
    };
    Action::from_name(action).is_some_and(|a| actor.can(a))
}

/// Like [`can`], but reports why access was refused.
///
/// No user yields `Unauthorized`; anything else that `can` denies yields
/// `Forbidden`.
pub fn require(user: Option<&UserAccount>, action: &str) -> Result<(), CoreError> {
    let Some(user) = user else {
        return Err(CoreError::Unauthorized("Sign in required".into()));
    };
    if can(Some(user), action) {
        Ok(())
    } else {
        Err(CoreError::Forbidden(format!(
            "Role `{}` may not perform `{action}`",
            user.role
        )))
    }
}

/// One cell of the permission matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionRow {
    pub kind: ActorKind,
    pub role: &'static str,
    pub action: Action,
    pub allowed: bool,
}

/// Every (kind, role, action) combination with its decision.
pub fn permission_matrix() -> Vec<PermissionRow> {
    let dealership = DealershipRole::ALL.iter().map(|&role| Actor::Dealership {
        dealership_id: 0,
        role,
    });
    let staff = StaffRole::ALL.iter().map(|&role| Actor::Internal { role });

    dealership
        .chain(staff)
        .flat_map(|actor| {
            Action::ALL.iter().map(move |&action| PermissionRow {
                kind: actor.kind(),
                role: actor.role_name(),
                action,
                allowed: actor.can(action),
            })
        })
        .collect()
}
