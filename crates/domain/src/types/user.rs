//! User and role results

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Role, as listed by `API_UserRoles`, `API_GetUserRole` and `API_GetRoleInfo`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: String,
    pub name: String,
    /// Access level label, e.g. `Basic Access`
    pub access: String,
    pub access_id: String,
}

/// Roles keyed by role id
pub type RoleMap = BTreeMap<String, Role>;

/// A user together with the roles it holds
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRoles {
    pub id: String,
    pub name: String,
    pub roles: Vec<Role>,
}

/// `API_GetUserInfo` result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub login: String,
    pub email: String,
    pub screen_name: String,
    pub is_verified: Option<bool>,
    pub external_auth: Option<bool>,
}
