//! User and role decoders

use qbase_domain::types::{Role, RoleMap, UserInfo, UserRoles};
use roxmltree::Node;

use crate::xml::{self, Envelope};

fn role(node: Node<'_, '_>) -> Role {
    let access = xml::child(node, "access");
    Role {
        id: xml::attr(node, "id"),
        name: xml::child_text(node, "name"),
        access: access.map(xml::text).unwrap_or_default(),
        access_id: access.map(|n| xml::attr(n, "id")).unwrap_or_default(),
    }
}

fn user_roles_of(user: Node<'_, '_>) -> UserRoles {
    UserRoles {
        id: xml::attr(user, "id"),
        name: xml::child_text(user, "name"),
        roles: xml::find_all(user, "role").map(role).collect(),
    }
}

/// Users of `API_UserRoles`, each with its roles.
pub fn user_roles(envelope: &Envelope<'_>) -> Vec<UserRoles> {
    let Some(users) = envelope.find("users") else {
        return Vec::new();
    };
    users.children().filter(|n| n.has_tag_name("user")).map(user_roles_of).collect()
}

/// Roles of `API_GetRoleInfo`, keyed by role id.
pub fn role_info(envelope: &Envelope<'_>) -> RoleMap {
    envelope.find_all("role").map(role).map(|role| (role.id.clone(), role)).collect()
}

/// The single user of `API_GetUserRole`.
pub fn user_role(envelope: &Envelope<'_>) -> UserRoles {
    envelope.find("user").map(user_roles_of).unwrap_or_default()
}

pub fn user_info(envelope: &Envelope<'_>) -> UserInfo {
    let Some(user) = envelope.find("user") else {
        return UserInfo::default();
    };
    UserInfo {
        id: xml::attr(user, "id"),
        first_name: xml::child_text(user, "firstName"),
        last_name: xml::child_text(user, "lastName"),
        login: xml::child_text(user, "login"),
        email: xml::child_text(user, "email"),
        screen_name: xml::child_text(user, "screenName"),
        is_verified: xml::child(user, "isVerified").and_then(|n| xml::parse_flag(&xml::text(n))),
        external_auth: xml::child(user, "externalAuth")
            .and_then(|n| xml::parse_flag(&xml::text(n))),
    }
}

/// `<userid>` of `API_ProvisionUser`.
pub fn user_id(envelope: &Envelope<'_>) -> String {
    envelope.text("userid")
}
