use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub const SINGLE_ROLE_IN_HIERARCHY: &str = "single_role_in_hierarchy";
pub const MULTI_ROLE: &str = "multi_role";

fn single_role_in_hierarchy() -> String {
    SINGLE_ROLE_IN_HIERARCHY.to_string()
}

// An explicit `null` gets the same value as a missing key.
fn default_if_null<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(de)?.unwrap_or_default())
}

fn role_structure_if_null<'de, D>(de: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(de)?.unwrap_or_else(single_role_in_hierarchy))
}

/// The current user's membership in one organization.
///
/// Field names on the wire follow the org-member-info claim exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrgMembership {
    pub org_id: String,
    pub org_name: String,
    #[serde(default, deserialize_with = "default_if_null")]
    pub url_safe_org_name: String,
    #[serde(default)]
    pub legacy_org_id: Option<String>,
    #[serde(default)]
    pub org_metadata: Option<Map<String, Value>>,

    pub user_role: String,
    /// The user's role followed by every role it inherits.
    #[serde(
        rename = "inherited_user_roles_plus_current_role",
        default,
        deserialize_with = "default_if_null"
    )]
    pub role_hierarchy: Vec<String>,
    #[serde(
        rename = "org_role_structure",
        default = "single_role_in_hierarchy",
        deserialize_with = "role_structure_if_null"
    )]
    pub role_structure: String,
    #[serde(default, deserialize_with = "default_if_null")]
    pub additional_roles: BTreeSet<String>,

    /// `None` when the token carried no permission data at all.
    #[serde(rename = "user_permissions", default)]
    pub permissions: Option<BTreeSet<String>>,
}

impl OrgMembership {
    /// Enforce `user_role ∈ role_hierarchy`.
    pub(crate) fn normalized(mut self) -> Self {
        if !self.role_hierarchy.contains(&self.user_role) {
            self.role_hierarchy.insert(0, self.user_role.clone());
        }
        self
    }

    pub fn is_role(&self, role: &str) -> bool {
        self.user_role == role
    }

    pub fn is_at_least_role(&self, role: &str) -> bool {
        self.user_role == role || self.role_hierarchy.iter().any(|r| r == role)
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions
            .as_ref()
            .is_some_and(|perms| perms.contains(permission))
    }

    pub fn has_all_permissions<S: AsRef<str>>(&self, permissions: &[S]) -> bool {
        self.permissions
            .as_ref()
            .is_some_and(|perms| permissions.iter().all(|p| perms.contains(p.as_ref())))
    }

    pub fn is_multi_role(&self) -> bool {
        self.role_structure == MULTI_ROLE
    }

    /// Roles directly assigned to the user: the primary role, plus the
    /// additional roles of a multi-role structure.
    pub fn assigned_roles(&self) -> Vec<&str> {
        let mut roles = vec![self.user_role.as_str()];
        if self.is_multi_role() {
            roles.extend(
                self.additional_roles
                    .iter()
                    .map(String::as_str)
                    .filter(|r| *r != self.user_role),
            );
        }
        roles
    }
}
