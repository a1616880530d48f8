use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use super::claims::{ClaimSet, ClaimsError, EMAIL_ALIAS_CLAIM};
use super::login_method::LoginMethod;
use super::org::OrgMembership;

const ORG_ID_TO_ORG_MEMBER_INFO: &str = "org_id_to_org_member_info";
const ORG_MEMBER_INFO: &str = "org_member_info";
const PROPERTIES: &str = "properties";
const LOGIN_METHOD: &str = "login_method";

/// The authenticated user behind one request.
///
/// Built once from the verified claim set (see `from_claims`) and never
/// mutated afterwards. Handlers receive it through the `AuthCtx` extractor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthContext {
    pub user_id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub legacy_user_id: Option<String>,
    pub impersonator_user_id: Option<String>,
    pub login_method: LoginMethod,
    pub properties: Option<Map<String, Value>>,
    pub memberships: BTreeMap<String, OrgMembership>,
    /// Set only when the token was scoped to a single org (`org_member_info`).
    pub active_org_id: Option<String>,
}

impl AuthContext {
    pub fn from_claims(claims: &ClaimSet) -> Result<Self, ClaimsError> {
        let user_id = claims
            .get_non_empty("user_id")
            .ok_or(ClaimsError::MissingRequiredClaim("user_id"))?
            .to_string();

        let email = claims
            .get_non_empty("email")
            .or_else(|| claims.get_non_empty(EMAIL_ALIAS_CLAIM))
            .ok_or(ClaimsError::MissingRequiredClaim("email"))?
            .to_string();

        let optional = |key: &str| claims.get(key).map(str::to_string);

        let (memberships, active_org_id) = parse_memberships(claims)?;

        Ok(Self {
            user_id,
            email,
            first_name: optional("first_name"),
            last_name: optional("last_name"),
            username: optional("username"),
            legacy_user_id: optional("legacy_user_id"),
            impersonator_user_id: optional("impersonator_user_id"),
            login_method: LoginMethod::from_claim(claims.get(LOGIN_METHOD)),
            properties: parse_properties(claims)?,
            memberships,
            active_org_id,
        })
    }

    pub fn get_org(&self, org_id: &str) -> Option<&OrgMembership> {
        self.memberships.get(org_id)
    }

    /// All memberships, ordered by org id.
    pub fn get_orgs(&self) -> Vec<&OrgMembership> {
        self.memberships.values().collect()
    }

    pub fn get_active_org(&self) -> Option<&OrgMembership> {
        self.active_org_id
            .as_deref()
            .and_then(|org_id| self.get_org(org_id))
    }

    pub fn get_user_property(&self, name: &str) -> Option<&Value> {
        self.properties.as_ref().and_then(|props| props.get(name))
    }

    pub fn is_impersonated(&self) -> bool {
        self.impersonator_user_id
            .as_deref()
            .is_some_and(|id| !id.is_empty())
    }

    pub fn is_role_in_org(&self, org_id: &str, role: &str) -> bool {
        self.get_org(org_id).is_some_and(|org| org.is_role(role))
    }

    pub fn is_at_least_role_in_org(&self, org_id: &str, role: &str) -> bool {
        self.get_org(org_id)
            .is_some_and(|org| org.is_at_least_role(role))
    }

    pub fn has_permission_in_org(&self, org_id: &str, permission: &str) -> bool {
        self.get_org(org_id)
            .is_some_and(|org| org.has_permission(permission))
    }

    pub fn has_all_permissions_in_org<S: AsRef<str>>(&self, org_id: &str, permissions: &[S]) -> bool {
        self.get_org(org_id)
            .is_some_and(|org| org.has_all_permissions(permissions))
    }
}

type Memberships = (BTreeMap<String, OrgMembership>, Option<String>);

fn parse_memberships(claims: &ClaimSet) -> Result<Memberships, ClaimsError> {
    match (
        claims.get(ORG_ID_TO_ORG_MEMBER_INFO),
        claims.get(ORG_MEMBER_INFO),
    ) {
        (Some(_), Some(_)) => Err(ClaimsError::malformed(
            ORG_MEMBER_INFO,
            "cannot be combined with org_id_to_org_member_info",
        )),
        (Some(raw), None) => {
            let orgs: BTreeMap<String, OrgMembership> = serde_json::from_str(raw)
                .map_err(|e| ClaimsError::malformed(ORG_ID_TO_ORG_MEMBER_INFO, e))?;

            let mut memberships = BTreeMap::new();
            for (org_id, org) in orgs {
                if org.org_id != org_id {
                    return Err(ClaimsError::malformed(
                        ORG_ID_TO_ORG_MEMBER_INFO,
                        format!("entry '{org_id}' carries org_id '{}'", org.org_id),
                    ));
                }
                memberships.insert(org_id, org.normalized());
            }
            Ok((memberships, None))
        }
        (None, Some(raw)) => {
            let org: OrgMembership = serde_json::from_str(raw)
                .map_err(|e| ClaimsError::malformed(ORG_MEMBER_INFO, e))?;
            let org_id = org.org_id.clone();
            let memberships = BTreeMap::from([(org_id.clone(), org.normalized())]);
            Ok((memberships, Some(org_id)))
        }
        (None, None) => Ok((BTreeMap::new(), None)),
    }
}

fn parse_properties(claims: &ClaimSet) -> Result<Option<Map<String, Value>>, ClaimsError> {
    claims
        .get(PROPERTIES)
        .map(|raw| serde_json::from_str(raw).map_err(|e| ClaimsError::malformed(PROPERTIES, e)))
        .transpose()
}
