use serde::{Deserialize, Deserializer, Serialize};

fn unknown() -> String {
    "unknown".to_string()
}

// `null` is treated like a missing key.
fn unknown_if_null<'de, D>(de: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(de)?.unwrap_or_else(unknown))
}

/// How the session behind the token was started.
///
/// Wire shape (the `login_method` claim):
/// `{"login_method":"saml_sso","provider":"okta","org_id":"org_123"}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "login_method", rename_all = "snake_case")]
pub enum LoginMethod {
    Password,
    MagicLink,
    SocialSso {
        #[serde(default = "unknown", deserialize_with = "unknown_if_null")]
        provider: String,
    },
    EmailConfirmationLink,
    SamlSso {
        #[serde(default = "unknown", deserialize_with = "unknown_if_null")]
        provider: String,
        #[serde(default = "unknown", deserialize_with = "unknown_if_null")]
        org_id: String,
    },
    Impersonation,
    GeneratedFromBackendApi,
    #[default]
    #[serde(other)]
    Unknown,
}

impl LoginMethod {
    /// Parse the raw `login_method` claim.
    ///
    /// Login method is audit data, not access-control data: anything that does
    /// not parse becomes `Unknown` instead of failing the request.
    pub fn from_claim(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::Unknown;
        };

        match serde_json::from_str(raw) {
            Ok(method) => method,
            Err(err) => {
                tracing::debug!(error = %err, "unparsable login_method claim; using Unknown");
                Self::Unknown
            }
        }
    }

    /// Identity provider, for SSO logins only.
    pub fn provider(&self) -> Option<&str> {
        match self {
            Self::SocialSso { provider } | Self::SamlSso { provider, .. } => Some(provider),
            _ => None,
        }
    }

    /// Organization that owns the SAML connection.
    pub fn org_id(&self) -> Option<&str> {
        match self {
            Self::SamlSso { org_id, .. } => Some(org_id),
            _ => None,
        }
    }
}
