use std::collections::BTreeMap;

use serde_json::{Map, Value};
use thiserror::Error;

/// Well-known email claim type, checked when the canonical `email` claim is missing.
pub const EMAIL_ALIAS_CLAIM: &str = "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/emailaddress";

/// Errors raised while building an `AuthContext` from claims.
///
/// Both variants mean "no authenticated user" for the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClaimsError {
    #[error("missing required claim '{0}'")]
    MissingRequiredClaim(&'static str),

    #[error("malformed claim '{claim}': {reason}")]
    MalformedClaim { claim: &'static str, reason: String },
}

impl ClaimsError {
    pub(crate) fn malformed(claim: &'static str, reason: impl ToString) -> Self {
        Self::MalformedClaim {
            claim,
            reason: reason.to_string(),
        }
    }
}

/// Flat, string-keyed claim bag produced by token verification.
///
/// Structured claims (`properties`, `login_method`, org data) are carried as
/// their JSON text, exactly like any other string value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimSet {
    claims: BTreeMap<String, String>,
}

impl ClaimSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flatten a verified JWT payload.
    ///
    /// - strings are kept verbatim
    /// - `null` is dropped (same as an absent claim)
    /// - everything else is re-encoded as JSON text
    pub fn from_json_object(payload: &Map<String, Value>) -> Self {
        let claims = payload
            .iter()
            .filter_map(|(key, value)| {
                let value = match value {
                    Value::Null => return None,
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                Some((key.clone(), value))
            })
            .collect();

        Self { claims }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.claims.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.claims.get(key).map(String::as_str)
    }

    /// Like `get`, but an empty value counts as missing.
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.claims.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for ClaimSet
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            claims: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
