use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::user::{AuthContext, ClaimSet, ClaimsError};

/// Errors returned by access-token verification + claims mapping.
#[derive(Debug, Error)]
pub enum AccessJwtError {
    #[error("jwt verification failed: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error(transparent)]
    Claims(#[from] ClaimsError),
}

/// RS256 access-token verifier.
///
/// - Signature, `exp` and `iss` are checked by `jsonwebtoken`.
/// - Tokens carry no audience, so `aud` is not validated.
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct AuthService {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("AuthService")
            .field("validation", &self.validation)
            .finish()
    }
}

impl AuthService {
    pub fn new(
        verifier_key_pem: &str,
        issuer: &str,
        leeway_seconds: u64,
    ) -> Result<Self, jsonwebtoken::errors::Error> {
        let decoding_key = DecodingKey::from_rsa_pem(verifier_key_pem.as_bytes())?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[issuer]);
        validation.validate_aud = false;
        validation.leeway = leeway_seconds;

        Ok(Self {
            decoding_key,
            validation,
        })
    }

    // Verify and decode a JWT access token into its raw payload.
    pub fn verify(&self, token: &str) -> Result<Map<String, Value>, jsonwebtoken::errors::Error> {
        let data =
            jsonwebtoken::decode::<Map<String, Value>>(token, &self.decoding_key, &self.validation)?;

        Ok(data.claims)
    }

    /// Verify, then map the payload into the request's `AuthContext`.
    ///
    /// This is the entry-point for middleware.
    pub fn verify_user(&self, token: &str) -> Result<AuthContext, AccessJwtError> {
        let payload = self.verify(token)?;
        let claims = ClaimSet::from_json_object(&payload);

        Ok(AuthContext::from_claims(&claims)?)
    }
}
