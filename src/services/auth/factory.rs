/// Factory: build `AuthService` from application `Config`.
use std::sync::Arc;

use thiserror::Error;

use crate::config::Config;
use crate::services::auth::AuthService;
use crate::services::auth::metadata::{self, MetadataError};

#[derive(Debug, Error)]
pub enum AuthSetupError {
    #[error(transparent)]
    Metadata(#[from] MetadataError),
    #[error("invalid verifier key pem: {0}")]
    InvalidVerifierKey(#[from] jsonwebtoken::errors::Error),
}

/// Use the configured verifier key when present; otherwise fetch it once from
/// the auth service with the backend API key.
pub async fn build_auth_service(config: &Config) -> Result<Arc<AuthService>, AuthSetupError> {
    let default_issuer = metadata::issuer_from_auth_url(&config.auth_url);

    let (verifier_key_pem, fetched_issuer) = match &config.verifier_key_pem {
        Some(pem) => (pem.clone(), default_issuer),
        None => {
            tracing::info!(auth_url = %config.auth_url, "fetching token verification metadata");
            let client = reqwest::Client::new();
            let fetched = metadata::fetch(&client, &config.auth_url, &config.api_key)
                .await
                .inspect_err(|err| {
                    tracing::warn!(error = %err, "token verification metadata fetch failed");
                })?;
            (fetched.verifier_key_pem, fetched.issuer)
        }
    };

    let issuer = config.issuer.clone().unwrap_or(fetched_issuer);

    let auth = AuthService::new(
        &verifier_key_pem,
        &issuer,
        config.access_token_leeway_seconds,
    )?;
    tracing::debug!(%issuer, "access token verifier ready");

    Ok(Arc::new(auth))
}
