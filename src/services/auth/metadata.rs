//! Token verification metadata (verifier key + issuer) served by the auth service.
//!
//! The backend API key authorizes the request; the response carries the RSA
//! public key (PEM) that signs every access token for this project.

use serde::Deserialize;
use thiserror::Error;
use url::Url;

const METADATA_PATH: &str = "api/v1/token_verification_metadata";

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("invalid auth url: {0}")]
    InvalidAuthUrl(#[from] url::ParseError),
    #[error("token verification metadata request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("api key rejected by the auth service")]
    InvalidApiKey,
    #[error("token verification metadata endpoint returned HTTP {0}")]
    UnexpectedStatus(u16),
}

#[derive(Clone, PartialEq, Eq)]
pub struct TokenVerificationMetadata {
    pub verifier_key_pem: String,
    pub issuer: String,
}

impl std::fmt::Debug for TokenVerificationMetadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerificationMetadata")
            .field("issuer", &self.issuer)
            .finish_non_exhaustive()
    }
}

#[derive(Deserialize)]
struct MetadataResponse {
    verifier_key_pem: String,
}

/// Tokens are issued by the auth URL's origin: scheme, host and non-default
/// port, without a trailing slash.
pub fn issuer_from_auth_url(auth_url: &Url) -> String {
    auth_url.origin().ascii_serialization()
}

/// The metadata endpoint below the auth URL, keeping any path prefix.
pub fn metadata_endpoint(auth_url: &Url) -> Result<Url, url::ParseError> {
    let mut base = auth_url.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }

    base.join(METADATA_PATH)
}

/// `GET {auth_url}/api/v1/token_verification_metadata` with the API key as bearer.
pub async fn fetch(
    client: &reqwest::Client,
    auth_url: &Url,
    api_key: &str,
) -> Result<TokenVerificationMetadata, MetadataError> {
    let endpoint = metadata_endpoint(auth_url)?;

    let resp = client
        .get(endpoint)
        .bearer_auth(api_key)
        .send()
        .await?;

    let status = resp.status();
    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(MetadataError::InvalidApiKey);
    }
    if !status.is_success() {
        return Err(MetadataError::UnexpectedStatus(status.as_u16()));
    }

    let body: MetadataResponse = resp.json().await?;

    Ok(TokenVerificationMetadata {
        verifier_key_pem: body.verifier_key_pem,
        issuer: issuer_from_auth_url(auth_url),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issuer_is_the_origin_of_the_auth_url() {
        let url = Url::parse("https://auth.example.com/").unwrap();
        assert_eq!(issuer_from_auth_url(&url), "https://auth.example.com");

        let url = Url::parse("https://auth.example.com:443/some/path").unwrap();
        assert_eq!(issuer_from_auth_url(&url), "https://auth.example.com");

        let url = Url::parse("http://localhost:8080").unwrap();
        assert_eq!(issuer_from_auth_url(&url), "http://localhost:8080");
    }

    #[test]
    fn endpoint_keeps_the_auth_url_path_prefix() {
        let cases = [
            ("https://auth.example.com", "https://auth.example.com/api/v1/token_verification_metadata"),
            ("https://auth.example.com/", "https://auth.example.com/api/v1/token_verification_metadata"),
            (
                "https://example.com/tenant",
                "https://example.com/tenant/api/v1/token_verification_metadata",
            ),
            (
                "https://example.com/tenant/",
                "https://example.com/tenant/api/v1/token_verification_metadata",
            ),
        ];

        for (auth_url, expected) in cases {
            let url = Url::parse(auth_url).unwrap();
            assert_eq!(metadata_endpoint(&url).unwrap().as_str(), expected, "{auth_url}");
        }
    }

    #[test]
    fn debug_output_skips_the_key() {
        let metadata = TokenVerificationMetadata {
            verifier_key_pem: "-----BEGIN PUBLIC KEY-----".into(),
            issuer: "https://auth.example.com".into(),
        };
        let rendered = format!("{metadata:?}");
        assert!(rendered.contains("auth.example.com"));
        assert!(!rendered.contains("BEGIN PUBLIC KEY"));
    }
}
