/*
 * Responsibility
 * - Load settings from the environment (.env honored): auth service URL, API key,
 *   optional verifier key / issuer, listen port, CORS allowlist
 * - Validate them (missing or invalid values abort startup)
 */
use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(value: Option<&str>) -> Self {
        match value
            .unwrap_or("development")
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing configuration: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

#[derive(Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    pub auth_url: Url,
    pub api_key: String,
    // When unset, the key is fetched from the auth service at startup.
    pub verifier_key_pem: Option<String>,
    pub issuer: Option<String>,
    pub access_token_leeway_seconds: u64,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print the API key
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("auth_url", &self.auth_url.as_str())
            .field("verifier_key_pem", &self.verifier_key_pem.is_some())
            .field("issuer", &self.issuer)
            .field(
                "access_token_leeway_seconds",
                &self.access_token_leeway_seconds,
            )
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source (the process environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port: u16 = match non_empty("PORT") {
            Some(v) => v.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };
        let addr = SocketAddr::from(([0, 0, 0, 0], port));

        let app_env = AppEnv::parse(non_empty("APP_ENV").as_deref());

        let cors_allowed_origins = non_empty("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let auth_url = non_empty("PROPELAUTH_AUTH_URL")
            .ok_or(ConfigError::Missing("PROPELAUTH_AUTH_URL"))?;
        let auth_url = Url::parse(auth_url.trim())
            .ok()
            .filter(|u| u.has_host())
            .ok_or(ConfigError::Invalid("PROPELAUTH_AUTH_URL"))?;

        let api_key =
            non_empty("PROPELAUTH_API_KEY").ok_or(ConfigError::Missing("PROPELAUTH_API_KEY"))?;

        let verifier_key_pem = non_empty("PROPELAUTH_VERIFIER_KEY").map(|v| v.replace("\\n", "\n"));

        let issuer = non_empty("PROPELAUTH_ISSUER");

        let access_token_leeway_seconds = match non_empty("ACCESS_TOKEN_LEEWAY_SECONDS") {
            Some(v) => v
                .parse::<u64>()
                .map_err(|_| ConfigError::Invalid("ACCESS_TOKEN_LEEWAY_SECONDS"))?,
            None => 60,
        };

        Ok(Self {
            addr,
            app_env,
            cors_allowed_origins,
            auth_url,
            api_key,
            verifier_key_pem,
            issuer,
            access_token_leeway_seconds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    const REQUIRED: [(&str, &str); 2] = [
        ("PROPELAUTH_AUTH_URL", "https://auth.example.com"),
        ("PROPELAUTH_API_KEY", "secret"),
    ];

    #[test]
    fn defaults_apply_when_only_required_values_are_set() {
        let config = Config::from_lookup(lookup(&REQUIRED)).unwrap();

        assert_eq!(config.addr.port(), 3000);
        assert_eq!(config.app_env, AppEnv::Development);
        assert!(config.cors_allowed_origins.is_empty());
        assert_eq!(config.auth_url.as_str(), "https://auth.example.com/");
        assert_eq!(config.api_key, "secret");
        assert!(config.verifier_key_pem.is_none());
        assert!(config.issuer.is_none());
        assert_eq!(config.access_token_leeway_seconds, 60);
    }

    #[test]
    fn missing_required_values_are_reported_by_name() {
        let err = Config::from_lookup(lookup(&[("PROPELAUTH_API_KEY", "secret")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("PROPELAUTH_AUTH_URL"));

        let err = Config::from_lookup(lookup(&[(
            "PROPELAUTH_AUTH_URL",
            "https://auth.example.com",
        )]))
        .unwrap_err();
        assert_eq!(err, ConfigError::Missing("PROPELAUTH_API_KEY"));
    }

    #[test]
    fn rejects_relative_auth_url_and_bad_numbers() {
        let err = Config::from_lookup(lookup(&[
            ("PROPELAUTH_AUTH_URL", "auth.example.com"),
            ("PROPELAUTH_API_KEY", "secret"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::Invalid("PROPELAUTH_AUTH_URL"));

        let mut vars = REQUIRED.to_vec();
        vars.push(("PORT", "http"));
        assert_eq!(
            Config::from_lookup(lookup(&vars)).unwrap_err(),
            ConfigError::Invalid("PORT")
        );
    }

    #[test]
    fn optional_values_are_read() {
        let mut vars = REQUIRED.to_vec();
        vars.extend([
            ("PORT", "8080"),
            ("APP_ENV", "PROD"),
            ("CORS_ALLOWED_ORIGINS", "https://a.example, ,https://b.example"),
            (
                "PROPELAUTH_VERIFIER_KEY",
                "-----BEGIN PUBLIC KEY-----\\nabc\\n-----END PUBLIC KEY-----",
            ),
            ("PROPELAUTH_ISSUER", "https://issuer.example"),
            ("ACCESS_TOKEN_LEEWAY_SECONDS", "5"),
        ]);
        let config = Config::from_lookup(lookup(&vars)).unwrap();

        assert_eq!(config.addr.port(), 8080);
        assert!(config.app_env.is_production());
        assert_eq!(
            config.cors_allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
        assert_eq!(
            config.verifier_key_pem.as_deref(),
            Some("-----BEGIN PUBLIC KEY-----\nabc\n-----END PUBLIC KEY-----")
        );
        assert_eq!(config.issuer.as_deref(), Some("https://issuer.example"));
        assert_eq!(config.access_token_leeway_seconds, 5);
    }

    #[test]
    fn debug_output_hides_the_api_key() {
        let config = Config::from_lookup(lookup(&REQUIRED)).unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("secret"));
    }
}
