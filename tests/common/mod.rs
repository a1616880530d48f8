#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use axum::Router;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode, get_current_timestamp};
use propelauth_axum::{AppState, AuthService, Config, app::build_router};
use serde_json::{Value, json};

pub const PRIVATE_KEY: &str = include_str!("../fixtures/test_rsa_private.pem");
pub const PUBLIC_KEY: &str = include_str!("../fixtures/test_rsa_public.pem");
pub const OTHER_PRIVATE_KEY: &str = include_str!("../fixtures/other_rsa_private.pem");
pub const AUTH_URL: &str = "https://auth.example.com";

pub fn config_from(vars: &[(&str, &str)]) -> Config {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(|key| vars.get(key).cloned()).expect("valid test config")
}

pub fn test_config() -> Config {
    config_from(&[
        ("PROPELAUTH_AUTH_URL", AUTH_URL),
        ("PROPELAUTH_API_KEY", "test-api-key"),
        ("PROPELAUTH_VERIFIER_KEY", PUBLIC_KEY),
    ])
}

pub fn test_router() -> Router {
    let auth = AuthService::new(PUBLIC_KEY, AUTH_URL, 0).expect("valid public key");
    build_router(AppState::new(Arc::new(auth)), &test_config())
}

pub fn sign(key: &str, payload: &Value) -> String {
    encode(
        &Header::new(Algorithm::RS256),
        payload,
        &EncodingKey::from_rsa_pem(key.as_bytes()).expect("valid private key"),
    )
    .expect("token signs")
}

/// Claims for a user who is Admin in "org_acme" and Member in "org_beta".
pub fn user_claims() -> Value {
    let now = get_current_timestamp();
    json!({
        "iss": AUTH_URL,
        "iat": now,
        "exp": now + 3600,
        "user_id": "user_1",
        "email": "ada@example.com",
        "first_name": "Ada",
        "login_method": {"login_method": "password"},
        "org_id_to_org_member_info": {
            "org_acme": {
                "org_id": "org_acme",
                "org_name": "Acme",
                "url_safe_org_name": "acme",
                "user_role": "Admin",
                "inherited_user_roles_plus_current_role": ["Admin", "Member"],
                "org_role_structure": "single_role_in_hierarchy",
                "additional_roles": [],
                "user_permissions": ["billing::read", "billing::write"]
            },
            "org_beta": {
                "org_id": "org_beta",
                "org_name": "Beta",
                "url_safe_org_name": "beta",
                "user_role": "Member",
                "inherited_user_roles_plus_current_role": ["Member"],
                "org_role_structure": "single_role_in_hierarchy",
                "additional_roles": [],
                "user_permissions": []
            }
        }
    })
}

pub fn user_token() -> String {
    sign(PRIVATE_KEY, &user_claims())
}
