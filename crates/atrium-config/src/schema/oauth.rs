//! Google OAuth settings for the desktop sign-in flow.

use serde::{Deserialize, Serialize};

pub const GOOGLE_AUTH_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const GOOGLE_TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OauthConfig {
    pub google_client_id: String,
    pub auth_endpoint: String,
    pub token_endpoint: String,
    pub scopes: Vec<String>,
    /// How long to wait for the browser redirect, in seconds.
    pub redirect_timeout_secs: u64,
}

impl Default for OauthConfig {
    fn default() -> Self {
        Self {
            google_client_id: String::new(),
            auth_endpoint: GOOGLE_AUTH_ENDPOINT.into(),
            token_endpoint: GOOGLE_TOKEN_ENDPOINT.into(),
            scopes: vec!["openid".into(), "email".into(), "profile".into()],
            redirect_timeout_secs: 300,
        }
    }
}
