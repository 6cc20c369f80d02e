//! Values returned to content by the bridge.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Outcome of a file picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogResult {
    pub canceled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
}

impl DialogResult {
    pub fn canceled() -> Self {
        Self {
            canceled: true,
            file_path: None,
        }
    }

    pub fn picked(path: impl Into<String>) -> Self {
        Self {
            canceled: false,
            file_path: Some(path.into()),
        }
    }
}

/// `fetch()` options for the token request content performs itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestInit {
    pub method: String,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

/// Result of `getGoogleOauthCode`: where and how to exchange the code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OauthExchange {
    pub request_init: RequestInit,
    pub url: String,
}
