//! Environment-variable overrides applied on top of the file config.
//!
//! `ATRIUM_ENV=development` switches dev mode on, `DEV_SERVER_URL` sets the
//! dev server, `ATRIUM_LOG` replaces the extra log filter and
//! `GOOGLE_CLIENT_ID` fills in the OAuth client.

use crate::schema::AtriumConfig;

pub const ENV_MODE: &str = "ATRIUM_ENV";
pub const ENV_DEV_SERVER_URL: &str = "DEV_SERVER_URL";
pub const ENV_LOG: &str = "ATRIUM_LOG";
pub const ENV_GOOGLE_CLIENT_ID: &str = "GOOGLE_CLIENT_ID";

/// Apply overrides from the process environment.
pub fn apply_env_overrides(config: &mut AtriumConfig) {
    apply_overrides_with(config, |name| std::env::var(name).ok());
}

/// Apply overrides using `lookup` to resolve variables. Empty values are
/// treated as unset.
pub fn apply_overrides_with<F>(config: &mut AtriumConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(mode) = get(ENV_MODE) {
        config.dev.enabled = matches!(mode.as_str(), "development" | "dev");
        tracing::debug!(mode = %mode, dev = config.dev.enabled, "mode from environment");
    }
    if let Some(url) = get(ENV_DEV_SERVER_URL) {
        config.dev.server_url = Some(url);
    }
    if let Some(filter) = get(ENV_LOG) {
        config.logging.filter = Some(filter);
    }
    if let Some(client_id) = get(ENV_GOOGLE_CLIENT_ID) {
        config.oauth.google_client_id = client_id;
    }
}
