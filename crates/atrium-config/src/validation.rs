//! Configuration validation.
//!
//! Collects every problem before failing so the user sees them all at once.

use atrium_common::ConfigError;

use crate::schema::{AtriumConfig, DevConfig};

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &AtriumConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    // Window geometry
    validate_range(&mut errors, "window.default_width", config.window.default_width, 1, 16384);
    validate_range(&mut errors, "window.default_height", config.window.default_height, 1, 16384);
    validate_range(&mut errors, "window.min_width", config.window.min_width, 1, 16384);
    if config.window.min_width > config.window.default_width {
        errors.push(format!(
            "window.min_width = {} exceeds window.default_width = {}",
            config.window.min_width, config.window.default_width
        ));
    }
    if config.window.title.trim().is_empty() {
        errors.push("window.title must not be empty".into());
    }

    // Dev server
    errors.extend(dev_errors(&config.dev));

    // Storage
    if config.storage.window_state_file.is_empty()
        || config.storage.window_state_file.contains(['/', '\\'])
    {
        errors.push(format!(
            "storage.window_state_file = {:?} must be a plain file name",
            config.storage.window_state_file
        ));
    }

    // OAuth
    if !is_http_url(&config.oauth.auth_endpoint) {
        errors.push("oauth.auth_endpoint must be an http(s) URL".into());
    }
    if !is_http_url(&config.oauth.token_endpoint) {
        errors.push("oauth.token_endpoint must be an http(s) URL".into());
    }
    validate_range_u64(
        &mut errors,
        "oauth.redirect_timeout_secs",
        config.oauth.redirect_timeout_secs,
        5,
        3600,
    );

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

/// Validate only the `[dev]` section, which command-line flags can change
/// after the file was loaded.
pub fn validate_dev(dev: &DevConfig) -> Result<(), ConfigError> {
    let errors = dev_errors(dev);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn dev_errors(dev: &DevConfig) -> Vec<String> {
    match &dev.server_url {
        Some(url) if !is_http_url(url) => {
            vec![format!("dev.server_url = {url:?} must be an http(s) URL")]
        }
        _ => Vec::new(),
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

fn validate_range(errors: &mut Vec<String>, name: &str, value: u32, min: u32, max: u32) {
    if value < min || value > max {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}

fn validate_range_u64(errors: &mut Vec<String>, name: &str, value: u64, min: u64, max: u64) {
    if value < min || value > max {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}
