use std::path::PathBuf;

use atrium_config::AtriumConfig;
use clap::Parser;

/// Atrium : desktop host for the Atrium web app.
#[derive(Parser, Debug)]
#[command(name = "atrium", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error or a full
    /// filter directive).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Run in development mode (load from the dev server, open devtools).
    #[arg(long)]
    pub dev: bool,

    /// Development server URL; implies --dev.
    #[arg(long)]
    pub dev_server_url: Option<String>,
}

impl Args {
    /// Apply command-line overrides on top of the loaded config.
    pub fn apply_to(&self, config: &mut AtriumConfig) {
        if self.dev || self.dev_server_url.is_some() {
            config.dev.enabled = true;
        }
        if let Some(url) = &self.dev_server_url {
            config.dev.server_url = Some(url.clone());
        }
    }

    /// Filter directive for `--log-level`, accepting bare level names.
    pub fn log_directive(&self) -> Option<String> {
        let level = self.log_level.as_deref()?.trim();
        if level.is_empty() {
            return None;
        }
        Some(match level {
            "trace" | "debug" | "info" | "warn" | "error" => format!("atrium={level}"),
            other => other.to_owned(),
        })
    }
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dev_server_url_implies_dev() {
        let args = Args::parse_from(["atrium", "--dev-server-url", "http://localhost:8080"]);
        let mut config = AtriumConfig::default();
        args.apply_to(&mut config);
        assert!(config.dev.enabled);
        assert_eq!(config.dev.server_url.as_deref(), Some("http://localhost:8080"));
    }

    #[test]
    fn no_flags_leave_config_alone() {
        let args = Args::parse_from(["atrium"]);
        let mut config = AtriumConfig::default();
        args.apply_to(&mut config);
        assert!(!config.dev.enabled);
        assert!(config.dev.server_url.is_none());
        assert!(args.config.is_none());
    }

    #[test]
    fn log_level_names_expand_to_directives() {
        let args = Args::parse_from(["atrium", "--log-level", "debug"]);
        assert_eq!(args.log_directive().as_deref(), Some("atrium=debug"));

        let args = Args::parse_from(["atrium", "--log-level", "atrium_rpc=trace"]);
        assert_eq!(args.log_directive().as_deref(), Some("atrium_rpc=trace"));

        assert_eq!(Args::parse_from(["atrium"]).log_directive(), None);
    }

    #[test]
    fn config_path_is_parsed() {
        let args = Args::parse_from(["atrium", "--config", "/tmp/atrium.toml", "--dev"]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/atrium.toml")));
        assert!(args.dev);
    }
}
