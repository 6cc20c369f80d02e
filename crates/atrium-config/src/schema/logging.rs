//! Logging configuration.

use serde::{Deserialize, Serialize};

/// Log level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
#[derive(Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// The `tracing` directive for the `atrium` crates at this level.
    pub fn directive(self) -> &'static str {
        match self {
            Self::Trace => "atrium=trace",
            Self::Debug => "atrium=debug",
            Self::Info => "atrium=info",
            Self::Warning => "atrium=warn",
            Self::Error => "atrium=error",
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
    /// Extra `EnvFilter` directives appended after `level`,
    /// e.g. `"wry=warn,tao=warn"`.
    pub filter: Option<String>,
}
