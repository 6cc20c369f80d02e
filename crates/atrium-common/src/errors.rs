use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("path error: {0}")]
    PathError(String),

    #[error("dialog error: {0}")]
    DialogError(String),

    #[error("failed to open {target}: {reason}")]
    OpenError { target: String, reason: String },
}

/// Failures reading or writing persisted window geometry.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("window state io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("window state is corrupt: {0}")]
    Corrupt(String),
}

#[derive(Debug, thiserror::Error)]
pub enum WindowError {
    #[error("window creation failed: {0}")]
    Create(String),

    #[error("content load failed for {url}: {reason}")]
    Load { url: String, reason: String },

    #[error("channel setup failed: {0}")]
    Channel(String),

    #[error("webview error: {0}")]
    WebView(String),

    #[error("window {0} is destroyed")]
    Destroyed(u64),
}

#[derive(Debug, thiserror::Error)]
pub enum AtriumError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Window(#[from] WindowError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("oauth error: {0}")]
    Oauth(String),

    #[error("{0}")]
    Other(String),
}
