use serde::{Deserialize, Serialize};

/// Machine-readable error class carried in an `error` frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    UnknownMethod,
    InvalidParams,
    HandlerFailed,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::UnknownMethod => "unknown_method",
            Self::InvalidParams => "invalid_params",
            Self::HandlerFailed => "handler_failed",
        };
        f.write_str(s)
    }
}

/// Error body sent back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{code}: {message}")]
pub struct RpcErrorPayload {
    pub code: ErrorCode,
    pub message: String,
}

impl RpcErrorPayload {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn unknown_method(method: &str) -> Self {
        Self::new(ErrorCode::UnknownMethod, format!("unknown method: {method}"))
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidParams, message)
    }

    pub fn handler_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::HandlerFailed, message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("channel is closed")]
    Closed,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RpcError {
    #[error("remote error: {0}")]
    Remote(RpcErrorPayload),

    #[error("channel closed")]
    ChannelClosed,

    #[error("failed to encode frame: {0}")]
    Encode(String),

    #[error("unexpected response: {0}")]
    Decode(String),
}

impl RpcError {
    /// The remote error code, if the other side answered with an error.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Remote(payload) => Some(payload.code),
            _ => None,
        }
    }
}

impl From<TransportError> for RpcError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Closed => Self::ChannelClosed,
        }
    }
}
