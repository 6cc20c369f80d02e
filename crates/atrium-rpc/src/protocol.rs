//! RPC frames carried over a transport [`Message`](crate::Message).
//!
//! ```json
//! {"type":"call","id":1,"method":"workspace.list","params":[]}
//! {"type":"result","id":1,"value":["ws-1"]}
//! {"type":"error","id":2,"error":{"code":"unknown_method","message":"..."}}
//! {"type":"notify","method":"updateEnv","params":["NAME","value"]}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RpcErrorPayload;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Frame {
    /// Request expecting exactly one `result` or `error` with the same id.
    Call {
        id: u64,
        method: String,
        #[serde(default)]
        params: Vec<Value>,
    },
    /// One-way request. Never answered.
    Notify {
        method: String,
        #[serde(default)]
        params: Vec<Value>,
    },
    Result {
        id: u64,
        #[serde(default)]
        value: Value,
    },
    Error {
        id: u64,
        error: RpcErrorPayload,
    },
}

impl Frame {
    pub fn parse(message: &Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(message)
    }

    pub fn to_message(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Correlation id of a call or response.
    pub fn id(&self) -> Option<u64> {
        match self {
            Self::Call { id, .. } | Self::Result { id, .. } | Self::Error { id, .. } => Some(*id),
            Self::Notify { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use serde_json::json;

    #[test]
    fn call_wire_format() {
        let frame = Frame::Call {
            id: 7,
            method: "workspace.delete".into(),
            params: vec![json!("ws-1")],
        };
        assert_eq!(
            frame.to_message().unwrap(),
            json!({"type":"call","id":7,"method":"workspace.delete","params":["ws-1"]})
        );
    }

    #[test]
    fn error_wire_format() {
        let frame = Frame::Error {
            id: 3,
            error: RpcErrorPayload::unknown_method("nope"),
        };
        assert_eq!(
            frame.to_message().unwrap(),
            json!({
                "type": "error",
                "id": 3,
                "error": {"code": "unknown_method", "message": "unknown method: nope"}
            })
        );
    }

    #[test]
    fn missing_params_and_value_default() {
        let call = Frame::parse(&json!({"type":"call","id":1,"method":"workspace.list"})).unwrap();
        assert_eq!(
            call,
            Frame::Call {
                id: 1,
                method: "workspace.list".into(),
                params: vec![]
            }
        );

        let result = Frame::parse(&json!({"type":"result","id":1})).unwrap();
        assert_eq!(
            result,
            Frame::Result {
                id: 1,
                value: Value::Null
            }
        );
    }

    #[test]
    fn parses_error_code() {
        let frame = Frame::parse(&json!({
            "type": "error",
            "id": 9,
            "error": {"code": "handler_failed", "message": "disk full"}
        }))
        .unwrap();
        match frame {
            Frame::Error { id, error } => {
                assert_eq!(id, 9);
                assert_eq!(error.code, ErrorCode::HandlerFailed);
            }
            other => panic!("unexpected frame {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_frames() {
        assert!(Frame::parse(&json!("hello")).is_err());
        assert!(Frame::parse(&json!({"type":"bogus"})).is_err());
        assert!(Frame::parse(&json!({"type":"call","method":"x"})).is_err());
    }

    #[test]
    fn notify_has_no_id() {
        let frame = Frame::Notify {
            method: "updateEnv".into(),
            params: vec![],
        };
        assert_eq!(frame.id(), None);
    }
}
