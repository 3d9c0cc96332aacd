use alloc::string::{String, ToString};

use serde::{Deserialize, Serialize, Serializer, ser::SerializeMap};
use serde_json::Value;

use crate::error::VibrationError;

/// A named command with its loosely-typed arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    pub method: String,
    #[serde(default)]
    pub arguments: Value,
}

impl MethodCall {
    pub fn new(method: &str, arguments: Value) -> Self {
        Self {
            method: method.to_string(),
            arguments,
        }
    }
}

/// Reply to a [`MethodCall`].
///
/// `NotImplemented` is kept apart from `Error` so the host can tell an
/// unsupported command from a failed one.
#[derive(Debug, Clone, PartialEq)]
pub enum MethodResponse {
    Success(Value),
    Error { code: String, message: String },
    NotImplemented,
}

impl MethodResponse {
    pub fn error(code: &str, message: &str) -> Self {
        MethodResponse::Error {
            code: code.to_string(),
            message: message.to_string(),
        }
    }
}

impl From<VibrationError> for MethodResponse {
    fn from(e: VibrationError) -> Self {
        MethodResponse::Error {
            code: e.code().to_string(),
            message: e.to_string(),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    code: &'a str,
    message: &'a str,
}

impl Serialize for MethodResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            MethodResponse::Success(value) => map.serialize_entry("success", value)?,
            MethodResponse::Error { code, message } => map.serialize_entry(
                "error",
                &ErrorBody {
                    code: code.as_str(),
                    message: message.as_str(),
                },
            )?,
            MethodResponse::NotImplemented => map.serialize_entry("notImplemented", &true)?,
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_call_without_arguments() {
        let call: MethodCall = serde_json::from_str(r#"{"method":"cancel"}"#).unwrap();
        assert_eq!(call.method, "cancel");
        assert_eq!(call.arguments, Value::Null);
    }

    #[test]
    fn test_response_shapes() {
        assert_eq!(
            serde_json::to_value(MethodResponse::Success(json!(true))).unwrap(),
            json!({"success": true})
        );
        assert_eq!(
            serde_json::to_value(MethodResponse::NotImplemented).unwrap(),
            json!({"notImplemented": true})
        );
        assert_eq!(
            serde_json::to_value(MethodResponse::from(VibrationError::MissingArgument("repeat")))
                .unwrap(),
            json!({"error": {"code": "invalid_argument", "message": "missing argument `repeat`"}})
        );
    }
}
