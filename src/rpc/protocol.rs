//! JSON-RPC 2.0 envelope shapes and standard error codes

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Protocol version literal carried by every envelope.
pub const VERSION: &str = "2.0";

/// Invalid JSON was received by the server.
pub const PARSE_ERROR: i64 = -32700;
/// The JSON sent is not a valid request object.
pub const INVALID_REQUEST: i64 = -32600;
/// The method does not exist / is not available.
pub const METHOD_NOT_FOUND: i64 = -32601;
/// Invalid method parameter(s).
pub const INVALID_PARAMS: i64 = -32602;
/// Internal JSON-RPC error.
pub const INTERNAL_ERROR: i64 = -32603;
/// Start of the -32000..-32099 range reserved for implementation-defined
/// server errors. Unused by the core; available to transport bindings.
pub const SERVER_ERROR: i64 = -32000;

/// One inbound request. Missing fields take their default so that sparse
/// but well-formed requests still resolve; wrongly-typed fields fail the
/// decode and surface as a parse error.
#[derive(Debug, Deserialize)]
pub struct Request {
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub params: Vec<Value>,
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub jsonrpc: String,
}

/// Successful response. `result` holds every value the operation returned,
/// in order, even for single-valued returns.
#[derive(Debug, Serialize)]
pub struct Response {
    pub id: i64,
    pub jsonrpc: &'static str,
    pub result: Vec<Value>,
}

impl Response {
    pub fn new(id: i64, result: Vec<Value>) -> Self {
        Self {
            id,
            jsonrpc: VERSION,
            result,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: i64,
    pub message: String,
}

/// Error response. `id` is always null, matching the observed wire
/// behavior even when the request id was known.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub id: Option<i64>,
    pub jsonrpc: &'static str,
    pub error: ErrorBody,
}

impl ErrorResponse {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            id: None,
            jsonrpc: VERSION,
            error: ErrorBody {
                code,
                message: message.into(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_serializes_with_result_array() {
        let response = Response::new(7, vec![serde_json::json!("hi")]);
        let encoded = serde_json::to_string(&response).expect("response serialization");
        assert_eq!(encoded, "{\"id\":7,\"jsonrpc\":\"2.0\",\"result\":[\"hi\"]}");
    }

    #[test]
    fn error_response_serializes_with_null_id() {
        let response = ErrorResponse::new(METHOD_NOT_FOUND, "Method Not Found.");
        let encoded = serde_json::to_string(&response).expect("error serialization");
        assert_eq!(
            encoded,
            "{\"id\":null,\"jsonrpc\":\"2.0\",\"error\":{\"code\":-32601,\"message\":\"Method Not Found.\"}}"
        );
    }

    #[test]
    fn request_tolerates_missing_fields() {
        let request: Request = serde_json::from_str("{}").expect("sparse request decodes");
        assert_eq!(request.method, "");
        assert!(request.params.is_empty());
        assert_eq!(request.id, 0);
    }

    #[test]
    fn request_rejects_wrongly_typed_fields() {
        let result: Result<Request, _> =
            serde_json::from_str(r#"{"method":"echo","params":"not-an-array"}"#);
        assert!(result.is_err());
    }
}
