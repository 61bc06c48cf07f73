//! JSON-RPC 2.0 envelope types.

use super::error::ApiError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Protocol version string.
pub const JSONRPC_VERSION: &str = "2.0";

/// Longest accepted string id.
pub const MAX_ID_LENGTH: usize = 256;

/// JSON-RPC request ID.
///
/// Null and missing ids mark notifications, which the gateway does not
/// accept; every request gets a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JsonRpcId {
    /// String ID
    String(String),
    /// Numeric ID
    Number(i64),
}

impl JsonRpcId {
    /// Validate the ID is acceptable
    pub fn validate(&self) -> Result<(), &'static str> {
        match self {
            JsonRpcId::String(s) => {
                if s.is_empty() {
                    Err("request ID cannot be empty string")
                } else if s.len() > MAX_ID_LENGTH {
                    Err("request ID string too long (max 256 chars)")
                } else {
                    Ok(())
                }
            }
            JsonRpcId::Number(_) => Ok(()),
        }
    }
}

impl fmt::Display for JsonRpcId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonRpcId::String(s) => write!(f, "\"{}\"", s),
            JsonRpcId::Number(n) => write!(f, "{}", n),
        }
    }
}

/// A validated request.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonRpcRequest {
    /// Request id
    pub id: JsonRpcId,
    /// Method name
    pub method: String,
    /// Positional (array) or single-object params
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    /// Validate a raw request object.
    ///
    /// On failure returns the error together with the id to echo, when one
    /// could be read.
    pub fn from_value(raw: &Value) -> Result<Self, (Option<JsonRpcId>, ApiError)> {
        let object = raw
            .as_object()
            .ok_or_else(|| (None, ApiError::invalid_request("request must be an object")))?;

        let id = match object.get("id") {
            None | Some(Value::Null) => {
                return Err((
                    None,
                    ApiError::invalid_request("null id (notifications not supported)"),
                ))
            }
            Some(v) => serde_json::from_value::<JsonRpcId>(v.clone())
                .map_err(|_| (None, ApiError::invalid_request("id must be string or number")))?,
        };
        id.validate()
            .map_err(|e| (None, ApiError::invalid_request(e)))?;

        if object.get("jsonrpc").and_then(Value::as_str) != Some(JSONRPC_VERSION) {
            return Err((Some(id), ApiError::invalid_request("jsonrpc must be \"2.0\"")));
        }

        let method = match object.get("method").and_then(Value::as_str) {
            Some(m) if !m.is_empty() => m.to_string(),
            _ => return Err((Some(id), ApiError::invalid_request("missing method"))),
        };

        let params = match object.get("params") {
            None | Some(Value::Null) => None,
            Some(p @ (Value::Array(_) | Value::Object(_))) => Some(p.clone()),
            Some(_) => {
                return Err((
                    Some(id),
                    ApiError::invalid_request("params must be an array or object"),
                ))
            }
        };

        Ok(Self { id, method, params })
    }
}

/// A response object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// Always "2.0"
    pub jsonrpc: String,
    /// Echoed id; null when the request id was unreadable
    pub id: Option<JsonRpcId>,
    /// Success value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

impl JsonRpcResponse {
    /// Successful response.
    pub fn success(id: JsonRpcId, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: Some(id),
            result: Some(result),
            error: None,
        }
    }

    /// Error response.
    pub fn failure(id: Option<JsonRpcId>, error: ApiError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }

    /// Whether this is an error response.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
