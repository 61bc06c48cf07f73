//! Gateway error types with JSON-RPC 2.0 error codes.
//!
//! Registry and catalog rejections surface as `EXECUTION_ERROR` carrying the
//! stable failure kind in `data.reason`, so clients can branch on
//! `AlreadyVoted` or `NotOwner` without parsing messages.

use sc_01_project_registry::errors::RegistryError;
use sc_02_project_catalog::errors::CatalogError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fmt;

/// JSON-RPC error codes.
pub mod codes {
    /// Body is not JSON.
    pub const PARSE_ERROR: i32 = -32700;
    /// JSON, but not a JSON-RPC request.
    pub const INVALID_REQUEST: i32 = -32600;
    /// Unknown method name.
    pub const METHOD_NOT_FOUND: i32 = -32601;
    /// Missing or mistyped params.
    pub const INVALID_PARAMS: i32 = -32602;
    /// Gateway fault.
    pub const INTERNAL_ERROR: i32 = -32603;

    /// Batch or body too large.
    pub const LIMIT_EXCEEDED: i32 = -32005;
    /// Mutation without a usable caller.
    pub const UNAUTHORIZED: i32 = -32010;
    /// The registry rejected the call.
    pub const EXECUTION_ERROR: i32 = -32015;
}

/// The `error` member of a JSON-RPC response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    /// One of [`codes`].
    pub code: i32,
    /// Human-readable summary.
    pub message: String,
    /// Machine-readable details; `reason` holds the failure kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ApiError {
    /// Error without data.
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// Error with a data payload.
    pub fn with_data(code: i32, message: impl Into<String>, data: Value) -> Self {
        Self {
            data: Some(data),
            ..Self::new(code, message)
        }
    }

    fn labelled(code: i32, label: &str, details: impl fmt::Display) -> Self {
        Self::new(code, format!("{label}: {details}"))
    }

    /// Body is not valid JSON.
    pub fn parse_error(details: impl Into<String>) -> Self {
        Self::labelled(codes::PARSE_ERROR, "Parse error", details.into())
    }

    /// Malformed request object.
    pub fn invalid_request(details: impl Into<String>) -> Self {
        Self::labelled(codes::INVALID_REQUEST, "Invalid request", details.into())
    }

    /// Unknown method.
    pub fn method_not_found(method: &str) -> Self {
        Self::labelled(codes::METHOD_NOT_FOUND, "Method not found", method)
    }

    /// Bad params.
    pub fn invalid_params(details: impl Into<String>) -> Self {
        Self::labelled(codes::INVALID_PARAMS, "Invalid params", details.into())
    }

    /// Gateway fault.
    pub fn internal(details: impl Into<String>) -> Self {
        Self::labelled(codes::INTERNAL_ERROR, "Internal error", details.into())
    }

    /// Request exceeds a configured limit.
    pub fn limit_exceeded(limit: impl Into<String>) -> Self {
        Self::labelled(codes::LIMIT_EXCEEDED, "Limit exceeded", limit.into())
    }

    /// Missing or malformed caller identity.
    pub fn unauthorized(details: impl Into<String>) -> Self {
        Self::labelled(codes::UNAUTHORIZED, "Unauthorized", details.into())
    }

    /// A registry call was rejected.
    pub fn execution_error(reason: &str, details: impl fmt::Display) -> Self {
        Self::rejection(codes::EXECUTION_ERROR, "Execution reverted", reason, details, Map::new())
    }

    /// `data = {reason, ..extra}`.
    fn rejection(
        code: i32,
        label: &str,
        reason: &str,
        details: impl fmt::Display,
        mut extra: Map<String, Value>,
    ) -> Self {
        extra.insert("reason".into(), Value::from(reason));
        Self {
            data: Some(Value::Object(extra)),
            ..Self::labelled(code, label, details)
        }
    }

    /// Failure kind carried in `data.reason`, if any.
    pub fn reason(&self) -> Option<&str> {
        self.data.as_ref()?.get("reason")?.as_str()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason() {
            Some(reason) => write!(f, "{} ({reason}, code {})", self.message, self.code),
            None => write!(f, "{} (code {})", self.message, self.code),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        match e.classify() {
            serde_json::error::Category::Syntax | serde_json::error::Category::Eof => {
                ApiError::parse_error(e.to_string())
            }
            _ => ApiError::invalid_params(e.to_string()),
        }
    }
}

impl From<RegistryError> for ApiError {
    fn from(e: RegistryError) -> Self {
        ApiError::execution_error(e.kind(), &e)
    }
}

impl From<CatalogError> for ApiError {
    fn from(e: CatalogError) -> Self {
        let kind = e.kind();
        match e {
            CatalogError::Registry(inner) => inner.into(),
            CatalogError::AttestationFailed { token_id, .. } => {
                let mut extra = Map::new();
                extra.insert("tokenId".into(), json!(token_id));
                ApiError::rejection(codes::EXECUTION_ERROR, "Execution reverted", kind, &e, extra)
            }
            CatalogError::MissingFields(ref fields) => {
                let mut extra = Map::new();
                extra.insert("fields".into(), json!(fields));
                ApiError::rejection(codes::INVALID_PARAMS, "Invalid params", kind, &e, extra)
            }
        }
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Failures of the gateway itself, outside any request.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The configuration does not validate.
    #[error("invalid gateway configuration: {0}")]
    Config(String),

    /// The listen address could not be bound.
    #[error("cannot bind gateway socket: {0}")]
    Bind(#[source] std::io::Error),

    /// The HTTP server stopped on an I/O failure.
    #[error("gateway server failed: {0}")]
    Serve(#[source] std::io::Error),
}
