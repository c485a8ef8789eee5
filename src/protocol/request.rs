//! Request and Response message types.
//!
//! Defines the message format for CDP command requests and responses.

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::identifiers::{CdpSessionId, RequestId};

use super::Command;

// ============================================================================
// Request
// ============================================================================

/// A command request sent to the browser.
///
/// # Format
///
/// ```json
/// {
///   "id": 7,
///   "method": "Domain.method",
///   "params": { ... },
///   "sessionId": "..."
/// }
/// ```
///
/// `sessionId` is omitted for browser-level commands.
#[derive(Debug, Clone, Serialize)]
pub struct Request {
    /// Unique identifier for request/response correlation.
    pub id: RequestId,

    /// Command with method and params.
    #[serde(flatten)]
    pub command: Command,

    /// Flattened session the command is routed to.
    #[serde(rename = "sessionId", skip_serializing_if = "Option::is_none")]
    pub session_id: Option<CdpSessionId>,
}

impl Request {
    /// Creates a browser-level request with auto-generated ID.
    #[inline]
    #[must_use]
    pub fn new(command: Command) -> Self {
        Self {
            id: RequestId::generate(),
            command,
            session_id: None,
        }
    }

    /// Creates a request routed to a page session.
    #[inline]
    #[must_use]
    pub fn for_session(session_id: CdpSessionId, command: Command) -> Self {
        Self {
            id: RequestId::generate(),
            command,
            session_id: Some(session_id),
        }
    }
}

// ============================================================================
// Response
// ============================================================================

/// A command response from the browser.
///
/// # Format
///
/// Success:
/// ```json
/// { "id": 7, "result": { ... } }
/// ```
///
/// Error:
/// ```json
/// { "id": 7, "error": { "code": -32000, "message": "..." } }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Response {
    /// Matches the request `id`.
    pub id: RequestId,

    /// Result data (if success).
    #[serde(default)]
    pub result: Option<Value>,

    /// Error object (if error).
    #[serde(default)]
    pub error: Option<ResponseError>,

    /// Session the response belongs to.
    #[serde(rename = "sessionId", default)]
    pub session_id: Option<CdpSessionId>,
}

/// Error object carried by a failed response.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseError {
    /// CDP error code.
    pub code: i64,
    /// Human-readable message.
    pub message: String,
}

impl Response {
    /// Returns `true` if this is a success response.
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Extracts the result value, returning error if response was error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cdp`] if the response carried an error object.
    pub fn into_result(self) -> Result<Value> {
        match self.error {
            Some(err) => Err(Error::cdp(err.code, err.message)),
            None => Ok(self.result.unwrap_or(Value::Null)),
        }
    }

    /// Gets a string value from the result.
    ///
    /// Returns empty string if key not found or not a string.
    #[inline]
    #[must_use]
    pub fn get_string(&self, key: &str) -> String {
        self.result
            .as_ref()
            .and_then(|v| v.get(key))
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string()
    }
}

// ============================================================================
// Tests
// ============================================================================
