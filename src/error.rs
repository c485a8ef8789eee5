//! Error types for resilient-webdriver.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use resilient_webdriver::{By, Result};
//!
//! async fn example(session: &Session) -> Result<()> {
//!     let element = session.find_element(&By::id("submit")).await?;
//!     element.click().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Configuration | [`Error::Config`], [`Error::Profile`], [`Error::ChromeNotFound`] |
//! | Connection | [`Error::Connection`], [`Error::ConnectionTimeout`], [`Error::ConnectionClosed`] |
//! | Protocol | [`Error::Protocol`], [`Error::Cdp`], [`Error::InvalidArgument`] |
//! | Element | [`Error::ElementNotFound`], [`Error::StaleElement`], [`Error::ElementNotInteractable`] |
//! | Interaction | [`Error::DropdownValueNotFound`], [`Error::Interaction`], [`Error::NoSuchAlert`] |
//! | Execution | [`Error::ScriptError`], [`Error::Navigation`], [`Error::Timeout`], [`Error::RequestTimeout`] |
//! | External | [`Error::Io`], [`Error::Json`], [`Error::WebSocket`] |

// ============================================================================
// Imports
// ============================================================================

use std::io::Error as IoError;
use std::path::PathBuf;
use std::result::Result as StdResult;

use thiserror::Error;
use tokio::sync::oneshot::error::RecvError;
use tokio_tungstenite::tungstenite::Error as WsError;

use crate::identifiers::{ElementId, RequestId};

// ============================================================================
// Constants
// ============================================================================

/// CDP error messages that mean a remote object handle no longer resolves.
const STALE_OBJECT_MESSAGES: &[&str] = &[
    "Could not find object with given id",
    "Cannot find context with specified id",
    "No node with given id",
    "Execution context was destroyed",
];

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Each variant includes relevant context for debugging.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration error.
    ///
    /// Returned when driver configuration is invalid.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// Profile error.
    ///
    /// Returned when the temporary user-data directory cannot be created.
    #[error("Profile error: {message}")]
    Profile {
        /// Description of the profile error.
        message: String,
    },

    /// Chrome binary not found.
    ///
    /// Returned when the configured or discovered binary does not exist.
    #[error("Chrome not found at: {path}")]
    ChromeNotFound {
        /// Path where Chrome was expected.
        path: PathBuf,
    },

    /// Failed to launch the Chrome process.
    #[error("Failed to launch Chrome: {message}")]
    ProcessLaunchFailed {
        /// Description of the launch failure.
        message: String,
    },

    // ========================================================================
    // Connection Errors
    // ========================================================================
    /// WebSocket connection failed.
    #[error("Connection failed: {message}")]
    Connection {
        /// Description of the connection error.
        message: String,
    },

    /// Timed out waiting for Chrome to expose its DevTools endpoint.
    #[error("Connection timeout after {timeout_ms}ms")]
    ConnectionTimeout {
        /// Milliseconds waited before timeout.
        timeout_ms: u64,
    },

    /// WebSocket connection closed unexpectedly.
    #[error("Connection closed")]
    ConnectionClosed,

    // ========================================================================
    // Protocol Errors
    // ========================================================================
    /// Invalid argument supplied by the caller.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument.
        message: String,
    },

    /// Protocol violation or unexpected response shape.
    #[error("Protocol error: {message}")]
    Protocol {
        /// Description of the protocol violation.
        message: String,
    },

    /// Error object returned by Chrome for a command.
    #[error("CDP error {code}: {message}")]
    Cdp {
        /// CDP error code.
        code: i64,
        /// CDP error message.
        message: String,
    },

    // ========================================================================
    // Element Errors
    // ========================================================================
    /// No element matched the locator.
    #[error("Element not found: {selector}")]
    ElementNotFound {
        /// Locator used, formatted as `strategy:value`.
        selector: String,
    },

    /// Element is stale (detached from the document or its context is gone).
    #[error("Stale element: {element_id}")]
    StaleElement {
        /// The stale element's ID.
        element_id: ElementId,
    },

    /// Element exists but cannot receive the requested interaction.
    #[error("Element {element_id} not interactable: {reason}")]
    ElementNotInteractable {
        /// The element's ID.
        element_id: ElementId,
        /// Why the interaction was refused.
        reason: String,
    },

    // ========================================================================
    // Interaction Errors
    // ========================================================================
    /// A `<select>` has no option with the requested value.
    #[error("Dropdown has no option with value '{value}'")]
    DropdownValueNotFound {
        /// The value that was requested.
        value: String,
    },

    /// Both the primary and the fallback attempt failed for a field.
    #[error("Interaction with '{field}' failed (primary: {primary}; fallback: {fallback})")]
    Interaction {
        /// Logical field name.
        field: String,
        /// Error from the primary attempt.
        primary: Box<Error>,
        /// Error from the fallback attempt.
        fallback: Box<Error>,
    },

    /// No native dialog is currently open.
    #[error("No alert is open")]
    NoSuchAlert,

    // ========================================================================
    // Execution Errors
    // ========================================================================
    /// JavaScript execution error.
    #[error("Script error: {message}")]
    ScriptError {
        /// Error message from script execution.
        message: String,
    },

    /// Page navigation was rejected by the browser.
    #[error("Navigation to {url} failed: {message}")]
    Navigation {
        /// Target URL.
        url: String,
        /// Browser-provided error text.
        message: String,
    },

    /// Operation timeout.
    #[error("Timeout after {timeout_ms}ms: {operation}")]
    Timeout {
        /// Description of the operation that timed out.
        operation: String,
        /// Milliseconds waited before timeout.
        timeout_ms: u64,
    },

    /// Command request timeout.
    #[error("Request {request_id} timed out after {timeout_ms}ms")]
    RequestTimeout {
        /// The request ID that timed out.
        request_id: RequestId,
        /// Milliseconds waited before timeout.
        timeout_ms: u64,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// WebSocket error.
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] WsError),

    /// Channel receive error.
    #[error("Channel closed")]
    ChannelClosed(#[from] RecvError),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates a profile error.
    #[inline]
    pub fn profile(message: impl Into<String>) -> Self {
        Self::Profile {
            message: message.into(),
        }
    }

    /// Creates a Chrome not found error.
    #[inline]
    pub fn chrome_not_found(path: impl Into<PathBuf>) -> Self {
        Self::ChromeNotFound { path: path.into() }
    }

    /// Creates a process launch failed error.
    #[inline]
    pub fn process_launch_failed(err: IoError) -> Self {
        Self::ProcessLaunchFailed {
            message: err.to_string(),
        }
    }

    /// Creates a connection error.
    #[inline]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates a connection timeout error.
    #[inline]
    pub fn connection_timeout(timeout_ms: u64) -> Self {
        Self::ConnectionTimeout { timeout_ms }
    }

    /// Creates a protocol error.
    #[inline]
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// Creates a CDP error from a command response.
    #[inline]
    pub fn cdp(code: i64, message: impl Into<String>) -> Self {
        Self::Cdp {
            code,
            message: message.into(),
        }
    }

    /// Creates an invalid argument error.
    #[inline]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Creates an element not found error.
    #[inline]
    pub fn element_not_found(selector: impl Into<String>) -> Self {
        Self::ElementNotFound {
            selector: selector.into(),
        }
    }

    /// Creates a stale element error.
    #[inline]
    pub fn stale_element(element_id: ElementId) -> Self {
        Self::StaleElement { element_id }
    }

    /// Creates an element not interactable error.
    #[inline]
    pub fn not_interactable(element_id: ElementId, reason: impl Into<String>) -> Self {
        Self::ElementNotInteractable {
            element_id,
            reason: reason.into(),
        }
    }

    /// Creates a dropdown value not found error.
    #[inline]
    pub fn dropdown_value_not_found(value: impl Into<String>) -> Self {
        Self::DropdownValueNotFound {
            value: value.into(),
        }
    }

    /// Creates a terminal interaction error from both attempts.
    #[inline]
    pub fn interaction(field: impl Into<String>, primary: Error, fallback: Error) -> Self {
        Self::Interaction {
            field: field.into(),
            primary: Box::new(primary),
            fallback: Box::new(fallback),
        }
    }

    /// Creates a script error.
    #[inline]
    pub fn script_error(message: impl Into<String>) -> Self {
        Self::ScriptError {
            message: message.into(),
        }
    }

    /// Creates a navigation error.
    #[inline]
    pub fn navigation(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Navigation {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates a timeout error.
    #[inline]
    pub fn timeout(operation: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            operation: operation.into(),
            timeout_ms,
        }
    }

    /// Creates a request timeout error.
    #[inline]
    pub fn request_timeout(request_id: RequestId, timeout_ms: u64) -> Self {
        Self::RequestTimeout {
            request_id,
            timeout_ms,
        }
    }

    /// Re-labels a CDP "object not found" error as a stale element.
    ///
    /// Any other error is returned unchanged.
    #[must_use]
    pub fn into_stale_for(self, element_id: &ElementId) -> Self {
        match self {
            Self::Cdp { ref message, .. }
                if STALE_OBJECT_MESSAGES.iter().any(|m| message.contains(m)) =>
            {
                Self::stale_element(element_id.clone())
            }
            other => other,
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this is a timeout error.
    #[inline]
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            Self::ConnectionTimeout { .. } | Self::Timeout { .. } | Self::RequestTimeout { .. }
        )
    }

    /// Returns `true` if this is an element error.
    #[inline]
    #[must_use]
    pub fn is_element_error(&self) -> bool {
        matches!(
            self,
            Self::ElementNotFound { .. }
                | Self::StaleElement { .. }
                | Self::ElementNotInteractable { .. }
        )
    }

    /// Returns `true` if this is a connection error.
    #[inline]
    #[must_use]
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            Self::Connection { .. }
                | Self::ConnectionTimeout { .. }
                | Self::ConnectionClosed
                | Self::WebSocket(_)
        )
    }

    /// Returns `true` if retrying against another element cannot help.
    #[inline]
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::DropdownValueNotFound { .. } | Self::Interaction { .. }
        ) || self.is_connection_error()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::ErrorKind;

    #[test]
    fn test_error_display() {
        let err = Error::connection("failed to connect");
        assert_eq!(err.to_string(), "Connection failed: failed to connect");
    }

    #[test]
    fn test_dropdown_error_display() {
        let err = Error::dropdown_value_not_found("maybe");
        assert_eq!(err.to_string(), "Dropdown has no option with value 'maybe'");
    }

    #[test]
    fn test_interaction_error_keeps_both_causes() {
        let err = Error::interaction(
            "name",
            Error::timeout("visible", 10_000),
            Error::element_not_found("xpath://input"),
        );
        let text = err.to_string();
        assert!(text.contains("'name'"));
        assert!(text.contains("Timeout after 10000ms"));
        assert!(text.contains("xpath://input"));
        assert!(err.is_terminal());
    }

    #[test]
    fn test_is_timeout() {
        let timeout_err = Error::ConnectionTimeout { timeout_ms: 5000 };
        let other_err = Error::connection("test");

        assert!(timeout_err.is_timeout());
        assert!(!other_err.is_timeout());
    }

    #[test]
    fn test_is_element_error() {
        assert!(Error::stale_element(ElementId::new("1.2.3")).is_element_error());
        assert!(Error::element_not_found("id:name").is_element_error());
        assert!(!Error::timeout("visible", 1000).is_element_error());
    }

    #[test]
    fn test_is_connection_error() {
        assert!(Error::connection("test").is_connection_error());
        assert!(Error::ConnectionClosed.is_connection_error());
        assert!(!Error::config("test").is_connection_error());
    }

    #[test]
    fn test_into_stale_for_maps_missing_object() {
        let id = ElementId::new("obj-1");
        let err = Error::cdp(-32000, "Could not find object with given id").into_stale_for(&id);
        assert!(matches!(err, Error::StaleElement { ref element_id } if *element_id == id));

        let other = Error::cdp(-32601, "method not found").into_stale_for(&id);
        assert!(matches!(other, Error::Cdp { code: -32601, .. }));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = IoError::new(ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<String>("invalid").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
