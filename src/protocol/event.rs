//! Event message types.
//!
//! Events are notifications pushed by the browser without a request `id`.
//! Only the events the session reacts to are parsed into typed variants.
//!
//! # Event Types
//!
//! | Domain | Events |
//! |--------|--------|
//! | `Page` | `javascriptDialogOpening`, `javascriptDialogClosed`, `loadEventFired` |
//! | `Target` | `detachedFromTarget` |

// ============================================================================
// Imports
// ============================================================================

use serde::Deserialize;
use serde_json::Value;

use crate::identifiers::CdpSessionId;

// ============================================================================
// Event
// ============================================================================

/// An event notification from the browser.
///
/// # Format
///
/// ```json
/// {
///   "method": "Domain.eventName",
///   "params": { ... },
///   "sessionId": "..."
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Event {
    /// Event name in `Domain.eventName` format.
    pub method: String,

    /// Event-specific data.
    #[serde(default)]
    pub params: Value,

    /// Session that emitted the event, if any.
    #[serde(rename = "sessionId", default)]
    pub session_id: Option<CdpSessionId>,
}

impl Event {
    /// Returns the domain name from the method.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let event = Event { method: "Page.loadEventFired".into(), .. };
    /// assert_eq!(event.domain(), "Page");
    /// ```
    #[inline]
    #[must_use]
    pub fn domain(&self) -> &str {
        self.method.split('.').next().unwrap_or_default()
    }

    /// Returns the event name from the method.
    #[inline]
    #[must_use]
    pub fn event_name(&self) -> &str {
        self.method.split('.').nth(1).unwrap_or_default()
    }

    /// Parses the event into a typed variant.
    #[must_use]
    pub fn parse(&self) -> ParsedEvent {
        match self.method.as_str() {
            "Page.javascriptDialogOpening" => ParsedEvent::DialogOpening {
                message: self.get_string("message"),
                dialog_type: self.get_string("type"),
            },

            "Page.javascriptDialogClosed" => ParsedEvent::DialogClosed {
                accepted: self
                    .params
                    .get("result")
                    .and_then(Value::as_bool)
                    .unwrap_or_default(),
            },

            "Page.loadEventFired" => ParsedEvent::LoadEventFired,

            "Target.detachedFromTarget" => ParsedEvent::DetachedFromTarget {
                session_id: self.get_string("sessionId"),
            },

            _ => ParsedEvent::Unknown {
                method: self.method.clone(),
            },
        }
    }

    /// Gets a string from params.
    #[inline]
    fn get_string(&self, key: &str) -> String {
        self.params
            .get(key)
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string()
    }
}

// ============================================================================
// ParsedEvent
// ============================================================================

/// Parsed event types for type-safe handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedEvent {
    /// A native `alert`/`confirm`/`prompt` dialog opened.
    DialogOpening {
        /// Dialog text.
        message: String,
        /// `alert`, `confirm`, `prompt` or `beforeunload`.
        dialog_type: String,
    },

    /// The open dialog was closed.
    DialogClosed {
        /// Whether the dialog was accepted.
        accepted: bool,
    },

    /// The page's `load` event fired.
    LoadEventFired,

    /// A session was detached from its target.
    DetachedFromTarget {
        /// The detached session.
        session_id: String,
    },

    /// Event the session does not react to.
    Unknown {
        /// Event method.
        method: String,
    },
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialog_opening_parsing() {
        let json_str = r#"{
            "method": "Page.javascriptDialogOpening",
            "params": {
                "url": "https://example.com/form-fields/",
                "message": "Message received!",
                "type": "alert",
                "hasBrowserHandler": false
            },
            "sessionId": "S1"
        }"#;

        let event: Event = serde_json::from_str(json_str).expect("parse event");
        assert_eq!(event.domain(), "Page");
        assert_eq!(event.event_name(), "javascriptDialogOpening");
        assert_eq!(event.session_id, Some(CdpSessionId::new("S1")));

        assert_eq!(
            event.parse(),
            ParsedEvent::DialogOpening {
                message: "Message received!".to_string(),
                dialog_type: "alert".to_string(),
            }
        );
    }

    #[test]
    fn test_dialog_closed_parsing() {
        let json_str = r#"{"method": "Page.javascriptDialogClosed", "params": {"result": true, "userInput": ""}}"#;

        let event: Event = serde_json::from_str(json_str).expect("parse event");
        assert_eq!(event.parse(), ParsedEvent::DialogClosed { accepted: true });
    }

    #[test]
    fn test_event_without_params() {
        let json_str = r#"{"method": "Page.loadEventFired"}"#;

        let event: Event = serde_json::from_str(json_str).expect("parse event");
        assert_eq!(event.parse(), ParsedEvent::LoadEventFired);
    }

    #[test]
    fn test_unknown_event() {
        let json_str = r#"{"method": "Network.requestWillBeSent", "params": {"foo": "bar"}}"#;

        let event: Event = serde_json::from_str(json_str).expect("parse event");
        match event.parse() {
            ParsedEvent::Unknown { method } => assert_eq!(method, "Network.requestWillBeSent"),
            other => panic!("expected Unknown variant, got {other:?}"),
        }
    }
}
