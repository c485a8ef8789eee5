//! Native JavaScript dialogs.
//!
//! Chrome reports `alert`/`confirm`/`prompt` dialogs through
//! `Page.javascriptDialogOpening`. The session keeps the open dialog, if
//! any, in a watch channel so waiters can react without polling the page.

use std::fmt;

// ============================================================================
// DialogKind
// ============================================================================

/// Kind of native dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    /// `window.alert`
    Alert,
    /// `window.confirm`
    Confirm,
    /// `window.prompt`
    Prompt,
    /// `beforeunload` confirmation.
    BeforeUnload,
}

impl DialogKind {
    /// Parses the CDP `type` field. Unknown values are treated as alerts.
    #[must_use]
    pub fn from_cdp(value: &str) -> Self {
        match value {
            "confirm" => Self::Confirm,
            "prompt" => Self::Prompt,
            "beforeunload" => Self::BeforeUnload,
            _ => Self::Alert,
        }
    }
}

impl fmt::Display for DialogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Alert => "alert",
            Self::Confirm => "confirm",
            Self::Prompt => "prompt",
            Self::BeforeUnload => "beforeunload",
        };
        f.write_str(name)
    }
}

// ============================================================================
// Dialog
// ============================================================================

/// An open native dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    /// Text shown in the dialog.
    pub message: String,
    /// Dialog kind.
    pub kind: DialogKind,
}

impl Dialog {
    /// Creates a dialog from CDP event fields.
    #[must_use]
    pub fn new(message: impl Into<String>, kind: &str) -> Self {
        Self {
            message: message.into(),
            kind: DialogKind::from_cdp(kind),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_cdp() {
        assert_eq!(DialogKind::from_cdp("alert"), DialogKind::Alert);
        assert_eq!(DialogKind::from_cdp("confirm"), DialogKind::Confirm);
        assert_eq!(DialogKind::from_cdp("prompt"), DialogKind::Prompt);
        assert_eq!(DialogKind::from_cdp("beforeunload"), DialogKind::BeforeUnload);
        assert_eq!(DialogKind::from_cdp("something-new"), DialogKind::Alert);
    }

    #[test]
    fn test_dialog_new() {
        let dialog = Dialog::new("Message received!", "alert");
        assert_eq!(dialog.message, "Message received!");
        assert_eq!(dialog.kind.to_string(), "alert");
    }
}
