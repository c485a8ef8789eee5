//! Command definitions organized by CDP domain.
//!
//! Commands follow the `Domain.method` format of the DevTools Protocol.
//!
//! # Command Domains
//!
//! | Domain | Commands |
//! |--------|----------|
//! | `Target` | Page creation, session attachment |
//! | `Browser` | Shutdown |
//! | `Page` | Navigation, JavaScript dialogs |
//! | `Runtime` | Script evaluation, remote objects |
//! | `Input` | Text insertion |

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::identifiers::{ElementId, TargetId};

// ============================================================================
// Command Wrapper
// ============================================================================

/// All protocol commands organized by domain.
///
/// This enum wraps domain-specific command enums for unified serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Command {
    /// Target domain commands.
    Target(TargetCommand),
    /// Browser domain commands.
    Browser(BrowserCommand),
    /// Page domain commands.
    Page(PageCommand),
    /// Runtime domain commands.
    Runtime(RuntimeCommand),
    /// Input domain commands.
    Input(InputCommand),
}

impl Command {
    /// Returns the `Domain.method` name of the command.
    #[must_use]
    pub fn method(&self) -> &'static str {
        match self {
            Self::Target(TargetCommand::CreateTarget { .. }) => "Target.createTarget",
            Self::Target(TargetCommand::AttachToTarget { .. }) => "Target.attachToTarget",
            Self::Target(TargetCommand::CloseTarget { .. }) => "Target.closeTarget",
            Self::Browser(BrowserCommand::Close) => "Browser.close",
            Self::Page(PageCommand::Enable) => "Page.enable",
            Self::Page(PageCommand::Navigate { .. }) => "Page.navigate",
            Self::Page(PageCommand::HandleJavaScriptDialog { .. }) => "Page.handleJavaScriptDialog",
            Self::Runtime(RuntimeCommand::Enable) => "Runtime.enable",
            Self::Runtime(RuntimeCommand::Evaluate { .. }) => "Runtime.evaluate",
            Self::Runtime(RuntimeCommand::CallFunctionOn { .. }) => "Runtime.callFunctionOn",
            Self::Runtime(RuntimeCommand::GetProperties { .. }) => "Runtime.getProperties",
            Self::Runtime(RuntimeCommand::ReleaseObject { .. }) => "Runtime.releaseObject",
            Self::Runtime(RuntimeCommand::ReleaseObjectGroup { .. }) => "Runtime.releaseObjectGroup",
            Self::Input(InputCommand::InsertText { .. }) => "Input.insertText",
        }
    }
}

// ============================================================================
// Target Commands
// ============================================================================

/// Target domain commands for page and session management.
///
/// Sent on the browser-level connection (no session ID).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "method", content = "params", rename_all_fields = "camelCase")]
pub enum TargetCommand {
    /// Open a new page target.
    #[serde(rename = "Target.createTarget")]
    CreateTarget {
        /// Initial URL.
        url: String,
    },

    /// Attach a session to a target.
    #[serde(rename = "Target.attachToTarget")]
    AttachToTarget {
        /// Target to attach to.
        target_id: TargetId,
        /// Multiplex the session over the browser connection.
        flatten: bool,
    },

    /// Close a target.
    #[serde(rename = "Target.closeTarget")]
    CloseTarget {
        /// Target to close.
        target_id: TargetId,
    },
}

// ============================================================================
// Browser Commands
// ============================================================================

/// Browser domain commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "method", content = "params")]
pub enum BrowserCommand {
    /// Close the browser gracefully.
    #[serde(rename = "Browser.close")]
    Close,
}

// ============================================================================
// Page Commands
// ============================================================================

/// Page domain commands for navigation and dialogs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "method", content = "params", rename_all_fields = "camelCase")]
pub enum PageCommand {
    /// Enable page events (required for dialog notifications).
    #[serde(rename = "Page.enable")]
    Enable,

    /// Navigate to URL.
    #[serde(rename = "Page.navigate")]
    Navigate {
        /// URL to navigate to.
        url: String,
    },

    /// Accept or dismiss the open JavaScript dialog.
    #[serde(rename = "Page.handleJavaScriptDialog")]
    HandleJavaScriptDialog {
        /// Accept (`true`) or dismiss (`false`).
        accept: bool,
        /// Text for a prompt dialog.
        #[serde(skip_serializing_if = "Option::is_none")]
        prompt_text: Option<String>,
    },
}

// ============================================================================
// Runtime Commands
// ============================================================================

/// Runtime domain commands for JavaScript execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "method", content = "params", rename_all_fields = "camelCase")]
pub enum RuntimeCommand {
    /// Enable runtime events.
    #[serde(rename = "Runtime.enable")]
    Enable,

    /// Evaluate an expression in the page's main world.
    #[serde(rename = "Runtime.evaluate")]
    Evaluate {
        /// JavaScript expression.
        expression: String,
        /// Return the result serialized by value.
        return_by_value: bool,
        /// Await the result if it is a promise.
        await_promise: bool,
        /// Group that owns the returned handles.
        #[serde(skip_serializing_if = "Option::is_none", default)]
        object_group: Option<String>,
    },

    /// Call a function with `this` bound to a remote object.
    #[serde(rename = "Runtime.callFunctionOn")]
    CallFunctionOn {
        /// Function source, e.g. `function() { return this.value; }`.
        function_declaration: String,
        /// Remote object bound to `this`.
        object_id: ElementId,
        /// Call arguments.
        #[serde(skip_serializing_if = "Vec::is_empty", default)]
        arguments: Vec<CallArgument>,
        /// Return the result serialized by value.
        return_by_value: bool,
        /// Await the result if it is a promise.
        await_promise: bool,
    },

    /// List properties of a remote object.
    #[serde(rename = "Runtime.getProperties")]
    GetProperties {
        /// Object to inspect.
        object_id: ElementId,
        /// Skip the prototype chain.
        own_properties: bool,
    },

    /// Release a remote object handle.
    #[serde(rename = "Runtime.releaseObject")]
    ReleaseObject {
        /// Object to release.
        object_id: ElementId,
    },

    /// Release every handle in an object group.
    #[serde(rename = "Runtime.releaseObjectGroup")]
    ReleaseObjectGroup {
        /// Group to release.
        object_group: String,
    },
}

/// A by-value argument to `Runtime.callFunctionOn`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallArgument {
    /// JSON value of the argument.
    pub value: Value,
}

impl CallArgument {
    /// Wraps a JSON value.
    #[inline]
    #[must_use]
    pub fn value(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

// ============================================================================
// Input Commands
// ============================================================================

/// Input domain commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "method", content = "params")]
pub enum InputCommand {
    /// Insert text into the focused element as if typed.
    #[serde(rename = "Input.insertText")]
    InsertText {
        /// Text to insert.
        text: String,
    },
}

// ============================================================================
// Tests
// ============================================================================
