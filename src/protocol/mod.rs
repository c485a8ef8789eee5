//! Chrome DevTools Protocol message types.
//!
//! This module defines the JSON messages exchanged with Chrome over the
//! DevTools WebSocket.
//!
//! # Protocol Overview
//!
//! | Message Type | Direction | Purpose |
//! |--------------|-----------|---------|
//! | `Request` | Client → Browser | Command request |
//! | `Response` | Browser → Client | Command response (carries `id`) |
//! | `Event` | Browser → Client | Notification (carries `method`, no `id`) |
//!
//! Page-level commands carry the `sessionId` of a flattened target session.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `command` | Command definitions by domain |
//! | `event` | Event types |
//! | `request` | Request and Response types |
//! | `runtime` | `Runtime` result shapes |

// ============================================================================
// Submodules
// ============================================================================

/// Command definitions organized by domain.
pub mod command;

/// Event message types.
pub mod event;

/// Request and Response message types.
pub mod request;

/// Runtime result types.
pub mod runtime;

// ============================================================================
// Re-exports
// ============================================================================

pub use command::{
    BrowserCommand, CallArgument, Command, InputCommand, PageCommand, RuntimeCommand,
    TargetCommand,
};
pub use event::{Event, ParsedEvent};
pub use request::{Request, Response, ResponseError};
pub use runtime::{EvaluateResult, ExceptionDetails, GetPropertiesResult, RemoteObject};
