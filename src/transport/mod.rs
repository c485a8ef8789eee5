//! WebSocket transport layer.
//!
//! This module handles communication with Chrome's DevTools endpoint.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐                              ┌─────────────────┐
//! │  Session (Rust) │                              │  Chrome         │
//! │                 │         WebSocket            │                 │
//! │  Connection     │─────────────────────────────►│  DevTools       │
//! │  (client)       │  ws://127.0.0.1:PORT/...     │  endpoint       │
//! │                 │                              │                 │
//! └─────────────────┘                              └─────────────────┘
//! ```
//!
//! # Connection Lifecycle
//!
//! 1. Launch Chrome with `--remote-debugging-port=0`
//! 2. `discover_ws_url` - Read the endpoint from Chrome's stderr
//! 3. `Connection::connect` - Open the WebSocket, spawn the event loop
//! 4. `Connection::send` - Send commands, receive responses/events
//! 5. `Connection::shutdown` - Close connection on quit
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `connection` | WebSocket connection and event loop |
//! | `endpoint` | DevTools endpoint discovery |

// ============================================================================
// Submodules
// ============================================================================

/// WebSocket connection and event loop.
pub mod connection;

/// DevTools endpoint discovery from browser stderr.
pub mod endpoint;

// ============================================================================
// Re-exports
// ============================================================================

pub use connection::{Connection, DEFAULT_COMMAND_TIMEOUT, EventHandler};
pub use endpoint::{ENDPOINT_TIMEOUT, discover_ws_url, parse_devtools_line};
