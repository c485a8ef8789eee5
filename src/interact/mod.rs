//! Resilient interaction layer.
//!
//! Everything here is written against the [`BrowserSession`] and
//! [`ElementHandle`] traits, not the CDP types directly.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ResilientInteractor`] | Primary attempt plus one fallback attempt |
//! | [`FieldTarget`] | Pre-resolved handle plus fallback locator |
//! | [`WaitPolicy`] | Bounded polling configuration |

// ============================================================================
// Submodules
// ============================================================================

/// Locate → wait → act with fallback.
pub mod interactor;

/// Browser and element capability traits.
pub mod session;

/// Field targets and locator pairs.
pub mod target;

/// Polling waits.
pub mod wait;

// ============================================================================
// Re-exports
// ============================================================================

pub use interactor::{Action, InteractionResult, ResilientInteractor, Stage};
pub use session::{BrowserSession, ElementHandle};
pub use target::{FieldKind, FieldTarget, Locator};
pub use wait::{
    DEFAULT_POLL_INTERVAL, DEFAULT_WAIT_TIMEOUT, Readiness, WaitPolicy, poll_until,
    wait_for_element,
};
