//! Browser entities module.
//!
//! This module provides the CDP-backed browser types:
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Session`] | Page session (owns Chrome process + WebSocket) |
//! | [`Element`] | DOM element reference |
//! | [`By`] | Element locator |
//! | [`Dialog`] | Open native dialog |
//!
//! # Example
//!
//! ```no_run
//! use resilient_webdriver::{By, Driver, Result};
//!
//! # async fn example() -> Result<()> {
//! let driver = Driver::builder().headless(true).build()?;
//! let session = driver.launch().await?;
//!
//! session.goto("https://example.com").await?;
//! let element = session.find_element(&By::tag("h1")).await?;
//! let text = element.text().await?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// Native JavaScript dialogs.
pub mod dialog;

/// DOM element interaction.
pub mod element;

/// Element locator strategies.
pub mod selector;

/// Page session over CDP.
pub mod session;

// ============================================================================
// Re-exports
// ============================================================================

pub use dialog::{Dialog, DialogKind};
pub use element::Element;
pub use selector::By;
pub use session::Session;
