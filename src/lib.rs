//! Resilient WebDriver - form automation over the Chrome DevTools Protocol.
//!
//! This library launches Chrome, attaches to a page over CDP and fills web
//! forms through an interaction layer that survives broken or stale
//! element handles.
//!
//! # Architecture
//!
//! - **Transport**: WebSocket connection with request/response correlation
//!   and an event loop task
//! - **Session**: one Chrome process + one page target, exposed through the
//!   [`BrowserSession`] and [`ElementHandle`] traits
//! - **Interaction**: every field is a [`FieldTarget`] (pre-resolved handle
//!   plus independent fallback locator); [`ResilientInteractor`] runs
//!   locate → wait → act and retries exactly once with the fallback
//!
//! # Quick Start
//!
//! ```no_run
//! use resilient_webdriver::{Driver, FormFieldsPage, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let driver = Driver::builder().headless(true).build()?;
//!     let session = driver.launch().await?;
//!
//!     session.goto("https://practice-automation.com/form-fields/").await?;
//!
//!     let page = FormFieldsPage::new(&session).await;
//!     let summary = page.tools_summary().await;
//!
//!     page.enter_name("Anna").await?
//!         .select_drinks(["milk", "coffee"]).await?
//!         .enter_message(&summary).await?
//!         .click_submit().await?;
//!
//!     println!("{}", page.alert_text().await);
//!     session.quit().await
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`alert`] | Native alert capture |
//! | [`browser`] | CDP-backed [`Session`] and [`Element`] |
//! | [`config`] | Run configuration from the environment |
//! | [`driver`] | Chrome discovery, options and launch |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`identifiers`] | Type-safe ID wrappers |
//! | [`interact`] | Resilient interaction layer |
//! | [`pages`] | Page objects |
//! | [`protocol`] | CDP message types (internal) |
//! | [`summary`] | List summaries |
//! | [`transport`] | WebSocket transport layer (internal) |

// ============================================================================
// Modules
// ============================================================================

/// Native alert capture.
pub mod alert;

/// Browser entities: Session, Element, By.
///
/// - [`Session`] - Page session (owns Chrome process + connection)
/// - [`Element`] - DOM element reference
pub mod browser;

/// Run configuration read from the environment.
pub mod config;

/// Driver factory and configuration.
///
/// Use [`Driver::builder()`] to create a configured driver instance.
pub mod driver;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Type-safe identifiers for CDP entities.
pub mod identifiers;

/// Locate → wait → act with a one-shot fallback.
pub mod interact;

/// Page objects.
pub mod pages;

/// CDP message types.
///
/// Internal module defining command/response/event structures.
pub mod protocol;

/// List summaries.
pub mod summary;

/// WebSocket transport layer.
///
/// Internal module handling the DevTools connection.
pub mod transport;

#[cfg(test)]
mod testing;

// ============================================================================
// Re-exports
// ============================================================================

// Alert types
pub use alert::{AlertGate, AlertOutcome};

// Browser types
pub use browser::{By, Dialog, DialogKind, Element, Session};

// Config types
pub use config::RunConfig;

// Driver types
pub use driver::{ChromeOptions, Driver, DriverBuilder, Profile, Timeouts, html_data_url};

// Error types
pub use error::{Error, Result};

// Identifier types
pub use identifiers::{CdpSessionId, ElementId, RequestId, TargetId};

// Interaction types
pub use interact::{
    Action, BrowserSession, ElementHandle, FieldKind, FieldTarget, Locator, Readiness,
    ResilientInteractor, WaitPolicy,
};

// Page objects
pub use pages::FormFieldsPage;

// Summary
pub use summary::{ToolsSummaryReader, summarize};
