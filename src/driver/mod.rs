//! Chrome driver module.
//!
//! This module provides the entry point for launching browser sessions.
//!
//! # Components
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Driver`] | Factory for browser sessions |
//! | [`DriverBuilder`] | Fluent configuration builder |
//! | [`ChromeOptions`] | Browser launch options |
//! | [`Timeouts`] | Element wait, page load and script timeouts |
//! | [`Profile`] | Chrome user-data directory |
//!
//! # Example
//!
//! ```no_run
//! use resilient_webdriver::{ChromeOptions, Driver, Result};
//!
//! # async fn example() -> Result<()> {
//! let driver = Driver::builder()
//!     .options(ChromeOptions::from_env())
//!     .build()?;
//!
//! let session = driver.launch().await?;
//! session.goto("https://example.com").await?;
//! session.quit().await?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// Static pages and data URL helpers.
pub mod assets;

/// Chrome binary discovery.
pub mod binary;

/// Fluent builder pattern for driver configuration.
pub mod builder;

/// Core driver implementation.
pub mod core;

/// Chrome options and timeouts.
pub mod options;

/// Browser process ownership.
pub(crate) mod process;

/// Chrome user-data directory management.
pub mod profile;

// ============================================================================
// Re-exports
// ============================================================================

pub use assets::html_data_url;
pub use builder::DriverBuilder;
pub use core::Driver;
pub use options::{ChromeOptions, Timeouts};
pub use profile::Profile;
