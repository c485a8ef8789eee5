//! Builder pattern for driver configuration.
//!
//! Provides a fluent API for configuring and creating [`Driver`] instances.
//!
//! # Example
//!
//! ```no_run
//! use resilient_webdriver::{ChromeOptions, Driver};
//!
//! # fn example() -> resilient_webdriver::Result<()> {
//! let driver = Driver::builder()
//!     .binary("/usr/bin/google-chrome")
//!     .options(ChromeOptions::automation())
//!     .headless(true)
//!     .build()?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::path::PathBuf;

use crate::error::{Error, Result};

use super::binary::resolve_binary;
use super::core::Driver;
use super::options::{ChromeOptions, Timeouts};

// ============================================================================
// DriverBuilder
// ============================================================================

/// Builder for configuring a [`Driver`] instance.
///
/// Use [`Driver::builder()`] to create a new builder. Options default to
/// [`ChromeOptions::automation()`] and timeouts to [`Timeouts::new()`].
#[derive(Debug, Clone)]
pub struct DriverBuilder {
    /// Explicit path to the Chrome binary.
    binary: Option<PathBuf>,
    /// Launch options.
    options: ChromeOptions,
    /// Session timeouts.
    timeouts: Timeouts,
}

impl Default for DriverBuilder {
    fn default() -> Self {
        Self {
            binary: None,
            options: ChromeOptions::automation(),
            timeouts: Timeouts::new(),
        }
    }
}

// ============================================================================
// DriverBuilder Implementation
// ============================================================================

impl DriverBuilder {
    /// Creates a new driver builder with default configuration.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the path to the Chrome binary executable.
    ///
    /// When unset, the binary is discovered at build time.
    #[inline]
    #[must_use]
    pub fn binary(mut self, path: impl Into<PathBuf>) -> Self {
        self.binary = Some(path.into());
        self
    }

    /// Sets an optional binary path, keeping discovery when `None`.
    #[inline]
    #[must_use]
    pub fn binary_opt(mut self, path: Option<PathBuf>) -> Self {
        self.binary = path;
        self
    }

    /// Replaces the launch options.
    #[inline]
    #[must_use]
    pub fn options(mut self, options: ChromeOptions) -> Self {
        self.options = options;
        self
    }

    /// Enables or disables headless mode.
    #[inline]
    #[must_use]
    pub fn headless(mut self, headless: bool) -> Self {
        self.options.headless = headless;
        self
    }

    /// Replaces the session timeouts.
    #[inline]
    #[must_use]
    pub fn timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Builds the driver with validation.
    ///
    /// # Errors
    ///
    /// - [`Error::ChromeNotFound`] if no Chrome binary can be resolved
    /// - [`Error::Config`] if the options or timeouts are invalid
    pub fn build(self) -> Result<Driver> {
        self.validate_options()?;
        self.validate_timeouts()?;
        let binary = resolve_binary(self.binary.as_deref())?;

        Ok(Driver::new(binary, self.options, self.timeouts))
    }
}

// ============================================================================
// Validation
// ============================================================================

impl DriverBuilder {
    /// Validates the launch options.
    fn validate_options(&self) -> Result<()> {
        self.options.validate().map_err(Error::config)
    }

    /// Validates the timeouts.
    fn validate_timeouts(&self) -> Result<()> {
        let Timeouts {
            implicit_wait,
            page_load,
            script,
        } = self.timeouts;

        if implicit_wait.is_zero() || page_load.is_zero() || script.is_zero() {
            return Err(Error::config(
                "Timeouts must be greater than zero.\n\
                 Example: Timeouts { implicit_wait: Duration::from_secs(10), ..Timeouts::new() }",
            ));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
