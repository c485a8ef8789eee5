//! Run configuration read from the environment.
//!
//! | Variable | Effect |
//! |----------|--------|
//! | `HEADLESS` | `1`/`true`/`yes` runs Chrome headless |
//! | `CI` | Any value forces headless |
//! | `CHROME_BINARY` | Chrome executable to launch |
//! | `FORM_URL` | Form page to open |

// ============================================================================
// Imports
// ============================================================================

use std::env;
use std::path::PathBuf;

use url::Url;

use crate::driver::binary::CHROME_BINARY_ENV;
use crate::driver::options::headless_from_env;
use crate::driver::{ChromeOptions, DriverBuilder, Timeouts};
use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Page opened when `FORM_URL` is unset.
pub const DEFAULT_FORM_URL: &str = "https://practice-automation.com/form-fields/";

/// Environment variable overriding the form page.
pub const FORM_URL_ENV: &str = "FORM_URL";

// ============================================================================
// RunConfig
// ============================================================================

/// Settings for one form run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Form page to open.
    pub form_url: Url,
    /// Run Chrome without a window.
    pub headless: bool,
    /// Chrome executable; discovered when `None`.
    pub binary: Option<PathBuf>,
    /// Session timeouts.
    pub timeouts: Timeouts,
}

impl RunConfig {
    /// Creates a config for `form_url` with a visible browser.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `form_url` does not parse.
    pub fn new(form_url: &str) -> Result<Self> {
        Ok(Self {
            form_url: parse_url(form_url)?,
            headless: false,
            binary: None,
            timeouts: Timeouts::default(),
        })
    }

    /// Reads the config from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `FORM_URL` is set but not a valid URL.
    pub fn from_env() -> Result<Self> {
        let form_url = env::var(FORM_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FORM_URL.to_string());

        let mut config = Self::new(form_url.trim())?;
        config.headless = headless_from_env();
        config.binary = env::var_os(CHROME_BINARY_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        Ok(config)
    }

    /// Forces headless mode on top of the environment.
    #[must_use]
    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = self.headless || headless;
        self
    }

    /// Returns a driver builder using these settings.
    #[must_use]
    pub fn driver_builder(&self) -> DriverBuilder {
        DriverBuilder::new()
            .binary_opt(self.binary.clone())
            .options(ChromeOptions::automation())
            .headless(self.headless)
            .timeouts(self.timeouts)
    }
}

fn parse_url(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| Error::config(format!("invalid form URL '{raw}': {e}")))
}

// ============================================================================
// Tests
// ============================================================================
