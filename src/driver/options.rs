//! Chrome command-line options and timeouts.
//!
//! Provides a type-safe interface for configuring the Chrome process, such
//! as headless mode, window size and sandboxing flags.
//!
//! # Example
//!
//! ```ignore
//! use resilient_webdriver::ChromeOptions;
//!
//! let options = ChromeOptions::automation().with_headless();
//!
//! let args = options.to_args();
//! // ["--headless=new", "--start-maximized", "--disable-notifications", ...]
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::env;
use std::time::Duration;

// ============================================================================
// ChromeOptions
// ============================================================================

/// Chrome process configuration options.
///
/// Controls how Chrome is launched. Debugging port and user-data directory
/// are always managed by the driver and must not be passed here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChromeOptions {
    /// Run Chrome without a GUI (`--headless=new`).
    pub headless: bool,

    /// Start with a maximized window.
    pub start_maximized: bool,

    /// Window dimensions in pixels (width, height).
    pub window_size: Option<(u32, u32)>,

    /// Block web notification prompts.
    pub disable_notifications: bool,

    /// Disable the sandbox (required in most containers).
    pub no_sandbox: bool,

    /// Write shared memory files to `/tmp` instead of `/dev/shm`.
    pub disable_dev_shm_usage: bool,

    /// Disable GPU hardware acceleration.
    pub disable_gpu: bool,

    /// Value of `--remote-allow-origins`.
    pub remote_allow_origins: Option<String>,

    /// Additional custom command-line arguments.
    pub extra_args: Vec<String>,
}

// ============================================================================
// Constructors
// ============================================================================

impl ChromeOptions {
    /// Creates a new options instance with every flag off.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            headless: false,
            start_maximized: false,
            window_size: None,
            disable_notifications: false,
            no_sandbox: false,
            disable_dev_shm_usage: false,
            disable_gpu: false,
            remote_allow_origins: None,
            extra_args: Vec::new(),
        }
    }

    /// Creates the flag set used for form automation runs.
    ///
    /// Maximized 1920x1080 window, notifications off, sandbox and
    /// `/dev/shm` off, GPU off, any remote origin allowed.
    #[must_use]
    pub fn automation() -> Self {
        Self {
            headless: false,
            start_maximized: true,
            window_size: Some((1920, 1080)),
            disable_notifications: true,
            no_sandbox: true,
            disable_dev_shm_usage: true,
            disable_gpu: true,
            remote_allow_origins: Some("*".to_string()),
            extra_args: Vec::new(),
        }
    }

    /// Creates the automation flag set with headless mode taken from the
    /// environment.
    ///
    /// `HEADLESS=true` enables headless mode; a set `CI` variable forces it.
    #[must_use]
    pub fn from_env() -> Self {
        let mut options = Self::automation();
        options.headless = headless_from_env();
        options
    }
}

/// Reads headless mode from `HEADLESS` and `CI`.
#[must_use]
pub(crate) fn headless_from_env() -> bool {
    let flag = |name: &str| {
        env::var(name)
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false)
    };
    flag("HEADLESS") || env::var_os("CI").is_some()
}

// ============================================================================
// Builder Methods
// ============================================================================

impl ChromeOptions {
    /// Enables headless mode.
    #[inline]
    #[must_use]
    pub fn with_headless(mut self) -> Self {
        self.headless = true;
        self
    }

    /// Sets window size in pixels.
    #[inline]
    #[must_use]
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = Some((width, height));
        self
    }

    /// Disables the Chrome sandbox.
    #[inline]
    #[must_use]
    pub fn with_no_sandbox(mut self) -> Self {
        self.no_sandbox = true;
        self
    }

    /// Adds a custom command-line argument.
    #[inline]
    #[must_use]
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.extra_args.push(arg.into());
        self
    }

    /// Adds multiple custom command-line arguments.
    #[inline]
    #[must_use]
    pub fn with_args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.extra_args.extend(args.into_iter().map(Into::into));
        self
    }
}

// ============================================================================
// Conversion Methods
// ============================================================================

impl ChromeOptions {
    /// Converts options to Chrome command-line arguments.
    #[must_use]
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(8 + self.extra_args.len());

        if self.headless {
            args.push("--headless=new".to_string());
        }

        if self.start_maximized {
            args.push("--start-maximized".to_string());
        }

        if self.disable_notifications {
            args.push("--disable-notifications".to_string());
        }

        if self.no_sandbox {
            args.push("--no-sandbox".to_string());
        }

        if self.disable_dev_shm_usage {
            args.push("--disable-dev-shm-usage".to_string());
        }

        if let Some(ref origins) = self.remote_allow_origins {
            args.push(format!("--remote-allow-origins={origins}"));
        }

        if self.disable_gpu {
            args.push("--disable-gpu".to_string());
        }

        if let Some((width, height)) = self.window_size {
            args.push(format!("--window-size={width},{height}"));
        }

        args.extend(self.extra_args.clone());
        args
    }

    /// Validates the options configuration.
    ///
    /// # Errors
    ///
    /// Returns error message if validation fails.
    pub fn validate(&self) -> Result<(), String> {
        if let Some((width, height)) = self.window_size
            && (width == 0 || height == 0)
        {
            return Err("Window dimensions must be greater than zero".to_string());
        }

        if let Some(arg) = self.extra_args.iter().find(|arg| {
            arg.starts_with("--remote-debugging-port") || arg.starts_with("--user-data-dir")
        }) {
            return Err(format!("{arg} is managed by the driver"));
        }

        Ok(())
    }

    /// Returns `true` if headless mode is enabled.
    #[inline]
    #[must_use]
    pub const fn is_headless(&self) -> bool {
        self.headless
    }
}

// ============================================================================
// Timeouts
// ============================================================================

/// Session timeouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    /// Default element wait.
    pub implicit_wait: Duration,
    /// Maximum time for a page to reach `readyState == "complete"`.
    pub page_load: Duration,
    /// Per-command and script timeout.
    pub script: Duration,
}

impl Timeouts {
    /// Creates the default timeouts (10s element wait, 30s page load and script).
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            implicit_wait: Duration::from_secs(10),
            page_load: Duration::from_secs(30),
            script: Duration::from_secs(30),
        }
    }
}

impl Default for Timeouts {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
