//! Chrome driver and session factory.
//!
//! The [`Driver`] holds the resolved binary and launch configuration. Each
//! call to [`Driver::launch`] starts a fresh Chrome process with its own
//! temporary profile and returns a [`Session`] attached to a new page.
//!
//! # Example
//!
//! ```no_run
//! use resilient_webdriver::Driver;
//!
//! # async fn example() -> resilient_webdriver::Result<()> {
//! let driver = Driver::builder().headless(true).build()?;
//!
//! let session = driver.launch().await?;
//! session.goto("https://example.com").await?;
//! session.quit().await?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;

use tokio::process::{Child, Command};
use tracing::{debug, info};

use crate::browser::Session;
use crate::error::{Error, Result};
use crate::transport::{Connection, ENDPOINT_TIMEOUT, discover_ws_url};

use super::assets::START_PAGE;
use super::builder::DriverBuilder;
use super::options::{ChromeOptions, Timeouts};
use super::process::ProcessGuard;
use super::profile::Profile;

// ============================================================================
// Types
// ============================================================================

/// Internal shared state for the driver.
pub(crate) struct DriverInner {
    /// Path to the Chrome binary executable.
    pub binary: PathBuf,

    /// Launch options.
    pub options: ChromeOptions,

    /// Timeouts handed to each session.
    pub timeouts: Timeouts,
}

// ============================================================================
// Driver
// ============================================================================

/// Chrome session factory.
///
/// Cheap to clone; all clones share the same configuration.
#[derive(Clone)]
pub struct Driver {
    /// Shared inner state.
    pub(crate) inner: Arc<DriverInner>,
}

impl fmt::Debug for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Driver")
            .field("binary", &self.inner.binary)
            .field("headless", &self.inner.options.headless)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Driver - Public API
// ============================================================================

impl Driver {
    /// Creates a configuration builder for the driver.
    #[inline]
    #[must_use]
    pub fn builder() -> DriverBuilder {
        DriverBuilder::new()
    }

    /// Returns the resolved Chrome binary.
    #[inline]
    #[must_use]
    pub fn binary(&self) -> &Path {
        &self.inner.binary
    }

    /// Returns the launch options.
    #[inline]
    #[must_use]
    pub fn options(&self) -> &ChromeOptions {
        &self.inner.options
    }

    /// Returns the session timeouts.
    #[inline]
    #[must_use]
    pub fn timeouts(&self) -> Timeouts {
        self.inner.timeouts
    }

    /// Launches Chrome and attaches a session to a new page.
    ///
    /// # Errors
    ///
    /// - [`Error::Profile`] if the user-data directory cannot be created
    /// - [`Error::ProcessLaunchFailed`] if Chrome fails to start
    /// - [`Error::ConnectionTimeout`] if Chrome never announces its endpoint
    /// - [`Error::Connection`] if the DevTools WebSocket cannot be opened
    pub async fn launch(&self) -> Result<Session> {
        let profile = Profile::new_temp()?;

        let mut child = self.spawn_chrome_process(&profile)?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| Error::protocol("Chrome stderr was not captured"))?;

        let process = ProcessGuard::new(child);
        info!(
            pid = process.pid(),
            headless = self.inner.options.headless,
            "Chrome process spawned"
        );

        let ws_url = discover_ws_url(stderr, ENDPOINT_TIMEOUT).await?;
        let connection = Connection::connect(ws_url.as_str()).await?;

        Session::open(connection, process, profile, self.inner.timeouts).await
    }
}

// ============================================================================
// Driver - Internal API
// ============================================================================

impl Driver {
    /// Creates a new driver instance.
    pub(crate) fn new(binary: PathBuf, options: ChromeOptions, timeouts: Timeouts) -> Self {
        debug!(binary = %binary.display(), "Driver configured");

        Self {
            inner: Arc::new(DriverInner {
                binary,
                options,
                timeouts,
            }),
        }
    }

    /// Spawns the Chrome process with the given profile.
    fn spawn_chrome_process(&self, profile: &Profile) -> Result<Child> {
        let mut cmd = Command::new(&self.inner.binary);

        cmd.arg("--remote-debugging-port=0")
            .arg(profile.to_arg())
            .arg("--no-first-run")
            .arg("--no-default-browser-check");

        cmd.args(self.inner.options.to_args());

        cmd.arg(START_PAGE);

        // Endpoint is announced on stderr
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        cmd.spawn().map_err(Error::process_launch_failed)
    }
}

// ============================================================================
// Tests
// ============================================================================
