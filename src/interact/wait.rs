//! Bounded polling waits.
//!
//! Waits poll on the calling task: probe, sleep `poll_interval`, probe
//! again, until the condition holds or `timeout` elapses.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::future::Future;
use std::time::Duration;

use tokio::time::{Instant, sleep, timeout_at};
use tracing::trace;

use crate::driver::Timeouts;
use crate::error::{Error, Result};

use super::session::ElementHandle;

// ============================================================================
// Constants
// ============================================================================

/// Default wait timeout.
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default interval between probes.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

// ============================================================================
// WaitPolicy
// ============================================================================

/// How long to wait for a condition and how often to check it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    /// Maximum time to wait.
    pub timeout: Duration,
    /// Interval between probes.
    pub poll_interval: Duration,
}

impl WaitPolicy {
    /// Creates the default policy (10s timeout, 100ms poll).
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            timeout: DEFAULT_WAIT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Creates a policy using the session's element wait.
    #[inline]
    #[must_use]
    pub const fn from_timeouts(timeouts: &Timeouts) -> Self {
        Self::new().with_timeout(timeouts.implicit_wait)
    }

    /// Sets the timeout.
    #[inline]
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the poll interval.
    #[inline]
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Readiness
// ============================================================================

/// Condition an element must meet before it is acted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    /// Attached to the document.
    Present,
    /// Attached and displayed.
    Visible,
    /// Displayed and enabled.
    Clickable,
}

impl fmt::Display for Readiness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Present => "present",
            Self::Visible => "visible",
            Self::Clickable => "clickable",
        };
        f.write_str(name)
    }
}

// ============================================================================
// Polling
// ============================================================================

/// Polls `probe` until it yields `Some`.
///
/// `Ok(None)`, [`Error::ElementNotFound`] and
/// [`Error::ElementNotInteractable`] mean "not yet"; any other error ends
/// the wait immediately.
///
/// # Errors
///
/// Returns [`Error::Timeout`] naming `what` if the deadline passes, even
/// while a probe is still running.
pub async fn poll_until<T, F, Fut>(policy: &WaitPolicy, what: &str, mut probe: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>>>,
{
    let deadline = Instant::now() + policy.timeout;
    let expired = || {
        Error::timeout(
            format!("waiting for {what}"),
            policy.timeout.as_millis() as u64,
        )
    };

    loop {
        let Ok(outcome) = timeout_at(deadline, probe()).await else {
            return Err(expired());
        };

        match outcome {
            Ok(Some(value)) => return Ok(value),
            Ok(None) => {}
            Err(
                e @ (Error::ElementNotFound { .. } | Error::ElementNotInteractable { .. }),
            ) => {
                trace!(error = %e, what, "Not ready yet");
            }
            Err(e) => return Err(e),
        }

        if Instant::now() >= deadline {
            return Err(expired());
        }

        sleep(policy.poll_interval).await;
    }
}

/// Waits until `element` satisfies `readiness`.
///
/// # Errors
///
/// - [`Error::StaleElement`] as soon as the element leaves the document
/// - [`Error::Timeout`] if the condition is not met in time
pub async fn wait_for_element<E: ElementHandle>(
    element: &E,
    readiness: Readiness,
    policy: &WaitPolicy,
) -> Result<()> {
    let what = format!("element {} to be {readiness}", element.id());

    poll_until(policy, &what, || async move {
        if !element.is_connected().await? {
            return Err(Error::stale_element(element.id().clone()));
        }

        let ready = match readiness {
            Readiness::Present => true,
            Readiness::Visible => element.is_displayed().await?,
            Readiness::Clickable => element.is_displayed().await? && element.is_enabled().await?,
        };

        Ok::<_, Error>(ready.then_some(()))
    })
    .await
}

// ============================================================================
// Tests
// ============================================================================
