//! Native alert capture.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::interact::{BrowserSession, DEFAULT_POLL_INTERVAL, WaitPolicy, poll_until};

// ============================================================================
// AlertOutcome
// ============================================================================

/// Result of waiting for an alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertOutcome {
    /// An alert appeared and was accepted; carries its text.
    Received(String),
    /// No alert appeared in time.
    NotFound,
}

impl AlertOutcome {
    /// Returns the alert text, if one was received.
    #[inline]
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Received(text) => Some(text),
            Self::NotFound => None,
        }
    }

    /// Returns `true` if an alert was received.
    #[inline]
    #[must_use]
    pub fn is_received(&self) -> bool {
        matches!(self, Self::Received(_))
    }
}

impl fmt::Display for AlertOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Received(text) => f.write_str(text),
            Self::NotFound => f.write_str("Alert not found"),
        }
    }
}

// ============================================================================
// AlertGate
// ============================================================================

/// Waits for a native alert, reads it and accepts it.
#[derive(Debug)]
pub struct AlertGate<'s, S> {
    session: &'s S,
    poll_interval: Duration,
}

impl<'s, S: BrowserSession> AlertGate<'s, S> {
    /// Creates a gate polling every 100ms.
    pub fn new(session: &'s S) -> Self {
        Self {
            session,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Sets the poll interval.
    #[must_use]
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Waits up to `timeout` for an alert.
    ///
    /// Absence is an expected outcome, so every failure collapses into
    /// [`AlertOutcome::NotFound`].
    pub async fn read_and_dismiss(&self, timeout: Duration) -> AlertOutcome {
        match self.try_read_and_dismiss(timeout).await {
            Ok(text) => {
                info!(text = %text, "Alert accepted");
                AlertOutcome::Received(text)
            }
            Err(e) if e.is_timeout() => {
                debug!(timeout_ms = timeout.as_millis() as u64, "No alert appeared");
                AlertOutcome::NotFound
            }
            Err(e) => {
                warn!(error = %e, "Alert could not be handled");
                AlertOutcome::NotFound
            }
        }
    }

    async fn try_read_and_dismiss(&self, timeout: Duration) -> Result<String> {
        let policy = WaitPolicy::new()
            .with_timeout(timeout)
            .with_poll_interval(self.poll_interval);
        let session = self.session;

        let text = poll_until(&policy, "alert to be present", move || session.pending_alert()).await?;
        session.accept_alert().await?;

        Ok(text)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::browser::By;
    use crate::interact::ElementHandle;
    use crate::testing::{MockSession, Node};

    const SHORT: Duration = Duration::from_millis(100);

    #[test]
    fn test_outcome_display() {
        assert_eq!(AlertOutcome::NotFound.to_string(), "Alert not found");
        assert_eq!(
            AlertOutcome::Received("Message received!".into()).to_string(),
            "Message received!"
        );
    }

    #[test]
    fn test_outcome_text() {
        assert_eq!(AlertOutcome::Received("x".into()).text(), Some("x"));
        assert_eq!(AlertOutcome::NotFound.text(), None);
        assert!(!AlertOutcome::NotFound.is_received());
    }

    #[tokio::test]
    async fn test_no_alert_is_not_found() {
        let session = MockSession::new();

        let outcome = AlertGate::new(&session)
            .with_poll_interval(Duration::from_millis(10))
            .read_and_dismiss(SHORT)
            .await;

        assert_eq!(outcome, AlertOutcome::NotFound);
    }

    #[tokio::test]
    async fn test_alert_is_read_and_accepted() {
        let session = MockSession::new();
        let node = session.add(
            Node::button()
                .matching([By::css("button")])
                .on_click_alert("Message received!"),
        );
        session.handle(node).script_click().await.expect("click");

        let outcome = AlertGate::new(&session)
            .with_poll_interval(Duration::from_millis(10))
            .read_and_dismiss(SHORT)
            .await;

        assert_eq!(outcome, AlertOutcome::Received("Message received!".into()));
        assert_eq!(session.pending_alert().await.expect("query"), None);
    }
}
