//! Resilient element interaction.
//!
//! Each action runs locate → wait → act against the target's primary
//! handle. On failure, the fallback locator is resolved against the live
//! document and the action runs once more on the fresh element.
//!
//! # Example
//!
//! ```ignore
//! let interactor = ResilientInteractor::new(&session);
//! let email = FieldTarget::resolve(
//!     &session,
//!     "email",
//!     FieldKind::TextInput,
//!     By::id("email").with_fallback(By::xpath("//input[@type='email']")),
//! )
//! .await;
//!
//! interactor.perform(&email, &Action::type_text("someone@example.com")).await?;
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use tracing::{debug, info, warn};

use crate::error::{Error, Result};

use super::session::{BrowserSession, ElementHandle};
use super::target::FieldTarget;
use super::wait::{Readiness, WaitPolicy, poll_until, wait_for_element};

// ============================================================================
// Action
// ============================================================================

/// What to do with a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Scroll into view, then click through script.
    Click,
    /// Like [`Action::Click`], but skipped when the control is already checked.
    Check,
    /// Clear, then type the payload.
    TypeText(String),
    /// Select the `<option>` whose value is the lower-cased payload.
    SelectByValue(String),
}

impl Action {
    /// Creates a [`Action::TypeText`].
    pub fn type_text(text: impl Into<String>) -> Self {
        Self::TypeText(text.into())
    }

    /// Creates a [`Action::SelectByValue`].
    pub fn select_by_value(value: impl Into<String>) -> Self {
        Self::SelectByValue(value.into())
    }

    /// Readiness the element must reach before the action runs.
    #[must_use]
    pub fn readiness(&self) -> Readiness {
        match self {
            Self::TypeText(_) => Readiness::Visible,
            Self::Click | Self::Check | Self::SelectByValue(_) => Readiness::Clickable,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Click => f.write_str("click"),
            Self::Check => f.write_str("check"),
            Self::TypeText(_) => f.write_str("type"),
            Self::SelectByValue(value) => write!(f, "select '{value}'"),
        }
    }
}

// ============================================================================
// InteractionResult
// ============================================================================

/// Stage at which an attempt failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// The element could not be resolved.
    Locate,
    /// The element never became ready.
    Wait,
    /// The action itself failed.
    Act,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Locate => "locate",
            Self::Wait => "wait",
            Self::Act => "act",
        };
        f.write_str(name)
    }
}

/// Outcome of a single attempt against one element.
#[derive(Debug)]
pub enum InteractionResult {
    /// The action ran.
    Completed,
    /// The attempt failed at `stage`.
    Failed {
        /// Where the attempt stopped.
        stage: Stage,
        /// Cause of the failure.
        error: Error,
    },
}

impl InteractionResult {
    fn failed(stage: Stage, error: Error) -> Self {
        Self::Failed { stage, error }
    }
}

// ============================================================================
// ResilientInteractor
// ============================================================================

/// Performs actions on field targets with a one-shot fallback.
#[derive(Debug)]
pub struct ResilientInteractor<'s, S> {
    session: &'s S,
    policy: WaitPolicy,
}

impl<'s, S: BrowserSession> ResilientInteractor<'s, S> {
    /// Creates an interactor with the default [`WaitPolicy`].
    #[must_use]
    pub fn new(session: &'s S) -> Self {
        Self {
            session,
            policy: WaitPolicy::default(),
        }
    }

    /// Replaces the wait policy.
    #[must_use]
    pub fn with_policy(mut self, policy: WaitPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the wait policy.
    #[inline]
    #[must_use]
    pub fn policy(&self) -> &WaitPolicy {
        &self.policy
    }

    /// Returns the session.
    #[inline]
    #[must_use]
    pub fn session(&self) -> &'s S {
        self.session
    }

    /// Performs `action` on `target`.
    ///
    /// # Errors
    ///
    /// - [`Error::DropdownValueNotFound`] as soon as either attempt hits it
    /// - Connection errors from either attempt, unchanged
    /// - [`Error::Interaction`] when both attempts fail, carrying both causes
    pub async fn perform(&self, target: &FieldTarget<S::Element>, action: &Action) -> Result<()> {
        let field = target.name();

        let primary = match target.primary() {
            Some(element) => self.attempt(element, action).await,
            None => InteractionResult::failed(
                Stage::Locate,
                Error::element_not_found(target.locator().primary.to_string()),
            ),
        };

        let primary_error = match primary {
            InteractionResult::Completed => {
                debug!(field, %action, "Completed with primary element");
                return Ok(());
            }
            InteractionResult::Failed { error, .. } if error.is_terminal() => return Err(error),
            InteractionResult::Failed { stage, error } => {
                warn!(
                    field,
                    %action,
                    %stage,
                    error = %error,
                    fallback = %target.fallback(),
                    "Primary attempt failed, retrying with fallback locator"
                );
                error
            }
        };

        let fallback = match self.resolve_fallback(target).await {
            Ok(element) => self.attempt(&element, action).await,
            Err(e) => InteractionResult::failed(Stage::Locate, e),
        };

        match fallback {
            InteractionResult::Completed => {
                info!(field, %action, "Completed with fallback element");
                Ok(())
            }
            InteractionResult::Failed { error, .. } if error.is_terminal() => Err(error),
            InteractionResult::Failed { stage, error } => {
                debug!(field, %stage, error = %error, "Fallback attempt failed");
                Err(Error::interaction(field, primary_error, error))
            }
        }
    }

    /// Waits for the fallback locator to match, then takes the first match.
    async fn resolve_fallback(&self, target: &FieldTarget<S::Element>) -> Result<S::Element> {
        let session = self.session;
        let locator = target.fallback();

        let found = poll_until(&self.policy, &format!("{locator} to match"), move || async move {
            let found = session.find_elements(locator).await?;
            Ok::<_, Error>((!found.is_empty()).then_some(found))
        })
        .await
        .map_err(|e| {
            if e.is_timeout() {
                Error::element_not_found(locator.to_string())
            } else {
                e
            }
        })?;

        if found.len() > 1 {
            warn!(
                field = target.name(),
                %locator,
                count = found.len(),
                "Fallback locator is ambiguous, using first match"
            );
        }

        found
            .into_iter()
            .next()
            .ok_or_else(|| Error::element_not_found(locator.to_string()))
    }

    /// Runs wait → act against one element.
    async fn attempt(&self, element: &S::Element, action: &Action) -> InteractionResult {
        if let Err(e) = wait_for_element(element, action.readiness(), &self.policy).await {
            return InteractionResult::failed(Stage::Wait, e);
        }

        match act(element, action).await {
            Ok(()) => InteractionResult::Completed,
            Err(e) => InteractionResult::failed(Stage::Act, e),
        }
    }
}

async fn act<E: ElementHandle>(element: &E, action: &Action) -> Result<()> {
    match action {
        Action::Click => {
            element.scroll_into_view().await?;
            element.script_click().await
        }
        Action::Check => {
            if element.is_checked().await? {
                debug!(element_id = %element.id(), "Already checked");
                return Ok(());
            }

            element.scroll_into_view().await?;
            element.script_click().await?;

            if element.is_checked().await? {
                Ok(())
            } else {
                Err(Error::not_interactable(
                    element.id().clone(),
                    "click did not check the control",
                ))
            }
        }
        Action::TypeText(text) => {
            element.clear().await?;
            element.type_text(text).await
        }
        Action::SelectByValue(value) => element.select_by_value(&value.to_lowercase()).await,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    use crate::browser::By;
    use crate::interact::{FieldKind, Locator};
    use crate::testing::{MockSession, Node};

    fn fast() -> WaitPolicy {
        WaitPolicy::new()
            .with_timeout(Duration::from_millis(150))
            .with_poll_interval(Duration::from_millis(10))
    }

    fn email_locator() -> Locator {
        By::id("email").with_fallback(By::xpath("//input[@type='email']"))
    }

    async fn email_target(session: &MockSession) -> FieldTarget<crate::testing::MockElement> {
        FieldTarget::resolve(session, "email", FieldKind::TextInput, email_locator()).await
    }

    #[test]
    fn test_action_readiness() {
        assert_eq!(Action::type_text("x").readiness(), Readiness::Visible);
        assert_eq!(Action::Click.readiness(), Readiness::Clickable);
        assert_eq!(Action::Check.readiness(), Readiness::Clickable);
        assert_eq!(Action::select_by_value("yes").readiness(), Readiness::Clickable);
    }

    #[tokio::test]
    async fn test_type_with_primary() {
        let session = MockSession::new();
        let node = session.add(
            Node::input("old")
                .matching([By::id("email"), By::xpath("//input[@type='email']")]),
        );
        let target = email_target(&session).await;

        ResilientInteractor::new(&session)
            .with_policy(fast())
            .perform(&target, &Action::type_text("a@b.c"))
            .await
            .expect("typed");

        assert_eq!(session.value_of(node), "a@b.c");
        assert_eq!(session.fallback_lookups(), 0);
    }

    #[tokio::test]
    async fn test_stale_primary_uses_fallback() {
        let session = MockSession::new();
        let node = session.add(
            Node::input("")
                .matching([By::id("email"), By::xpath("//input[@type='email']")]),
        );
        let target = email_target(&session).await;
        let fresh = session.rerender(node);

        ResilientInteractor::new(&session)
            .with_policy(fast())
            .perform(&target, &Action::type_text("a@b.c"))
            .await
            .expect("typed via fallback");

        assert_eq!(session.value_of(fresh), "a@b.c");
    }

    #[tokio::test]
    async fn test_missing_primary_uses_fallback() {
        let session = MockSession::new();
        let node = session.add(Node::input("").matching([By::xpath("//input[@type='email']")]));
        let target = email_target(&session).await;
        assert!(target.primary().is_none());

        ResilientInteractor::new(&session)
            .with_policy(fast())
            .perform(&target, &Action::type_text("a@b.c"))
            .await
            .expect("typed via fallback");

        assert_eq!(session.value_of(node), "a@b.c");
    }

    #[tokio::test]
    async fn test_hidden_primary_uses_fallback() {
        let session = MockSession::new();
        session.add(Node::input("").matching([By::id("email")]).hidden());
        let visible = session.add(Node::input("").matching([By::xpath("//input[@type='email']")]));
        let target = email_target(&session).await;

        ResilientInteractor::new(&session)
            .with_policy(fast())
            .perform(&target, &Action::type_text("a@b.c"))
            .await
            .expect("typed via fallback");

        assert_eq!(session.value_of(visible), "a@b.c");
    }

    #[tokio::test]
    async fn test_both_attempts_fail() {
        let session = MockSession::new();
        let node = session.add(Node::input("").matching([By::id("email")]));
        let target = email_target(&session).await;
        session.detach(node);

        let err = ResilientInteractor::new(&session)
            .with_policy(fast())
            .perform(&target, &Action::type_text("a@b.c"))
            .await
            .unwrap_err();

        match err {
            Error::Interaction {
                field,
                primary,
                fallback,
            } => {
                assert_eq!(field, "email");
                assert!(matches!(*primary, Error::StaleElement { .. }));
                assert!(matches!(*fallback, Error::ElementNotFound { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_ambiguous_fallback_uses_first() {
        let session = MockSession::new();
        let first = session.add(Node::input("").matching([By::css("input.email")]));
        let second = session.add(Node::input("").matching([By::css("input.email")]));
        let target = FieldTarget::resolve(
            &session,
            "email",
            FieldKind::TextInput,
            By::id("email").with_fallback(By::css("input.email")),
        )
        .await;

        ResilientInteractor::new(&session)
            .with_policy(fast())
            .perform(&target, &Action::type_text("a@b.c"))
            .await
            .expect("typed");

        assert_eq!(session.value_of(first), "a@b.c");
        assert_eq!(session.value_of(second), "");
    }

    #[tokio::test]
    async fn test_type_clears_existing_value() {
        let session = MockSession::new();
        let node = session.add(Node::input("stale text").matching([By::id("email")]));
        let target = email_target(&session).await;
        let interactor = ResilientInteractor::new(&session).with_policy(fast());

        interactor.perform(&target, &Action::type_text("Anna")).await.expect("first");
        interactor.perform(&target, &Action::type_text("Anna")).await.expect("second");

        assert_eq!(session.value_of(node), "Anna");
    }

    #[tokio::test]
    async fn test_click_scrolls_first() {
        let session = MockSession::new();
        let node = session.add(Node::button().matching([By::css("button")]));
        let target = FieldTarget::resolve(
            &session,
            "submit",
            FieldKind::Button,
            By::css("button").with_fallback(By::xpath("//button")),
        )
        .await;

        ResilientInteractor::new(&session)
            .with_policy(fast())
            .perform(&target, &Action::Click)
            .await
            .expect("clicked");

        assert_eq!(session.events_of(node), ["scroll", "click"]);
    }

    #[tokio::test]
    async fn test_check_is_idempotent() {
        let session = MockSession::new();
        let node = session.add(Node::checkbox("milk").matching([By::css("input[value='Milk']")]));
        let target = FieldTarget::resolve(
            &session,
            "milk",
            FieldKind::Checkbox,
            By::css("input[value='Milk']").with_fallback(By::css("input[value='Milk']")),
        )
        .await;
        let interactor = ResilientInteractor::new(&session).with_policy(fast());

        interactor.perform(&target, &Action::Check).await.expect("first");
        interactor.perform(&target, &Action::Check).await.expect("second");

        assert!(session.is_checked(node));
        assert_eq!(session.events_of(node), ["scroll", "click"]);
    }

    #[tokio::test]
    async fn test_select_lowercases_payload() {
        let session = MockSession::new();
        let node = session.add(Node::select(["yes", "no"]).matching([By::id("automation")]));
        let target = FieldTarget::resolve(
            &session,
            "automation",
            FieldKind::Select,
            By::id("automation").with_fallback(By::css("select")),
        )
        .await;

        ResilientInteractor::new(&session)
            .with_policy(fast())
            .perform(&target, &Action::select_by_value("YES"))
            .await
            .expect("selected");

        assert_eq!(session.value_of(node), "yes");
    }

    #[tokio::test]
    async fn test_missing_option_is_terminal() {
        let session = MockSession::new();
        session.add(Node::select(["yes", "no"]).matching([By::id("automation"), By::css("select")]));
        let target = FieldTarget::resolve(
            &session,
            "automation",
            FieldKind::Select,
            By::id("automation").with_fallback(By::css("select")),
        )
        .await;

        let err = ResilientInteractor::new(&session)
            .with_policy(fast())
            .perform(&target, &Action::select_by_value("maybe"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::DropdownValueNotFound { ref value } if value == "maybe"));
        assert_eq!(session.fallback_lookups(), 0);
    }
}
