//! Summary of the "Automation tools" list.
//!
//! [`summarize`] is pure; [`ToolsSummaryReader`] collects the item texts
//! from the page first.

// ============================================================================
// Imports
// ============================================================================

use tracing::{debug, warn};

use crate::browser::By;
use crate::error::{Error, Result};
use crate::interact::{BrowserSession, ElementHandle, Readiness, WaitPolicy, poll_until, wait_for_element};

// ============================================================================
// summarize
// ============================================================================

/// Formats `"<count> items, longest: <longest>"`.
///
/// Length is counted in characters. On ties the earliest item wins.
///
/// ```
/// use resilient_webdriver::summarize;
///
/// assert_eq!(summarize(["a", "bb", "ccc"]), "3 items, longest: ccc");
/// assert_eq!(summarize(["zz", "yy"]), "2 items, longest: zz");
/// assert_eq!(summarize(Vec::<String>::new()), "0 items, longest: ");
/// ```
pub fn summarize<I, T>(items: I) -> String
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    let (count, longest) = items.into_iter().fold(
        (0usize, None::<(usize, T)>),
        |(count, longest), item| {
            let len = item.as_ref().chars().count();
            let longest = match longest {
                Some((best, kept)) if best >= len => Some((best, kept)),
                _ => Some((len, item)),
            };
            (count + 1, longest)
        },
    );

    let longest = longest.as_ref().map_or("", |(_, item)| item.as_ref());
    format!("{count} items, longest: {longest}")
}

// ============================================================================
// ToolsSummaryReader
// ============================================================================

/// Reads a list of elements and summarizes their text.
#[derive(Debug, Clone)]
pub struct ToolsSummaryReader<'s, S> {
    session: &'s S,
    primary: By,
    alternate: By,
    policy: WaitPolicy,
}

impl<'s, S: BrowserSession> ToolsSummaryReader<'s, S> {
    /// Creates a reader for the list matched by `primary`, or by
    /// `alternate` when `primary` matches nothing.
    pub fn new(session: &'s S, primary: By, alternate: By) -> Self {
        Self {
            session,
            primary,
            alternate,
            policy: WaitPolicy::default(),
        }
    }

    /// Replaces the wait policy.
    #[must_use]
    pub fn with_policy(mut self, policy: WaitPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the summary, or the empty summary if the list can't be read.
    pub async fn read(&self) -> String {
        match self.collect().await {
            Ok(items) => {
                debug!(count = items.len(), "Read list items");
                summarize(&items)
            }
            Err(e) => {
                warn!(error = %e, "Could not read list items, using empty summary");
                summarize(Vec::<String>::new())
            }
        }
    }

    async fn collect(&self) -> Result<Vec<String>> {
        let mut elements = self.find_primary().await?;

        if elements.is_empty() {
            debug!(locator = %self.alternate, "Primary list query empty, trying alternate");
            elements = self.session.find_elements(&self.alternate).await?;
        }

        let mut items = Vec::with_capacity(elements.len());
        for element in &elements {
            wait_for_element(element, Readiness::Visible, &self.policy).await?;
            items.push(element.text().await?);
        }

        Ok(items)
    }

    /// Waits for the primary query to match; empty if it never does.
    async fn find_primary(&self) -> Result<Vec<S::Element>> {
        let session = self.session;
        let locator = &self.primary;

        let found = poll_until(&self.policy, &format!("{locator} to match"), move || async move {
            let found = session.find_elements(locator).await?;
            Ok::<_, Error>((!found.is_empty()).then_some(found))
        })
        .await;

        match found {
            Ok(elements) => Ok(elements),
            Err(e) if e.is_timeout() => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
