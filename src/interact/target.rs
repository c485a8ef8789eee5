//! Field targets: a pre-resolved element plus an independent fallback locator.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use tracing::{debug, warn};

use crate::browser::By;

use super::session::{BrowserSession, ElementHandle};

// ============================================================================
// FieldKind
// ============================================================================

/// Kind of form control a target points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// `<input type="text">` and friends.
    TextInput,
    /// `<input type="checkbox">`.
    Checkbox,
    /// `<input type="radio">`.
    Radio,
    /// `<select>`.
    Select,
    /// `<textarea>`.
    Textarea,
    /// `<button>`.
    Button,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TextInput => "text-input",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::Select => "select",
            Self::Textarea => "textarea",
            Self::Button => "button",
        };
        f.write_str(name)
    }
}

// ============================================================================
// Locator
// ============================================================================

/// A primary locator paired with an independent fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    /// Locator resolved once, up front.
    pub primary: By,
    /// Locator re-resolved against the live document when the primary fails.
    pub fallback: By,
}

impl By {
    /// Pairs this locator with a fallback.
    ///
    /// ```
    /// use resilient_webdriver::By;
    ///
    /// let email = By::id("email").with_fallback(By::xpath("//input[@type='email']"));
    /// assert_eq!(email.primary, By::id("email"));
    /// ```
    #[must_use]
    pub fn with_fallback(self, fallback: By) -> Locator {
        Locator {
            primary: self,
            fallback,
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {}", self.primary, self.fallback)
    }
}

// ============================================================================
// FieldTarget
// ============================================================================

/// One logical form field.
///
/// The primary handle is resolved once when the target is built and may
/// be absent or go stale later; the fallback locator is resolved fresh
/// each time it is needed.
#[derive(Debug, Clone)]
pub struct FieldTarget<E> {
    name: String,
    kind: FieldKind,
    locator: Locator,
    primary: Option<E>,
}

impl<E: ElementHandle> FieldTarget<E> {
    /// Creates a target from an already-resolved primary handle.
    pub fn new(
        name: impl Into<String>,
        kind: FieldKind,
        locator: Locator,
        primary: Option<E>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            locator,
            primary,
        }
    }

    /// Resolves the primary locator against `session` and builds the target.
    ///
    /// A primary that cannot be found is recorded as absent; the fallback
    /// covers it when the field is used.
    pub async fn resolve<S>(
        session: &S,
        name: impl Into<String>,
        kind: FieldKind,
        locator: Locator,
    ) -> Self
    where
        S: BrowserSession<Element = E>,
    {
        let name = name.into();

        let primary = match session.find_element(&locator.primary).await {
            Ok(element) => Some(element),
            Err(e) if e.is_element_error() => {
                debug!(field = %name, locator = %locator.primary, error = %e, "Primary locator unresolved");
                None
            }
            Err(e) => {
                warn!(field = %name, locator = %locator.primary, error = %e, "Primary lookup failed");
                None
            }
        };

        Self::new(name, kind, locator, primary)
    }

    /// Returns the logical field name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the kind of control.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Returns the primary/fallback locator pair.
    #[inline]
    #[must_use]
    pub fn locator(&self) -> &Locator {
        &self.locator
    }

    /// Returns the fallback locator.
    #[inline]
    #[must_use]
    pub fn fallback(&self) -> &By {
        &self.locator.fallback
    }

    /// Returns the pre-resolved primary handle, if any.
    #[inline]
    #[must_use]
    pub fn primary(&self) -> Option<&E> {
        self.primary.as_ref()
    }
}

// ============================================================================
// Tests
// ============================================================================
