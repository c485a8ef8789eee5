//! Browser capabilities the interaction layer is written against.
//!
//! [`Session`](crate::Session) and [`Element`](crate::Element) implement these
//! over CDP; tests substitute an in-memory page.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use crate::browser::By;
use crate::error::Result;
use crate::identifiers::ElementId;

// ============================================================================
// ElementHandle
// ============================================================================

/// A handle to one element of the live document.
///
/// A handle may go stale when the page re-renders; operations on a stale
/// handle fail with [`Error::StaleElement`](crate::Error::StaleElement).
#[async_trait]
pub trait ElementHandle: Clone + fmt::Debug + Send + Sync {
    /// Returns the handle's identifier.
    fn id(&self) -> &ElementId;

    /// Returns `true` while the element is attached to the document.
    async fn is_connected(&self) -> Result<bool>;

    /// Returns `true` if the element is rendered and visible.
    async fn is_displayed(&self) -> Result<bool>;

    /// Returns `true` if the element is not disabled.
    async fn is_enabled(&self) -> Result<bool>;

    /// Returns the `checked` state of a checkbox or radio button.
    async fn is_checked(&self) -> Result<bool>;

    /// Scrolls the element to the vertical center of the viewport.
    async fn scroll_into_view(&self) -> Result<()>;

    /// Dispatches a click through script (`element.click()`).
    async fn script_click(&self) -> Result<()>;

    /// Clears the element's value.
    async fn clear(&self) -> Result<()>;

    /// Types text at the end of the element's current value.
    async fn type_text(&self, text: &str) -> Result<()>;

    /// Selects the `<option>` with exactly this value.
    ///
    /// Fails with [`Error::DropdownValueNotFound`](crate::Error::DropdownValueNotFound)
    /// if no option matches.
    async fn select_by_value(&self, value: &str) -> Result<()>;

    /// Returns the rendered text, trimmed.
    async fn text(&self) -> Result<String>;

    /// Returns the element's `value` property, empty when absent.
    async fn value(&self) -> Result<String>;
}

// ============================================================================
// BrowserSession
// ============================================================================

/// A browser session driving a single page.
#[async_trait]
pub trait BrowserSession: Send + Sync {
    /// Element handle type returned by lookups.
    type Element: ElementHandle;

    /// Navigates to `url` and waits for the page to load.
    async fn navigate(&self, url: &str) -> Result<()>;

    /// Returns the page's current URL.
    async fn current_url(&self) -> Result<String>;

    /// Returns the first element matching `by`.
    ///
    /// Fails with [`Error::ElementNotFound`](crate::Error::ElementNotFound)
    /// when nothing matches.
    async fn find_element(&self, by: &By) -> Result<Self::Element>;

    /// Returns all elements matching `by` in document order.
    async fn find_elements(&self, by: &By) -> Result<Vec<Self::Element>>;

    /// Runs a script body (which may `return` a value) in the page.
    async fn execute_script(&self, script: &str) -> Result<Value>;

    /// Returns the text of the open native alert, if any.
    async fn pending_alert(&self) -> Result<Option<String>>;

    /// Accepts the open native alert.
    ///
    /// Fails with [`Error::NoSuchAlert`](crate::Error::NoSuchAlert) when
    /// none is open.
    async fn accept_alert(&self) -> Result<()>;

    /// Closes the browser. Safe to call more than once.
    async fn quit(&self) -> Result<()>;
}
