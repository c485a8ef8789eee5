//! DOM element interaction.
//!
//! Elements are remote object handles (`Runtime.RemoteObject.objectId`)
//! held by the page. Every operation is a `Runtime.callFunctionOn` with
//! `this` bound to the element; operations on a node that has left the
//! document fail with [`Error::StaleElement`].
//!
//! # Example
//!
//! ```ignore
//! let name = session.find_element(&By::id("name-input")).await?;
//!
//! name.clear().await?;
//! name.type_text("Anna").await?;
//!
//! let submit = session.find_element(&By::css("button[type='submit']")).await?;
//! submit.click().await?;
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::watch;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::identifiers::ElementId;
use crate::interact::ElementHandle;
use crate::protocol::{CallArgument, Command, EvaluateResult, InputCommand, RuntimeCommand};

use super::dialog::Dialog;
use super::session::Session;

// ============================================================================
// Scripts
// ============================================================================

/// Error text thrown by guarded functions on detached nodes.
const STALE_MARKER: &str = "stale element reference";

const IS_CONNECTED_JS: &str = "function() { return this.isConnected; }";

const IS_DISPLAYED_BODY: &str = "\
    const style = window.getComputedStyle(this);
    if (style.display === 'none' || style.visibility === 'hidden' || style.visibility === 'collapse') {
        return false;
    }
    if (parseFloat(style.opacity) === 0) return false;
    const rect = this.getBoundingClientRect();
    return rect.width > 0 && rect.height > 0;";

const IS_ENABLED_BODY: &str = "return !this.matches(':disabled');";

const IS_CHECKED_BODY: &str = "return !!this.checked;";

const SCROLL_INTO_VIEW_BODY: &str =
    "this.scrollIntoView({ block: 'center', inline: 'nearest', behavior: 'instant' });";

const CLICK_BODY: &str = "this.click();";

const CLEAR_BODY: &str = "\
    this.focus();
    if ('value' in this) this.value = '';
    this.dispatchEvent(new Event('input', { bubbles: true }));
    this.dispatchEvent(new Event('change', { bubbles: true }));";

const FOCUS_END_BODY: &str = "\
    this.focus();
    if (typeof this.setSelectionRange === 'function') {
        try {
            const end = this.value.length;
            this.setSelectionRange(end, end);
        } catch (e) {}
    }";

const CHANGE_BODY: &str = "this.dispatchEvent(new Event('change', { bubbles: true }));";

const SELECT_BY_VALUE_BODY: &str = "\
    if (this.tagName !== 'SELECT') throw new Error('element is not a select');
    const option = Array.from(this.options).find((o) => o.value === value);
    if (!option) return false;
    option.selected = true;
    this.dispatchEvent(new Event('input', { bubbles: true }));
    this.dispatchEvent(new Event('change', { bubbles: true }));
    return true;";

const TEXT_BODY: &str = "return (this.innerText ?? this.textContent ?? '').trim();";

const VALUE_BODY: &str = "return this.value ?? null;";

/// Wraps a function body so it throws on detached nodes.
fn guarded(body: &str) -> String {
    format!(
        "function(value) {{ if (!this.isConnected) throw new Error('{STALE_MARKER}'); {body} }}"
    )
}

// ============================================================================
// Types
// ============================================================================

/// Remote handles created by one element lookup.
///
/// The group is released in the page once the last element holding it is
/// dropped.
pub(crate) struct ObjectGroup {
    name: String,
    session: Session,
}

impl ObjectGroup {
    /// Creates a group with a name unique to this process.
    pub(crate) fn new(session: Session) -> Self {
        Self {
            name: next_group_name(),
            session,
        }
    }

    /// Returns the group name sent with `Runtime.evaluate`.
    pub(crate) fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for ObjectGroup {
    fn drop(&mut self) {
        if self.session.is_closed() {
            return;
        }
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            return;
        };

        let session = self.session.clone();
        let object_group = std::mem::take(&mut self.name);
        runtime.spawn(async move {
            let command = Command::Runtime(RuntimeCommand::ReleaseObjectGroup {
                object_group: object_group.clone(),
            });
            if let Err(e) = session.send(command).await {
                trace!(group = %object_group, error = %e, "Failed to release object group");
            }
        });
    }
}

fn next_group_name() -> String {
    static NEXT: AtomicU64 = AtomicU64::new(1);
    format!("lookup-{}", NEXT.fetch_add(1, Ordering::Relaxed))
}

/// Internal shared state for an element.
pub(crate) struct ElementInner {
    /// Remote object handle.
    pub id: ElementId,

    /// Owning session.
    pub session: Session,

    /// Keeps the handle's object group alive.
    _group: Arc<ObjectGroup>,
}

// ============================================================================
// Element
// ============================================================================

/// A handle to a DOM element in the session's page.
#[derive(Clone)]
pub struct Element {
    /// Shared inner state.
    pub(crate) inner: Arc<ElementInner>,
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("id", &self.inner.id)
            .finish_non_exhaustive()
    }
}

impl Element {
    /// Creates a new element handle owned by `group`.
    pub(crate) fn new(id: ElementId, group: Arc<ObjectGroup>) -> Self {
        Self {
            inner: Arc::new(ElementInner {
                id,
                session: group.session.clone(),
                _group: group,
            }),
        }
    }

    /// Returns this element's ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &ElementId {
        &self.inner.id
    }
}

// ============================================================================
// Element - State
// ============================================================================

impl Element {
    /// Returns `true` while the node is attached to the document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StaleElement`] if the handle no longer resolves.
    pub async fn is_connected(&self) -> Result<bool> {
        Ok(self.call(IS_CONNECTED_JS, None).await?.as_bool() == Some(true))
    }

    /// Returns `true` if the element is rendered with a non-empty box.
    pub async fn is_displayed(&self) -> Result<bool> {
        self.call_bool(IS_DISPLAYED_BODY).await
    }

    /// Returns `true` if the element is not disabled.
    pub async fn is_enabled(&self) -> Result<bool> {
        self.call_bool(IS_ENABLED_BODY).await
    }

    /// Returns the `checked` property.
    pub async fn is_checked(&self) -> Result<bool> {
        self.call_bool(IS_CHECKED_BODY).await
    }

    /// Returns the rendered text, trimmed.
    pub async fn text(&self) -> Result<String> {
        self.call_string(TEXT_BODY, None).await
    }

    /// Returns the `value` property, empty when absent.
    pub async fn value(&self) -> Result<String> {
        self.call_string(VALUE_BODY, None).await
    }
}

// ============================================================================
// Element - Actions
// ============================================================================

impl Element {
    /// Scrolls the element to the vertical center of the viewport.
    pub async fn scroll_into_view(&self) -> Result<()> {
        self.call(&guarded(SCROLL_INTO_VIEW_BODY), None).await?;
        Ok(())
    }

    /// Clicks the element through script.
    ///
    /// A click whose handler opens a native dialog blocks the page until
    /// the dialog is handled, so the call returns as soon as a dialog
    /// opens.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ElementNotInteractable`] without clicking if a
    /// dialog is already open.
    pub async fn script_click(&self) -> Result<()> {
        let mut dialog = self.inner.session.watch_dialog();
        ensure_no_dialog(&mut dialog, &self.inner.id)?;
        let function = guarded(CLICK_BODY);

        tokio::select! {
            result = self.call(&function, None) => result.map(drop),
            () = wait_for_dialog_opening(&mut dialog) => {
                debug!(element_id = %self.inner.id, "Click opened a dialog");
                Ok(())
            }
        }
    }

    /// Scrolls the element into view, then clicks it through script.
    pub async fn click(&self) -> Result<()> {
        self.scroll_into_view().await?;
        self.script_click().await
    }

    /// Clears the element's value and fires `input`/`change`.
    pub async fn clear(&self) -> Result<()> {
        self.call(&guarded(CLEAR_BODY), None).await?;
        Ok(())
    }

    /// Types text at the end of the current value.
    ///
    /// Text is inserted with `Input.insertText`, which fires native input
    /// events; a `change` event follows.
    pub async fn type_text(&self, text: &str) -> Result<()> {
        self.call(&guarded(FOCUS_END_BODY), None).await?;

        if !text.is_empty() {
            self.inner
                .session
                .send(Command::Input(InputCommand::InsertText {
                    text: text.to_string(),
                }))
                .await?;
        }

        self.call(&guarded(CHANGE_BODY), None).await?;
        Ok(())
    }

    /// Selects the `<option>` with exactly this value.
    ///
    /// # Errors
    ///
    /// - [`Error::DropdownValueNotFound`] if no option has this value
    /// - [`Error::ScriptError`] if the element is not a `<select>`
    pub async fn select_by_value(&self, value: &str) -> Result<()> {
        let selected = self
            .call(&guarded(SELECT_BY_VALUE_BODY), Some(Value::from(value)))
            .await?;

        if selected.as_bool() == Some(true) {
            Ok(())
        } else {
            Err(Error::dropdown_value_not_found(value))
        }
    }
}

// ============================================================================
// Element - Internal
// ============================================================================

impl Element {
    /// Calls `function` with `this` bound to the element.
    async fn call(&self, function: &str, argument: Option<Value>) -> Result<Value> {
        let command = Command::Runtime(RuntimeCommand::CallFunctionOn {
            function_declaration: function.to_string(),
            object_id: self.inner.id.clone(),
            arguments: argument.map(CallArgument::value).into_iter().collect(),
            return_by_value: true,
            await_promise: true,
        });

        let value = self
            .inner
            .session
            .send(command)
            .await
            .map_err(|e| e.into_stale_for(&self.inner.id))?;

        match EvaluateResult::from_value(value) {
            Ok(object) => Ok(object.into_value()),
            Err(Error::ScriptError { message }) if message.contains(STALE_MARKER) => {
                Err(Error::stale_element(self.inner.id.clone()))
            }
            Err(e) => Err(e),
        }
    }

    async fn call_bool(&self, body: &str) -> Result<bool> {
        Ok(self.call(&guarded(body), None).await?.as_bool() == Some(true))
    }

    async fn call_string(&self, body: &str, argument: Option<Value>) -> Result<String> {
        let value = self.call(&guarded(body), argument).await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }
}

/// Fails if a dialog is open, and marks the current state as seen.
fn ensure_no_dialog(
    dialog: &mut watch::Receiver<Option<Dialog>>,
    element_id: &ElementId,
) -> Result<()> {
    match dialog.borrow_and_update().as_ref() {
        Some(open) => Err(Error::not_interactable(
            element_id.clone(),
            format!("{} dialog is open", open.kind),
        )),
        None => Ok(()),
    }
}

/// Resolves once a dialog opens after the last seen state. Never resolves
/// if the session is gone.
async fn wait_for_dialog_opening(dialog: &mut watch::Receiver<Option<Dialog>>) {
    loop {
        if dialog.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
        if dialog.borrow_and_update().is_some() {
            return;
        }
    }
}

// ============================================================================
// ElementHandle
// ============================================================================

#[async_trait]
impl ElementHandle for Element {
    fn id(&self) -> &ElementId {
        Element::id(self)
    }

    async fn is_connected(&self) -> Result<bool> {
        Element::is_connected(self).await
    }

    async fn is_displayed(&self) -> Result<bool> {
        Element::is_displayed(self).await
    }

    async fn is_enabled(&self) -> Result<bool> {
        Element::is_enabled(self).await
    }

    async fn is_checked(&self) -> Result<bool> {
        Element::is_checked(self).await
    }

    async fn scroll_into_view(&self) -> Result<()> {
        Element::scroll_into_view(self).await
    }

    async fn script_click(&self) -> Result<()> {
        Element::script_click(self).await
    }

    async fn clear(&self) -> Result<()> {
        Element::clear(self).await
    }

    async fn type_text(&self, text: &str) -> Result<()> {
        Element::type_text(self, text).await
    }

    async fn select_by_value(&self, value: &str) -> Result<()> {
        Element::select_by_value(self, value).await
    }

    async fn text(&self) -> Result<String> {
        Element::text(self).await
    }

    async fn value(&self) -> Result<String> {
        Element::value(self).await
    }
}

// ============================================================================
// Tests
// ============================================================================
