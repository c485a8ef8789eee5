//! Browser session over a flattened CDP target session.
//!
//! Each [`Session`] owns:
//! - One Chrome process
//! - One DevTools WebSocket connection and its event loop
//! - One temporary user-data directory
//! - One page target
//!
//! # Example
//!
//! ```no_run
//! use resilient_webdriver::{By, Driver};
//!
//! # async fn example() -> resilient_webdriver::Result<()> {
//! let session = Driver::builder().headless(true).build()?.launch().await?;
//!
//! session.goto("https://example.com").await?;
//! let heading = session.find_element(&By::tag("h1")).await?;
//! println!("{}", heading.text().await?);
//!
//! session.quit().await?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::{Mutex, watch};
use tokio::time::{Instant, sleep};
use tracing::{debug, info, trace, warn};

use crate::driver::Profile;
use crate::driver::Timeouts;
use crate::driver::assets::START_PAGE;
use crate::driver::process::ProcessGuard;
use crate::error::{Error, Result};
use crate::identifiers::{CdpSessionId, TargetId};
use crate::interact::BrowserSession;
use crate::protocol::{
    BrowserCommand, Command, EvaluateResult, GetPropertiesResult, PageCommand, ParsedEvent,
    Request, RuntimeCommand, TargetCommand,
};
use crate::transport::{Connection, EventHandler};

use super::dialog::Dialog;
use super::element::{Element, ObjectGroup};
use super::selector::By;

// ============================================================================
// Constants
// ============================================================================

/// Interval between `document.readyState` probes.
const READY_STATE_POLL: Duration = Duration::from_millis(100);

/// Time allowed for a graceful `Browser.close`.
const BROWSER_CLOSE_TIMEOUT: Duration = Duration::from_secs(2);

// ============================================================================
// Types
// ============================================================================

/// Internal shared state for a session.
pub(crate) struct SessionInner {
    /// DevTools connection.
    connection: Connection,
    /// Flattened session attached to the page target.
    cdp_session: CdpSessionId,
    /// Page target.
    target_id: TargetId,
    /// Protected process handle.
    process: Mutex<ProcessGuard>,
    /// User-data directory, removed when the session is dropped.
    _profile: Profile,
    /// Session timeouts.
    timeouts: Timeouts,
    /// Currently open native dialog.
    dialog: Arc<watch::Sender<Option<Dialog>>>,
    /// Set once `quit` has run.
    closed: AtomicBool,
}

impl Drop for SessionInner {
    fn drop(&mut self) {
        self.connection.shutdown();
    }
}

// ============================================================================
// Session
// ============================================================================

/// A handle to a Chrome page driven over CDP.
///
/// Cheap to clone. The Chrome process is killed when the last clone is
/// dropped; call [`Session::quit`] to shut down gracefully.
#[derive(Clone)]
pub struct Session {
    /// Shared inner state.
    pub(crate) inner: Arc<SessionInner>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("target_id", &self.inner.target_id)
            .field("cdp_session", &self.inner.cdp_session)
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Session - Constructor
// ============================================================================

impl Session {
    /// Opens a page target on `connection` and attaches to it.
    pub(crate) async fn open(
        connection: Connection,
        process: ProcessGuard,
        profile: Profile,
        timeouts: Timeouts,
    ) -> Result<Self> {
        let created = Self::send_browser(
            &connection,
            Command::Target(TargetCommand::CreateTarget {
                url: START_PAGE.to_string(),
            }),
            timeouts.script,
        )
        .await?;
        let target_id = created
            .get("targetId")
            .and_then(Value::as_str)
            .map(TargetId::new)
            .ok_or_else(|| Error::protocol("Expected targetId in Target.createTarget response"))?;

        let attached = Self::send_browser(
            &connection,
            Command::Target(TargetCommand::AttachToTarget {
                target_id: target_id.clone(),
                flatten: true,
            }),
            timeouts.script,
        )
        .await?;
        let cdp_session = attached
            .get("sessionId")
            .and_then(Value::as_str)
            .map(CdpSessionId::new)
            .ok_or_else(|| Error::protocol("Expected sessionId in Target.attachToTarget response"))?;

        let (dialog_tx, _) = watch::channel(None);
        let dialog = Arc::new(dialog_tx);
        connection.set_event_handler(Self::event_handler(
            cdp_session.clone(),
            Arc::clone(&dialog),
        ));

        let session = Self {
            inner: Arc::new(SessionInner {
                connection,
                cdp_session,
                target_id,
                process: Mutex::new(process),
                _profile: profile,
                timeouts,
                dialog,
                closed: AtomicBool::new(false),
            }),
        };

        session.send(Command::Page(PageCommand::Enable)).await?;
        session.send(Command::Runtime(RuntimeCommand::Enable)).await?;

        info!(
            target_id = %session.inner.target_id,
            session_id = %session.inner.cdp_session,
            "Session attached"
        );

        Ok(session)
    }

    /// Builds the handler tracking dialogs of this session's page.
    fn event_handler(
        cdp_session: CdpSessionId,
        dialog: Arc<watch::Sender<Option<Dialog>>>,
    ) -> EventHandler {
        Box::new(move |event| {
            if event.session_id.as_ref() != Some(&cdp_session) {
                return;
            }

            match event.parse() {
                ParsedEvent::DialogOpening {
                    message,
                    dialog_type,
                } => {
                    debug!(kind = %dialog_type, message = %message, "Dialog opened");
                    dialog.send_replace(Some(Dialog::new(message, &dialog_type)));
                }
                ParsedEvent::DialogClosed { accepted } => {
                    debug!(accepted, "Dialog closed");
                    dialog.send_replace(None);
                }
                _ => {}
            }
        })
    }
}

// ============================================================================
// Session - Accessors
// ============================================================================

impl Session {
    /// Returns the page target ID.
    #[inline]
    #[must_use]
    pub fn target_id(&self) -> &TargetId {
        &self.inner.target_id
    }

    /// Returns the session timeouts.
    #[inline]
    #[must_use]
    pub fn timeouts(&self) -> Timeouts {
        self.inner.timeouts
    }

    /// Returns `true` once [`Session::quit`] has run.
    #[inline]
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::SeqCst)
    }
}

// ============================================================================
// Session - Navigation
// ============================================================================

impl Session {
    /// Navigates to `url` and waits for the document to finish loading.
    ///
    /// A page that is still loading after the page-load timeout is logged
    /// and treated as loaded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Navigation`] if Chrome rejects the navigation.
    pub async fn goto(&self, url: &str) -> Result<()> {
        debug!(url, "Navigating");

        let result = self
            .send(Command::Page(PageCommand::Navigate {
                url: url.to_string(),
            }))
            .await?;

        if let Some(error_text) = result.get("errorText").and_then(Value::as_str)
            && !error_text.is_empty()
        {
            return Err(Error::navigation(url, error_text));
        }

        self.wait_for_load(url).await;
        Ok(())
    }

    /// Returns the page's current URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the page cannot be evaluated.
    pub async fn current_url(&self) -> Result<String> {
        let value = self.evaluate("window.location.href").await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    /// Polls `document.readyState` until `complete` or the page-load timeout.
    async fn wait_for_load(&self, url: &str) {
        let page_load = self.inner.timeouts.page_load;
        let deadline = Instant::now() + page_load;

        loop {
            match self.evaluate("document.readyState").await {
                Ok(Value::String(state)) if state == "complete" => {
                    info!(url, "Page loaded");
                    return;
                }
                Ok(state) => trace!(?state, "Page still loading"),
                Err(e) => debug!(error = %e, "readyState probe failed"),
            }

            if Instant::now() >= deadline {
                warn!(
                    url,
                    timeout_ms = page_load.as_millis() as u64,
                    "Page did not finish loading, continuing"
                );
                return;
            }

            sleep(READY_STATE_POLL).await;
        }
    }
}

// ============================================================================
// Session - Scripts
// ============================================================================

impl Session {
    /// Evaluates an expression and returns its JSON value.
    ///
    /// Promises are awaited.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ScriptError`] if the expression throws.
    pub async fn evaluate(&self, expression: &str) -> Result<Value> {
        let value = self
            .send(Command::Runtime(RuntimeCommand::Evaluate {
                expression: expression.to_string(),
                return_by_value: true,
                await_promise: true,
                object_group: None,
            }))
            .await?;

        Ok(EvaluateResult::from_value(value)?.into_value())
    }

    /// Runs a function body in the page and returns its result.
    ///
    /// The body may use `return`, as in WebDriver's `executeScript`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ScriptError`] if the script throws.
    pub async fn execute_script(&self, script: &str) -> Result<Value> {
        self.evaluate(&format!("(function() {{\n{script}\n}})()"))
            .await
    }
}

// ============================================================================
// Session - Elements
// ============================================================================

impl Session {
    /// Returns the first element matching `by`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ElementNotFound`] if nothing matches.
    pub async fn find_element(&self, by: &By) -> Result<Element> {
        self.find_elements(by)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::element_not_found(by.to_string()))
    }

    /// Returns all elements matching `by` in document order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ScriptError`] if the locator is invalid.
    pub async fn find_elements(&self, by: &By) -> Result<Vec<Element>> {
        // Every handle from this lookup lives in one group, released when
        // the last returned element is dropped.
        let group = Arc::new(ObjectGroup::new(self.clone()));

        let value = self
            .send(Command::Runtime(RuntimeCommand::Evaluate {
                expression: by.to_js_query(),
                return_by_value: false,
                await_promise: false,
                object_group: Some(group.name().to_string()),
            }))
            .await?;

        let array = EvaluateResult::from_value(value)?;
        let Some(array_id) = array.object_id else {
            return Err(Error::protocol(format!(
                "Locator {by} did not evaluate to an array"
            )));
        };

        let properties = self
            .send(Command::Runtime(RuntimeCommand::GetProperties {
                object_id: array_id.clone(),
                own_properties: true,
            }))
            .await;

        if let Err(e) = self
            .send(Command::Runtime(RuntimeCommand::ReleaseObject {
                object_id: array_id,
            }))
            .await
        {
            trace!(error = %e, "Failed to release result array");
        }

        let properties: GetPropertiesResult = serde_json::from_value(properties?)?;
        let elements: Vec<Element> = properties
            .indexed_nodes()
            .into_iter()
            .map(|id| Element::new(id, Arc::clone(&group)))
            .collect();

        debug!(locator = %by, count = elements.len(), "Elements found");
        Ok(elements)
    }
}

// ============================================================================
// Session - Dialogs
// ============================================================================

impl Session {
    /// Returns the open native dialog, if any.
    #[must_use]
    pub fn dialog(&self) -> Option<Dialog> {
        self.inner.dialog.borrow().clone()
    }

    /// Accepts the open native dialog.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSuchAlert`] if no dialog is open.
    pub async fn accept_alert(&self) -> Result<()> {
        if self.dialog().is_none() {
            return Err(Error::NoSuchAlert);
        }

        match self
            .send(Command::Page(PageCommand::HandleJavaScriptDialog {
                accept: true,
                prompt_text: None,
            }))
            .await
        {
            Ok(_) => {}
            Err(Error::Cdp { ref message, .. }) if message.contains("No dialog") => {
                self.inner.dialog.send_replace(None);
                return Err(Error::NoSuchAlert);
            }
            Err(e) => return Err(e),
        }

        self.inner.dialog.send_replace(None);
        debug!("Dialog accepted");
        Ok(())
    }

    /// Subscribes to dialog state changes.
    pub(crate) fn watch_dialog(&self) -> watch::Receiver<Option<Dialog>> {
        self.inner.dialog.subscribe()
    }
}

// ============================================================================
// Session - Lifecycle
// ============================================================================

impl Session {
    /// Closes the browser and kills the Chrome process.
    ///
    /// Safe to call more than once; later calls do nothing.
    ///
    /// # Errors
    ///
    /// This operation does not currently fail; the `Result` is kept for
    /// parity with the rest of the session API.
    pub async fn quit(&self) -> Result<()> {
        if self.inner.closed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        debug!(target_id = %self.inner.target_id, "Closing session");

        let request = Request::new(Command::Browser(BrowserCommand::Close));
        if let Err(e) = self
            .inner
            .connection
            .send_with_timeout(request, BROWSER_CLOSE_TIMEOUT)
            .await
        {
            debug!(error = %e, "Browser.close did not complete");
        }

        self.inner.connection.shutdown();
        self.inner.process.lock().await.kill().await;

        info!(target_id = %self.inner.target_id, "Session closed");
        Ok(())
    }
}

// ============================================================================
// Session - Internal
// ============================================================================

impl Session {
    /// Sends a command to the page session and returns its result.
    pub(crate) async fn send(&self, command: Command) -> Result<Value> {
        if self.is_closed() {
            return Err(Error::ConnectionClosed);
        }

        let request = Request::for_session(self.inner.cdp_session.clone(), command);
        self.inner
            .connection
            .send_with_timeout(request, self.inner.timeouts.script)
            .await?
            .into_result()
    }

    /// Sends a browser-level command.
    async fn send_browser(
        connection: &Connection,
        command: Command,
        timeout: Duration,
    ) -> Result<Value> {
        connection
            .send_with_timeout(Request::new(command), timeout)
            .await?
            .into_result()
    }
}

// ============================================================================
// BrowserSession
// ============================================================================

#[async_trait]
impl BrowserSession for Session {
    type Element = Element;

    async fn navigate(&self, url: &str) -> Result<()> {
        self.goto(url).await
    }

    async fn current_url(&self) -> Result<String> {
        Session::current_url(self).await
    }

    async fn find_element(&self, by: &By) -> Result<Element> {
        Session::find_element(self, by).await
    }

    async fn find_elements(&self, by: &By) -> Result<Vec<Element>> {
        Session::find_elements(self, by).await
    }

    async fn execute_script(&self, script: &str) -> Result<Value> {
        Session::execute_script(self, script).await
    }

    async fn pending_alert(&self) -> Result<Option<String>> {
        Ok(self.dialog().map(|dialog| dialog.message))
    }

    async fn accept_alert(&self) -> Result<()> {
        Session::accept_alert(self).await
    }

    async fn quit(&self) -> Result<()> {
        Session::quit(self).await
    }
}

// ============================================================================
// Tests
// ============================================================================
