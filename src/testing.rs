//! In-memory page for exercising the interaction layer without Chrome.
//!
//! Nodes are matched by the exact [`By`] values they were registered
//! with; there is no selector engine.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use crate::browser::By;
use crate::error::{Error, Result};
use crate::identifiers::ElementId;
use crate::interact::{BrowserSession, ElementHandle};

pub(crate) type NodeId = usize;

// ============================================================================
// Node
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum NodeKind {
    Input,
    Checkbox,
    Radio,
    Select(Vec<String>),
    Button,
    Text,
}

/// A fake DOM node.
#[derive(Debug, Clone)]
pub(crate) struct Node {
    kind: NodeKind,
    matchers: Vec<By>,
    connected: bool,
    displayed: bool,
    enabled: bool,
    checked: bool,
    value: String,
    text: String,
    alert: Option<String>,
    events: Vec<&'static str>,
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            matchers: Vec::new(),
            connected: true,
            displayed: true,
            enabled: true,
            checked: false,
            value: String::new(),
            text: String::new(),
            alert: None,
            events: Vec::new(),
        }
    }

    pub(crate) fn input(value: &str) -> Self {
        Self {
            value: value.to_string(),
            ..Self::new(NodeKind::Input)
        }
    }

    pub(crate) fn checkbox(value: &str) -> Self {
        Self {
            value: value.to_string(),
            ..Self::new(NodeKind::Checkbox)
        }
    }

    pub(crate) fn radio(value: &str) -> Self {
        Self {
            value: value.to_string(),
            ..Self::new(NodeKind::Radio)
        }
    }

    pub(crate) fn select<const N: usize>(options: [&str; N]) -> Self {
        Self::new(NodeKind::Select(
            options.iter().map(ToString::to_string).collect(),
        ))
    }

    pub(crate) fn button() -> Self {
        Self::new(NodeKind::Button)
    }

    pub(crate) fn text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..Self::new(NodeKind::Text)
        }
    }

    pub(crate) fn matching(mut self, locators: impl IntoIterator<Item = By>) -> Self {
        self.matchers.extend(locators);
        self
    }

    pub(crate) fn hidden(mut self) -> Self {
        self.displayed = false;
        self
    }

    pub(crate) fn on_click_alert(mut self, message: &str) -> Self {
        self.alert = Some(message.to_string());
        self
    }
}

// ============================================================================
// MockSession
// ============================================================================

#[derive(Debug, Default)]
struct Page {
    url: String,
    nodes: Vec<Node>,
    alert: Option<String>,
    find_elements_calls: usize,
}

impl Page {
    fn live(&self, by: &By) -> impl Iterator<Item = NodeId> + '_ {
        let by = by.clone();
        self.nodes
            .iter()
            .enumerate()
            .filter(move |(_, node)| node.connected && node.matchers.contains(&by))
            .map(|(id, _)| id)
    }
}

/// A [`BrowserSession`] over an in-memory page.
#[derive(Debug, Clone, Default)]
pub(crate) struct MockSession {
    page: Arc<Mutex<Page>>,
}

impl MockSession {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_url(url: &str) -> Self {
        let session = Self::new();
        session.page.lock().url = url.to_string();
        session
    }

    pub(crate) fn add(&self, node: Node) -> NodeId {
        let mut page = self.page.lock();
        page.nodes.push(node);
        page.nodes.len() - 1
    }

    pub(crate) fn handle(&self, node: NodeId) -> MockElement {
        MockElement {
            id: ElementId::new(format!("mock-{node}")),
            node,
            page: Arc::clone(&self.page),
        }
    }

    /// Removes a node from the document; existing handles go stale.
    pub(crate) fn detach(&self, node: NodeId) {
        self.page.lock().nodes[node].connected = false;
    }

    /// Replaces a node with a fresh copy, as a framework re-render would.
    pub(crate) fn rerender(&self, node: NodeId) -> NodeId {
        let mut page = self.page.lock();
        let mut copy = page.nodes[node].clone();
        copy.events.clear();
        page.nodes[node].connected = false;
        page.nodes.push(copy);
        page.nodes.len() - 1
    }

    pub(crate) fn value_of(&self, node: NodeId) -> String {
        self.page.lock().nodes[node].value.clone()
    }

    pub(crate) fn is_checked(&self, node: NodeId) -> bool {
        self.page.lock().nodes[node].checked
    }

    pub(crate) fn events_of(&self, node: NodeId) -> Vec<&'static str> {
        self.page.lock().nodes[node].events.clone()
    }

    /// Number of `find_elements` calls so far.
    pub(crate) fn fallback_lookups(&self) -> usize {
        self.page.lock().find_elements_calls
    }
}

#[async_trait]
impl BrowserSession for MockSession {
    type Element = MockElement;

    async fn navigate(&self, url: &str) -> Result<()> {
        self.page.lock().url = url.to_string();
        Ok(())
    }

    async fn current_url(&self) -> Result<String> {
        Ok(self.page.lock().url.clone())
    }

    async fn find_element(&self, by: &By) -> Result<MockElement> {
        let first = self.page.lock().live(by).next();
        first
            .map(|node| self.handle(node))
            .ok_or_else(|| Error::element_not_found(by.to_string()))
    }

    async fn find_elements(&self, by: &By) -> Result<Vec<MockElement>> {
        let nodes: Vec<NodeId> = {
            let mut page = self.page.lock();
            page.find_elements_calls += 1;
            page.live(by).collect()
        };
        Ok(nodes.into_iter().map(|node| self.handle(node)).collect())
    }

    async fn execute_script(&self, _script: &str) -> Result<Value> {
        Ok(Value::Null)
    }

    async fn pending_alert(&self) -> Result<Option<String>> {
        Ok(self.page.lock().alert.clone())
    }

    async fn accept_alert(&self) -> Result<()> {
        self.page
            .lock()
            .alert
            .take()
            .map(drop)
            .ok_or(Error::NoSuchAlert)
    }

    async fn quit(&self) -> Result<()> {
        Ok(())
    }
}

// ============================================================================
// MockElement
// ============================================================================

/// Handle to a node of a [`MockSession`] page.
#[derive(Debug, Clone)]
pub(crate) struct MockElement {
    id: ElementId,
    node: NodeId,
    page: Arc<Mutex<Page>>,
}

impl MockElement {
    /// Runs `f` on the node, failing if it has been detached.
    fn with_page<T>(&self, f: impl FnOnce(&mut Page, NodeId) -> Result<T>) -> Result<T> {
        let mut page = self.page.lock();
        if !page.nodes[self.node].connected {
            return Err(Error::stale_element(self.id.clone()));
        }
        f(&mut page, self.node)
    }

    fn read<T>(&self, f: impl FnOnce(&Node) -> T) -> Result<T> {
        self.with_page(|page, node| Ok(f(&page.nodes[node])))
    }
}

#[async_trait]
impl ElementHandle for MockElement {
    fn id(&self) -> &ElementId {
        &self.id
    }

    async fn is_connected(&self) -> Result<bool> {
        Ok(self.page.lock().nodes[self.node].connected)
    }

    async fn is_displayed(&self) -> Result<bool> {
        self.read(|node| node.displayed)
    }

    async fn is_enabled(&self) -> Result<bool> {
        self.read(|node| node.enabled)
    }

    async fn is_checked(&self) -> Result<bool> {
        self.read(|node| node.checked)
    }

    async fn scroll_into_view(&self) -> Result<()> {
        self.with_page(|page, node| {
            page.nodes[node].events.push("scroll");
            Ok(())
        })
    }

    async fn script_click(&self) -> Result<()> {
        self.with_page(|page, node| {
            let target = &mut page.nodes[node];
            target.events.push("click");
            match target.kind {
                NodeKind::Checkbox => target.checked = !target.checked,
                NodeKind::Radio => target.checked = true,
                _ => {}
            }
            if let Some(message) = target.alert.clone() {
                page.alert = Some(message);
            }
            Ok(())
        })
    }

    async fn clear(&self) -> Result<()> {
        self.with_page(|page, node| {
            page.nodes[node].value.clear();
            Ok(())
        })
    }

    async fn type_text(&self, text: &str) -> Result<()> {
        self.with_page(|page, node| {
            page.nodes[node].value.push_str(text);
            Ok(())
        })
    }

    async fn select_by_value(&self, value: &str) -> Result<()> {
        self.with_page(|page, node| {
            let target = &mut page.nodes[node];
            let NodeKind::Select(options) = &target.kind else {
                return Err(Error::script_error("element is not a select"));
            };
            if !options.iter().any(|option| option == value) {
                return Err(Error::dropdown_value_not_found(value));
            }
            target.value = value.to_string();
            Ok(())
        })
    }

    async fn text(&self) -> Result<String> {
        self.read(|node| node.text.clone())
    }

    async fn value(&self) -> Result<String> {
        self.read(|node| node.value.clone())
    }
}
