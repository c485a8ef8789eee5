//! Result shapes of `Runtime` domain commands.

// ============================================================================
// Imports
// ============================================================================

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::identifiers::ElementId;

// ============================================================================
// RemoteObject
// ============================================================================

/// A JavaScript value held by the page.
///
/// Primitives come back by value; objects and DOM nodes carry an
/// `objectId` handle.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteObject {
    /// JavaScript type (`object`, `string`, `undefined`, ...).
    #[serde(rename = "type", default)]
    pub object_type: String,

    /// Object subtype (`node`, `array`, `null`, `error`, ...).
    #[serde(default)]
    pub subtype: Option<String>,

    /// Value for primitives or by-value results.
    #[serde(default)]
    pub value: Option<Value>,

    /// Handle for non-primitive objects.
    #[serde(default)]
    pub object_id: Option<ElementId>,

    /// String description of the object.
    #[serde(default)]
    pub description: Option<String>,
}

impl RemoteObject {
    /// Returns `true` if the object is a DOM node.
    #[inline]
    #[must_use]
    pub fn is_node(&self) -> bool {
        self.subtype.as_deref() == Some("node")
    }

    /// Returns the by-value payload, `null` when absent.
    #[inline]
    #[must_use]
    pub fn into_value(self) -> Value {
        self.value.unwrap_or(Value::Null)
    }
}

// ============================================================================
// Evaluation Results
// ============================================================================

/// Exception thrown by evaluated script.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionDetails {
    /// Short exception text, usually `Uncaught`.
    #[serde(default)]
    pub text: String,

    /// The thrown value.
    #[serde(default)]
    pub exception: Option<RemoteObject>,
}

impl ExceptionDetails {
    /// Returns the most descriptive message available.
    #[must_use]
    pub fn message(&self) -> String {
        self.exception
            .as_ref()
            .and_then(|e| e.description.clone())
            .unwrap_or_else(|| self.text.clone())
    }
}

/// Result of `Runtime.evaluate` and `Runtime.callFunctionOn`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateResult {
    /// The produced value.
    pub result: RemoteObject,

    /// Set when the script threw.
    #[serde(default)]
    pub exception_details: Option<ExceptionDetails>,
}

impl EvaluateResult {
    /// Parses a raw response value, turning thrown exceptions into errors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ScriptError`] if the script threw, or
    /// [`Error::Json`] if the value has an unexpected shape.
    pub fn from_value(value: Value) -> Result<RemoteObject> {
        let parsed: Self = serde_json::from_value(value)?;
        match parsed.exception_details {
            Some(details) => Err(Error::script_error(details.message())),
            None => Ok(parsed.result),
        }
    }
}

/// One entry of `Runtime.getProperties`.
#[derive(Debug, Clone, Deserialize)]
pub struct PropertyDescriptor {
    /// Property name.
    pub name: String,

    /// Property value, absent for accessors.
    #[serde(default)]
    pub value: Option<RemoteObject>,
}

/// Result of `Runtime.getProperties`.
#[derive(Debug, Clone, Deserialize)]
pub struct GetPropertiesResult {
    /// Properties of the object.
    pub result: Vec<PropertyDescriptor>,
}

impl GetPropertiesResult {
    /// Returns the node handles stored at array indices, in index order.
    #[must_use]
    pub fn indexed_nodes(self) -> Vec<ElementId> {
        let mut indexed: Vec<(usize, ElementId)> = self
            .result
            .into_iter()
            .filter_map(|prop| {
                let index = prop.name.parse::<usize>().ok()?;
                let value = prop.value?;
                if !value.is_node() {
                    return None;
                }
                Some((index, value.object_id?))
            })
            .collect();
        indexed.sort_by_key(|(index, _)| *index);
        indexed.into_iter().map(|(_, id)| id).collect()
    }
}

// ============================================================================
// Tests
// ============================================================================
