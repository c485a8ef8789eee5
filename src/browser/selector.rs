//! Element locator strategies.
//!
//! Provides Selenium-like `By` selectors for finding elements. Every
//! strategy compiles to a JavaScript expression evaluating to an array of
//! elements in document order.
//!
//! # Example
//!
//! ```ignore
//! use resilient_webdriver::By;
//!
//! // By ID
//! let name = session.find_element(&By::id("name-input")).await?;
//!
//! // CSS selector
//! let milk = session.find_element(&By::css("input[value='Milk']")).await?;
//!
//! // XPath
//! let submit = session.find_element(&By::xpath("//button[contains(text(), 'Submit')]")).await?;
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// By Enum
// ============================================================================

/// Element locator strategy (like Selenium's `By`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "strategy", content = "value")]
pub enum By {
    /// CSS selector.
    ///
    /// # Example
    /// ```ignore
    /// By::css("button[type='submit']")
    /// ```
    #[serde(rename = "css")]
    Css(String),

    /// XPath expression. Only element nodes are returned.
    ///
    /// # Example
    /// ```ignore
    /// By::xpath("//input[@type='password']")
    /// ```
    #[serde(rename = "xpath")]
    XPath(String),

    /// Element ID.
    #[serde(rename = "id")]
    Id(String),

    /// `name` attribute.
    #[serde(rename = "name")]
    Name(String),

    /// Tag name.
    #[serde(rename = "tag")]
    Tag(String),

    /// Class name (single class).
    #[serde(rename = "class")]
    Class(String),
}

impl By {
    /// Creates a CSS selector.
    #[inline]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Creates an XPath selector.
    #[inline]
    pub fn xpath(expr: impl Into<String>) -> Self {
        Self::XPath(expr.into())
    }

    /// Creates an ID selector.
    #[inline]
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    /// Creates a name attribute selector.
    #[inline]
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// Creates a tag name selector.
    #[inline]
    pub fn tag(tag: impl Into<String>) -> Self {
        Self::Tag(tag.into())
    }

    /// Creates a class name selector.
    #[inline]
    pub fn class(class: impl Into<String>) -> Self {
        Self::Class(class.into())
    }

    /// Returns the strategy name.
    #[must_use]
    pub fn strategy(&self) -> &'static str {
        match self {
            Self::Css(_) => "css",
            Self::XPath(_) => "xpath",
            Self::Id(_) => "id",
            Self::Name(_) => "name",
            Self::Tag(_) => "tag",
            Self::Class(_) => "class",
        }
    }

    /// Returns the selector value.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Css(v)
            | Self::XPath(v)
            | Self::Id(v)
            | Self::Name(v)
            | Self::Tag(v)
            | Self::Class(v) => v,
        }
    }

    /// Returns a JavaScript expression evaluating to the matching elements.
    #[must_use]
    pub fn to_js_query(&self) -> String {
        // JSON string literals are valid JavaScript string literals
        let literal = Value::from(self.value()).to_string();

        match self {
            Self::Css(_) => format!("Array.from(document.querySelectorAll({literal}))"),
            Self::Id(_) => {
                format!("Array.from(document.querySelectorAll('#' + CSS.escape({literal})))")
            }
            Self::Name(_) => format!("Array.from(document.getElementsByName({literal}))"),
            Self::Tag(_) => format!("Array.from(document.getElementsByTagName({literal}))"),
            Self::Class(_) => format!("Array.from(document.getElementsByClassName({literal}))"),
            Self::XPath(_) => format!(
                "(() => {{ \
                    const snapshot = document.evaluate({literal}, document, null, \
                        XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null); \
                    const found = []; \
                    for (let i = 0; i < snapshot.snapshotLength; i++) {{ \
                        const node = snapshot.snapshotItem(i); \
                        if (node.nodeType === Node.ELEMENT_NODE) found.push(node); \
                    }} \
                    return found; \
                }})()"
            ),
        }
    }
}

impl fmt::Display for By {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.strategy(), self.value())
    }
}

// ============================================================================
// From implementations for ergonomics
// ============================================================================

impl From<&str> for By {
    /// Converts a string to CSS selector (default).
    fn from(s: &str) -> Self {
        Self::Css(s.to_string())
    }
}

impl From<String> for By {
    /// Converts a string to CSS selector (default).
    fn from(s: String) -> Self {
        Self::Css(s)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_css() {
        let by = By::css("input[value='Milk']");
        assert_eq!(by.strategy(), "css");
        assert_eq!(by.value(), "input[value='Milk']");
        assert_eq!(by.to_string(), "css:input[value='Milk']");
    }

    #[test]
    fn test_by_id_query_escapes() {
        let query = By::id("name-input").to_js_query();
        assert!(query.contains("CSS.escape(\"name-input\")"));
    }

    #[test]
    fn test_xpath_query_quotes_value() {
        let by = By::xpath("//input[@placeholder='Name' or @name=\"name\"]");
        let query = by.to_js_query();

        assert!(query.contains("document.evaluate(\"//input[@placeholder='Name' or @name=\\\"name\\\"]\""));
        assert!(query.contains("ORDERED_NODE_SNAPSHOT_TYPE"));
    }

    #[test]
    fn test_other_queries() {
        assert!(By::name("q").to_js_query().contains("getElementsByName(\"q\")"));
        assert!(By::tag("li").to_js_query().contains("getElementsByTagName(\"li\")"));
        assert!(By::class("btn").to_js_query().contains("getElementsByClassName(\"btn\")"));
    }

    #[test]
    fn test_from_str() {
        let by: By = "#login".into();
        assert!(matches!(by, By::Css(_)));
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_value(By::id("email")).expect("serialize");
        assert_eq!(json["strategy"], "id");
        assert_eq!(json["value"], "email");
    }
}
