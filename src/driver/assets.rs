//! Static pages used when launching and testing the driver.
//!
//! Chrome starts on [`START_PAGE`]. Self-contained test pages can be loaded
//! without a web server by encoding them with [`html_data_url`].

// ============================================================================
// Constants
// ============================================================================

/// First page Chrome opens; the page target is created separately.
pub const START_PAGE: &str = "about:blank";

// ============================================================================
// Public Functions
// ============================================================================

/// Encodes an HTML document as a `data:text/html` URL.
///
/// A `fragment` (without `#`) is appended unencoded, which lets a page
/// report a recognizable `location.href` such as `...#form-fields`.
#[must_use]
pub fn html_data_url(html: &str, fragment: Option<&str>) -> String {
    let mut url = format!("data:text/html;charset=utf-8,{}", urlencoding::encode(html));
    if let Some(fragment) = fragment {
        url.push('#');
        url.push_str(fragment);
    }
    url
}

// ============================================================================
// Tests
// ============================================================================
