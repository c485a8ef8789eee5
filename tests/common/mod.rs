//! Shared helpers for browser integration tests.
//!
//! Tests run against a local copy of the practice form served as a
//! `data:` URL, so only Chrome is required.

#![allow(dead_code)]

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use resilient_webdriver::{RunConfig, Session, WaitPolicy, html_data_url};
use tracing_subscriber::EnvFilter;

// ============================================================================
// Fixture Page
// ============================================================================

/// Fragment appended to the fixture URL so the page URL contains the
/// marker the page object waits for.
pub const FORM_FRAGMENT: &str = "form-fields";

/// Copy of the practice form: the same ids, names and list markup, with a
/// submit handler that alerts only when the name is filled.
pub const FORM_HTML: &str = r#"<!doctype html>
<html>
<head><meta charset="utf-8"><title>Form Fields</title></head>
<body>
<form id="feedbackForm">
  <label for="name-input">Name</label>
  <input id="name-input" name="name" type="text" placeholder="Name">

  <label for="password">Password</label>
  <input id="password" name="password" type="password">

  <p>What is your favorite drink?</p>
  <input type="checkbox" id="drink1" name="fav_drink" value="Water"><label for="drink1">Water</label>
  <input type="checkbox" id="drink2" name="fav_drink" value="Milk"><label for="drink2">Milk</label>
  <input type="checkbox" id="drink3" name="fav_drink" value="Coffee"><label for="drink3">Coffee</label>
  <input type="checkbox" id="drink4" name="fav_drink" value="Wine"><label for="drink4">Wine</label>

  <p>What is your favorite color?</p>
  <input type="radio" id="color1" name="fav_color" value="Red"><label for="color1">Red</label>
  <input type="radio" id="color2" name="fav_color" value="Blue"><label for="color2">Blue</label>
  <input type="radio" id="color3" name="fav_color" value="Yellow"><label for="color3">Yellow</label>

  <label for="automation">Do you like automation?</label>
  <select id="automation" name="automation">
    <option value="default">Choose</option>
    <option value="yes">Yes</option>
    <option value="no">No</option>
    <option value="undecided">Undecided</option>
  </select>

  <label>Automation tools</label>
  <ul>
    <li>Selenium</li>
    <li>Playwright</li>
    <li>Cypress</li>
    <li>Appium</li>
    <li>Katalon Studio</li>
  </ul>

  <label for="email">Email</label>
  <input id="email" name="email" type="email">

  <label for="message">Message</label>
  <textarea id="message" name="message"></textarea>

  <button id="submit-btn" type="submit">Submit</button>
</form>
<script>
  document.getElementById('feedbackForm').addEventListener('submit', function (event) {
    event.preventDefault();
    if (!document.querySelector("input[name='name']").value) return;
    alert('Message received!');
  });
</script>
</body>
</html>
"#;

/// Returns the fixture form as a `data:` URL.
pub fn form_url() -> String {
    html_data_url(FORM_HTML, Some(FORM_FRAGMENT))
}

/// Wait policy used against the fixture page.
pub fn policy() -> WaitPolicy {
    WaitPolicy::new().with_timeout(Duration::from_secs(5))
}

// ============================================================================
// Session Fixture
// ============================================================================

/// Owns a launched session for one test.
pub struct FormFixture {
    session: Session,
}

impl FormFixture {
    /// Launches headless Chrome and opens the fixture form.
    pub async fn fixture() -> anyhow::Result<Self> {
        Self::open(&form_url(), true).await
    }

    /// Launches Chrome with settings from the environment and opens `url`.
    pub async fn open(url: &str, headless: bool) -> anyhow::Result<Self> {
        init_logging();

        let config = RunConfig::from_env()?.with_headless(headless);
        let session = config.driver_builder().build()?.launch().await?;

        // Quit even when navigation fails.
        if let Err(e) = session.goto(url).await {
            session.quit().await?;
            return Err(e.into());
        }

        Ok(Self { session })
    }

    /// Returns the session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Quits the browser.
    pub async fn close(self) {
        if let Err(e) = self.session.quit().await {
            eprintln!("[teardown] quit failed: {e}");
        }
    }
}

// ============================================================================
// Logging
// ============================================================================

/// Installs a test subscriber once; later calls are ignored.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("resilient_webdriver=info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
