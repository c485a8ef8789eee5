//! End-to-end form tests against a real Chrome.
//!
//! Run with `cargo test -- --ignored`.

mod common;

// ============================================================================
// Imports
// ============================================================================

use resilient_webdriver::{AlertOutcome, FormFieldsPage, Result, Session};
use serde_json::Value;

use common::FormFixture;

// ============================================================================
// Scenarios
// ============================================================================

/// Fills every field with the reference data and submits.
async fn fill_and_submit(session: &Session) -> Result<(String, AlertOutcome)> {
    let page = FormFieldsPage::new(session).await.with_policy(common::policy());
    let summary = page.tools_summary().await;

    page.enter_name("Anna")
        .await?
        .enter_password("mTZlqn37&#")
        .await?
        .select_drinks(["milk", "coffee"])
        .await?
        .select_color("yellow")
        .await?
        .select_automation_option("yes")
        .await?
        .enter_email("tsybizova.anya@mail.ru")
        .await?
        .enter_message(&summary)
        .await?
        .click_submit()
        .await?;

    Ok((summary, page.alert_text().await))
}

async fn read_string(session: &Session, script: &str) -> Result<String> {
    let value = session.execute_script(script).await?;
    Ok(value.as_str().unwrap_or_default().to_string())
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
#[ignore = "requires a local Chrome installation"]
async fn test_complete_form_submission() -> anyhow::Result<()> {
    let fixture = FormFixture::fixture().await?;
    let result = fill_and_submit(fixture.session()).await;
    fixture.close().await;

    let (summary, alert) = result?;
    assert_eq!(summary, "5 items, longest: Katalon Studio");
    assert_eq!(alert.to_string(), "Message received!");
    Ok(())
}

#[tokio::test]
#[ignore = "requires a local Chrome installation"]
async fn test_empty_form_submission_has_no_alert() -> anyhow::Result<()> {
    let fixture = FormFixture::fixture().await?;

    let result = async {
        let page = FormFieldsPage::new(fixture.session())
            .await
            .with_policy(common::policy());
        page.click_submit().await?;
        Ok::<_, resilient_webdriver::Error>(page.alert_text().await)
    }
    .await;
    fixture.close().await;

    assert_eq!(result?, AlertOutcome::NotFound);
    Ok(())
}

#[tokio::test]
#[ignore = "requires a local Chrome installation"]
async fn test_rerendered_fields_use_fallback() -> anyhow::Result<()> {
    let fixture = FormFixture::fixture().await?;
    let session = fixture.session();

    let result = async {
        let page = FormFieldsPage::new(session).await.with_policy(common::policy());

        // Replace fields after the page object bound them. The new name
        // input has no id, so only the fallback XPath can find it.
        session
            .execute_script(
                "const email = document.getElementById('email');\n\
                 email.replaceWith(email.cloneNode(true));\n\
                 const name = document.getElementById('name-input');\n\
                 const fresh = document.createElement('input');\n\
                 fresh.type = 'text';\n\
                 fresh.name = 'name';\n\
                 fresh.placeholder = 'Name';\n\
                 name.replaceWith(fresh);",
            )
            .await?;

        page.enter_name("Anna").await?;
        page.enter_email("tsybizova.anya@mail.ru").await?;
        page.select_drinks(["Milk"]).await?;
        page.select_drinks(["milk"]).await?;

        let name = read_string(session, "return document.querySelector(\"input[name='name']\").value;").await?;
        let email = read_string(session, "return document.getElementById('email').value;").await?;
        let milk = session
            .execute_script("return document.querySelector(\"input[value='Milk']\").checked;")
            .await?;

        Ok::<_, resilient_webdriver::Error>((name, email, milk))
    }
    .await;
    fixture.close().await;

    let (name, email, milk) = result?;
    assert_eq!(name, "Anna");
    assert_eq!(email, "tsybizova.anya@mail.ru");
    assert_eq!(milk, Value::Bool(true));
    Ok(())
}

#[tokio::test]
#[ignore = "requires a local Chrome installation"]
async fn test_unknown_color_leaves_radios_untouched() -> anyhow::Result<()> {
    let fixture = FormFixture::fixture().await?;
    let session = fixture.session();

    let result = async {
        let page = FormFieldsPage::new(session).await.with_policy(common::policy());
        page.select_color("red").await?;
        session
            .execute_script("return document.querySelectorAll(\"input[name='fav_color']:checked\").length;")
            .await
    }
    .await;
    fixture.close().await;

    assert_eq!(result?, Value::from(0));
    Ok(())
}

#[tokio::test]
#[ignore = "requires Chrome and network access"]
async fn test_live_practice_form() -> anyhow::Result<()> {
    let config = resilient_webdriver::RunConfig::from_env()?;
    let fixture = FormFixture::open(config.form_url.as_str(), config.headless).await?;
    let result = fill_and_submit(fixture.session()).await;
    fixture.close().await;

    let (_, alert) = result?;
    assert_eq!(alert, AlertOutcome::Received("Message received!".to_string()));
    Ok(())
}
