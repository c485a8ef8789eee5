//! Fills and submits the practice form.
//!
//! Demonstrates:
//! - Launching Chrome from environment settings
//! - Binding the form page object
//! - Summarizing the tools list and submitting it as the message
//! - Reading the confirmation alert
//!
//! Usage:
//!   cargo run --example fill_form
//!   cargo run --example fill_form -- --headless
//!   cargo run --example fill_form -- --debug
//!
//! `FORM_URL` and `CHROME_BINARY` override the page and the browser.

mod common;

// ============================================================================
// Imports
// ============================================================================

use common::Args;
use resilient_webdriver::{
    AlertOutcome, FormFieldsPage, Result, RunConfig, Session, WaitPolicy,
};

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    let args = Args::parse();
    common::init_logging(args.debug);

    if let Err(e) = run(args).await {
        eprintln!("\n[ERROR] {e}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    println!("=== Form Fields ===\n");

    // ========================================================================
    // Setup
    // ========================================================================

    let config = RunConfig::from_env()?.with_headless(args.headless);
    println!("[Setup] Launching Chrome (headless={})...", config.headless);

    let session = config.driver_builder().build()?.launch().await?;
    println!("        ✓ Session attached (target={})\n", session.target_id());

    let outcome = fill(&session, &config).await;

    // ========================================================================
    // Teardown
    // ========================================================================

    session.quit().await?;
    println!("\n[Done] Browser closed");

    let outcome = outcome?;
    if outcome != AlertOutcome::Received("Message received!".to_string()) {
        eprintln!("[FAIL] Unexpected alert: {outcome}");
        std::process::exit(2);
    }

    Ok(())
}

async fn fill(session: &Session, config: &RunConfig) -> Result<AlertOutcome> {
    println!("[1] Opening {}...", config.form_url);
    session.goto(config.form_url.as_str()).await?;

    let page = FormFieldsPage::new(session)
        .await
        .with_policy(WaitPolicy::from_timeouts(&config.timeouts));

    println!("[2] Reading automation tools...");
    let summary = page.tools_summary().await;
    println!("    {summary}");

    println!("[3] Filling the form...");
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
        .await?;
    println!("    ✓ Fields filled");

    println!("[4] Submitting...");
    page.click_submit().await?;

    let outcome = page.alert_text().await;
    println!("    Alert: {outcome}");

    Ok(outcome)
}
