//! Page object for the practice "Form Fields" page.
//!
//! Every field is a [`FieldTarget`] resolved once in
//! [`FormFieldsPage::new`]. Actions return `Result<&Self>` so steps chain
//! with `?`:
//!
//! ```ignore
//! let page = FormFieldsPage::new(&session).await;
//! let summary = page.tools_summary().await;
//!
//! page.enter_name("Anna").await?
//!     .enter_password("secret").await?
//!     .select_drinks(["milk", "coffee"]).await?
//!     .enter_message(&summary).await?
//!     .click_submit().await?;
//!
//! assert_eq!(page.alert_text().await.to_string(), "Message received!");
//! ```

// ============================================================================
// Imports
// ============================================================================

use tracing::debug;

use crate::alert::{AlertGate, AlertOutcome};
use crate::browser::By;
use crate::error::{Error, Result};
use crate::interact::{
    Action, BrowserSession, FieldKind, FieldTarget, Locator, ResilientInteractor, WaitPolicy,
    poll_until,
};
use crate::summary::ToolsSummaryReader;

// ============================================================================
// Locators
// ============================================================================

/// Locator pairs for each field of the form.
pub mod locators {
    use super::{By, Locator};

    /// Text that the page URL must contain before the form is used.
    pub const URL_MARKER: &str = "form-fields";

    /// Name input.
    pub fn name() -> Locator {
        By::id("name-input").with_fallback(By::xpath("//input[@placeholder='Name' or @name='name']"))
    }

    /// Password input.
    pub fn password() -> Locator {
        By::id("password").with_fallback(By::xpath("//input[@type='password']"))
    }

    /// "Milk" checkbox.
    pub fn milk() -> Locator {
        By::css("input[value='Milk']").with_fallback(By::css("input[value='Milk']"))
    }

    /// "Coffee" checkbox.
    pub fn coffee() -> Locator {
        By::css("input[value='Coffee']").with_fallback(By::css("input[value='Coffee']"))
    }

    /// "Yellow" radio button.
    pub fn yellow() -> Locator {
        By::css("input[value='Yellow']").with_fallback(By::css("input[value='Yellow']"))
    }

    /// "Do you like automation?" dropdown.
    pub fn automation() -> Locator {
        By::id("automation").with_fallback(By::xpath(
            "//select[contains(@name, 'automation') or contains(@id, 'automation')]",
        ))
    }

    /// Email input.
    pub fn email() -> Locator {
        By::id("email").with_fallback(By::xpath("//input[@type='email']"))
    }

    /// Message textarea.
    pub fn message() -> Locator {
        By::id("message").with_fallback(By::xpath("//textarea[@id='message' or @name='message']"))
    }

    /// Submit button.
    pub fn submit() -> Locator {
        By::css("button[type='submit']").with_fallback(By::xpath("//button[contains(text(), 'Submit')]"))
    }

    /// Items of the "Automation tools" list.
    pub fn tools() -> Locator {
        By::xpath("//label[contains(text(), 'Automation tools')]/following-sibling::ul/li").with_fallback(
            By::xpath("//*[contains(text(), 'Automation tools')]//following-sibling::ul/li"),
        )
    }
}

// ============================================================================
// FormFieldsPage
// ============================================================================

/// The practice form, bound to one session.
#[derive(Debug)]
pub struct FormFieldsPage<'s, S: BrowserSession> {
    interactor: ResilientInteractor<'s, S>,
    name: FieldTarget<S::Element>,
    password: FieldTarget<S::Element>,
    milk: FieldTarget<S::Element>,
    coffee: FieldTarget<S::Element>,
    yellow: FieldTarget<S::Element>,
    automation: FieldTarget<S::Element>,
    email: FieldTarget<S::Element>,
    message: FieldTarget<S::Element>,
    submit: FieldTarget<S::Element>,
}

impl<'s, S: BrowserSession> FormFieldsPage<'s, S> {
    /// Resolves every field against the current page.
    pub async fn new(session: &'s S) -> Self {
        use locators as l;

        let page = Self {
            interactor: ResilientInteractor::new(session),
            name: FieldTarget::resolve(session, "name", FieldKind::TextInput, l::name()).await,
            password: FieldTarget::resolve(session, "password", FieldKind::TextInput, l::password())
                .await,
            milk: FieldTarget::resolve(session, "milk", FieldKind::Checkbox, l::milk()).await,
            coffee: FieldTarget::resolve(session, "coffee", FieldKind::Checkbox, l::coffee()).await,
            yellow: FieldTarget::resolve(session, "yellow", FieldKind::Radio, l::yellow()).await,
            automation: FieldTarget::resolve(session, "automation", FieldKind::Select, l::automation())
                .await,
            email: FieldTarget::resolve(session, "email", FieldKind::TextInput, l::email()).await,
            message: FieldTarget::resolve(session, "message", FieldKind::Textarea, l::message()).await,
            submit: FieldTarget::resolve(session, "submit", FieldKind::Button, l::submit()).await,
        };

        debug!("Form fields page bound");
        page
    }

    /// Replaces the wait policy for every step.
    #[must_use]
    pub fn with_policy(mut self, policy: WaitPolicy) -> Self {
        self.interactor = self.interactor.with_policy(policy);
        self
    }

    /// Waits for the form URL, then fills the name.
    pub async fn enter_name(&self, name: &str) -> Result<&Self> {
        self.wait_for_url().await?;
        self.perform(&self.name, Action::type_text(name)).await
    }

    /// Fills the password.
    pub async fn enter_password(&self, password: &str) -> Result<&Self> {
        self.perform(&self.password, Action::type_text(password)).await
    }

    /// Checks each known drink. Values other than "milk" and "coffee" are
    /// ignored.
    pub async fn select_drinks<I, T>(&self, drinks: I) -> Result<&Self>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        for drink in drinks {
            let drink = drink.as_ref();
            let target = if drink.eq_ignore_ascii_case("milk") {
                &self.milk
            } else if drink.eq_ignore_ascii_case("coffee") {
                &self.coffee
            } else {
                debug!(drink, "Ignoring unknown drink");
                continue;
            };
            self.perform(target, Action::Check).await?;
        }
        Ok(self)
    }

    /// Picks the color. Only "yellow" is known; anything else is ignored.
    pub async fn select_color(&self, color: &str) -> Result<&Self> {
        if !color.eq_ignore_ascii_case("yellow") {
            debug!(color, "Ignoring unknown color");
            return Ok(self);
        }
        self.perform(&self.yellow, Action::Check).await
    }

    /// Selects the automation dropdown option (lower-cased).
    pub async fn select_automation_option(&self, value: &str) -> Result<&Self> {
        self.perform(&self.automation, Action::select_by_value(value)).await
    }

    /// Fills the email.
    pub async fn enter_email(&self, email: &str) -> Result<&Self> {
        self.perform(&self.email, Action::type_text(email)).await
    }

    /// Fills the message.
    pub async fn enter_message(&self, message: &str) -> Result<&Self> {
        self.perform(&self.message, Action::type_text(message)).await
    }

    /// Clicks submit.
    pub async fn click_submit(&self) -> Result<&Self> {
        self.perform(&self.submit, Action::Click).await
    }

    /// Summarizes the "Automation tools" list.
    pub async fn tools_summary(&self) -> String {
        let tools = locators::tools();
        ToolsSummaryReader::new(self.interactor.session(), tools.primary, tools.fallback)
            .with_policy(*self.interactor.policy())
            .read()
            .await
    }

    /// Waits for the submission alert and accepts it.
    pub async fn alert_text(&self) -> AlertOutcome {
        let policy = self.interactor.policy();
        AlertGate::new(self.interactor.session())
            .with_poll_interval(policy.poll_interval)
            .read_and_dismiss(policy.timeout)
            .await
    }

    async fn perform(&self, target: &FieldTarget<S::Element>, action: Action) -> Result<&Self> {
        self.interactor.perform(target, &action).await?;
        Ok(self)
    }

    async fn wait_for_url(&self) -> Result<()> {
        let session = self.interactor.session();
        let what = format!("URL to contain '{}'", locators::URL_MARKER);

        poll_until(self.interactor.policy(), &what, move || async move {
            let url = session.current_url().await?;
            Ok::<_, Error>(url.contains(locators::URL_MARKER).then_some(()))
        })
        .await
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    use crate::testing::{MockSession, Node, NodeId};

    struct Form {
        session: MockSession,
        name: NodeId,
        password: NodeId,
        milk: NodeId,
        coffee: NodeId,
        yellow: NodeId,
        automation: NodeId,
        email: NodeId,
        message: NodeId,
        submit: NodeId,
    }

    fn fast() -> WaitPolicy {
        WaitPolicy::new()
            .with_timeout(Duration::from_millis(150))
            .with_poll_interval(Duration::from_millis(10))
    }

    fn both(locator: Locator) -> [By; 2] {
        [locator.primary, locator.fallback]
    }

    fn form() -> Form {
        let session = MockSession::with_url("https://practice-automation.com/form-fields/");
        let form = Form {
            name: session.add(Node::input("").matching(both(locators::name()))),
            password: session.add(Node::input("").matching(both(locators::password()))),
            milk: session.add(Node::checkbox("Milk").matching(both(locators::milk()))),
            coffee: session.add(Node::checkbox("Coffee").matching(both(locators::coffee()))),
            yellow: session.add(Node::radio("Yellow").matching(both(locators::yellow()))),
            automation: session.add(
                Node::select(["default", "yes", "no", "undecided"]).matching(both(locators::automation())),
            ),
            email: session.add(Node::input("").matching(both(locators::email()))),
            message: session.add(Node::input("").matching(both(locators::message()))),
            submit: session.add(
                Node::button()
                    .matching(both(locators::submit()))
                    .on_click_alert("Message received!"),
            ),
            session,
        };
        for tool in ["Selenium", "Playwright", "Cypress", "Appium", "Katalon Studio"] {
            form.session
                .add(Node::text(tool).matching(both(locators::tools())));
        }
        form
    }

    #[tokio::test]
    async fn test_full_form() {
        let f = form();
        let page = FormFieldsPage::new(&f.session).await.with_policy(fast());

        let summary = page.tools_summary().await;
        assert_eq!(summary, "5 items, longest: Katalon Studio");

        page.enter_name("Anna")
            .await
            .expect("name")
            .enter_password("mTZlqn37&#")
            .await
            .expect("password")
            .select_drinks(["milk", "coffee"])
            .await
            .expect("drinks")
            .select_color("yellow")
            .await
            .expect("color")
            .select_automation_option("yes")
            .await
            .expect("automation")
            .enter_email("tsybizova.anya@mail.ru")
            .await
            .expect("email")
            .enter_message(&summary)
            .await
            .expect("message")
            .click_submit()
            .await
            .expect("submit");

        assert_eq!(f.session.value_of(f.name), "Anna");
        assert_eq!(f.session.value_of(f.password), "mTZlqn37&#");
        assert!(f.session.is_checked(f.milk));
        assert!(f.session.is_checked(f.coffee));
        assert!(f.session.is_checked(f.yellow));
        assert_eq!(f.session.value_of(f.automation), "yes");
        assert_eq!(f.session.value_of(f.email), "tsybizova.anya@mail.ru");
        assert_eq!(f.session.value_of(f.message), summary);
        assert_eq!(f.session.events_of(f.submit), ["scroll", "click"]);

        assert_eq!(page.alert_text().await.to_string(), "Message received!");
    }

    #[tokio::test]
    async fn test_full_form_through_fallbacks() {
        let f = form();
        let page = FormFieldsPage::new(&f.session).await.with_policy(fast());

        let fresh: Vec<NodeId> = [
            f.name, f.password, f.milk, f.coffee, f.yellow, f.automation, f.email, f.message,
            f.submit,
        ]
        .into_iter()
        .map(|node| f.session.rerender(node))
        .collect();

        page.enter_name("Anna").await.expect("name");
        page.enter_password("mTZlqn37&#").await.expect("password");
        page.select_drinks(["Milk", "COFFEE"]).await.expect("drinks");
        page.select_color("Yellow").await.expect("color");
        page.select_automation_option("Yes").await.expect("automation");
        page.enter_email("tsybizova.anya@mail.ru").await.expect("email");
        page.enter_message("3 items, longest: ccc").await.expect("message");
        page.click_submit().await.expect("submit");

        assert_eq!(f.session.value_of(fresh[0]), "Anna");
        assert_eq!(f.session.value_of(fresh[1]), "mTZlqn37&#");
        assert!(f.session.is_checked(fresh[2]));
        assert!(f.session.is_checked(fresh[3]));
        assert!(f.session.is_checked(fresh[4]));
        assert_eq!(f.session.value_of(fresh[5]), "yes");
        assert_eq!(f.session.value_of(fresh[6]), "tsybizova.anya@mail.ru");
        assert_eq!(f.session.value_of(fresh[7]), "3 items, longest: ccc");
        assert_eq!(page.alert_text().await.text(), Some("Message received!"));
    }

    #[tokio::test]
    async fn test_select_milk_twice_stays_checked() {
        let f = form();
        let page = FormFieldsPage::new(&f.session).await.with_policy(fast());

        page.select_drinks(["milk"]).await.expect("first");
        page.select_drinks(["milk"]).await.expect("second");

        assert!(f.session.is_checked(f.milk));
        assert_eq!(f.session.events_of(f.milk), ["scroll", "click"]);
    }

    #[tokio::test]
    async fn test_unknown_values_are_no_ops() {
        let f = form();
        let page = FormFieldsPage::new(&f.session).await.with_policy(fast());

        page.select_color("red").await.expect("red ignored");
        page.select_drinks(["tea", "juice"]).await.expect("drinks ignored");

        assert!(!f.session.is_checked(f.yellow));
        assert!(f.session.events_of(f.yellow).is_empty());
        assert!(!f.session.is_checked(f.milk));
        assert!(!f.session.is_checked(f.coffee));
    }

    #[tokio::test]
    async fn test_empty_form_submit_has_no_alert() {
        let session = MockSession::with_url("https://practice-automation.com/form-fields/");
        session.add(Node::button().matching(both(locators::submit())));
        let page = FormFieldsPage::new(&session).await.with_policy(fast());

        page.click_submit().await.expect("submit");

        assert_eq!(page.alert_text().await, AlertOutcome::NotFound);
    }

    #[tokio::test]
    async fn test_enter_name_waits_for_url() {
        let session = MockSession::with_url("https://example.com/");
        session.add(Node::input("").matching(both(locators::name())));
        let page = FormFieldsPage::new(&session).await.with_policy(fast());

        let err = page.enter_name("Anna").await.unwrap_err();
        assert!(err.is_timeout());
    }

    #[tokio::test]
    async fn test_unknown_dropdown_value_fails() {
        let f = form();
        let page = FormFieldsPage::new(&f.session).await.with_policy(fast());

        let err = page.select_automation_option("maybe").await.unwrap_err();
        assert!(matches!(err, Error::DropdownValueNotFound { .. }));
    }
}
