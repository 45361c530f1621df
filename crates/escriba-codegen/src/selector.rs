//! Locator-to-selector mapping per framework.
//!
//! | Locator | Playwright             | Selenium                  | Cypress        |
//! |---------|------------------------|---------------------------|----------------|
//! | label   | `label:has-text("V")`  | unresolved                | unresolved     |
//! | id      | `#V`                   | `By.id("V")`              | `#V`           |
//! | role    | `role=R[name="N"]`     | unresolved                | unresolved     |
//! | text    | `text=V`               | `By.xpath(contains text)` | `[data-cy="V"]`|
//! | css     | `V` verbatim           | `By.cssSelector("V")`     | `V` verbatim   |
//! | xpath   | `xpath=V`              | `By.xpath("V")`           | unresolved     |
//!
//! A locator the framework cannot express, a role locator with no accessible
//! name, or a locator whose value is empty (reachable through the external
//! JSON DSL) maps to an explicit unresolved marker. The step is still
//! rendered; dropping it silently would hide the gap from the reader.

use escriba::Locator;

use crate::options::Framework;

/// Marker emitted in place of a selector that could not be produced.
#[must_use]
pub fn unresolved_marker(reason: &str) -> String {
    format!("<unresolved: {reason}>")
}

/// Whether a selector string is an unresolved marker.
#[must_use]
pub fn is_unresolved(selector: &str) -> bool {
    selector.starts_with("<unresolved:")
}

/// Map a semantic locator to the framework's concrete selector string.
#[must_use]
pub fn to_selector(locator: &Locator, framework: Framework) -> String {
    if !locator.is_complete() {
        return unresolved_marker(&incomplete_reason(locator));
    }
    match framework {
        Framework::Playwright => playwright_selector(locator),
        Framework::Selenium => selenium_selector(locator),
        Framework::Cypress => cypress_selector(locator),
    }
}

fn incomplete_reason(locator: &Locator) -> String {
    match locator {
        Locator::Role { role, .. } => format!("role={role} locator has no accessible name"),
        Locator::Label { .. } => "label locator has no value".to_string(),
        Locator::Id { .. } => "id locator has no value".to_string(),
        Locator::Text { .. } => "text locator has no value".to_string(),
        Locator::Css { .. } => "css locator has no value".to_string(),
        Locator::XPath { .. } => "xpath locator has no value".to_string(),
    }
}

fn playwright_selector(locator: &Locator) -> String {
    match locator {
        Locator::Label { value } => format!(r#"label:has-text("{value}")"#),
        Locator::Id { value } => format!("#{value}"),
        Locator::Role { role, name } => {
            // is_complete() guarantees a non-empty name here.
            let name = name.as_deref().unwrap_or_default();
            format!(r#"role={role}[name="{name}"]"#)
        }
        Locator::Text { value } => format!("text={value}"),
        Locator::Css { value } => value.clone(),
        Locator::XPath { value } => format!("xpath={value}"),
    }
}

fn selenium_selector(locator: &Locator) -> String {
    match locator {
        Locator::Label { .. } => unresolved_marker("label locator not supported by selenium"),
        Locator::Id { value } => format!(r#"By.id("{value}")"#),
        Locator::Role { .. } => unresolved_marker("role locator not supported by selenium"),
        Locator::Text { value } => {
            format!(r#"By.xpath("//*[contains(text(), '{value}')]")"#)
        }
        Locator::Css { value } => format!(r#"By.cssSelector("{value}")"#),
        Locator::XPath { value } => format!(r#"By.xpath("{value}")"#),
    }
}

fn cypress_selector(locator: &Locator) -> String {
    match locator {
        Locator::Label { .. } => unresolved_marker("label locator not supported by cypress"),
        Locator::Id { value } => format!("#{value}"),
        Locator::Role { .. } => unresolved_marker("role locator not supported by cypress"),
        Locator::Text { value } => format!(r#"[data-cy="{value}"]"#),
        Locator::Css { value } => value.clone(),
        Locator::XPath { .. } => unresolved_marker("xpath locator not supported by cypress"),
    }
}
