//! The TestCase aggregate and its JSON/YAML document form.

use serde::{Deserialize, Serialize};

use crate::error::EscribaResult;
use crate::step::TestStep;

/// An ordered browser test: metadata plus steps.
///
/// This is the stable intermediate representation. Its serde output is the
/// JSON DSL consumed by renderers, executors and external tools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    /// Deterministic name derived from the description
    pub name: String,
    /// Base URL relative paths resolve against
    pub base_url: String,
    /// The original free-text description
    pub description: String,
    /// Free-form tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Ordered steps
    pub steps: Vec<TestStep>,
}

impl TestCase {
    /// Create a test case, deriving the name from the description.
    #[must_use]
    pub fn new(description: impl Into<String>, base_url: impl Into<String>) -> Self {
        let description = description.into();
        Self {
            name: derive_name(&description),
            base_url: base_url.into(),
            description,
            tags: Vec::new(),
            steps: Vec::new(),
        }
    }

    /// Append a step.
    pub fn push(&mut self, step: TestStep) {
        self.steps.push(step);
    }

    /// Add a tag.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Serialize to the JSON DSL (pretty-printed).
    pub fn to_json(&self) -> EscribaResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from the JSON DSL.
    pub fn from_json(json: &str) -> EscribaResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> EscribaResult<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Parse from YAML.
    pub fn from_yaml(yaml: &str) -> EscribaResult<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// One-line descriptions of all steps, in order.
    #[must_use]
    pub fn resolved_steps(&self) -> Vec<String> {
        self.steps.iter().map(TestStep::describe).collect()
    }
}

/// Derive a test name from free text: lowercase, strip non-alphanumerics,
/// spaces become underscores. Deterministic by construction.
#[must_use]
pub fn derive_name(description: &str) -> String {
    let mut name = String::with_capacity(description.len());
    let mut last_was_sep = true;
    for ch in description.chars() {
        if ch.is_ascii_alphanumeric() {
            name.push(ch.to_ascii_lowercase());
            last_was_sep = false;
        } else if (ch == ' ' || ch == '_' || ch == '-') && !last_was_sep {
            name.push('_');
            last_was_sep = true;
        }
        // All other characters are stripped.
    }
    let trimmed = name.trim_end_matches('_');
    if trimmed.is_empty() {
        "unnamed_test".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::Locator;

    #[test]
    fn derive_name_basic() {
        assert_eq!(
            derive_name("Try to login with username Sam"),
            "try_to_login_with_username_sam"
        );
    }

    #[test]
    fn derive_name_strips_punctuation() {
        assert_eq!(
            derive_name("login, then click \"Submit\"!"),
            "login_then_click_submit"
        );
    }

    #[test]
    fn derive_name_collapses_separators() {
        assert_eq!(derive_name("a   b -- c"), "a_b_c");
    }

    #[test]
    fn derive_name_empty_input() {
        assert_eq!(derive_name("!!!"), "unnamed_test");
    }

    #[test]
    fn json_round_trip() {
        let mut tc = TestCase::new("login test", "https://example.com");
        tc.push(TestStep::Goto {
            target: "/login".to_string(),
        });
        tc.push(TestStep::Fill {
            locator: Locator::label("Username"),
            text: "Sam".to_string(),
        });

        let json = tc.to_json().unwrap();
        let back = TestCase::from_json(&json).unwrap();
        assert_eq!(back, tc);
    }

    #[test]
    fn yaml_round_trip() {
        let mut tc = TestCase::new("login test", "https://example.com");
        tc.push(TestStep::Click {
            locator: Locator::role("button", "Login"),
        });
        let yaml = tc.to_yaml().unwrap();
        let back = TestCase::from_yaml(&yaml).unwrap();
        assert_eq!(back, tc);
    }

    #[test]
    fn resolved_steps_in_order() {
        let mut tc = TestCase::new("x", "https://example.com");
        tc.push(TestStep::Goto {
            target: "/".to_string(),
        });
        tc.push(TestStep::Click {
            locator: Locator::id("go"),
        });
        let steps = tc.resolved_steps();
        assert_eq!(steps, vec!["goto /", "click id=go"]);
    }

    #[test]
    fn tags_omitted_when_empty() {
        let tc = TestCase::new("x", "https://example.com");
        let json = tc.to_json().unwrap();
        assert!(!json.contains("tags"));
    }
}
