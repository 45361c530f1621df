//! Instruction-to-step resolution.
//!
//! The resolver turns an instruction plus its [`ExtractedValues`] into an
//! ordered [`TestCase`]. Rules fire in a fixed order (navigate, fills, click,
//! assert) and the output is fully determined by its inputs: same text and
//! base URL, same steps, byte for byte.

use tracing::debug;

use crate::error::{EscribaError, EscribaResult};
use crate::extract::{ExtractedValues, Field};
use crate::locator::Locator;
use crate::step::{not_specified_marker, AssertionKind, TestStep};
use crate::testcase::TestCase;

/// Keyword lookup tables driving navigation and button naming.
///
/// Ordered `(keyword, result)` pairs; the first keyword found in the
/// instruction wins. Passed into the resolver explicitly so tests and
/// localized deployments can substitute their own tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverTables {
    /// keyword -> navigation path
    pub path_rules: Vec<(String, String)>,
    /// keyword -> accessible button name
    pub button_rules: Vec<(String, String)>,
}

impl Default for ResolverTables {
    fn default() -> Self {
        fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
            raw.iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect()
        }
        Self {
            path_rules: pairs(&[
                ("register", "/register"),
                ("sign up", "/register"),
                ("login", "/login"),
                ("log in", "/login"),
                ("sign in", "/login"),
                ("dashboard", "/dashboard"),
                ("settings", "/settings"),
                ("profile", "/profile"),
                ("checkout", "/checkout"),
                ("search", "/search"),
            ]),
            button_rules: pairs(&[
                ("register", "Register"),
                ("sign up", "Sign Up"),
                ("sign in", "Sign In"),
                ("login", "Login"),
                ("log in", "Login"),
                ("submit", "Submit"),
                ("save", "Save"),
                ("search", "Search"),
            ]),
        }
    }
}

impl ResolverTables {
    fn lookup<'a>(rules: &'a [(String, String)], text: &str) -> Option<&'a str> {
        rules
            .iter()
            .find(|(keyword, _)| text.contains(keyword.as_str()))
            .map(|(_, result)| result.as_str())
    }
}

/// Whether missing values become explicit markers or canned demo defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strictness {
    /// Missing credentials render as "not specified" markers
    #[default]
    Strict,
    /// Missing credentials fall back to `testuser` / `password123`
    Legacy,
}

/// Demo username substituted under [`Strictness::Legacy`].
pub const LEGACY_USERNAME: &str = "testuser";
/// Demo password substituted under [`Strictness::Legacy`].
pub const LEGACY_PASSWORD: &str = "password123";

/// Resolves instruction text into an ordered TestCase.
#[derive(Debug, Clone, Default)]
pub struct StepResolver {
    tables: ResolverTables,
    strictness: Strictness,
}

impl StepResolver {
    /// Strict resolver with the default keyword tables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Legacy resolver (canned demo credentials for missing values).
    #[must_use]
    pub fn legacy() -> Self {
        Self {
            tables: ResolverTables::default(),
            strictness: Strictness::Legacy,
        }
    }

    /// Replace the keyword tables.
    #[must_use]
    pub fn with_tables(mut self, tables: ResolverTables) -> Self {
        self.tables = tables;
        self
    }

    /// Replace the strictness mode.
    #[must_use]
    pub fn with_strictness(mut self, strictness: Strictness) -> Self {
        self.strictness = strictness;
        self
    }

    /// Resolve an instruction into a TestCase.
    ///
    /// Rules fire in fixed order: one navigation step, credential fills
    /// (username then password), at most one click, at most one assertion.
    pub fn resolve(
        &self,
        text: &str,
        values: &ExtractedValues,
        base_url: &str,
    ) -> EscribaResult<TestCase> {
        if text.trim().is_empty() {
            return Err(EscribaError::EmptyInstruction);
        }
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(EscribaError::invalid_base_url(
                base_url,
                "expected an http(s) URL",
            ));
        }

        let lowered = text.to_lowercase();
        let mut case = TestCase::new(text, base_url);

        let target = self.navigation_target(&lowered, values);
        debug!(target = %target, "resolved navigation");
        case.push(TestStep::Goto { target });

        if wants_credentials(&lowered, values) {
            case.push(self.credential_fill("Username", values.get(Field::Username)));
            case.push(self.credential_fill("Password", values.get(Field::Password)));
        }

        if let Some(name) = self.button_name(&lowered, values) {
            debug!(button = %name, "resolved click");
            case.push(TestStep::Click {
                locator: Locator::role("button", name),
            });
        }

        if let Some(step) = assertion_for(&lowered, values) {
            debug!(step = %step.describe(), "resolved assertion");
            case.push(step);
        }

        Ok(case)
    }

    fn navigation_target(&self, lowered: &str, values: &ExtractedValues) -> String {
        if let Some(url) = values.get(Field::Url) {
            return url.to_string();
        }
        ResolverTables::lookup(&self.tables.path_rules, lowered)
            .unwrap_or("/")
            .to_string()
    }

    fn credential_fill(&self, label: &str, value: Option<&str>) -> TestStep {
        let text = match value {
            Some(v) => v.to_string(),
            None => match self.strictness {
                Strictness::Strict => not_specified_marker(&label.to_lowercase()),
                Strictness::Legacy => {
                    if label == "Username" {
                        LEGACY_USERNAME.to_string()
                    } else {
                        LEGACY_PASSWORD.to_string()
                    }
                }
            },
        };
        TestStep::Fill {
            locator: Locator::label(label),
            text,
        }
    }

    fn button_name(&self, lowered: &str, values: &ExtractedValues) -> Option<String> {
        if let Some(button) = values.get(Field::Button) {
            return Some(button.to_string());
        }
        if wants_click(lowered) {
            return ResolverTables::lookup(&self.tables.button_rules, lowered)
                .map(str::to_string)
                .or_else(|| Some("Submit".to_string()));
        }
        None
    }
}

/// A bare "login" mention is not enough: a `/login` path or a "Login button"
/// must not demand credentials. Fills fire only when a credential was
/// extracted or the instruction talks about credentials themselves.
fn wants_credentials(lowered: &str, values: &ExtractedValues) -> bool {
    if values.get(Field::Username).is_some() || values.get(Field::Password).is_some() {
        return true;
    }
    [
        "username",
        "password",
        "credential",
        "login with",
        "log in with",
        "sign in with",
        "login as",
        "log in as",
    ]
    .iter()
    .any(|cue| lowered.contains(cue))
}

fn wants_click(lowered: &str) -> bool {
    ["click", "press", "submit", "login", "log in", "sign in", "save", "register", "sign up"]
        .iter()
        .any(|cue| lowered.contains(cue))
}

/// At most one assertion per instruction. Cue precedence is first-match over
/// this fixed list: explicit quoted expectation, dashboard redirect, error
/// text, success text, then the login-flow default.
fn assertion_for(lowered: &str, values: &ExtractedValues) -> Option<TestStep> {
    if let Some(expected) = values.get(Field::Expected) {
        return Some(TestStep::Assert {
            kind: AssertionKind::ContainsText,
            locator: None,
            expected: Some(expected.to_string()),
        });
    }
    if lowered.contains("dashboard") {
        return Some(url_contains("/dashboard"));
    }
    if lowered.contains("error") || lowered.contains("fail") {
        return Some(TestStep::Assert {
            kind: AssertionKind::ContainsText,
            locator: None,
            expected: Some("error".to_string()),
        });
    }
    if lowered.contains("success") || lowered.contains("succeed") {
        return Some(TestStep::Assert {
            kind: AssertionKind::ContainsText,
            locator: None,
            expected: Some("success".to_string()),
        });
    }
    if wants_credentials(lowered, values) {
        // Login flow with no explicit cue: expect the post-login redirect.
        return Some(url_contains("/dashboard"));
    }
    None
}

fn url_contains(fragment: &str) -> TestStep {
    TestStep::Assert {
        kind: AssertionKind::UrlContains,
        locator: None,
        expected: Some(fragment.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(text: &str) -> TestCase {
        let values = ExtractedValues::extract(text);
        StepResolver::new()
            .resolve(text, &values, "https://example.com")
            .unwrap()
    }

    mod rules {
        use super::*;

        #[test]
        fn login_instruction_full_sequence() {
            let case = resolve("try to login with username Sam and password sammy");
            assert_eq!(
                case.resolved_steps(),
                vec![
                    "goto /login",
                    "fill label=Username with \"Sam\"",
                    "fill label=Password with \"sammy\"",
                    "click role=button[name=Login]",
                    "assert urlContains \"/dashboard\"",
                ]
            );
        }

        #[test]
        fn navigation_prefers_extracted_url() {
            let case = resolve("go to /settings/profile and save");
            assert_eq!(case.steps[0], TestStep::Goto {
                target: "/settings/profile".to_string(),
            });
        }

        #[test]
        fn navigation_defaults_to_root() {
            let case = resolve("click the Refresh button");
            assert_eq!(case.steps[0], TestStep::Goto {
                target: "/".to_string(),
            });
        }

        #[test]
        fn missing_credentials_emit_markers() {
            let case = resolve("login with wrong password and expect error message");
            assert_eq!(case.steps[1], TestStep::Fill {
                locator: Locator::label("Username"),
                text: "<not specified: username>".to_string(),
            });
            assert_eq!(case.steps[2], TestStep::Fill {
                locator: Locator::label("Password"),
                text: "<not specified: password>".to_string(),
            });
        }

        #[test]
        fn quoted_button_beats_keyword_table() {
            let case = resolve(r#"login with username Sam and password s, click "Enter Portal""#);
            assert!(case.steps.iter().any(|s| matches!(
                s,
                TestStep::Click { locator: Locator::Role { name: Some(n), .. } } if n == "Enter Portal"
            )));
        }

        #[test]
        fn login_path_alone_does_not_demand_credentials() {
            let case = resolve("go to /login and click the Login button");
            assert!(!case
                .steps
                .iter()
                .any(|s| matches!(s, TestStep::Fill { .. })));
            assert_eq!(case.steps[0], TestStep::Goto {
                target: "/login".to_string(),
            });
        }

        #[test]
        fn credential_phrasing_without_values_still_fills() {
            let case = resolve("sign in with your credentials");
            let fills = case
                .steps
                .iter()
                .filter(|s| matches!(s, TestStep::Fill { .. }))
                .count();
            assert_eq!(fills, 2);
        }

        #[test]
        fn no_click_without_cue() {
            let case = resolve("navigate to /about");
            assert!(!case
                .steps
                .iter()
                .any(|s| matches!(s, TestStep::Click { .. })));
        }
    }

    mod assertions {
        use super::*;

        #[test]
        fn explicit_quote_wins_over_error_cue() {
            let case = resolve(r#"login and expect "Welcome back" even on error"#);
            let last = case.steps.last().unwrap();
            assert_eq!(last, &TestStep::Assert {
                kind: AssertionKind::ContainsText,
                locator: None,
                expected: Some("Welcome back".to_string()),
            });
        }

        #[test]
        fn dashboard_cue_wins_over_error_cue() {
            let case = resolve("login then land on the dashboard or show an error");
            let last = case.steps.last().unwrap();
            assert_eq!(last, &TestStep::Assert {
                kind: AssertionKind::UrlContains,
                locator: None,
                expected: Some("/dashboard".to_string()),
            });
        }

        #[test]
        fn error_cue_emits_contains_text() {
            let case = resolve("login with wrong password and expect error message");
            let last = case.steps.last().unwrap();
            assert_eq!(last, &TestStep::Assert {
                kind: AssertionKind::ContainsText,
                locator: None,
                expected: Some("error".to_string()),
            });
        }

        #[test]
        fn at_most_one_assertion() {
            let case = resolve("login, see the dashboard, no error, success");
            let asserts = case
                .steps
                .iter()
                .filter(|s| matches!(s, TestStep::Assert { .. }))
                .count();
            assert_eq!(asserts, 1);
        }

        #[test]
        fn non_login_instruction_without_cue_has_no_assertion() {
            let case = resolve("click the Save button");
            assert!(!case
                .steps
                .iter()
                .any(|s| matches!(s, TestStep::Assert { .. })));
        }
    }

    mod modes {
        use super::*;

        #[test]
        fn legacy_mode_substitutes_demo_credentials() {
            let text = "login with username and password";
            let values = ExtractedValues::extract(text);
            let case = StepResolver::legacy()
                .resolve(text, &values, "https://example.com")
                .unwrap();
            assert_eq!(case.steps[1], TestStep::Fill {
                locator: Locator::label("Username"),
                text: LEGACY_USERNAME.to_string(),
            });
            assert_eq!(case.steps[2], TestStep::Fill {
                locator: Locator::label("Password"),
                text: LEGACY_PASSWORD.to_string(),
            });
        }

        #[test]
        fn custom_tables_redirect_navigation() {
            let tables = ResolverTables {
                path_rules: vec![("login".to_string(), "/signin".to_string())],
                button_rules: vec![("login".to_string(), "Anmelden".to_string())],
            };
            let text = "login now";
            let values = ExtractedValues::extract(text);
            let case = StepResolver::new()
                .with_tables(tables)
                .resolve(text, &values, "https://example.com")
                .unwrap();
            assert_eq!(case.steps[0], TestStep::Goto {
                target: "/signin".to_string(),
            });
        }
    }

    mod errors {
        use super::*;
        use crate::error::EscribaError;

        #[test]
        fn empty_instruction_is_rejected() {
            let values = ExtractedValues::extract("  ");
            let err = StepResolver::new()
                .resolve("  ", &values, "https://example.com")
                .unwrap_err();
            assert!(matches!(err, EscribaError::EmptyInstruction));
        }

        #[test]
        fn non_http_base_url_is_rejected() {
            let values = ExtractedValues::extract("login");
            let err = StepResolver::new()
                .resolve("login", &values, "ftp://example.com")
                .unwrap_err();
            assert!(matches!(err, EscribaError::InvalidBaseUrl { .. }));
        }
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn fill_order_matches_credential_order(
                username in "[A-Za-z][A-Za-z0-9._@-]{0,15}",
                password in "[A-Za-z][A-Za-z0-9._@-]{0,15}",
            ) {
                prop_assume!(!is_reserved(&username) && !is_reserved(&password));
                let text =
                    format!("login with username {username} and password {password}");
                let case = resolve(&text);
                let fills: Vec<&str> = case
                    .steps
                    .iter()
                    .filter_map(|s| match s {
                        TestStep::Fill { text, .. } => Some(text.as_str()),
                        _ => None,
                    })
                    .collect();
                prop_assert_eq!(fills, vec![username.as_str(), password.as_str()]);
            }

            #[test]
            fn resolution_is_idempotent(text in ".{0,80}") {
                prop_assume!(!text.trim().is_empty());
                let values = ExtractedValues::extract(&text);
                let resolver = StepResolver::new();
                let a = resolver.resolve(&text, &values, "https://example.com").unwrap();
                let b = resolver.resolve(&text, &values, "https://example.com").unwrap();
                prop_assert_eq!(a, b);
            }
        }

        fn is_reserved(word: &str) -> bool {
            // Values that collide with extraction keywords or stopwords make
            // the instruction genuinely ambiguous; the property holds for
            // everything else.
            let lowered = word.to_lowercase();
            [
                "a", "an", "and", "at", "but", "expect", "expects", "for", "in", "is", "it",
                "of", "on", "or", "pass", "password", "see", "should", "that", "the", "then",
                "this", "to", "user", "username", "with",
            ]
            .iter()
            .any(|w| *w == lowered)
        }
    }
}
