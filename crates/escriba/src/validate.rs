//! Strict-mode validation of rendered code.
//!
//! A pure text scan over the rendered output: every extracted or locked
//! value must appear verbatim, and nothing from the forbidden-construct
//! deny-list may appear. The validator never inspects code semantics; it
//! exists to catch accidental substitutions and sneaky robustness
//! constructs, not to prove the code correct.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::extract::{ExtractedValues, Field, LockedValue};
use crate::resolve::{LEGACY_PASSWORD, LEGACY_USERNAME};
use crate::step::contains_not_specified;

/// Constructs that must never appear in strictly generated code.
pub const FORBIDDEN_CONSTRUCTS: &[&str] = &[
    "waitForTimeout",
    "waitForSelector",
    "WebDriverWait",
    "implicitly_wait",
    "cy.wait(",
    "page.reload",
    "history.back",
    "history.forward",
    "retry",
    "try {",
    "try:",
];

/// One detected mismatch between instruction and rendered code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deviation {
    /// What class of mismatch this is
    pub kind: DeviationKind,
    /// Human-readable detail
    pub message: String,
}

/// Classes of strict-mode deviations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviationKind {
    /// An extracted or locked value is missing from the code
    MissingValue,
    /// A deny-listed construct appears in the code
    ForbiddenConstruct,
    /// A canned demo credential replaced a real extracted value
    PlaceholderSubstitution,
    /// A "not specified" marker survived into the code
    UnspecifiedValue,
}

impl fmt::Display for DeviationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::MissingValue => "missing value",
            Self::ForbiddenConstruct => "forbidden construct",
            Self::PlaceholderSubstitution => "placeholder substitution",
            Self::UnspecifiedValue => "unspecified value",
        };
        write!(f, "{s}")
    }
}

/// Result of a strict-mode validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// True iff no deviations were found
    pub is_valid: bool,
    /// One summary line per deviation
    pub errors: Vec<String>,
    /// Structured deviations
    pub deviations: Vec<Deviation>,
}

impl ValidationReport {
    fn from_deviations(deviations: Vec<Deviation>) -> Self {
        let errors = deviations
            .iter()
            .map(|d| format!("{}: {}", d.kind, d.message))
            .collect();
        Self {
            is_valid: deviations.is_empty(),
            errors,
            deviations,
        }
    }
}

/// Strict-mode validator with a configurable deny-list.
#[derive(Debug, Clone)]
pub struct StrictValidator {
    deny_list: Vec<String>,
}

impl Default for StrictValidator {
    fn default() -> Self {
        Self {
            deny_list: FORBIDDEN_CONSTRUCTS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }
}

impl StrictValidator {
    /// Validator with the standard deny-list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validator with a custom deny-list.
    #[must_use]
    pub fn with_deny_list(deny_list: Vec<String>) -> Self {
        Self { deny_list }
    }

    /// Validate rendered code against the instruction's extracted and
    /// locked values.
    #[must_use]
    pub fn validate(
        &self,
        original_text: &str,
        rendered_code: &str,
        values: &ExtractedValues,
        locked: &[LockedValue],
    ) -> ValidationReport {
        let mut deviations = Vec::new();

        for (field, value) in values.iter() {
            if !value.is_empty() && !rendered_code.contains(value) {
                deviations.push(Deviation {
                    kind: DeviationKind::MissingValue,
                    message: format!("extracted {field} value '{value}' not found in code"),
                });
            }
        }
        for lock in locked {
            if !rendered_code.contains(lock.value.as_str()) {
                deviations.push(Deviation {
                    kind: DeviationKind::MissingValue,
                    message: format!(
                        "locked {} value '{}' not found in code",
                        lock.kind, lock.value
                    ),
                });
            }
        }

        for construct in &self.deny_list {
            if rendered_code.contains(construct.as_str()) {
                deviations.push(Deviation {
                    kind: DeviationKind::ForbiddenConstruct,
                    message: format!("code contains '{construct}'"),
                });
            }
        }

        check_placeholder(
            rendered_code,
            LEGACY_USERNAME,
            values.get(Field::Username),
            "username",
            &mut deviations,
        );
        check_placeholder(
            rendered_code,
            LEGACY_PASSWORD,
            values.get(Field::Password),
            "password",
            &mut deviations,
        );

        if contains_not_specified(rendered_code) {
            deviations.push(Deviation {
                kind: DeviationKind::UnspecifiedValue,
                message: "code contains a 'not specified' marker".to_string(),
            });
        }

        debug!(
            instruction = original_text,
            deviations = deviations.len(),
            "strict validation finished"
        );
        ValidationReport::from_deviations(deviations)
    }
}

fn check_placeholder(
    code: &str,
    placeholder: &str,
    extracted: Option<&str>,
    field: &str,
    deviations: &mut Vec<Deviation>,
) {
    if code.contains(placeholder) && extracted != Some(placeholder) {
        deviations.push(Deviation {
            kind: DeviationKind::PlaceholderSubstitution,
            message: format!("code contains demo {field} '{placeholder}' not present in instruction"),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{parse_locked, LockKind};

    fn values_for(text: &str) -> ExtractedValues {
        ExtractedValues::extract(text)
    }

    mod completeness {
        use super::*;

        #[test]
        fn all_values_present_passes() {
            let text = "login with username Sam and password sammy";
            let code = r#"fill("Username", "Sam"); fill("Password", "sammy");"#;
            let report = StrictValidator::new().validate(text, code, &values_for(text), &[]);
            assert!(report.is_valid);
            assert!(report.deviations.is_empty());
        }

        #[test]
        fn missing_extracted_value_is_a_deviation() {
            let text = "login with username Sam and password sammy";
            let code = r#"fill("Username", "Sam");"#;
            let report = StrictValidator::new().validate(text, code, &values_for(text), &[]);
            assert!(!report.is_valid);
            assert!(report
                .deviations
                .iter()
                .any(|d| d.kind == DeviationKind::MissingValue && d.message.contains("sammy")));
        }

        #[test]
        fn missing_locked_value_is_a_deviation() {
            let locked = vec![LockedValue {
                kind: LockKind::Url,
                value: "https://example.com/login".to_string(),
            }];
            let report = StrictValidator::new().validate(
                "go somewhere",
                "goto('/other')",
                &ExtractedValues::default(),
                &locked,
            );
            assert!(!report.is_valid);
            assert_eq!(report.deviations[0].kind, DeviationKind::MissingValue);
        }

        #[test]
        fn locked_values_from_annotations_participate() {
            let text = "[LOCK SELECTOR] #login-form";
            let locked = parse_locked(text);
            let code = "document.querySelector('#login-form')";
            let report =
                StrictValidator::new().validate(text, code, &ExtractedValues::default(), &locked);
            assert!(report.is_valid);
        }
    }

    mod deny_list {
        use super::*;

        #[test]
        fn wait_for_timeout_is_forbidden() {
            let code = "await page.waitForTimeout(1000);";
            let report =
                StrictValidator::new().validate("x", code, &ExtractedValues::default(), &[]);
            assert!(!report.is_valid);
            assert!(report
                .deviations
                .iter()
                .any(|d| d.kind == DeviationKind::ForbiddenConstruct));
        }

        #[test]
        fn try_catch_is_forbidden() {
            let code = "try { await page.click('x'); } catch (e) {}";
            let report =
                StrictValidator::new().validate("x", code, &ExtractedValues::default(), &[]);
            assert!(!report.is_valid);
        }

        #[test]
        fn custom_deny_list_replaces_default() {
            let validator = StrictValidator::with_deny_list(vec!["sleep(".to_string()]);
            let code = "await page.waitForTimeout(1000);";
            let report = validator.validate("x", code, &ExtractedValues::default(), &[]);
            assert!(report.is_valid);
        }
    }

    mod placeholders {
        use super::*;

        #[test]
        fn substituted_demo_credentials_are_rejected() {
            let text = "login with username Sam and password sammy";
            let code = r#"fill("Username", "testuser"); fill("Password", "password123");
                fill("x", "Sam"); fill("y", "sammy");"#;
            let report = StrictValidator::new().validate(text, code, &values_for(text), &[]);
            assert!(!report.is_valid);
            let substitutions = report
                .deviations
                .iter()
                .filter(|d| d.kind == DeviationKind::PlaceholderSubstitution)
                .count();
            assert_eq!(substitutions, 2);
        }

        #[test]
        fn genuinely_extracted_demo_credentials_pass() {
            let text = "login with username testuser and password password123";
            let code = r#"fill("Username", "testuser"); fill("Password", "password123");"#;
            let report = StrictValidator::new().validate(text, code, &values_for(text), &[]);
            assert!(report.is_valid);
        }

        #[test]
        fn not_specified_marker_is_a_deviation() {
            let code = r#"fill("Username", "<not specified: username>");"#;
            let report =
                StrictValidator::new().validate("login", code, &ExtractedValues::default(), &[]);
            assert!(!report.is_valid);
            assert!(report
                .deviations
                .iter()
                .any(|d| d.kind == DeviationKind::UnspecifiedValue));
        }
    }
}
