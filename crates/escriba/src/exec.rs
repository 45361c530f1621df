//! Execution boundary.
//!
//! The core pipeline never drives a browser itself; it hands a [`TestCase`]
//! to something implementing [`StepExecutor`] and reports results through the
//! serializable [`ExecutionReport`] contract. [`DryRunExecutor`] is the
//! built-in implementation: it replays steps structurally without a browser,
//! which is enough for the CLI to sanity-check a case before export.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::debug;

use crate::locator::Locator;
use crate::step::{contains_not_specified, AssertionKind, TestStep};
use crate::testcase::TestCase;

/// Executor failures. Timeout and element-not-found are distinct on purpose;
/// callers report them differently.
#[derive(Debug, Error)]
pub enum ExecError {
    /// The step did not complete within the configured timeout
    #[error("Step timed out after {0:?}")]
    Timeout(Duration),

    /// No element matched the locator
    #[error("Element not found: {locator}")]
    ElementNotFound {
        /// Display form of the locator
        locator: String,
    },

    /// Navigation to the target failed
    #[error("Navigation to '{target}' failed: {message}")]
    Navigation {
        /// The navigation target
        target: String,
        /// Failure detail
        message: String,
    },

    /// An assertion did not hold
    #[error("Assertion failed: {0}")]
    AssertionFailed(String),
}

/// Options handed to the executor alongside a TestCase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionOptions {
    /// Per-step timeout
    #[serde(with = "duration_ms", rename = "timeout_ms")]
    pub timeout: Duration,
    /// Whether the executor should capture screenshots on failure
    pub capture_screenshots: bool,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            capture_screenshots: false,
        }
    }
}

mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(d)?))
    }
}

/// Overall or per-step execution status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecStatus {
    /// Completed successfully
    Passed,
    /// Completed with a failure
    Failed,
    /// Still in flight
    Running,
}

/// Outcome of one executed step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepResult {
    /// Step status
    pub status: ExecStatus,
    /// One-line description of what ran
    pub message: String,
    /// Error detail for failed steps
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Outcome of executing a whole TestCase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionReport {
    /// Overall status
    pub status: ExecStatus,
    /// Summary message
    pub message: String,
    /// Wall-clock duration in milliseconds
    pub duration_ms: u64,
    /// Error detail when the run failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Per-step outcomes, in step order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_results: Option<Vec<StepResult>>,
}

/// Something that can perform the four abstract step actions.
pub trait StepExecutor {
    /// Navigate to a path or absolute URL.
    fn navigate(&mut self, target: &str) -> Result<(), ExecError>;
    /// Fill an element with literal text.
    fn fill(&mut self, locator: &Locator, text: &str) -> Result<(), ExecError>;
    /// Click an element.
    fn click(&mut self, locator: &Locator) -> Result<(), ExecError>;
    /// Check an assertion.
    fn check(
        &mut self,
        kind: AssertionKind,
        locator: Option<&Locator>,
        expected: Option<&str>,
    ) -> Result<(), ExecError>;
}

/// Run every step of a case against an executor.
///
/// Steps run in order; the first failure stops the run and marks the report
/// failed. There are no retries at this layer.
pub fn run_case(
    case: &TestCase,
    executor: &mut dyn StepExecutor,
    _options: &ExecutionOptions,
) -> ExecutionReport {
    let started = Instant::now();
    let mut step_results = Vec::with_capacity(case.steps.len());
    let mut failure: Option<String> = None;

    for step in &case.steps {
        let outcome = match step {
            TestStep::Goto { target } => executor.navigate(target),
            TestStep::Fill { locator, text } => executor.fill(locator, text),
            TestStep::Click { locator } => executor.click(locator),
            TestStep::Assert {
                kind,
                locator,
                expected,
            } => executor.check(*kind, locator.as_ref(), expected.as_deref()),
        };
        match outcome {
            Ok(()) => {
                debug!(step = %step.describe(), "step passed");
                step_results.push(StepResult {
                    status: ExecStatus::Passed,
                    message: step.describe(),
                    error: None,
                });
            }
            Err(e) => {
                debug!(step = %step.describe(), error = %e, "step failed");
                step_results.push(StepResult {
                    status: ExecStatus::Failed,
                    message: step.describe(),
                    error: Some(e.to_string()),
                });
                failure = Some(e.to_string());
                break;
            }
        }
    }

    let duration_ms = started.elapsed().as_millis() as u64;
    match failure {
        None => ExecutionReport {
            status: ExecStatus::Passed,
            message: format!("{} steps passed", step_results.len()),
            duration_ms,
            error: None,
            step_results: Some(step_results),
        },
        Some(error) => ExecutionReport {
            status: ExecStatus::Failed,
            message: format!(
                "failed at step {} of {}",
                step_results.len(),
                case.steps.len()
            ),
            duration_ms,
            error: Some(error),
            step_results: Some(step_results),
        },
    }
}

/// Structural replay without a browser.
///
/// Navigation always succeeds; fill and click require a complete locator and
/// fill rejects "not specified" markers; assertions are accepted as stated.
#[derive(Debug, Default)]
pub struct DryRunExecutor {
    visited: Vec<String>,
    filled: Vec<(String, String)>,
    clicked: Vec<String>,
}

impl DryRunExecutor {
    /// Fresh dry-run executor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Navigation targets seen so far, in order.
    #[must_use]
    pub fn visited(&self) -> &[String] {
        &self.visited
    }

    /// (locator, text) pairs filled so far, in order.
    #[must_use]
    pub fn filled(&self) -> &[(String, String)] {
        &self.filled
    }

    /// Locators clicked so far, in order.
    #[must_use]
    pub fn clicked(&self) -> &[String] {
        &self.clicked
    }
}

impl StepExecutor for DryRunExecutor {
    fn navigate(&mut self, target: &str) -> Result<(), ExecError> {
        if target.is_empty() {
            return Err(ExecError::Navigation {
                target: target.to_string(),
                message: "empty target".to_string(),
            });
        }
        self.visited.push(target.to_string());
        Ok(())
    }

    fn fill(&mut self, locator: &Locator, text: &str) -> Result<(), ExecError> {
        if !locator.is_complete() {
            return Err(ExecError::ElementNotFound {
                locator: locator.to_string(),
            });
        }
        if contains_not_specified(text) {
            return Err(ExecError::AssertionFailed(format!(
                "fill value for {locator} was never specified"
            )));
        }
        self.filled.push((locator.to_string(), text.to_string()));
        Ok(())
    }

    fn click(&mut self, locator: &Locator) -> Result<(), ExecError> {
        if !locator.is_complete() {
            return Err(ExecError::ElementNotFound {
                locator: locator.to_string(),
            });
        }
        self.clicked.push(locator.to_string());
        Ok(())
    }

    fn check(
        &mut self,
        _kind: AssertionKind,
        locator: Option<&Locator>,
        _expected: Option<&str>,
    ) -> Result<(), ExecError> {
        if let Some(locator) = locator {
            if !locator.is_complete() {
                return Err(ExecError::ElementNotFound {
                    locator: locator.to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::ExtractedValues;
    use crate::resolve::StepResolver;

    fn login_case() -> TestCase {
        let text = "try to login with username Sam and password sammy";
        let values = ExtractedValues::extract(text);
        StepResolver::new()
            .resolve(text, &values, "https://example.com")
            .unwrap()
    }

    #[test]
    fn dry_run_passes_complete_case() {
        let case = login_case();
        let mut exec = DryRunExecutor::new();
        let report = run_case(&case, &mut exec, &ExecutionOptions::default());
        assert_eq!(report.status, ExecStatus::Passed);
        assert_eq!(exec.visited(), ["/login"]);
        assert_eq!(exec.filled().len(), 2);
        assert_eq!(exec.clicked().len(), 1);
    }

    #[test]
    fn dry_run_fails_on_unspecified_fill() {
        let text = "login with wrong password and expect error message";
        let values = ExtractedValues::extract(text);
        let case = StepResolver::new()
            .resolve(text, &values, "https://example.com")
            .unwrap();

        let mut exec = DryRunExecutor::new();
        let report = run_case(&case, &mut exec, &ExecutionOptions::default());
        assert_eq!(report.status, ExecStatus::Failed);
        assert!(report.error.is_some());
        let results = report.step_results.unwrap();
        // goto passed, first fill failed, nothing after it ran.
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].status, ExecStatus::Passed);
        assert_eq!(results[1].status, ExecStatus::Failed);
    }

    #[test]
    fn incomplete_locator_is_element_not_found() {
        let mut exec = DryRunExecutor::new();
        let err = exec
            .click(&Locator::role_unnamed("button"))
            .unwrap_err();
        assert!(matches!(err, ExecError::ElementNotFound { .. }));
    }

    #[test]
    fn timeout_error_is_distinct_from_not_found() {
        let timeout = ExecError::Timeout(Duration::from_secs(30));
        let not_found = ExecError::ElementNotFound {
            locator: "id=go".to_string(),
        };
        assert!(timeout.to_string().contains("timed out"));
        assert!(not_found.to_string().contains("not found"));
    }

    #[test]
    fn report_serializes_with_lowercase_status() {
        let report = ExecutionReport {
            status: ExecStatus::Passed,
            message: "ok".to_string(),
            duration_ms: 12,
            error: None,
            step_results: None,
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains(r#""status":"passed""#));
        assert!(!json.contains("step_results"));
    }

    #[test]
    fn options_default_timeout() {
        let options = ExecutionOptions::default();
        assert_eq!(options.timeout, Duration::from_secs(30));
        let json = serde_json::to_string(&options).unwrap();
        assert!(json.contains(r#""timeout_ms":30000"#));
    }
}
