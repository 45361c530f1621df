//! Batch generation from a YAML suite file.
//!
//! A suite file lists named generation requests:
//!
//! ```yaml
//! tests:
//!   - name: valid_login
//!     instruction: "try to login with username Sam and password sammy"
//!     base_url: https://example.com
//!     framework: playwright
//!     language: typescript
//! ```
//!
//! Each entry is generated independently and written into the output
//! directory with a provenance manifest beside it. Entries that fail strict
//! validation are reported but do not stop the run unless fail-fast is set.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use escriba::{derive_name, Strictness};
use escriba_codegen::{
    generate, pascal_case, FileManifest, Framework, GenerateOptions, GenerationMetadata,
    Language, RenderOptions,
};

use crate::error::{CliError, CliResult};
use crate::output::ProgressReporter;

/// One generation request in a suite file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteEntry {
    /// Test name, used for the output filename
    pub name: String,
    /// Plain-English instruction
    pub instruction: String,
    /// Base URL the test runs against
    pub base_url: String,
    /// Target framework (default playwright)
    #[serde(default)]
    pub framework: Option<Framework>,
    /// Target language (default typescript)
    #[serde(default)]
    pub language: Option<Language>,
    /// Use legacy defaults instead of strict markers
    #[serde(default)]
    pub legacy: bool,
}

impl SuiteEntry {
    fn framework(&self) -> Framework {
        self.framework.unwrap_or(Framework::Playwright)
    }

    fn language(&self) -> Language {
        self.language.unwrap_or(Language::TypeScript)
    }
}

/// A parsed suite file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuiteFile {
    /// Generation requests, run in order
    #[serde(default)]
    pub tests: Vec<SuiteEntry>,
}

impl SuiteFile {
    /// Parse a suite from YAML text
    pub fn from_yaml(yaml: &str) -> CliResult<Self> {
        let suite: Self = serde_yaml_ng::from_str(yaml)?;
        Ok(suite)
    }

    /// Load a suite from a file
    pub fn from_path(path: &Path) -> CliResult<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml(&yaml)
    }
}

/// Result of generating one suite entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteOutcome {
    /// Entry name
    pub name: String,
    /// Whether generation produced runnable code
    pub passed: bool,
    /// Errors joined, or a short success note
    pub message: String,
    /// Path the generated code was written to, when it passed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

/// Conventional output filename for a generated test.
///
/// Follows each ecosystem's discovery conventions: pytest wants a `test_`
/// prefix, JUnit wants the class name, JS runners pick up `.spec` files.
#[must_use]
pub fn output_filename(name: &str, language: Language) -> String {
    let base = derive_name(name);
    match language {
        Language::Python => format!("test_{base}.py"),
        Language::Java => format!("{}Test.java", pascal_case(&base)),
        Language::TypeScript | Language::JavaScript => {
            format!("{base}.spec.{}", language.extension())
        }
    }
}

/// Run every entry of a suite, writing outputs into `out_dir`.
///
/// Returns one outcome per attempted entry. With `fail_fast`, stops after
/// the first failing entry.
pub fn run_suite(
    suite: &SuiteFile,
    out_dir: &Path,
    fail_fast: bool,
    reporter: &mut ProgressReporter,
) -> CliResult<Vec<SuiteOutcome>> {
    if suite.tests.is_empty() {
        return Err(CliError::config("suite file contains no tests"));
    }
    std::fs::create_dir_all(out_dir)?;

    let mut outcomes = Vec::with_capacity(suite.tests.len());
    reporter.start_progress(suite.tests.len() as u64, "generating");

    for entry in &suite.tests {
        reporter.advance(&entry.name);
        let outcome = run_entry(entry, out_dir)?;
        let failed = !outcome.passed;
        outcomes.push(outcome);
        if failed && fail_fast {
            break;
        }
    }

    reporter.finish_progress();
    Ok(outcomes)
}

fn run_entry(entry: &SuiteEntry, out_dir: &Path) -> CliResult<SuiteOutcome> {
    let options = GenerateOptions {
        render: RenderOptions {
            framework: entry.framework(),
            language: entry.language(),
            ..RenderOptions::default()
        },
        strictness: if entry.legacy {
            Strictness::Legacy
        } else {
            Strictness::Strict
        },
        ..GenerateOptions::default()
    };

    let output = generate(&entry.instruction, &entry.base_url, &options);
    if !output.is_ok() {
        return Ok(SuiteOutcome {
            name: entry.name.clone(),
            passed: false,
            message: output.errors.join("; "),
            file: None,
        });
    }

    let filename = output_filename(&entry.name, entry.language());
    let path = out_dir.join(&filename);
    std::fs::write(&path, &output.code)?;

    let manifest = FileManifest::new(
        filename.clone(),
        &output.code,
        GenerationMetadata::for_input(&entry.instruction),
    );
    manifest.write(&FileManifest::manifest_path(&path))?;
    info!(name = %entry.name, file = %path.display(), "wrote generated test");

    Ok(SuiteOutcome {
        name: entry.name.clone(),
        passed: true,
        message: format!("{} steps", output.resolved_steps.len()),
        file: Some(path),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ColorChoice, Verbosity};

    const LOGIN_SUITE: &str = r#"
tests:
  - name: valid_login
    instruction: "try to login with username Sam and password sammy"
    base_url: https://example.com
  - name: search_page
    instruction: "go to /search and click the Search button"
    base_url: https://example.com
    framework: playwright
    language: python
"#;

    #[test]
    fn parses_suite_yaml() {
        let suite = SuiteFile::from_yaml(LOGIN_SUITE).unwrap();
        assert_eq!(suite.tests.len(), 2);
        assert_eq!(suite.tests[0].framework(), Framework::Playwright);
        assert_eq!(suite.tests[1].language(), Language::Python);
    }

    #[test]
    fn rejects_malformed_yaml() {
        assert!(SuiteFile::from_yaml("tests: {not: a list}").is_err());
    }

    #[test]
    fn output_filenames_follow_conventions() {
        assert_eq!(
            output_filename("valid login", Language::TypeScript),
            "valid_login.spec.ts"
        );
        assert_eq!(output_filename("valid login", Language::Python), "test_valid_login.py");
        assert_eq!(output_filename("valid login", Language::Java), "ValidLoginTest.java");
    }

    #[test]
    fn runs_suite_and_writes_manifests() {
        let suite = SuiteFile::from_yaml(LOGIN_SUITE).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let mut reporter = ProgressReporter::new(Verbosity::Quiet, ColorChoice::Never);

        let outcomes = run_suite(&suite, dir.path(), false, &mut reporter).unwrap();
        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.iter().all(|o| o.passed), "{outcomes:?}");

        let spec = dir.path().join("valid_login.spec.ts");
        assert!(spec.exists());
        assert!(dir.path().join("valid_login.spec.ts.manifest.json").exists());
        escriba_codegen::verify_file(&spec).unwrap();
    }

    #[test]
    fn fail_fast_stops_after_first_failure() {
        let yaml = r#"
tests:
  - name: broken
    instruction: "login with wrong password and expect error"
    base_url: https://example.com
  - name: fine
    instruction: "go to /login"
    base_url: https://example.com
"#;
        let suite = SuiteFile::from_yaml(yaml).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let mut reporter = ProgressReporter::new(Verbosity::Quiet, ColorChoice::Never);

        let outcomes = run_suite(&suite, dir.path(), true, &mut reporter).unwrap();
        assert_eq!(outcomes.len(), 1);
        assert!(!outcomes[0].passed);
    }

    #[test]
    fn empty_suite_is_an_error() {
        let suite = SuiteFile::default();
        let dir = tempfile::tempdir().unwrap();
        let mut reporter = ProgressReporter::new(Verbosity::Quiet, ColorChoice::Never);
        assert!(run_suite(&suite, dir.path(), false, &mut reporter).is_err());
    }
}
