//! Target selection and rendering options.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Target automation framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    /// Playwright
    Playwright,
    /// Selenium WebDriver
    Selenium,
    /// Cypress
    Cypress,
}

impl Framework {
    /// Lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Playwright => "playwright",
            Self::Selenium => "selenium",
            Self::Cypress => "cypress",
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Framework {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "playwright" => Ok(Self::Playwright),
            "selenium" => Ok(Self::Selenium),
            "cypress" => Ok(Self::Cypress),
            other => Err(format!("unknown framework '{other}'")),
        }
    }
}

/// Target source language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// TypeScript
    TypeScript,
    /// JavaScript
    JavaScript,
    /// Python
    Python,
    /// Java
    Java,
}

impl Language {
    /// Lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TypeScript => "typescript",
            Self::JavaScript => "javascript",
            Self::Python => "python",
            Self::Java => "java",
        }
    }

    /// Conventional file extension for generated sources.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::TypeScript => "ts",
            Self::JavaScript => "js",
            Self::Python => "py",
            Self::Java => "java",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "typescript" | "ts" => Ok(Self::TypeScript),
            "javascript" | "js" => Ok(Self::JavaScript),
            "python" | "py" => Ok(Self::Python),
            "java" => Ok(Self::Java),
            other => Err(format!("unknown language '{other}'")),
        }
    }
}

/// Whether a framework/language combination has a renderer.
#[must_use]
pub const fn is_supported(framework: Framework, language: Language) -> bool {
    match framework {
        Framework::Playwright => true,
        Framework::Selenium => matches!(
            language,
            Language::Python | Language::Java | Language::JavaScript
        ),
        Framework::Cypress => matches!(language, Language::JavaScript | Language::TypeScript),
    }
}

/// Options controlling how a TestCase is rendered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Target framework
    pub framework: Framework,
    /// Target language
    pub language: Language,
    /// Emit a step-description comment before each statement
    pub include_comments: bool,
    /// Append a screenshot capture at the end of the test
    pub include_screenshots: bool,
    /// Default action timeout configured in the test, in milliseconds
    pub timeout_ms: u64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            framework: Framework::Playwright,
            language: Language::TypeScript,
            include_comments: false,
            include_screenshots: false,
            timeout_ms: 30_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn framework_round_trip() {
        for f in [Framework::Playwright, Framework::Selenium, Framework::Cypress] {
            assert_eq!(f.as_str().parse::<Framework>().unwrap(), f);
        }
    }

    #[test]
    fn language_aliases() {
        assert_eq!("ts".parse::<Language>().unwrap(), Language::TypeScript);
        assert_eq!("py".parse::<Language>().unwrap(), Language::Python);
    }

    #[test]
    fn unknown_framework_is_an_error() {
        assert!("puppeteer".parse::<Framework>().is_err());
    }

    #[test]
    fn support_matrix() {
        assert!(is_supported(Framework::Playwright, Language::Java));
        assert!(is_supported(Framework::Selenium, Language::Python));
        assert!(is_supported(Framework::Cypress, Language::TypeScript));
        assert!(!is_supported(Framework::Selenium, Language::TypeScript));
        assert!(!is_supported(Framework::Cypress, Language::Python));
        assert!(!is_supported(Framework::Cypress, Language::Java));
    }
}
