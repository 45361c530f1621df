//! Rendering contract and target dispatch.

use escriba::TestCase;
use serde::{Deserialize, Serialize};

use crate::cypress::CypressRenderer;
use crate::error::{CodegenError, Result};
use crate::options::{is_supported, Framework, Language, RenderOptions};
use crate::playwright::PlaywrightRenderer;
use crate::selenium::SeleniumRenderer;

/// The product of rendering a TestCase for one target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedCode {
    /// Complete source text
    pub code: String,
    /// Packages the generated test depends on
    pub dependencies: Vec<String>,
    /// How to install the dependencies and run the test
    pub setup_instructions: String,
}

/// One renderer per framework; the language is fixed at construction.
pub trait Renderer {
    /// Render the case into complete source text.
    ///
    /// Statements are emitted in step order; renderers never reorder,
    /// merge or drop steps.
    fn render(&self, case: &TestCase, options: &RenderOptions) -> Result<GeneratedCode>;
}

/// Select the renderer for a framework/language combination.
pub fn renderer_for(framework: Framework, language: Language) -> Result<Box<dyn Renderer>> {
    if !is_supported(framework, language) {
        return Err(CodegenError::UnsupportedTarget {
            framework,
            language,
        });
    }
    Ok(match framework {
        Framework::Playwright => Box::new(PlaywrightRenderer::new(language)),
        Framework::Selenium => Box::new(SeleniumRenderer::new(language)),
        Framework::Cypress => Box::new(CypressRenderer::new(language)),
    })
}

/// Render a case with the options' target.
pub fn render(case: &TestCase, options: &RenderOptions) -> Result<GeneratedCode> {
    renderer_for(options.framework, options.language)?.render(case, options)
}

/// Resolve a step target against the case's base URL.
#[must_use]
pub(crate) fn full_url(base_url: &str, target: &str) -> String {
    if target.starts_with("http://") || target.starts_with("https://") {
        target.to_string()
    } else {
        format!("{}{}", base_url.trim_end_matches('/'), target)
    }
}

/// Line-comment prefix for the target language.
#[must_use]
pub(crate) const fn comment_prefix(language: Language) -> &'static str {
    match language {
        Language::Python => "#",
        Language::TypeScript | Language::JavaScript | Language::Java => "//",
    }
}

/// Upper-camel-case form of a snake_case test name, for Java class names.
#[must_use]
pub fn pascal_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for part in name.split('_').filter(|p| !p.is_empty()) {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            out.extend(chars);
        }
    }
    if out.is_empty() {
        "UnnamedTest".to_string()
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_combination_is_fatal() {
        let err = renderer_for(Framework::Cypress, Language::Java).err();
        assert!(matches!(err, Some(CodegenError::UnsupportedTarget { .. })));
    }

    #[test]
    fn full_url_joins_relative_paths() {
        assert_eq!(
            full_url("https://example.com/", "/login"),
            "https://example.com/login"
        );
    }

    #[test]
    fn full_url_keeps_absolute_targets() {
        assert_eq!(
            full_url("https://example.com", "https://other.dev/x"),
            "https://other.dev/x"
        );
    }

    #[test]
    fn pascal_case_from_snake() {
        assert_eq!(pascal_case("try_to_login"), "TryToLogin");
        assert_eq!(pascal_case(""), "UnnamedTest");
    }
}
