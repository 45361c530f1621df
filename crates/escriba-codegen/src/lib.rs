//! Framework-specific code generation for Escriba.
//!
//! Takes the abstract `TestCase` produced by the core crate and renders it as
//! runnable test source for Playwright, Selenium or Cypress, in the languages
//! each framework supports. Also home to the end-to-end [`pipeline`] entry
//! point and the provenance [`manifest`] written beside generated files.
//!
//! Rendering is pure string construction. Steps are emitted in order,
//! extracted values are embedded character-for-character, and anything a
//! target cannot express surfaces as a visible marker or comment instead of
//! being dropped.

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

mod cypress;
mod error;
mod literal;
mod manifest;
mod options;
mod pipeline;
mod playwright;
mod render;
mod selector;
mod selenium;

pub use cypress::CypressRenderer;
pub use error::{CodegenError, Result};
pub use literal::quote;
pub use manifest::{hash_contents, verify_file, FileManifest, GenerationMetadata};
pub use options::{is_supported, Framework, Language, RenderOptions};
pub use pipeline::{generate, GenerateOptions, GenerationOutput};
pub use playwright::PlaywrightRenderer;
pub use render::{pascal_case, render, renderer_for, GeneratedCode, Renderer};
pub use selector::{is_unresolved, to_selector, unresolved_marker};
pub use selenium::SeleniumRenderer;

#[cfg(test)]
mod tests {
    use super::*;
    use escriba::{ExtractedValues, StepResolver};

    #[test]
    fn every_supported_target_renders_the_login_case() {
        let text = "try to login with username Sam and password sammy";
        let values = ExtractedValues::extract(text);
        let case = StepResolver::new()
            .resolve(text, &values, "https://example.com")
            .unwrap();

        let targets = [
            (Framework::Playwright, Language::TypeScript),
            (Framework::Playwright, Language::JavaScript),
            (Framework::Playwright, Language::Python),
            (Framework::Playwright, Language::Java),
            (Framework::Selenium, Language::Python),
            (Framework::Selenium, Language::Java),
            (Framework::Selenium, Language::JavaScript),
            (Framework::Cypress, Language::JavaScript),
            (Framework::Cypress, Language::TypeScript),
        ];
        for (framework, language) in targets {
            let options = RenderOptions {
                framework,
                language,
                ..RenderOptions::default()
            };
            let generated = render(&case, &options).unwrap();
            assert!(
                generated.code.contains("Sam") && generated.code.contains("sammy"),
                "{framework}/{language} lost a value"
            );
            assert!(!generated.dependencies.is_empty());
        }
    }
}
