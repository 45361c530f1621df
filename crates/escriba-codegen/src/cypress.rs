//! Cypress renderer (JavaScript, TypeScript).

use escriba::{AssertionKind, TestCase, TestStep};

use crate::error::Result;
use crate::literal::quote;
use crate::options::{Framework, Language, RenderOptions};
use crate::render::{full_url, GeneratedCode, Renderer};
use crate::selector::to_selector;

/// Renders TestCases as Cypress specs.
#[derive(Debug, Clone, Copy)]
pub struct CypressRenderer {
    language: Language,
}

impl CypressRenderer {
    /// Renderer for one target language.
    #[must_use]
    pub const fn new(language: Language) -> Self {
        Self { language }
    }

    fn statement(&self, step: &TestStep, case: &TestCase) -> String {
        let lang = self.language;
        match step {
            TestStep::Goto { target } => {
                format!("cy.visit({});", quote(&full_url(&case.base_url, target), lang))
            }
            TestStep::Fill { locator, text } => {
                let sel = quote(&to_selector(locator, Framework::Cypress), lang);
                format!("cy.get({sel}).type({});", quote(text, lang))
            }
            TestStep::Click { locator } => {
                let sel = quote(&to_selector(locator, Framework::Cypress), lang);
                format!("cy.get({sel}).click();")
            }
            TestStep::Assert {
                kind,
                locator,
                expected,
            } => self.assertion(*kind, locator.as_ref(), expected.as_deref()),
        }
    }

    fn assertion(
        &self,
        kind: AssertionKind,
        locator: Option<&escriba::Locator>,
        expected: Option<&str>,
    ) -> String {
        let lang = self.language;
        let sel = locator.map(|l| quote(&to_selector(l, Framework::Cypress), lang));
        let value = expected.map(|v| quote(v, lang));

        let unsupported =
            |reason: &str| format!("// unsupported assertion: {kind} ({reason})");

        match (kind, value) {
            (AssertionKind::UrlContains, Some(v)) => {
                format!("cy.url().should('include', {v});")
            }
            (AssertionKind::ContainsText, Some(v)) => match &sel {
                Some(sel) => format!("cy.get({sel}).should('contain.text', {v});"),
                None => format!("cy.contains({v});"),
            },
            (AssertionKind::ExactText, Some(v)) => match &sel {
                Some(sel) => format!("cy.get({sel}).should('have.text', {v});"),
                None => unsupported("no locator"),
            },
            (AssertionKind::HasValue, Some(v)) => match &sel {
                Some(sel) => format!("cy.get({sel}).should('have.value', {v});"),
                None => unsupported("no locator"),
            },
            (AssertionKind::Visible, _) => match &sel {
                Some(sel) => format!("cy.get({sel}).should('be.visible');"),
                None => unsupported("no locator"),
            },
            (AssertionKind::IsEnabled, _) => match &sel {
                Some(sel) => format!("cy.get({sel}).should('be.enabled');"),
                None => unsupported("no locator"),
            },
            (AssertionKind::IsDisabled, _) => match &sel {
                Some(sel) => format!("cy.get({sel}).should('be.disabled');"),
                None => unsupported("no locator"),
            },
            (
                AssertionKind::UrlContains
                | AssertionKind::ContainsText
                | AssertionKind::ExactText
                | AssertionKind::HasValue,
                None,
            ) => unsupported("no expected value"),
        }
    }
}

impl Renderer for CypressRenderer {
    fn render(&self, case: &TestCase, options: &RenderOptions) -> Result<GeneratedCode> {
        let mut out = String::new();
        if self.language == Language::TypeScript {
            out.push_str("/// <reference types=\"cypress\" />\n\n");
        }
        out.push_str(&format!(
            "describe('{}', {{ defaultCommandTimeout: {} }}, () => {{\n",
            case.name, options.timeout_ms
        ));
        out.push_str(&format!("  it('{}', () => {{\n", case.name));
        for (index, step) in case.steps.iter().enumerate() {
            if options.include_comments {
                out.push_str(&format!("    // step {}: {}\n", index + 1, step.describe()));
            }
            out.push_str(&format!("    {}\n", self.statement(step, case)));
        }
        if options.include_screenshots {
            out.push_str("    cy.screenshot();\n");
        }
        out.push_str("  });\n});\n");

        Ok(GeneratedCode {
            code: out,
            dependencies: vec!["cypress".to_string()],
            setup_instructions: "npm install -D cypress && npx cypress run".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use escriba::{ExtractedValues, Locator, StepResolver};

    fn login_case() -> TestCase {
        let text = "try to login with username Sam and password sammy";
        let values = ExtractedValues::extract(text);
        StepResolver::new()
            .resolve(text, &values, "https://example.com")
            .unwrap()
    }

    #[test]
    fn javascript_spec_shape() {
        let code = CypressRenderer::new(Language::JavaScript)
            .render(&login_case(), &RenderOptions::default())
            .unwrap()
            .code;
        assert!(code.starts_with("describe("));
        assert!(code.contains("cy.visit(\"https://example.com/login\");"));
        assert!(code.contains("cy.url().should('include', \"/dashboard\");"));
        assert!(!code.contains("cy.wait("));
    }

    #[test]
    fn typescript_spec_carries_reference_directive() {
        let code = CypressRenderer::new(Language::TypeScript)
            .render(&login_case(), &RenderOptions::default())
            .unwrap()
            .code;
        assert!(code.starts_with("/// <reference types=\"cypress\" />"));
    }

    #[test]
    fn label_locator_surfaces_unresolved_marker() {
        let code = CypressRenderer::new(Language::JavaScript)
            .render(&login_case(), &RenderOptions::default())
            .unwrap()
            .code;
        assert!(code.contains("<unresolved: label locator not supported by cypress>"));
        // The fill value still appears, markers never swallow steps.
        assert!(code.contains("\"Sam\""));
    }

    #[test]
    fn id_and_css_selectors_render_directly() {
        let mut case = TestCase::new("x", "https://example.com");
        case.push(TestStep::Click {
            locator: Locator::id("go"),
        });
        case.push(TestStep::Assert {
            kind: AssertionKind::Visible,
            locator: Some(Locator::css(".banner")),
            expected: None,
        });
        let code = CypressRenderer::new(Language::JavaScript)
            .render(&case, &RenderOptions::default())
            .unwrap()
            .code;
        assert!(code.contains("cy.get(\"#go\").click();"));
        assert!(code.contains("cy.get(\".banner\").should('be.visible');"));
    }
}
