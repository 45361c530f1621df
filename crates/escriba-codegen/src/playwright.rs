//! Playwright renderer (TypeScript, JavaScript, Python, Java).

use escriba::{AssertionKind, TestCase, TestStep};

use crate::error::Result;
use crate::literal::quote;
use crate::options::{Framework, Language, RenderOptions};
use crate::render::{comment_prefix, full_url, pascal_case, GeneratedCode, Renderer};
use crate::selector::to_selector;

/// Renders TestCases as Playwright tests.
#[derive(Debug, Clone, Copy)]
pub struct PlaywrightRenderer {
    language: Language,
}

impl PlaywrightRenderer {
    /// Renderer for one target language.
    #[must_use]
    pub const fn new(language: Language) -> Self {
        Self { language }
    }

    fn body(&self, case: &TestCase, options: &RenderOptions) -> Vec<String> {
        let mut lines = Vec::new();
        for (index, step) in case.steps.iter().enumerate() {
            if options.include_comments {
                lines.push(format!(
                    "{} step {}: {}",
                    comment_prefix(self.language),
                    index + 1,
                    step.describe()
                ));
            }
            lines.push(self.statement(step, case));
        }
        if options.include_screenshots {
            lines.push(self.screenshot(&case.name));
        }
        lines
    }

    fn statement(&self, step: &TestStep, case: &TestCase) -> String {
        let lang = self.language;
        match step {
            TestStep::Goto { target } => {
                let url = quote(&full_url(&case.base_url, target), lang);
                match lang {
                    Language::TypeScript | Language::JavaScript => {
                        format!("await page.goto({url});")
                    }
                    Language::Python => format!("page.goto({url})"),
                    Language::Java => format!("page.navigate({url});"),
                }
            }
            TestStep::Fill { locator, text } => {
                let sel = quote(&to_selector(locator, Framework::Playwright), lang);
                let value = quote(text, lang);
                match lang {
                    Language::TypeScript | Language::JavaScript => {
                        format!("await page.fill({sel}, {value});")
                    }
                    Language::Python => format!("page.fill({sel}, {value})"),
                    Language::Java => format!("page.fill({sel}, {value});"),
                }
            }
            TestStep::Click { locator } => {
                let sel = quote(&to_selector(locator, Framework::Playwright), lang);
                match lang {
                    Language::TypeScript | Language::JavaScript => {
                        format!("await page.click({sel});")
                    }
                    Language::Python => format!("page.click({sel})"),
                    Language::Java => format!("page.click({sel});"),
                }
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
        let target = locator
            .map(|l| quote(&to_selector(l, Framework::Playwright), lang))
            .unwrap_or_else(|| quote("body", lang));
        let value = expected.map(|v| quote(v, lang));

        let unsupported = |reason: &str| {
            format!(
                "{} unsupported assertion: {kind} ({reason})",
                comment_prefix(lang)
            )
        };

        match (kind, value) {
            (AssertionKind::UrlContains, Some(v)) => match lang {
                Language::TypeScript | Language::JavaScript => {
                    format!("await expect(page).toHaveURL(new RegExp({v}));")
                }
                Language::Python => format!("expect(page).to_have_url(re.compile({v}))"),
                Language::Java => format!("assertThat(page).hasURL(Pattern.compile({v}));"),
            },
            (AssertionKind::ContainsText, Some(v)) => match lang {
                Language::TypeScript | Language::JavaScript => {
                    format!("await expect(page.locator({target})).toContainText({v});")
                }
                Language::Python => {
                    format!("expect(page.locator({target})).to_contain_text({v})")
                }
                Language::Java => {
                    format!("assertThat(page.locator({target})).containsText({v});")
                }
            },
            (AssertionKind::ExactText, Some(v)) => match lang {
                Language::TypeScript | Language::JavaScript => {
                    format!("await expect(page.locator({target})).toHaveText({v});")
                }
                Language::Python => format!("expect(page.locator({target})).to_have_text({v})"),
                Language::Java => format!("assertThat(page.locator({target})).hasText({v});"),
            },
            (AssertionKind::HasValue, Some(v)) => match lang {
                Language::TypeScript | Language::JavaScript => {
                    format!("await expect(page.locator({target})).toHaveValue({v});")
                }
                Language::Python => format!("expect(page.locator({target})).to_have_value({v})"),
                Language::Java => format!("assertThat(page.locator({target})).hasValue({v});"),
            },
            (AssertionKind::Visible, _) => match lang {
                Language::TypeScript | Language::JavaScript => {
                    format!("await expect(page.locator({target})).toBeVisible();")
                }
                Language::Python => format!("expect(page.locator({target})).to_be_visible()"),
                Language::Java => format!("assertThat(page.locator({target})).isVisible();"),
            },
            (AssertionKind::IsEnabled, _) => match lang {
                Language::TypeScript | Language::JavaScript => {
                    format!("await expect(page.locator({target})).toBeEnabled();")
                }
                Language::Python => format!("expect(page.locator({target})).to_be_enabled()"),
                Language::Java => format!("assertThat(page.locator({target})).isEnabled();"),
            },
            (AssertionKind::IsDisabled, _) => match lang {
                Language::TypeScript | Language::JavaScript => {
                    format!("await expect(page.locator({target})).toBeDisabled();")
                }
                Language::Python => format!("expect(page.locator({target})).to_be_disabled()"),
                Language::Java => format!("assertThat(page.locator({target})).isDisabled();"),
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

    fn screenshot(&self, name: &str) -> String {
        let path = format!("{name}.png");
        match self.language {
            Language::TypeScript | Language::JavaScript => {
                format!("await page.screenshot({{ path: {} }});", quote(&path, self.language))
            }
            Language::Python => format!("page.screenshot(path={})", quote(&path, self.language)),
            Language::Java => format!(
                "page.screenshot(new Page.ScreenshotOptions().setPath(Paths.get({})));",
                quote(&path, self.language)
            ),
        }
    }
}

impl Renderer for PlaywrightRenderer {
    fn render(&self, case: &TestCase, options: &RenderOptions) -> Result<GeneratedCode> {
        let body = self.body(case, options);
        let code = match self.language {
            Language::TypeScript | Language::JavaScript => script(case, options, &body),
            Language::Python => python(case, options, &body),
            Language::Java => java(case, options, &body),
        };
        Ok(GeneratedCode {
            code,
            dependencies: dependencies(self.language),
            setup_instructions: setup_instructions(self.language),
        })
    }
}

/// urlContains renders through a regex, which needs an import in Python and
/// Java.
fn needs_url_regex(case: &TestCase) -> bool {
    case.steps.iter().any(|step| {
        matches!(
            step,
            TestStep::Assert {
                kind: AssertionKind::UrlContains,
                expected: Some(_),
                ..
            }
        )
    })
}

fn script(case: &TestCase, options: &RenderOptions, body: &[String]) -> String {
    let mut out = String::new();
    out.push_str("import { test, expect } from '@playwright/test';\n\n");
    out.push_str(&format!("test('{}', async ({{ page }}) => {{\n", case.name));
    out.push_str(&format!("  test.setTimeout({});\n", options.timeout_ms));
    for line in body {
        out.push_str(&format!("  {line}\n"));
    }
    out.push_str("});\n");
    out
}

fn python(case: &TestCase, options: &RenderOptions, body: &[String]) -> String {
    let mut out = String::new();
    if needs_url_regex(case) {
        out.push_str("import re\n\n");
    }
    out.push_str("from playwright.sync_api import Page, expect\n\n\n");
    out.push_str(&format!("def test_{}(page: Page) -> None:\n", case.name));
    out.push_str(&format!(
        "    page.set_default_timeout({})\n",
        options.timeout_ms
    ));
    for line in body {
        out.push_str(&format!("    {line}\n"));
    }
    out
}

fn java(case: &TestCase, options: &RenderOptions, body: &[String]) -> String {
    let class = format!("{}Test", pascal_case(&case.name));
    let mut out = String::new();
    out.push_str("import com.microsoft.playwright.Page;\n");
    out.push_str("import com.microsoft.playwright.junit.UsePlaywright;\n");
    out.push_str("import org.junit.jupiter.api.Test;\n\n");
    if options.include_screenshots {
        out.push_str("import java.nio.file.Paths;\n");
    }
    if needs_url_regex(case) {
        out.push_str("import java.util.regex.Pattern;\n");
    }
    if options.include_screenshots || needs_url_regex(case) {
        out.push('\n');
    }
    out.push_str(
        "import static com.microsoft.playwright.assertions.PlaywrightAssertions.assertThat;\n\n",
    );
    out.push_str("@UsePlaywright\n");
    out.push_str(&format!("public class {class} {{\n"));
    out.push_str("    @Test\n");
    out.push_str(&format!("    void {}(Page page) {{\n", case.name));
    out.push_str(&format!(
        "        page.setDefaultTimeout({});\n",
        options.timeout_ms
    ));
    for line in body {
        out.push_str(&format!("        {line}\n"));
    }
    out.push_str("    }\n}\n");
    out
}

fn dependencies(language: Language) -> Vec<String> {
    match language {
        Language::TypeScript | Language::JavaScript => vec!["@playwright/test".to_string()],
        Language::Python => vec!["pytest".to_string(), "pytest-playwright".to_string()],
        Language::Java => vec!["com.microsoft.playwright:playwright".to_string()],
    }
}

fn setup_instructions(language: Language) -> String {
    match language {
        Language::TypeScript | Language::JavaScript => {
            "npm install -D @playwright/test && npx playwright install".to_string()
        }
        Language::Python => {
            "pip install pytest-playwright && playwright install".to_string()
        }
        Language::Java => {
            "Add com.microsoft.playwright:playwright to your build and run via JUnit 5"
                .to_string()
        }
    }
}
