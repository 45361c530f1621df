//! Selenium renderer (Python, Java, JavaScript).
//!
//! Selectors are spliced in as `By.*` expressions from the locator strategy.
//! A locator Selenium cannot express shows up as an unresolved marker right
//! where the selector would be, which keeps the gap visible in review.

use escriba::{AssertionKind, TestCase, TestStep};

use crate::error::Result;
use crate::literal::quote;
use crate::options::{Framework, Language, RenderOptions};
use crate::render::{comment_prefix, full_url, pascal_case, GeneratedCode, Renderer};
use crate::selector::to_selector;

/// Renders TestCases as Selenium WebDriver tests.
#[derive(Debug, Clone, Copy)]
pub struct SeleniumRenderer {
    language: Language,
}

impl SeleniumRenderer {
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
                    Language::Python => format!("driver.get({url})"),
                    Language::Java => format!("driver.get({url});"),
                    _ => format!("await driver.get({url});"),
                }
            }
            TestStep::Fill { locator, text } => {
                let sel = to_selector(locator, Framework::Selenium);
                let value = quote(text, lang);
                match lang {
                    Language::Python => {
                        format!("driver.find_element({sel}).send_keys({value})")
                    }
                    Language::Java => {
                        format!("driver.findElement({sel}).sendKeys({value});")
                    }
                    _ => format!("await driver.findElement({sel}).sendKeys({value});"),
                }
            }
            TestStep::Click { locator } => {
                let sel = to_selector(locator, Framework::Selenium);
                match lang {
                    Language::Python => format!("driver.find_element({sel}).click()"),
                    Language::Java => format!("driver.findElement({sel}).click();"),
                    _ => format!("await driver.findElement({sel}).click();"),
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
        let sel = locator.map(|l| to_selector(l, Framework::Selenium));
        let value = expected.map(|v| quote(v, lang));

        let unsupported = |reason: &str| {
            format!(
                "{} unsupported assertion: {kind} ({reason})",
                comment_prefix(lang)
            )
        };

        match (kind, value) {
            (AssertionKind::UrlContains, Some(v)) => match lang {
                Language::Python => format!("assert {v} in driver.current_url"),
                Language::Java => format!(
                    "Assertions.assertTrue(driver.getCurrentUrl().contains({v}));"
                ),
                _ => format!("assert.ok((await driver.getCurrentUrl()).includes({v}));"),
            },
            (AssertionKind::ContainsText, Some(v)) => match (&sel, lang) {
                (Some(sel), Language::Python) => {
                    format!("assert {v} in driver.find_element({sel}).text")
                }
                (None, Language::Python) => format!("assert {v} in driver.page_source"),
                (Some(sel), Language::Java) => format!(
                    "Assertions.assertTrue(driver.findElement({sel}).getText().contains({v}));"
                ),
                (None, Language::Java) => {
                    format!("Assertions.assertTrue(driver.getPageSource().contains({v}));")
                }
                (Some(sel), _) => format!(
                    "assert.ok((await driver.findElement({sel}).getText()).includes({v}));"
                ),
                (None, _) => {
                    format!("assert.ok((await driver.getPageSource()).includes({v}));")
                }
            },
            (AssertionKind::ExactText, Some(v)) => match (&sel, lang) {
                (Some(sel), Language::Python) => {
                    format!("assert driver.find_element({sel}).text == {v}")
                }
                (Some(sel), Language::Java) => format!(
                    "Assertions.assertEquals({v}, driver.findElement({sel}).getText());"
                ),
                (Some(sel), _) => format!(
                    "assert.strictEqual(await driver.findElement({sel}).getText(), {v});"
                ),
                (None, _) => unsupported("no locator"),
            },
            (AssertionKind::HasValue, Some(v)) => match (&sel, lang) {
                (Some(sel), Language::Python) => format!(
                    "assert driver.find_element({sel}).get_attribute(\"value\") == {v}"
                ),
                (Some(sel), Language::Java) => format!(
                    "Assertions.assertEquals({v}, driver.findElement({sel}).getAttribute(\"value\"));"
                ),
                (Some(sel), _) => format!(
                    "assert.strictEqual(await driver.findElement({sel}).getAttribute(\"value\"), {v});"
                ),
                (None, _) => unsupported("no locator"),
            },
            (AssertionKind::Visible, _) => match (&sel, lang) {
                (Some(sel), Language::Python) => {
                    format!("assert driver.find_element({sel}).is_displayed()")
                }
                (Some(sel), Language::Java) => format!(
                    "Assertions.assertTrue(driver.findElement({sel}).isDisplayed());"
                ),
                (Some(sel), _) => {
                    format!("assert.ok(await driver.findElement({sel}).isDisplayed());")
                }
                (None, _) => unsupported("no locator"),
            },
            (AssertionKind::IsEnabled, _) => match (&sel, lang) {
                (Some(sel), Language::Python) => {
                    format!("assert driver.find_element({sel}).is_enabled()")
                }
                (Some(sel), Language::Java) => format!(
                    "Assertions.assertTrue(driver.findElement({sel}).isEnabled());"
                ),
                (Some(sel), _) => {
                    format!("assert.ok(await driver.findElement({sel}).isEnabled());")
                }
                (None, _) => unsupported("no locator"),
            },
            (AssertionKind::IsDisabled, _) => match (&sel, lang) {
                (Some(sel), Language::Python) => {
                    format!("assert not driver.find_element({sel}).is_enabled()")
                }
                (Some(sel), Language::Java) => format!(
                    "Assertions.assertFalse(driver.findElement({sel}).isEnabled());"
                ),
                (Some(sel), _) => {
                    format!("assert.ok(!(await driver.findElement({sel}).isEnabled()));")
                }
                (None, _) => unsupported("no locator"),
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
        match self.language {
            Language::Python => {
                format!("driver.save_screenshot({})", quote(&format!("{name}.png"), self.language))
            }
            lang => format!(
                "{} screenshot capture not rendered for this target",
                comment_prefix(lang)
            ),
        }
    }
}

impl Renderer for SeleniumRenderer {
    fn render(&self, case: &TestCase, options: &RenderOptions) -> Result<GeneratedCode> {
        let body = self.body(case, options);
        let code = match self.language {
            Language::Python => python(case, &body),
            Language::Java => java(case, &body),
            _ => javascript(case, &body),
        };
        Ok(GeneratedCode {
            code,
            dependencies: dependencies(self.language),
            setup_instructions: setup_instructions(self.language),
        })
    }
}

fn python(case: &TestCase, body: &[String]) -> String {
    let mut out = String::new();
    out.push_str("from selenium import webdriver\n");
    out.push_str("from selenium.webdriver.common.by import By\n\n\n");
    out.push_str(&format!("def test_{}():\n", case.name));
    out.push_str("    driver = webdriver.Chrome()\n");
    for line in body {
        out.push_str(&format!("    {line}\n"));
    }
    out.push_str("    driver.quit()\n");
    out
}

fn java(case: &TestCase, body: &[String]) -> String {
    let class = format!("{}Test", pascal_case(&case.name));
    let mut out = String::new();
    out.push_str("import org.junit.jupiter.api.Assertions;\n");
    out.push_str("import org.junit.jupiter.api.Test;\n");
    out.push_str("import org.openqa.selenium.By;\n");
    out.push_str("import org.openqa.selenium.WebDriver;\n");
    out.push_str("import org.openqa.selenium.chrome.ChromeDriver;\n\n");
    out.push_str(&format!("public class {class} {{\n"));
    out.push_str("    @Test\n");
    out.push_str(&format!("    void {}() {{\n", case.name));
    out.push_str("        WebDriver driver = new ChromeDriver();\n");
    for line in body {
        out.push_str(&format!("        {line}\n"));
    }
    out.push_str("        driver.quit();\n");
    out.push_str("    }\n}\n");
    out
}

fn javascript(case: &TestCase, body: &[String]) -> String {
    let mut out = String::new();
    out.push_str("const { Builder, By } = require('selenium-webdriver');\n");
    out.push_str("const assert = require('assert');\n\n");
    out.push_str(&format!("async function {}() {{\n", case.name));
    out.push_str("  const driver = await new Builder().forBrowser('chrome').build();\n");
    for line in body {
        out.push_str(&format!("  {line}\n"));
    }
    out.push_str("  await driver.quit();\n");
    out.push_str("}\n\n");
    out.push_str(&format!("{}();\n", case.name));
    out
}

fn dependencies(language: Language) -> Vec<String> {
    match language {
        Language::Python => vec!["selenium".to_string(), "pytest".to_string()],
        Language::Java => vec![
            "org.seleniumhq.selenium:selenium-java".to_string(),
            "org.junit.jupiter:junit-jupiter".to_string(),
        ],
        _ => vec!["selenium-webdriver".to_string()],
    }
}

fn setup_instructions(language: Language) -> String {
    match language {
        Language::Python => "pip install selenium pytest and install chromedriver".to_string(),
        Language::Java => {
            "Add selenium-java and junit-jupiter to your build, install chromedriver".to_string()
        }
        _ => "npm install selenium-webdriver and install chromedriver".to_string(),
    }
}
