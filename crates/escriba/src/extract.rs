//! Regex-driven value extraction from free-text instructions.
//!
//! Each semantic field has an ordered list of pattern alternatives; the first
//! alternative that produces an acceptable match wins and later, looser
//! patterns never fire. Extraction never fails and never invents a value:
//! a field with no match is simply absent from the map.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Range;
use std::sync::LazyLock;
use tracing::debug;

/// Semantic fields the extractor recognizes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    /// Login username
    Username,
    /// Login password
    Password,
    /// Email address
    Email,
    /// Explicit URL or path
    Url,
    /// Button text
    Button,
    /// Expected-outcome phrase
    Expected,
}

impl Field {
    /// All fields, in extraction order.
    pub const ALL: [Self; 6] = [
        Self::Username,
        Self::Password,
        Self::Email,
        Self::Url,
        Self::Button,
        Self::Expected,
    ];

    /// Lowercase field name as it appears in the JSON DSL.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Password => "password",
            Self::Email => "email",
            Self::Url => "url",
            Self::Button => "button",
            Self::Expected => "expected",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Words that look like values to the loose patterns but never are.
const STOPWORDS: &[&str] = &[
    "a", "an", "and", "at", "but", "expect", "expects", "for", "in", "is", "it", "of", "on", "or",
    "see", "should", "that", "the", "then", "this", "to", "with",
];

fn is_stopword(word: &str) -> bool {
    STOPWORDS.iter().any(|s| s.eq_ignore_ascii_case(word))
}

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).unwrap_or_else(|e| panic!("invalid builtin pattern {p:?}: {e}")))
        .collect()
}

static USERNAME_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r#"(?i)\busername\s+"([^"]+)""#,
        r"(?i)\busername\s+(?:is\s+|of\s+)?([A-Za-z0-9._@-]+)",
        r"(?i)\buser\s+(?:is\s+)?([A-Za-z0-9._@-]+)",
        r"(?i)\blog\s*in\s+as\s+([A-Za-z0-9._@-]+)",
    ])
});

static PASSWORD_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r#"(?i)\bpassword\s+"([^"]+)""#,
        r"(?i)\bpassword\s+(?:is\s+|of\s+)?([A-Za-z0-9._@-]+)",
        r"(?i)\bpass\s+([A-Za-z0-9._@-]+)",
    ])
});

static EMAIL_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(?i)\bemail\s+(?:is\s+)?([A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,})",
        r"([A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,})",
    ])
});

static URL_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r#"(https?://[^\s"'<>]+)"#,
        r"(?i)\b(?:go(?:es)?\s+to|navigate(?:s)?\s+to|open(?:s)?|visit(?:s)?)\s+(/[A-Za-z0-9._/?=&#%-]*)",
    ])
});

static BUTTON_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r#"(?i)\bclick(?:s|ing)?\s+(?:on\s+)?(?:the\s+)?"([^"]+)""#,
        r#"(?i)\bpress(?:es)?\s+(?:the\s+)?"([^"]+)""#,
        r#"(?i)"([^"]+)"\s+button"#,
        r"(?i)\b(?:click(?:s|ing)?|press(?:es)?)\s+(?:on\s+)?(?:the\s+)?([A-Za-z][A-Za-z0-9 ]*?)\s+button",
    ])
});

static EXPECTED_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r#"(?i)\bexpect(?:s|ed|ing)?\s+(?:to\s+see\s+)?"([^"]+)""#,
        r#"(?i)\bshould\s+(?:see|show|display|contain)\s+"([^"]+)""#,
        r#"(?i)\bsee(?:s)?\s+(?:the\s+)?(?:message\s+)?"([^"]+)""#,
    ])
});

fn patterns_for(field: Field) -> &'static [Regex] {
    match field {
        Field::Username => &USERNAME_PATTERNS,
        Field::Password => &PASSWORD_PATTERNS,
        Field::Email => &EMAIL_PATTERNS,
        Field::Url => &URL_PATTERNS,
        Field::Button => &BUTTON_PATTERNS,
        Field::Expected => &EXPECTED_PATTERNS,
    }
}

/// Literal values extracted from one instruction.
///
/// Built once per instruction and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractedValues {
    values: BTreeMap<Field, String>,
}

impl ExtractedValues {
    /// Extract all recognized fields from the instruction text.
    ///
    /// Username and password are extracted first; the password patterns are
    /// forbidden from capturing text inside the region the username pattern
    /// already claimed.
    #[must_use]
    pub fn extract(text: &str) -> Self {
        let mut values = BTreeMap::new();

        let username = find_first(patterns_for(Field::Username), text, None);
        if let Some((value, _)) = &username {
            values.insert(Field::Username, value.clone());
        }
        let claimed = username.as_ref().map(|(_, span)| span.clone());

        if let Some((value, _)) = find_first(patterns_for(Field::Password), text, claimed.as_ref())
        {
            values.insert(Field::Password, value);
        }

        for field in [Field::Email, Field::Url, Field::Button, Field::Expected] {
            if let Some((value, _)) = find_first(patterns_for(field), text, None) {
                values.insert(field, value);
            }
        }

        for (field, value) in &values {
            debug!(field = %field, value = %value, "extracted value");
        }
        Self { values }
    }

    /// Get the extracted value for a field.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    /// Whether no field matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of extracted fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Iterate fields and values in deterministic (field) order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.values.iter().map(|(f, v)| (*f, v.as_str()))
    }
}

/// First acceptable match across the ordered alternatives.
///
/// Returns the captured value and the *full* match span (keyword included),
/// which is what the password exclusion check claims against.
fn find_first(
    patterns: &[Regex],
    text: &str,
    excluded: Option<&Range<usize>>,
) -> Option<(String, Range<usize>)> {
    for re in patterns {
        for caps in re.captures_iter(text) {
            let capture = caps.get(1).or_else(|| caps.get(0))?;
            let value = capture.as_str().trim();
            if value.is_empty() || is_stopword(value) {
                continue;
            }
            if let Some(claimed) = excluded {
                let span = capture.range();
                if span.start < claimed.end && claimed.start < span.end {
                    continue;
                }
            }
            let full = caps.get(0)?.range();
            return Some((value.to_string(), full));
        }
    }
    None
}

/// Type tag carried by a `[LOCK <TYPE>] <value>` annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LockKind {
    /// Navigation URL must appear verbatim
    Url,
    /// Selector string must appear verbatim
    Selector,
    /// Input value must appear verbatim
    Value,
    /// Assertion text must appear verbatim
    AssertionText,
    /// Assertion type name must appear verbatim
    AssertionType,
}

impl LockKind {
    /// Uppercase tag as written in instruction text.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Url => "URL",
            Self::Selector => "SELECTOR",
            Self::Value => "VALUE",
            Self::AssertionText => "ASSERTION_TEXT",
            Self::AssertionType => "ASSERTION_TYPE",
        }
    }
}

impl fmt::Display for LockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A value the author marked mandatory-verbatim for the rendered output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockedValue {
    /// What kind of value is locked
    pub kind: LockKind,
    /// The literal value
    pub value: String,
}

static LOCK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[LOCK (URL|SELECTOR|VALUE|ASSERTION_TEXT|ASSERTION_TYPE)\]\s*([^\[\r\n]+)")
        .unwrap_or_else(|e| panic!("invalid lock pattern: {e}"))
});

/// Parse all `[LOCK <TYPE>] <value>` annotations, in order of appearance.
#[must_use]
pub fn parse_locked(text: &str) -> Vec<LockedValue> {
    LOCK_PATTERN
        .captures_iter(text)
        .filter_map(|caps| {
            let kind = match caps.get(1)?.as_str() {
                "URL" => LockKind::Url,
                "SELECTOR" => LockKind::Selector,
                "VALUE" => LockKind::Value,
                "ASSERTION_TEXT" => LockKind::AssertionText,
                "ASSERTION_TYPE" => LockKind::AssertionType,
                _ => return None,
            };
            let value = caps.get(2)?.as_str().trim().to_string();
            if value.is_empty() {
                None
            } else {
                Some(LockedValue { kind, value })
            }
        })
        .collect()
}
