//! Abstract test steps.
//!
//! A [`TestStep`] is one browser action in the intermediate representation:
//! navigate, fill, click, or assert. Steps are serializable (the JSON DSL)
//! and ordered; renderers must emit statements in exactly this order.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::locator::Locator;

/// Marker embedded wherever a required value was absent from the instruction.
///
/// Strict mode never invents credentials; a fill step whose value could not
/// be extracted carries this marker and the strict validator flags it.
#[must_use]
pub fn not_specified_marker(field: &str) -> String {
    format!("<not specified: {field}>")
}

/// Whether a rendered value or code fragment contains a not-specified marker.
#[must_use]
pub fn contains_not_specified(text: &str) -> bool {
    text.contains("<not specified:")
}

/// Assertion kinds supported by the step representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AssertionKind {
    /// Element (or page) contains the expected text
    ContainsText,
    /// Element text equals the expected value exactly
    ExactText,
    /// Element is visible
    Visible,
    /// Current URL contains the expected fragment
    UrlContains,
    /// Input element has the expected value
    HasValue,
    /// Element is enabled
    IsEnabled,
    /// Element is disabled
    IsDisabled,
}

impl fmt::Display for AssertionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::ContainsText => "containsText",
            Self::ExactText => "exactText",
            Self::Visible => "visible",
            Self::UrlContains => "urlContains",
            Self::HasValue => "hasValue",
            Self::IsEnabled => "isEnabled",
            Self::IsDisabled => "isDisabled",
        };
        write!(f, "{s}")
    }
}

/// One abstract browser action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum TestStep {
    /// Navigate to a path or absolute URL
    Goto {
        /// Target path ("/login") or absolute URL
        target: String,
    },
    /// Fill a form field with literal text
    Fill {
        /// Target element
        locator: Locator,
        /// Literal text to enter (may be a not-specified marker)
        text: String,
    },
    /// Click an element
    Click {
        /// Target element
        locator: Locator,
    },
    /// Assert a condition about the page
    Assert {
        /// What to check
        kind: AssertionKind,
        /// Target element; page-level assertions carry none
        #[serde(default, skip_serializing_if = "Option::is_none")]
        locator: Option<Locator>,
        /// Expected value for text/value/url assertions
        #[serde(default, skip_serializing_if = "Option::is_none")]
        expected: Option<String>,
    },
}

impl TestStep {
    /// Human-readable one-line description (used for `resolved_steps` output).
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Goto { target } => format!("goto {target}"),
            Self::Fill { locator, text } => format!("fill {locator} with \"{text}\""),
            Self::Click { locator } => format!("click {locator}"),
            Self::Assert {
                kind,
                locator,
                expected,
            } => {
                let mut out = format!("assert {kind}");
                if let Some(locator) = locator {
                    out.push_str(&format!(" on {locator}"));
                }
                if let Some(expected) = expected {
                    out.push_str(&format!(" \"{expected}\""));
                }
                out
            }
        }
    }

    /// The locator this step interacts with, if any.
    #[must_use]
    pub fn locator(&self) -> Option<&Locator> {
        match self {
            Self::Goto { .. } => None,
            Self::Fill { locator, .. } | Self::Click { locator } => Some(locator),
            Self::Assert { locator, .. } => locator.as_ref(),
        }
    }

}
