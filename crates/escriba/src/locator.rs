//! Semantic element locators.
//!
//! A [`Locator`] describes *what* to target (a label, an accessible role, an
//! id), not *how* a particular framework selects it. The concrete selector
//! string is produced per framework by the code generator.
//!
//! Exactly one variant is populated per locator instance; the tagged serde
//! representation keeps the JSON DSL stable:
//!
//! ```json
//! { "by": "role", "role": "button", "name": "Login" }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic description of a page element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "by", rename_all = "lowercase")]
pub enum Locator {
    /// Form field identified by its visible label text
    Label {
        /// Label text
        value: String,
    },
    /// Element identified by DOM id
    Id {
        /// The id attribute value
        value: String,
    },
    /// Element identified by ARIA role, optionally narrowed by accessible name
    Role {
        /// ARIA role (e.g. "button")
        role: String,
        /// Accessible name; required for rendering, absence surfaces as an
        /// unresolved marker rather than a dropped step
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
    /// Element identified by visible text content
    Text {
        /// Text to match
        value: String,
    },
    /// Raw CSS selector, passed through verbatim
    Css {
        /// The selector
        value: String,
    },
    /// Raw XPath expression
    XPath {
        /// The expression
        value: String,
    },
}

impl Locator {
    /// Locator by visible label text
    #[must_use]
    pub fn label(value: impl Into<String>) -> Self {
        Self::Label {
            value: value.into(),
        }
    }

    /// Locator by DOM id
    #[must_use]
    pub fn id(value: impl Into<String>) -> Self {
        Self::Id {
            value: value.into(),
        }
    }

    /// Locator by ARIA role and accessible name
    #[must_use]
    pub fn role(role: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Role {
            role: role.into(),
            name: Some(name.into()),
        }
    }

    /// Role locator with no accessible name resolved yet
    #[must_use]
    pub fn role_unnamed(role: impl Into<String>) -> Self {
        Self::Role {
            role: role.into(),
            name: None,
        }
    }

    /// Locator by visible text
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text {
            value: value.into(),
        }
    }

    /// Raw CSS selector
    #[must_use]
    pub fn css(value: impl Into<String>) -> Self {
        Self::Css {
            value: value.into(),
        }
    }

    /// Raw XPath expression
    #[must_use]
    pub fn xpath(value: impl Into<String>) -> Self {
        Self::XPath {
            value: value.into(),
        }
    }

    /// Whether this locator carries everything rendering needs.
    ///
    /// A role locator without an accessible name is incomplete; renderers
    /// emit an explicit unresolved marker for it.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        match self {
            Self::Role { name, .. } => name.as_ref().is_some_and(|n| !n.is_empty()),
            Self::Label { value }
            | Self::Id { value }
            | Self::Text { value }
            | Self::Css { value }
            | Self::XPath { value } => !value.is_empty(),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Label { value } => write!(f, "label={value}"),
            Self::Id { value } => write!(f, "id={value}"),
            Self::Role { role, name } => match name {
                Some(name) => write!(f, "role={role}[name={name}]"),
                None => write!(f, "role={role}[name=?]"),
            },
            Self::Text { value } => write!(f, "text={value}"),
            Self::Css { value } => write!(f, "css={value}"),
            Self::XPath { value } => write!(f, "xpath={value}"),
        }
    }
}
