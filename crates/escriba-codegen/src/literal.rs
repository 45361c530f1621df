//! String-literal quoting for target languages.
//!
//! Values are embedded character-for-character; the only transformation is
//! the escaping the target language's double-quoted literal syntax requires.

use crate::options::Language;

/// Quote a value as a double-quoted string literal in the target language.
#[must_use]
pub fn quote(value: &str, language: Language) -> String {
    // TS/JS, Python and Java share the same escapes for the characters that
    // can actually occur in extracted values.
    let _ = language;
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_value_passes_through() {
        assert_eq!(quote("Sam", Language::TypeScript), r#""Sam""#);
    }

    #[test]
    fn quotes_and_backslashes_are_escaped() {
        assert_eq!(
            quote(r#"say "hi" \ bye"#, Language::Python),
            r#""say \"hi\" \\ bye""#
        );
    }

    #[test]
    fn selector_with_quotes() {
        assert_eq!(
            quote(r#"label:has-text("Username")"#, Language::JavaScript),
            r#""label:has-text(\"Username\")""#
        );
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            // Values with no escape-worthy characters embed char-for-char.
            #[test]
            fn plain_values_embed_verbatim(value in "[A-Za-z0-9 ._@/-]{0,40}") {
                for language in [
                    Language::TypeScript,
                    Language::JavaScript,
                    Language::Python,
                    Language::Java,
                ] {
                    prop_assert_eq!(quote(&value, language), format!("\"{value}\""));
                }
            }
        }
    }
}
