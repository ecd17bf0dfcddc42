//! Format rules: caller patterns, email shape, and unsigned numbers.

use std::sync::LazyLock;

use regex::Regex;

use super::{Rule, RuleKind};
use crate::messages::Locale;

/// Email shape accepted by [`Email`].
///
/// Deliberately permissive and not RFC complete: local part of
/// `[A-Za-z0-9_.-]`, one or more dotted host labels, and a 2–4 character
/// alphanumeric suffix.
pub const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9_.\-]+@([a-zA-Z0-9\-]+\.)+[a-zA-Z0-9]{2,4}$";

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern is valid"));

// ============================================================================
// PATTERN
// ============================================================================

/// ASCII word characters, the browser meaning of `\w`.
const WORD: &str = "0-9A-Za-z_";
const WORD_BOUNDARY: &str =
    "(?:(?<=[0-9A-Za-z_])(?![0-9A-Za-z_])|(?<![0-9A-Za-z_])(?=[0-9A-Za-z_]))";
const NOT_WORD_BOUNDARY: &str =
    "(?:(?<=[0-9A-Za-z_])(?=[0-9A-Za-z_])|(?<![0-9A-Za-z_])(?![0-9A-Za-z_]))";

/// Fails when the value does not match a `pattern` attribute.
///
/// Patterns are read the way browsers read them: look-around and
/// back-references are allowed, and `\d`, `\w`, `\b` only know ASCII. The
/// expression is searched for anywhere in the value; anchor it with `^…$`
/// to match the whole value.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: fancy_regex::Regex,
}

impl Pattern {
    /// Compiles `pattern` into a rule.
    pub fn compile(pattern: &str) -> Result<Self, fancy_regex::Error> {
        let regex = fancy_regex::Regex::new(&browser_classes(pattern))?;
        Ok(Self {
            source: pattern.to_owned(),
            regex,
        })
    }

    /// The pattern as written by the caller.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl Rule for Pattern {
    fn kind(&self) -> RuleKind {
        RuleKind::Pattern
    }

    fn check(&self, value: &str) -> bool {
        // A search that exceeds the backtrack limit counts as no match.
        self.regex.is_match(value).unwrap_or(false)
    }

    fn message(&self, locale: &Locale) -> String {
        locale.messages().has_bad_symbols.clone()
    }
}

/// Rewrites the Unicode-aware shorthand classes into their ASCII forms.
fn browser_classes(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut in_class = false;
    let mut chars = pattern.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                let Some(escaped) = chars.next() else {
                    out.push(c);
                    break;
                };
                match (escaped, in_class) {
                    ('d', false) => out.push_str("[0-9]"),
                    ('d', true) => out.push_str("0-9"),
                    ('D', _) => out.push_str("[^0-9]"),
                    ('w', false) => {
                        out.push('[');
                        out.push_str(WORD);
                        out.push(']');
                    }
                    ('w', true) => out.push_str(WORD),
                    ('W', _) => {
                        out.push_str("[^");
                        out.push_str(WORD);
                        out.push(']');
                    }
                    ('b', false) => out.push_str(WORD_BOUNDARY),
                    ('B', false) => out.push_str(NOT_WORD_BOUNDARY),
                    // backspace inside a class
                    ('b', true) => out.push_str("\\x08"),
                    (other, _) => {
                        out.push(c);
                        out.push(other);
                    }
                }
            }
            // a bracket inside a class is a literal, not a nested class
            '[' if in_class => out.push_str("\\["),
            '[' => {
                in_class = true;
                out.push(c);
            }
            ']' if in_class => {
                in_class = false;
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

crate::rule! {
    /// Fails when the value is not shaped like an email address.
    pub Email => Email;
    check(value) { EMAIL_REGEX.is_match(value) }
    message(locale) { locale.messages().invalid_email.clone() }
}

crate::rule! {
    /// Fails when the value contains anything but ASCII digits.
    ///
    /// The empty string passes; emptiness is [`Required`](super::Required)'s concern.
    pub Number => Number;
    check(value) { value.bytes().all(|b| b.is_ascii_digit()) }
    message(locale) { locale.messages().should_be_a_number.clone() }
}
