//! Validator configuration
//!
//! Everything that used to be ambient state (message table, plural rule,
//! range comparison, reveal behaviour) travels in a [`ValidatorConfig`]
//! handed to the controller at construction.
//!
//! A configuration can also be loaded from a settings document; every key is
//! optional:
//!
//! ```json
//! {
//!   "locale": "ru-RU",
//!   "rangeComparison": "numeric",
//!   "reveal": { "extraOffset": 120, "focus": false },
//!   "messages": { "valueRequired": "Заполните поле." }
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::messages::{Locale, MessageTable};
use crate::rules::RangeComparison;

/// Default gap kept above a revealed field.
pub const DEFAULT_EXTRA_OFFSET: i32 = 90;

// ============================================================================
// REVEAL OPTIONS
// ============================================================================

/// What happens to the viewport when a failure is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RevealOptions {
    /// Gap kept above the field after scrolling.
    pub extra_offset: i32,
    /// Focus the field after scrolling. Composite widgets are never focused.
    pub focus: bool,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            extra_offset: DEFAULT_EXTRA_OFFSET,
            focus: true,
        }
    }
}

// ============================================================================
// VALIDATOR CONFIG
// ============================================================================

/// Configuration of one validator instance.
#[derive(Debug, Clone, Default)]
pub struct ValidatorConfig {
    pub locale: Locale,
    pub range_comparison: RangeComparison,
    pub reveal: RevealOptions,
}

impl ValidatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_range_comparison(mut self, comparison: RangeComparison) -> Self {
        self.range_comparison = comparison;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_reveal(mut self, reveal: RevealOptions) -> Self {
        self.reveal = reveal;
        self
    }

    /// Loads a configuration from a JSON settings document.
    ///
    /// `messages` entries replace the chosen locale's messages key by key.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json).map_err(Error::Config)?;

        let mut locale = match settings.locale.as_deref() {
            Some(tag) => Locale::for_tag(tag)?,
            None => Locale::default(),
        };
        if !settings.messages.is_empty() {
            *locale.messages_mut() = merge_messages(locale.messages(), settings.messages)?;
        }

        tracing::debug!(
            locale = locale.tag(),
            range_comparison = ?settings.range_comparison,
            "validator configuration loaded"
        );

        Ok(Self {
            locale,
            range_comparison: settings.range_comparison,
            reveal: settings.reveal,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
struct Settings {
    locale: Option<String>,
    range_comparison: RangeComparison,
    reveal: RevealOptions,
    messages: Map<String, Value>,
}

fn merge_messages(base: &MessageTable, overrides: Map<String, Value>) -> Result<MessageTable> {
    let mut table = match serde_json::to_value(base).map_err(Error::Config)? {
        Value::Object(table) => table,
        _ => Map::new(),
    };
    table.extend(overrides);
    serde_json::from_value(Value::Object(table)).map_err(Error::Config)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults() {
        let config = ValidatorConfig::default();
        assert_eq!(config.locale.tag(), "en-US");
        assert_eq!(config.range_comparison, RangeComparison::Lexicographic);
        assert_eq!(
            config.reveal,
            RevealOptions {
                extra_offset: 90,
                focus: true
            }
        );
    }

    #[test]
    fn empty_document_is_default() {
        let config = ValidatorConfig::from_json("{}").unwrap();
        assert_eq!(config.locale.tag(), "en-US");
        assert_eq!(config.reveal, RevealOptions::default());
    }

    #[test]
    fn full_document() {
        let config = ValidatorConfig::from_json(
            r#"{
                "locale": "ru-RU",
                "rangeComparison": "numeric",
                "reveal": { "extraOffset": 120 },
                "messages": { "valueRequired": "Заполните поле." }
            }"#,
        )
        .unwrap();

        assert_eq!(config.locale.tag(), "ru-RU");
        assert_eq!(config.range_comparison, RangeComparison::Numeric);
        assert_eq!(config.reveal.extra_offset, 120);
        assert!(config.reveal.focus);
        assert_eq!(config.locale.messages().value_required, "Заполните поле.");
        assert_eq!(
            config.locale.messages().invalid_email,
            MessageTable::russian().invalid_email
        );
    }

    #[test]
    fn unknown_locale_is_rejected() {
        assert!(matches!(
            ValidatorConfig::from_json(r#"{"locale": "de-DE"}"#),
            Err(Error::UnknownLocale(_))
        ));
    }

    #[test]
    fn misspelt_message_key_is_config_error() {
        let result = ValidatorConfig::from_json(r#"{"messages": {"valueRequried": "x"}}"#);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn malformed_document_is_config_error() {
        assert!(matches!(
            ValidatorConfig::from_json(r#"{"rangeComparison": "fuzzy"}"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            ValidatorConfig::from_json(r#"{"messages": {"valueRequired": 3}}"#),
            Err(Error::Config(_))
        ));
    }
}
