//! Message tables, locales and per-field overrides
//!
//! Default error text comes from a [`MessageTable`] owned by the [`Locale`]
//! in the validator configuration. Keys mirror the localisation files the
//! tables are usually shipped as, so a table can be loaded straight from JSON:
//!
//! ```json
//! { "valueRequired": "Required.", "shouldBeNoLessThan": "At least {min}." }
//! ```
//!
//! Missing keys fall back to the English table. Unknown keys are rejected,
//! so a misspelt key is reported instead of silently ignored.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::field::FieldId;

/// Token replaced by the `min` bound in messages.
pub const MIN_TOKEN: &str = "{min}";
/// Token replaced by the `max` bound in messages.
pub const MAX_TOKEN: &str = "{max}";

// ============================================================================
// PLURALS
// ============================================================================

/// Plural category selected for a count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluralCategory {
    One,
    Few,
    Many,
}

/// Chooses the plural category of a noun for a count in one language.
pub trait Pluralizer: fmt::Debug + Send + Sync {
    fn category(&self, count: usize) -> PluralCategory;
}

/// `1 character`, `2 characters`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishPlurals;

impl Pluralizer for EnglishPlurals {
    fn category(&self, count: usize) -> PluralCategory {
        if count == 1 {
            PluralCategory::One
        } else {
            PluralCategory::Many
        }
    }
}

/// Russian/Ukrainian/Belarusian rule: `1 символ`, `2 символа`, `5 символов`,
/// `11 символов`, `21 символ`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlavicPlurals;

impl Pluralizer for SlavicPlurals {
    fn category(&self, count: usize) -> PluralCategory {
        let (rem10, rem100) = (count % 10, count % 100);
        if rem10 == 1 && rem100 != 11 {
            PluralCategory::One
        } else if (2..=4).contains(&rem10) && !(12..=14).contains(&rem100) {
            PluralCategory::Few
        } else {
            PluralCategory::Many
        }
    }
}

/// The three declined forms of a noun.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NounForms {
    pub one: String,
    pub few: String,
    pub many: String,
}

impl NounForms {
    pub fn new(one: impl Into<String>, few: impl Into<String>, many: impl Into<String>) -> Self {
        Self {
            one: one.into(),
            few: few.into(),
            many: many.into(),
        }
    }

    /// Picks the form matching `count`.
    pub fn decline(&self, count: usize, plurals: &dyn Pluralizer) -> &str {
        match plurals.category(count) {
            PluralCategory::One => &self.one,
            PluralCategory::Few => &self.few,
            PluralCategory::Many => &self.many,
        }
    }
}

// ============================================================================
// MESSAGE TABLE
// ============================================================================

/// Default error messages, one per rule kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct MessageTable {
    pub value_required: String,
    pub has_bad_symbols: String,
    /// Supports the `{min}` token.
    pub should_be_no_less_than: String,
    /// Supports the `{max}` token.
    pub should_be_no_greater_than: String,
    pub invalid_email: String,
    pub should_be_a_number: String,
    /// `{min}` becomes `"<count> <declined noun>"`.
    pub should_contain_min_characters: String,
    pub characters: NounForms,
}

impl MessageTable {
    pub fn english() -> Self {
        Self {
            value_required: "This field is required.".into(),
            has_bad_symbols: "This field contains invalid characters.".into(),
            should_be_no_less_than: "This field should be no less than {min}.".into(),
            should_be_no_greater_than: "This field should be no greater than {max}.".into(),
            invalid_email: "This is not a valid email.".into(),
            should_be_a_number: "This field should contain a number.".into(),
            should_contain_min_characters: "This field should contain at least {min}.".into(),
            characters: NounForms::new("character", "characters", "characters"),
        }
    }

    pub fn russian() -> Self {
        Self {
            value_required: "Это поле обязательное.".into(),
            has_bad_symbols: "В этом поле есть недопустимые символы.".into(),
            should_be_no_less_than: "Это поле должно быть не меньше {min}.".into(),
            should_be_no_greater_than: "Это поле должно быть не больше {max}.".into(),
            invalid_email: "Это неправильный email.".into(),
            should_be_a_number: "В этом поле должно быть число.".into(),
            should_contain_min_characters: "Минимальное количество символов в этом поле — {min}."
                .into(),
            characters: NounForms::new("символ", "символа", "символов"),
        }
    }

    /// Parses a table from JSON; absent keys keep their English text.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(Error::Config)
    }

    pub fn below_min(&self, min: &str) -> String {
        self.should_be_no_less_than.replace(MIN_TOKEN, min)
    }

    pub fn above_max(&self, max: &str) -> String {
        self.should_be_no_greater_than.replace(MAX_TOKEN, max)
    }

    pub fn too_short(&self, min_length: usize, plurals: &dyn Pluralizer) -> String {
        let count = format!(
            "{min_length} {}",
            self.characters.decline(min_length, plurals)
        );
        self.should_contain_min_characters.replace(MIN_TOKEN, &count)
    }
}

impl Default for MessageTable {
    fn default() -> Self {
        Self::english()
    }
}

// ============================================================================
// LOCALE
// ============================================================================

/// A message table together with the plural rule of its language.
#[derive(Debug, Clone)]
pub struct Locale {
    tag: Cow<'static, str>,
    messages: MessageTable,
    plurals: Arc<dyn Pluralizer>,
}

impl Locale {
    pub fn new(
        tag: impl Into<Cow<'static, str>>,
        messages: MessageTable,
        plurals: impl Pluralizer + 'static,
    ) -> Self {
        Self {
            tag: tag.into(),
            messages,
            plurals: Arc::new(plurals),
        }
    }

    pub fn english() -> Self {
        Self::new("en-US", MessageTable::english(), EnglishPlurals)
    }

    pub fn russian() -> Self {
        Self::new("ru-RU", MessageTable::russian(), SlavicPlurals)
    }

    /// Looks up a built-in locale by language tag (`en`, `en-US`, `ru`, `ru-RU`).
    pub fn for_tag(tag: &str) -> Result<Self> {
        let language = tag.split(['-', '_']).next().unwrap_or(tag);
        match language.to_ascii_lowercase().as_str() {
            "en" => Ok(Self::english()),
            "ru" => Ok(Self::russian()),
            _ => Err(Error::UnknownLocale(tag.to_owned())),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn messages(&self) -> &MessageTable {
        &self.messages
    }

    pub fn messages_mut(&mut self) -> &mut MessageTable {
        &mut self.messages
    }

    pub fn plurals(&self) -> &dyn Pluralizer {
        self.plurals.as_ref()
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::english()
    }
}

// ============================================================================
// OVERRIDES
// ============================================================================

/// Caller-supplied messages for one field, keyed by attribute name.
///
/// `type` covers both the number and the email check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageOverrides {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_mismatch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<String>,
}

impl MessageOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn type_mismatch(mut self, message: impl Into<String>) -> Self {
        self.type_mismatch = Some(message.into());
        self
    }

    pub fn required(mut self, message: impl Into<String>) -> Self {
        self.required = Some(message.into());
        self
    }

    pub fn pattern(mut self, message: impl Into<String>) -> Self {
        self.pattern = Some(message.into());
        self
    }

    pub fn min(mut self, message: impl Into<String>) -> Self {
        self.min = Some(message.into());
        self
    }

    pub fn max(mut self, message: impl Into<String>) -> Self {
        self.max = Some(message.into());
        self
    }
}

/// Overrides for a whole form, keyed by field id.
pub type FormMessages = HashMap<FieldId, MessageOverrides>;
