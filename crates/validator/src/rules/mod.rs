//! Rule evaluator building blocks
//!
//! Every check is a [`Rule`]: a pure predicate over a field's current value
//! plus the default message it reports. The same predicate doubles as the
//! recovery condition: once a failed field's value passes its rule again,
//! the error is cleared.
//!
//! Built-in rules:
//!
//! - **Presence**: [`Required`], [`MinLength`]
//! - **Format**: [`Pattern`], [`Email`], [`Number`]
//! - **Range**: [`Min`], [`Max`] (see [`RangeComparison`])
//! - **Caller-defined**: [`Predicate`]
//!
//! Callers can add their own rules by implementing [`Rule`] and running them
//! through [`Validator::validate_with`](crate::validator::Validator::validate_with).

use std::fmt;
use std::sync::Arc;

use smallvec::{SmallVec, smallvec};

use crate::listeners::EventKind;
use crate::messages::Locale;

pub mod format;
pub mod presence;
pub mod range;

pub use format::{EMAIL_PATTERN, Email, Number, Pattern};
pub use presence::{MinLength, Required};
pub use range::{Max, Min, RangeComparison};

// ============================================================================
// RULE KIND
// ============================================================================

/// Which rule produced a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Required,
    Pattern,
    Min,
    Max,
    Email,
    Number,
    MinLength,
    /// A caller-defined rule.
    Custom,
}

impl RuleKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Pattern => "pattern",
            Self::Min => "min",
            Self::Max => "max",
            Self::Email => "email",
            Self::Number => "number",
            Self::MinLength => "min_length",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// RULE TRAIT
// ============================================================================

/// A single check over a field value.
///
/// Rules are stateless after construction and are shared with the recovery
/// listener of a failure, hence `Send + Sync`.
pub trait Rule: fmt::Debug + Send + Sync {
    fn kind(&self) -> RuleKind;

    /// Returns `true` when `value` passes.
    fn check(&self, value: &str) -> bool;

    /// Default message in `locale`, used when the caller supplies none.
    fn message(&self, locale: &Locale) -> String;
}

impl<R: Rule + ?Sized> Rule for Arc<R> {
    fn kind(&self) -> RuleKind {
        (**self).kind()
    }

    fn check(&self, value: &str) -> bool {
        (**self).check(value)
    }

    fn message(&self, locale: &Locale) -> String {
        (**self).message(locale)
    }
}

// ============================================================================
// PREDICATE
// ============================================================================

type PredicateFn = dyn Fn(&str) -> bool + Send + Sync;

/// A rule backed by a caller closure.
#[derive(Clone)]
pub struct Predicate {
    check: Arc<PredicateFn>,
    message: Option<String>,
}

impl Predicate {
    pub fn new(check: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        Self {
            check: Arc::new(check),
            message: None,
        }
    }

    /// Sets the message reported instead of the generic invalid-characters text.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

impl Rule for Predicate {
    fn kind(&self) -> RuleKind {
        RuleKind::Custom
    }

    fn check(&self, value: &str) -> bool {
        (self.check)(value)
    }

    fn message(&self, locale: &Locale) -> String {
        self.message
            .clone()
            .unwrap_or_else(|| locale.messages().has_bad_symbols.clone())
    }
}

// ============================================================================
// RECOVERY
// ============================================================================

/// How a displayed failure gets cleared.
#[derive(Debug, Clone)]
pub enum Recovery {
    /// Re-check on every key-up and change; clear once the rule passes.
    UntilValid(Arc<dyn Rule>),
    /// Clear on the first occurrence of the event, whatever the value.
    UntilEvent(EventKind),
}

impl Recovery {
    /// Events that re-evaluate this recovery.
    pub fn triggers(&self) -> SmallVec<[EventKind; 2]> {
        match self {
            Self::UntilValid(_) => smallvec![EventKind::KeyUp, EventKind::Change],
            Self::UntilEvent(event) => smallvec![event.clone()],
        }
    }

    /// One-shot recoveries detach after their first event.
    pub fn is_one_shot(&self) -> bool {
        matches!(self, Self::UntilEvent(_))
    }

    pub fn is_satisfied(&self, value: &str) -> bool {
        match self {
            Self::UntilValid(rule) => rule.check(value),
            Self::UntilEvent(_) => true,
        }
    }
}
