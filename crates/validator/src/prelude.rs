//! Prelude module for convenient imports.
//!
//! `use inputguard::prelude::*;` brings in the controller, the field model,
//! the rules and both indicator adapters.

// ============================================================================
// SESSION
// ============================================================================

pub use crate::config::{RevealOptions, ValidatorConfig};
pub use crate::controller::{ShowOptions, ValidationController};
pub use crate::error::{Error, ValidationFailure};
pub use crate::validator::Validator;

// ============================================================================
// FIELDS, EVENTS, MESSAGES
// ============================================================================

pub use crate::field::{FieldElement, FieldId, FieldRef, InputElement, InputType, Rect};
pub use crate::listeners::{EventKind, FieldEvent, Listener, ListenerRegistry};
pub use crate::messages::{FormMessages, Locale, MessageOverrides, MessageTable, Pluralizer};

// ============================================================================
// RULES
// ============================================================================

pub use crate::rules::{
    Email, Max, Min, MinLength, Number, Pattern, Predicate, RangeComparison, Recovery, Required,
    Rule, RuleKind,
};

// ============================================================================
// PRESENTATION
// ============================================================================

pub use crate::indicator::{EmbeddedTooltips, FloatingTooltips, IndicatorAdapter};
pub use crate::viewport::{ScrollPlan, Viewport};
