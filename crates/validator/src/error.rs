//! Error types
//!
//! [`ValidationFailure`] is the only error this crate signals on purpose.
//! Everything else in [`Error`] is foreign from the controller's point of
//! view and is handed back to the caller untouched.

use std::error::Error as StdError;

use crate::field::{FieldId, FieldRef};
use crate::rules::{Recovery, RuleKind};

/// Crate-wide result alias.
pub type Result<T, E = Error> = std::result::Result<T, E>;

// ============================================================================
// VALIDATION FAILURE
// ============================================================================

/// A field failed a rule.
///
/// Carries everything needed to display the failure and to arm its
/// recovery: the offending field, the resolved message, and the strategy
/// that decides when the error goes away.
#[derive(Debug, Clone, thiserror::Error)]
#[error("field '{field}' failed the {kind} check: {message}")]
pub struct ValidationFailure {
    field: FieldRef,
    kind: RuleKind,
    message: String,
    recovery: Recovery,
}

impl ValidationFailure {
    pub fn new(
        field: FieldRef,
        kind: RuleKind,
        message: impl Into<String>,
        recovery: Recovery,
    ) -> Self {
        Self {
            field,
            kind,
            message: message.into(),
            recovery,
        }
    }

    pub fn field(&self) -> &FieldRef {
        &self.field
    }

    pub fn field_id(&self) -> &FieldId {
        &self.field.id
    }

    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn recovery(&self) -> &Recovery {
        &self.recovery
    }

    /// Replaces the message, keeping kind and recovery.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

// ============================================================================
// ERROR
// ============================================================================

/// Everything that can come out of validation calls.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A rule failed; see [`ValidationFailure`].
    #[error(transparent)]
    Validation(#[from] ValidationFailure),

    /// The `pattern` attribute of a field is not a valid regular expression.
    #[error("field '{field}' has an invalid pattern `{pattern}`")]
    InvalidPattern {
        field: FieldId,
        pattern: String,
        #[source]
        source: fancy_regex::Error,
    },

    /// No built-in locale matches the requested tag.
    #[error("unknown locale '{0}'")]
    UnknownLocale(String),

    /// A configuration or message document could not be parsed.
    #[error("invalid validator configuration: {0}")]
    Config(#[source] serde_json::Error),

    /// An error raised by caller or adapter code.
    #[error(transparent)]
    Foreign(Box<dyn StdError + Send + Sync>),
}

impl Error {
    /// Wraps an error that does not originate in this crate.
    pub fn foreign(error: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self::Foreign(error.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn as_validation(&self) -> Option<&ValidationFailure> {
        match self {
            Self::Validation(failure) => Some(failure),
            _ => None,
        }
    }

    pub fn into_validation(self) -> std::result::Result<ValidationFailure, Self> {
        match self {
            Self::Validation(failure) => Ok(failure),
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::rules::Required;

    fn failure() -> ValidationFailure {
        let field = FieldRef {
            name: Some("First name".into()),
            ..FieldRef::new("first_name")
        };
        ValidationFailure::new(
            field,
            RuleKind::Required,
            "This field is required.",
            Recovery::UntilValid(Arc::new(Required)),
        )
    }

    #[test]
    fn failure_display() {
        assert_eq!(
            failure().to_string(),
            "field 'first_name (First name)' failed the required check: This field is required."
        );
    }

    #[test]
    fn validation_is_transparent() {
        let error = Error::from(failure());
        assert!(error.is_validation());
        assert_eq!(error.to_string(), failure().to_string());
        assert_eq!(
            error.as_validation().map(ValidationFailure::kind),
            Some(RuleKind::Required)
        );
    }

    #[test]
    fn foreign_round_trips() {
        let error = Error::foreign("adapter exploded");
        assert!(!error.is_validation());
        assert_eq!(error.to_string(), "adapter exploded");
        assert!(error.into_validation().is_err());
    }

    #[test]
    fn invalid_pattern_keeps_source() {
        let source = fancy_regex::Regex::new("(").unwrap_err();
        let error = Error::InvalidPattern {
            field: "zip".into(),
            pattern: "(".into(),
            source,
        };
        assert!(error.to_string().contains("zip"));
        assert!(StdError::source(&error).is_some());
    }
}
