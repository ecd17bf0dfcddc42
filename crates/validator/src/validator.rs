//! Attribute-driven validation
//!
//! [`Validator`] runs the built-in rules against a field in a fixed order and
//! stops at the first failure:
//!
//! 1. type-implied check (`number`, `email`) when the value is non-empty
//! 2. `required`
//! 3. `pattern`
//! 4. `min`
//! 5. `max`
//!
//! Steps 2 to 5 only run when the field carries the attribute. Validation is
//! side-effect free: a failure comes back as [`Error::Validation`] and it is
//! up to the caller (usually the controller) to display it.

use std::sync::Arc;

use crate::config::ValidatorConfig;
use crate::error::{Error, Result, ValidationFailure};
use crate::field::{FieldElement, FieldRef, InputType};
use crate::messages::{FormMessages, Locale, MessageOverrides};
use crate::rules::{Email, Max, Min, MinLength, Number, Pattern, Recovery, Required, Rule};

/// Runs rules against fields.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidatorConfig,
}

impl Validator {
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ValidatorConfig {
        &mut self.config
    }

    pub fn locale(&self) -> &Locale {
        &self.config.locale
    }

    // ========================================================================
    // ATTRIBUTE-DRIVEN
    // ========================================================================

    /// Validates `field` according to its attributes.
    pub fn validate_field<F>(&self, field: &F, messages: &MessageOverrides) -> Result<()>
    where
        F: FieldElement + ?Sized,
    {
        self.validate_type(field, messages.type_mismatch.as_deref())?;
        if field.has_attribute("required") {
            self.validate_required(field, messages.required.as_deref())?;
        }
        if let Some(pattern) = field.attribute("pattern") {
            self.validate_pattern(field, pattern, messages.pattern.as_deref())?;
        }
        if let Some(min) = field.attribute("min") {
            self.validate_min(field, min, messages.min.as_deref())?;
        }
        if let Some(max) = field.attribute("max") {
            self.validate_max(field, max, messages.max.as_deref())?;
        }
        Ok(())
    }

    /// Validates `fields` in order and returns the first failure. Fields after
    /// the failing one are not looked at.
    pub fn validate_form<'a, F, I>(&self, fields: I, messages: &FormMessages) -> Result<()>
    where
        F: FieldElement + ?Sized + 'a,
        I: IntoIterator<Item = &'a F>,
    {
        let none = MessageOverrides::default();
        for field in fields {
            let overrides = messages.get(field.id()).unwrap_or(&none);
            self.validate_field(field, overrides)?;
        }
        Ok(())
    }

    // ========================================================================
    // SINGLE RULES
    // ========================================================================

    /// Applies the check implied by the `type` attribute, if the field holds
    /// a value. `message` covers both the number and the email check.
    pub fn validate_type<F>(&self, field: &F, message: Option<&str>) -> Result<()>
    where
        F: FieldElement + ?Sized,
    {
        if field.value().is_empty() {
            return Ok(());
        }
        match field.input_type() {
            InputType::Number => self.validate_number(field, message),
            InputType::Email => self.validate_email(field, message),
            InputType::Text | InputType::Other => Ok(()),
        }
    }

    pub fn validate_required<F>(&self, field: &F, message: Option<&str>) -> Result<()>
    where
        F: FieldElement + ?Sized,
    {
        self.enforce(field, Required, message)
    }

    /// Fails when the value does not contain a match of `pattern`.
    ///
    /// A pattern that does not compile is reported as
    /// [`Error::InvalidPattern`], not as a validation failure.
    pub fn validate_pattern<F>(&self, field: &F, pattern: &str, message: Option<&str>) -> Result<()>
    where
        F: FieldElement + ?Sized,
    {
        let rule = Pattern::compile(pattern).map_err(|source| Error::InvalidPattern {
            field: field.id().clone(),
            pattern: pattern.to_owned(),
            source,
        })?;
        self.enforce(field, rule, message)
    }

    pub fn validate_min<F>(&self, field: &F, min: &str, message: Option<&str>) -> Result<()>
    where
        F: FieldElement + ?Sized,
    {
        let rule = Min::new(min.to_owned(), self.config.range_comparison);
        self.enforce(field, rule, message)
    }

    pub fn validate_max<F>(&self, field: &F, max: &str, message: Option<&str>) -> Result<()>
    where
        F: FieldElement + ?Sized,
    {
        let rule = Max::new(max.to_owned(), self.config.range_comparison);
        self.enforce(field, rule, message)
    }

    pub fn validate_email<F>(&self, field: &F, message: Option<&str>) -> Result<()>
    where
        F: FieldElement + ?Sized,
    {
        self.enforce(field, Email, message)
    }

    pub fn validate_number<F>(&self, field: &F, message: Option<&str>) -> Result<()>
    where
        F: FieldElement + ?Sized,
    {
        self.enforce(field, Number, message)
    }

    pub fn validate_min_length<F>(&self, field: &F, min: usize, message: Option<&str>) -> Result<()>
    where
        F: FieldElement + ?Sized,
    {
        self.enforce(field, MinLength::new(min), message)
    }

    /// Runs any rule, built-in or caller-defined, against `field`.
    pub fn validate_with<F, R>(&self, field: &F, rule: R, message: Option<&str>) -> Result<()>
    where
        F: FieldElement + ?Sized,
        R: Rule + 'static,
    {
        self.enforce(field, rule, message)
    }

    fn enforce<F, R>(&self, field: &F, rule: R, message: Option<&str>) -> Result<()>
    where
        F: FieldElement + ?Sized,
        R: Rule + 'static,
    {
        if rule.check(field.value()) {
            return Ok(());
        }

        let kind = rule.kind();
        let message = message.map_or_else(|| rule.message(self.locale()), str::to_owned);
        tracing::debug!(field = %field.id(), rule = %kind, "validation failed");

        let failure = ValidationFailure::new(
            FieldRef::of(field),
            kind,
            message,
            Recovery::UntilValid(Arc::new(rule)),
        );
        Err(failure.into())
    }
}
