//! Validation session controller
//!
//! Ties the pieces together for one page or form:
//!
//! ```text
//! validate ──► Err(ValidationFailure) ──► handle_failure
//!                                            │ make + show indicator
//!                                            │ mark field errored
//!                                            │ bind recovery listener
//!                                            ▼
//!                         dispatch(event) ── recovery satisfied?
//!                                            │ remove indicator
//!                                            │ clear errored mark
//!                                            ▼ unbind listener
//! ```
//!
//! A field has at most one outstanding failure. Displaying a new one first
//! drops the validator bindings of the previous one, and every transition
//! changes indicator, decoration and listeners inside a single `&mut self`
//! call, so a field is never left with an indicator but no listener or the
//! other way round.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::config::ValidatorConfig;
use crate::error::{Error, Result, ValidationFailure};
use crate::field::{FieldElement, FieldId, FieldRef};
use crate::indicator::{FloatingTooltips, IndicatorAdapter};
use crate::listeners::{EventKind, FieldEvent, Listener, ListenerRegistry, VALIDATOR_NAMESPACE};
use crate::messages::{FormMessages, MessageOverrides};
use crate::rules::{Predicate, Recovery, RuleKind};
use crate::validator::Validator;
use crate::viewport::Viewport;

// ============================================================================
// SHOW OPTIONS
// ============================================================================

/// Per-call overrides for how a failure is revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowOptions {
    /// Gap above the field; the configured one when `None`.
    pub extra_offset: Option<i32>,
    pub focus: bool,
}

impl Default for ShowOptions {
    fn default() -> Self {
        Self {
            extra_offset: None,
            focus: true,
        }
    }
}

impl ShowOptions {
    #[must_use = "builder methods must be chained or built"]
    pub fn with_extra_offset(mut self, extra_offset: i32) -> Self {
        self.extra_offset = Some(extra_offset);
        self
    }

    /// Keeps keyboard focus where it is.
    #[must_use = "builder methods must be chained or built"]
    pub fn do_not_focus(mut self) -> Self {
        self.focus = false;
        self
    }
}

// ============================================================================
// CONTROLLER
// ============================================================================

/// Displays validation failures and clears them once the user fixes the
/// field.
pub struct ValidationController<A = FloatingTooltips> {
    validator: Validator,
    adapter: A,
    listeners: ListenerRegistry,
    errored: BTreeSet<FieldId>,
    viewport: Option<Box<dyn Viewport>>,
}

impl<A: IndicatorAdapter> ValidationController<A> {
    pub fn new(adapter: A) -> Self {
        Self::with_config(ValidatorConfig::default(), adapter)
    }

    pub fn with_config(config: ValidatorConfig, adapter: A) -> Self {
        Self {
            validator: Validator::new(config),
            adapter,
            listeners: ListenerRegistry::new(),
            errored: BTreeSet::new(),
            viewport: None,
        }
    }

    /// Lets the controller scroll to and focus failed fields.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_viewport(mut self, viewport: impl Viewport + 'static) -> Self {
        self.viewport = Some(Box::new(viewport));
        self
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn adapter_mut(&mut self) -> &mut A {
        &mut self.adapter
    }

    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    /// Registry access for host listeners. Bindings outside the validator
    /// namespace are never touched by the controller.
    pub fn listeners_mut(&mut self) -> &mut ListenerRegistry {
        &mut self.listeners
    }

    /// Whether `field` carries the errored decoration.
    pub fn is_errored(&self, field: &FieldId) -> bool {
        self.errored.contains(field)
    }

    pub fn errored_fields(&self) -> impl Iterator<Item = &FieldId> {
        self.errored.iter()
    }

    /// Number of validator-owned listener bindings on `field`.
    pub fn validator_binding_count(&self, field: &FieldId) -> usize {
        self.listeners.count(field, Some(VALIDATOR_NAMESPACE))
    }

    // ========================================================================
    // VALIDATION
    // ========================================================================

    /// See [`Validator::validate_field`].
    pub fn validate_field<F>(&self, field: &F, messages: &MessageOverrides) -> Result<()>
    where
        F: FieldElement + ?Sized,
    {
        self.validator.validate_field(field, messages)
    }

    /// See [`Validator::validate_form`].
    pub fn validate_form<'a, F, I>(&self, fields: I, messages: &FormMessages) -> Result<()>
    where
        F: FieldElement + ?Sized + 'a,
        I: IntoIterator<Item = &'a F>,
    {
        self.validator.validate_form(fields, messages)
    }

    /// Resets `scope`, runs `check`, and displays its failure if there is one.
    ///
    /// Returns `Ok(true)` when `check` passed and `Ok(false)` when a failure
    /// is now on display. Any other error is handed back.
    pub fn submit<'a, I, C>(&mut self, scope: I, check: C) -> Result<bool>
    where
        I: IntoIterator<Item = &'a FieldId>,
        C: FnOnce(&Validator) -> Result<()>,
    {
        self.reset_scope(scope);
        match check(&self.validator) {
            Ok(()) => Ok(true),
            Err(error) => self.handle_failure(error).map(|()| false),
        }
    }

    // ========================================================================
    // DISPLAY
    // ========================================================================

    /// Displays `error` if it is a validation failure; otherwise returns it
    /// unchanged.
    pub fn handle_failure(&mut self, error: Error) -> Result<()> {
        self.handle_failure_with(error, ShowOptions::default())
    }

    pub fn handle_failure_with(&mut self, error: Error, options: ShowOptions) -> Result<()> {
        match error.into_validation() {
            Ok(failure) => {
                self.show_failure(failure, options);
                Ok(())
            }
            Err(foreign) => {
                tracing::warn!(error = %foreign, "non-validation error passed through failure handling");
                Err(foreign)
            }
        }
    }

    /// Shows the indicator for `failure` and arms its recovery.
    pub fn show_failure(&mut self, failure: ValidationFailure, options: ShowOptions) {
        let field = failure.field().clone();
        let recovery = failure.recovery().clone();

        self.listeners.off_namespace(&field.id, VALIDATOR_NAMESPACE);
        self.adapter.make(&field, failure.message());
        self.errored.insert(field.id.clone());

        let triggers = recovery.triggers();
        if recovery.is_one_shot() {
            self.listeners.one(
                field.id.clone(),
                triggers,
                VALIDATOR_NAMESPACE,
                Listener::Recovery(recovery),
            );
        } else {
            self.listeners.on(
                field.id.clone(),
                triggers,
                VALIDATOR_NAMESPACE,
                Listener::Recovery(recovery),
            );
        }

        self.adapter.show(&field.id);
        tracing::debug!(field = %field, rule = %failure.kind(), "failure displayed");

        self.reveal(&field, options);
    }

    /// Displays `message` on `field` until `condition` holds for its value.
    pub fn show_error_until<F>(
        &mut self,
        field: &F,
        message: impl Into<String>,
        condition: impl Fn(&str) -> bool + Send + Sync + 'static,
    ) where
        F: FieldElement + ?Sized,
    {
        let message = message.into();
        let rule = Predicate::new(condition).with_message(message.clone());
        let failure = ValidationFailure::new(
            FieldRef::of(field),
            RuleKind::Custom,
            message,
            Recovery::UntilValid(Arc::new(rule)),
        );
        self.show_failure(failure, ShowOptions::default());
    }

    /// Displays `message` on `field` until `event` first occurs on it.
    pub fn show_error_until_event<F>(&mut self, field: &F, event: EventKind, message: impl Into<String>)
    where
        F: FieldElement + ?Sized,
    {
        let failure = ValidationFailure::new(
            FieldRef::of(field),
            RuleKind::Custom,
            message,
            Recovery::UntilEvent(event),
        );
        self.show_failure(failure, ShowOptions::default());
    }

    fn reveal(&mut self, field: &FieldRef, options: ShowOptions) {
        let Some(viewport) = self.viewport.as_mut() else {
            return;
        };
        let reveal = self.validator.config().reveal;

        // Overlays manage their own scrolling.
        if !field.in_overlay {
            viewport.scroll_to(field, options.extra_offset.unwrap_or(reveal.extra_offset));
        }
        // Focusing a composite widget pops its picker open.
        if options.focus && reveal.focus && !field.composite {
            viewport.focus(field);
        }
    }

    // ========================================================================
    // EVENTS
    // ========================================================================

    /// Delivers an interaction event. Returns the fields whose failure was
    /// cleared by it.
    pub fn dispatch(&mut self, event: &FieldEvent<'_>) -> Vec<FieldId> {
        let resolved: Vec<FieldId> = self
            .listeners
            .dispatch(event)
            .into_iter()
            .filter(|hit| hit.namespace == VALIDATOR_NAMESPACE)
            .map(|hit| hit.field)
            .collect();

        for field in &resolved {
            self.clear(field);
            tracing::debug!(field = %field, event = %event.kind, "failure resolved");
        }
        resolved
    }

    // ========================================================================
    // RESET
    // ========================================================================

    /// Removes validator listeners, indicators and errored decorations from
    /// `fields`. Host listeners stay bound. Fields without a failure are left
    /// as they are.
    pub fn reset_scope<'a>(&mut self, fields: impl IntoIterator<Item = &'a FieldId>) {
        let mut cleared = 0usize;
        for field in fields {
            if self.clear(field) {
                cleared += 1;
            }
        }
        if cleared > 0 {
            tracing::debug!(cleared, "scope reset");
        }
    }

    /// Resets every field the controller has touched.
    pub fn reset(&mut self) {
        let mut fields = self.listeners.fields_in(VALIDATOR_NAMESPACE);
        fields.extend(self.errored.iter().cloned());
        self.reset_scope(&fields);
    }

    fn clear(&mut self, field: &FieldId) -> bool {
        let unbound = self.listeners.off_namespace(field, VALIDATOR_NAMESPACE);
        let was_errored = self.errored.remove(field);
        if !(was_errored || unbound > 0 || self.adapter.has_indicator(field)) {
            return false;
        }
        self.adapter.hide(field);
        self.adapter.remove(field);
        true
    }
}

impl Default for ValidationController<FloatingTooltips> {
    fn default() -> Self {
        Self::new(FloatingTooltips::new())
    }
}

impl<A: std::fmt::Debug> std::fmt::Debug for ValidationController<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationController")
            .field("validator", &self.validator)
            .field("adapter", &self.adapter)
            .field("listeners", &self.listeners)
            .field("errored", &self.errored)
            .field("viewport", &self.viewport.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::field::InputElement;

    #[derive(Debug, Default)]
    struct Calls {
        scrolled: Vec<(FieldId, i32)>,
        focused: Vec<FieldId>,
    }

    #[derive(Debug, Default, Clone)]
    struct RecordingViewport(Rc<RefCell<Calls>>);

    impl Viewport for RecordingViewport {
        fn scroll_to(&mut self, field: &FieldRef, extra_offset: i32) {
            self.0.borrow_mut().scrolled.push((field.id.clone(), extra_offset));
        }

        fn focus(&mut self, field: &FieldRef) {
            self.0.borrow_mut().focused.push(field.id.clone());
        }
    }

    fn session() -> ValidationController {
        ValidationController::default()
    }

    fn failing(field: &InputElement) -> Error {
        Validator::default()
            .validate_field(field, &MessageOverrides::default())
            .unwrap_err()
    }

    #[test]
    fn failure_shows_indicator_and_binds_recovery() {
        let mut controller = session();
        let name = InputElement::new("name").required();

        controller.handle_failure(failing(&name)).unwrap();

        let id = name.id();
        assert!(controller.is_errored(id));
        assert!(controller.adapter().is_shown(id));
        assert_eq!(controller.adapter().text(id), Some("This field is required."));
        assert_eq!(controller.validator_binding_count(id), 1);
    }

    #[test]
    fn foreign_errors_are_returned() {
        let mut controller = session();
        let error = controller
            .handle_failure(Error::foreign("adapter exploded"))
            .unwrap_err();
        assert_eq!(error.to_string(), "adapter exploded");
        assert_eq!(controller.errored_fields().count(), 0);
    }

    #[test]
    fn broken_pattern_passes_through_untouched() {
        let mut controller = session();
        let zip = InputElement::new("zip").pattern("([0-9]").with_value("1");

        let error = controller.handle_failure(failing(&zip)).unwrap_err();
        assert!(matches!(error, Error::InvalidPattern { ref field, .. } if field == zip.id()));

        let scope = [zip.id().clone()];
        let submitted = controller.submit(&scope, |validator| {
            validator.validate_field(&zip, &MessageOverrides::default())
        });
        assert!(matches!(submitted, Err(Error::InvalidPattern { .. })));

        assert!(!controller.is_errored(zip.id()));
        assert!(!controller.adapter().has_indicator(zip.id()));
        assert!(controller.adapter().is_empty());
        assert!(controller.listeners().is_empty());
    }

    #[test]
    fn recovery_waits_for_a_valid_value() {
        let mut controller = session();
        let name = InputElement::new("name").required();
        controller.handle_failure(failing(&name)).unwrap();

        let id = name.id();
        assert!(controller.dispatch(&FieldEvent::key_up(id, "  ")).is_empty());
        assert!(controller.is_errored(id));

        assert_eq!(controller.dispatch(&FieldEvent::change(id, "Ann")), vec![id.clone()]);
        assert!(!controller.is_errored(id));
        assert!(!controller.adapter().has_indicator(id));
        assert_eq!(controller.validator_binding_count(id), 0);
    }

    #[test]
    fn repeated_failures_do_not_stack_bindings() {
        let mut controller = session();
        let name = InputElement::new("name").required();
        controller.handle_failure(failing(&name)).unwrap();
        controller.handle_failure(failing(&name)).unwrap();
        assert_eq!(controller.validator_binding_count(name.id()), 1);
        assert_eq!(controller.adapter().len(), 1);
    }

    #[test]
    fn until_event_clears_on_first_occurrence() {
        let mut controller = session();
        let login = InputElement::new("login").with_value("taken");
        controller.show_error_until_event(&login, EventKind::Blur, "Login is taken");

        let id = login.id();
        assert!(controller.dispatch(&FieldEvent::key_up(id, "taken2")).is_empty());
        let resolved = controller.dispatch(&FieldEvent::new(id, EventKind::Blur, "taken2"));
        assert_eq!(resolved, vec![id.clone()]);
        assert_eq!(controller.validator_binding_count(id), 0);
        assert!(!controller.is_errored(id));
    }

    #[test]
    fn until_condition_uses_caller_predicate() {
        let mut controller = session();
        let age = InputElement::new("age");
        controller.show_error_until(&age, "Adults only", |v| v.parse::<u32>().is_ok_and(|n| n >= 18));

        let id = age.id();
        assert_eq!(controller.adapter().text(id), Some("Adults only"));
        assert!(controller.dispatch(&FieldEvent::change(id, "16")).is_empty());
        assert_eq!(controller.dispatch(&FieldEvent::change(id, "21")).len(), 1);
    }

    #[test]
    fn reset_keeps_host_listeners() {
        let mut controller = session();
        let name = InputElement::new("name").required();
        let id = name.id().clone();
        controller.listeners_mut().on(
            id.clone(),
            [EventKind::KeyUp],
            "host",
            Listener::Callback(Box::new(|_| {})),
        );
        controller.handle_failure(failing(&name)).unwrap();

        controller.reset();

        assert!(!controller.is_errored(&id));
        assert!(!controller.adapter().has_indicator(&id));
        assert_eq!(controller.validator_binding_count(&id), 0);
        assert_eq!(controller.listeners().count(&id, Some("host")), 1);
    }

    #[test]
    fn reveal_scrolls_and_focuses() {
        let viewport = RecordingViewport::default();
        let mut controller = session().with_viewport(viewport.clone());
        let name = InputElement::new("name").required();

        controller.handle_failure(failing(&name)).unwrap();
        controller
            .handle_failure_with(failing(&name), ShowOptions::default().with_extra_offset(40).do_not_focus())
            .unwrap();

        let calls = viewport.0.borrow();
        assert_eq!(
            calls.scrolled,
            vec![(name.id().clone(), 90), (name.id().clone(), 40)]
        );
        assert_eq!(calls.focused, vec![name.id().clone()]);
    }

    #[test]
    fn overlay_and_composite_fields() {
        let viewport = RecordingViewport::default();
        let mut controller = session().with_viewport(viewport.clone());
        let modal = InputElement::new("modal_name").required().in_overlay();
        let date = InputElement::new("born").required().composite();

        controller.handle_failure(failing(&modal)).unwrap();
        controller.handle_failure(failing(&date)).unwrap();

        let calls = viewport.0.borrow();
        assert_eq!(calls.scrolled, vec![(date.id().clone(), 90)]);
        assert_eq!(calls.focused, vec![modal.id().clone()]);
    }

    #[test]
    fn submit_reports_outcome() {
        let mut controller = session();
        let name = InputElement::new("name").required();
        let scope = [name.id().clone()];

        let shown = controller
            .submit(&scope, |validator| {
                validator.validate_field(&name, &MessageOverrides::default())
            })
            .unwrap();
        assert!(!shown);
        assert!(controller.is_errored(name.id()));

        let filled = name.clone().with_value("Ann");
        let passed = controller
            .submit(&scope, |validator| {
                validator.validate_field(&filled, &MessageOverrides::default())
            })
            .unwrap();
        assert!(passed);
        assert!(!controller.is_errored(name.id()));

        let foreign = controller.submit(&scope, |_| Err(Error::foreign("backend down")));
        assert!(foreign.is_err());
    }
}
