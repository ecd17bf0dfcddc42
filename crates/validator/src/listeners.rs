//! Listener bindings
//!
//! A namespaced registry of `(field, events) -> listener` bindings. The
//! controller keeps its recovery watchers under [`VALIDATOR_NAMESPACE`];
//! embedding code may register its own callbacks under any other namespace
//! and they are never touched by validator cleanup.
//!
//! The UI runtime feeds interaction events in through
//! [`ListenerRegistry::dispatch`] (usually via the controller).

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt;

use smallvec::SmallVec;

use crate::field::FieldId;
use crate::rules::Recovery;

/// Namespace that owns every binding created by the validator.
pub const VALIDATOR_NAMESPACE: &str = "validator";

// ============================================================================
// EVENTS
// ============================================================================

/// Kind of interaction event delivered for a field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    KeyUp,
    Change,
    Blur,
    Focus,
    /// Any other toolkit event, by name.
    Named(Cow<'static, str>),
}

impl EventKind {
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        Self::Named(name.into())
    }

    /// Maps well-known names to their variant, everything else to `Named`.
    pub fn parse(name: &str) -> Self {
        match name {
            "keyup" => Self::KeyUp,
            "change" => Self::Change,
            "blur" => Self::Blur,
            "focus" => Self::Focus,
            other => Self::Named(Cow::Owned(other.to_owned())),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::KeyUp => "keyup",
            Self::Change => "change",
            Self::Blur => "blur",
            Self::Focus => "focus",
            Self::Named(name) => name,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One interaction on a field, with the value it holds afterwards.
#[derive(Debug, Clone)]
pub struct FieldEvent<'a> {
    pub field: &'a FieldId,
    pub kind: EventKind,
    pub value: &'a str,
}

impl<'a> FieldEvent<'a> {
    pub fn new(field: &'a FieldId, kind: EventKind, value: &'a str) -> Self {
        Self { field, kind, value }
    }

    pub fn key_up(field: &'a FieldId, value: &'a str) -> Self {
        Self::new(field, EventKind::KeyUp, value)
    }

    pub fn change(field: &'a FieldId, value: &'a str) -> Self {
        Self::new(field, EventKind::Change, value)
    }
}

// ============================================================================
// BINDINGS
// ============================================================================

/// Handle returned by [`ListenerRegistry::on`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BindingId(u64);

/// Callback listener owned by embedding code.
pub type Callback = Box<dyn FnMut(&FieldEvent<'_>)>;

/// What runs when a bound event arrives.
pub enum Listener {
    /// A validator recovery watcher.
    Recovery(Recovery),
    Callback(Callback),
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Recovery(recovery) => f.debug_tuple("Recovery").field(recovery).finish(),
            Self::Callback(_) => f.write_str("Callback(..)"),
        }
    }
}

#[derive(Debug)]
struct Binding {
    id: BindingId,
    field: FieldId,
    events: SmallVec<[EventKind; 2]>,
    namespace: Cow<'static, str>,
    once: bool,
    listener: Listener,
}

impl Binding {
    fn matches(&self, event: &FieldEvent<'_>) -> bool {
        &self.field == event.field && self.events.contains(&event.kind)
    }
}

/// Recovery watcher that fired and whose condition held.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Satisfied {
    pub field: FieldId,
    pub namespace: Cow<'static, str>,
}

// ============================================================================
// REGISTRY
// ============================================================================

/// All listener bindings of one validation session.
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    bindings: Vec<Binding>,
    next_id: u64,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `listener` to `events` on `field` until explicitly removed.
    pub fn on(
        &mut self,
        field: FieldId,
        events: impl IntoIterator<Item = EventKind>,
        namespace: impl Into<Cow<'static, str>>,
        listener: Listener,
    ) -> BindingId {
        self.bind(field, events, namespace.into(), false, listener)
    }

    /// Binds `listener` for a single delivery; it detaches after the first
    /// matching event.
    pub fn one(
        &mut self,
        field: FieldId,
        events: impl IntoIterator<Item = EventKind>,
        namespace: impl Into<Cow<'static, str>>,
        listener: Listener,
    ) -> BindingId {
        self.bind(field, events, namespace.into(), true, listener)
    }

    fn bind(
        &mut self,
        field: FieldId,
        events: impl IntoIterator<Item = EventKind>,
        namespace: Cow<'static, str>,
        once: bool,
        listener: Listener,
    ) -> BindingId {
        let id = BindingId(self.next_id);
        self.next_id += 1;
        let events: SmallVec<[EventKind; 2]> = events.into_iter().collect();
        tracing::trace!(field = %field, namespace = %namespace, ?events, once, "listener bound");
        self.bindings.push(Binding {
            id,
            field,
            events,
            namespace,
            once,
            listener,
        });
        id
    }

    /// Removes one binding. Returns `false` when it was already gone.
    pub fn off(&mut self, id: BindingId) -> bool {
        let before = self.bindings.len();
        self.bindings.retain(|binding| binding.id != id);
        before != self.bindings.len()
    }

    /// Removes every binding of `field` in `namespace`; returns how many went.
    pub fn off_namespace(&mut self, field: &FieldId, namespace: &str) -> usize {
        let before = self.bindings.len();
        self.bindings
            .retain(|binding| !(&binding.field == field && binding.namespace == namespace));
        let removed = before - self.bindings.len();
        if removed > 0 {
            tracing::trace!(field = %field, namespace, removed, "listeners unbound");
        }
        removed
    }

    /// Number of bindings on `field`, optionally restricted to one namespace.
    pub fn count(&self, field: &FieldId, namespace: Option<&str>) -> usize {
        self.bindings
            .iter()
            .filter(|binding| &binding.field == field)
            .filter(|binding| namespace.is_none_or(|ns| binding.namespace == ns))
            .count()
    }

    /// Fields holding at least one binding in `namespace`.
    pub fn fields_in(&self, namespace: &str) -> BTreeSet<FieldId> {
        self.bindings
            .iter()
            .filter(|binding| binding.namespace == namespace)
            .map(|binding| binding.field.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Delivers `event` to every matching binding, in binding order.
    ///
    /// Callbacks are invoked; recovery watchers are evaluated against the
    /// event value. One-shot bindings detach after delivery. Returns the
    /// recovery watchers whose condition held, for the owner to resolve.
    pub fn dispatch(&mut self, event: &FieldEvent<'_>) -> Vec<Satisfied> {
        let mut satisfied = Vec::new();
        let mut spent = Vec::new();

        for binding in self.bindings.iter_mut().filter(|b| b.matches(event)) {
            match &mut binding.listener {
                Listener::Callback(callback) => callback(event),
                Listener::Recovery(recovery) => {
                    if recovery.is_satisfied(event.value) {
                        let hit = Satisfied {
                            field: binding.field.clone(),
                            namespace: binding.namespace.clone(),
                        };
                        if !satisfied.contains(&hit) {
                            satisfied.push(hit);
                        }
                    }
                }
            }
            if binding.once {
                spent.push(binding.id);
            }
        }

        if !spent.is_empty() {
            self.bindings.retain(|binding| !spent.contains(&binding.id));
        }
        tracing::trace!(
            field = %event.field,
            event = %event.kind,
            satisfied = satisfied.len(),
            "event dispatched"
        );
        satisfied
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::Arc;

    use super::*;
    use crate::rules::Required;

    fn recovery() -> Listener {
        Listener::Recovery(Recovery::UntilValid(Arc::new(Required)))
    }

    #[test]
    fn event_names() {
        assert_eq!(EventKind::parse("keyup"), EventKind::KeyUp);
        assert_eq!(EventKind::parse("mouseout"), EventKind::named("mouseout"));
        assert_eq!(EventKind::named("mouseout").to_string(), "mouseout");
    }

    #[test]
    fn off_namespace_leaves_other_owners_alone() {
        let mut registry = ListenerRegistry::new();
        let field = FieldId::from("email");
        registry.on(
            field.clone(),
            [EventKind::KeyUp, EventKind::Change],
            VALIDATOR_NAMESPACE,
            recovery(),
        );
        registry.on(
            field.clone(),
            [EventKind::KeyUp],
            "autocomplete",
            Listener::Callback(Box::new(|_| {})),
        );

        assert_eq!(registry.count(&field, None), 2);
        assert_eq!(registry.off_namespace(&field, VALIDATOR_NAMESPACE), 1);
        assert_eq!(registry.count(&field, Some(VALIDATOR_NAMESPACE)), 0);
        assert_eq!(registry.count(&field, Some("autocomplete")), 1);
        assert_eq!(registry.off_namespace(&field, VALIDATOR_NAMESPACE), 0);
    }

    #[test]
    fn dispatch_reports_satisfied_recoveries_once() {
        let mut registry = ListenerRegistry::new();
        let field = FieldId::from("name");
        registry.on(
            field.clone(),
            [EventKind::KeyUp, EventKind::Change],
            VALIDATOR_NAMESPACE,
            recovery(),
        );

        assert!(registry.dispatch(&FieldEvent::key_up(&field, "  ")).is_empty());
        let hits = registry.dispatch(&FieldEvent::key_up(&field, "Ann"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].field, field);
        assert_eq!(hits[0].namespace, VALIDATOR_NAMESPACE);
        // Resolution is up to the owner; the binding is still there.
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn dispatch_ignores_other_fields_and_events() {
        let mut registry = ListenerRegistry::new();
        let field = FieldId::from("name");
        let other = FieldId::from("other");
        registry.on(field.clone(), [EventKind::Change], VALIDATOR_NAMESPACE, recovery());

        assert!(registry.dispatch(&FieldEvent::change(&other, "x")).is_empty());
        assert!(registry.dispatch(&FieldEvent::key_up(&field, "x")).is_empty());
        assert_eq!(registry.dispatch(&FieldEvent::change(&field, "x")).len(), 1);
    }

    #[test]
    fn one_shot_bindings_detach_after_delivery() {
        let mut registry = ListenerRegistry::new();
        let field = FieldId::from("date");
        let calls = Rc::new(RefCell::new(0));
        let seen = Rc::clone(&calls);
        registry.one(
            field.clone(),
            [EventKind::Blur],
            "host",
            Listener::Callback(Box::new(move |_| *seen.borrow_mut() += 1)),
        );

        registry.dispatch(&FieldEvent::new(&field, EventKind::Blur, ""));
        registry.dispatch(&FieldEvent::new(&field, EventKind::Blur, ""));
        assert_eq!(*calls.borrow(), 1);
        assert!(registry.is_empty());
    }

    #[test]
    fn off_by_id() {
        let mut registry = ListenerRegistry::new();
        let id = registry.on("a".into(), [EventKind::Focus], "host", recovery());
        assert!(registry.off(id));
        assert!(!registry.off(id));
    }

    #[test]
    fn fields_in_namespace() {
        let mut registry = ListenerRegistry::new();
        registry.on("a".into(), [EventKind::Change], VALIDATOR_NAMESPACE, recovery());
        registry.on("b".into(), [EventKind::Change], "host", recovery());
        let fields = registry.fields_in(VALIDATOR_NAMESPACE);
        assert_eq!(fields.into_iter().collect::<Vec<_>>(), vec![FieldId::from("a")]);
    }
}
