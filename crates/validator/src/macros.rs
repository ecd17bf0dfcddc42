//! Macros for declaring rules with minimal boilerplate.
//!
//! # Examples
//!
//! ```rust,ignore
//! use inputguard::rule;
//!
//! // Unit rule (no parameters)
//! rule! {
//!     pub NotBlank => Required;
//!     check(value) { !value.trim().is_empty() }
//!     message(locale) { locale.messages().value_required.clone() }
//! }
//!
//! // Rule with parameters (auto `new` from all fields)
//! rule! {
//!     pub AtLeast { min: usize } => MinLength;
//!     check(self, value) { value.len() >= self.min }
//!     message(self, locale) { locale.messages().too_short(self.min, locale.plurals()) }
//! }
//! ```

/// Creates a rule: struct definition, constructor, and [`Rule`] implementation.
///
/// The identifier after `=>` names the [`RuleKind`] variant reported by the
/// rule. `#[derive(Debug, Clone)]` is always applied; unit rules also get
/// `Copy, PartialEq, Eq, Hash, Default`.
///
/// [`Rule`]: crate::rules::Rule
/// [`RuleKind`]: crate::rules::RuleKind
#[macro_export]
macro_rules! rule {
    // ── Unit rule (no fields) ─────────────────────────────────────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident => $kind:ident;
        check($val:ident) $check:block
        message($loc:ident) $msg:block
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        $vis struct $name;

        impl $crate::rules::Rule for $name {
            fn kind(&self) -> $crate::rules::RuleKind {
                $crate::rules::RuleKind::$kind
            }

            fn check(&self, $val: &str) -> bool $check

            #[allow(unused_variables)]
            fn message(&self, $loc: &$crate::messages::Locale) -> ::std::string::String $msg
        }
    };

    // ── Rule with fields + auto new ───────────────────────────────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident { $($field:ident: $fty:ty),+ $(,)? } => $kind:ident;
        check($self_:ident, $val:ident) $check:block
        message($self2:ident, $loc:ident) $msg:block
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name {
            $(pub $field: $fty,)+
        }

        impl $name {
            #[must_use]
            pub fn new($($field: $fty),+) -> Self {
                Self { $($field),+ }
            }
        }

        impl $crate::rules::Rule for $name {
            fn kind(&self) -> $crate::rules::RuleKind {
                $crate::rules::RuleKind::$kind
            }

            fn check(&$self_, $val: &str) -> bool $check

            #[allow(unused_variables)]
            fn message(&$self2, $loc: &$crate::messages::Locale) -> ::std::string::String $msg
        }
    };
}
