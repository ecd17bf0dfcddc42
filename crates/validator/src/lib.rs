//! # inputguard
//!
//! Attribute-driven validation for input fields, with inline error
//! indicators that clear themselves once the user fixes the value.
//!
//! ## Quick Start
//!
//! ```rust
//! use inputguard::prelude::*;
//!
//! let mut session = ValidationController::new(FloatingTooltips::new());
//! let name = InputElement::new("name").required();
//!
//! let error = session
//!     .validate_field(&name, &MessageOverrides::default())
//!     .unwrap_err();
//! session.handle_failure(error).unwrap();
//! assert!(session.is_errored(name.id()));
//!
//! // The user types; the recovery listener clears the error.
//! session.dispatch(&FieldEvent::key_up(name.id(), "Ann"));
//! assert!(!session.is_errored(name.id()));
//! ```
//!
//! ## Pieces
//!
//! - [`Validator`](validator::Validator) runs the built-in [`rules`] against a
//!   [`FieldElement`](field::FieldElement) in a fixed, fail-fast order.
//! - [`ValidationController`](controller::ValidationController) displays
//!   failures through an [`IndicatorAdapter`](indicator::IndicatorAdapter)
//!   and owns the recovery listeners.
//! - [`ValidatorConfig`](config::ValidatorConfig) carries the locale, range
//!   comparison and reveal behaviour. There is no global state.
//!
//! Custom rules: use the [`rule!`] macro or implement
//! [`Rule`](rules::Rule) by hand.

// ValidationFailure carries its field snapshot and recovery by value; boxing
// it would add an allocation to every failing check.
#![allow(clippy::result_large_err)]

pub mod config;
pub mod controller;
pub mod error;
pub mod field;
pub mod indicator;
pub mod listeners;
mod macros;
pub mod messages;
pub mod prelude;
pub mod rules;
pub mod validator;
pub mod viewport;

pub use config::ValidatorConfig;
pub use controller::{ShowOptions, ValidationController};
pub use error::{Error, Result, ValidationFailure};
pub use validator::Validator;
