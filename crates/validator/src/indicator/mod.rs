//! Indicator adapters
//!
//! An indicator is the visual error marker shown next to a field. The
//! controller talks to it only through [`IndicatorAdapter`]; how the marker
//! is rendered, and how it is found again later, is the adapter's business.
//!
//! Two implementations ship with the crate and are drop-in substitutes:
//!
//! - [`FloatingTooltips`]: free-standing tooltips positioned under the field
//! - [`EmbeddedTooltips`]: the UI toolkit's own per-field tooltip

pub mod embedded;
pub mod floating;

pub use embedded::{EmbeddedTooltip, EmbeddedTooltips, Placement, TooltipOptions, TooltipStyle, Trigger};
pub use floating::{FloatingTooltip, FloatingTooltips, TooltipId};

use crate::field::{FieldId, FieldRef};

/// Where an indicator is attached in the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Container {
    #[default]
    Body,
    /// The modal or overlay that holds the field.
    Overlay,
}

impl Container {
    pub fn for_field(field: &FieldRef) -> Self {
        if field.in_overlay {
            Self::Overlay
        } else {
            Self::Body
        }
    }
}

/// Creates, removes and toggles the error marker of a field.
///
/// Every operation tolerates a field that has no indicator.
pub trait IndicatorAdapter {
    /// Creates the indicator for `field`, or replaces the text of the one it
    /// already has. A fresh indicator starts hidden. Afterwards
    /// [`text`](Self::text) reports `text`.
    fn make(&mut self, field: &FieldRef, text: &str);

    /// Detaches and disposes the indicator of `field`.
    fn remove(&mut self, field: &FieldId);

    fn show(&mut self, field: &FieldId);

    fn hide(&mut self, field: &FieldId);

    /// Whether `field` currently has an indicator.
    fn has_indicator(&self, field: &FieldId) -> bool;

    /// Text of the indicator of `field`, if it has one.
    fn text(&self, field: &FieldId) -> Option<&str>;

    fn is_shown(&self, field: &FieldId) -> bool;
}

impl<A: IndicatorAdapter + ?Sized> IndicatorAdapter for Box<A> {
    fn make(&mut self, field: &FieldRef, text: &str) {
        (**self).make(field, text);
    }

    fn remove(&mut self, field: &FieldId) {
        (**self).remove(field);
    }

    fn show(&mut self, field: &FieldId) {
        (**self).show(field);
    }

    fn hide(&mut self, field: &FieldId) {
        (**self).hide(field);
    }

    fn has_indicator(&self, field: &FieldId) -> bool {
        (**self).has_indicator(field)
    }

    fn text(&self, field: &FieldId) -> Option<&str> {
        (**self).text(field)
    }

    fn is_shown(&self, field: &FieldId) -> bool {
        (**self).is_shown(field)
    }
}
