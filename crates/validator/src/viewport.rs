//! Viewport capability
//!
//! When a failure is displayed the controller brings the field into view and
//! focuses it. Both are host concerns, so the embedding application plugs a
//! [`Viewport`] into the controller; without one, reveal is skipped.

use std::time::Duration;

use crate::field::FieldRef;

/// Scrolls the page and moves keyboard focus.
pub trait Viewport {
    /// Scrolls so `field` sits `extra_offset` units below the top edge.
    fn scroll_to(&mut self, field: &FieldRef, extra_offset: i32);

    fn focus(&mut self, field: &FieldRef);
}

/// Target and duration of an animated scroll towards a field.
///
/// The animation covers 1.5 units per millisecond.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollPlan {
    pub target: f32,
    pub duration: Duration,
}

impl ScrollPlan {
    const UNITS_PER_MS: f32 = 1.5;

    pub fn new(current_top: f32, field_top: f32, extra_offset: i32) -> Self {
        let target = field_top.round() - extra_offset as f32;
        let distance = (current_top - target).abs();
        Self {
            target,
            duration: Duration::try_from_secs_f32(distance / Self::UNITS_PER_MS / 1000.0)
                .unwrap_or_default(),
        }
    }
}
