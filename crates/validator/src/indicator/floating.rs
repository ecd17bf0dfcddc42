//! Free-standing tooltips
//!
//! Each indicator is a tooltip element with a generated id, linked to its
//! field and attached either to the page body or to the overlay holding the
//! field. The tooltip is centred under the field:
//!
//! ```text
//! left = x + round(width / 2) - round(tooltip_width / 2)
//! top  = y + height + 5
//! ```

use std::collections::HashMap;
use std::fmt;

use super::{Container, IndicatorAdapter};
use crate::field::{FieldId, FieldRef, Point, Rect};

const ID_ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const ID_LEN: usize = 8;
/// Vertical gap between the field and its tooltip.
const GAP: f32 = 5.0;

// ============================================================================
// TOOLTIP ID
// ============================================================================

/// Eight characters from `[A-Z0-9]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TooltipId(String);

impl TooltipId {
    fn random() -> Self {
        let id = (0..ID_LEN)
            .map(|_| {
                let pick = rand::random::<u32>() as usize % ID_ALPHABET.len();
                char::from(ID_ALPHABET[pick])
            })
            .collect();
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TooltipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// TOOLTIP
// ============================================================================

/// One rendered error tooltip.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatingTooltip {
    pub id: TooltipId,
    pub field: FieldId,
    pub text: String,
    pub container: Container,
    pub visible: bool,
    /// Bounds of the field when the tooltip was created.
    pub anchor: Option<Rect>,
}

impl FloatingTooltip {
    /// Top-left corner for a tooltip `tooltip_width` wide, if the field
    /// reported its bounds.
    pub fn position(&self, tooltip_width: f32) -> Option<Point> {
        self.anchor.map(|field| Point {
            x: field.x + (field.width / 2.0).round() - (tooltip_width / 2.0).round(),
            y: field.y + field.height + GAP,
        })
    }
}

// ============================================================================
// ADAPTER
// ============================================================================

/// Indicator adapter that manages its own tooltip elements.
#[derive(Debug, Default)]
pub struct FloatingTooltips {
    links: HashMap<FieldId, TooltipId>,
    tooltips: HashMap<TooltipId, FloatingTooltip>,
}

impl FloatingTooltips {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tooltip linked to `field`.
    pub fn get(&self, field: &FieldId) -> Option<&FloatingTooltip> {
        self.links.get(field).and_then(|id| self.tooltips.get(id))
    }

    pub fn by_id(&self, id: &TooltipId) -> Option<&FloatingTooltip> {
        self.tooltips.get(id)
    }

    pub fn len(&self) -> usize {
        self.tooltips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tooltips.is_empty()
    }

    fn next_id(&self) -> TooltipId {
        loop {
            let id = TooltipId::random();
            if !self.tooltips.contains_key(&id) {
                return id;
            }
        }
    }

    fn get_mut(&mut self, field: &FieldId) -> Option<&mut FloatingTooltip> {
        let id = self.links.get(field)?;
        self.tooltips.get_mut(id)
    }
}

impl IndicatorAdapter for FloatingTooltips {
    fn make(&mut self, field: &FieldRef, text: &str) {
        if let Some(tooltip) = self.get_mut(&field.id) {
            text.clone_into(&mut tooltip.text);
            return;
        }

        let id = self.next_id();
        tracing::trace!(field = %field.id, tooltip = %id, "tooltip created");
        self.links.insert(field.id.clone(), id.clone());
        self.tooltips.insert(
            id.clone(),
            FloatingTooltip {
                id,
                field: field.id.clone(),
                text: text.to_owned(),
                container: Container::for_field(field),
                visible: false,
                anchor: field.bounds,
            },
        );
    }

    fn remove(&mut self, field: &FieldId) {
        if let Some(id) = self.links.remove(field) {
            self.tooltips.remove(&id);
        }
    }

    fn show(&mut self, field: &FieldId) {
        if let Some(tooltip) = self.get_mut(field) {
            tooltip.visible = true;
        }
    }

    fn hide(&mut self, field: &FieldId) {
        if let Some(tooltip) = self.get_mut(field) {
            tooltip.visible = false;
        }
    }

    fn has_indicator(&self, field: &FieldId) -> bool {
        self.links.contains_key(field)
    }

    fn text(&self, field: &FieldId) -> Option<&str> {
        self.get(field).map(|tooltip| tooltip.text.as_str())
    }

    fn is_shown(&self, field: &FieldId) -> bool {
        self.get(field).is_some_and(|tooltip| tooltip.visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn ids_are_eight_uppercase_alphanumerics() {
        let mut tooltips = FloatingTooltips::new();
        for _ in 0..200 {
            let id = tooltips.next_id();
            assert_eq!(id.as_str().len(), ID_LEN);
            assert!(
                id.as_str()
                    .bytes()
                    .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
            );
        }
    }

    #[test]
    fn separate_adapters_do_not_share_ids() {
        let mut first = FloatingTooltips::new();
        let mut second = FloatingTooltips::new();
        first.make(&FieldRef::new("email"), "Invalid");
        second.make(&FieldRef::new("phone"), "Invalid");

        let a = first.get(&"email".into()).map(|t| t.id.clone()).unwrap();
        let b = second.get(&"phone".into()).map(|t| t.id.clone()).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn every_field_gets_its_own_tooltip() {
        let mut tooltips = FloatingTooltips::new();
        for n in 0..50 {
            tooltips.make(&FieldRef::new(format!("field_{n}")), "Required");
        }
        assert_eq!(tooltips.len(), 50);
    }

    #[test]
    fn make_twice_keeps_one_tooltip() {
        let mut tooltips = FloatingTooltips::new();
        let field = FieldRef::new("qty");
        tooltips.make(&field, "Required");
        let first = tooltips.get(&field.id).map(|t| t.id.clone());
        tooltips.make(&field, "Too small");

        assert_eq!(tooltips.len(), 1);
        let tooltip = tooltips.get(&field.id).unwrap();
        assert_eq!(tooltip.text, "Too small");
        assert_eq!(Some(tooltip.id.clone()), first);
    }

    #[test]
    fn overlay_fields_use_overlay_container() {
        let mut tooltips = FloatingTooltips::new();
        let field = FieldRef {
            in_overlay: true,
            ..FieldRef::new("born")
        };
        tooltips.make(&field, "Pick a date");
        assert_eq!(
            tooltips.get(&field.id).map(|t| t.container),
            Some(Container::Overlay)
        );
    }

    #[test]
    fn positioned_under_field_centre() {
        let mut tooltips = FloatingTooltips::new();
        let field = FieldRef {
            bounds: Some(Rect::new(100.0, 40.0, 201.0, 30.0)),
            ..FieldRef::new("email")
        };
        tooltips.make(&field, "Invalid");
        let tooltip = tooltips.get(&field.id).unwrap();
        // 100 + round(100.5) - round(60.5) = 100 + 101 - 61
        assert_eq!(tooltip.position(121.0), Some(Point { x: 140.0, y: 75.0 }));

        tooltips.make(&FieldRef::new("name"), "Required");
        assert_eq!(tooltips.get(&"name".into()).unwrap().position(50.0), None);
    }

    #[test]
    fn remove_unlinks_field() {
        let mut tooltips = FloatingTooltips::new();
        let field = FieldRef::new("qty");
        tooltips.make(&field, "Required");
        let id = tooltips.get(&field.id).unwrap().id.clone();
        tooltips.remove(&field.id);
        assert!(tooltips.by_id(&id).is_none());
        assert!(tooltips.is_empty());
    }
}
