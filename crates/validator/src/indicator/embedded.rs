//! Toolkit-embedded tooltips
//!
//! Mirrors a UI toolkit whose widgets carry at most one tooltip each. The
//! validator's tooltips are created with the error style and a manual
//! trigger. A tooltip the host installed itself is borrowed instead: its
//! title is swapped for the error text and handed back on removal.

use std::collections::HashMap;

use super::{Container, IndicatorAdapter};
use crate::field::{FieldId, FieldRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Trigger {
    /// Shown and hidden only by explicit calls.
    #[default]
    Manual,
    Hover,
    Focus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Placement {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TooltipStyle {
    #[default]
    Error,
    Plain,
}

/// Options a toolkit tooltip is created with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipOptions {
    pub title: String,
    pub trigger: Trigger,
    pub placement: Placement,
    pub container: Container,
    pub style: TooltipStyle,
}

impl TooltipOptions {
    /// Options used for validator error tooltips.
    pub fn error(title: impl Into<String>, container: Container) -> Self {
        Self {
            title: title.into(),
            trigger: Trigger::Manual,
            placement: Placement::Bottom,
            container,
            style: TooltipStyle::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedTooltip {
    pub options: TooltipOptions,
    pub visible: bool,
    /// Host title set aside while the validator shows an error in it.
    host_title: Option<String>,
}

impl EmbeddedTooltip {
    fn new(options: TooltipOptions) -> Self {
        Self {
            options,
            visible: false,
            host_title: None,
        }
    }

    /// Whether the tooltip currently carries validator error text.
    pub fn is_error(&self) -> bool {
        self.options.style == TooltipStyle::Error || self.host_title.is_some()
    }
}

/// Indicator adapter backed by the toolkit's per-widget tooltip.
#[derive(Debug, Default)]
pub struct EmbeddedTooltips {
    tooltips: HashMap<FieldId, EmbeddedTooltip>,
}

impl EmbeddedTooltips {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a tooltip owned by the host application.
    pub fn install(&mut self, field: impl Into<FieldId>, options: TooltipOptions) {
        self.tooltips.insert(field.into(), EmbeddedTooltip::new(options));
    }

    pub fn get(&self, field: &FieldId) -> Option<&EmbeddedTooltip> {
        self.tooltips.get(field)
    }
}

impl IndicatorAdapter for EmbeddedTooltips {
    fn make(&mut self, field: &FieldRef, text: &str) {
        match self.tooltips.get_mut(&field.id) {
            Some(tooltip) => {
                let previous = std::mem::replace(&mut tooltip.options.title, text.to_owned());
                if !tooltip.is_error() {
                    tooltip.host_title = Some(previous);
                }
            }
            None => {
                let options = TooltipOptions::error(text, Container::for_field(field));
                self.tooltips
                    .insert(field.id.clone(), EmbeddedTooltip::new(options));
            }
        }
    }

    fn remove(&mut self, field: &FieldId) {
        let Some(tooltip) = self.tooltips.get_mut(field) else {
            return;
        };
        if let Some(title) = tooltip.host_title.take() {
            tooltip.options.title = title;
            tooltip.visible = false;
        } else if tooltip.options.style == TooltipStyle::Error {
            self.tooltips.remove(field);
        }
    }

    fn show(&mut self, field: &FieldId) {
        if let Some(tooltip) = self.tooltips.get_mut(field) {
            tooltip.visible = true;
        }
    }

    fn hide(&mut self, field: &FieldId) {
        if let Some(tooltip) = self.tooltips.get_mut(field) {
            tooltip.visible = false;
        }
    }

    fn has_indicator(&self, field: &FieldId) -> bool {
        self.tooltips.get(field).is_some_and(EmbeddedTooltip::is_error)
    }

    fn text(&self, field: &FieldId) -> Option<&str> {
        self.tooltips
            .get(field)
            .filter(|tooltip| tooltip.is_error())
            .map(|tooltip| tooltip.options.title.as_str())
    }

    fn is_shown(&self, field: &FieldId) -> bool {
        self.tooltips.get(field).is_some_and(|tooltip| tooltip.visible)
    }
}
