//! Field model
//!
//! The validator never owns UI elements. It reads them through [`FieldElement`],
//! which the embedding toolkit implements for its own input widgets, and it
//! identifies them by [`FieldId`] when wiring indicators and listeners.
//!
//! [`InputElement`] is an in-memory implementation used by tests, the demo,
//! and headless embeddings.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

// ============================================================================
// FIELD ID
// ============================================================================

/// Stable identifier of one input-like element.
///
/// Cheap to clone; used as the key for indicators, listener bindings and
/// error decorations.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(Arc<str>);

impl FieldId {
    /// Creates an id from any string.
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for FieldId {
    fn from(id: String) -> Self {
        Self(Arc::from(id))
    }
}

impl AsRef<str> for FieldId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// GEOMETRY
// ============================================================================

/// Outer box of a field in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// A point in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

// ============================================================================
// INPUT TYPE
// ============================================================================

/// Semantic kind taken from the `type` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputType {
    #[default]
    Text,
    Number,
    Email,
    /// Any other declared type; implies no extra check.
    Other,
}

impl InputType {
    /// Interprets a raw `type` attribute. A missing attribute means `text`.
    pub fn from_attribute(raw: Option<&str>) -> Self {
        match raw {
            None | Some("text") => Self::Text,
            Some("number") => Self::Number,
            Some("email") => Self::Email,
            Some(_) => Self::Other,
        }
    }
}

// ============================================================================
// FIELD ELEMENT
// ============================================================================

/// Read access to one input-like UI element.
///
/// Attribute names follow HTML: `required`, `pattern`, `min`, `max`, `type`,
/// `name`. Presence-only attributes report `Some("")`.
pub trait FieldElement {
    fn id(&self) -> &FieldId;

    /// Current raw value.
    fn value(&self) -> &str;

    fn attribute(&self, name: &str) -> Option<&str>;

    fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// Diagnostic label.
    fn name(&self) -> Option<&str> {
        self.attribute("name")
    }

    fn input_type(&self) -> InputType {
        InputType::from_attribute(self.attribute("type"))
    }

    /// Composite widgets (date pickers and the like) open an overlay on focus,
    /// so the controller never focuses them.
    fn is_composite(&self) -> bool {
        false
    }

    /// Whether the field lives inside a modal/overlay container.
    fn in_overlay(&self) -> bool {
        false
    }

    fn bounds(&self) -> Option<Rect> {
        None
    }
}

// ============================================================================
// FIELD REF
// ============================================================================

/// Snapshot of what the controller and adapters need to know about a field
/// after the rule that produced a failure has finished reading it.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRef {
    pub id: FieldId,
    pub name: Option<String>,
    pub composite: bool,
    pub in_overlay: bool,
    pub bounds: Option<Rect>,
}

impl FieldRef {
    pub fn new(id: impl Into<FieldId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            composite: false,
            in_overlay: false,
            bounds: None,
        }
    }

    /// Captures a reference to `field`.
    pub fn of<F: FieldElement + ?Sized>(field: &F) -> Self {
        Self {
            id: field.id().clone(),
            name: field.name().map(str::to_owned),
            composite: field.is_composite(),
            in_overlay: field.in_overlay(),
            bounds: field.bounds(),
        }
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) if name.as_str() != self.id.as_str() => write!(f, "{} ({name})", self.id),
            _ => write!(f, "{}", self.id),
        }
    }
}

// ============================================================================
// INPUT ELEMENT
// ============================================================================

/// In-memory input element.
///
/// ```
/// use inputguard::field::{FieldElement, InputElement};
///
/// let qty = InputElement::new("qty").with_type("number").min("1").with_value("3");
/// assert!(qty.has_attribute("min"));
/// assert_eq!(qty.value(), "3");
/// ```
#[derive(Debug, Clone)]
pub struct InputElement {
    id: FieldId,
    value: String,
    attributes: BTreeMap<String, String>,
    composite: bool,
    in_overlay: bool,
    bounds: Option<Rect>,
}

impl InputElement {
    pub fn new(id: impl Into<FieldId>) -> Self {
        Self {
            id: id.into(),
            value: String::new(),
            attributes: BTreeMap::new(),
            composite: false,
            in_overlay: false,
            bounds: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        self.attributes.remove(name)
    }

    /// Marks the element `required`.
    pub fn required(self) -> Self {
        self.with_attribute("required", "")
    }

    pub fn with_type(self, input_type: impl Into<String>) -> Self {
        self.with_attribute("type", input_type)
    }

    pub fn with_name(self, name: impl Into<String>) -> Self {
        self.with_attribute("name", name)
    }

    pub fn pattern(self, pattern: impl Into<String>) -> Self {
        self.with_attribute("pattern", pattern)
    }

    pub fn min(self, min: impl Into<String>) -> Self {
        self.with_attribute("min", min)
    }

    pub fn max(self, max: impl Into<String>) -> Self {
        self.with_attribute("max", max)
    }

    pub fn composite(mut self) -> Self {
        self.composite = true;
        self
    }

    pub fn in_overlay(mut self) -> Self {
        self.in_overlay = true;
        self
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = Some(bounds);
        self
    }
}

impl FieldElement for InputElement {
    fn id(&self) -> &FieldId {
        &self.id
    }

    fn value(&self) -> &str {
        &self.value
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    fn is_composite(&self) -> bool {
        self.composite
    }

    fn in_overlay(&self) -> bool {
        self.in_overlay
    }

    fn bounds(&self) -> Option<Rect> {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_type_defaults_to_text() {
        assert_eq!(InputType::from_attribute(None), InputType::Text);
        assert_eq!(InputType::from_attribute(Some("text")), InputType::Text);
        assert_eq!(InputType::from_attribute(Some("number")), InputType::Number);
        assert_eq!(InputType::from_attribute(Some("email")), InputType::Email);
        assert_eq!(InputType::from_attribute(Some("date")), InputType::Other);
        assert_eq!(InputType::from_attribute(Some("Email")), InputType::Other);
    }

    #[test]
    fn presence_attributes() {
        let input = InputElement::new("first_name").required();
        assert!(input.has_attribute("required"));
        assert_eq!(input.attribute("required"), Some(""));
        assert!(!input.has_attribute("pattern"));
    }

    #[test]
    fn field_ref_captures_flags() {
        let input = InputElement::new("born")
            .with_name("Birth date")
            .composite()
            .in_overlay()
            .with_bounds(Rect::new(1.0, 2.0, 3.0, 4.0));
        let field = FieldRef::of(&input);
        assert_eq!(field.id.as_str(), "born");
        assert_eq!(field.name.as_deref(), Some("Birth date"));
        assert!(field.composite);
        assert!(field.in_overlay);
        assert_eq!(field.bounds, Some(Rect::new(1.0, 2.0, 3.0, 4.0)));
        assert_eq!(field.to_string(), "born (Birth date)");
    }

    #[test]
    fn field_id_serde_is_transparent() {
        let id: FieldId = serde_json::from_str("\"email\"").unwrap();
        assert_eq!(id, FieldId::from("email"));
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"email\"");
    }
}
