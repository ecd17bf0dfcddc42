//! Range rules (`min` / `max` attributes).
//!
//! Bounds are kept as the raw attribute string. How the value is ordered
//! against them is decided by [`RangeComparison`].

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// How a value is ordered against a `min`/`max` bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeComparison {
    /// Raw string ordering, byte by byte. `"9"` is greater than `"10"`.
    ///
    /// Bytes are UTF-8, so this is code point order. A browser compares
    /// UTF-16 code units instead, and the two disagree once a string holds
    /// characters above U+FFFF: here `"\u{FF01}"` orders below `"\u{1F600}"`,
    /// in a browser it orders above. ASCII and BMP-only strings agree.
    #[default]
    Lexicographic,
    /// Both sides parsed as numbers; falls back to [`Lexicographic`] when
    /// either side does not parse.
    ///
    /// [`Lexicographic`]: RangeComparison::Lexicographic
    Numeric,
}

impl RangeComparison {
    pub fn compare(self, value: &str, bound: &str) -> Ordering {
        match self {
            Self::Lexicographic => value.cmp(bound),
            Self::Numeric => numeric_order(value, bound).unwrap_or_else(|| value.cmp(bound)),
        }
    }
}

fn numeric_order(value: &str, bound: &str) -> Option<Ordering> {
    let value = value.trim().parse::<f64>().ok()?;
    let bound = bound.trim().parse::<f64>().ok()?;
    value.partial_cmp(&bound)
}

crate::rule! {
    /// Fails when the value orders below `bound`. The bound itself passes.
    #[derive(PartialEq, Eq)]
    pub Min { bound: String, comparison: RangeComparison } => Min;
    check(self, value) { self.comparison.compare(value, &self.bound) != Ordering::Less }
    message(self, locale) { locale.messages().below_min(&self.bound) }
}

crate::rule! {
    /// Fails when the value orders above `bound`. The bound itself passes.
    #[derive(PartialEq, Eq)]
    pub Max { bound: String, comparison: RangeComparison } => Max;
    check(self, value) { self.comparison.compare(value, &self.bound) != Ordering::Greater }
    message(self, locale) { locale.messages().above_max(&self.bound) }
}
