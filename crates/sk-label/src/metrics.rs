use std::hash::{Hash, Hasher};

use crate::error::LabelError;
use crate::font::FontHandle;
use crate::measure::TextMeasurer;
use crate::primitives::{Rect, Size};

/// Metrics for one measured string.
///
/// Identity is the triple (text, family name, font size). Two metrics with the
/// same triple compare equal even if they were measured through different font
/// handles; color, alignment and padding never take part. Values are never
/// edited after construction, a change produces a new instance.
#[derive(Clone, Debug)]
pub struct TextMetrics {
    is_empty: bool,
    text: String,
    family: String,
    font_size: f32,
    text_width: f32,
    ascent: f32,
    descent: f32,
    left: f32,
    bounds: Rect,
}

impl TextMetrics {
    /// Sentinel for "not measured yet" or "no text".
    pub fn empty() -> Self {
        Self {
            is_empty: true,
            text: String::new(),
            family: String::new(),
            font_size: 0.0,
            text_width: 0.0,
            ascent: 0.0,
            descent: 0.0,
            left: 0.0,
            bounds: Rect::default(),
        }
    }

    /// Measure `text` set in `font`.
    ///
    /// # Panics
    /// Panics if `text` is empty. Callers hold the [`TextMetrics::empty`]
    /// sentinel for empty text instead of measuring it.
    pub fn measure<M: TextMeasurer + ?Sized>(
        measurer: &mut M,
        text: &str,
        font: &FontHandle,
    ) -> Result<Self, LabelError> {
        assert!(
            !text.is_empty(),
            "TextMetrics::measure called with empty text; use TextMetrics::empty()"
        );

        let measured = measurer.measure_text(text, font)?;
        let bounds = measured.bounds;

        Ok(Self {
            is_empty: false,
            text: text.to_owned(),
            family: font.family().to_owned(),
            font_size: font.size(),
            text_width: measured.advance,
            ascent: bounds.top(),
            descent: bounds.bottom(),
            left: bounds.left(),
            bounds,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.is_empty
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Family the backend actually used.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Declared font size in points.
    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Advance width of the string.
    pub fn text_width(&self) -> f32 {
        self.text_width
    }

    /// Offset from the baseline to the top of the ink. Negative.
    pub fn ascent(&self) -> f32 {
        self.ascent
    }

    /// Offset from the baseline to the bottom of the ink.
    pub fn descent(&self) -> f32 {
        self.descent
    }

    /// Ink size.
    pub fn size(&self) -> Size {
        self.bounds.size()
    }

    /// Left edge of the ink relative to the pen origin.
    pub fn left(&self) -> f32 {
        self.left
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self::empty()
    }
}

// Font sizes are coerced to >= 6 before measuring, so comparing the raw bits
// agrees with float equality here and keeps Eq/Hash lawful.
impl PartialEq for TextMetrics {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
            && self.family == other.family
            && self.font_size.to_bits() == other.font_size.to_bits()
    }
}

impl Eq for TextMetrics {}

impl Hash for TextMetrics {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
        self.family.hash(state);
        self.font_size.to_bits().hash(state);
    }
}
