//! Text measurement capability.
//!
//! This module provides a backend-agnostic trait for opening fonts and
//! measuring a single line of text. Core code must not depend on any specific
//! text engine (cosmic-text, etc.); backends like `sk-label-text` implement
//! [`TextMeasurer`].

use crate::error::LabelError;
use crate::font::{FontHandle, FontSpec};
use crate::primitives::Rect;

/// Result of measuring one string with one font.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MeasuredText {
    /// Advance width of the whole string in pixels.
    pub advance: f32,
    /// Ink bounds relative to the pen origin on the baseline, y-down.
    pub bounds: Rect,
}

/// Backend-agnostic font resolution and text measurement.
///
/// Calls are synchronous and not reentrant. Implementors may keep internal
/// caches but must not hand out state that outlives a call.
pub trait TextMeasurer {
    /// Open a face for an already coerced spec.
    ///
    /// Backends may fall back to another family; the returned handle names the
    /// family actually used.
    fn open_font(&mut self, spec: &FontSpec) -> Result<FontHandle, LabelError>;

    /// Measure ink bounds and advance width of `text` set in `font`.
    fn measure_text(&mut self, text: &str, font: &FontHandle) -> Result<MeasuredText, LabelError>;
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &mut T {
    fn open_font(&mut self, spec: &FontSpec) -> Result<FontHandle, LabelError> {
        (**self).open_font(spec)
    }

    fn measure_text(&mut self, text: &str, font: &FontHandle) -> Result<MeasuredText, LabelError> {
        (**self).measure_text(text, font)
    }
}

/// Deterministic measurer that needs no font files.
///
/// Every character advances half the font size. Ink spans from three quarters
/// of the size above the baseline to a quarter below, inset by a sixteenth of
/// the size on both sides. Handy as a fallback on machines without fonts.
#[derive(Clone, Copy, Debug, Default)]
pub struct EstimatedMeasurer;

impl TextMeasurer for EstimatedMeasurer {
    fn open_font(&mut self, spec: &FontSpec) -> Result<FontHandle, LabelError> {
        Ok(FontHandle::new(spec.family.clone(), spec.style, spec.size))
    }

    fn measure_text(&mut self, text: &str, font: &FontHandle) -> Result<MeasuredText, LabelError> {
        let size = font.size();
        let advance = text.chars().count() as f32 * size * 0.5;
        if advance == 0.0 {
            return Ok(MeasuredText::default());
        }

        let bearing = size * 0.0625;
        Ok(MeasuredText {
            advance,
            bounds: Rect::from_ltrb(bearing, -size * 0.75, advance - bearing, size * 0.25),
        })
    }
}
