use glam::Vec2;

use crate::content::TextAlignment;
use crate::metrics::TextMetrics;

/// Spacing/padding around content
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Spacing {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Spacing {
    /// Create spacing with all sides equal
    pub const fn all(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Create zero spacing
    pub const fn zero() -> Self {
        Self::all(0.0)
    }

    /// Create spacing with symmetric horizontal and vertical values (CSS-style)
    ///
    /// ```
    /// # use sk_label::Spacing;
    /// let spacing = Spacing::symmetric(10.0, 20.0);
    /// assert_eq!(spacing.left, 10.0);
    /// assert_eq!(spacing.right, 10.0);
    /// assert_eq!(spacing.top, 20.0);
    /// assert_eq!(spacing.bottom, 20.0);
    /// ```
    pub const fn symmetric(horizontal: f32, vertical: f32) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    /// Create spacing from individual top, right, bottom, left values (CSS-style)
    ///
    /// ```
    /// # use sk_label::Spacing;
    /// let spacing = Spacing::trbl(10.0, 20.0, 30.0, 40.0);
    /// assert_eq!(spacing.top, 10.0);
    /// assert_eq!(spacing.right, 20.0);
    /// assert_eq!(spacing.bottom, 30.0);
    /// assert_eq!(spacing.left, 40.0);
    /// ```
    pub const fn trbl(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub const fn get_vertical(&self) -> f32 {
        self.top + self.bottom
    }

    pub const fn get_horizontal(&self) -> f32 {
        self.right + self.left
    }
}

/// Compute where to put the pen for a single line of text in a padded box.
///
/// `box_width`/`box_height` are the full box; padding is subtracted here to
/// get the inner area. The returned `x` is the pen's left edge and `y` is the
/// baseline, both measured from the box's top-left corner in a y-down space.
/// `Justify` positions like `Start`.
pub fn compute_origin(
    metrics: &TextMetrics,
    box_width: f32,
    box_height: f32,
    padding: Spacing,
    h_align: TextAlignment,
    v_align: TextAlignment,
) -> Vec2 {
    let inner_width = box_width - padding.get_horizontal();
    let inner_height = box_height - padding.get_vertical();

    let x = match h_align.effective() {
        TextAlignment::Center => padding.left + (inner_width - metrics.text_width()) / 2.0,
        TextAlignment::End => padding.left + inner_width - metrics.text_width(),
        _ => padding.left,
    };

    // Ascent is negative: subtracting it moves the baseline down below the top.
    let y = match v_align.effective() {
        TextAlignment::Center => {
            padding.top + metrics.ascent() + (inner_height - metrics.size().height) / 2.0
        }
        TextAlignment::End => padding.top + inner_height - metrics.descent(),
        _ => padding.top - metrics.ascent(),
    };

    Vec2::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::{FontHandle, FontStyle};
    use crate::measure::{MeasuredText, TextMeasurer};
    use crate::primitives::Rect;
    use crate::{FontSpec, LabelError};

    /// Measurer returning exactly the metrics a test asks for.
    struct Fixed(MeasuredText);

    impl TextMeasurer for Fixed {
        fn open_font(&mut self, spec: &FontSpec) -> Result<FontHandle, LabelError> {
            Ok(FontHandle::new(spec.family.clone(), spec.style, spec.size))
        }

        fn measure_text(&mut self, _: &str, _: &FontHandle) -> Result<MeasuredText, LabelError> {
            Ok(self.0)
        }
    }

    /// Text 40 wide, ink from 10 above to 4 below the baseline.
    fn metrics() -> TextMetrics {
        let mut measurer = Fixed(MeasuredText {
            advance: 40.0,
            bounds: Rect::from_ltrb(0.0, -10.0, 40.0, 4.0),
        });
        let font = FontHandle::new("Default", FontStyle::Normal, 12.0);
        TextMetrics::measure(&mut measurer, "label", &font).unwrap()
    }

    #[test]
    fn test_start_uses_left_padding_for_any_width() {
        let metrics = metrics();
        let padding = Spacing::trbl(0.0, 3.0, 0.0, 7.0);

        for width in [0.0, 10.0, 100.0, 1000.0] {
            let origin = compute_origin(
                &metrics,
                width,
                50.0,
                padding,
                TextAlignment::Start,
                TextAlignment::Start,
            );
            assert_eq!(origin.x, 7.0);
        }
    }

    #[test]
    fn test_horizontal_center() {
        let origin = compute_origin(
            &metrics(),
            100.0,
            50.0,
            Spacing::zero(),
            TextAlignment::Center,
            TextAlignment::Start,
        );
        assert_eq!(origin.x, 30.0);
    }

    #[test]
    fn test_horizontal_end() {
        let origin = compute_origin(
            &metrics(),
            100.0,
            50.0,
            Spacing::symmetric(5.0, 0.0),
            TextAlignment::End,
            TextAlignment::Start,
        );
        // 5 + (100 - 10) - 40
        assert_eq!(origin.x, 55.0);
    }

    #[test]
    fn test_vertical_start_puts_baseline_below_ascent() {
        let origin = compute_origin(
            &metrics(),
            100.0,
            50.0,
            Spacing::zero(),
            TextAlignment::Start,
            TextAlignment::Start,
        );
        assert_eq!(origin.y, 10.0);

        let padded = compute_origin(
            &metrics(),
            100.0,
            50.0,
            Spacing::trbl(2.0, 0.0, 0.0, 0.0),
            TextAlignment::Start,
            TextAlignment::Start,
        );
        assert_eq!(padded.y, 12.0);
    }

    #[test]
    fn test_vertical_center() {
        let origin = compute_origin(
            &metrics(),
            100.0,
            50.0,
            Spacing::trbl(4.0, 0.0, 6.0, 0.0),
            TextAlignment::Start,
            TextAlignment::Center,
        );
        // 4 + (-10) + (40 - 14) / 2
        assert_eq!(origin.y, 7.0);
    }

    #[test]
    fn test_vertical_end() {
        let origin = compute_origin(
            &metrics(),
            100.0,
            50.0,
            Spacing::trbl(4.0, 0.0, 6.0, 0.0),
            TextAlignment::Start,
            TextAlignment::End,
        );
        // 4 + 40 - 4
        assert_eq!(origin.y, 40.0);
    }

    #[test]
    fn test_justify_positions_like_start() {
        let padding = Spacing::all(3.0);
        let start = compute_origin(
            &metrics(),
            100.0,
            50.0,
            padding,
            TextAlignment::Start,
            TextAlignment::Start,
        );
        let justify = compute_origin(
            &metrics(),
            100.0,
            50.0,
            padding,
            TextAlignment::Justify,
            TextAlignment::Justify,
        );
        assert_eq!(start, justify);
    }
}
