/// Axis-aligned rectangle defined by min and max corners
///
/// Coordinates are y-down: for ink bounds measured around a baseline, `min[1]`
/// is negative above the baseline and `max[1]` positive below it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub min: [f32; 2],
    pub max: [f32; 2],
}

impl Rect {
    /// Build from left, top, right, bottom edges.
    ///
    /// ```
    /// # use sk_label::Rect;
    /// let rect = Rect::from_ltrb(1.0, -15.0, 19.0, 5.0);
    /// assert_eq!(rect.width(), 18.0);
    /// assert_eq!(rect.height(), 20.0);
    /// ```
    pub const fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            min: [left, top],
            max: [right, bottom],
        }
    }

    pub fn from_min_size(min: [f32; 2], size: [f32; 2]) -> Self {
        Self {
            min,
            max: [min[0] + size[0], min[1] + size[1]],
        }
    }

    pub const fn left(&self) -> f32 {
        self.min[0]
    }

    pub const fn top(&self) -> f32 {
        self.min[1]
    }

    pub const fn right(&self) -> f32 {
        self.max[0]
    }

    pub const fn bottom(&self) -> f32 {
        self.max[1]
    }

    pub fn width(&self) -> f32 {
        self.max[0] - self.min[0]
    }

    pub fn height(&self) -> f32 {
        self.max[1] - self.min[1]
    }

    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Smallest rect containing both. Empty rects contribute nothing.
    pub fn union(&self, other: &Rect) -> Rect {
        if other.is_empty() {
            return *self;
        }
        if self.is_empty() {
            return *other;
        }
        Rect {
            min: [self.min[0].min(other.min[0]), self.min[1].min(other.min[1])],
            max: [self.max[0].max(other.max[0]), self.max[1].max(other.max[1])],
        }
    }
}

/// Width and height in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub const fn zero() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_skips_empty() {
        let glyph = Rect::from_ltrb(1.0, -10.0, 5.0, 2.0);
        let space = Rect::default();

        assert_eq!(space.union(&glyph), glyph);
        assert_eq!(glyph.union(&space), glyph);
    }

    #[test]
    fn test_union_grows() {
        let a = Rect::from_ltrb(1.0, -10.0, 5.0, 0.0);
        let b = Rect::from_ltrb(6.0, -7.0, 12.0, 3.0);

        assert_eq!(a.union(&b), Rect::from_ltrb(1.0, -10.0, 12.0, 3.0));
    }
}
