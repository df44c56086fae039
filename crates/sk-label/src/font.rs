//! Font selection: coercing family/attributes/size into a [`FontSpec`] and
//! opening it through a [`TextMeasurer`] as a [`FontHandle`].

use std::ops::BitOr;

use crate::error::LabelError;
use crate::measure::TextMeasurer;

/// Family used when the requested one is missing or blank.
pub const DEFAULT_FONT_FAMILY: &str = "OpenSansRegular";

/// Font size in points used by a freshly constructed label.
pub const DEFAULT_FONT_SIZE: f32 = 12.0;

/// Smallest font size in points; anything below is clamped up to this.
pub const MINIMUM_FONT_SIZE: f32 = 6.0;

/// Bold/italic flag set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FontAttributes(u8);

impl FontAttributes {
    pub const NONE: Self = Self(0);
    pub const BOLD: Self = Self(0b01);
    pub const ITALIC: Self = Self(0b10);

    const ALL_BITS: u8 = 0b11;

    /// Interpret raw bits. Any bit outside `BOLD | ITALIC` makes the whole
    /// value invalid, which coerces to `NONE`.
    ///
    /// ```
    /// # use sk_label::FontAttributes;
    /// assert_eq!(FontAttributes::from_bits(0b11), FontAttributes::BOLD | FontAttributes::ITALIC);
    /// assert_eq!(FontAttributes::from_bits(0b100), FontAttributes::NONE);
    /// ```
    pub const fn from_bits(bits: u8) -> Self {
        if bits & !Self::ALL_BITS != 0 {
            Self::NONE
        } else {
            Self(bits)
        }
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_bold(self) -> bool {
        self.contains(Self::BOLD)
    }

    pub const fn is_italic(self) -> bool {
        self.contains(Self::ITALIC)
    }
}

impl BitOr for FontAttributes {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Concrete face style a backend is asked for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontStyle {
    #[default]
    Normal,
    Bold,
    Italic,
    BoldItalic,
}

impl From<FontAttributes> for FontStyle {
    fn from(attributes: FontAttributes) -> Self {
        match (attributes.is_bold(), attributes.is_italic()) {
            (true, true) => FontStyle::BoldItalic,
            (true, false) => FontStyle::Bold,
            (false, true) => FontStyle::Italic,
            (false, false) => FontStyle::Normal,
        }
    }
}

/// Trimmed family name, or [`DEFAULT_FONT_FAMILY`] when missing or blank.
pub fn coerce_family(family: Option<&str>) -> String {
    match family.map(str::trim) {
        Some(family) if !family.is_empty() => family.to_owned(),
        _ => DEFAULT_FONT_FAMILY.to_owned(),
    }
}

/// Clamp to [`MINIMUM_FONT_SIZE`]. Non-finite sizes also land on the floor.
pub fn coerce_size(size: f32) -> f32 {
    if size.is_finite() && size >= MINIMUM_FONT_SIZE {
        size
    } else {
        MINIMUM_FONT_SIZE
    }
}

/// Convert a point size to pixels at 96 DPI.
#[inline]
pub fn points_to_pixels(points: f32) -> f32 {
    points * 96.0 / 72.0
}

/// Convert a point size to pixels at 96 DPI, scaled by the display density.
#[inline]
pub fn scale_points(points: f32, density: f32) -> f32 {
    points_to_pixels(points) * density
}

/// A coerced font request: what the label asks a backend for.
#[derive(Clone, Debug, PartialEq)]
pub struct FontSpec {
    pub family: String,
    pub style: FontStyle,
    /// Size in points, never below [`MINIMUM_FONT_SIZE`].
    pub size: f32,
}

impl FontSpec {
    /// Apply the family default, attribute mapping and size floor.
    ///
    /// Never fails: out-of-range input is coerced, not rejected.
    pub fn resolve(family: Option<&str>, attributes: FontAttributes, size: f32) -> Self {
        Self {
            family: coerce_family(family),
            style: attributes.into(),
            size: coerce_size(size),
        }
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::resolve(None, FontAttributes::NONE, DEFAULT_FONT_SIZE)
    }
}

/// A font opened by a backend for one measure or draw call.
///
/// `family` is the name of the face the backend actually matched, which may
/// differ from the requested one when the backend fell back. Handles are
/// opened, used and dropped within a single call; nothing keeps one around.
#[derive(Clone, Debug, PartialEq)]
pub struct FontHandle {
    family: String,
    style: FontStyle,
    size: f32,
}

impl FontHandle {
    pub fn new(family: impl Into<String>, style: FontStyle, size: f32) -> Self {
        Self {
            family: family.into(),
            style,
            size,
        }
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn style(&self) -> FontStyle {
        self.style
    }

    /// Declared size in points.
    pub fn size(&self) -> f32 {
        self.size
    }
}

/// Coerce the request and open it through `measurer`.
pub fn resolve_font<M: TextMeasurer + ?Sized>(
    measurer: &mut M,
    family: Option<&str>,
    attributes: FontAttributes,
    size: f32,
) -> Result<FontHandle, LabelError> {
    let spec = FontSpec::resolve(family, attributes, size);
    measurer.open_font(&spec)
}
