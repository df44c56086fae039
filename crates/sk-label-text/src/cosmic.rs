//! `cosmic-text` implementation of font resolution and text measurement.
//!
//! Fonts come from the system font database. A requested family that is not
//! installed falls back to the database's sans-serif family, then to any face
//! at all; only an empty database is an error.

use cosmic_text::{fontdb, Attrs, Buffer, Family, FontSystem, Metrics, Shaping, SwashCache};
use sk_label::{
    scale_points, FontHandle, FontSpec, FontStyle, LabelError, MeasuredText, Rect, TextMeasurer,
};

/// Measurer backed by `cosmic-text`.
pub struct CosmicMeasurer {
    font_system: FontSystem,

    // Rasterizes glyphs to find their ink extents.
    swash_cache: SwashCache,

    density: f32,
}

impl CosmicMeasurer {
    /// Create a measurer over the system fonts.
    pub fn new() -> Self {
        Self::from_font_system(FontSystem::new())
    }

    /// Wrap an existing font system, e.g. one with bundled fonts loaded.
    pub fn from_font_system(font_system: FontSystem) -> Self {
        Self {
            font_system,
            swash_cache: SwashCache::new(),
            density: 1.0,
        }
    }

    /// Display density applied on top of the 96/72 point-to-pixel scale.
    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    pub fn density(&self) -> f32 {
        self.density
    }

    /// Sorted, deduplicated family names in the font database.
    pub fn families(&self) -> Vec<String> {
        let mut families: Vec<String> = self
            .font_system
            .db()
            .faces()
            .filter_map(|face| face.families.first().map(|(name, _)| name.clone()))
            .collect();
        families.sort();
        families.dedup();
        families
    }

    fn query_family(
        &self,
        family: fontdb::Family<'_>,
        weight: fontdb::Weight,
        style: fontdb::Style,
    ) -> Option<String> {
        let db = self.font_system.db();
        let id = db.query(&fontdb::Query {
            families: &[family],
            weight,
            stretch: fontdb::Stretch::Normal,
            style,
        })?;
        db.face(id)
            .and_then(|face| face.families.first())
            .map(|(name, _)| name.clone())
    }

    fn any_family(&self) -> Option<String> {
        self.font_system
            .db()
            .faces()
            .find_map(|face| face.families.first().map(|(name, _)| name.clone()))
    }
}

impl Default for CosmicMeasurer {
    fn default() -> Self {
        Self::new()
    }
}

/// Characters `cosmic-text` starts a new line at.
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

fn weight_and_style(style: FontStyle) -> (fontdb::Weight, fontdb::Style) {
    match style {
        FontStyle::Normal => (fontdb::Weight::NORMAL, fontdb::Style::Normal),
        FontStyle::Bold => (fontdb::Weight::BOLD, fontdb::Style::Normal),
        FontStyle::Italic => (fontdb::Weight::NORMAL, fontdb::Style::Italic),
        FontStyle::BoldItalic => (fontdb::Weight::BOLD, fontdb::Style::Italic),
    }
}

impl TextMeasurer for CosmicMeasurer {
    fn open_font(&mut self, spec: &FontSpec) -> Result<FontHandle, LabelError> {
        let (weight, style) = weight_and_style(spec.style);

        let family = self
            .query_family(fontdb::Family::Name(&spec.family), weight, style)
            .or_else(|| self.query_family(fontdb::Family::SansSerif, weight, style))
            .or_else(|| self.any_family())
            .ok_or(LabelError::NoFontFaces)?;

        if family != spec.family {
            log::debug!("font family {:?} not found, using {:?}", spec.family, family);
        }

        Ok(FontHandle::new(family, spec.style, spec.size))
    }

    fn measure_text(&mut self, text: &str, font: &FontHandle) -> Result<MeasuredText, LabelError> {
        let px = scale_points(font.size(), self.density);
        let metrics = Metrics::new(px, px * 1.2);
        let mut buffer = Buffer::new(&mut self.font_system, metrics);

        // Prevent wrapping: set a huge width and line height from metrics.
        buffer.set_size(
            &mut self.font_system,
            Some(f32::MAX),
            Some(metrics.line_height),
        );

        let (weight, style) = weight_and_style(font.style());
        let attrs = Attrs::new()
            .family(Family::Name(font.family()))
            .weight(weight)
            .style(style);

        // A label is one line: shape breaks as spaces so nothing is measured
        // on a line the label never draws.
        let line = text.replace(is_line_break, " ");
        buffer.set_text(&mut self.font_system, &line, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(&mut self.font_system, false);

        let mut out = MeasuredText::default();

        if let Some(run) = buffer.layout_runs().next() {
            out.advance = run.line_w;

            for glyph in run.glyphs.iter() {
                // Physical offsets are in baseline space, y down.
                let physical = glyph.physical((0.0, 0.0), 1.0);

                let Some(image) = self
                    .swash_cache
                    .get_image(&mut self.font_system, physical.cache_key)
                    .as_ref()
                else {
                    continue;
                };

                let placement = &image.placement;
                if placement.width == 0 || placement.height == 0 {
                    continue;
                }

                // Swash `top` is the distance from the baseline up to the bitmap top.
                let ink = Rect::from_min_size(
                    [
                        (physical.x + placement.left) as f32,
                        (physical.y - placement.top) as f32,
                    ],
                    [placement.width as f32, placement.height as f32],
                );
                out.bounds = out.bounds.union(&ink);
            }
        }

        Ok(out)
    }
}
