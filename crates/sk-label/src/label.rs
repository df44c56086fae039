use crate::color::Color;
use crate::content::TextAlignment;
use crate::error::LabelError;
use crate::font::{
    coerce_family, coerce_size, FontAttributes, DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE,
};
use crate::invalidate::{
    InvalidationClass, InvalidationController, InvalidationState, Property, Requests, SizePolicy,
};
use crate::layout::Spacing;
use crate::measure::TextMeasurer;
use crate::metrics::TextMetrics;
use crate::primitives::Size;
use crate::render::{paint_surface, Canvas};

/// Configuration of a label.
///
/// All values are stored already coerced; see the setters on [`SkLabel`].
#[derive(Clone, Debug, PartialEq)]
pub struct LabelState {
    pub text: String,
    pub text_color: Color,
    pub font_family: String,
    pub font_attributes: FontAttributes,
    /// Size in points.
    pub font_size: f32,
    pub horizontal_text_alignment: TextAlignment,
    pub vertical_text_alignment: TextAlignment,
    pub padding: Spacing,
    pub enable_workaround: bool,
}

impl Default for LabelState {
    fn default() -> Self {
        Self {
            text: String::new(),
            text_color: Color::default(),
            font_family: DEFAULT_FONT_FAMILY.to_owned(),
            font_attributes: FontAttributes::NONE,
            font_size: DEFAULT_FONT_SIZE,
            horizontal_text_alignment: TextAlignment::Start,
            vertical_text_alignment: TextAlignment::Start,
            padding: Spacing::zero(),
            enable_workaround: false,
        }
    }
}

/// Construction-time options for a label.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LabelConfig {
    pub size_policy: SizePolicy,
}

impl LabelConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose where the workaround overrides the size request.
    pub fn with_size_policy(mut self, policy: SizePolicy) -> Self {
        self.size_policy = policy;
        self
    }
}

/// A single-line text label.
///
/// Setters coerce their input, compare it with the stored value and only on a
/// real change trigger the property's invalidation. Metrics-class setters can
/// fail when the measurer cannot open a font; the new value is kept either
/// way and the label stays dirty until a later measure or paint succeeds.
///
/// The host drives the label with [`SkLabel::take_requests`],
/// [`SkLabel::measure`] and [`SkLabel::paint`].
pub struct SkLabel<M: TextMeasurer> {
    state: LabelState,
    controller: InvalidationController,
    measurer: M,
}

impl<M: TextMeasurer> SkLabel<M> {
    pub fn new(measurer: M) -> Self {
        Self::with_config(measurer, LabelConfig::default())
    }

    pub fn with_config(measurer: M, config: LabelConfig) -> Self {
        Self {
            state: LabelState::default(),
            controller: InvalidationController::new(config.size_policy),
            measurer,
        }
    }

    pub fn state(&self) -> &LabelState {
        &self.state
    }

    pub fn text(&self) -> &str {
        &self.state.text
    }

    pub fn text_color(&self) -> Color {
        self.state.text_color
    }

    pub fn font_family(&self) -> &str {
        &self.state.font_family
    }

    pub fn font_attributes(&self) -> FontAttributes {
        self.state.font_attributes
    }

    pub fn font_size(&self) -> f32 {
        self.state.font_size
    }

    pub fn horizontal_text_alignment(&self) -> TextAlignment {
        self.state.horizontal_text_alignment
    }

    pub fn vertical_text_alignment(&self) -> TextAlignment {
        self.state.vertical_text_alignment
    }

    pub fn padding(&self) -> Spacing {
        self.state.padding
    }

    pub fn enable_workaround(&self) -> bool {
        self.state.enable_workaround
    }

    pub fn size_policy(&self) -> SizePolicy {
        self.controller.policy()
    }

    /// Size published by the workaround, if it ever fired.
    pub fn size_request(&self) -> Option<Size> {
        self.controller.size_request()
    }

    /// Cached metrics. May be stale while [`SkLabel::invalidation_state`] is dirty.
    pub fn metrics(&self) -> &TextMetrics {
        self.controller.metrics()
    }

    pub fn invalidation_state(&self) -> InvalidationState {
        self.controller.state()
    }

    /// `None` stores the empty string.
    pub fn set_text<'a>(&mut self, text: impl Into<Option<&'a str>>) -> Result<(), LabelError> {
        let text = text.into().unwrap_or_default();
        if self.state.text == text {
            return Ok(());
        }
        self.state.text = text.to_owned();
        self.invalidate(Property::Text)
    }

    /// `None` stores black.
    pub fn set_text_color(&mut self, color: impl Into<Option<Color>>) {
        let color = color.into().unwrap_or_default();
        if self.state.text_color == color {
            return;
        }
        self.state.text_color = color;
        self.request(Property::TextColor);
    }

    /// Missing or blank families store the default; others are trimmed.
    pub fn set_font_family<'a>(
        &mut self,
        family: impl Into<Option<&'a str>>,
    ) -> Result<(), LabelError> {
        let family = coerce_family(family.into());
        if self.state.font_family == family {
            return Ok(());
        }
        self.state.font_family = family;
        self.invalidate(Property::FontFamily)
    }

    pub fn set_font_attributes(&mut self, attributes: FontAttributes) -> Result<(), LabelError> {
        if self.state.font_attributes == attributes {
            return Ok(());
        }
        self.state.font_attributes = attributes;
        self.invalidate(Property::FontAttributes)
    }

    /// Sizes below the floor, NaN and infinities store the floor.
    pub fn set_font_size(&mut self, size: f32) -> Result<(), LabelError> {
        let size = coerce_size(size);
        if self.state.font_size == size {
            return Ok(());
        }
        self.state.font_size = size;
        self.invalidate(Property::FontSize)
    }

    pub fn set_horizontal_text_alignment(&mut self, alignment: TextAlignment) {
        if self.state.horizontal_text_alignment == alignment {
            return;
        }
        self.state.horizontal_text_alignment = alignment;
        self.request(Property::HorizontalTextAlignment);
    }

    pub fn set_vertical_text_alignment(&mut self, alignment: TextAlignment) {
        if self.state.vertical_text_alignment == alignment {
            return;
        }
        self.state.vertical_text_alignment = alignment;
        self.request(Property::VerticalTextAlignment);
    }

    pub fn set_padding(&mut self, padding: Spacing) -> Result<(), LabelError> {
        if self.state.padding == padding {
            return Ok(());
        }
        self.state.padding = padding;
        self.invalidate(Property::Padding)
    }

    /// Only redraws. Turning the workaround off keeps an already published
    /// size request; turning it on takes effect at the next metrics change.
    pub fn set_enable_workaround(&mut self, enabled: bool) {
        if self.state.enable_workaround == enabled {
            return;
        }
        self.state.enable_workaround = enabled;
        self.request(Property::EnableWorkaround);
    }

    /// Drain pending layout/redraw requests for the host scheduler.
    pub fn take_requests(&mut self) -> Requests {
        self.controller.take_requests()
    }

    /// Host layout callback. Returns padding plus text size; the constraints
    /// are only logged, a single line never wraps to fit them.
    pub fn measure(
        &mut self,
        width_constraint: f32,
        height_constraint: f32,
    ) -> Result<Size, LabelError> {
        let size = self.controller.measure(&self.state, &mut self.measurer)?;
        log::debug!(
            "label measure {}pt: constraint={}x{} desired={}x{} request={:?}",
            self.state.font_size,
            width_constraint,
            height_constraint,
            size.width,
            size.height,
            self.controller.size_request()
        );
        Ok(size)
    }

    /// Host paint callback. Clears `canvas` and draws the text.
    pub fn paint<C: Canvas + ?Sized>(
        &mut self,
        canvas: &mut C,
        background: Option<Color>,
    ) -> Result<(), LabelError> {
        let metrics = self
            .controller
            .current_metrics(&self.state, &mut self.measurer)?;
        paint_surface(canvas, background, &self.state, metrics, &mut self.measurer)
    }

    fn invalidate(&mut self, property: Property) -> Result<(), LabelError> {
        log::trace!("label property {property:?} changed");
        match property.invalidation() {
            InvalidationClass::Metrics => self
                .controller
                .invalidate_metrics(&self.state, &mut self.measurer),
            class => {
                self.controller.request(class.requests());
                Ok(())
            }
        }
    }

    fn request(&mut self, property: Property) {
        log::trace!("label property {property:?} changed");
        self.controller.request(property.invalidation().requests());
    }
}
