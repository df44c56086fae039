use glam::Vec2;

use crate::color::Color;
use crate::error::LabelError;
use crate::font::{resolve_font, FontHandle};
use crate::label::LabelState;
use crate::layout::compute_origin;
use crate::measure::TextMeasurer;
use crate::metrics::TextMetrics;
use crate::primitives::Size;

/// Drawing surface a label paints into.
///
/// Backends map this onto their own canvas; calls are synchronous.
pub trait Canvas {
    /// Surface size in pixels.
    fn size(&self) -> Size;

    /// Fill the whole surface with `color`.
    fn clear(&mut self, color: Color);

    /// Draw `text` with its pen at `origin` (left edge, baseline).
    fn draw_text(&mut self, text: &str, origin: Vec2, font: &FontHandle, color: Color);
}

/// One recorded canvas call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Text {
        text: String,
        origin: Vec2,
        font: FontHandle,
        color: Color,
    },
}

/// Canvas that records calls instead of rasterizing them.
#[derive(Clone, Debug, Default)]
pub struct RecordingCanvas {
    size: Size,
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            commands: Vec::new(),
        }
    }

    /// The host resized the surface.
    pub fn resize(&mut self, size: Size) {
        self.size = size;
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Canvas for RecordingCanvas {
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn draw_text(&mut self, text: &str, origin: Vec2, font: &FontHandle, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_owned(),
            origin,
            font: font.clone(),
            color,
        });
    }
}

/// Repaint the whole surface for `label`.
///
/// Clears to `background`, or to transparent when there is none or it is
/// fully transparent. Non-empty text is then drawn once at the origin the
/// layout engine computes for the canvas size. Empty `metrics` with non-empty
/// text are measured here rather than drawn at a bogus origin.
pub fn paint_surface<C, M>(
    canvas: &mut C,
    background: Option<Color>,
    label: &LabelState,
    metrics: &TextMetrics,
    measurer: &mut M,
) -> Result<(), LabelError>
where
    C: Canvas + ?Sized,
    M: TextMeasurer + ?Sized,
{
    match background {
        Some(color) if !color.is_transparent() => canvas.clear(color),
        _ => canvas.clear(Color::transparent()),
    }

    if label.text.is_empty() {
        return Ok(());
    }

    let font = resolve_font(
        measurer,
        Some(&label.font_family),
        label.font_attributes,
        label.font_size,
    )?;

    let remeasured;
    let metrics = if metrics.is_empty() {
        remeasured = TextMetrics::measure(measurer, &label.text, &font)?;
        &remeasured
    } else {
        metrics
    };

    let size = canvas.size();
    let origin = compute_origin(
        metrics,
        size.width,
        size.height,
        label.padding,
        label.horizontal_text_alignment,
        label.vertical_text_alignment,
    );

    log::debug!(
        "label paint canvas={}x{} origin=({}, {})",
        size.width,
        size.height,
        origin.x,
        origin.y
    );
    canvas.draw_text(&label.text, origin, &font, label.text_color);
    Ok(())
}
