//! Headless demo of the label size workaround.
//!
//! The host here lays a label out once and afterwards only measures it again
//! when the label's published size request changes. Growing the font with the
//! workaround off leaves the canvas at its first size and the text clipped;
//! with the workaround on every font change publishes a new request and the
//! canvas follows.
//!
//! Run with `RUST_LOG=debug` to see the label's own measure/paint trace.

use sk_label::{
    css, Canvas, DrawCommand, EstimatedMeasurer, LabelError, RecordingCanvas, SkLabel, Size, Spacing,
    TextAlignment, TextMeasurer,
};
use sk_label_text::SharedMeasurer;

const TEXT: &str = "Hello, label!";
const INITIAL_FONT_SIZE: f32 = 20.0;
const FONT_STEP: f32 = 2.0;
/// The page refuses font sizes at or below this.
const SMALLEST_PAGE_FONT: f32 = 8.0;
const STEPS: usize = 3;

/// State behind the demo page: the +/- font buttons and the workaround switch.
struct PageModel {
    font_size: f32,
    enable_workaround: bool,
}

impl PageModel {
    fn increase(&mut self) -> bool {
        self.set_font_size(self.font_size + FONT_STEP)
    }

    fn decrease(&mut self) -> bool {
        self.set_font_size(self.font_size - FONT_STEP)
    }

    fn set_font_size(&mut self, size: f32) -> bool {
        if size == self.font_size || size <= SMALLEST_PAGE_FONT {
            return false;
        }
        self.font_size = size;
        true
    }
}

/// A host whose layout pass skips re-measuring unless the size request moved.
#[derive(Default)]
struct StaleLayoutHost {
    canvas: RecordingCanvas,
    laid_out: bool,
    last_request: Option<Size>,
}

impl StaleLayoutHost {
    /// Service whatever the label asked for since the last pump.
    fn pump<M: TextMeasurer>(&mut self, label: &mut SkLabel<M>) -> Result<(), LabelError> {
        let requests = label.take_requests();

        let request_moved = label.size_request() != self.last_request;
        if !self.laid_out || (requests.layout && request_moved) {
            let desired = label.measure(f32::INFINITY, f32::INFINITY)?;
            self.canvas.resize(desired);
            self.last_request = label.size_request();
            self.laid_out = true;
        } else if requests.layout {
            log::debug!("host skipped layout");
        }

        if requests.redraw {
            label.paint(&mut self.canvas, Some(css::WHITE))?;
            self.report(label);
        }
        Ok(())
    }

    fn report<M: TextMeasurer>(&mut self, label: &SkLabel<M>) {
        let canvas = self.canvas.size();
        let metrics = label.metrics();
        let padding = label.padding();
        let needed = Size::new(
            metrics.text_width() + padding.get_horizontal(),
            metrics.size().height + padding.get_vertical(),
        );
        let fits = needed.width <= canvas.width && needed.height <= canvas.height;

        let drawn = self
            .canvas
            .take_commands()
            .into_iter()
            .filter(|command| matches!(command, DrawCommand::Text { .. }))
            .count();

        log::info!(
            "{:>4}pt  canvas {:>6.1}x{:<5.1} text needs {:>6.1}x{:<5.1} {} ({} text draw)",
            label.font_size(),
            canvas.width,
            canvas.height,
            needed.width,
            needed.height,
            if fits { "fits" } else { "CLIPPED" },
            drawn
        );
    }
}

fn run<M: TextMeasurer>(measurer: M) -> Result<(), LabelError> {
    let mut model = PageModel {
        font_size: INITIAL_FONT_SIZE,
        enable_workaround: false,
    };

    let mut label = SkLabel::new(measurer);
    label.set_text(TEXT)?;
    label.set_font_size(model.font_size)?;
    label.set_padding(Spacing::symmetric(8.0, 4.0))?;
    label.set_text_color(css::NAVY);
    label.set_horizontal_text_alignment(TextAlignment::Center);

    for enable in [false, true] {
        let mut host = StaleLayoutHost::default();
        model.enable_workaround = enable;
        label.set_enable_workaround(model.enable_workaround);
        log::info!(
            "--- workaround {} ---",
            if model.enable_workaround { "on" } else { "off" }
        );
        host.pump(&mut label)?;

        for _ in 0..STEPS {
            if model.increase() {
                label.set_font_size(model.font_size)?;
                host.pump(&mut label)?;
            }
        }
        for _ in 0..STEPS {
            if model.decrease() {
                label.set_font_size(model.font_size)?;
                host.pump(&mut label)?;
            }
        }
    }

    Ok(())
}

fn main() {
    // Initialize logger (RUST_LOG=debug for verbose output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting label invalidation demo...");

    let result = match sk_label_text::font_families() {
        Ok(families) if !families.is_empty() => run(SharedMeasurer),
        Ok(_) => {
            log::warn!("No system fonts found, falling back to estimated metrics");
            run(EstimatedMeasurer)
        }
        Err(err) => Err(err),
    };

    if let Err(err) = result {
        log::error!("Demo failed: {err}");
        std::process::exit(1);
    }
}
