//! Invalidation state machine for a label.
//!
//! Every property declares an [`InvalidationClass`]. Metrics-class changes
//! move the controller through
//! `Idle -> Dirty -> Recomputing -> (SizeOverridden | SizeUnchanged) -> Idle`;
//! the other classes only queue layout/redraw [`Requests`] for the host.
//!
//! Where the size override happens depends on the [`SizePolicy`]:
//!
//! - [`SizePolicy::OnPropertyChange`] recomputes as soon as a property changes
//!   and publishes the unpadded text size. The measure pass reads the cache.
//! - [`SizePolicy::DuringMeasure`] only marks the cache dirty on change. The
//!   measure pass recomputes and publishes the padded size.
//!
//! A label uses one policy for its whole lifetime.

use crate::error::LabelError;
use crate::font::resolve_font;
use crate::label::LabelState;
use crate::layout::Spacing;
use crate::measure::TextMeasurer;
use crate::metrics::TextMetrics;
use crate::primitives::Size;

/// Where the workaround publishes the measured size as the size request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SizePolicy {
    /// Recompute and override on property change; measure is a cache read.
    #[default]
    OnPropertyChange,
    /// Mark dirty on property change; recompute and override while measuring.
    DuringMeasure,
}

/// Label properties, for routing a change to its invalidation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Property {
    Text,
    TextColor,
    FontFamily,
    FontAttributes,
    FontSize,
    HorizontalTextAlignment,
    VerticalTextAlignment,
    Padding,
    EnableWorkaround,
}

impl Property {
    /// What a change of this property invalidates.
    pub const fn invalidation(self) -> InvalidationClass {
        match self {
            Property::Text
            | Property::FontFamily
            | Property::FontAttributes
            | Property::FontSize
            | Property::Padding => InvalidationClass::Metrics,
            Property::HorizontalTextAlignment | Property::VerticalTextAlignment => {
                InvalidationClass::Arrange
            }
            Property::TextColor | Property::EnableWorkaround => InvalidationClass::Redraw,
        }
    }
}

/// How much work a property change causes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvalidationClass {
    /// Remeasure, possibly override the size request, then relayout and redraw.
    Metrics,
    /// Relayout and redraw with the cached metrics.
    Arrange,
    /// Redraw only.
    Redraw,
}

impl InvalidationClass {
    pub const fn requests(self) -> Requests {
        match self {
            InvalidationClass::Metrics | InvalidationClass::Arrange => Requests::ALL,
            InvalidationClass::Redraw => Requests::REDRAW,
        }
    }
}

/// Controller state. See the module docs for the transitions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InvalidationState {
    #[default]
    Idle,
    Dirty,
    Recomputing,
    SizeOverridden,
    SizeUnchanged,
}

/// Fire-and-forget signals for the host's layout and render scheduler.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Requests {
    pub layout: bool,
    pub redraw: bool,
}

impl Requests {
    pub const NONE: Self = Self {
        layout: false,
        redraw: false,
    };
    pub const REDRAW: Self = Self {
        layout: false,
        redraw: true,
    };
    pub const ALL: Self = Self {
        layout: true,
        redraw: true,
    };

    pub const fn merge(self, other: Requests) -> Requests {
        Requests {
            layout: self.layout || other.layout,
            redraw: self.redraw || other.redraw,
        }
    }
}

/// Owns the cached metrics and the published size request of one label.
#[derive(Clone, Debug, Default)]
pub struct InvalidationController {
    policy: SizePolicy,
    state: InvalidationState,
    metrics: TextMetrics,
    size_request: Option<Size>,
    pending: Requests,
}

impl InvalidationController {
    pub fn new(policy: SizePolicy) -> Self {
        Self {
            policy,
            ..Default::default()
        }
    }

    pub fn policy(&self) -> SizePolicy {
        self.policy
    }

    pub fn state(&self) -> InvalidationState {
        self.state
    }

    /// Cached metrics, possibly stale while dirty.
    pub fn metrics(&self) -> &TextMetrics {
        &self.metrics
    }

    /// Size last published by the workaround, if any. Never cleared.
    pub fn size_request(&self) -> Option<Size> {
        self.size_request
    }

    /// Queue layout/redraw requests.
    pub fn request(&mut self, requests: Requests) {
        self.pending = self.pending.merge(requests);
    }

    /// Drain the requests queued since the last call.
    pub fn take_requests(&mut self) -> Requests {
        std::mem::take(&mut self.pending)
    }

    /// React to a metrics-class property change.
    pub fn invalidate_metrics<M: TextMeasurer + ?Sized>(
        &mut self,
        label: &LabelState,
        measurer: &mut M,
    ) -> Result<(), LabelError> {
        self.transition(InvalidationState::Dirty);
        // Queued before recomputing so a failure still gets the host to retry.
        self.request(Requests::ALL);

        if self.policy == SizePolicy::OnPropertyChange {
            self.recompute(label, measurer, self.publish_padding(label))?;
            self.transition(InvalidationState::Idle);
        }
        Ok(())
    }

    /// Host measure pass. Returns the padded size the label wants.
    pub fn measure<M: TextMeasurer + ?Sized>(
        &mut self,
        label: &LabelState,
        measurer: &mut M,
    ) -> Result<Size, LabelError> {
        match self.policy {
            SizePolicy::OnPropertyChange => {
                if self.state == InvalidationState::Dirty {
                    self.recompute(label, measurer, self.publish_padding(label))?;
                }
            }
            SizePolicy::DuringMeasure => {
                self.transition(InvalidationState::Dirty);
                self.recompute(label, measurer, self.publish_padding(label))?;
            }
        }
        self.transition(InvalidationState::Idle);

        Ok(padded_size(&self.metrics, label.padding))
    }

    /// Metrics for painting, recomputed first if the cache is dirty or was
    /// never filled for the current text. A recompute here publishes like any
    /// other while the workaround is on.
    pub fn current_metrics<M: TextMeasurer + ?Sized>(
        &mut self,
        label: &LabelState,
        measurer: &mut M,
    ) -> Result<&TextMetrics, LabelError> {
        let missing = self.metrics.is_empty() && !label.text.is_empty();
        if self.state == InvalidationState::Dirty || missing {
            self.transition(InvalidationState::Dirty);
            self.recompute(label, measurer, self.publish_padding(label))?;
            self.transition(InvalidationState::Idle);
        }
        Ok(&self.metrics)
    }

    /// Padding added to the published size, or `None` with the workaround off.
    fn publish_padding(&self, label: &LabelState) -> Option<Spacing> {
        if !label.enable_workaround {
            return None;
        }
        match self.policy {
            SizePolicy::OnPropertyChange => Some(Spacing::zero()),
            SizePolicy::DuringMeasure => Some(label.padding),
        }
    }

    /// Remeasure and, when `publish` carries a padding, override the size
    /// request with the padded text size. Empty text skips measuring.
    /// On error the controller stays dirty.
    fn recompute<M: TextMeasurer + ?Sized>(
        &mut self,
        label: &LabelState,
        measurer: &mut M,
        publish: Option<Spacing>,
    ) -> Result<(), LabelError> {
        self.transition(InvalidationState::Recomputing);

        if label.text.is_empty() {
            self.metrics = TextMetrics::empty();
            self.transition(InvalidationState::SizeUnchanged);
            return Ok(());
        }

        let metrics = match measure_label(label, measurer) {
            Ok(metrics) => metrics,
            Err(err) => {
                log::warn!("failed to measure label text: {err}");
                self.transition(InvalidationState::Dirty);
                return Err(err);
            }
        };

        log::debug!(
            "measured {:?} in {} at {}pt: width={} height={}",
            metrics.text(),
            metrics.family(),
            metrics.font_size(),
            metrics.text_width(),
            metrics.size().height
        );
        self.metrics = metrics;

        match publish {
            Some(padding) => {
                let size = padded_size(&self.metrics, padding);
                log::debug!(
                    "publishing size request {}x{}",
                    size.width,
                    size.height
                );
                self.size_request = Some(size);
                self.transition(InvalidationState::SizeOverridden);
            }
            None => self.transition(InvalidationState::SizeUnchanged),
        }
        Ok(())
    }

    fn transition(&mut self, next: InvalidationState) {
        if self.state != next {
            log::trace!("label invalidation {:?} -> {:?}", self.state, next);
            self.state = next;
        }
    }
}

/// The font handle lives only for this call.
fn measure_label<M: TextMeasurer + ?Sized>(
    label: &LabelState,
    measurer: &mut M,
) -> Result<TextMetrics, LabelError> {
    let font = resolve_font(
        measurer,
        Some(&label.font_family),
        label.font_attributes,
        label.font_size,
    )?;
    TextMetrics::measure(measurer, &label.text, &font)
}

fn padded_size(metrics: &TextMetrics, padding: Spacing) -> Size {
    Size::new(
        padding.get_horizontal() + metrics.text_width(),
        padding.get_vertical() + metrics.size().height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::{FontHandle, FontSpec};
    use crate::measure::{EstimatedMeasurer, MeasuredText};

    /// Counts measure calls and can be told to fail.
    #[derive(Default)]
    struct Counting {
        measured: usize,
        fail: bool,
    }

    impl TextMeasurer for Counting {
        fn open_font(&mut self, spec: &FontSpec) -> Result<FontHandle, LabelError> {
            if self.fail {
                return Err(LabelError::NoFontFaces);
            }
            EstimatedMeasurer.open_font(spec)
        }

        fn measure_text(&mut self, text: &str, font: &FontHandle) -> Result<MeasuredText, LabelError> {
            self.measured += 1;
            EstimatedMeasurer.measure_text(text, font)
        }
    }

    fn label(text: &str, size: f32, workaround: bool) -> LabelState {
        LabelState {
            text: text.to_owned(),
            font_family: "Default".to_owned(),
            font_size: size,
            enable_workaround: workaround,
            ..Default::default()
        }
    }

    #[test]
    fn test_property_table() {
        use InvalidationClass::*;

        let expected = [
            (Property::Text, Metrics),
            (Property::FontFamily, Metrics),
            (Property::FontAttributes, Metrics),
            (Property::FontSize, Metrics),
            (Property::Padding, Metrics),
            (Property::TextColor, Redraw),
            (Property::HorizontalTextAlignment, Arrange),
            (Property::VerticalTextAlignment, Arrange),
            (Property::EnableWorkaround, Redraw),
        ];
        for (property, class) in expected {
            assert_eq!(property.invalidation(), class, "{property:?}");
        }

        assert_eq!(Metrics.requests(), Requests::ALL);
        assert_eq!(Arrange.requests(), Requests::ALL);
        assert_eq!(Redraw.requests(), Requests::REDRAW);
    }

    #[test]
    fn test_eager_publishes_unpadded_size() {
        let mut measurer = Counting::default();
        let mut controller = InvalidationController::new(SizePolicy::OnPropertyChange);
        let mut state = label("Hi", 20.0, true);
        state.padding = Spacing::all(4.0);

        controller.invalidate_metrics(&state, &mut measurer).unwrap();

        assert_eq!(controller.state(), InvalidationState::Idle);
        assert_eq!(controller.size_request(), Some(Size::new(20.0, 20.0)));
        assert_eq!(controller.take_requests(), Requests::ALL);
        assert_eq!(controller.take_requests(), Requests::NONE);
        assert_eq!(measurer.measured, 1);
    }

    #[test]
    fn test_eager_measure_reads_cache() {
        let mut measurer = Counting::default();
        let mut controller = InvalidationController::new(SizePolicy::OnPropertyChange);
        let mut state = label("Hi", 20.0, false);
        state.padding = Spacing::symmetric(2.0, 3.0);

        controller.invalidate_metrics(&state, &mut measurer).unwrap();
        let size = controller.measure(&state, &mut measurer).unwrap();

        assert_eq!(size, Size::new(24.0, 26.0));
        assert_eq!(measurer.measured, 1);
        assert_eq!(controller.size_request(), None);
    }

    #[test]
    fn test_deferred_marks_dirty_then_measures() {
        let mut measurer = Counting::default();
        let mut controller = InvalidationController::new(SizePolicy::DuringMeasure);
        let mut state = label("Hi", 20.0, true);
        state.padding = Spacing::all(1.0);

        controller.invalidate_metrics(&state, &mut measurer).unwrap();
        assert_eq!(controller.state(), InvalidationState::Dirty);
        assert_eq!(controller.take_requests(), Requests::ALL);
        assert_eq!(measurer.measured, 0);
        assert_eq!(controller.size_request(), None);

        let size = controller.measure(&state, &mut measurer).unwrap();
        assert_eq!(size, Size::new(22.0, 22.0));
        assert_eq!(controller.size_request(), Some(size));
        assert_eq!(controller.state(), InvalidationState::Idle);
        assert_eq!(measurer.measured, 1);
    }

    #[test]
    fn test_empty_text_skips_measuring() {
        for policy in [SizePolicy::OnPropertyChange, SizePolicy::DuringMeasure] {
            let mut measurer = Counting::default();
            let mut controller = InvalidationController::new(policy);
            let mut state = label("", 20.0, true);
            state.padding = Spacing::all(2.0);

            controller.invalidate_metrics(&state, &mut measurer).unwrap();
            let size = controller.measure(&state, &mut measurer).unwrap();

            assert_eq!(size, Size::new(4.0, 4.0));
            assert!(controller.metrics().is_empty());
            assert_eq!(controller.size_request(), None);
            assert_eq!(measurer.measured, 0);
        }
    }

    #[test]
    fn test_empty_text_keeps_published_size() {
        let mut measurer = Counting::default();
        let mut controller = InvalidationController::new(SizePolicy::OnPropertyChange);

        controller
            .invalidate_metrics(&label("Hi", 20.0, true), &mut measurer)
            .unwrap();
        controller
            .invalidate_metrics(&label("", 20.0, true), &mut measurer)
            .unwrap();

        assert!(controller.metrics().is_empty());
        assert_eq!(controller.size_request(), Some(Size::new(20.0, 20.0)));
    }

    #[test]
    fn test_failure_leaves_controller_dirty() {
        let mut measurer = Counting {
            fail: true,
            ..Default::default()
        };
        let mut controller = InvalidationController::new(SizePolicy::OnPropertyChange);
        let state = label("Hi", 20.0, true);

        let err = controller.invalidate_metrics(&state, &mut measurer);
        assert_eq!(err, Err(LabelError::NoFontFaces));
        assert_eq!(controller.state(), InvalidationState::Dirty);
        assert_eq!(controller.size_request(), None);
        assert_eq!(controller.take_requests(), Requests::ALL);

        measurer.fail = false;
        let metrics = controller.current_metrics(&state, &mut measurer).unwrap();
        assert_eq!(metrics.text(), "Hi");
        assert_eq!(controller.state(), InvalidationState::Idle);
        assert_eq!(controller.size_request(), Some(Size::new(20.0, 20.0)));
    }

    #[test]
    fn test_measure_retry_publishes_with_workaround() {
        let mut measurer = Counting {
            fail: true,
            ..Default::default()
        };
        let mut controller = InvalidationController::new(SizePolicy::OnPropertyChange);
        let mut state = label("Hi", 20.0, true);
        state.padding = Spacing::all(2.0);

        assert!(controller.invalidate_metrics(&state, &mut measurer).is_err());
        assert!(controller.measure(&state, &mut measurer).is_err());
        assert_eq!(controller.state(), InvalidationState::Dirty);

        measurer.fail = false;
        let size = controller.measure(&state, &mut measurer).unwrap();
        assert_eq!(size, Size::new(24.0, 24.0));
        assert_eq!(controller.metrics().text_width(), 20.0);
        assert_eq!(controller.size_request(), Some(Size::new(20.0, 20.0)));
        assert_eq!(controller.state(), InvalidationState::Idle);
    }

    #[test]
    fn test_deferred_failure_still_requests_layout() {
        let mut measurer = Counting {
            fail: true,
            ..Default::default()
        };
        let mut controller = InvalidationController::new(SizePolicy::DuringMeasure);
        let state = label("Hi", 20.0, true);

        controller.invalidate_metrics(&state, &mut measurer).unwrap();
        assert_eq!(controller.take_requests(), Requests::ALL);
        assert!(controller.measure(&state, &mut measurer).is_err());
        assert_eq!(controller.state(), InvalidationState::Dirty);
        assert_eq!(controller.size_request(), None);
    }

    #[test]
    fn test_current_metrics_fills_missing_cache() {
        let mut measurer = Counting::default();
        let mut controller = InvalidationController::new(SizePolicy::OnPropertyChange);
        let state = label("Hi", 20.0, false);

        let metrics = controller.current_metrics(&state, &mut measurer).unwrap();
        assert_eq!(metrics.text_width(), 20.0);

        controller.current_metrics(&state, &mut measurer).unwrap();
        assert_eq!(measurer.measured, 1);
    }
}
