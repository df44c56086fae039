//! Process-wide text sizing service.
//!
//! Loading the system font database is expensive, so labels share one
//! [`CosmicMeasurer`]. It is built on first use, at most once, and every call
//! takes the lock only for its own duration.

use std::sync::{Mutex, OnceLock};

use sk_label::{FontHandle, FontSpec, LabelError, MeasuredText, TextMeasurer};

use crate::cosmic::CosmicMeasurer;

static SERVICE: OnceLock<Mutex<CosmicMeasurer>> = OnceLock::new();

fn service() -> &'static Mutex<CosmicMeasurer> {
    SERVICE.get_or_init(|| {
        let measurer = CosmicMeasurer::new();
        log::info!(
            "Text sizing service initialized with {} font families",
            measurer.families().len()
        );
        Mutex::new(measurer)
    })
}

/// Run `f` with exclusive access to the shared measurer.
pub fn with_measurer<R>(f: impl FnOnce(&mut CosmicMeasurer) -> R) -> Result<R, LabelError> {
    let mut guard = service()
        .lock()
        .map_err(|_| LabelError::ServicePoisoned)?;
    Ok(f(&mut guard))
}

/// Family names known to the shared measurer.
pub fn font_families() -> Result<Vec<String>, LabelError> {
    with_measurer(|measurer| measurer.families())
}

/// Handle to the shared measurer, usable as a label's [`TextMeasurer`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SharedMeasurer;

impl TextMeasurer for SharedMeasurer {
    fn open_font(&mut self, spec: &FontSpec) -> Result<FontHandle, LabelError> {
        with_measurer(|measurer| measurer.open_font(spec))?
    }

    fn measure_text(&mut self, text: &str, font: &FontHandle) -> Result<MeasuredText, LabelError> {
        with_measurer(|measurer| measurer.measure_text(text, font))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sk_label::{FontAttributes, SkLabel};

    #[test]
    fn test_service_is_built_once() {
        fn address() -> usize {
            service() as *const Mutex<CosmicMeasurer> as usize
        }

        let first = address();
        let handles: Vec<_> = (0..4).map(|_| std::thread::spawn(address)).collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), first);
        }
    }

    #[test]
    fn test_shared_measurer_matches_service() {
        let families = font_families().unwrap();
        let spec = FontSpec::resolve(None, FontAttributes::NONE, 14.0);

        match SharedMeasurer.open_font(&spec) {
            Ok(font) => assert!(families.iter().any(|f| f == font.family())),
            Err(err) => {
                assert!(families.is_empty());
                assert_eq!(err, LabelError::NoFontFaces);
            }
        }
    }

    #[test]
    fn test_label_over_shared_measurer() {
        let mut label = SkLabel::new(SharedMeasurer);
        label.set_enable_workaround(true);

        match label.set_text("Hi") {
            Ok(()) => {
                let request = label.size_request().unwrap();
                assert_eq!(request.width, label.metrics().text_width());
                assert_eq!(request.height, label.metrics().size().height);
            }
            Err(err) => assert_eq!(err, LabelError::NoFontFaces),
        }
        assert_eq!(label.text(), "Hi");
    }
}
