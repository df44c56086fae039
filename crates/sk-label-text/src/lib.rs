//! Text measurement backend for `sk-label`.
//!
//! The `cosmic` feature (on by default) provides [`CosmicMeasurer`], a
//! [`sk_label::TextMeasurer`] built on `cosmic-text` using the fonts installed
//! on the system, and the [`shared`] module with the process-wide instance
//! labels normally measure through.
//!
//! Measurements are ink bounds plus advance width for a single shaped line;
//! there is no wrapping.

#![deny(warnings)]

#[cfg(feature = "cosmic")]
pub mod cosmic;

#[cfg(feature = "cosmic")]
pub mod shared;

#[cfg(feature = "cosmic")]
pub use cosmic::CosmicMeasurer;

#[cfg(feature = "cosmic")]
pub use shared::{font_families, with_measurer, SharedMeasurer};
