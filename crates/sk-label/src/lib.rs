//! # sk-label
//!
//! Graphics backend agnostic single-line text label.
//!
//! This crate measures a string with a resolved font, caches the resulting
//! [`TextMetrics`], computes where the baseline origin goes inside a padded box
//! and records the draw calls needed to paint it. Text shaping itself is
//! behind the [`TextMeasurer`] trait; backend crates like `sk-label-text`
//! implement it.
//!
//! The [`SkLabel`] control ties it together. Its optional workaround mode
//! publishes the measured text size as the control's size request, for hosts
//! whose layout pass does not re-measure when the drawn content changes size.

mod color;
mod content;
mod error;
mod font;
mod invalidate;
mod label;
mod layout;
mod measure;
mod metrics;
mod primitives;
mod render;

pub use color::*;
pub use content::*;
pub use error::*;
pub use font::*;
pub use invalidate::*;
pub use label::*;
pub use layout::*;
pub use measure::*;
pub use metrics::*;
pub use primitives::*;
pub use render::*;

pub use glam::Vec2;
