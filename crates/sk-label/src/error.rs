use thiserror::Error;

/// Resource faults raised by a measurement backend.
///
/// Bad property input never shows up here: setters coerce it to a default.
/// Broken preconditions (measuring empty text) panic instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LabelError {
    /// The backend has no font faces at all, so nothing can be measured
    #[error("no font faces are available to the text backend")]
    NoFontFaces,

    /// The shared sizing service lock was poisoned by a panicking user
    #[error("the shared text sizing service was poisoned")]
    ServicePoisoned,
}
