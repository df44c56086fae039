/// Text alignment along one axis of the label box.
///
/// The same enum drives both axes: `Start` is left/top, `End` is right/bottom.
/// `Justify` has no meaning for a single line and lays out like `Start`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TextAlignment {
    #[default]
    Start,
    Center,
    End,
    Justify,
}

impl TextAlignment {
    /// Resolve to one of the three positions the layout engine knows about.
    pub const fn effective(self) -> TextAlignment {
        match self {
            TextAlignment::Justify => TextAlignment::Start,
            other => other,
        }
    }
}
