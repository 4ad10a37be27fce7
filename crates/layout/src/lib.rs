//! Inline rich-text layout.
//!
//! [`RichText`] walks an [`InlineSpan`] tree depth-first, breaks its leaves
//! into lines with a greedy single pass, realigns each line per the
//! alignment and direction, and later replays the result through a
//! [`vellum_graphics::ContentStream`] in three phases: backgrounds and
//! annotations, glyph runs, decoration lines.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("span has no font and the layout context provides no default")]
    MissingFont,
    #[error("generic layout error: {0}")]
    Generic(String),
}

pub mod decoration;
pub mod rich_text;
pub mod span;
pub mod style;
pub mod widget;

pub use decoration::Decoration;
pub use rich_text::{EmbeddedWidget, Line, PositionedSpan, RichText, Word};
pub use span::{InlineSpan, SpanLeaf, TextSpan, WidgetSpan};
pub use style::TextStyle;
pub use widget::{AnnotationBuilder, BackgroundDecoration, LayoutContext, Widget};

#[cfg(test)]
mod test_utils;
