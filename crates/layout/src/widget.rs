use crate::LayoutError;
use crate::style::TextStyle;
use std::sync::Arc;
use vellum_graphics::ContentStream;
use vellum_traits::TextShaper;
use vellum_types::{BoxConstraints, Rect};

/// A paintable box participating in layout.
///
/// `layout` sizes the widget into `bounds`; the owner may then move the box
/// with `set_bounds` before `paint` draws at its final position.
pub trait Widget {
    fn layout(
        &mut self,
        ctx: &LayoutContext,
        constraints: BoxConstraints,
    ) -> Result<(), LayoutError>;

    fn paint(&mut self, canvas: &mut ContentStream);

    fn bounds(&self) -> Rect;

    fn set_bounds(&mut self, bounds: Rect);
}

/// Paints behind a run of spans, inside the run's merged rectangle.
pub trait BackgroundDecoration: std::fmt::Debug {
    fn paint(&self, canvas: &mut ContentStream, rect: Rect);
}

/// Builds an annotation (link, comment, …) covering a page-absolute
/// rectangle, with access to the page's content stream. The layout engine
/// only decides the rectangle; the builder owns the annotation dictionary.
pub trait AnnotationBuilder: std::fmt::Debug {
    fn build(&self, canvas: &mut ContentStream, rect: Rect);
}

/// Shared, read-only environment for one layout pass.
pub struct LayoutContext {
    /// Base style merged under every span; supplies the default font.
    pub style: TextStyle,
    /// Shaping hook applied to right-to-left text before segmentation.
    pub shaper: Option<Arc<dyn TextShaper>>,
    /// Enables diagnostic painting in owners that support it.
    pub debug: bool,
}

impl LayoutContext {
    pub fn new(style: TextStyle) -> Self {
        Self {
            style,
            shaper: None,
            debug: false,
        }
    }

    pub fn with_shaper(mut self, shaper: Arc<dyn TextShaper>) -> Self {
        self.shaper = Some(shaper);
        self
    }
}
