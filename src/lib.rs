//! # Vellum
//!
//! A two-layer PDF rendering core:
//!
//! - [`graphics`]: a content-stream emitter serializing drawing operators
//!   (paths, text, images, transforms, state) into the byte sequence of a
//!   PDF page, with graphics-state stack discipline and per-page resource
//!   registration.
//! - [`layout`]: an inline rich-text layout engine breaking a styled span
//!   tree into positioned glyph runs, embedded widgets and decoration runs
//!   inside a bounding box, then painting them through the emitter.
//!
//! Fonts, images, shading objects and SVG path parsing are consumed through
//! the interfaces in [`traits`]; widgets, background decorations and
//! annotation builders, which receive the emitter itself, through the
//! interfaces in [`layout`]. This crate never parses font files or
//! assembles the PDF object graph.
//!
//! ```ignore
//! use vellum::layout::{InlineSpan, LayoutContext, RichText, TextStyle, Widget};
//! use vellum::graphics::ContentStream;
//! use vellum::types::BoxConstraints;
//!
//! let ctx = LayoutContext::new(TextStyle { font: Some(font), ..TextStyle::default() });
//! let mut text = RichText::new(InlineSpan::text("Hello world"));
//! text.layout(&ctx, BoxConstraints::tight_width(200.0))?;
//!
//! let mut canvas = ContentStream::new();
//! text.paint(&mut canvas);
//! let bytes = canvas.into_bytes();
//! ```

// Re-export foundation crates
pub use vellum_style as style;
pub use vellum_traits as traits;
pub use vellum_types as types;

// Re-export the rendering core
pub use vellum_graphics as graphics;
pub use vellum_layout as layout;

// Convenience re-exports from the foundation crates
pub use style::{TextAlign, TextDecoration, TextDirection, TextRenderingMode};
pub use types::{BoxConstraints, Color, FontMetrics, Matrix, Point, Rect, Size};

// Convenience re-exports from the core
pub use graphics::{ContentStream, GraphicsError, PageResources, TextParams};
pub use layout::{InlineSpan, LayoutContext, LayoutError, RichText, TextStyle, Widget};
