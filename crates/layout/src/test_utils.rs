#![cfg(test)]

use crate::style::TextStyle;
use crate::widget::{AnnotationBuilder, LayoutContext, Widget};
use crate::LayoutError;
use std::cell::RefCell;
use std::sync::Arc;
use vellum_graphics::ContentStream;
use vellum_traits::Font;
use vellum_types::{BoxConstraints, FontMetrics, Rect};

/// Fixed-metric font: every glyph advances half an em, ascent 0.75,
/// descent -0.25. At size 10 a character is 5pt wide and a line (from font
/// metrics) is 10pt tall.
#[derive(Debug)]
pub struct TestFont;

impl Font for TestFont {
    fn name(&self) -> &str {
        "F1"
    }

    fn descent(&self) -> f32 {
        -0.25
    }

    fn string_metrics(&self, text: &str, letter_spacing: f32) -> FontMetrics {
        let glyphs = text.chars().count();
        let advance = glyphs as f32 * 0.5 + glyphs.saturating_sub(1) as f32 * letter_spacing;
        FontMetrics {
            left: 0.0,
            top: -0.25,
            right: advance,
            bottom: 0.75,
            ascent: 0.75,
            descent: -0.25,
            advance_width: advance,
        }
    }

    fn put_text(&self, buf: &mut Vec<u8>, text: &str) {
        buf.push(b'(');
        for byte in text.bytes() {
            if matches!(byte, b'(' | b')' | b'\\') {
                buf.push(b'\\');
            }
            buf.push(byte);
        }
        buf.push(b')');
    }
}

pub fn test_font() -> Arc<dyn Font> {
    Arc::new(TestFont)
}

/// Context with the test font at size 10.
pub fn test_context() -> LayoutContext {
    LayoutContext::new(TextStyle {
        font: Some(test_font()),
        font_size: Some(10.0),
        ..TextStyle::default()
    })
}

/// Inline widget with a fixed width; its height comes from the tight
/// constraint the layout engine passes down.
pub struct FixedWidget {
    pub width: f32,
    bounds: Rect,
}

impl FixedWidget {
    pub fn new(width: f32) -> Self {
        Self {
            width,
            bounds: Rect::ZERO,
        }
    }
}

impl Widget for FixedWidget {
    fn layout(
        &mut self,
        _ctx: &LayoutContext,
        constraints: BoxConstraints,
    ) -> Result<(), LayoutError> {
        self.bounds = Rect::new(0.0, 0.0, self.width, constraints.constrain_height(0.0));
        Ok(())
    }

    fn paint(&mut self, canvas: &mut ContentStream) {
        canvas.draw_box(self.bounds);
        canvas.fill_path(false);
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }
}

/// Records every rectangle it is asked to annotate.
#[derive(Debug, Default)]
pub struct RecordingAnnotation {
    pub rects: RefCell<Vec<Rect>>,
}

impl AnnotationBuilder for RecordingAnnotation {
    fn build(&self, _canvas: &mut ContentStream, rect: Rect) {
        self.rects.borrow_mut().push(rect);
    }
}
