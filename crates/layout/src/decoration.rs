use crate::rich_text::PositionedSpan;
use crate::style::TextStyle;
use crate::widget::AnnotationBuilder;
use std::sync::Arc;
use vellum_graphics::ContentStream;
use vellum_style::{TextDecoration, TextDecorationStyle};
use vellum_traits::Font;
use vellum_types::{Point, Rect};

/// Offset factor between the two strokes of a double decoration line.
const DOUBLE_LINE_SPACE: f32 = -0.15;

/// A visual adornment covering a contiguous index range of positioned
/// spans: underline/overline/strike, span background, and the annotation
/// rectangle.
///
/// Consecutive spans sharing the same style and annotation extend the
/// previous run instead of opening a new one, so the decoration list is a
/// contiguous cover of the span list.
pub struct Decoration {
    style: Arc<TextStyle>,
    font: Option<Arc<dyn Font>>,
    annotation: Option<Arc<dyn AnnotationBuilder>>,
    start_span: usize,
    end_span: usize,
}

impl Decoration {
    pub(crate) fn new(
        style: Arc<TextStyle>,
        font: Option<Arc<dyn Font>>,
        annotation: Option<Arc<dyn AnnotationBuilder>>,
        span_index: usize,
    ) -> Self {
        Self {
            style,
            font,
            annotation,
            start_span: span_index,
            end_span: span_index,
        }
    }

    pub fn style(&self) -> &Arc<TextStyle> {
        &self.style
    }

    pub fn start_span(&self) -> usize {
        self.start_span
    }

    pub fn end_span(&self) -> usize {
        self.end_span
    }

    /// Structural merge test: equal style attributes and the same
    /// annotation instance.
    pub(crate) fn matches(&self, other: &Decoration) -> bool {
        let same_annotation = match (&self.annotation, &other.annotation) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        same_annotation && *self.style == *other.style
    }

    pub(crate) fn extend_to(&mut self, span_index: usize) {
        debug_assert!(span_index >= self.end_span);
        self.end_span = span_index;
    }

    /// Union of the covered spans' boxes, in layout-local coordinates.
    pub fn bounds(&self, spans: &[PositionedSpan]) -> Rect {
        let mut covered = spans[self.start_span..=self.end_span].iter();
        let first = match covered.next() {
            Some(span) => span.bounds(),
            None => return Rect::ZERO,
        };
        covered.fold(first, |acc, span| acc.union(span.bounds()))
    }

    /// Phase one of the paint pass: annotation rectangle and span
    /// background, both at the page-absolute merged rectangle.
    pub(crate) fn background_paint(
        &self,
        canvas: &mut ContentStream,
        spans: &[PositionedSpan],
        origin: Point,
    ) {
        let rect = self.bounds(spans).translate(origin.x, origin.y);
        if let Some(annotation) = &self.annotation {
            annotation.build(canvas, rect);
        }
        if let Some(background) = &self.style.background {
            background.paint(canvas, rect);
            canvas.set_fill_color(&self.style.color());
        }
    }

    /// Phase three of the paint pass: decoration lines over the painted
    /// spans.
    pub(crate) fn foreground_paint(
        &self,
        canvas: &mut ContentStream,
        spans: &[PositionedSpan],
        origin: Point,
        text_scale: f32,
    ) {
        let decoration = self.style.decoration();
        if decoration.is_empty() {
            return;
        }

        let rect = self.bounds(spans).translate(origin.x, origin.y);
        let font_size = self.style.font_size() * text_scale;
        let thickness = self.style.decoration_thickness();
        let descent = self.font.as_ref().map_or(0.0, |font| font.descent());
        let double = self.style.decoration_style() == TextDecorationStyle::Double;
        let space = DOUBLE_LINE_SPACE * font_size * thickness;

        let color = self.style.decoration_color.unwrap_or_else(|| self.style.color());
        canvas.set_stroke_color(&color);
        canvas.set_line_width(0.05 * font_size * thickness);

        if decoration.contains(TextDecoration::UNDERLINE) {
            let base = -descent * font_size / 2.0;
            canvas.draw_line(
                rect.left(),
                rect.bottom() + base,
                rect.right(),
                rect.bottom() + base,
            );
            if double {
                canvas.draw_line(
                    rect.left(),
                    rect.bottom() + base + space,
                    rect.right(),
                    rect.bottom() + base + space,
                );
            }
            canvas.stroke_path(false);
        }

        if decoration.contains(TextDecoration::OVERLINE) {
            let base = font_size;
            canvas.draw_line(
                rect.left(),
                rect.bottom() + base,
                rect.right(),
                rect.bottom() + base,
            );
            if double {
                canvas.draw_line(
                    rect.left(),
                    rect.bottom() + base - space,
                    rect.right(),
                    rect.bottom() + base - space,
                );
            }
            canvas.stroke_path(false);
        }

        if decoration.contains(TextDecoration::LINE_THROUGH) {
            let base = (1.0 - descent) * font_size / 2.0;
            canvas.draw_line(
                rect.left(),
                rect.bottom() + base,
                rect.right(),
                rect.bottom() + base,
            );
            if double {
                canvas.draw_line(
                    rect.left(),
                    rect.bottom() + base + space,
                    rect.right(),
                    rect.bottom() + base + space,
                );
            }
            canvas.stroke_path(false);
        }
    }
}
