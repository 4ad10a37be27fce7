use crate::LayoutError;
use crate::decoration::Decoration;
use crate::span::{InlineSpan, SpanLeaf};
use crate::style::TextStyle;
use crate::widget::{AnnotationBuilder, LayoutContext, Widget};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use vellum_graphics::{ContentStream, TextParams};
use vellum_style::{TextAlign, TextDirection};
use vellum_traits::Font;
use vellum_types::{BoxConstraints, Color, FontMetrics, Point, Rect};

/// One word of laid-out text, anchored at its baseline origin in
/// layout-local coordinates.
pub struct Word {
    pub text: String,
    pub style: Arc<TextStyle>,
    pub font: Arc<dyn Font>,
    pub metrics: FontMetrics,
    pub offset: Point,
}

impl Word {
    pub fn bounds(&self) -> Rect {
        self.metrics.bounds().translate(self.offset.x, self.offset.y)
    }

    fn paint(&self, canvas: &mut ContentStream, origin: Point, text_scale: f32) {
        canvas.draw_string(
            self.font.as_ref(),
            self.style.font_size() * text_scale,
            &self.text,
            origin.x + self.offset.x,
            origin.y + self.offset.y,
            TextParams {
                char_space: self.style.letter_spacing(),
                mode: self.style.rendering_mode(),
                ..TextParams::default()
            },
        );
    }
}

/// An inline widget positioned within a line. The widget keeps its own box;
/// the span offset places that box in layout-local coordinates.
pub struct EmbeddedWidget {
    pub widget: Rc<RefCell<dyn Widget>>,
    pub style: Arc<TextStyle>,
    pub offset: Point,
}

impl EmbeddedWidget {
    pub fn bounds(&self) -> Rect {
        let size = self.widget.borrow().bounds().size();
        Rect::new(self.offset.x, self.offset.y, size.width, size.height)
    }

    fn paint(&self, canvas: &mut ContentStream, origin: Point) {
        let mut child = self.widget.borrow_mut();
        let size = child.bounds().size();
        child.set_bounds(Rect::new(
            origin.x + self.offset.x,
            origin.y + self.offset.y,
            size.width,
            size.height,
        ));
        child.paint(canvas);
    }
}

/// A span after layout, in logical reading order within its line.
pub enum PositionedSpan {
    Word(Word),
    Widget(EmbeddedWidget),
}

impl PositionedSpan {
    pub fn offset(&self) -> Point {
        match self {
            PositionedSpan::Word(word) => word.offset,
            PositionedSpan::Widget(widget) => widget.offset,
        }
    }

    pub fn set_offset(&mut self, offset: Point) {
        match self {
            PositionedSpan::Word(word) => word.offset = offset,
            PositionedSpan::Widget(widget) => widget.offset = offset,
        }
    }

    pub fn width(&self) -> f32 {
        match self {
            PositionedSpan::Word(word) => word.metrics.width(),
            PositionedSpan::Widget(widget) => widget.widget.borrow().bounds().width,
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            PositionedSpan::Word(word) => word.bounds(),
            PositionedSpan::Widget(widget) => widget.bounds(),
        }
    }

    pub fn style(&self) -> &Arc<TextStyle> {
        match self {
            PositionedSpan::Word(word) => &word.style,
            PositionedSpan::Widget(widget) => &widget.style,
        }
    }

    fn paint(&self, canvas: &mut ContentStream, origin: Point, text_scale: f32) {
        match self {
            PositionedSpan::Word(word) => word.paint(canvas, origin, text_scale),
            PositionedSpan::Widget(widget) => widget.paint(canvas, origin),
        }
    }
}

/// One laid-out line: an index range into the span list plus the metrics
/// realignment needs.
#[derive(Debug, Clone)]
pub struct Line {
    pub first_span: usize,
    pub span_count: usize,
    /// Distance from the line's baseline to its top extent; subtracted from
    /// every span's `offset.y` during realignment.
    pub baseline: f32,
    /// Width of the line's content, trailing word gap excluded.
    pub words_width: f32,
    pub text_align: TextAlign,
    pub text_direction: TextDirection,
}

impl Line {
    fn range(&self) -> std::ops::Range<usize> {
        self.first_span..self.first_span + self.span_count
    }

    /// Moves the line's spans to their final horizontal positions and
    /// normalizes `offset.y` against the line baseline.
    ///
    /// Justification distributes the free space between spans in logical
    /// order and only on non-final lines with at least two spans; every
    /// other case degrades to left alignment. Right-to-left lines mirror
    /// each span around the line box after the alignment shift.
    fn realign(&self, spans: &mut [PositionedSpan], total_width: f32, is_last: bool) {
        let delta = match self.text_align {
            TextAlign::Left => 0.0,
            TextAlign::Right => total_width - self.words_width,
            TextAlign::Center => (total_width - self.words_width) / 2.0,
            TextAlign::Justify => {
                if !is_last && self.span_count > 1 {
                    let delta = (total_width - self.words_width) / (self.span_count - 1) as f32;
                    let mut shift = 0.0;
                    for span in spans {
                        let offset = span.offset();
                        span.set_offset(Point::new(offset.x + shift, offset.y - self.baseline));
                        shift += delta;
                    }
                    return;
                }
                0.0
            }
        };

        if self.text_direction == TextDirection::Rtl {
            for span in spans {
                let offset = span.offset();
                let mirrored = total_width - (offset.x + span.width()) - delta;
                span.set_offset(Point::new(mirrored, offset.y - self.baseline));
            }
        } else {
            for span in spans {
                let offset = span.offset();
                span.set_offset(Point::new(offset.x + delta, offset.y - self.baseline));
            }
        }
    }
}

/// Breaks a tree of inline spans into positioned spans and decoration runs
/// within the box constraints, then paints them through a content stream.
///
/// `layout` rebuilds the span and decoration lists from scratch, so a single
/// instance must not be laid out concurrently. Distinct instances are
/// independent.
pub struct RichText {
    pub text: InlineSpan,
    pub text_align: TextAlign,
    pub text_direction: TextDirection,
    /// Honor explicit `\n` breaks. When disabled, newlines flow on.
    pub soft_wrap: bool,
    /// Use glyph ink extents instead of font ascent/descent for line height.
    pub tight_bounds: bool,
    pub text_scale: f32,
    pub max_lines: Option<usize>,
    spans: Vec<PositionedSpan>,
    decorations: Vec<Decoration>,
    lines: Vec<Line>,
    bounds: Rect,
    overflow: bool,
}

impl RichText {
    pub fn new(text: InlineSpan) -> Self {
        Self {
            text,
            text_align: TextAlign::Left,
            text_direction: TextDirection::Ltr,
            soft_wrap: true,
            tight_bounds: false,
            text_scale: 1.0,
            max_lines: None,
            spans: Vec::new(),
            decorations: Vec::new(),
            lines: Vec::new(),
            bounds: Rect::ZERO,
            overflow: false,
        }
    }

    pub fn spans(&self) -> &[PositionedSpan] {
        &self.spans
    }

    pub fn decorations(&self) -> &[Decoration] {
        &self.decorations
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Whether any line was broken by the width constraint.
    pub fn overflowed(&self) -> bool {
        self.overflow
    }

    /// Strokes the layout box outline for visual debugging.
    pub fn debug_paint(&self, canvas: &mut ContentStream) {
        canvas.save_context();
        canvas.set_stroke_color(&Color::rgb(1.0, 0.0, 1.0));
        canvas.set_line_width(0.5);
        canvas.draw_box(self.bounds);
        canvas.stroke_path(false);
        canvas.restore_context();
    }
}

impl Widget for RichText {
    fn layout(
        &mut self,
        ctx: &LayoutContext,
        constraints: BoxConstraints,
    ) -> Result<(), LayoutError> {
        self.spans.clear();
        self.decorations.clear();
        self.lines.clear();
        self.overflow = false;

        let root_style = Arc::new(ctx.style.clone());
        let mut breaker = LineBreaker {
            ctx,
            spans: Vec::new(),
            decorations: Vec::new(),
            lines: Vec::new(),
            offset_x: 0.0,
            offset_y: 0.0,
            span_start: 0,
            span_count: 0,
            top: None,
            bottom: None,
            overflow: false,
            max_width: constraints.max_width,
            max_height: constraints.max_height,
            max_lines: self.max_lines.unwrap_or(usize::MAX),
            align: self.text_align,
            direction: self.text_direction,
            soft_wrap: self.soft_wrap,
            tight_bounds: self.tight_bounds,
            scale: self.text_scale,
        };

        self.text.visit(&root_style, None, &mut |leaf, style, annotation| match leaf {
            SpanLeaf::Text { text, baseline } => {
                breaker.text_leaf(text, baseline, style, annotation.cloned())
            }
            SpanLeaf::Widget { child, baseline } => {
                breaker.widget_leaf(child, baseline, style, annotation.cloned())
            }
        })?;

        if breaker.span_count > 0 {
            breaker.flush_line(breaker.offset_x);
        }
        let content_height = breaker.offset_y + breaker.line_height();

        debug_assert!(
            !breaker.overflow || breaker.max_width.is_finite(),
            "line overflow requires a bounded width constraint"
        );
        let width = if breaker.overflow {
            breaker.max_width
        } else {
            breaker
                .lines
                .iter()
                .fold(constraints.min_width, |w, line| w.max(line.words_width))
        };

        let line_total = breaker.lines.len();
        for (index, line) in breaker.lines.iter().enumerate() {
            line.realign(&mut breaker.spans[line.range()], width, index + 1 == line_total);
        }

        self.spans = breaker.spans;
        self.decorations = breaker.decorations;
        self.lines = breaker.lines;
        self.overflow = breaker.overflow;
        self.bounds = Rect::new(
            0.0,
            0.0,
            constraints.constrain_width(width),
            constraints.constrain_height(content_height),
        );

        log::debug!(
            "laid out rich text: {} spans, {} lines, box {}x{}",
            self.spans.len(),
            self.lines.len(),
            self.bounds.width,
            self.bounds.height
        );
        Ok(())
    }

    fn paint(&mut self, canvas: &mut ContentStream) {
        let origin = Point::new(self.bounds.left(), self.bounds.top());

        for decoration in &self.decorations {
            decoration.background_paint(canvas, &self.spans, origin);
        }

        let mut running_style: Option<&Arc<TextStyle>> = None;
        let mut last_color: Option<Color> = None;
        for span in &self.spans {
            let style = span.style();
            if running_style.is_none_or(|current| !Arc::ptr_eq(current, style)) {
                running_style = Some(style);
                let color = style.color();
                if last_color != Some(color) {
                    canvas.set_fill_color(&color);
                    last_color = Some(color);
                }
            }
            span.paint(canvas, origin, self.text_scale);
        }

        for decoration in &self.decorations {
            decoration.foreground_paint(canvas, &self.spans, origin, self.text_scale);
        }
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }
}

/// Mutable state of the greedy single-pass line breaker.
struct LineBreaker<'a> {
    ctx: &'a LayoutContext,
    spans: Vec<PositionedSpan>,
    decorations: Vec<Decoration>,
    lines: Vec<Line>,
    offset_x: f32,
    offset_y: f32,
    span_start: usize,
    span_count: usize,
    /// Lowest extent of the current line relative to its baseline.
    top: Option<f32>,
    /// Highest extent of the current line relative to its baseline.
    bottom: Option<f32>,
    overflow: bool,
    max_width: f32,
    max_height: f32,
    max_lines: usize,
    align: TextAlign,
    direction: TextDirection,
    soft_wrap: bool,
    tight_bounds: bool,
    scale: f32,
}

impl LineBreaker<'_> {
    fn line_height(&self) -> f32 {
        self.bottom.unwrap_or(0.0) - self.top.unwrap_or(0.0)
    }

    fn flush_line(&mut self, words_width: f32) {
        self.lines.push(Line {
            first_span: self.span_start,
            span_count: self.span_count,
            baseline: self.bottom.unwrap_or(0.0),
            words_width: words_width.max(0.0),
            text_align: self.align,
            text_direction: self.direction,
        });
        self.span_start += self.span_count;
        self.span_count = 0;
    }

    /// Width-constraint break. Returns `false` when layout must terminate.
    fn wrap_flush(&mut self, words_width: f32, line_spacing: f32) -> bool {
        self.overflow = true;
        let line_height = self.line_height();
        self.flush_line(words_width);
        if self.lines.len() >= self.max_lines {
            return false;
        }
        self.offset_x = 0.0;
        self.offset_y += line_height + line_spacing;
        self.top = None;
        self.bottom = None;
        self.offset_y <= self.max_height
    }

    /// Explicit `\n` break. An empty line advances by the space glyph's
    /// vertical metrics since it contributed no extents of its own.
    fn newline_flush(&mut self, words_width: f32, space: &FontMetrics, line_spacing: f32) -> bool {
        let advance = if self.span_count > 0 {
            self.line_height()
        } else {
            space.ascent + space.descent
        };
        self.flush_line(words_width);
        if self.lines.len() >= self.max_lines {
            return false;
        }
        self.offset_x = 0.0;
        self.offset_y += advance + line_spacing;
        self.top = None;
        self.bottom = None;
        self.offset_y <= self.max_height
    }

    fn grow_line_extents(&mut self, low: f32, high: f32) {
        self.top = Some(self.top.map_or(low, |top| top.min(low)));
        self.bottom = Some(self.bottom.map_or(high, |bottom| bottom.max(high)));
    }

    fn push_span(
        &mut self,
        span: PositionedSpan,
        font: Option<Arc<dyn Font>>,
        annotation: Option<Arc<dyn AnnotationBuilder>>,
    ) {
        let style = span.style().clone();
        self.spans.push(span);
        self.span_count += 1;
        let index = self.spans.len() - 1;

        let decoration = Decoration::new(style, font, annotation, index);
        if self.span_count > 1
            && let Some(last) = self.decorations.last_mut()
            && last.matches(&decoration)
        {
            last.extend_to(index);
        } else {
            self.decorations.push(decoration);
        }
    }

    fn text_leaf(
        &mut self,
        text: &str,
        baseline: f32,
        style: &Arc<TextStyle>,
        annotation: Option<Arc<dyn AnnotationBuilder>>,
    ) -> Result<bool, LayoutError> {
        let font = style.font.clone().ok_or(LayoutError::MissingFont)?;
        let font_size = style.font_size() * self.scale;
        let letter_spacing = style.letter_spacing();
        let word_spacing = style.word_spacing();
        let line_spacing = style.line_spacing();
        let space = font.string_metrics(" ", 0.0) * font_size;
        let word_gap = space.advance_width * word_spacing + letter_spacing;
        let baseline = baseline * self.scale;

        let shaped;
        let text = if self.direction == TextDirection::Rtl
            && let Some(shaper) = &self.ctx.shaper
        {
            shaped = shaper.shape(text);
            shaped.as_str()
        } else {
            text
        };

        let logical_lines: Vec<&str> = text.split('\n').collect();
        let last_line = logical_lines.len() - 1;
        for (line_index, logical) in logical_lines.iter().enumerate() {
            for token in logical.split(|c: char| c.is_whitespace()) {
                if token.is_empty() {
                    // A run of whitespace only advances the cursor.
                    self.offset_x += word_gap;
                    continue;
                }

                let metrics =
                    font.string_metrics(token, letter_spacing / font_size) * font_size;

                if self.offset_x + metrics.width() > self.max_width
                    && self.span_count > 0
                    && !self.wrap_flush(self.offset_x - word_gap, line_spacing)
                {
                    return Ok(false);
                }

                let (low, high) = if self.tight_bounds {
                    (metrics.top, metrics.bottom)
                } else {
                    (metrics.descent, metrics.ascent)
                };
                self.grow_line_extents(low + baseline, high + baseline);

                let word = Word {
                    text: token.to_string(),
                    style: style.clone(),
                    font: font.clone(),
                    metrics,
                    offset: Point::new(self.offset_x, -self.offset_y + baseline),
                };
                self.push_span(
                    PositionedSpan::Word(word),
                    Some(font.clone()),
                    annotation.clone(),
                );

                self.offset_x += metrics.advance_width + word_gap;
            }

            if line_index < last_line
                && self.soft_wrap
                && !self.newline_flush(self.offset_x - word_gap, &space, line_spacing)
            {
                return Ok(false);
            }
        }

        // Give back the trailing word gap, keeping one letter-spacing step.
        self.offset_x -= space.advance_width * word_spacing - letter_spacing;
        Ok(true)
    }

    fn widget_leaf(
        &mut self,
        child: &Rc<RefCell<dyn Widget>>,
        baseline: f32,
        style: &Arc<TextStyle>,
        annotation: Option<Arc<dyn AnnotationBuilder>>,
    ) -> Result<bool, LayoutError> {
        let font_size = style.font_size() * self.scale;
        let line_spacing = style.line_spacing();
        child
            .borrow_mut()
            .layout(self.ctx, BoxConstraints::tight_height(font_size))?;
        let child_bounds = child.borrow().bounds();

        if self.offset_x + child_bounds.width > self.max_width
            && self.span_count > 0
            && !self.wrap_flush(self.offset_x, line_spacing)
        {
            return Ok(false);
        }

        let baseline = baseline * self.scale;
        self.grow_line_extents(baseline, child_bounds.height + baseline);

        let embedded = EmbeddedWidget {
            widget: child.clone(),
            style: style.clone(),
            offset: Point::new(self.offset_x, -self.offset_y + baseline),
        };
        self.push_span(
            PositionedSpan::Widget(embedded),
            style.font.clone(),
            annotation,
        );

        self.offset_x += child_bounds.left() + child_bounds.width;
        Ok(true)
    }
}
