use crate::resources::PageResources;
use crate::util::put_num;
use std::f32::consts::{FRAC_PI_2, PI};
use vellum_style::TextRenderingMode;
use vellum_traits::{Font, GraphicState, Image, ImageOrientation, PathData, PathSink, Pattern, Shader};
use vellum_types::{Color, Matrix, Point, Rect};

/// Control-point distance for approximating a quarter circle with one cubic
/// Bézier: 4/3·(√2−1), rounded.
const CURVE_KAPPA: f32 = 0.551784;

/// Radii below this threshold degrade an elliptical arc to a line segment.
const ARC_RADIUS_EPSILON: f32 = 1e-10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCap {
    Butt,
    Round,
    Square,
}

impl LineCap {
    fn operand(self) -> u8 {
        match self {
            LineCap::Butt => 0,
            LineCap::Round => 1,
            LineCap::Square => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineJoin {
    Miter,
    Round,
    Bevel,
}

impl LineJoin {
    fn operand(self) -> u8 {
        match self {
            LineJoin::Miter => 0,
            LineJoin::Round => 1,
            LineJoin::Bevel => 2,
        }
    }
}

/// Optional text-state operands for [`ContentStream::set_font`] and
/// [`ContentStream::draw_string`]. Only non-default values produce
/// operators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextParams {
    /// Character spacing in unscaled text units (`Tc`).
    pub char_space: f32,
    /// Word spacing (`Tw`).
    pub word_space: f32,
    /// Horizontal scaling factor, 1.0 = 100% (`Tz`).
    pub scale: f32,
    /// Baseline rise (`Ts`).
    pub rise: f32,
    /// Rendering mode (`Tr`), omitted when filling.
    pub mode: TextRenderingMode,
}

impl Default for TextParams {
    fn default() -> Self {
        Self {
            char_space: 0.0,
            word_space: 0.0,
            scale: 1.0,
            rise: 0.0,
            mode: TextRenderingMode::Fill,
        }
    }
}

/// One level of emitter-side graphics state. Cloned on save; the byte buffer
/// mirrors the stack with `q`/`Q`.
#[derive(Debug, Clone, Default)]
pub struct GraphicsContext {
    pub ctm: Matrix,
}

/// Serializes drawing operations into the byte sequence of a PDF page
/// content stream.
///
/// The stream owns its buffer, a stack of [`GraphicsContext`]s and the
/// [`PageResources`] registry; resources referenced by name are registered
/// before the referencing operator is written. Output is deterministic:
/// identical call sequences produce identical bytes.
#[derive(Debug, Default)]
pub struct ContentStream {
    buf: Vec<u8>,
    context: GraphicsContext,
    stack: Vec<GraphicsContext>,
    resources: PageResources,
}

impl ContentStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// The bytes emitted so far.
    pub fn bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn resources(&self) -> &PageResources {
        &self.resources
    }

    /// The current transformation matrix, tracking `cm` operators between
    /// `q`/`Q` pairs.
    pub fn transform(&self) -> Matrix {
        self.context.ctm
    }

    fn put(&mut self, s: &str) {
        self.buf.extend_from_slice(s.as_bytes());
    }

    /// Writes `nums` space-separated, then a space, the operator and a
    /// newline.
    fn op(&mut self, nums: &[f32], operator: &str) {
        for n in nums {
            put_num(&mut self.buf, *n);
            self.buf.push(b' ');
        }
        self.put(operator);
        self.buf.push(b'\n');
    }

    // --- Path construction ---

    pub fn move_to(&mut self, x: f32, y: f32) {
        self.op(&[x, y], "m");
    }

    pub fn line_to(&mut self, x: f32, y: f32) {
        self.op(&[x, y], "l");
    }

    /// Cubic Bézier from the current point through two control points.
    pub fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x3: f32, y3: f32) {
        self.op(&[x1, y1, x2, y2, x3, y3], "c");
    }

    pub fn draw_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.op(&[x, y, w, h], "re");
    }

    pub fn draw_box(&mut self, rect: Rect) {
        self.draw_rect(rect.x, rect.y, rect.width, rect.height);
    }

    /// Straight segment as a sub-path of its own.
    pub fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.move_to(x1, y1);
        self.line_to(x2, y2);
    }

    pub fn close_path(&mut self) {
        self.put("h\n");
    }

    /// Ellipse centered on `(x, y)`: one `m` and four quarter-turn cubics.
    pub fn draw_ellipse(&mut self, x: f32, y: f32, rh: f32, rv: f32) {
        let kh = CURVE_KAPPA * rh;
        let kv = CURVE_KAPPA * rv;
        self.move_to(x - rh, y);
        self.curve_to(x - rh, y - kv, x - kh, y - rv, x, y - rv);
        self.curve_to(x + kh, y - rv, x + rh, y - kv, x + rh, y);
        self.curve_to(x + rh, y + kv, x + kh, y + rv, x, y + rv);
        self.curve_to(x - kh, y + rv, x - rh, y + kv, x - rh, y);
    }

    /// Rectangle with elliptical corners of radii `(rh, rv)`: corner cubics
    /// joined by edge lines, starting on the left edge at `(x, y + rv)`.
    pub fn draw_rrect(&mut self, x: f32, y: f32, w: f32, h: f32, rv: f32, rh: f32) {
        let kh = CURVE_KAPPA * rh;
        let kv = CURVE_KAPPA * rv;
        self.move_to(x, y + rv);
        self.curve_to(x, y + rv - kv, x + rh - kh, y, x + rh, y);
        self.line_to(x + w - rh, y);
        self.curve_to(x + w - rh + kh, y, x + w, y + rv - kv, x + w, y + rv);
        self.line_to(x + w, y + h - rv);
        self.curve_to(x + w, y + h - rv + kv, x + w - rh + kh, y + h, x + w - rh, y + h);
        self.line_to(x + rh, y + h);
        self.curve_to(x + rh - kh, y + h, x, y + h - rv + kv, x, y + h - rv);
        self.line_to(x, y + rv);
    }

    /// Elliptical arc from `(x1, y1)` to `(x2, y2)` in SVG endpoint
    /// parameterization, emitted as cubic Béziers.
    ///
    /// Coinciding endpoints emit nothing; a vanishing radius degrades to a
    /// line. With a non-zero `phi` the arc is computed in a frame where the
    /// start sits at the origin and the axes are unrotated, and every
    /// control point is mapped back on emission.
    #[allow(clippy::too_many_arguments)]
    pub fn bezier_arc(
        &mut self,
        x1: f32,
        y1: f32,
        rx: f32,
        ry: f32,
        x2: f32,
        y2: f32,
        large_arc: bool,
        sweep: bool,
        phi: f32,
    ) {
        if x1 == x2 && y1 == y2 {
            return;
        }
        if rx.abs() < ARC_RADIUS_EPSILON || ry.abs() < ARC_RADIUS_EPSILON {
            self.line_to(x2, y2);
            return;
        }
        if phi != 0.0 {
            let to_local = Matrix::rotation(-phi) * Matrix::translation(-x1, -y1);
            let to_page = Matrix::translation(x1, y1) * Matrix::rotation(phi);
            let end = to_local.transform_point(Point::new(x2, y2));
            self.arc_curves(0.0, 0.0, rx, ry, end.x, end.y, large_arc, sweep, Some(&to_page));
        } else {
            self.arc_curves(x1, y1, rx, ry, x2, y2, large_arc, sweep, None);
        }
    }

    /// Endpoint → center conversion per SVG 1.1 appendix F.6.5, then one
    /// cubic per angular fragment of at most a quarter turn.
    #[allow(clippy::too_many_arguments)]
    fn arc_curves(
        &mut self,
        x1: f32,
        y1: f32,
        rx: f32,
        ry: f32,
        x2: f32,
        y2: f32,
        large_arc: bool,
        sweep: bool,
        transform: Option<&Matrix>,
    ) {
        let mut rx = rx.abs();
        let mut ry = ry.abs();

        let x1p = (x1 - x2) / 2.0;
        let y1p = (y1 - y2) / 2.0;

        // Scale radii up when no ellipse can reach both endpoints.
        let lambda = (x1p * x1p) / (rx * rx) + (y1p * y1p) / (ry * ry);
        if lambda > 1.0 {
            let s = lambda.sqrt();
            rx *= s;
            ry *= s;
        }

        let num = rx * rx * ry * ry - rx * rx * y1p * y1p - ry * ry * x1p * x1p;
        let den = rx * rx * y1p * y1p + ry * ry * x1p * x1p;
        let mut coef = (num / den).max(0.0).sqrt();
        if large_arc == sweep {
            coef = -coef;
        }

        let cxp = coef * rx * y1p / ry;
        let cyp = -coef * ry * x1p / rx;
        let cx = cxp + (x1 + x2) / 2.0;
        let cy = cyp + (y1 + y2) / 2.0;

        let theta1 = vector_angle(1.0, 0.0, (x1p - cxp) / rx, (y1p - cyp) / ry);
        let mut delta = vector_angle(
            (x1p - cxp) / rx,
            (y1p - cyp) / ry,
            (-x1p - cxp) / rx,
            (-y1p - cyp) / ry,
        );
        if !sweep && delta > 0.0 {
            delta -= 2.0 * PI;
        } else if sweep && delta < 0.0 {
            delta += 2.0 * PI;
        }

        let fragments = (delta.abs() / FRAC_PI_2).ceil().max(1.0) as usize;
        let step = delta / fragments as f32;
        // Signed control distance: negative steps flip the tangents.
        let kappa = (4.0 / 3.0) * (1.0 - (step / 2.0).cos()) / (step / 2.0).sin();

        let point = |theta: f32| (cx + rx * theta.cos(), cy + ry * theta.sin());
        let tangent = |theta: f32| (-rx * theta.sin(), ry * theta.cos());

        let mut theta = theta1;
        for _ in 0..fragments {
            let next = theta + step;
            let (sx, sy) = point(theta);
            let (ex, ey) = point(next);
            let (tx0, ty0) = tangent(theta);
            let (tx1, ty1) = tangent(next);
            let mut cp1 = Point::new(sx + kappa * tx0, sy + kappa * ty0);
            let mut cp2 = Point::new(ex - kappa * tx1, ey - kappa * ty1);
            let mut end = Point::new(ex, ey);
            if let Some(m) = transform {
                cp1 = m.transform_point(cp1);
                cp2 = m.transform_point(cp2);
                end = m.transform_point(end);
            }
            self.curve_to(cp1.x, cp1.y, cp2.x, cp2.y, end.x, end.y);
            theta = next;
        }
    }

    /// Replays an external path source into this stream's path operators.
    pub fn draw_shape(&mut self, path: &dyn PathData) {
        path.replay(self);
    }

    // --- Path painting ---

    pub fn fill_path(&mut self, even_odd: bool) {
        self.put(if even_odd { "f*\n" } else { "f\n" });
    }

    pub fn stroke_path(&mut self, close: bool) {
        self.put(if close { "s\n" } else { "S\n" });
    }

    pub fn fill_and_stroke_path(&mut self, even_odd: bool, close: bool) {
        self.put(match (close, even_odd) {
            (false, false) => "B\n",
            (false, true) => "B*\n",
            (true, false) => "b\n",
            (true, true) => "b*\n",
        });
    }

    /// Intersects the clipping region with the current path. `end` also
    /// ends the path with a no-op paint (`n`).
    pub fn clip_path(&mut self, even_odd: bool, end: bool) {
        self.put(if even_odd { "W*" } else { "W" });
        if end {
            self.put(" n");
        }
        self.buf.push(b'\n');
    }

    // --- Graphics state ---

    /// Pushes a clone of the current graphics context (`q`).
    pub fn save_context(&mut self) {
        self.put("q\n");
        self.stack.push(self.context.clone());
    }

    /// Pops the context stack (`Q`). A pop on an empty stack is a no-op per
    /// the content-stream contract.
    pub fn restore_context(&mut self) {
        match self.stack.pop() {
            Some(context) => {
                self.put("Q\n");
                self.context = context;
            }
            None => {
                log::warn!("restore_context called with an empty context stack");
            }
        }
    }

    /// Concatenates `m` onto the CTM (`cm`).
    pub fn set_transform(&mut self, m: &Matrix) {
        let [a, b, c, d, e, f] = m.coefficients();
        self.op(&[a, b, c, d, e, f], "cm");
        self.context.ctm = self.context.ctm * *m;
    }

    pub fn set_line_width(&mut self, width: f32) {
        self.op(&[width], "w");
    }

    pub fn set_line_cap(&mut self, cap: LineCap) {
        self.op(&[cap.operand() as f32], "J");
    }

    pub fn set_line_join(&mut self, join: LineJoin) {
        self.op(&[join.operand() as f32], "j");
    }

    pub fn set_miter_limit(&mut self, limit: f32) {
        debug_assert!(limit >= 1.0, "miter limit must be >= 1, got {limit}");
        self.op(&[limit], "M");
    }

    /// Dash pattern `[a b …] phase d`; an empty array restores solid lines.
    pub fn set_line_dash_pattern(&mut self, pattern: &[f32], phase: f32) {
        self.put("[");
        for (i, v) in pattern.iter().enumerate() {
            if i > 0 {
                self.buf.push(b' ');
            }
            put_num(&mut self.buf, *v);
        }
        self.put("] ");
        put_num(&mut self.buf, phase);
        self.put(" d\n");
    }

    pub fn set_fill_color(&mut self, color: &Color) {
        match *color {
            Color::Rgb { r, g, b } => self.op(&[r, g, b], "rg"),
            Color::Cmyk { c, m, y, k } => self.op(&[c, m, y, k], "k"),
        }
    }

    pub fn set_stroke_color(&mut self, color: &Color) {
        match *color {
            Color::Rgb { r, g, b } => self.op(&[r, g, b], "RG"),
            Color::Cmyk { c, m, y, k } => self.op(&[c, m, y, k], "K"),
        }
    }

    pub fn set_graphic_state(&mut self, state: &dyn GraphicState) {
        let name = self.resources.state_name(&state.key());
        self.put("/");
        self.put(&name);
        self.put(" gs\n");
    }

    // --- Text ---

    /// Selects `font` at `size` (`Tf`) followed by the non-default text
    /// state operands; `Tr` is omitted in fill mode. Registers the font on
    /// the page.
    pub fn set_font(&mut self, font: &dyn Font, size: f32, params: TextParams) {
        debug_assert!(size > 0.0, "font size must be positive, got {size}");
        self.resources.add_font(font.name());
        self.put("/");
        self.put(font.name());
        self.buf.push(b' ');
        put_num(&mut self.buf, size);
        self.put(" Tf\n");
        if params.char_space != 0.0 {
            self.op(&[params.char_space], "Tc");
        }
        if params.word_space != 0.0 {
            self.op(&[params.word_space], "Tw");
        }
        if params.scale != 1.0 {
            self.op(&[params.scale * 100.0], "Tz");
        }
        if params.rise != 0.0 {
            self.op(&[params.rise], "Ts");
        }
        if params.mode != TextRenderingMode::Fill {
            self.op(&[params.mode.operand() as f32], "Tr");
        }
    }

    /// Shows `text` with its baseline origin at `(x, y)`:
    /// `BT x y Td …Tf… [ <encoded> ] TJ ET`.
    pub fn draw_string(
        &mut self,
        font: &dyn Font,
        size: f32,
        text: &str,
        x: f32,
        y: f32,
        params: TextParams,
    ) {
        self.put("BT ");
        put_num(&mut self.buf, x);
        self.buf.push(b' ');
        put_num(&mut self.buf, y);
        self.put(" Td\n");
        self.set_font(font, size, params);
        self.put("[");
        font.put_text(&mut self.buf, text);
        self.put("] TJ ET\n");
    }

    // --- External objects ---

    /// Places `image` in the rectangle `(x, y, w, h)`, compensating for its
    /// EXIF orientation with the `cm` concatenated inside a `q`/`Q` pair.
    pub fn draw_image(&mut self, image: &dyn Image, x: f32, y: f32, w: f32, h: f32) {
        self.resources.add_x_object(image.name());
        let [a, b, c, d, e, f] = match image.orientation() {
            ImageOrientation::TopLeft => [w, 0.0, 0.0, h, x, y],
            ImageOrientation::TopRight => [-w, 0.0, 0.0, h, w + x, y],
            ImageOrientation::BottomRight => [-w, 0.0, 0.0, -h, w + x, h + y],
            ImageOrientation::BottomLeft => [w, 0.0, 0.0, -h, x, h + y],
            ImageOrientation::LeftTop => [0.0, -h, -w, 0.0, w + x, h + y],
            ImageOrientation::RightTop => [0.0, -h, w, 0.0, x, h + y],
            ImageOrientation::RightBottom => [0.0, h, w, 0.0, x, y],
            ImageOrientation::LeftBottom => [0.0, h, -w, 0.0, w + x, y],
        };
        self.save_context();
        self.set_transform(&Matrix::from_coefficients(a, b, c, d, e, f));
        self.put("/");
        self.put(image.name());
        self.put(" Do\n");
        self.restore_context();
    }

    /// Paints the clip region with `shader` (`sh`).
    pub fn apply_shader(&mut self, shader: &dyn Shader) {
        self.resources.add_shader(shader.name());
        self.put("/");
        self.put(shader.name());
        self.put(" sh\n");
    }

    pub fn set_fill_pattern(&mut self, pattern: &dyn Pattern) {
        self.resources.add_pattern(pattern.name());
        self.put("/Pattern cs\n/");
        self.put(pattern.name());
        self.put(" scn\n");
    }

    pub fn set_stroke_pattern(&mut self, pattern: &dyn Pattern) {
        self.resources.add_pattern(pattern.name());
        self.put("/Pattern CS\n/");
        self.put(pattern.name());
        self.put(" SCN\n");
    }
}

impl PathSink for ContentStream {
    fn move_to(&mut self, x: f32, y: f32) {
        ContentStream::move_to(self, x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        ContentStream::line_to(self, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x3: f32, y3: f32) {
        ContentStream::curve_to(self, x1, y1, x2, y2, x3, y3);
    }

    fn close_path(&mut self) {
        ContentStream::close_path(self);
    }
}

/// Signed angle between two vectors, per F.6.5.4.
fn vector_angle(ux: f32, uy: f32, vx: f32, vy: f32) -> f32 {
    let dot = ux * vx + uy * vy;
    let len = ((ux * ux + uy * uy) * (vx * vx + vy * vy)).sqrt();
    let mut angle = (dot / len).clamp(-1.0, 1.0).acos();
    if ux * vy - uy * vx < 0.0 {
        angle = -angle;
    }
    angle
}
