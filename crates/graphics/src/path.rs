use vellum_traits::{PathData, PathSink};
use vellum_types::Rect;

/// A [`PathSink`] that computes the tight bounding box of the path events it
/// receives, without emitting anything.
///
/// Line segments contribute their endpoints. Cubic segments contribute their
/// endpoints plus the curve's axis-aligned extrema, found by solving the
/// derivative quadratic per axis for roots strictly inside `(0, 1)`.
#[derive(Debug, Default)]
pub struct PathBounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
    current: (f32, f32),
    visited: bool,
}

impl PathBounds {
    pub fn new() -> Self {
        Self::default()
    }

    /// The accumulated bounding box, or [`Rect::ZERO`] if no points were
    /// visited.
    pub fn bounds(&self) -> Rect {
        if !self.visited {
            return Rect::ZERO;
        }
        Rect::new(
            self.min_x,
            self.min_y,
            self.max_x - self.min_x,
            self.max_y - self.min_y,
        )
    }

    fn add(&mut self, x: f32, y: f32) {
        if self.visited {
            self.min_x = self.min_x.min(x);
            self.min_y = self.min_y.min(y);
            self.max_x = self.max_x.max(x);
            self.max_y = self.max_y.max(y);
        } else {
            self.min_x = x;
            self.min_y = y;
            self.max_x = x;
            self.max_y = y;
            self.visited = true;
        }
    }
}

impl PathSink for PathBounds {
    fn move_to(&mut self, x: f32, y: f32) {
        self.add(x, y);
        self.current = (x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.add(x, y);
        self.current = (x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x3: f32, y3: f32) {
        let (x0, y0) = self.current;
        self.add(x3, y3);
        for t in axis_extrema(x0, x1, x2, x3) {
            let x = cubic_at(x0, x1, x2, x3, t);
            let y = cubic_at(y0, y1, y2, y3, t);
            self.add(x, y);
        }
        for t in axis_extrema(y0, y1, y2, y3) {
            let x = cubic_at(x0, x1, x2, x3, t);
            let y = cubic_at(y0, y1, y2, y3, t);
            self.add(x, y);
        }
        self.current = (x3, y3);
    }

    fn close_path(&mut self) {}
}

/// Computes the bounding box of a replayable path.
pub fn path_bounds(path: &dyn PathData) -> Rect {
    let mut sink = PathBounds::new();
    path.replay(&mut sink);
    sink.bounds()
}

/// Parameters in `(0, 1)` where the cubic through `p0..p3` has a stationary
/// point on this axis. The derivative is the quadratic
/// `3(p3-3p2+3p1-p0)t² + 6(p0-2p1+p2)t + 3(p1-p0)`.
fn axis_extrema(p0: f32, p1: f32, p2: f32, p3: f32) -> impl Iterator<Item = f32> {
    let a = 3.0 * (p3 - 3.0 * p2 + 3.0 * p1 - p0);
    let b = 6.0 * (p0 - 2.0 * p1 + p2);
    let c = 3.0 * (p1 - p0);

    let mut roots = [None, None];
    if a.abs() < 1e-12 {
        if b.abs() > 1e-12 {
            roots[0] = Some(-c / b);
        }
    } else {
        let disc = b * b - 4.0 * a * c;
        if disc >= 0.0 {
            let sq = disc.sqrt();
            roots[0] = Some((-b + sq) / (2.0 * a));
            roots[1] = Some((-b - sq) / (2.0 * a));
        }
    }
    roots
        .into_iter()
        .flatten()
        .filter(|t| *t > 0.0 && *t < 1.0)
}

fn cubic_at(p0: f32, p1: f32, p2: f32, p3: f32, t: f32) -> f32 {
    let u = 1.0 - t;
    u * u * u * p0 + 3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t * p3
}

#[cfg(test)]
mod tests {
    use super::*;
    use vellum_traits::{PathData, PathSink};

    enum Event {
        Move(f32, f32),
        Line(f32, f32),
        Curve(f32, f32, f32, f32, f32, f32),
        Close,
    }

    struct Events(Vec<Event>);

    impl PathData for Events {
        fn replay(&self, sink: &mut dyn PathSink) {
            for ev in &self.0 {
                match *ev {
                    Event::Move(x, y) => sink.move_to(x, y),
                    Event::Line(x, y) => sink.line_to(x, y),
                    Event::Curve(x1, y1, x2, y2, x3, y3) => sink.curve_to(x1, y1, x2, y2, x3, y3),
                    Event::Close => sink.close_path(),
                }
            }
        }
    }

    #[test]
    fn empty_path_has_zero_bounds() {
        assert_eq!(path_bounds(&Events(vec![])), Rect::ZERO);
    }

    #[test]
    fn polyline_bounds_are_endpoint_union() {
        let path = Events(vec![
            Event::Move(1.0, 2.0),
            Event::Line(5.0, -3.0),
            Event::Line(-2.0, 4.0),
            Event::Close,
        ]);
        let b = path_bounds(&path);
        assert_eq!(b, Rect::new(-2.0, -3.0, 7.0, 7.0));
    }

    #[test]
    fn cubic_extrema_extend_past_endpoints() {
        // Symmetric bump: endpoints on y=0, apex at t=0.5 where
        // y = (3·30 + 3·30) / 8 = 22.5.
        let path = Events(vec![
            Event::Move(0.0, 0.0),
            Event::Curve(10.0, 30.0, 20.0, 30.0, 30.0, 0.0),
        ]);
        let b = path_bounds(&path);
        assert_eq!(b.x, 0.0);
        assert_eq!(b.width, 30.0);
        assert!((b.top() - 22.5).abs() < 1e-4, "top was {}", b.top());
        assert_eq!(b.y, 0.0);
    }

    #[test]
    fn control_points_alone_do_not_inflate_bounds() {
        // Control points far right, but the curve never reaches x=100.
        let path = Events(vec![
            Event::Move(0.0, 0.0),
            Event::Curve(100.0, 0.0, 100.0, 10.0, 0.0, 10.0),
        ]);
        let b = path_bounds(&path);
        // Max x at t=0.5: (3·100 + 3·100) / 8 = 75.
        assert!((b.right() - 75.0).abs() < 1e-4, "right was {}", b.right());
    }
}
