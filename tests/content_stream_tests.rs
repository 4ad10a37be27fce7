mod common;

use common::{count_op, ops, simple_font};
use vellum::graphics::{ContentStream, TextParams, path_bounds};
use vellum::traits::{Image, ImageOrientation, PathData, PathSink};
use vellum::types::{Color, Matrix, Rect};

struct Logo;

impl Image for Logo {
    fn name(&self) -> &str {
        "I1"
    }

    fn orientation(&self) -> ImageOrientation {
        ImageOrientation::RightTop
    }
}

/// A triangle with one curved edge, standing in for a parsed SVG path.
struct Wedge;

impl PathData for Wedge {
    fn replay(&self, sink: &mut dyn PathSink) {
        sink.move_to(0.0, 0.0);
        sink.line_to(40.0, 0.0);
        sink.curve_to(40.0, 22.0, 22.0, 40.0, 0.0, 40.0);
        sink.close_path();
    }
}

#[test]
fn full_page_composition_is_balanced_and_deterministic() {
    let compose = || {
        let mut g = ContentStream::new();
        g.save_context();
        g.set_fill_color(&Color::gray(0.9));
        g.draw_rect(0.0, 0.0, 595.0, 842.0);
        g.fill_path(false);
        g.restore_context();

        g.save_context();
        g.set_transform(&Matrix::translation(72.0, 720.0));
        g.set_fill_color(&Color::BLACK);
        g.draw_string(
            simple_font().as_ref(),
            12.0,
            "Invoice #42",
            0.0,
            0.0,
            TextParams::default(),
        );
        g.restore_context();

        g.draw_image(&Logo, 450.0, 700.0, 100.0, 60.0);

        g.save_context();
        g.draw_shape(&Wedge);
        g.clip_path(false, true);
        g.set_fill_color(&Color::rgb(0.2, 0.4, 0.8));
        g.draw_rect(0.0, 0.0, 40.0, 40.0);
        g.fill_path(false);
        g.restore_context();

        g.into_bytes()
    };

    let bytes = compose();
    assert_eq!(bytes, compose());
    assert_eq!(count_op(&bytes, "q"), count_op(&bytes, "Q"));
    assert!(ops(&bytes).contains("[(Invoice #42)] TJ ET"));
    assert!(ops(&bytes).contains("/I1 Do"));
    assert!(ops(&bytes).contains("W n"));
}

#[test]
fn shape_replay_and_bounds_agree_on_endpoints() {
    let mut g = ContentStream::new();
    g.draw_shape(&Wedge);
    assert_eq!(count_op(g.bytes(), "m"), 1);
    assert_eq!(count_op(g.bytes(), "l"), 1);
    assert_eq!(count_op(g.bytes(), "c"), 1);
    assert_eq!(count_op(g.bytes(), "h"), 1);

    let bounds = path_bounds(&Wedge);
    assert_eq!(bounds, Rect::new(0.0, 0.0, 40.0, 40.0));
}

#[test]
fn resources_collect_across_operations() {
    let mut g = ContentStream::new();
    g.draw_string(
        simple_font().as_ref(),
        9.0,
        "x",
        0.0,
        0.0,
        TextParams::default(),
    );
    g.draw_image(&Logo, 0.0, 0.0, 10.0, 10.0);
    assert_eq!(g.resources().fonts().collect::<Vec<_>>(), vec!["F1"]);
    assert_eq!(g.resources().x_objects().collect::<Vec<_>>(), vec!["I1"]);
}
