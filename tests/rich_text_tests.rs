mod common;

use common::{context, count_op, ops};
use vellum::graphics::ContentStream;
use vellum::layout::{InlineSpan, RichText, TextStyle, Widget};
use vellum::style::{TextAlign, TextDirection};
use vellum::types::BoxConstraints;

#[test]
fn layout_then_paint_round_trip() {
    let ctx = context();
    let mut rich = RichText::new(InlineSpan::text("The quick brown fox"));
    rich.layout(&ctx, BoxConstraints::tight_width(60.0)).unwrap();

    // Words of 15/25/25/15 pt with 5pt gaps wrap into two lines at 60pt.
    assert_eq!(rich.lines().len(), 2);
    assert!(rich.overflowed());
    assert!((rich.bounds().width - 60.0).abs() < 0.01);

    let mut canvas = ContentStream::new();
    rich.paint(&mut canvas);
    let bytes = canvas.bytes();

    assert_eq!(count_op(bytes, "BT"), 4);
    assert_eq!(count_op(bytes, "ET"), 4);
    assert_eq!(count_op(bytes, "q"), count_op(bytes, "Q"));
    assert!(ops(bytes).contains("[(quick)] TJ ET"));
    assert_eq!(canvas.resources().fonts().collect::<Vec<_>>(), vec!["F1"]);
}

#[test]
fn identical_input_produces_identical_bytes() {
    let render = || {
        let ctx = context();
        let mut rich = RichText::new(InlineSpan::text("deterministic output"));
        rich.text_align = TextAlign::Center;
        rich.layout(&ctx, BoxConstraints::tight_width(140.0)).unwrap();
        let mut canvas = ContentStream::new();
        rich.paint(&mut canvas);
        canvas.into_bytes()
    };
    assert_eq!(render(), render());
}

#[test]
fn rtl_paragraph_anchors_to_the_right_edge() {
    let ctx = context();
    let mut rich = RichText::new(InlineSpan::text("one two three"));
    rich.text_direction = TextDirection::Rtl;
    rich.layout(&ctx, BoxConstraints::new(90.0, 90.0, 0.0, f32::INFINITY))
        .unwrap();

    let first = &rich.spans()[0];
    assert!((first.offset().x + first.width() - 90.0).abs() < 0.01);
    for span in rich.spans() {
        assert!(span.offset().x >= -0.01);
        assert!(span.offset().x + span.width() <= 90.01);
    }
}

#[test]
fn styled_children_inherit_and_override() {
    use vellum::types::Color;

    let ctx = context();
    let tree = InlineSpan::Text(vellum::layout::TextSpan {
        style: Some(TextStyle {
            color: Some(Color::rgb(0.0, 0.5, 0.0)),
            ..TextStyle::default()
        }),
        text: Some("green ".to_string()),
        children: vec![InlineSpan::styled(
            "red",
            TextStyle {
                color: Some(Color::rgb(1.0, 0.0, 0.0)),
                ..TextStyle::default()
            },
        )],
        ..vellum::layout::TextSpan::default()
    });
    let mut rich = RichText::new(tree);
    rich.layout(&ctx, BoxConstraints::default()).unwrap();

    let mut canvas = ContentStream::new();
    rich.paint(&mut canvas);
    let text = ops(canvas.bytes());

    assert!(text.contains("0 0.5 0 rg\n"));
    assert!(text.contains("1 0 0 rg\n"));
}

#[test]
fn debug_paint_strokes_the_layout_box() {
    let ctx = context();
    let mut rich = RichText::new(InlineSpan::text("boxed"));
    rich.layout(&ctx, BoxConstraints::default()).unwrap();

    let mut canvas = ContentStream::new();
    rich.debug_paint(&mut canvas);
    let bytes = canvas.bytes();
    assert_eq!(count_op(bytes, "re"), 1);
    assert_eq!(count_op(bytes, "S"), 1);
    assert_eq!(count_op(bytes, "q"), 1);
    assert_eq!(count_op(bytes, "Q"), 1);
}
