use std::sync::Arc;
use vellum::layout::{LayoutContext, TextStyle};
use vellum::traits::Font;
use vellum::types::FontMetrics;

/// Deterministic fixture font: half-em advance per glyph, ascent 0.75 em,
/// descent -0.25 em, ink box matching the font metrics.
#[derive(Debug)]
pub struct SimpleFont {
    name: &'static str,
}

impl SimpleFont {
    pub fn new(name: &'static str) -> Self {
        Self { name }
    }
}

impl Font for SimpleFont {
    fn name(&self) -> &str {
        self.name
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

pub fn simple_font() -> Arc<dyn Font> {
    Arc::new(SimpleFont::new("F1"))
}

/// Layout context with the fixture font at 10pt.
pub fn context() -> LayoutContext {
    LayoutContext::new(TextStyle {
        font: Some(simple_font()),
        font_size: Some(10.0),
        ..TextStyle::default()
    })
}

pub fn ops(bytes: &[u8]) -> String {
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn count_op(bytes: &[u8], op: &str) -> usize {
    ops(bytes)
        .split_ascii_whitespace()
        .filter(|tok| *tok == op)
        .count()
}
