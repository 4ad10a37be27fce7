use crate::geometry::{Rect, Size};

/// Measured extents of a run of text, in font design units already scaled by
/// the point size (multiply by `font_size / units_per_em` style factors via
/// `Mul<f32>`).
///
/// Vertical values are relative to the baseline with y growing upwards:
/// `descent` and `top` are usually negative, `ascent` and `bottom` positive.
/// `top`/`bottom` are the ink extents of the measured glyphs; `ascent`/
/// `descent` come from the font's global metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FontMetrics {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub ascent: f32,
    pub descent: f32,
    pub advance_width: f32,
}

impl FontMetrics {
    pub const ZERO: FontMetrics = FontMetrics {
        left: 0.0,
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
        ascent: 0.0,
        descent: 0.0,
        advance_width: 0.0,
    };

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Line height from the font's global metrics (descent is negative).
    pub fn max_height(&self) -> f32 {
        self.ascent - self.descent
    }

    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// The ink bounding box anchored at the baseline origin.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.left, self.top, self.width(), self.height())
    }
}

impl std::ops::Mul<f32> for FontMetrics {
    type Output = FontMetrics;

    fn mul(self, factor: f32) -> FontMetrics {
        FontMetrics {
            left: self.left * factor,
            top: self.top * factor,
            right: self.right * factor,
            bottom: self.bottom * factor,
            ascent: self.ascent * factor,
            descent: self.descent * factor,
            advance_width: self.advance_width * factor,
        }
    }
}
