use crate::widget::BackgroundDecoration;
use std::sync::Arc;
use vellum_style::{
    FontStyle, FontWeight, TextDecoration, TextDecorationStyle, TextRenderingMode,
};
use vellum_traits::Font;
use vellum_types::Color;

/// Immutable text styling for a span subtree.
///
/// Every field is optional so styles can be merged down the span tree:
/// merging is right-biased, a child's set field overrides the parent's. The
/// resolved accessors supply the engine defaults for value fields left
/// unset all the way down; `font`, `background` and `decoration_color` have
/// no engine default and stay optional (a missing font is a layout error, a
/// missing decoration color falls back to the text color at paint time).
#[derive(Clone, Default)]
pub struct TextStyle {
    pub font: Option<Arc<dyn Font>>,
    pub font_size: Option<f32>,
    pub color: Option<Color>,
    pub background: Option<Arc<dyn BackgroundDecoration>>,
    pub decoration: Option<TextDecoration>,
    pub decoration_style: Option<TextDecorationStyle>,
    pub decoration_color: Option<Color>,
    pub decoration_thickness: Option<f32>,
    pub letter_spacing: Option<f32>,
    pub word_spacing: Option<f32>,
    pub line_spacing: Option<f32>,
    pub rendering_mode: Option<TextRenderingMode>,
    pub font_style: Option<FontStyle>,
    pub font_weight: Option<FontWeight>,
}

impl TextStyle {
    /// Returns `self` overridden by every field `other` sets.
    pub fn merge(&self, other: &TextStyle) -> TextStyle {
        TextStyle {
            font: other.font.clone().or_else(|| self.font.clone()),
            font_size: other.font_size.or(self.font_size),
            color: other.color.or(self.color),
            background: other.background.clone().or_else(|| self.background.clone()),
            decoration: other.decoration.or(self.decoration),
            decoration_style: other.decoration_style.or(self.decoration_style),
            decoration_color: other.decoration_color.or(self.decoration_color),
            decoration_thickness: other.decoration_thickness.or(self.decoration_thickness),
            letter_spacing: other.letter_spacing.or(self.letter_spacing),
            word_spacing: other.word_spacing.or(self.word_spacing),
            line_spacing: other.line_spacing.or(self.line_spacing),
            rendering_mode: other.rendering_mode.or(self.rendering_mode),
            font_style: other.font_style.clone().or_else(|| self.font_style.clone()),
            font_weight: other.font_weight.clone().or_else(|| self.font_weight.clone()),
        }
    }

    pub fn font_size(&self) -> f32 {
        self.font_size.unwrap_or(12.0)
    }

    pub fn color(&self) -> Color {
        self.color.unwrap_or_default()
    }

    pub fn decoration(&self) -> TextDecoration {
        self.decoration.unwrap_or_default()
    }

    pub fn decoration_style(&self) -> TextDecorationStyle {
        self.decoration_style.unwrap_or_default()
    }

    pub fn decoration_thickness(&self) -> f32 {
        self.decoration_thickness.unwrap_or(1.0)
    }

    pub fn letter_spacing(&self) -> f32 {
        self.letter_spacing.unwrap_or(0.0)
    }

    /// Multiplier on the space glyph's advance between words.
    pub fn word_spacing(&self) -> f32 {
        self.word_spacing.unwrap_or(1.0)
    }

    pub fn line_spacing(&self) -> f32 {
        self.line_spacing.unwrap_or(0.0)
    }

    pub fn rendering_mode(&self) -> TextRenderingMode {
        self.rendering_mode.unwrap_or_default()
    }

    pub fn font_style(&self) -> FontStyle {
        self.font_style.unwrap_or_default()
    }

    pub fn font_weight(&self) -> FontWeight {
        self.font_weight.clone().unwrap_or_default()
    }
}

impl std::fmt::Debug for TextStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextStyle")
            .field("font", &self.font.as_ref().map(|font| font.name().to_string()))
            .field("font_size", &self.font_size)
            .field("color", &self.color)
            .field("decoration", &self.decoration)
            .field("letter_spacing", &self.letter_spacing)
            .field("word_spacing", &self.word_spacing)
            .field("line_spacing", &self.line_spacing)
            .finish_non_exhaustive()
    }
}

impl PartialEq for TextStyle {
    fn eq(&self, other: &Self) -> bool {
        let same_arc = |a: &Option<Arc<dyn Font>>, b: &Option<Arc<dyn Font>>| match (a, b) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        let same_background = match (&self.background, &other.background) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        same_arc(&self.font, &other.font)
            && same_background
            && self.font_size == other.font_size
            && self.color == other.color
            && self.decoration == other.decoration
            && self.decoration_style == other.decoration_style
            && self.decoration_color == other.decoration_color
            && self.decoration_thickness == other.decoration_thickness
            && self.letter_spacing == other.letter_spacing
            && self.word_spacing == other.word_spacing
            && self.line_spacing == other.line_spacing
            && self.rendering_mode == other.rendering_mode
            && self.font_style == other.font_style
            && self.font_weight == other.font_weight
    }
}
