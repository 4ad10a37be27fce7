use bitflags::bitflags;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
#[derive(Default)]
pub enum TextAlign {
    #[default]
    Left,
    Right,
    Center,
    Justify,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
#[derive(Default)]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

bitflags! {
    /// Line adornments applied to a run of text. Flags combine, so
    /// `UNDERLINE | LINE_THROUGH` is a valid decoration.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TextDecoration: u8 {
        const UNDERLINE = 1 << 0;
        const OVERLINE = 1 << 1;
        const LINE_THROUGH = 1 << 2;
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
#[derive(Default)]
pub enum TextDecorationStyle {
    #[default]
    Single,
    Double,
}

/// The `Tr` text rendering mode operand, PDF 32000-1 table 106.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
#[derive(Default)]
pub enum TextRenderingMode {
    #[default]
    Fill,
    Stroke,
    FillAndStroke,
    Invisible,
    FillAndClip,
    StrokeAndClip,
    FillStrokeAndClip,
    Clip,
}

impl TextRenderingMode {
    pub fn operand(&self) -> u8 {
        match self {
            TextRenderingMode::Fill => 0,
            TextRenderingMode::Stroke => 1,
            TextRenderingMode::FillAndStroke => 2,
            TextRenderingMode::Invisible => 3,
            TextRenderingMode::FillAndClip => 4,
            TextRenderingMode::StrokeAndClip => 5,
            TextRenderingMode::FillStrokeAndClip => 6,
            TextRenderingMode::Clip => 7,
        }
    }
}
