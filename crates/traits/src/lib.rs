//! Interfaces through which the rendering core consumes its collaborators:
//! fonts, images, shading/pattern/state resources, bidi shaping and vector
//! path sources.
//!
//! Everything behind these traits (font file parsing, image decoding, SVG
//! tokenization, PDF object assembly) lives outside this workspace. The
//! interfaces that receive the emitter itself (widgets, backgrounds,
//! annotation builders) live next to their consumer in `vellum-layout`.

use vellum_types::FontMetrics;

/// A font usable for measuring and showing text.
///
/// Implementations own glyph metrics and character encoding. `name` is the
/// page resource name without the leading slash (`F1`, `F2`, …); the emitter
/// prefixes it when writing the `Tf` operator.
pub trait Font {
    fn name(&self) -> &str;

    /// Global descent as a fraction of the em, negative below the baseline.
    fn descent(&self) -> f32;

    /// Measures `text` in design units (em-relative). `letter_spacing` is in
    /// the same em-relative units and applies between every pair of glyphs.
    /// Unrepresentable glyphs measure as zero width.
    fn string_metrics(&self, text: &str, letter_spacing: f32) -> FontMetrics;

    /// Appends `text` to `buf` as a PDF string literal (or hex string),
    /// handling the font's encoding and delimiter escaping.
    fn put_text(&self, buf: &mut Vec<u8>, text: &str);
}

/// EXIF orientation tags 1 through 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageOrientation {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
    LeftTop,
    RightTop,
    RightBottom,
    LeftBottom,
}

impl ImageOrientation {
    pub fn from_exif(tag: u8) -> Option<ImageOrientation> {
        match tag {
            1 => Some(ImageOrientation::TopLeft),
            2 => Some(ImageOrientation::TopRight),
            3 => Some(ImageOrientation::BottomRight),
            4 => Some(ImageOrientation::BottomLeft),
            5 => Some(ImageOrientation::LeftTop),
            6 => Some(ImageOrientation::RightTop),
            7 => Some(ImageOrientation::RightBottom),
            8 => Some(ImageOrientation::LeftBottom),
            _ => None,
        }
    }
}

/// A decoded raster image registered as a page XObject.
pub trait Image {
    /// Resource name without the leading slash (`I1`, `I2`, …).
    fn name(&self) -> &str;

    fn orientation(&self) -> ImageOrientation {
        ImageOrientation::TopLeft
    }
}

/// A shading object referenced by the `sh` operator.
pub trait Shader {
    fn name(&self) -> &str;
}

/// A tiling or shading pattern used as a fill/stroke color source.
pub trait Pattern {
    fn name(&self) -> &str;
}

/// An extended graphics state dictionary (`gs`). The page interns states by
/// key and assigns the resource names.
pub trait GraphicState {
    /// A stable serialization of the state dictionary, used for interning.
    fn key(&self) -> String;
}

/// Reorders and substitutes contextual glyph forms for right-to-left text.
/// Receives logical code points, returns the visually shaped sequence.
pub trait TextShaper {
    fn shape(&self, text: &str) -> String;
}

/// Receiver of vector path construction events.
pub trait PathSink {
    fn move_to(&mut self, x: f32, y: f32);
    fn line_to(&mut self, x: f32, y: f32);
    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x3: f32, y3: f32);
    fn close_path(&mut self);
}

/// A replayable source of path events, typically backed by an SVG path
/// parser. The same events can be sent to an emitting sink and to a
/// bounding-box sink.
pub trait PathData {
    fn replay(&self, sink: &mut dyn PathSink);
}
