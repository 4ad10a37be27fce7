//! PDF content-stream emitter.
//!
//! [`ContentStream`] appends drawing operators to an in-memory page buffer
//! with correct graphics-state discipline: a LIFO stack of contexts mirrored
//! by `q`/`Q` tokens, CTM tracking across `cm`, and page resources
//! registered before the operators that reference them.

use thiserror::Error;
use vellum_traits::ImageOrientation;

mod content;
mod path;
mod resources;
mod util;

pub use content::{ContentStream, GraphicsContext, LineCap, LineJoin, TextParams};
pub use path::{PathBounds, path_bounds};
pub use resources::PageResources;

#[derive(Error, Debug)]
pub enum GraphicsError {
    #[error("non-finite content stream operand: {0}")]
    NonFiniteNumber(f32),
    #[error("unknown EXIF orientation tag: {0}")]
    UnknownOrientation(u8),
}

/// Validates an operand at an untrusted boundary. Inside the emitter the
/// same check is a debug assertion.
pub fn checked_num(value: f32) -> Result<f32, GraphicsError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(GraphicsError::NonFiniteNumber(value))
    }
}

/// Converts a raw EXIF orientation tag, rejecting values outside 1..=8.
pub fn orientation_from_exif(tag: u8) -> Result<ImageOrientation, GraphicsError> {
    ImageOrientation::from_exif(tag).ok_or(GraphicsError::UnknownOrientation(tag))
}
