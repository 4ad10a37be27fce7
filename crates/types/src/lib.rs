//! Shared geometry and value types for the vellum rendering crates.

pub mod color;
pub mod geometry;
pub mod metrics;

pub use color::Color;
pub use geometry::{BoxConstraints, Matrix, Point, Rect, Size};
pub use metrics::FontMetrics;
