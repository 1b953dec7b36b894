//! Error type shared by the layer pipeline stages.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while sampling, decomposing, or mapping layers.
#[derive(Debug, Error)]
pub enum LayerError {
    /// A size parameter (rows, cols, layer count, or source pixels)
    /// was zero.
    #[error("invalid {what}: {got} (must be at least 1)")]
    InvalidDimensions { what: &'static str, got: usize },

    /// The source image could not be opened or decoded.
    #[error("cannot read image '{}': {source}", .path.display())]
    UnreadableImage {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Glyph mapping was asked to draw from an empty source text.
    #[error("source text is empty")]
    EmptySourceText,

    /// Layers passed to a multi-layer operation disagree on grid shape.
    #[error(
        "layer {index} is {found_rows}x{found_cols}, expected {expected_rows}x{expected_cols}"
    )]
    LayerShapeMismatch {
        index: usize,
        expected_rows: usize,
        expected_cols: usize,
        found_rows: usize,
        found_cols: usize,
    },
}
