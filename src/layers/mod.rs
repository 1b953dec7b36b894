//! Layer pipeline for turning bitmaps into stacked ink layers.
//!
//! The pipeline runs in three pure stages:
//!
//! 1. **Sampling** - Box-filter the bitmap into a brightness grid
//! 2. **Decomposition** - Extract one binary ink mask per bit-plane
//! 3. **Glyph mapping** - Replace inked cells with text characters
//!
//! [`LayerStack::generate`] runs all three; the stage functions are
//! exported for callers that need a single step. Compositing helpers
//! ([`merge_glyphs`], [`opacity`]) operate on the finished layers.

mod bitplane;
mod compose;
mod error;
mod glyphs;
mod grid;
mod sampler;
mod stack;

pub use bitplane::{decompose, plane_bit, BinaryLayer};
pub use compose::{merge_glyphs, opacity, DEFAULT_OPACITY_MULTIPLIER};
pub use error::LayerError;
pub use glyphs::{
    layer_start_cursors, map_glyphs, map_glyphs_from, map_layer_from, GlyphLayer, GlyphMapping,
    BLANK, DEFAULT_SOURCE_TEXT,
};
pub use grid::Grid;
pub use sampler::{brightness, sample};
pub use stack::{
    LayerStack, StackOptions, DEFAULT_GRID_COLS, DEFAULT_GRID_ROWS, DEFAULT_NUM_LAYERS,
};
