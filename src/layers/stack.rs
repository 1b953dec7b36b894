//! End-to-end generation of a full layer stack from a bitmap.

use std::path::Path;

use crate::bitmap::Bitmap;
use crate::layers::bitplane::{self, BinaryLayer};
use crate::layers::error::LayerError;
use crate::layers::glyphs::{self, GlyphLayer, DEFAULT_SOURCE_TEXT};
use crate::layers::grid::Grid;
use crate::layers::sampler;

/// Default grid height in cells.
pub const DEFAULT_GRID_ROWS: usize = 30;
/// Default grid width in cells.
pub const DEFAULT_GRID_COLS: usize = 30;
/// Default number of binary layers.
pub const DEFAULT_NUM_LAYERS: usize = 4;

/// Parameters for one stack generation run.
#[derive(Debug, Clone)]
pub struct StackOptions {
    pub rows: usize,
    pub cols: usize,
    pub num_layers: usize,
    /// Text the glyph cursor cycles through.
    pub source_text: String,
}

impl Default for StackOptions {
    fn default() -> Self {
        Self {
            rows: DEFAULT_GRID_ROWS,
            cols: DEFAULT_GRID_COLS,
            num_layers: DEFAULT_NUM_LAYERS,
            source_text: DEFAULT_SOURCE_TEXT.to_string(),
        }
    }
}

/// Everything one run produces: the sampled brightness grid, the
/// binary ink layers, their glyph pages, and the final text cursor.
#[derive(Debug, Clone)]
pub struct LayerStack {
    pub brightness: Grid<f64>,
    pub binary: Vec<BinaryLayer>,
    pub glyphs: Vec<GlyphLayer>,
    /// Cursor position after the last layer; equals the total number
    /// of inked cells in the stack.
    pub cursor: usize,
    /// Width over height of the source bitmap, kept for export sizing.
    pub aspect_ratio: f64,
}

impl LayerStack {
    /// Run the full pipeline: sample, decompose, map glyphs.
    pub fn generate(bitmap: &Bitmap, options: &StackOptions) -> Result<Self, LayerError> {
        let brightness = sampler::sample(bitmap, options.rows, options.cols)?;
        let binary = bitplane::decompose(&brightness, options.num_layers)?;
        let mapping = glyphs::map_glyphs(&binary, &options.source_text)?;

        log::info!(
            "generated {} layers from {}x{} bitmap ({}x{} cells, {} glyphs placed)",
            binary.len(),
            bitmap.width,
            bitmap.height,
            options.rows,
            options.cols,
            mapping.cursor
        );

        Ok(Self {
            brightness,
            binary,
            glyphs: mapping.layers,
            cursor: mapping.cursor,
            aspect_ratio: bitmap.aspect_ratio(),
        })
    }

    /// Decode an image file and generate its stack.
    pub fn from_path(path: &Path, options: &StackOptions) -> Result<Self, LayerError> {
        let bitmap = Bitmap::open(path)?;
        Self::generate(&bitmap, options)
    }

    /// Number of layers in the stack.
    pub fn num_layers(&self) -> usize {
        self.binary.len()
    }

    /// All layer indices, ascending; the default active set.
    pub fn all_indices(&self) -> Vec<usize> {
        (1..=self.binary.len()).collect()
    }
}
