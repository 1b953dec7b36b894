//! Glyph mapping: inked cells consume characters from a cyclic text.
//!
//! A single cursor walks the source text while layers are filled in
//! ascending order, each layer row by row, left to right. Every inked
//! cell takes the character at `cursor % text length` and advances the
//! cursor by one; blank cells leave it untouched. The cursor never
//! resets between layers, so the text flows continuously through the
//! whole stack.

use crate::layers::bitplane::BinaryLayer;
use crate::layers::error::LayerError;
use crate::layers::grid::Grid;

/// Character written to cells that carry no ink.
pub const BLANK: char = ' ';

/// Built-in glyph source: the opening of Natsume Soseki's "I Am a Cat".
pub const DEFAULT_SOURCE_TEXT: &str = "我輩は猫である。名前はまだ無い。どこで生れたかとんと見当がつかぬ。何でも薄暗いじめじめした所でニャーニャー泣いていた事だけは記憶している。吾輩はここで始めて人間というものを見た。";

/// One binary layer rendered as characters.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphLayer {
    /// 1-based index of the binary layer this page was mapped from.
    pub index: usize,
    pub cells: Grid<char>,
}

/// The glyph pages for a full stack plus the final cursor position.
///
/// `cursor` equals the total number of inked cells across all layers
/// (when mapping started from zero), and seeds a follow-up
/// [`map_glyphs_from`] call so the text keeps flowing across batches.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphMapping {
    pub layers: Vec<GlyphLayer>,
    pub cursor: usize,
}

/// Map binary layers to glyph pages, starting the cursor at zero.
///
/// # Arguments
///
/// * `layers` - Binary layers in ascending index order
/// * `source_text` - Text the cursor cycles through; must be non-empty
///
/// # Returns
///
/// One glyph page per layer plus the final cursor, or
/// `LayerError::EmptySourceText` / `LayerError::LayerShapeMismatch`.
pub fn map_glyphs(layers: &[BinaryLayer], source_text: &str) -> Result<GlyphMapping, LayerError> {
    map_glyphs_from(layers, source_text, 0)
}

/// Map binary layers to glyph pages with an explicit starting cursor.
///
/// Layers are processed in slice order; callers pass them ascending.
/// The source text is validated before any page is produced.
pub fn map_glyphs_from(
    layers: &[BinaryLayer],
    source_text: &str,
    start_cursor: usize,
) -> Result<GlyphMapping, LayerError> {
    let glyphs: Vec<char> = source_text.chars().collect();
    if glyphs.is_empty() {
        return Err(LayerError::EmptySourceText);
    }
    check_shapes(layers)?;

    let mut cursor = start_cursor;
    let mut pages = Vec::with_capacity(layers.len());
    for layer in layers {
        let (page, next) = fill_page(layer, &glyphs, cursor);
        cursor = next;
        pages.push(page);
    }

    Ok(GlyphMapping {
        layers: pages,
        cursor,
    })
}

/// Map a single layer from a caller-supplied cursor.
///
/// Combined with [`layer_start_cursors`] this lets layers be mapped
/// independently (each from its own start cursor) and still produce
/// the pages a sequential [`map_glyphs`] run would.
pub fn map_layer_from(
    layer: &BinaryLayer,
    source_text: &str,
    start_cursor: usize,
) -> Result<(GlyphLayer, usize), LayerError> {
    let glyphs: Vec<char> = source_text.chars().collect();
    if glyphs.is_empty() {
        return Err(LayerError::EmptySourceText);
    }
    Ok(fill_page(layer, &glyphs, start_cursor))
}

/// Starting cursor of each layer in a sequential mapping run.
///
/// Entry `i` is the number of inked cells in layers `0..i`, so the
/// returned vector is aligned with `layers` and begins at 0.
pub fn layer_start_cursors(layers: &[BinaryLayer]) -> Vec<usize> {
    let mut cursors = Vec::with_capacity(layers.len());
    let mut total = 0;
    for layer in layers {
        cursors.push(total);
        total += layer.ink_count();
    }
    cursors
}

fn check_shapes(layers: &[BinaryLayer]) -> Result<(), LayerError> {
    let Some(first) = layers.first() else {
        return Ok(());
    };
    for layer in &layers[1..] {
        if !layer.cells.same_shape(&first.cells) {
            return Err(LayerError::LayerShapeMismatch {
                index: layer.index,
                expected_rows: first.cells.rows(),
                expected_cols: first.cells.cols(),
                found_rows: layer.cells.rows(),
                found_cols: layer.cells.cols(),
            });
        }
    }
    Ok(())
}

fn fill_page(layer: &BinaryLayer, glyphs: &[char], mut cursor: usize) -> (GlyphLayer, usize) {
    let cells = Grid::from_fn(layer.cells.rows(), layer.cells.cols(), |row, col| {
        if layer.cells[(row, col)] {
            let ch = glyphs[cursor % glyphs.len()];
            cursor += 1;
            ch
        } else {
            BLANK
        }
    });
    (
        GlyphLayer {
            index: layer.index,
            cells,
        },
        cursor,
    )
}
