//! Layer compositing: opacity falloff and glyph-page merging.

use crate::layers::error::LayerError;
use crate::layers::glyphs::{GlyphLayer, BLANK};
use crate::layers::grid::Grid;

/// Default base for the per-layer opacity falloff.
pub const DEFAULT_OPACITY_MULTIPLIER: f64 = 0.5;

/// Opacity of a layer under a falloff multiplier: `multiplier^index`.
///
/// Layer indices are 1-based, so layer 1 shows at `multiplier` and
/// each deeper layer fades geometrically. Callers keep `multiplier`
/// within `[0.0, 1.0]`.
pub fn opacity(index: usize, multiplier: f64) -> f64 {
    multiplier.powi(index as i32)
}

/// Merge glyph pages into a single page.
///
/// For every cell, the layers named in `active` are scanned in
/// ascending index order and the first non-blank glyph wins; cells
/// blank on every active layer stay blank. Indices in `active` that
/// match no layer are ignored, and an empty `active` set yields an
/// all-blank page.
///
/// # Arguments
///
/// * `layers` - Glyph pages, all the same shape; must be non-empty
/// * `active` - 1-based indices of the layers to include
///
/// # Returns
///
/// The merged page, or `LayerError::InvalidDimensions` /
/// `LayerError::LayerShapeMismatch` when the input stack is unusable.
pub fn merge_glyphs(layers: &[GlyphLayer], active: &[usize]) -> Result<Grid<char>, LayerError> {
    let Some(first) = layers.first() else {
        return Err(LayerError::InvalidDimensions {
            what: "layer count",
            got: 0,
        });
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

    let mut stacked: Vec<&GlyphLayer> = layers
        .iter()
        .filter(|layer| active.contains(&layer.index))
        .collect();
    stacked.sort_by_key(|layer| layer.index);

    Ok(Grid::from_fn(
        first.cells.rows(),
        first.cells.cols(),
        |row, col| {
            stacked
                .iter()
                .map(|layer| layer.cells[(row, col)])
                .find(|&ch| ch != BLANK)
                .unwrap_or(BLANK)
        },
    ))
}
