//! Optical preview of a layer stack.
//!
//! Models the physical artwork: translucent ink sheets stacked on
//! white paper. Each sheet dims the light passing through its inked
//! cells by its opacity, so deep stacks of ink converge toward black.

use crate::layers::{opacity, BinaryLayer, Grid, LayerError};

/// Light transmitted through the active layers at every cell.
///
/// A cell starts at 1.0 (bare paper). Every active layer that inks the
/// cell multiplies it by `1 - opacity(index, multiplier)`, where
/// [`opacity`] applies the per-layer falloff. The result is a grid of
/// values in `[0.0, 1.0]`, 1.0 being untouched white.
///
/// # Arguments
///
/// * `layers` - Binary layers, all the same shape; must be non-empty
/// * `active` - 1-based indices of the layers stacked on the paper
/// * `multiplier` - Opacity falloff base in `[0.0, 1.0]`
pub fn reconstruct(
    layers: &[BinaryLayer],
    active: &[usize],
    multiplier: f64,
) -> Result<Grid<f64>, LayerError> {
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

    let stacked: Vec<&BinaryLayer> = layers
        .iter()
        .filter(|layer| active.contains(&layer.index))
        .collect();

    Ok(Grid::from_fn(
        first.cells.rows(),
        first.cells.cols(),
        |row, col| {
            let mut light = 1.0;
            for layer in &stacked {
                if layer.cells[(row, col)] {
                    light *= 1.0 - opacity(layer.index, multiplier);
                }
            }
            light
        },
    ))
}
