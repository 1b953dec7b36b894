//! Bit-plane decomposition of brightness grids.
//!
//! Each layer reads one binary digit of the brightness value: layer 1
//! has weight 1/2, layer 2 weight 1/4, and so on. A cell is inked on a
//! layer exactly when that digit of its brightness is 1, so the first
//! N digits of every cell are recoverable by summing the weights of
//! its inked layers.

use crate::layers::error::LayerError;
use crate::layers::grid::Grid;

/// One binary ink mask extracted from a brightness grid.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryLayer {
    /// 1-based layer index; the layer's weight is `2^-index`.
    pub index: usize,
    /// `true` cells carry ink.
    pub cells: Grid<bool>,
}

impl BinaryLayer {
    /// The layer's brightness weight, `2^-index`.
    pub fn weight(&self) -> f64 {
        2f64.powi(-(self.index as i32))
    }

    /// Number of inked cells.
    pub fn ink_count(&self) -> usize {
        self.cells.iter().filter(|&&inked| inked).count()
    }
}

/// Read one bit-plane digit of a brightness value.
///
/// Computes `floor(brightness / 2^-index) mod 2` in f64, with no
/// rounding or dithering. A brightness of exactly 1.0 divides evenly
/// by every weight, and `2^index` is even for every `index >= 1`, so a
/// full-ink cell reads 0 on every plane.
pub fn plane_bit(brightness: f64, index: usize) -> bool {
    let weight = 2f64.powi(-(index as i32));
    (brightness / weight).floor() % 2.0 == 1.0
}

/// Decompose a brightness grid into `num_layers` binary layers.
///
/// # Arguments
///
/// * `brightness` - Sampled brightness grid, values in `[0.0, 1.0]`
/// * `num_layers` - Number of planes to extract, starting at layer 1
///
/// # Returns
///
/// Layers ordered by ascending index (1 to `num_layers`), each the
/// same shape as `brightness`. Fails with
/// `LayerError::InvalidDimensions` when `num_layers` is zero or the
/// grid has no cells.
pub fn decompose(
    brightness: &Grid<f64>,
    num_layers: usize,
) -> Result<Vec<BinaryLayer>, LayerError> {
    if num_layers == 0 {
        return Err(LayerError::InvalidDimensions {
            what: "layer count",
            got: 0,
        });
    }
    if brightness.rows() == 0 {
        return Err(LayerError::InvalidDimensions {
            what: "grid rows",
            got: 0,
        });
    }
    if brightness.cols() == 0 {
        return Err(LayerError::InvalidDimensions {
            what: "grid cols",
            got: 0,
        });
    }

    let mut layers = Vec::with_capacity(num_layers);
    for index in 1..=num_layers {
        let cells = Grid::from_fn(brightness.rows(), brightness.cols(), |row, col| {
            plane_bit(brightness[(row, col)], index)
        });
        layers.push(BinaryLayer { index, cells });
    }

    log::debug!(
        "decomposed {}x{} grid into {} layers",
        brightness.rows(),
        brightness.cols(),
        num_layers
    );
    Ok(layers)
}
