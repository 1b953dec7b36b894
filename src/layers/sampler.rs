//! Brightness sampling from bitmaps using ITU-R BT.601 luminance.

use crate::bitmap::Bitmap;
use crate::layers::error::LayerError;
use crate::layers::grid::Grid;

/// Perceived ink level of one RGB pixel.
///
/// Applies the ITU-R BT.601 luminance formula `Y = 0.299*R + 0.587*G + 0.114*B`
/// and inverts it: `1 - Y/255`. Dark pixels carry much ink and score
/// near 1.0, light pixels score near 0.0. The result is clamped to
/// `[0.0, 1.0]`.
pub fn brightness(r: u8, g: u8, b: u8) -> f64 {
    let luma = r as f64 * 0.299 + g as f64 * 0.587 + b as f64 * 0.114;
    (1.0 - luma / 255.0).clamp(0.0, 1.0)
}

/// Downsample a bitmap to a grid of brightness values.
///
/// Maps bitmap pixels to grid cells by averaging the RGB channels of
/// all pixels within each cell, then converting the averaged color to
/// an inverted-luminance brightness. Cell boundaries are computed the
/// same way in both axes: cell `c` covers source pixels
/// `[(c * w / cols) as u32, ((c + 1) * w / cols) as u32)`.
///
/// When the grid is finer than the bitmap in some axis, a cell's pixel
/// range can come out empty; the cell then samples the single nearest
/// pixel, so every cell is always defined.
///
/// # Arguments
///
/// * `bitmap` - Decoded source image
/// * `rows` - Output grid height in cells
/// * `cols` - Output grid width in cells
///
/// # Returns
///
/// A `rows x cols` grid of brightness values in `[0.0, 1.0]`, or
/// `LayerError::InvalidDimensions` when `rows`, `cols`, or the bitmap
/// itself is empty.
pub fn sample(bitmap: &Bitmap, rows: usize, cols: usize) -> Result<Grid<f64>, LayerError> {
    if rows == 0 {
        return Err(LayerError::InvalidDimensions {
            what: "grid rows",
            got: 0,
        });
    }
    if cols == 0 {
        return Err(LayerError::InvalidDimensions {
            what: "grid cols",
            got: 0,
        });
    }
    if bitmap.width == 0 || bitmap.height == 0 {
        return Err(LayerError::InvalidDimensions {
            what: "source pixels",
            got: (bitmap.width * bitmap.height) as usize,
        });
    }

    let cell_w = bitmap.width as f64 / cols as f64;
    let cell_h = bitmap.height as f64 / rows as f64;

    Ok(Grid::from_fn(rows, cols, |row, col| {
        let (start_x, end_x) = cell_span(col, cell_w, bitmap.width);
        let (start_y, end_y) = cell_span(row, cell_h, bitmap.height);

        let mut sum_r = 0.0;
        let mut sum_g = 0.0;
        let mut sum_b = 0.0;

        for py in start_y..end_y {
            for px in start_x..end_x {
                let (r, g, b) = bitmap.rgb(px, py);
                sum_r += r as f64;
                sum_g += g as f64;
                sum_b += b as f64;
            }
        }

        let count = ((end_x - start_x) * (end_y - start_y)) as f64;
        let luma =
            (sum_r / count) * 0.299 + (sum_g / count) * 0.587 + (sum_b / count) * 0.114;
        (1.0 - luma / 255.0).clamp(0.0, 1.0)
    }))
}

/// Pixel range covered by cell `index` along one axis.
///
/// Empty ranges (possible when cells are smaller than a pixel) are
/// widened to the single nearest pixel.
fn cell_span(index: usize, cell_size: f64, limit: u32) -> (u32, u32) {
    let start = (index as f64 * cell_size) as u32;
    let end = (((index + 1) as f64) * cell_size) as u32;
    let end = end.min(limit);
    if start >= end {
        let start = start.min(limit - 1);
        (start, start + 1)
    } else {
        (start, end)
    }
}
