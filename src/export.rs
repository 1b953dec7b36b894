//! Filesystem export of a generated layer stack.
//!
//! One export run writes a directory tree:
//!
//! ```text
//! <dir>/
//!   binary_layers/layer_1.png ... layer_N.png
//!   ascii_layers/layer_1.txt ... layer_N.txt
//!   merged.txt
//!   preview.png
//! ```
//!
//! Mask PNGs draw inked cells black on white. The preview PNG renders
//! the stacked-translucency reconstruction of the active layers.

use std::fs;
use std::path::{Path, PathBuf};

use image::GrayImage;

use crate::layers::{merge_glyphs, Grid, LayerError, LayerStack, DEFAULT_OPACITY_MULTIPLIER};
use crate::render;

/// Default pixel width of exported PNGs.
pub const DEFAULT_PNG_WIDTH: u32 = 500;

/// Parameters for one export run.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Pixel width of every exported PNG; height follows the source
    /// aspect ratio.
    pub png_width: u32,
    /// Opacity falloff base for the preview.
    pub multiplier: f64,
    /// Layers included in `merged.txt` and `preview.png`; `None`
    /// means all of them.
    pub active: Option<Vec<usize>>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            png_width: DEFAULT_PNG_WIDTH,
            multiplier: DEFAULT_OPACITY_MULTIPLIER,
            active: None,
        }
    }
}

/// Errors that can occur while exporting a stack.
#[derive(Debug)]
pub enum ExportError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Png {
        path: PathBuf,
        source: image::ImageError,
    },
    Layers(LayerError),
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::Io { path, source } => {
                write!(f, "Failed to write '{}': {}", path.display(), source)
            }
            ExportError::Png { path, source } => {
                write!(f, "Failed to encode '{}': {}", path.display(), source)
            }
            ExportError::Layers(source) => write!(f, "{}", source),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::Io { source, .. } => Some(source),
            ExportError::Png { source, .. } => Some(source),
            ExportError::Layers(source) => Some(source),
        }
    }
}

impl From<LayerError> for ExportError {
    fn from(source: LayerError) -> Self {
        ExportError::Layers(source)
    }
}

/// Write all artifacts of a stack under `dir`.
///
/// Creates `dir` and its subdirectories as needed. Existing files are
/// overwritten.
pub fn export_stack(
    stack: &LayerStack,
    dir: &Path,
    options: &ExportOptions,
) -> Result<(), ExportError> {
    let masks_dir = dir.join("binary_layers");
    let pages_dir = dir.join("ascii_layers");
    create_dir(&masks_dir)?;
    create_dir(&pages_dir)?;

    let (width, height) = png_dimensions(options.png_width, stack.aspect_ratio);
    let active = match &options.active {
        Some(indices) => indices.clone(),
        None => stack.all_indices(),
    };

    for layer in &stack.binary {
        let path = masks_dir.join(format!("layer_{}.png", layer.index));
        let mask = rasterize(&layer.cells, width, height, |&inked| {
            if inked {
                0
            } else {
                255
            }
        });
        save_png(mask, &path)?;
    }

    for page in &stack.glyphs {
        let path = pages_dir.join(format!("layer_{}.txt", page.index));
        write_text(&path, &page.cells.to_text())?;
    }

    let merged = merge_glyphs(&stack.glyphs, &active)?;
    write_text(&dir.join("merged.txt"), &merged.to_text())?;

    let light = render::reconstruct(&stack.binary, &active, options.multiplier)?;
    let preview = rasterize(&light, width, height, |&value| {
        (value * 255.0).round() as u8
    });
    save_png(preview, &dir.join("preview.png"))?;

    log::info!(
        "exported {} layers to '{}' ({} files, PNGs {}x{})",
        stack.num_layers(),
        dir.display(),
        2 * stack.num_layers() + 2,
        width,
        height
    );
    Ok(())
}

/// PNG dimensions for a target width and source aspect ratio.
///
/// Height is `width / aspect_ratio` truncated, never below 1.
fn png_dimensions(width: u32, aspect_ratio: f64) -> (u32, u32) {
    let height = ((width as f64 / aspect_ratio) as u32).max(1);
    (width.max(1), height)
}

/// Scale a cell grid up to pixel dimensions, one shade per cell.
fn rasterize<T>(grid: &Grid<T>, width: u32, height: u32, shade: impl Fn(&T) -> u8) -> GrayImage {
    GrayImage::from_fn(width, height, |x, y| {
        let row = (y as u64 * grid.rows() as u64 / height as u64) as usize;
        let col = (x as u64 * grid.cols() as u64 / width as u64) as usize;
        image::Luma([shade(&grid[(row, col)])])
    })
}

fn save_png(img: GrayImage, path: &Path) -> Result<(), ExportError> {
    img.save(path).map_err(|source| ExportError::Png {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("wrote '{}'", path.display());
    Ok(())
}

fn write_text(path: &Path, content: &str) -> Result<(), ExportError> {
    fs::write(path, content).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("wrote '{}'", path.display());
    Ok(())
}

fn create_dir(path: &Path) -> Result<(), ExportError> {
    fs::create_dir_all(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}
