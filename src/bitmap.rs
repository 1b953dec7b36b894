//! Decoded source images as flat RGB pixel buffers.

use std::path::Path;

use crate::layers::LayerError;

/// A decoded image held as tightly packed 8-bit RGB rows.
///
/// Pixel `(x, y)` starts at byte `3 * (y * width + x)`. Any alpha
/// channel in the source file is dropped during decoding.
#[derive(Debug, Clone)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    /// RGB bytes, `3 * width * height` long, top row first.
    pub data: Vec<u8>,
}

impl Bitmap {
    /// Decode an image file (PNG, JPEG, BMP, or WebP) into a bitmap.
    ///
    /// # Arguments
    ///
    /// * `path` - Image file to open
    ///
    /// # Returns
    ///
    /// The decoded bitmap, or `LayerError::UnreadableImage` when the
    /// file is missing, unsupported, or corrupt.
    pub fn open(path: &Path) -> Result<Self, LayerError> {
        let img = image::open(path).map_err(|source| LayerError::UnreadableImage {
            path: path.to_path_buf(),
            source,
        })?;
        let rgb = img.to_rgb8();
        let (width, height) = (rgb.width(), rgb.height());
        log::debug!("decoded '{}' ({}x{})", path.display(), width, height);
        Ok(Self {
            width,
            height,
            data: rgb.into_raw(),
        })
    }

    /// Wrap an existing RGB buffer.
    ///
    /// # Panics
    ///
    /// Panics unless `data.len() == 3 * width * height`.
    pub fn from_rgb8(width: u32, height: u32, data: Vec<u8>) -> Self {
        assert_eq!(
            data.len(),
            width as usize * height as usize * 3,
            "RGB buffer length does not match {}x{}",
            width,
            height
        );
        Self {
            width,
            height,
            data,
        }
    }

    /// Read one pixel.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the bitmap.
    pub fn rgb(&self, x: u32, y: u32) -> (u8, u8, u8) {
        let i = (y as usize * self.width as usize + x as usize) * 3;
        (self.data[i], self.data[i + 1], self.data[i + 2])
    }

    /// Width over height, or 1.0 for a degenerate bitmap.
    pub fn aspect_ratio(&self) -> f64 {
        if self.height == 0 {
            return 1.0;
        }
        self.width as f64 / self.height as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rgb8_and_pixel_access() {
        let data = vec![
            10, 20, 30, 40, 50, 60, // row 0
            70, 80, 90, 100, 110, 120, // row 1
        ];
        let bitmap = Bitmap::from_rgb8(2, 2, data);

        assert_eq!(bitmap.rgb(0, 0), (10, 20, 30));
        assert_eq!(bitmap.rgb(1, 0), (40, 50, 60));
        assert_eq!(bitmap.rgb(0, 1), (70, 80, 90));
        assert_eq!(bitmap.rgb(1, 1), (100, 110, 120));
    }

    #[test]
    #[should_panic(expected = "RGB buffer length")]
    fn test_from_rgb8_rejects_short_buffer() {
        Bitmap::from_rgb8(2, 2, vec![0u8; 11]);
    }

    #[test]
    fn test_aspect_ratio() {
        let wide = Bitmap::from_rgb8(4, 2, vec![0u8; 24]);
        assert_eq!(wide.aspect_ratio(), 2.0);
    }

    #[test]
    fn test_open_missing_file_is_unreadable() {
        let err = Bitmap::open(Path::new("/nonexistent/input.png")).unwrap_err();
        assert!(matches!(err, LayerError::UnreadableImage { .. }));
        assert!(err.to_string().contains("/nonexistent/input.png"));
    }
}
