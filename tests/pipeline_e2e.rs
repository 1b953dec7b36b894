//! End-to-end tests for stack generation and export.
//!
//! These tests run the whole path a render invocation takes:
//! - Decode a PNG from disk
//! - Generate the layer stack
//! - Export masks, glyph pages, merged page, and preview
//! - Read the artifacts back and check their contents

use std::fs;
use std::path::Path;

use inkstack::bitmap::Bitmap;
use inkstack::config::{Config, ConfigError};
use inkstack::export::{export_stack, ExportOptions};
use inkstack::layers::{LayerError, LayerStack, StackOptions};

/// Write a uniform-color PNG and return its path.
fn write_png(dir: &Path, name: &str, width: u32, height: u32, value: u8) -> std::path::PathBuf {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([value, value, value]));
    let path = dir.join(name);
    img.save(&path).unwrap();
    path
}

fn gray_options() -> StackOptions {
    StackOptions {
        rows: 2,
        cols: 2,
        num_layers: 2,
        source_text: "AB".to_string(),
    }
}

// ==================== Export Tree Tests ====================

#[test]
fn test_export_writes_every_artifact() {
    let tmp = tempfile::tempdir().unwrap();
    let input = write_png(tmp.path(), "input.png", 4, 4, 128);

    let stack = LayerStack::from_path(&input, &gray_options()).unwrap();
    let out = tmp.path().join("layers");
    let options = ExportOptions {
        png_width: 40,
        ..ExportOptions::default()
    };
    export_stack(&stack, &out, &options).unwrap();

    for index in 1..=2 {
        assert!(out.join(format!("binary_layers/layer_{}.png", index)).exists());
        assert!(out.join(format!("ascii_layers/layer_{}.txt", index)).exists());
    }
    assert!(out.join("merged.txt").exists());
    assert!(out.join("preview.png").exists());
}

#[test]
fn test_exported_masks_paint_ink_black() {
    let tmp = tempfile::tempdir().unwrap();
    let input = write_png(tmp.path(), "input.png", 4, 4, 128);

    // Gray 128 is just below brightness 0.5: layer 1 empty, layer 2 full.
    let stack = LayerStack::from_path(&input, &gray_options()).unwrap();
    let out = tmp.path().join("layers");
    let options = ExportOptions {
        png_width: 40,
        ..ExportOptions::default()
    };
    export_stack(&stack, &out, &options).unwrap();

    let blank = image::open(out.join("binary_layers/layer_1.png"))
        .unwrap()
        .to_luma8();
    assert_eq!(blank.dimensions(), (40, 40));
    assert_eq!(blank.get_pixel(0, 0).0[0], 255);
    assert_eq!(blank.get_pixel(39, 39).0[0], 255);

    let full = image::open(out.join("binary_layers/layer_2.png"))
        .unwrap()
        .to_luma8();
    assert_eq!(full.get_pixel(0, 0).0[0], 0);
    assert_eq!(full.get_pixel(39, 39).0[0], 0);
}

#[test]
fn test_exported_pages_and_merge() {
    let tmp = tempfile::tempdir().unwrap();
    let input = write_png(tmp.path(), "input.png", 4, 4, 128);

    let stack = LayerStack::from_path(&input, &gray_options()).unwrap();
    let out = tmp.path().join("layers");
    export_stack(&stack, &out, &ExportOptions::default()).unwrap();

    let page_1 = fs::read_to_string(out.join("ascii_layers/layer_1.txt")).unwrap();
    assert_eq!(page_1, "  \n  ");

    let page_2 = fs::read_to_string(out.join("ascii_layers/layer_2.txt")).unwrap();
    assert_eq!(page_2, "AB\nAB");

    // Layer 1 is blank everywhere, so layer 2 shows through the merge.
    let merged = fs::read_to_string(out.join("merged.txt")).unwrap();
    assert_eq!(merged, "AB\nAB");
}

#[test]
fn test_export_active_subset_filters_merged_outputs() {
    let tmp = tempfile::tempdir().unwrap();
    let input = write_png(tmp.path(), "input.png", 4, 4, 128);

    let stack = LayerStack::from_path(&input, &gray_options()).unwrap();
    let out = tmp.path().join("layers");
    let options = ExportOptions {
        png_width: 40,
        active: Some(vec![1]),
        ..ExportOptions::default()
    };
    export_stack(&stack, &out, &options).unwrap();

    // Only the blank layer is active: merged page empty, preview white.
    let merged = fs::read_to_string(out.join("merged.txt")).unwrap();
    assert_eq!(merged, "  \n  ");

    let preview = image::open(out.join("preview.png")).unwrap().to_luma8();
    assert_eq!(preview.get_pixel(20, 20).0[0], 255);
}

#[test]
fn test_preview_shows_stacked_translucency() {
    let tmp = tempfile::tempdir().unwrap();
    let input = write_png(tmp.path(), "input.png", 4, 4, 128);

    let stack = LayerStack::from_path(&input, &gray_options()).unwrap();
    let out = tmp.path().join("layers");
    let options = ExportOptions {
        png_width: 40,
        ..ExportOptions::default()
    };
    export_stack(&stack, &out, &options).unwrap();

    // Only layer 2 inks cells: transmitted light is 1 - 0.5^2.
    let expected = ((1.0f64 - 0.25) * 255.0).round() as u8;
    let preview = image::open(out.join("preview.png")).unwrap().to_luma8();
    assert_eq!(preview.get_pixel(0, 0).0[0], expected);
    assert_eq!(preview.get_pixel(39, 39).0[0], expected);
}

#[test]
fn test_png_height_follows_source_aspect() {
    let tmp = tempfile::tempdir().unwrap();
    let input = write_png(tmp.path(), "input.png", 8, 4, 128);

    let stack = LayerStack::from_path(&input, &gray_options()).unwrap();
    let out = tmp.path().join("layers");
    let options = ExportOptions {
        png_width: 100,
        ..ExportOptions::default()
    };
    export_stack(&stack, &out, &options).unwrap();

    let mask = image::open(out.join("binary_layers/layer_1.png"))
        .unwrap()
        .to_luma8();
    assert_eq!(mask.dimensions(), (100, 50));
}

// ==================== Boundary Behavior Tests ====================

#[test]
fn test_pure_black_input_exports_blank_stack() {
    // Brightness 1.0 reads 0 on every plane, so a black input
    // produces empty masks and pages end to end.
    let tmp = tempfile::tempdir().unwrap();
    let input = write_png(tmp.path(), "input.png", 4, 4, 0);

    let stack = LayerStack::from_path(&input, &gray_options()).unwrap();
    assert_eq!(stack.cursor, 0);

    let out = tmp.path().join("layers");
    let options = ExportOptions {
        png_width: 40,
        ..ExportOptions::default()
    };
    export_stack(&stack, &out, &options).unwrap();

    let mask = image::open(out.join("binary_layers/layer_1.png"))
        .unwrap()
        .to_luma8();
    assert_eq!(mask.get_pixel(20, 20).0[0], 255);

    let merged = fs::read_to_string(out.join("merged.txt")).unwrap();
    assert_eq!(merged, "  \n  ");
}

// ==================== Input Failure Tests ====================

#[test]
fn test_corrupt_image_reports_unreadable() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("fake.png");
    fs::write(&path, b"not an image at all").unwrap();

    let err = LayerStack::from_path(&path, &gray_options()).unwrap_err();
    assert!(matches!(err, LayerError::UnreadableImage { .. }));
    assert!(err.to_string().contains("fake.png"));
}

#[test]
fn test_empty_source_text_fails_generation() {
    let bitmap = Bitmap::from_rgb8(2, 2, vec![128u8; 12]);
    let options = StackOptions {
        source_text: String::new(),
        ..gray_options()
    };

    let err = LayerStack::generate(&bitmap, &options).unwrap_err();
    assert!(matches!(err, LayerError::EmptySourceText));
}

// ==================== Config File Tests ====================

#[test]
fn test_config_loads_from_file() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("config.toml");
    fs::write(
        &path,
        "[grid]\nrows = 9\n\n[layers]\ncount = 3\nopacity_multiplier = 0.25\n",
    )
    .unwrap();

    let config = Config::load(Some(&path)).unwrap();
    assert_eq!(config.grid.rows, Some(9));
    assert_eq!(config.grid.cols, None);
    assert_eq!(config.layers.count, Some(3));
    assert_eq!(config.layers.opacity_multiplier, Some(0.25));
}

#[test]
fn test_config_rejects_malformed_toml() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("config.toml");
    fs::write(&path, "[grid]\nrows = [\n").unwrap();

    let err = Config::load(Some(&path)).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
    assert!(err.to_string().contains("config.toml"));
}
