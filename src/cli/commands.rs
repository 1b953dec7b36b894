//! Subcommand handlers for render, preview, and config actions.

use std::path::Path;
use std::process;

use super::args::{ConfigAction, PreviewArgs, RenderArgs};
use crate::config::{default_path as get_config_path, Config};
use crate::export::{self, ExportOptions, DEFAULT_PNG_WIDTH};
use crate::layers::{
    merge_glyphs, LayerStack, StackOptions, DEFAULT_GRID_COLS, DEFAULT_GRID_ROWS,
    DEFAULT_NUM_LAYERS, DEFAULT_OPACITY_MULTIPLIER, DEFAULT_SOURCE_TEXT,
};

/// Generate a full stack and write every artifact to the output directory.
pub fn run_render(args: &RenderArgs) {
    let config = load_config(args.config.as_deref());

    let options = match resolve_stack_options(
        args.rows,
        args.cols,
        args.layers,
        args.text.as_deref(),
        args.text_file.as_deref(),
        &config,
    ) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("Error: {}", message);
            process::exit(1);
        }
    };

    let multiplier = match resolve_multiplier(args.multiplier, &config) {
        Ok(multiplier) => multiplier,
        Err(message) => {
            eprintln!("Error: {}", message);
            process::exit(1);
        }
    };

    let stack = match LayerStack::from_path(&args.image, &options) {
        Ok(stack) => stack,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if let Some(set) = &args.active {
        for &index in &set.0 {
            if index > stack.num_layers() {
                log::warn!(
                    "active layer {} does not exist (stack has {} layers)",
                    index,
                    stack.num_layers()
                );
            }
        }
    }

    let export_options = ExportOptions {
        png_width: args
            .png_width
            .or(config.export.png_width)
            .unwrap_or(DEFAULT_PNG_WIDTH),
        multiplier,
        active: args.active.clone().map(|set| set.0),
    };

    if let Err(e) = export::export_stack(&stack, &args.output, &export_options) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    println!(
        "Rendered {} layers to '{}' ({} glyphs placed)",
        stack.num_layers(),
        args.output.display(),
        stack.cursor
    );
    println!("  binary_layers/  ink masks (PNG)");
    println!("  ascii_layers/   glyph pages (TXT)");
    println!("  merged.txt      active layers flattened");
    println!("  preview.png     stacked-translucency preview");
}

/// Print a stack's merged page (or one layer's page) to stdout.
pub fn run_preview(args: &PreviewArgs) {
    let config = load_config(args.config.as_deref());

    let options = match resolve_stack_options(
        args.rows,
        args.cols,
        args.layers,
        args.text.as_deref(),
        args.text_file.as_deref(),
        &config,
    ) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("Error: {}", message);
            process::exit(1);
        }
    };

    let stack = match LayerStack::from_path(&args.image, &options) {
        Ok(stack) => stack,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if let Some(layer) = args.layer {
        if layer > stack.num_layers() {
            eprintln!(
                "Error: layer {} does not exist (stack has {} layers)",
                layer,
                stack.num_layers()
            );
            process::exit(1);
        }
        println!("{}", stack.glyphs[layer - 1].cells.to_text());
        return;
    }

    let active = args
        .active
        .clone()
        .map(|set| set.0)
        .unwrap_or_else(|| stack.all_indices());
    match merge_glyphs(&stack.glyphs, &active) {
        Ok(page) => println!("{}", page.to_text()),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

/// Handle config subcommand actions.
pub fn handle_config_action(action: ConfigAction) {
    match action {
        ConfigAction::Show => {
            let config = load_config(None);

            println!("Current configuration:");
            println!(
                "  Grid: {} rows x {} cols",
                config.grid.rows.unwrap_or(DEFAULT_GRID_ROWS),
                config.grid.cols.unwrap_or(DEFAULT_GRID_COLS)
            );
            println!(
                "  Layers: {}",
                config.layers.count.unwrap_or(DEFAULT_NUM_LAYERS)
            );
            println!(
                "  Opacity multiplier: {}",
                config
                    .layers
                    .opacity_multiplier
                    .unwrap_or(DEFAULT_OPACITY_MULTIPLIER)
            );
            println!("  Source text: {}", describe_text(&config));
            println!(
                "  PNG width: {}",
                config.export.png_width.unwrap_or(DEFAULT_PNG_WIDTH)
            );
            println!();

            let config_path = get_config_path();
            if config_path.exists() {
                println!("Config file: {} (exists)", config_path.display());
            } else {
                println!("Config file: {} (not found)", config_path.display());
            }
        }
        ConfigAction::Init => {
            let config_path = get_config_path();

            if config_path.exists() {
                eprintln!("Config file already exists: {}", config_path.display());
                eprintln!("Use 'inkstack config show' to view current settings.");
                process::exit(1);
            }

            // Create parent directories if needed
            if let Some(parent) = config_path.parent() {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    eprintln!("Error creating config directory: {}", e);
                    process::exit(1);
                }
            }

            // Write default config
            let default_config = r#"# inkstack configuration

[grid]
# Grid rows (vertical cells)
rows = 30
# Grid columns (horizontal cells)
cols = 30

[layers]
# Number of binary layers
count = 4
# Opacity falloff base for previews (0.0-1.0)
opacity_multiplier = 0.5

[text]
# Inline glyph source text (defaults to a built-in passage)
# source = "我輩は猫である。"
# Or read it from a file
# file = "/path/to/source.txt"

[export]
# Pixel width of exported PNGs
png_width = 500
"#;

            if let Err(e) = std::fs::write(&config_path, default_config) {
                eprintln!("Error writing config file: {}", e);
                process::exit(1);
            }

            println!("Created config file: {}", config_path.display());
        }
    }
}

fn load_config(path: Option<&Path>) -> Config {
    match Config::load(path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

/// Merge CLI flags, config values, and built-in defaults.
fn resolve_stack_options(
    rows: Option<usize>,
    cols: Option<usize>,
    layers: Option<usize>,
    text: Option<&str>,
    text_file: Option<&Path>,
    config: &Config,
) -> Result<StackOptions, String> {
    Ok(StackOptions {
        rows: rows.or(config.grid.rows).unwrap_or(DEFAULT_GRID_ROWS),
        cols: cols.or(config.grid.cols).unwrap_or(DEFAULT_GRID_COLS),
        num_layers: layers.or(config.layers.count).unwrap_or(DEFAULT_NUM_LAYERS),
        source_text: resolve_source_text(text, text_file, config)?,
    })
}

fn resolve_source_text(
    text: Option<&str>,
    text_file: Option<&Path>,
    config: &Config,
) -> Result<String, String> {
    if let Some(text) = text {
        return Ok(text.to_string());
    }
    if let Some(path) = text_file {
        return read_text_file(path);
    }
    if let Some(text) = &config.text.source {
        return Ok(text.clone());
    }
    if let Some(path) = &config.text.file {
        return read_text_file(path);
    }
    Ok(DEFAULT_SOURCE_TEXT.to_string())
}

/// Read a source text file, dropping one trailing line break if present.
fn read_text_file(path: &Path) -> Result<String, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read text file '{}': {}", path.display(), e))?;
    let content = content.strip_suffix('\n').unwrap_or(&content);
    let content = content.strip_suffix('\r').unwrap_or(content);
    Ok(content.to_string())
}

/// CLI multiplier is range-checked at parse time; config values are
/// checked here.
fn resolve_multiplier(cli: Option<f64>, config: &Config) -> Result<f64, String> {
    let value = cli
        .or(config.layers.opacity_multiplier)
        .unwrap_or(DEFAULT_OPACITY_MULTIPLIER);
    if !(0.0..=1.0).contains(&value) {
        return Err(format!(
            "opacity multiplier must be between 0.0 and 1.0, got {}",
            value
        ));
    }
    Ok(value)
}

fn describe_text(config: &Config) -> String {
    if let Some(source) = &config.text.source {
        format!("inline ({} characters)", source.chars().count())
    } else if let Some(path) = &config.text.file {
        format!("file '{}'", path.display())
    } else {
        "built-in passage".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_resolve_stack_options_precedence() {
        let mut config = Config::default();
        config.grid.rows = Some(10);
        config.layers.count = Some(8);

        // CLI beats config, config beats defaults.
        let options = resolve_stack_options(Some(5), None, None, None, None, &config).unwrap();
        assert_eq!(options.rows, 5);
        assert_eq!(options.cols, DEFAULT_GRID_COLS);
        assert_eq!(options.num_layers, 8);
        assert_eq!(options.source_text, DEFAULT_SOURCE_TEXT);
    }

    #[test]
    fn test_resolve_multiplier_rejects_bad_config_value() {
        let mut config = Config::default();
        config.layers.opacity_multiplier = Some(1.5);

        let err = resolve_multiplier(None, &config).unwrap_err();
        assert!(err.contains("between 0.0 and 1.0"));

        // An explicit CLI value bypasses the config entry.
        assert_eq!(resolve_multiplier(Some(0.3), &config).unwrap(), 0.3);
    }

    #[test]
    fn test_resolve_source_text_prefers_inline() {
        let mut config = Config::default();
        config.text.source = Some("config text".to_string());

        let text = resolve_source_text(Some("cli text"), None, &config).unwrap();
        assert_eq!(text, "cli text");

        let text = resolve_source_text(None, None, &config).unwrap();
        assert_eq!(text, "config text");
    }

    #[test]
    fn test_read_text_file_trims_one_trailing_newline() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "猫である\n").unwrap();

        let text = read_text_file(file.path()).unwrap();
        assert_eq!(text, "猫である");
    }

    #[test]
    fn test_read_text_file_keeps_interior_newlines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "line one\nline two").unwrap();

        let text = read_text_file(file.path()).unwrap();
        assert_eq!(text, "line one\nline two");
    }

    #[test]
    fn test_read_text_file_missing() {
        let err = read_text_file(Path::new("/nonexistent/source.txt")).unwrap_err();
        assert!(err.contains("/nonexistent/source.txt"));
    }
}
