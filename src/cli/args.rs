//! CLI argument parsing with clap.

use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

/// Turn an image into stacked binary ink layers and glyph pages
#[derive(Parser, Debug)]
#[command(name = "inkstack")]
#[command(version, about = "Bit-plane layer generator for stacked ink prints", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate all layers and write them to a directory
    Render(RenderArgs),
    /// Print the merged glyph page (or a single layer) to stdout
    Preview(PreviewArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(ClapArgs, Debug)]
pub struct RenderArgs {
    /// Input image (png, jpeg, bmp, or webp)
    pub image: PathBuf,

    /// Output directory for layer artifacts
    #[arg(short, long, default_value = "layers")]
    pub output: PathBuf,

    /// Grid rows
    #[arg(long, value_parser = parse_dimension)]
    pub rows: Option<usize>,

    /// Grid columns
    #[arg(long, value_parser = parse_dimension)]
    pub cols: Option<usize>,

    /// Number of binary layers
    #[arg(short = 'n', long, value_parser = parse_dimension)]
    pub layers: Option<usize>,

    /// Opacity falloff multiplier for the preview PNG (0.0-1.0)
    #[arg(short, long, value_parser = parse_multiplier)]
    pub multiplier: Option<f64>,

    /// Glyph source text
    #[arg(long)]
    pub text: Option<String>,

    /// Read the glyph source text from a file
    #[arg(long, conflicts_with = "text")]
    pub text_file: Option<PathBuf>,

    /// Layers in the merged outputs, e.g. "1,3" (default: all)
    #[arg(long, value_parser = parse_layer_set)]
    pub active: Option<LayerSet>,

    /// Pixel width of exported PNGs
    #[arg(long)]
    pub png_width: Option<u32>,

    /// Config file path
    #[arg(long, short)]
    pub config: Option<PathBuf>,
}

#[derive(ClapArgs, Debug)]
pub struct PreviewArgs {
    /// Input image (png, jpeg, bmp, or webp)
    pub image: PathBuf,

    /// Grid rows
    #[arg(long, value_parser = parse_dimension)]
    pub rows: Option<usize>,

    /// Grid columns
    #[arg(long, value_parser = parse_dimension)]
    pub cols: Option<usize>,

    /// Number of binary layers
    #[arg(short = 'n', long, value_parser = parse_dimension)]
    pub layers: Option<usize>,

    /// Glyph source text
    #[arg(long)]
    pub text: Option<String>,

    /// Read the glyph source text from a file
    #[arg(long, conflicts_with = "text")]
    pub text_file: Option<PathBuf>,

    /// Layers to merge, e.g. "1,3" (default: all)
    #[arg(long, value_parser = parse_layer_set)]
    pub active: Option<LayerSet>,

    /// Show one layer's glyph page instead of the merge
    #[arg(long, conflicts_with = "active", value_parser = parse_dimension)]
    pub layer: Option<usize>,

    /// Config file path
    #[arg(long, short)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
}

/// 1-based layer indices parsed from a comma-separated list.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerSet(pub Vec<usize>);

/// Parse and validate a cell or layer count (at least 1)
fn parse_dimension(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid count", s))?;
    if value == 0 {
        return Err("Count must be greater than 0".to_string());
    }
    Ok(value)
}

/// Parse and validate the opacity multiplier (0.0-1.0)
fn parse_multiplier(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if !(0.0..=1.0).contains(&value) {
        return Err(format!(
            "Multiplier must be between 0.0 and 1.0, got {}",
            value
        ));
    }
    Ok(value)
}

/// Parse a comma-separated list of 1-based layer indices
fn parse_layer_set(s: &str) -> Result<LayerSet, String> {
    let mut indices = Vec::new();
    for part in s.split(',') {
        let part = part.trim();
        let index: usize = part
            .parse()
            .map_err(|_| format!("'{}' is not a valid layer index", part))?;
        if index == 0 {
            return Err("Layer indices start at 1".to_string());
        }
        indices.push(index);
    }
    Ok(LayerSet(indices))
}
