//! Command-line interface definitions and helpers.
//!
//! This module contains all CLI argument parsing and subcommand handlers.

mod args;
mod commands;

pub use args::{Args, Command, ConfigAction, LayerSet, PreviewArgs, RenderArgs};
pub use commands::{handle_config_action, run_preview, run_render};
