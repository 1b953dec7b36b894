//! inkstack library crate.
//!
//! Decomposes a raster image into stacked binary ink layers: each
//! layer is one bit-plane of the image's inverted luminance, inked
//! cells are replaced by characters drawn from a cyclic source text,
//! and the layers can be merged or optically recombined. See
//! [`layers`] for the pipeline and [`export`] for the on-disk
//! artifacts.

pub mod bitmap;
pub mod cli;
pub mod config;
pub mod export;
pub mod layers;
pub mod render;
