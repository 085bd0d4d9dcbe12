//! Error taxonomy for font loading, encoding conversion and rendering.

use std::{io, path::PathBuf};

use fb565::DeviceError;
use thiserror::Error;

/// Glyph table loading failures.
#[derive(Debug, Error)]
pub enum FontError {
    #[error("failed to read font table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("font table {name} is {size} bytes, limit is {limit}")]
    TooLarge {
        name: &'static str,
        size: usize,
        limit: usize,
    },
    #[error("font table {name} is empty")]
    Empty { name: &'static str },
}

/// Source text could not be converted to GB2312.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum EncodingError {
    #[error("unknown source encoding {0:?}")]
    UnknownLabel(String),
    #[error("input is not valid {label}")]
    Malformed { label: &'static str },
    #[error("{0:?} has no GB2312 representation")]
    Unmappable(char),
}

/// Failures of a single draw call.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    /// Fail-fast bounds check of the pixel cache.
    #[error("pixel ({x}, {y}) is outside the framebuffer")]
    PixelOutOfRange { x: usize, y: usize },
    /// The view's effective rectangle cannot hold one glyph cell.
    #[error("view area {width}x{height} cannot hold a {glyph_width}px glyph cell")]
    ViewTooSmall {
        width: usize,
        height: usize,
        glyph_width: usize,
    },
    #[error(transparent)]
    Device(#[from] DeviceError),
}

/// Resource acquisition failures while bringing up a display.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("font unavailable: {0}")]
    Font(#[from] FontError),
    #[error("framebuffer unavailable: {0}")]
    Device(#[from] DeviceError),
}
