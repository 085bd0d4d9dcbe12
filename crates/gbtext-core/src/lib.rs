//! GB2312 / ASCII text layout and glyph compositing for RGB565 framebuffers.
//!
//! Text is rendered through [`View`]s, rectangular regions with a cursor that
//! wraps circularly, into the pixel cache owned by a [`Display`]. Fonts are
//! fixed 8x16 single-byte and 16x16 double-byte raster tables.

pub mod chat;
pub mod display;
pub mod encoding;
mod error;
pub mod glyph;
pub mod raster;
pub mod text;
pub mod view;

pub use chat::{ChatLayout, ChatScreen};
pub use display::{Display, DisplayConfig};
pub use error::{EncodingError, FontError, InitError, RenderError};
pub use glyph::{BitmapFont, CodeUnit, Glyph, GlyphClass, GlyphStore, classify};
pub use text::{RunStats, render_run};
pub use view::{Point, Rect, View};

use log::LevelFilter;

/// Turns diagnostic logging on or off for the whole process.
///
/// Disabling silences every level, so errors are then only visible through
/// returned `Result`s.
pub fn set_debug(enable: bool) {
    log::set_max_level(if enable {
        LevelFilter::Debug
    } else {
        LevelFilter::Off
    });
}
