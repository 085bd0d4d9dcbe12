//! Walks a GB2312 byte run and dispatches each code unit.

use fb565::FrameBuffer;
use log::debug;

use crate::{
    error::RenderError,
    glyph::{CodeUnit, GlyphStore, classify},
    raster::draw_glyph,
    view::View,
};


/// Outcome of one rendered run.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RunStats {
    /// Glyph cells painted.
    pub glyphs: usize,
    /// Drawable units the glyph store had no cell for.
    pub missing: usize,
    /// Bytes skipped as undefined.
    pub skipped: usize,
}

impl RunStats {
    pub fn merge(&mut self, other: RunStats) {
        self.glyphs += other.glyphs;
        self.missing += other.missing;
        self.skipped += other.skipped;
    }
}

/// Renders `bytes` (GB2312) into `frame` through `view`, left to right with
/// no backtracking.
///
/// A unit without a glyph is skipped and the run continues. The first
/// positioning or pixel error stops the run.
pub fn render_run<G>(
    frame: &mut FrameBuffer,
    font: &G,
    view: &mut View,
    bytes: &[u8],
) -> Result<RunStats, RenderError>
where
    G: GlyphStore + ?Sized,
{
    let geometry = frame.geometry();
    let mut stats = RunStats::default();
    let mut rest = bytes;

    while let Some(unit) = classify(rest) {
        rest = &rest[unit.len()..];

        match unit {
            CodeUnit::Single(b'\n') => view.newline(geometry)?,
            CodeUnit::Single(b'\t') => view.tab(geometry)?,
            CodeUnit::Single(b' ') => view.space(geometry)?,
            CodeUnit::Single(0x21..=0x7E) | CodeUnit::Wide(..) => match font.lookup(unit) {
                Some(glyph) => {
                    draw_glyph(frame, view, &glyph)?;
                    stats.glyphs += 1;
                }
                None => {
                    debug!("no glyph for {unit:?}");
                    stats.missing += 1;
                }
            },
            CodeUnit::Single(_) => {}
            CodeUnit::Undefined(byte) => {
                debug!("skipping undefined byte {byte:#04x}");
                stats.skipped += 1;
            }
        }
    }

    Ok(stats)
}
