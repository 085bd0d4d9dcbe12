//! Paints one glyph cell into the pixel cache at a view's cursor.

use fb565::{FrameBuffer, Rgb565};
use log::debug;

use crate::{
    error::RenderError,
    glyph::{ASCII_CELL_WIDTH, CELL_HEIGHT, Glyph, GlyphClass, WIDE_CELL_WIDTH},
    view::{Point, View},
};

/// Draws `glyph` at the view cursor and advances the cursor by one cell.
///
/// Every pixel position goes through [`View::resolve`]. A position that would
/// wrap mid-glyph ends that row segment early, so a cell drawn where it only
/// partly fits is clipped rather than split across rows.
///
/// On error the cursor stays at the resolved glyph origin.
pub fn draw_glyph(
    frame: &mut FrameBuffer,
    view: &mut View,
    glyph: &Glyph<'_>,
) -> Result<(), RenderError> {
    let geometry = frame.geometry();
    let class = glyph.class();
    let origin = view.resolve(geometry, view.cursor(), class.width())?;
    view.set_cursor(origin);

    let foreground = view.color();
    for row in 0..CELL_HEIGHT {
        for segment in 0..class.bytes_per_row() {
            let bits = glyph.row_byte(row, segment);
            let span = segment_width(class, segment);

            for bit in 0..8 {
                let candidate = Point::new(origin.x + segment * 8 + bit, origin.y + row);
                let target = view.resolve(geometry, candidate, span)?;
                if target != candidate {
                    break;
                }

                let color = if bits & (0x80 >> bit) != 0 {
                    foreground
                } else {
                    Rgb565::BLACK
                };
                if !frame.set_pixel(target.x, target.y, color) {
                    debug!("glyph pixel ({}, {}) outside cache", target.x, target.y);
                    return Err(RenderError::PixelOutOfRange {
                        x: target.x,
                        y: target.y,
                    });
                }
            }
        }
    }

    let next = Point::new(origin.x + class.width(), origin.y);
    view.set_cursor(view.resolve(geometry, next, class.width())?);
    Ok(())
}

/// Width a row segment is resolved as: the leading byte of a wide row
/// counts as a full wide cell, every other byte as an ASCII cell.
const fn segment_width(class: GlyphClass, segment: usize) -> usize {
    match (class, segment) {
        (GlyphClass::Wide, 0) => WIDE_CELL_WIDTH,
        _ => ASCII_CELL_WIDTH,
    }
}
