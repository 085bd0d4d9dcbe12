//! Off-device pixel cache mirroring a framebuffer surface.

use crate::format::{Geometry, PIXEL_BYTES, Rgb565};

/// 16 bpp pixel cache.
///
/// Sized once from the surface geometry and never reallocated. All drawing
/// happens here; a surface receives the whole buffer on flush.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FrameBuffer {
    geometry: Geometry,
    bytes: Vec<u8>,
}

impl FrameBuffer {
    /// Creates a black framebuffer for `geometry`.
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            bytes: vec![0u8; geometry.buffer_size()],
        }
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Returns the underlying framebuffer bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Fills every pixel with `color`.
    pub fn clear(&mut self, color: Rgb565) {
        fill_pixels(&mut self.bytes, color);
    }

    /// Sets a pixel.
    ///
    /// Returns `true` when pixel is in bounds, `false` otherwise. Nothing is
    /// written for an out-of-bounds pixel.
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Rgb565) -> bool {
        let Some(offset) = self.geometry.offset(x, y) else {
            return false;
        };

        self.bytes[offset..offset + PIXEL_BYTES].copy_from_slice(&color.to_bytes());
        true
    }

    /// Reads a pixel.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb565> {
        let offset = self.geometry.offset(x, y)?;
        let mut raw = [0u8; PIXEL_BYTES];
        raw.copy_from_slice(&self.bytes[offset..offset + PIXEL_BYTES]);
        Some(Rgb565::from_bytes(raw))
    }

    /// Fills `len` pixels of row `y` starting at `x`, clipped to the row.
    ///
    /// Returns the number of pixels written.
    pub fn fill_span(&mut self, x: usize, y: usize, len: usize, color: Rgb565) -> usize {
        if y >= self.geometry.height || x >= self.geometry.width {
            return 0;
        }

        let len = len.min(self.geometry.width - x);
        let Some(start) = self.geometry.offset(x, y) else {
            return 0;
        };

        fill_pixels(&mut self.bytes[start..start + len * PIXEL_BYTES], color);
        len
    }
}

fn fill_pixels(bytes: &mut [u8], color: Rgb565) {
    let [lo, hi] = color.to_bytes();
    if lo == hi {
        bytes.fill(lo);
        return;
    }

    for pixel in bytes.chunks_exact_mut(PIXEL_BYTES) {
        pixel[0] = lo;
        pixel[1] = hi;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GEOMETRY: Geometry = Geometry::new(16, 8);

    #[test]
    fn new_framebuffer_is_black_and_sized_from_geometry() {
        let fb = FrameBuffer::new(GEOMETRY);

        assert_eq!(fb.bytes().len(), GEOMETRY.buffer_size());
        assert!(fb.bytes().iter().all(|byte| *byte == 0));
    }

    #[test]
    fn set_and_read_pixel() {
        let mut fb = FrameBuffer::new(GEOMETRY);

        assert!(fb.set_pixel(3, 2, Rgb565(0xABCD)));
        assert_eq!(fb.pixel(3, 2), Some(Rgb565(0xABCD)));
        assert_eq!(fb.pixel(2, 2), Some(Rgb565::BLACK));

        let offset = GEOMETRY.offset(3, 2).unwrap();
        assert_eq!(&fb.bytes()[offset..offset + 2], &0xABCDu16.to_ne_bytes());
    }

    #[test]
    fn out_of_bounds_pixel_is_ignored() {
        let mut fb = FrameBuffer::new(GEOMETRY);

        assert!(!fb.set_pixel(GEOMETRY.width, 0, Rgb565::WHITE));
        assert!(!fb.set_pixel(0, GEOMETRY.height, Rgb565::WHITE));
        assert!(fb.bytes().iter().all(|byte| *byte == 0));
        assert_eq!(fb.pixel(GEOMETRY.width, GEOMETRY.height), None);
    }

    #[test]
    fn set_and_read_last_pixel() {
        let mut fb = FrameBuffer::new(GEOMETRY);

        assert!(fb.set_pixel(GEOMETRY.width - 1, GEOMETRY.height - 1, Rgb565::WHITE));
        assert_eq!(
            fb.pixel(GEOMETRY.width - 1, GEOMETRY.height - 1),
            Some(Rgb565::WHITE)
        );
    }

    #[test]
    fn clear_handles_asymmetric_colors() {
        let mut fb = FrameBuffer::new(GEOMETRY);

        fb.clear(Rgb565(0x12F0));
        assert_eq!(fb.pixel(0, 0), Some(Rgb565(0x12F0)));
        assert_eq!(fb.pixel(15, 7), Some(Rgb565(0x12F0)));

        fb.clear(Rgb565::WHITE);
        assert!(fb.bytes().iter().all(|byte| *byte == 0xFF));
    }

    #[test]
    fn fill_span_is_clipped_to_row() {
        let mut fb = FrameBuffer::new(GEOMETRY);

        assert_eq!(fb.fill_span(12, 1, 10, Rgb565::WHITE), 4);
        assert_eq!(fb.pixel(11, 1), Some(Rgb565::BLACK));
        assert_eq!(fb.pixel(12, 1), Some(Rgb565::WHITE));
        assert_eq!(fb.pixel(15, 1), Some(Rgb565::WHITE));
        // Nothing leaks into the next row.
        assert_eq!(fb.pixel(0, 2), Some(Rgb565::BLACK));

        assert_eq!(fb.fill_span(0, GEOMETRY.height, 4, Rgb565::WHITE), 0);
        assert_eq!(fb.fill_span(GEOMETRY.width, 0, 4, Rgb565::WHITE), 0);
    }
}
