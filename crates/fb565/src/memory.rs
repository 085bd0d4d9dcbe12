use crate::{DeviceError, FrameBuffer, Geometry, Surface, check_frame_size, format::Rgb565};

/// Heap-backed surface used for headless rendering and tests.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MemorySurface {
    geometry: Geometry,
    bytes: Vec<u8>,
    flushes: usize,
}

impl MemorySurface {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            bytes: vec![0xA5; geometry.buffer_size()],
            flushes: 0,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of frames written so far.
    pub fn flush_count(&self) -> usize {
        self.flushes
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb565> {
        let offset = self.geometry.offset(x, y)?;
        Some(Rgb565::from_bytes([self.bytes[offset], self.bytes[offset + 1]]))
    }
}

impl Surface for MemorySurface {
    fn geometry(&self) -> Geometry {
        self.geometry
    }

    fn write_frame(&mut self, frame: &FrameBuffer) -> Result<(), DeviceError> {
        check_frame_size(self.bytes.len(), frame)?;
        self.bytes.copy_from_slice(frame.bytes());
        self.flushes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_frame_copies_whole_buffer() {
        let geometry = Geometry::new(4, 2);
        let mut surface = MemorySurface::new(geometry);
        let mut frame = FrameBuffer::new(geometry);
        frame.set_pixel(3, 1, Rgb565::WHITE);

        surface.write_frame(&frame).unwrap();

        assert_eq!(surface.bytes(), frame.bytes());
        assert_eq!(surface.pixel(3, 1), Some(Rgb565::WHITE));
        assert_eq!(surface.flush_count(), 1);
    }

    #[test]
    fn mismatched_frame_is_rejected_untouched() {
        let mut surface = MemorySurface::new(Geometry::new(4, 2));
        let frame = FrameBuffer::new(Geometry::new(4, 3));

        let err = surface.write_frame(&frame).unwrap_err();
        assert!(matches!(
            err,
            DeviceError::FrameSize {
                expected: 16,
                actual: 24
            }
        ));
        assert!(surface.bytes().iter().all(|byte| *byte == 0xA5));
        assert_eq!(surface.flush_count(), 0);
    }
}
