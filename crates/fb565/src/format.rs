//! RGB565 pixel format and linear buffer addressing.

/// Bytes per pixel. Only 16 bpp surfaces are supported.
pub const PIXEL_BYTES: usize = 2;
/// Bits per pixel reported by a supported device.
pub const PIXEL_BITS: u32 = (PIXEL_BYTES * 8) as u32;

/// One RGB565 pixel value.
///
/// Stored in the cache in native byte order, the same way the kernel
/// framebuffer expects a `u16` store.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Rgb565(pub u16);

impl Rgb565 {
    pub const BLACK: Self = Self(0x0000);
    pub const WHITE: Self = Self(0xFFFF);

    #[inline]
    pub const fn to_bytes(self) -> [u8; PIXEL_BYTES] {
        self.0.to_ne_bytes()
    }

    #[inline]
    pub const fn from_bytes(bytes: [u8; PIXEL_BYTES]) -> Self {
        Self(u16::from_ne_bytes(bytes))
    }
}

/// Pixel dimensions of a surface and the addressing shared by the cache and
/// the device memory.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Geometry {
    pub width: usize,
    pub height: usize,
}

impl Geometry {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Bytes in one pixel row.
    pub const fn stride(&self) -> usize {
        self.width * PIXEL_BYTES
    }

    /// Total buffer size: `width * height * PIXEL_BYTES`.
    pub const fn buffer_size(&self) -> usize {
        self.stride() * self.height
    }

    pub const fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Byte offset of `(x, y)`.
    ///
    /// Returns `None` when the pixel lies outside the surface; callers must
    /// never substitute a fallback offset.
    #[inline]
    pub const fn offset(&self, x: usize, y: usize) -> Option<usize> {
        if !self.contains(x, y) {
            return None;
        }

        Some((y * self.width + x) * PIXEL_BYTES)
    }
}
