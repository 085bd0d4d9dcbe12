//! Compositor owning the pixel cache, the surface and the glyph tables.

use std::path::PathBuf;

use fb565::{DeviceError, FbDevice, FrameBuffer, Geometry, Rgb565, Surface};
use log::{debug, info};

use crate::{
    encoding::{DEFAULT_SCRATCH_BYTES, is_native, to_gb2312},
    error::{InitError, RenderError},
    glyph::BitmapFont,
    text::{RunStats, render_run},
    view::View,
};

/// Resources a device-backed [`Display`] is brought up from.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DisplayConfig {
    /// Framebuffer device node.
    pub device: PathBuf,
    /// Directory holding `ascii_8x16` and `gb2312_16x16`.
    pub font_dir: PathBuf,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            device: PathBuf::from("/dev/fb0"),
            font_dir: PathBuf::from("./font"),
        }
    }
}

/// Text compositor over one surface.
///
/// All drawing lands in the pixel cache; [`Display::flush`] copies the whole
/// cache to the surface. Views are plain values addressed against this cache,
/// any number of them may share one display.
#[derive(Debug)]
pub struct Display<S: Surface> {
    // Dropped in declaration order: cache, surface, glyph tables.
    frame: FrameBuffer,
    surface: S,
    font: BitmapFont,
    scratch: Vec<u8>,
}

impl Display<FbDevice> {
    /// Loads the glyph tables, then opens and maps the framebuffer device.
    pub fn open(config: &DisplayConfig) -> Result<Self, InitError> {
        let font = BitmapFont::load(&config.font_dir)?;
        let device = FbDevice::open(&config.device)?;
        let display = Self::new(device, font)?;

        info!(
            "display ready on {} ({}x{})",
            config.device.display(),
            display.width(),
            display.height()
        );
        Ok(display)
    }
}

impl<S: Surface> Display<S> {
    /// Wraps `surface` with a black cache and blanks the surface.
    pub fn new(surface: S, font: BitmapFont) -> Result<Self, DeviceError> {
        let frame = FrameBuffer::new(surface.geometry());
        let mut display = Self {
            frame,
            surface,
            font,
            scratch: vec![0; DEFAULT_SCRATCH_BYTES],
        };
        display.clear()?;
        Ok(display)
    }

    pub fn width(&self) -> usize {
        self.frame.geometry().width
    }

    pub fn height(&self) -> usize {
        self.frame.geometry().height
    }

    pub fn geometry(&self) -> Geometry {
        self.frame.geometry()
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Writes one pixel into the cache.
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Rgb565) -> Result<(), RenderError> {
        if self.frame.set_pixel(x, y, color) {
            Ok(())
        } else {
            Err(RenderError::PixelOutOfRange { x, y })
        }
    }

    /// Copies the whole cache to the surface.
    pub fn flush(&mut self) -> Result<(), DeviceError> {
        self.surface.write_frame(&self.frame)
    }

    /// Blanks the cache and the surface.
    pub fn clear(&mut self) -> Result<(), DeviceError> {
        self.frame.clear(Rgb565::BLACK);
        self.flush()
    }

    /// Blanks the part of `view` on screen and moves its cursor home.
    ///
    /// Only the cache changes; call [`Display::flush`] to show it.
    pub fn clear_view(&mut self, view: &mut View) {
        if let Some(area) = view.area().clip_to(self.geometry()) {
            for y in area.y..area.bottom() {
                self.frame.fill_span(area.x, y, area.width, Rgb565::BLACK);
            }
        }
        view.reset_cursor();
    }

    /// Renders `bytes`, encoded as `from_code`, into the cache through `view`.
    ///
    /// GB2312 input is rendered as is. Anything else is converted first; a
    /// conversion failure is returned before any pixel changes.
    pub fn print(
        &mut self,
        view: &mut View,
        from_code: &str,
        bytes: &[u8],
    ) -> Result<RunStats, RenderError> {
        let text = if is_native(from_code) {
            bytes
        } else {
            let len = to_gb2312(from_code, bytes, &mut self.scratch)?;
            &self.scratch[..len]
        };

        let stats = render_run(&mut self.frame, &self.font, view, text)?;
        debug!("printed {} bytes: {stats:?}", text.len());
        Ok(stats)
    }
}
