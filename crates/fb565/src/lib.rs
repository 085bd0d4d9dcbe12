//! Linux framebuffer (16 bpp RGB565) surface primitives.

pub mod format;
mod framebuffer;
mod memory;

pub use format::{Geometry, PIXEL_BYTES, Rgb565};
pub use framebuffer::FrameBuffer;
pub use memory::MemorySurface;

use std::{
    fs::{File, OpenOptions},
    io,
    os::fd::AsRawFd,
    path::{Path, PathBuf},
};

use log::{debug, info};
use memmap2::{MmapMut, MmapOptions};
use thiserror::Error;

/// Surface errors.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// The device node could not be opened.
    #[error("failed to open framebuffer {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Querying the screen info failed.
    #[error("FBIOGET_VSCREENINFO failed on {path}: {source}")]
    ScreenInfo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The device memory could not be mapped.
    #[error("failed to map {size} bytes of {path}: {source}")]
    Map {
        path: PathBuf,
        size: usize,
        #[source]
        source: io::Error,
    },
    /// The device reports a pixel depth other than 16 bpp.
    #[error("unsupported pixel depth: {0} bits per pixel")]
    UnsupportedDepth(u32),
    /// The device reports a zero-sized screen.
    #[error("framebuffer reports an empty {width}x{height} screen")]
    EmptyScreen { width: usize, height: usize },
    /// A frame of the wrong size was handed to a surface.
    #[error("frame is {actual} bytes, surface expects {expected}")]
    FrameSize { expected: usize, actual: usize },
}

/// Display memory that receives whole frames from the pixel cache.
pub trait Surface {
    fn geometry(&self) -> Geometry;

    /// Copies the whole frame into device memory.
    fn write_frame(&mut self, frame: &FrameBuffer) -> Result<(), DeviceError>;
}

pub(crate) fn check_frame_size(expected: usize, frame: &FrameBuffer) -> Result<(), DeviceError> {
    let actual = frame.bytes().len();
    if actual != expected {
        return Err(DeviceError::FrameSize { expected, actual });
    }
    Ok(())
}

const FBIOGET_VSCREENINFO: u32 = 0x4600;

#[repr(C)]
#[derive(Clone, Copy, Debug, Default)]
struct FbBitfield {
    offset: u32,
    length: u32,
    msb_right: u32,
}

/// `struct fb_var_screeninfo` from `<linux/fb.h>`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default)]
struct FbVarScreenInfo {
    xres: u32,
    yres: u32,
    xres_virtual: u32,
    yres_virtual: u32,
    xoffset: u32,
    yoffset: u32,
    bits_per_pixel: u32,
    grayscale: u32,
    red: FbBitfield,
    green: FbBitfield,
    blue: FbBitfield,
    transp: FbBitfield,
    nonstd: u32,
    activate: u32,
    height: u32,
    width: u32,
    accel_flags: u32,
    pixclock: u32,
    left_margin: u32,
    right_margin: u32,
    upper_margin: u32,
    lower_margin: u32,
    hsync_len: u32,
    vsync_len: u32,
    sync: u32,
    vmode: u32,
    rotate: u32,
    colorspace: u32,
    reserved: [u32; 4],
}

/// Memory-mapped `/dev/fbN` device.
///
/// The mapping is released before the device node is closed.
#[derive(Debug)]
pub struct FbDevice {
    screen: MmapMut,
    _file: File,
    geometry: Geometry,
}

impl FbDevice {
    /// Opens and maps a framebuffer device.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DeviceError> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&path)
            .map_err(|source| DeviceError::Open {
                path: path.clone(),
                source,
            })?;

        let mut vinfo = FbVarScreenInfo::default();
        // SAFETY: FBIOGET_VSCREENINFO fills exactly one `fb_var_screeninfo`.
        let rc = unsafe {
            libc::ioctl(
                file.as_raw_fd(),
                FBIOGET_VSCREENINFO as _,
                &mut vinfo as *mut FbVarScreenInfo,
            )
        };
        if rc < 0 {
            return Err(DeviceError::ScreenInfo {
                path,
                source: io::Error::last_os_error(),
            });
        }

        if vinfo.bits_per_pixel != format::PIXEL_BITS {
            return Err(DeviceError::UnsupportedDepth(vinfo.bits_per_pixel));
        }

        let geometry = Geometry::new(vinfo.xres_virtual as usize, vinfo.yres_virtual as usize);
        if geometry.buffer_size() == 0 {
            return Err(DeviceError::EmptyScreen {
                width: geometry.width,
                height: geometry.height,
            });
        }
        debug!(
            "{}: {}x{} visible, {}x{} virtual",
            path.display(),
            vinfo.xres,
            vinfo.yres,
            geometry.width,
            geometry.height
        );

        let size = geometry.buffer_size();
        // SAFETY: the mapping is shared with the kernel framebuffer and is
        // only ever accessed through this handle.
        let screen = unsafe { MmapOptions::new().len(size).map_mut(&file) }.map_err(|source| {
            DeviceError::Map {
                path: path.clone(),
                size,
                source,
            }
        })?;

        info!(
            "mapped {} ({}x{}, {} bytes)",
            path.display(),
            geometry.width,
            geometry.height,
            size
        );

        Ok(Self {
            screen,
            _file: file,
            geometry,
        })
    }
}

impl Surface for FbDevice {
    fn geometry(&self) -> Geometry {
        self.geometry
    }

    fn write_frame(&mut self, frame: &FrameBuffer) -> Result<(), DeviceError> {
        check_frame_size(self.screen.len(), frame)?;
        self.screen.copy_from_slice(frame.bytes());
        Ok(())
    }
}
