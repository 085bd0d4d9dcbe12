use std::{fs, path::Path};

use log::{debug, info};

use super::{CodeUnit, GB2312, Glyph, GlyphStore};
use crate::error::FontError;

/// File name of the 8x16 single-byte table inside a font directory.
pub const ASCII_TABLE_FILE: &str = "ascii_8x16";
/// File name of the 16x16 GB2312 table inside a font directory.
pub const WIDE_TABLE_FILE: &str = "gb2312_16x16";

pub const ASCII_TABLE_LIMIT: usize = 5 * 1024;
pub const WIDE_TABLE_LIMIT: usize = 257 * 1024;

/// Two raster tables loaded once and never mutated.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BitmapFont {
    ascii: Vec<u8>,
    wide: Vec<u8>,
}

impl BitmapFont {
    /// Loads `ascii_8x16` and `gb2312_16x16` from `dir`.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, FontError> {
        let dir = dir.as_ref();
        let ascii = read_table(&dir.join(ASCII_TABLE_FILE), ASCII_TABLE_FILE, ASCII_TABLE_LIMIT)?;
        let wide = read_table(&dir.join(WIDE_TABLE_FILE), WIDE_TABLE_FILE, WIDE_TABLE_LIMIT)?;

        info!(
            "loaded fonts from {} (ascii {} bytes, wide {} bytes)",
            dir.display(),
            ascii.len(),
            wide.len()
        );
        Self::from_tables(ascii, wide)
    }

    /// Builds a font from in-memory tables, applying the same limits as
    /// [`BitmapFont::load`].
    pub fn from_tables(ascii: Vec<u8>, wide: Vec<u8>) -> Result<Self, FontError> {
        check_table(ASCII_TABLE_FILE, ascii.len(), ASCII_TABLE_LIMIT)?;
        check_table(WIDE_TABLE_FILE, wide.len(), WIDE_TABLE_LIMIT)?;
        Ok(Self { ascii, wide })
    }

    pub fn ascii_table_len(&self) -> usize {
        self.ascii.len()
    }

    pub fn wide_table_len(&self) -> usize {
        self.wide.len()
    }
}

impl GlyphStore for BitmapFont {
    fn lookup(&self, unit: CodeUnit) -> Option<Glyph<'_>> {
        let class = unit.glyph_class()?;
        let (table, index) = match unit {
            CodeUnit::Single(byte) => (&self.ascii, byte as usize),
            CodeUnit::Wide(lead, trail) => (&self.wide, GB2312.glyph_index(lead, trail)?),
            CodeUnit::Undefined(_) => return None,
        };

        let size = class.glyph_bytes();
        let offset = index * size;
        if offset + size > table.len() {
            debug!(
                "{unit:?}: glyph offset {offset}+{size} past table of {} bytes",
                table.len()
            );
            return None;
        }

        Glyph::new(class, &table[offset..offset + size])
    }
}

fn check_table(name: &'static str, size: usize, limit: usize) -> Result<(), FontError> {
    if size == 0 {
        return Err(FontError::Empty { name });
    }
    if size >= limit {
        return Err(FontError::TooLarge { name, size, limit });
    }
    Ok(())
}

fn read_table(path: &Path, name: &'static str, limit: usize) -> Result<Vec<u8>, FontError> {
    let io_error = |source| FontError::Io {
        path: path.to_path_buf(),
        source,
    };

    // Reject oversized tables before reading them.
    let size = fs::metadata(path).map_err(io_error)?.len() as usize;
    check_table(name, size, limit)?;

    let table = fs::read(path).map_err(io_error)?;
    debug!("read {} ({} bytes)", path.display(), table.len());
    Ok(table)
}
