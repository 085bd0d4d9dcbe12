//! Fixed-cell raster glyphs and GB2312 code-unit classification.

mod bitmap_font;

pub use bitmap_font::{
    ASCII_TABLE_FILE, ASCII_TABLE_LIMIT, BitmapFont, WIDE_TABLE_FILE, WIDE_TABLE_LIMIT,
};

use core::ops::RangeInclusive;

/// Height of every glyph cell and of one text row, in pixels.
pub const CELL_HEIGHT: usize = 16;
/// Width of a single-byte glyph cell.
pub const ASCII_CELL_WIDTH: usize = 8;
/// Width of a double-byte glyph cell.
pub const WIDE_CELL_WIDTH: usize = 16;

pub const ASCII_GLYPH_BYTES: usize = CELL_HEIGHT * (ASCII_CELL_WIDTH / 8);
pub const WIDE_GLYPH_BYTES: usize = CELL_HEIGHT * (WIDE_CELL_WIDTH / 8);

/// Registered lead/trail ranges of a double-byte charset and the layout of
/// its glyph table.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DoubleByteCharset {
    pub lead: RangeInclusive<u8>,
    pub trail: RangeInclusive<u8>,
    /// Glyphs per zone (row) in the wide table.
    pub zone_size: usize,
}

impl DoubleByteCharset {
    pub fn is_pair(&self, lead: u8, trail: u8) -> bool {
        self.lead.contains(&lead) && self.trail.contains(&trail)
    }

    /// Glyph index of a registered pair in the wide table.
    pub fn glyph_index(&self, lead: u8, trail: u8) -> Option<usize> {
        if !self.is_pair(lead, trail) {
            return None;
        }

        let zone = (lead - self.lead.start()) as usize;
        let position = (trail - self.trail.start()) as usize;
        Some(self.zone_size * zone + position)
    }
}

/// GB2312 in EUC-CN form: zone and position bytes are both `0xA1..=0xFE`.
pub const GB2312: DoubleByteCharset = DoubleByteCharset {
    lead: 0xA1..=0xFE,
    trail: 0xA1..=0xFE,
    zone_size: 94,
};

/// Classification of the code unit starting at a byte position.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum CodeUnit {
    /// ASCII-class byte (`< 0x80`).
    Single(u8),
    /// Registered lead and trail pair.
    Wide(u8, u8),
    /// Anything else; consumes one byte.
    Undefined(u8),
}

impl CodeUnit {
    /// Bytes consumed by this unit.
    pub const fn len(self) -> usize {
        match self {
            Self::Wide(..) => 2,
            Self::Single(_) | Self::Undefined(_) => 1,
        }
    }

    /// Cell shape drawn for this unit, `None` when nothing is drawn.
    pub const fn glyph_class(self) -> Option<GlyphClass> {
        match self {
            Self::Single(_) => Some(GlyphClass::Ascii),
            Self::Wide(..) => Some(GlyphClass::Wide),
            Self::Undefined(_) => None,
        }
    }
}

/// Classifies the code unit at the start of `bytes` against [`GB2312`].
///
/// Returns `None` only for empty input. A lead byte without an in-range
/// trail byte is [`CodeUnit::Undefined`].
pub fn classify(bytes: &[u8]) -> Option<CodeUnit> {
    let (&lead, rest) = bytes.split_first()?;

    if lead < 0x80 {
        return Some(CodeUnit::Single(lead));
    }

    match rest.first() {
        Some(&trail) if GB2312.is_pair(lead, trail) => Some(CodeUnit::Wide(lead, trail)),
        _ => Some(CodeUnit::Undefined(lead)),
    }
}

/// Cell shape of a glyph.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum GlyphClass {
    /// 8x16, one byte per row.
    Ascii,
    /// 16x16, two bytes per row.
    Wide,
}

impl GlyphClass {
    pub const fn width(self) -> usize {
        match self {
            Self::Ascii => ASCII_CELL_WIDTH,
            Self::Wide => WIDE_CELL_WIDTH,
        }
    }

    pub const fn bytes_per_row(self) -> usize {
        self.width() / 8
    }

    pub const fn glyph_bytes(self) -> usize {
        match self {
            Self::Ascii => ASCII_GLYPH_BYTES,
            Self::Wide => WIDE_GLYPH_BYTES,
        }
    }
}

/// Borrowed bitmap of one glyph cell.
///
/// Rows are stored top to bottom; within a byte, bit 7 is the leftmost pixel.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Glyph<'a> {
    class: GlyphClass,
    bitmap: &'a [u8],
}

impl<'a> Glyph<'a> {
    /// Wraps a bitmap of exactly `class.glyph_bytes()` bytes.
    pub fn new(class: GlyphClass, bitmap: &'a [u8]) -> Option<Self> {
        (bitmap.len() == class.glyph_bytes()).then_some(Self { class, bitmap })
    }

    pub fn class(&self) -> GlyphClass {
        self.class
    }

    pub fn bitmap(&self) -> &'a [u8] {
        self.bitmap
    }

    /// Row byte `segment` (0 for the left half, 1 for the right half of a
    /// wide glyph).
    #[inline]
    pub fn row_byte(&self, row: usize, segment: usize) -> u8 {
        self.bitmap[row * self.class.bytes_per_row() + segment]
    }

    #[inline]
    pub fn is_set(&self, row: usize, col: usize) -> bool {
        self.row_byte(row, col / 8) & (0x80 >> (col % 8)) != 0
    }
}

/// Bounded glyph lookup by code unit.
pub trait GlyphStore {
    /// Returns `None` for undefined units and for any unit whose cell would
    /// end past the loaded table.
    fn lookup(&self, unit: CodeUnit) -> Option<Glyph<'_>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_bytes_are_single() {
        for byte in 0u8..0x80 {
            assert_eq!(classify(&[byte, 0xA1]), Some(CodeUnit::Single(byte)));
        }
    }

    #[test]
    fn registered_pair_is_wide() {
        assert_eq!(classify(&[0xB0, 0xA1]), Some(CodeUnit::Wide(0xB0, 0xA1)));
        assert_eq!(classify(&[0xA1, 0xA1]), Some(CodeUnit::Wide(0xA1, 0xA1)));
        assert_eq!(classify(&[0xFE, 0xFE]), Some(CodeUnit::Wide(0xFE, 0xFE)));
    }

    #[test]
    fn lead_with_out_of_range_trail_is_not_wide() {
        let text = [0xB0, 0x20];

        let first = classify(&text).unwrap();
        assert_eq!(first, CodeUnit::Undefined(0xB0));
        assert_eq!(classify(&text[first.len()..]), Some(CodeUnit::Single(0x20)));
    }

    #[test]
    fn lead_at_end_of_input_is_undefined() {
        assert_eq!(classify(&[0xC4]), Some(CodeUnit::Undefined(0xC4)));
        assert_eq!(classify(&[]), None);
    }

    #[test]
    fn bytes_between_ascii_and_lead_range_are_undefined() {
        for byte in 0x80u8..0xA1 {
            assert_eq!(classify(&[byte, 0xA1]), Some(CodeUnit::Undefined(byte)));
        }
        assert_eq!(classify(&[0xFF, 0xA1]), Some(CodeUnit::Undefined(0xFF)));
        assert_eq!(classify(&[0xB0, 0xFF]), Some(CodeUnit::Undefined(0xB0)));
    }

    #[test]
    fn every_leading_byte_has_exactly_one_class() {
        for lead in 0u8..=0xFF {
            for trail in [0x00, 0x41, 0xA0, 0xA1, 0xD0, 0xFE, 0xFF] {
                let unit = classify(&[lead, trail]).unwrap();
                let expected = if lead < 0x80 {
                    CodeUnit::Single(lead)
                } else if (0xA1..=0xFE).contains(&lead) && (0xA1..=0xFE).contains(&trail) {
                    CodeUnit::Wide(lead, trail)
                } else {
                    CodeUnit::Undefined(lead)
                };
                assert_eq!(unit, expected);
                assert_eq!(classify(&[lead, trail]), Some(unit));
            }
        }
    }

    #[test]
    fn only_drawable_units_have_a_cell_shape() {
        assert_eq!(CodeUnit::Single(b'A').glyph_class(), Some(GlyphClass::Ascii));
        assert_eq!(CodeUnit::Wide(0xB0, 0xA1).glyph_class(), Some(GlyphClass::Wide));
        assert_eq!(CodeUnit::Undefined(0xB0).glyph_class(), None);
    }

    #[test]
    fn glyph_index_follows_zone_layout() {
        assert_eq!(GB2312.glyph_index(0xA1, 0xA1), Some(0));
        assert_eq!(GB2312.glyph_index(0xA1, 0xFE), Some(93));
        assert_eq!(GB2312.glyph_index(0xA2, 0xA1), Some(94));
        assert_eq!(GB2312.glyph_index(0xB0, 0xA1), Some(94 * 15));
        assert_eq!(GB2312.glyph_index(0xB0, 0x20), None);
    }

    #[test]
    fn glyph_bits_are_msb_first() {
        let mut bitmap = [0u8; WIDE_GLYPH_BYTES];
        bitmap[0] = 0b1000_0001;
        bitmap[1] = 0b0100_0000;
        let glyph = Glyph::new(GlyphClass::Wide, &bitmap).unwrap();

        assert!(glyph.is_set(0, 0));
        assert!(!glyph.is_set(0, 1));
        assert!(glyph.is_set(0, 7));
        assert!(!glyph.is_set(0, 8));
        assert!(glyph.is_set(0, 9));
        assert!(!glyph.is_set(1, 0));
    }

    #[test]
    fn glyph_requires_exact_cell_size() {
        assert!(Glyph::new(GlyphClass::Ascii, &[0u8; 15]).is_none());
        assert!(Glyph::new(GlyphClass::Ascii, &[0u8; 16]).is_some());
        assert!(Glyph::new(GlyphClass::Wide, &[0u8; 16]).is_none());
    }
}
