//! Conversion of arbitrary source encodings into GB2312 bytes.
//!
//! Conversion goes through the GBK encoder, whose two-byte range is a
//! superset of GB2312. Characters that only exist in GBK come out with lead
//! or trail bytes outside the registered GB2312 ranges and are later
//! classified as undefined by the renderer.

use encoding_rs::{EncoderResult, Encoding, GBK};
use log::debug;

use crate::error::EncodingError;

/// Encoding consumed directly by the glyph store.
pub const NATIVE_ENCODING: &str = "GB2312";

/// Initial size of a display's conversion scratch buffer.
pub const DEFAULT_SCRATCH_BYTES: usize = 1024;

/// Whether `label` names the native encoding (ASCII case-insensitive).
pub fn is_native(label: &str) -> bool {
    label.trim().eq_ignore_ascii_case(NATIVE_ENCODING)
}

/// Converts `src`, encoded as `label`, into GB2312 bytes at the start of
/// `scratch`.
///
/// `scratch` grows when the converted text does not fit. Returns the number
/// of bytes written. On error the scratch contents are unspecified.
pub fn to_gb2312(label: &str, src: &[u8], scratch: &mut Vec<u8>) -> Result<usize, EncodingError> {
    let encoding = Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| EncodingError::UnknownLabel(label.to_owned()))?;

    let text = encoding
        .decode_without_bom_handling_and_without_replacement(src)
        .ok_or(EncodingError::Malformed {
            label: encoding.name(),
        })?;

    if scratch.is_empty() {
        scratch.resize(DEFAULT_SCRATCH_BYTES, 0);
    }

    let mut encoder = GBK.new_encoder();
    let mut read = 0usize;
    let mut written = 0usize;
    loop {
        let (result, consumed, produced) =
            encoder.encode_from_utf8_without_replacement(&text[read..], &mut scratch[written..], true);
        read += consumed;
        written += produced;

        match result {
            EncoderResult::InputEmpty => break,
            EncoderResult::OutputFull => {
                let grown = scratch.len() * 2;
                debug!("conversion scratch grows {} -> {grown} bytes", scratch.len());
                scratch.resize(grown, 0);
            }
            EncoderResult::Unmappable(c) => return Err(EncodingError::Unmappable(c)),
        }
    }

    debug!("converted {} {} bytes to {written} GB2312 bytes", src.len(), encoding.name());
    Ok(written)
}
