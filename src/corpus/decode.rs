//! Text decoding for submission inputs.
//!
//! UTF-8 first, then a single fixed single-byte fallback (windows-1252,
//! the WHATWG mapping of the ISO-8859-1 label). What happens when both
//! fail is the caller's policy, not this module's.

use encoding_rs::WINDOWS_1252;

/// Which decoder accepted the bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Windows1252,
}

impl TextEncoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Windows1252 => "windows-1252",
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("bytes are neither valid UTF-8 nor windows-1252")]
pub struct DecodeError;

/// Decode bytes under the two supported encodings.
///
/// windows-1252 leaves five bytes unassigned (0x81, 0x8D, 0x8F, 0x90,
/// 0x9D), so the fallback can genuinely reject input.
pub fn decode_text(bytes: &[u8]) -> Result<(String, TextEncoding), DecodeError> {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Ok((text.to_owned(), TextEncoding::Utf8));
    }

    match WINDOWS_1252.decode_without_bom_handling_and_without_replacement(bytes) {
        Some(text) => Ok((text.into_owned(), TextEncoding::Windows1252)),
        None => Err(DecodeError),
    }
}
