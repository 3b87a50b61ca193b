//! Byte-to-text decoding for raw source files.

use std::borrow::Cow;
use std::path::Path;

use encoding_rs::WINDOWS_1252;
use serde::Serialize;

use crate::error::{IngestError, Result};

/// Encoding a raw file was decoded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TextEncoding {
    #[serde(rename = "utf-8")]
    Utf8,
    /// ISO-8859-1 style single-byte text, decoded as windows-1252.
    #[serde(rename = "latin-1")]
    Latin1,
}

impl TextEncoding {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Latin1 => "latin-1",
        }
    }
}

/// Decode file bytes, falling back to Latin-1 when they are not valid UTF-8.
///
/// A UTF-8 byte order mark is stripped. UTF-16 input is rejected.
pub fn decode_bytes<'a>(bytes: &'a [u8], path: &Path) -> Result<(Cow<'a, str>, TextEncoding)> {
    if bytes.starts_with(&[0xFF, 0xFE]) {
        return Err(IngestError::UnsupportedEncoding {
            path: path.to_path_buf(),
            encoding: "UTF-16 LE",
        });
    }
    if bytes.starts_with(&[0xFE, 0xFF]) {
        return Err(IngestError::UnsupportedEncoding {
            path: path.to_path_buf(),
            encoding: "UTF-16 BE",
        });
    }

    let body = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(bytes);
    match std::str::from_utf8(body) {
        Ok(text) => Ok((Cow::Borrowed(text), TextEncoding::Utf8)),
        Err(_) => {
            let (text, _) = WINDOWS_1252.decode_without_bom_handling(body);
            tracing::debug!(path = %path.display(), "decoded as latin-1");
            Ok((text, TextEncoding::Latin1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_bom_is_stripped() {
        let bytes = b"\xEF\xBB\xBFdate,value\n";
        let (text, encoding) = decode_bytes(bytes, Path::new("a.csv")).unwrap();
        assert_eq!(text, "date,value\n");
        assert_eq!(encoding, TextEncoding::Utf8);
    }

    #[test]
    fn test_latin1_fallback() {
        // "Réunion" with é as 0xE9
        let bytes = b"country\nR\xE9union\n";
        let (text, encoding) = decode_bytes(bytes, Path::new("a.csv")).unwrap();
        assert_eq!(text, "country\nRéunion\n");
        assert_eq!(encoding, TextEncoding::Latin1);
    }

    #[test]
    fn test_utf16_rejected() {
        let bytes = b"\xFF\xFEd\x00";
        let err = decode_bytes(bytes, Path::new("a.csv")).unwrap_err();
        assert!(matches!(
            err,
            IngestError::UnsupportedEncoding {
                encoding: "UTF-16 LE",
                ..
            }
        ));
    }
}
