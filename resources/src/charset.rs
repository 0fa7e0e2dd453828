//! Byte-to-text decoding for the supported character encodings.
//!
//! Decoding is total: every byte sequence produces a string, with
//! U+FFFD standing in for anything that cannot be represented. Use
//! [`Charset::decode_strict`] to reject odd-length UTF-16 input instead.

use std::fmt;
use std::str::FromStr;

use crate::ResourceError;

/// A supported character encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Charset {
    /// Eight-bit UCS Transformation Format.
    #[default]
    Utf8,
    /// Sixteen-bit UCS Transformation Format, byte order identified by an optional BOM.
    Utf16,
    /// Sixteen-bit UCS Transformation Format, big-endian byte order.
    Utf16Be,
    /// Sixteen-bit UCS Transformation Format, little-endian byte order.
    Utf16Le,
    /// ISO Latin Alphabet No. 1.
    Iso8859_1,
    /// Seven-bit ASCII (ISO646-US).
    UsAscii,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ByteOrder {
    Big,
    Little,
}

impl Charset {
    /// Every supported charset.
    pub const ALL: [Charset; 6] = [
        Charset::Utf8,
        Charset::Utf16,
        Charset::Utf16Be,
        Charset::Utf16Le,
        Charset::Iso8859_1,
        Charset::UsAscii,
    ];

    /// Canonical IANA name.
    pub fn name(self) -> &'static str {
        match self {
            Charset::Utf8 => "UTF-8",
            Charset::Utf16 => "UTF-16",
            Charset::Utf16Be => "UTF-16BE",
            Charset::Utf16Le => "UTF-16LE",
            Charset::Iso8859_1 => "ISO-8859-1",
            Charset::UsAscii => "US-ASCII",
        }
    }

    fn is_utf16(self) -> bool {
        matches!(self, Charset::Utf16 | Charset::Utf16Be | Charset::Utf16Le)
    }

    /// Decode `bytes` into text.
    ///
    /// - UTF-8 decodes lossily.
    /// - US-ASCII masks every byte to its low 7 bits.
    /// - ISO-8859-1 maps every byte to the code point of the same value.
    /// - UTF-16BE/LE combine byte pairs into code units without stripping a BOM.
    ///   Unpaired surrogates become U+FFFD, and so does a trailing odd byte.
    /// - UTF-16 strips a leading `FE FF` (big-endian) or `FF FE` (little-endian)
    ///   BOM and otherwise decodes the whole input as big-endian.
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            Charset::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            Charset::UsAscii => bytes.iter().map(|&b| char::from(b & 0x7F)).collect(),
            Charset::Iso8859_1 => bytes.iter().map(|&b| char::from(b)).collect(),
            Charset::Utf16Be => decode_utf16(bytes, ByteOrder::Big),
            Charset::Utf16Le => decode_utf16(bytes, ByteOrder::Little),
            Charset::Utf16 => {
                let (order, body) = split_bom(bytes);
                decode_utf16(body, order)
            }
        }
    }

    /// Like [`decode`](Self::decode), but rejects UTF-16 input with an odd
    /// number of bytes.
    pub fn decode_strict(self, bytes: &[u8]) -> Result<String, ResourceError> {
        if self.is_utf16() && bytes.len() % 2 != 0 {
            return Err(ResourceError::OddLength(bytes.len()));
        }
        Ok(self.decode(bytes))
    }
}

/// Pick the byte order from a UTF-16 BOM, returning the input without it.
///
/// Without a BOM the whole input is big-endian.
fn split_bom(bytes: &[u8]) -> (ByteOrder, &[u8]) {
    match bytes {
        [0xFE, 0xFF, rest @ ..] => (ByteOrder::Big, rest),
        [0xFF, 0xFE, rest @ ..] => (ByteOrder::Little, rest),
        _ => (ByteOrder::Big, bytes),
    }
}

fn decode_utf16(bytes: &[u8], order: ByteOrder) -> String {
    let units = bytes.chunks_exact(2).map(|pair| {
        let pair = [pair[0], pair[1]];
        match order {
            ByteOrder::Big => u16::from_be_bytes(pair),
            ByteOrder::Little => u16::from_le_bytes(pair),
        }
    });

    let mut text: String = char::decode_utf16(units)
        .map(|unit| unit.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect();
    if bytes.len() % 2 != 0 {
        text.push(char::REPLACEMENT_CHARACTER);
    }
    text
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Charset {
    type Err = ResourceError;

    /// Parse a charset name, ignoring case, `-` and `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_uppercase())
            .collect();

        match key.as_str() {
            "UTF8" => Ok(Charset::Utf8),
            "UTF16" => Ok(Charset::Utf16),
            "UTF16BE" => Ok(Charset::Utf16Be),
            "UTF16LE" => Ok(Charset::Utf16Le),
            "ISO88591" | "LATIN1" | "L1" => Ok(Charset::Iso8859_1),
            "USASCII" | "ASCII" => Ok(Charset::UsAscii),
            _ => Err(ResourceError::UnknownCharset(s.to_owned())),
        }
    }
}
