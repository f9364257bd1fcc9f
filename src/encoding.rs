//! Conversion between stored bytes and text.

use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Text encodings understood by the text operations.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// UTF-8 without a byte order mark.
    #[default]
    Utf8,
    /// UTF-8 that writes the `EF BB BF` preamble and strips it when reading.
    Utf8Bom,
    /// UTF-16, little-endian, no byte order mark.
    Utf16Le,
    /// UTF-16, big-endian, no byte order mark.
    Utf16Be,
    /// 7-bit ASCII; anything else turns into `?`.
    Ascii,
}

impl Encoding {
    pub fn name(&self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf-8",
            Encoding::Utf8Bom => "utf-8-bom",
            Encoding::Utf16Le => "utf-16le",
            Encoding::Utf16Be => "utf-16be",
            Encoding::Ascii => "us-ascii",
        }
    }

    /// Bytes written in front of the encoded text.
    pub fn preamble(&self) -> &'static [u8] {
        match self {
            Encoding::Utf8Bom => &UTF8_BOM,
            _ => &[],
        }
    }

    /// Decodes `bytes`; invalid sequences become U+FFFD (`?` for ASCII).
    pub fn decode(&self, bytes: &[u8]) -> String {
        match self {
            Encoding::Utf8 => encoding_rs::UTF_8
                .decode_without_bom_handling(bytes)
                .0
                .into_owned(),
            Encoding::Utf8Bom => encoding_rs::UTF_8
                .decode_without_bom_handling(bytes.strip_prefix(&UTF8_BOM).unwrap_or(bytes))
                .0
                .into_owned(),
            Encoding::Utf16Le => encoding_rs::UTF_16LE
                .decode_without_bom_handling(bytes)
                .0
                .into_owned(),
            Encoding::Utf16Be => encoding_rs::UTF_16BE
                .decode_without_bom_handling(bytes)
                .0
                .into_owned(),
            Encoding::Ascii => bytes
                .iter()
                .map(|&b| if b.is_ascii() { b as char } else { '?' })
                .collect(),
        }
    }

    pub fn encode(&self, text: &str) -> Vec<u8> {
        match self {
            Encoding::Utf8 => text.as_bytes().to_vec(),
            Encoding::Utf8Bom => {
                let mut bytes = Vec::with_capacity(UTF8_BOM.len() + text.len());
                bytes.extend_from_slice(&UTF8_BOM);
                bytes.extend_from_slice(text.as_bytes());
                bytes
            }
            Encoding::Utf16Le => text.encode_utf16().flat_map(u16::to_le_bytes).collect(),
            Encoding::Utf16Be => text.encode_utf16().flat_map(u16::to_be_bytes).collect(),
            Encoding::Ascii => text
                .chars()
                .map(|c| if c.is_ascii() { c as u8 } else { b'?' })
                .collect(),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Encoding {
    type Err = anyhow::Error;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        match label.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Encoding::Utf8),
            "utf-8-bom" | "utf8bom" | "utf-8-sig" => Ok(Encoding::Utf8Bom),
            "utf-16" | "utf-16le" | "utf16le" | "unicode" => Ok(Encoding::Utf16Le),
            "utf-16be" | "utf16be" | "bigendianunicode" => Ok(Encoding::Utf16Be),
            "ascii" | "us-ascii" => Ok(Encoding::Ascii),
            other => Err(anyhow!("unknown encoding: '{}'", other)),
        }
    }
}

/// Decodes `bytes` with `encoding`, or UTF-8 when it is `None`.
pub fn bytes_to_text(bytes: &[u8], encoding: Option<Encoding>) -> String {
    encoding.unwrap_or_default().decode(bytes)
}

/// Encodes `text` with `encoding`, or UTF-8 when it is `None`.
pub fn text_to_bytes(text: &str, encoding: Option<Encoding>) -> Vec<u8> {
    encoding.unwrap_or_default().encode(text)
}

/// Splits `text` at `\r\n`, `\n` and `\r`.
///
/// A trailing line break does not produce an empty last line.
pub fn split_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        match rest.find(['\r', '\n']) {
            Some(i) => {
                lines.push(rest[..i].to_string());
                let separator_len = if rest[i..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[i + separator_len..];
            }
            None => {
                lines.push(rest.to_string());
                break;
            }
        }
    }
    lines
}
