//! Text encodings for generated files.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Encoding used when persisting generated text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum OutputEncoding {
    /// UTF-8 without byte order mark
    #[default]
    #[serde(rename = "utf-8")]
    Utf8,
    /// UTF-8 with byte order mark
    #[serde(rename = "utf-8-bom")]
    Utf8Bom,
    /// UTF-16 little endian with byte order mark
    #[serde(rename = "utf-16le")]
    Utf16Le,
    /// UTF-16 big endian with byte order mark
    #[serde(rename = "utf-16be")]
    Utf16Be,
}

impl OutputEncoding {
    /// Returns the encoding identifier as used in `altgen.toml`.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputEncoding::Utf8 => "utf-8",
            OutputEncoding::Utf8Bom => "utf-8-bom",
            OutputEncoding::Utf16Le => "utf-16le",
            OutputEncoding::Utf16Be => "utf-16be",
        }
    }

    /// Encode the whole text into a single buffer.
    pub fn encode(&self, text: &str) -> Vec<u8> {
        match self {
            OutputEncoding::Utf8 => text.as_bytes().to_vec(),
            OutputEncoding::Utf8Bom => {
                let mut bytes = Vec::with_capacity(UTF8_BOM.len() + text.len());
                bytes.extend_from_slice(&UTF8_BOM);
                bytes.extend_from_slice(text.as_bytes());
                bytes
            }
            OutputEncoding::Utf16Le => std::iter::once(0xFEFF)
                .chain(text.encode_utf16())
                .flat_map(u16::to_le_bytes)
                .collect(),
            OutputEncoding::Utf16Be => std::iter::once(0xFEFF)
                .chain(text.encode_utf16())
                .flat_map(u16::to_be_bytes)
                .collect(),
        }
    }
}

impl fmt::Display for OutputEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(OutputEncoding::Utf8),
            "utf-8-bom" | "utf8-bom" => Ok(OutputEncoding::Utf8Bom),
            "utf-16le" | "utf-16" | "utf16" => Ok(OutputEncoding::Utf16Le),
            "utf-16be" => Ok(OutputEncoding::Utf16Be),
            _ => Err(format!(
                "unknown encoding '{}', expected one of: utf-8, utf-8-bom, utf-16le, utf-16be",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_utf8() {
        assert_eq!(OutputEncoding::Utf8.encode("hé"), "hé".as_bytes());
        assert_eq!(
            OutputEncoding::Utf8Bom.encode("a"),
            vec![0xEF, 0xBB, 0xBF, b'a']
        );
    }

    #[test]
    fn test_encode_utf16() {
        assert_eq!(OutputEncoding::Utf16Le.encode("A"), vec![0xFF, 0xFE, 0x41, 0x00]);
        assert_eq!(OutputEncoding::Utf16Be.encode("A"), vec![0xFE, 0xFF, 0x00, 0x41]);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("UTF-8".parse::<OutputEncoding>().unwrap(), OutputEncoding::Utf8);
        assert_eq!(
            "utf-16be".parse::<OutputEncoding>().unwrap(),
            OutputEncoding::Utf16Be
        );
        assert!("latin1".parse::<OutputEncoding>().is_err());
    }

    #[test]
    fn test_deserialize() {
        let enc: OutputEncoding = serde_json::from_str(r#""utf-8-bom""#).unwrap();
        assert_eq!(enc, OutputEncoding::Utf8Bom);
        assert_eq!(OutputEncoding::default(), OutputEncoding::Utf8);
    }
}
