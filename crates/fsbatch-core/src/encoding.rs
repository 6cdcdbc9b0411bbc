//! Text encodings for file content operations.

use std::fmt::Write as _;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{OpError, OpResult};

/// Text encoding applied when reading or writing file content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// UTF-8 (the default).
    #[default]
    Utf8,
    /// 7-bit ASCII.
    Ascii,
    /// ISO-8859-1; maps bytes 1:1 to U+0000..U+00FF.
    Latin1,
    /// Little-endian UTF-16.
    Utf16Le,
    /// Lowercase hex digit pairs.
    Hex,
}

impl Encoding {
    /// Parse an encoding label (case-insensitive).
    pub fn parse(label: &str) -> OpResult<Self> {
        match label.to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Ok(Self::Utf8),
            "ascii" => Ok(Self::Ascii),
            "latin1" | "binary" => Ok(Self::Latin1),
            "utf16le" | "utf-16le" | "ucs2" | "ucs-2" => Ok(Self::Utf16Le),
            "hex" => Ok(Self::Hex),
            _ => Err(OpError::UnknownEncoding {
                name: label.to_string(),
            }),
        }
    }

    /// Canonical label for this encoding.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Utf8 => "utf8",
            Self::Ascii => "ascii",
            Self::Latin1 => "latin1",
            Self::Utf16Le => "utf16le",
            Self::Hex => "hex",
        }
    }

    /// Decode file bytes into text.
    pub fn decode(self, bytes: &[u8], path: &Path) -> OpResult<String> {
        let decode_err = || OpError::Decode {
            encoding: self.as_str(),
            path: path.to_path_buf(),
        };
        match self {
            Self::Utf8 => String::from_utf8(bytes.to_vec()).map_err(|_| decode_err()),
            Self::Ascii => {
                if bytes.is_ascii() {
                    Ok(String::from_utf8_lossy(bytes).into_owned())
                } else {
                    Err(decode_err())
                }
            }
            Self::Latin1 => Ok(bytes.iter().map(|&byte| char::from(byte)).collect()),
            Self::Utf16Le => {
                if bytes.len() % 2 != 0 {
                    return Err(decode_err());
                }
                let units: Vec<u16> = bytes
                    .chunks_exact(2)
                    .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                    .collect();
                String::from_utf16(&units).map_err(|_| decode_err())
            }
            Self::Hex => {
                let mut out = String::with_capacity(bytes.len() * 2);
                for byte in bytes {
                    let _ = write!(out, "{byte:02x}");
                }
                Ok(out)
            }
        }
    }

    /// Encode text into file bytes.
    pub fn encode(self, text: &str) -> OpResult<Vec<u8>> {
        let encode_err = |reason: String| OpError::Encode {
            encoding: self.as_str(),
            reason,
        };
        match self {
            Self::Utf8 => Ok(text.as_bytes().to_vec()),
            Self::Ascii => {
                if text.is_ascii() {
                    Ok(text.as_bytes().to_vec())
                } else {
                    Err(encode_err("contains non-ASCII characters".to_string()))
                }
            }
            Self::Latin1 => text
                .chars()
                .map(|ch| {
                    u8::try_from(u32::from(ch))
                        .map_err(|_| encode_err(format!("'{ch}' is outside latin1")))
                })
                .collect(),
            Self::Utf16Le => Ok(text
                .encode_utf16()
                .flat_map(|unit| unit.to_le_bytes())
                .collect()),
            Self::Hex => {
                if text.len() % 2 != 0 {
                    return Err(encode_err("odd number of hex digits".to_string()));
                }
                text.as_bytes()
                    .chunks_exact(2)
                    .map(|pair| {
                        let digits = std::str::from_utf8(pair)
                            .map_err(|_| encode_err("non-hex input".to_string()))?;
                        u8::from_str_radix(digits, 16)
                            .map_err(|_| encode_err(format!("'{digits}' is not a hex pair")))
                    })
                    .collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path() -> &'static Path {
        Path::new("/test/file")
    }

    #[test]
    fn test_parse_labels_case_insensitive() {
        assert_eq!(Encoding::parse("UTF8").unwrap(), Encoding::Utf8);
        assert_eq!(Encoding::parse("utf-8").unwrap(), Encoding::Utf8);
        assert_eq!(Encoding::parse("binary").unwrap(), Encoding::Latin1);
        assert_eq!(Encoding::parse("UCS2").unwrap(), Encoding::Utf16Le);
        assert!(matches!(
            Encoding::parse("ebcdic").unwrap_err(),
            OpError::UnknownEncoding { .. }
        ));
    }

    #[test]
    fn test_utf8_round_trip_and_rejection() {
        let bytes = Encoding::Utf8.encode("héllo").unwrap();
        assert_eq!(Encoding::Utf8.decode(&bytes, path()).unwrap(), "héllo");
        assert!(Encoding::Utf8.decode(&[0xff, 0xfe], path()).is_err());
    }

    #[test]
    fn test_ascii_rejects_high_bytes() {
        assert!(Encoding::Ascii.encode("héllo").is_err());
        assert!(Encoding::Ascii.decode(&[0x80], path()).is_err());
        assert_eq!(Encoding::Ascii.decode(b"plain", path()).unwrap(), "plain");
    }

    #[test]
    fn test_latin1_round_trips_all_bytes() {
        let bytes: Vec<u8> = (0..=255).collect();
        let text = Encoding::Latin1.decode(&bytes, path()).unwrap();
        assert_eq!(Encoding::Latin1.encode(&text).unwrap(), bytes);
        assert!(Encoding::Latin1.encode("\u{0100}").is_err());
    }

    #[test]
    fn test_utf16le_round_trip() {
        let bytes = Encoding::Utf16Le.encode("héllo ☃").unwrap();
        assert_eq!(
            Encoding::Utf16Le.decode(&bytes, path()).unwrap(),
            "héllo ☃"
        );
        // odd length cannot be utf16
        assert!(Encoding::Utf16Le.decode(&bytes[..3], path()).is_err());
    }

    #[test]
    fn test_hex_rendering_and_parsing() {
        assert_eq!(
            Encoding::Hex.decode(&[0xde, 0xad], path()).unwrap(),
            "dead"
        );
        assert_eq!(Encoding::Hex.encode("dead").unwrap(), vec![0xde, 0xad]);
        assert!(Encoding::Hex.encode("abc").is_err());
        assert!(Encoding::Hex.encode("zz").is_err());
    }
}
