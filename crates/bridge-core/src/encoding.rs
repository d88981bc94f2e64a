//! Encoding names and the byte/text codecs behind them
//!
//! Ciphertext text rules follow what byte-oriented runtimes do:
//! - `binary` text is latin1: one char per byte, code points truncated to 8 bits
//! - `utf8` rendering of arbitrary bytes is lossy (invalid sequences become U+FFFD)
//! - `hex` is lowercase on output and case-insensitive on input
//! - `base64` is the standard alphabet with padding

use std::fmt;
use std::str::FromStr;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::error::{BridgeError, Result};

/// How caller-supplied plaintext is interpreted before encryption,
/// and how decrypted plaintext is handed back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlainDataEncoding {
    #[default]
    Utf8,
    Binary,
    Base64,
}

/// How `EncryptedData::content` is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncryptedDataEncoding {
    Base64,
    Hex,
    Binary,
    Utf8,
}

/// Output encoding of an MD5 digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashEncoding {
    #[default]
    Base64,
    Hex,
}

macro_rules! impl_encoding_names {
    ($ty:ty { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = BridgeError;

            fn from_str(s: &str) -> Result<Self> {
                match s {
                    $($name => Ok(Self::$variant),)+
                    other => Err(BridgeError::InvalidData(format!(
                        "unknown {} '{}'",
                        stringify!($ty),
                        other
                    ))),
                }
            }
        }
    };
}

impl_encoding_names!(PlainDataEncoding {
    Utf8 => "utf8",
    Binary => "binary",
    Base64 => "base64",
});

impl_encoding_names!(EncryptedDataEncoding {
    Base64 => "base64",
    Hex => "hex",
    Binary => "binary",
    Utf8 => "utf8",
});

impl_encoding_names!(HashEncoding {
    Base64 => "base64",
    Hex => "hex",
});

pub fn to_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode standard base64, leaving the error kind to the caller
pub fn decode_base64(text: &str) -> std::result::Result<Vec<u8>, base64::DecodeError> {
    STANDARD.decode(text)
}

/// Decode caller-supplied base64; `what` names the field in the error message.
pub fn from_base64(text: &str, what: &str) -> Result<Vec<u8>> {
    decode_base64(text)
        .map_err(|e| BridgeError::InvalidData(format!("{} is not valid base64: {}", what, e)))
}

pub fn from_hex(text: &str, what: &str) -> Result<Vec<u8>> {
    hex::decode(text)
        .map_err(|e| BridgeError::InvalidData(format!("{} is not valid hex: {}", what, e)))
}

pub fn latin1_to_bytes(text: &str) -> Vec<u8> {
    text.chars().map(|c| c as u32 as u8).collect()
}

pub fn bytes_to_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Decode text written in `encoding` into raw bytes.
pub fn decode_text(text: &str, encoding: EncryptedDataEncoding, what: &str) -> Result<Vec<u8>> {
    match encoding {
        EncryptedDataEncoding::Base64 => from_base64(text, what),
        EncryptedDataEncoding::Hex => from_hex(text, what),
        EncryptedDataEncoding::Binary => Ok(latin1_to_bytes(text)),
        EncryptedDataEncoding::Utf8 => Ok(text.as_bytes().to_vec()),
    }
}

/// Render raw bytes as text in `encoding`.
pub fn encode_text(bytes: &[u8], encoding: EncryptedDataEncoding) -> String {
    match encoding {
        EncryptedDataEncoding::Base64 => to_base64(bytes),
        EncryptedDataEncoding::Hex => hex::encode(bytes),
        EncryptedDataEncoding::Binary => bytes_to_latin1(bytes),
        EncryptedDataEncoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_parse_and_display() {
        for name in ["utf8", "binary", "base64"] {
            let enc: PlainDataEncoding = name.parse().unwrap();
            assert_eq!(enc.to_string(), name);
        }
        for name in ["base64", "hex", "binary", "utf8"] {
            let enc: EncryptedDataEncoding = name.parse().unwrap();
            assert_eq!(enc.as_str(), name);
        }
        assert_eq!("hex".parse::<HashEncoding>().unwrap(), HashEncoding::Hex);
    }

    #[test]
    fn test_unknown_name_is_invalid_data() {
        let err = "latin9".parse::<EncryptedDataEncoding>().unwrap_err();
        assert!(err.is_invalid_data());
        assert!("hex".parse::<PlainDataEncoding>().is_err());
    }

    #[test]
    fn test_default_plain_encoding_is_utf8() {
        assert_eq!(PlainDataEncoding::default(), PlainDataEncoding::Utf8);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&EncryptedDataEncoding::Hex).unwrap();
        assert_eq!(json, "\"hex\"");
        let parsed: PlainDataEncoding = serde_json::from_str("\"base64\"").unwrap();
        assert_eq!(parsed, PlainDataEncoding::Base64);
    }

    #[test]
    fn test_latin1_covers_every_byte() {
        let bytes: Vec<u8> = (0..=255).collect();
        let text = bytes_to_latin1(&bytes);
        assert_eq!(text.chars().count(), 256);
        assert_eq!(latin1_to_bytes(&text), bytes);
    }

    #[test]
    fn test_latin1_truncates_wide_chars() {
        // U+0141 truncates to 0x41
        assert_eq!(latin1_to_bytes("\u{0141}"), vec![0x41]);
    }

    #[test]
    fn test_utf8_rendering_is_lossy() {
        let text = encode_text(&[0x68, 0xff, 0x69], EncryptedDataEncoding::Utf8);
        assert_eq!(text, "h\u{fffd}i");
    }

    #[test]
    fn test_decode_text_rejects_malformed_input() {
        assert!(decode_text("zz", EncryptedDataEncoding::Hex, "content")
            .unwrap_err()
            .is_invalid_data());
        assert!(decode_text("@@@", EncryptedDataEncoding::Base64, "content")
            .unwrap_err()
            .is_invalid_data());
    }

    #[test]
    fn test_encode_text_formats() {
        let bytes = b"\x00\x01hi";
        assert_eq!(encode_text(bytes, EncryptedDataEncoding::Hex), "00016869");
        assert_eq!(encode_text(bytes, EncryptedDataEncoding::Base64), "AAFoaQ==");
        assert_eq!(
            decode_text("00016869", EncryptedDataEncoding::Hex, "x").unwrap(),
            bytes.to_vec()
        );
    }
}
