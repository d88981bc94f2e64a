//! Values crossing the bridge API

use serde::{Deserialize, Serialize};

use crate::encoding::{EncryptedDataEncoding, PlainDataEncoding};

/// Algorithm identifier stamped on every [`EncryptedData`]
pub const ALGORITHM: &str = "aes-256-gcm";

/// Caller data that is either raw bytes or a text string.
///
/// Serialized untagged: bytes as a JSON array of integers, text as a JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    Bytes(Vec<u8>),
    Text(String),
}

impl Payload {
    pub fn is_bytes(&self) -> bool {
        matches!(self, Payload::Bytes(_))
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Payload::Bytes(bytes) => Some(bytes),
            Payload::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Text(text) => Some(text),
            Payload::Bytes(_) => None,
        }
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Payload::Bytes(bytes)
    }
}

impl From<&[u8]> for Payload {
    fn from(bytes: &[u8]) -> Self {
        Payload::Bytes(bytes.to_vec())
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Payload::Text(text)
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Payload::Text(text.to_string())
    }
}

/// Decrypted plaintext as handed back to the caller
pub type Plaintext = Payload;

/// Output of `encrypt`, input of `decrypt`.
///
/// `iv` and `tag` are always base64, whatever the encoding of `content`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedData {
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
    pub content: Payload,
    pub iv: String,
    pub tag: String,
}

fn default_algorithm() -> String {
    ALGORITHM.to_string()
}

impl EncryptedData {
    pub fn new(content: Payload, iv: String, tag: String) -> Self {
        Self {
            algorithm: default_algorithm(),
            content,
            iv,
            tag,
        }
    }
}

/// Content handed to `calc_md5_hash`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Md5Input {
    /// Raw bytes, digested as-is
    Bytes(Vec<u8>),
    /// Base64 text, decoded before digesting
    Base64(String),
    /// UTF-8 text, digested through the provider's string contract
    Utf8(String),
}

impl From<Vec<u8>> for Md5Input {
    fn from(bytes: Vec<u8>) -> Self {
        Md5Input::Bytes(bytes)
    }
}

impl From<&[u8]> for Md5Input {
    fn from(bytes: &[u8]) -> Self {
        Md5Input::Bytes(bytes.to_vec())
    }
}

/// Salt handed to `derive_key`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Salt {
    Bytes(Vec<u8>),
    /// Hex text, decoded to bytes first
    Hex(String),
}

impl From<Vec<u8>> for Salt {
    fn from(bytes: Vec<u8>) -> Self {
        Salt::Bytes(bytes)
    }
}

impl From<&[u8]> for Salt {
    fn from(bytes: &[u8]) -> Self {
        Salt::Bytes(bytes.to_vec())
    }
}

impl From<&str> for Salt {
    fn from(hex: &str) -> Self {
        Salt::Hex(hex.to_string())
    }
}

/// Options for `encrypt`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptOptions {
    /// Encoding of the returned `content`; `None` returns raw bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_encoding: Option<EncryptedDataEncoding>,
    /// How text plaintext is interpreted
    #[serde(default)]
    pub input_encoding: PlainDataEncoding,
}

impl EncryptOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output_encoding(mut self, encoding: EncryptedDataEncoding) -> Self {
        self.output_encoding = Some(encoding);
        self
    }

    pub fn with_input_encoding(mut self, encoding: PlainDataEncoding) -> Self {
        self.input_encoding = encoding;
        self
    }
}

/// Options for `decrypt`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecryptOptions {
    /// Form of the returned plaintext
    #[serde(default)]
    pub output_encoding: PlainDataEncoding,
    /// Encoding of `EncryptedData::content` when it is text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_encoding: Option<EncryptedDataEncoding>,
}

impl DecryptOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output_encoding(mut self, encoding: PlainDataEncoding) -> Self {
        self.output_encoding = encoding;
        self
    }

    pub fn with_input_encoding(mut self, encoding: EncryptedDataEncoding) -> Self {
        self.input_encoding = Some(encoding);
        self
    }

    /// Mirror the output side of an encrypt call as this call's input side
    pub fn mirroring(encrypt: &EncryptOptions) -> Self {
        Self {
            output_encoding: PlainDataEncoding::Utf8,
            input_encoding: encrypt.output_encoding,
        }
    }
}
