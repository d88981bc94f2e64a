//! MD5 content fingerprints
//!
//! MD5 is only used to fingerprint content here, never as a security boundary.

use std::sync::Arc;

use tracing::debug;

use crate::encoding::{from_base64, to_base64, HashEncoding};
use crate::error::{ProviderError, Result};
use crate::providers::DigestProvider;
use crate::types::Md5Input;

pub struct HashService {
    provider: Arc<dyn DigestProvider>,
}

impl HashService {
    pub fn new(provider: Arc<dyn DigestProvider>) -> Self {
        Self { provider }
    }

    /// Digest `content` and return it as hex or base64
    pub async fn calc_md5_hash(&self, content: Md5Input, encoding: HashEncoding) -> Result<String> {
        let hex_digest = match content {
            Md5Input::Bytes(bytes) => self.provider.binary_md5(&bytes)?,
            Md5Input::Base64(text) => {
                let bytes = from_base64(&text, "content")?;
                self.provider.binary_md5(&bytes)?
            }
            Md5Input::Utf8(text) => self.provider.string_md5(&text)?,
        };

        debug!(%encoding, "Computed md5 digest");

        match encoding {
            HashEncoding::Hex => Ok(hex_digest),
            HashEncoding::Base64 => {
                let raw = hex::decode(&hex_digest).map_err(|e| {
                    ProviderError::digest(format!("provider returned invalid hex: {}", e))
                })?;
                Ok(to_base64(&raw))
            }
        }
    }
}
