//! AES-256-GCM encryption with encoding negotiation
//!
//! Every value reaching the cipher provider is a string: the key as base64,
//! plaintext as UTF-8 text or base64, ciphertext as base64. This service
//! converts caller data into those forms and converts provider output back
//! into whatever the caller asked for.

use std::sync::Arc;

use tracing::debug;

use crate::encoding::{
    decode_base64, decode_text, encode_text, to_base64, EncryptedDataEncoding, PlainDataEncoding,
};
use crate::error::{BridgeError, ProviderError, Result};
use crate::key_encoder::KeyEncoder;
use crate::providers::CipherProvider;
use crate::types::{DecryptOptions, EncryptOptions, EncryptedData, Payload, Plaintext};

pub struct CipherService {
    provider: Arc<dyn CipherProvider>,
    keys: Arc<KeyEncoder>,
}

impl CipherService {
    pub fn new(provider: Arc<dyn CipherProvider>, keys: Arc<KeyEncoder>) -> Self {
        Self { provider, keys }
    }

    /// Encrypt `data` under `key`
    pub async fn encrypt(
        &self,
        key: &str,
        data: Payload,
        options: EncryptOptions,
    ) -> Result<EncryptedData> {
        let base64_key = self.keys.encode(key);

        let is_binary = data.is_bytes()
            || matches!(
                options.input_encoding,
                PlainDataEncoding::Binary | PlainDataEncoding::Base64
            );

        // Text reaches the provider as given; `binary` and `base64` text are
        // both expected to be base64 already
        let plain_text = match data {
            Payload::Bytes(bytes) => to_base64(&bytes),
            Payload::Text(text) => text,
        };

        debug!(
            is_binary,
            input_encoding = %options.input_encoding,
            output_encoding = ?options.output_encoding,
            "Encrypting"
        );

        let output = self
            .provider
            .encrypt(&plain_text, is_binary, &base64_key)
            .await?;

        let content = match options.output_encoding {
            Some(EncryptedDataEncoding::Base64) => Payload::Text(output.content),
            None | Some(EncryptedDataEncoding::Binary) => {
                Payload::Bytes(provider_base64(&output.content)?)
            }
            Some(encoding) => {
                Payload::Text(encode_text(&provider_base64(&output.content)?, encoding))
            }
        };

        Ok(EncryptedData::new(content, output.iv, output.tag))
    }

    /// Decrypt `data` under `key`
    pub async fn decrypt(
        &self,
        key: &str,
        data: &EncryptedData,
        options: DecryptOptions,
    ) -> Result<Plaintext> {
        let base64_key = self.keys.encode(key);

        let is_binary = options.output_encoding != PlainDataEncoding::Utf8;

        let ciphertext = match (&data.content, options.input_encoding) {
            (Payload::Bytes(bytes), _) => to_base64(bytes),
            (Payload::Text(text), Some(EncryptedDataEncoding::Base64)) => text.clone(),
            (Payload::Text(text), Some(encoding)) => {
                to_base64(&decode_text(text, encoding, "content")?)
            }
            (Payload::Text(_), None) => {
                return Err(BridgeError::InvalidData(
                    "content is text but no input encoding was given".to_string(),
                ))
            }
        };

        debug!(
            is_binary,
            input_encoding = ?options.input_encoding,
            output_encoding = %options.output_encoding,
            "Decrypting"
        );

        let plain = self
            .provider
            .decrypt(&ciphertext, &base64_key, &data.iv, &data.tag, is_binary)
            .await?;

        match options.output_encoding {
            PlainDataEncoding::Binary => Ok(Payload::Bytes(provider_base64(&plain)?)),
            PlainDataEncoding::Base64 | PlainDataEncoding::Utf8 => Ok(Payload::Text(plain)),
        }
    }

    pub fn key_encoder(&self) -> &Arc<KeyEncoder> {
        &self.keys
    }
}

/// Decode base64 produced by the provider
fn provider_base64(text: &str) -> Result<Vec<u8>> {
    decode_base64(text).map_err(|e| {
        ProviderError::cipher(format!("provider returned invalid base64: {}", e)).into()
    })
}
