//! Main bridge orchestration

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::crypto::{CipherService, HashService, KeyDerivation};
use crate::encoding::HashEncoding;
use crate::error::{BridgeError, Result};
use crate::key_encoder::KeyEncoder;
use crate::providers::{CipherProvider, DigestProvider, KdfProvider, RustCryptoProvider};
use crate::settings::Settings;
use crate::types::{
    DecryptOptions, EncryptOptions, EncryptedData, Md5Input, Payload, Plaintext, Salt,
};

/// Entry point exposing the four bridge operations
pub struct CryptoBridge {
    cipher: CipherService,
    hashing: HashService,
    derivation: KeyDerivation,
    keys: Arc<KeyEncoder>,
}

impl CryptoBridge {
    /// Create a bridge backed by the RustCrypto provider and default settings
    pub fn new() -> Self {
        let provider = Arc::new(RustCryptoProvider::new());
        Self::build(provider.clone(), provider.clone(), provider, Settings::new())
    }

    /// Create a bridge backed by the RustCrypto provider
    pub fn with_settings(settings: Settings) -> Result<Self> {
        let provider = Arc::new(RustCryptoProvider::new());
        Self::with_providers(provider.clone(), provider.clone(), provider, settings)
    }

    /// Create a bridge over caller-supplied providers
    pub fn with_providers(
        cipher: Arc<dyn CipherProvider>,
        digest: Arc<dyn DigestProvider>,
        kdf: Arc<dyn KdfProvider>,
        settings: Settings,
    ) -> Result<Self> {
        settings.validate()?;
        Ok(Self::build(cipher, digest, kdf, settings))
    }

    fn build(
        cipher: Arc<dyn CipherProvider>,
        digest: Arc<dyn DigestProvider>,
        kdf: Arc<dyn KdfProvider>,
        settings: Settings,
    ) -> Self {
        let keys = Arc::new(KeyEncoder::with_max_entries(settings.key_cache.max_entries));

        debug!(
            max_cached_keys = ?settings.key_cache.max_entries,
            "Creating crypto bridge"
        );

        Self {
            cipher: CipherService::new(cipher, keys.clone()),
            hashing: HashService::new(digest),
            derivation: KeyDerivation::new(kdf, settings.kdf),
            keys,
        }
    }

    /// Derive a key string from a password (see [`KeyDerivation::derive_key`])
    pub async fn derive_key(
        &self,
        password: &str,
        salt: impl Into<Salt>,
        iterations: u32,
    ) -> Result<String> {
        self.derivation
            .derive_key(password, salt.into(), iterations)
            .await
    }

    /// MD5 digest of `content` in the requested encoding
    pub async fn calc_md5_hash(&self, content: Md5Input, encoding: HashEncoding) -> Result<String> {
        self.hashing.calc_md5_hash(content, encoding).await
    }

    pub async fn encrypt(
        &self,
        key: &str,
        data: impl Into<Payload>,
        options: EncryptOptions,
    ) -> Result<EncryptedData> {
        self.cipher.encrypt(key, data.into(), options).await
    }

    pub async fn decrypt(
        &self,
        key: &str,
        data: &EncryptedData,
        options: DecryptOptions,
    ) -> Result<Plaintext> {
        self.cipher.decrypt(key, data, options).await
    }

    /// `encrypt` for loosely typed callers.
    ///
    /// `key` must be a JSON string and `data` a string or an array of bytes;
    /// `options` may be `null` or an options object.
    pub async fn encrypt_value(
        &self,
        key: &Value,
        data: &Value,
        options: &Value,
    ) -> Result<EncryptedData> {
        let key = key_from_value(key)?;
        let data = payload_from_value(data)?;
        let options: EncryptOptions = options_from_value(options)?;
        self.encrypt(key, data, options).await
    }

    /// `decrypt` for loosely typed callers; `data` must be an
    /// EncryptedData-shaped object.
    pub async fn decrypt_value(
        &self,
        key: &Value,
        data: &Value,
        options: &Value,
    ) -> Result<Plaintext> {
        let key = key_from_value(key)?;
        if !data.is_object() {
            return Err(BridgeError::InvalidData(format!(
                "data must be an object, got {}",
                value_kind(data)
            )));
        }
        let data: EncryptedData = serde_json::from_value(data.clone())
            .map_err(|e| BridgeError::InvalidData(format!("malformed encrypted data: {}", e)))?;
        let options: DecryptOptions = options_from_value(options)?;
        self.decrypt(key, &data, options).await
    }

    pub fn key_encoder(&self) -> &KeyEncoder {
        &self.keys
    }
}

impl Default for CryptoBridge {
    fn default() -> Self {
        Self::new()
    }
}

fn key_from_value(key: &Value) -> Result<&str> {
    key.as_str().ok_or_else(|| {
        BridgeError::InvalidKey(format!("key must be a string, got {}", value_kind(key)))
    })
}

fn payload_from_value(data: &Value) -> Result<Payload> {
    match data {
        Value::String(text) => Ok(Payload::Text(text.clone())),
        Value::Array(_) => serde_json::from_value::<Vec<u8>>(data.clone())
            .map(Payload::Bytes)
            .map_err(|e| BridgeError::InvalidData(format!("data is not a byte array: {}", e))),
        other => Err(BridgeError::InvalidData(format!(
            "data must be a string or byte array, got {}",
            value_kind(other)
        ))),
    }
}

fn options_from_value<T>(options: &Value) -> Result<T>
where
    T: serde::de::DeserializeOwned + Default,
{
    if options.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(options.clone())
        .map_err(|e| BridgeError::InvalidData(format!("invalid options: {}", e)))
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
