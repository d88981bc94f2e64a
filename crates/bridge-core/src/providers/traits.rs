//! Provider trait definitions

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

/// What a cipher provider returns from `encrypt`; every field is base64
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CipherOutput {
    pub iv: String,
    pub tag: String,
    pub content: String,
}

/// AES-256-GCM backend
#[async_trait]
pub trait CipherProvider: Send + Sync {
    /// Encrypt `plain_text` under `base64_key`.
    ///
    /// When `is_binary` is true `plain_text` is base64 of the real plaintext
    /// bytes, otherwise it is the plaintext itself as UTF-8.
    async fn encrypt(
        &self,
        plain_text: &str,
        is_binary: bool,
        base64_key: &str,
    ) -> std::result::Result<CipherOutput, ProviderError>;

    /// Decrypt base64 ciphertext. Returns base64 of the plaintext bytes when
    /// `is_binary` is true, otherwise the plaintext as text.
    async fn decrypt(
        &self,
        base64_ciphertext: &str,
        base64_key: &str,
        iv: &str,
        tag: &str,
        is_binary: bool,
    ) -> std::result::Result<String, ProviderError>;
}

/// MD5 backend; both methods return lowercase hex
pub trait DigestProvider: Send + Sync {
    fn binary_md5(&self, data: &[u8]) -> std::result::Result<String, ProviderError>;

    fn string_md5(&self, data: &str) -> std::result::Result<String, ProviderError>;
}

/// PRF named in a KDF request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum KdfAlgorithm {
    Sha512,
}

/// PBKDF2 backend
#[async_trait]
pub trait KdfProvider: Send + Sync {
    async fn hash(
        &self,
        password: &[u8],
        salt: &[u8],
        iterations: u32,
        key_length: usize,
        algorithm: KdfAlgorithm,
    ) -> std::result::Result<Vec<u8>, ProviderError>;
}
