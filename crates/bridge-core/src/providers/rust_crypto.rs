//! RustCrypto provider backend
//!
//! AES-256-GCM via `aes-gcm`, MD5 via `md-5`, PBKDF2 via `pbkdf2`.
//! Cipher wire format matches the provider contract:
//! - IV: 12 random bytes, base64
//! - Tag: 16 bytes split off the end of the AEAD output, base64
//! - Content: ciphertext without the tag, base64

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use async_trait::async_trait;
use md5::{Digest, Md5};
use rand::RngCore;
use sha2::Sha512;
use tracing::debug;
use zeroize::Zeroizing;

use super::{CipherOutput, CipherProvider, DigestProvider, KdfAlgorithm, KdfProvider};
use crate::encoding::{decode_base64, to_base64};
use crate::error::ProviderError;

/// AES-256 key length in bytes
pub const KEY_LEN: usize = 32;
/// GCM nonce length in bytes
pub const IV_LEN: usize = 12;
/// GCM tag length in bytes
pub const TAG_LEN: usize = 16;

/// Provider backed by the RustCrypto crates
#[derive(Debug, Clone, Copy, Default)]
pub struct RustCryptoProvider;

impl RustCryptoProvider {
    pub fn new() -> Self {
        Self
    }

    fn build_cipher(base64_key: &str) -> Result<Aes256Gcm, ProviderError> {
        let key = Zeroizing::new(decode_b64(base64_key, "key")?);
        if key.len() != KEY_LEN {
            return Err(ProviderError::cipher(format!(
                "invalid key length: expected {}, got {}",
                KEY_LEN,
                key.len()
            )));
        }
        Aes256Gcm::new_from_slice(&key).map_err(|e| ProviderError::cipher(e.to_string()))
    }
}

fn decode_b64(text: &str, what: &str) -> Result<Vec<u8>, ProviderError> {
    decode_base64(text)
        .map_err(|e| ProviderError::cipher(format!("invalid base64 {}: {}", what, e)))
}

#[async_trait]
impl CipherProvider for RustCryptoProvider {
    async fn encrypt(
        &self,
        plain_text: &str,
        is_binary: bool,
        base64_key: &str,
    ) -> Result<CipherOutput, ProviderError> {
        let cipher = Self::build_cipher(base64_key)?;

        let plaintext = if is_binary {
            Zeroizing::new(decode_b64(plain_text, "plaintext")?)
        } else {
            Zeroizing::new(plain_text.as_bytes().to_vec())
        };

        let mut iv = [0u8; IV_LEN];
        rand::thread_rng().fill_bytes(&mut iv);
        let nonce = Nonce::from_slice(&iv);

        // aes-gcm appends the tag to the ciphertext
        let ciphertext_with_tag = cipher
            .encrypt(nonce, plaintext.as_slice())
            .map_err(|e| ProviderError::cipher(format!("encryption failed: {}", e)))?;

        if ciphertext_with_tag.len() < TAG_LEN {
            return Err(ProviderError::cipher("ciphertext too short"));
        }
        let (ciphertext, tag) = ciphertext_with_tag.split_at(ciphertext_with_tag.len() - TAG_LEN);

        debug!(bytes = ciphertext.len(), is_binary, "aes-256-gcm encrypt");

        Ok(CipherOutput {
            iv: to_base64(&iv),
            tag: to_base64(tag),
            content: to_base64(ciphertext),
        })
    }

    async fn decrypt(
        &self,
        base64_ciphertext: &str,
        base64_key: &str,
        iv: &str,
        tag: &str,
        is_binary: bool,
    ) -> Result<String, ProviderError> {
        let cipher = Self::build_cipher(base64_key)?;

        let iv = decode_b64(iv, "iv")?;
        if iv.len() != IV_LEN {
            return Err(ProviderError::cipher(format!(
                "invalid iv length: expected {}, got {}",
                IV_LEN,
                iv.len()
            )));
        }
        let tag = decode_b64(tag, "tag")?;
        if tag.len() != TAG_LEN {
            return Err(ProviderError::cipher(format!(
                "invalid tag length: expected {}, got {}",
                TAG_LEN,
                tag.len()
            )));
        }

        let mut ciphertext_with_tag = decode_b64(base64_ciphertext, "ciphertext")?;
        ciphertext_with_tag.extend_from_slice(&tag);

        let plaintext = Zeroizing::new(
            cipher
                .decrypt(Nonce::from_slice(&iv), ciphertext_with_tag.as_slice())
                .map_err(|_| ProviderError::cipher("authentication failed"))?,
        );

        debug!(bytes = plaintext.len(), is_binary, "aes-256-gcm decrypt");

        if is_binary {
            Ok(to_base64(&plaintext))
        } else {
            String::from_utf8(plaintext.to_vec())
                .map_err(|e| ProviderError::cipher(format!("plaintext is not UTF-8: {}", e)))
        }
    }
}

impl DigestProvider for RustCryptoProvider {
    fn binary_md5(&self, data: &[u8]) -> Result<String, ProviderError> {
        Ok(hex::encode(Md5::digest(data)))
    }

    fn string_md5(&self, data: &str) -> Result<String, ProviderError> {
        self.binary_md5(data.as_bytes())
    }
}

#[async_trait]
impl KdfProvider for RustCryptoProvider {
    async fn hash(
        &self,
        password: &[u8],
        salt: &[u8],
        iterations: u32,
        key_length: usize,
        algorithm: KdfAlgorithm,
    ) -> Result<Vec<u8>, ProviderError> {
        if iterations == 0 {
            return Err(ProviderError::kdf("iterations must be positive"));
        }

        let password = Zeroizing::new(password.to_vec());
        let salt = salt.to_vec();

        // PBKDF2 is CPU bound; keep it off the async workers
        tokio::task::spawn_blocking(move || {
            let mut out = vec![0u8; key_length];
            match algorithm {
                KdfAlgorithm::Sha512 => {
                    pbkdf2::pbkdf2_hmac::<Sha512>(&password, &salt, iterations, &mut out)
                }
            }
            out
        })
        .await
        .map_err(|e| ProviderError::kdf(format!("derivation task failed: {}", e)))
    }
}
