//! Password-based key derivation using PBKDF2-HMAC-SHA512

use std::sync::Arc;

use tracing::debug;
use zeroize::Zeroizing;

use crate::encoding::{from_hex, to_base64};
use crate::error::{BridgeError, Result};
use crate::providers::{KdfAlgorithm, KdfProvider};
use crate::settings::KdfSettings;
use crate::types::Salt;

/// Turns a password, salt and iteration count into a key string
pub struct KeyDerivation {
    provider: Arc<dyn KdfProvider>,
    settings: KdfSettings,
}

impl KeyDerivation {
    pub fn new(provider: Arc<dyn KdfProvider>, settings: KdfSettings) -> Self {
        Self { provider, settings }
    }

    /// Derive a key string from `password`.
    ///
    /// The derived bytes are base64 encoded and, with default settings, cut
    /// to their first 32 base64 characters. That truncation is what earlier
    /// releases produced, so keys derived before stay valid.
    pub async fn derive_key(&self, password: &str, salt: Salt, iterations: u32) -> Result<String> {
        if iterations == 0 {
            return Err(BridgeError::InvalidData(
                "iterations must be positive".to_string(),
            ));
        }

        let salt = match salt {
            Salt::Bytes(bytes) => bytes,
            Salt::Hex(text) => from_hex(&text, "salt")?,
        };

        debug!(
            iterations,
            salt_len = salt.len(),
            key_length = self.settings.key_length,
            "Deriving key"
        );

        let derived = Zeroizing::new(
            self.provider
                .hash(
                    password.as_bytes(),
                    &salt,
                    iterations,
                    self.settings.key_length,
                    KdfAlgorithm::Sha512,
                )
                .await?,
        );

        let encoded = to_base64(&derived);
        Ok(match self.settings.truncate_chars {
            Some(limit) => encoded.chars().take(limit).collect(),
            None => encoded,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use crate::providers::RustCryptoProvider;
    use async_trait::async_trait;
    use std::sync::Mutex;

    fn derivation() -> KeyDerivation {
        KeyDerivation::new(Arc::new(RustCryptoProvider::new()), KdfSettings::default())
    }

    fn is_base64_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '+' || c == '/' || c == '='
    }

    /// Records every request and answers with a fixed byte pattern
    #[derive(Default)]
    struct RecordingKdf {
        calls: Mutex<Vec<(Vec<u8>, Vec<u8>, u32, usize, KdfAlgorithm)>>,
    }

    #[async_trait]
    impl KdfProvider for RecordingKdf {
        async fn hash(
            &self,
            password: &[u8],
            salt: &[u8],
            iterations: u32,
            key_length: usize,
            algorithm: KdfAlgorithm,
        ) -> std::result::Result<Vec<u8>, ProviderError> {
            self.calls.lock().unwrap().push((
                password.to_vec(),
                salt.to_vec(),
                iterations,
                key_length,
                algorithm,
            ));
            Ok((0..key_length as u8).collect())
        }
    }

    struct FailingKdf;

    #[async_trait]
    impl KdfProvider for FailingKdf {
        async fn hash(
            &self,
            _password: &[u8],
            _salt: &[u8],
            _iterations: u32,
            _key_length: usize,
            _algorithm: KdfAlgorithm,
        ) -> std::result::Result<Vec<u8>, ProviderError> {
            Err(ProviderError::kdf("hardware module unavailable"))
        }
    }

    #[tokio::test]
    async fn test_output_is_32_base64_chars() {
        let key = derivation()
            .derive_key("test-password", Salt::Hex("a1b2c3d4".into()), 1000)
            .await
            .unwrap();

        assert_eq!(key.len(), 32);
        assert!(key.chars().all(is_base64_char));
    }

    #[tokio::test]
    async fn test_derive_key_deterministic() {
        let kd = derivation();
        let salt = Salt::Bytes(b"fixed-salt".to_vec());

        let a = kd.derive_key("pw", salt.clone(), 100).await.unwrap();
        let b = kd.derive_key("pw", salt, 100).await.unwrap();

        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_different_salts_give_different_keys() {
        let kd = derivation();

        let a = kd.derive_key("pw", Salt::Hex("00".into()), 100).await.unwrap();
        let b = kd.derive_key("pw", Salt::Hex("01".into()), 100).await.unwrap();

        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_hex_salt_matches_byte_salt() {
        let kd = derivation();

        let from_hex = kd
            .derive_key("pw", Salt::Hex("deadbeef".into()), 10)
            .await
            .unwrap();
        let from_bytes = kd
            .derive_key("pw", Salt::Bytes(vec![0xde, 0xad, 0xbe, 0xef]), 10)
            .await
            .unwrap();

        assert_eq!(from_hex, from_bytes);
    }

    #[tokio::test]
    async fn test_known_answer_is_prefix_of_full_encoding() {
        // PBKDF2-HMAC-SHA512("password", "salt", 1), first 32 bytes
        let full = to_base64(
            &hex::decode("867f70cf1ade02cff3752599a3a53dc4af34c7a669815ae5d513554e1c8cf252")
                .unwrap(),
        );

        let key = derivation()
            .derive_key("password", Salt::Bytes(b"salt".to_vec()), 1)
            .await
            .unwrap();

        assert_eq!(key, full[..32]);
    }

    #[tokio::test]
    async fn test_provider_request_shape() {
        let provider = Arc::new(RecordingKdf::default());
        let kd = KeyDerivation::new(provider.clone(), KdfSettings::default());

        kd.derive_key("pw", Salt::Hex("0a0b".into()), 7).await.unwrap();

        let calls = provider.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0],
            (b"pw".to_vec(), vec![0x0a, 0x0b], 7, 32, KdfAlgorithm::Sha512)
        );
    }

    #[tokio::test]
    async fn test_truncation_can_be_disabled() {
        let settings = KdfSettings {
            truncate_chars: None,
            ..KdfSettings::default()
        };
        let kd = KeyDerivation::new(Arc::new(RustCryptoProvider::new()), settings);

        let key = kd.derive_key("pw", Salt::Hex("00".into()), 1).await.unwrap();
        assert_eq!(key.len(), 44);
    }

    #[tokio::test]
    async fn test_invalid_hex_salt_fails_before_provider() {
        let provider = Arc::new(RecordingKdf::default());
        let kd = KeyDerivation::new(provider.clone(), KdfSettings::default());

        let err = kd
            .derive_key("pw", Salt::Hex("not-hex".into()), 1)
            .await
            .unwrap_err();

        assert!(err.is_invalid_data());
        assert!(provider.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_zero_iterations_rejected() {
        let err = derivation()
            .derive_key("pw", Salt::Hex("00".into()), 0)
            .await
            .unwrap_err();
        assert!(err.is_invalid_data());
    }

    #[tokio::test]
    async fn test_provider_failure_propagates() {
        let kd = KeyDerivation::new(Arc::new(FailingKdf), KdfSettings::default());

        let err = kd.derive_key("pw", Salt::Hex("00".into()), 1).await.unwrap_err();
        assert_eq!(
            err,
            BridgeError::Provider(ProviderError::kdf("hardware module unavailable"))
        );
    }
}
