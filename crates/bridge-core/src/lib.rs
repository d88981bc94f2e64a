//! # bridge-core
//!
//! Uniform, encoding-aware API over three primitives:
//! - AES-256-GCM encryption and decryption
//! - MD5 content digests
//! - PBKDF2-HMAC-SHA512 key derivation
//!
//! Callers hand in raw bytes, base64, hex or UTF-8 text; the bridge converts
//! them to exactly what the provider contracts expect and converts results
//! back into the encoding the caller asked for.

pub mod crypto;
pub mod encoding;
pub mod error;
pub mod key_encoder;
pub mod providers;
pub mod settings;
pub mod types;
mod bridge;

pub use bridge::CryptoBridge;
pub use crypto::{CipherService, HashService, KeyDerivation};
pub use encoding::{EncryptedDataEncoding, HashEncoding, PlainDataEncoding};
pub use error::{BridgeError, ProviderError, ProviderKind, Result};
pub use key_encoder::KeyEncoder;
pub use providers::{
    CipherOutput, CipherProvider, DigestProvider, KdfAlgorithm, KdfProvider, RustCryptoProvider,
};
pub use settings::{KdfSettings, KeyCacheSettings, Settings};
pub use types::{
    DecryptOptions, EncryptOptions, EncryptedData, Md5Input, Payload, Plaintext, Salt, ALGORITHM,
};
