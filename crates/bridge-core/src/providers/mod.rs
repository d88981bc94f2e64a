//! Provider contracts for the underlying primitives
//!
//! The bridge only orchestrates encodings; the actual cipher, digest and
//! KDF work is done by implementations of these traits. One backend ships
//! with the crate:
//! 1. RustCrypto (`aes-gcm`, `md-5`, `pbkdf2`)

mod traits;
mod rust_crypto;

pub use traits::{CipherOutput, CipherProvider, DigestProvider, KdfAlgorithm, KdfProvider};
pub use rust_crypto::{RustCryptoProvider, IV_LEN, KEY_LEN, TAG_LEN};
