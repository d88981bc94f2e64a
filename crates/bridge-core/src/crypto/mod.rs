//! The bridge services
//!
//! This module provides:
//! - AES-256-GCM encryption with encoding negotiation
//! - PBKDF2-HMAC-SHA512 key derivation
//! - MD5 content digests

mod encryption;
mod hashing;
mod key_derivation;

pub use encryption::CipherService;
pub use hashing::HashService;
pub use key_derivation::KeyDerivation;
