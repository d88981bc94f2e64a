//! Error types for bridge-core

use std::fmt;

use thiserror::Error;

/// Result type alias for bridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Which provider contract raised a [`ProviderError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Cipher,
    Digest,
    Kdf,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProviderKind::Cipher => "cipher",
            ProviderKind::Digest => "digest",
            ProviderKind::Kdf => "kdf",
        };
        f.write_str(name)
    }
}

/// Failure reported by a cipher, digest or KDF provider.
///
/// The bridge never inspects or retries these; they reach the caller as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} provider failed: {message}")]
pub struct ProviderError {
    kind: ProviderKind,
    message: String,
}

impl ProviderError {
    pub fn new(kind: ProviderKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn cipher(message: impl Into<String>) -> Self {
        Self::new(ProviderKind::Cipher, message)
    }

    pub fn digest(message: impl Into<String>) -> Self {
        Self::new(ProviderKind::Digest, message)
    }

    pub fn kdf(message: impl Into<String>) -> Self {
        Self::new(ProviderKind::Kdf, message)
    }

    pub fn kind(&self) -> ProviderKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Bridge error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl BridgeError {
    pub fn is_invalid_key(&self) -> bool {
        matches!(self, BridgeError::InvalidKey(_))
    }

    pub fn is_invalid_data(&self) -> bool {
        matches!(self, BridgeError::InvalidData(_))
    }
}
