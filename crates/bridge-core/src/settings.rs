//! Bridge settings
//!
//! Plain, non-sensitive configuration serialized as camelCase JSON.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{BridgeError, Result};

/// Key cache configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct KeyCacheSettings {
    /// Maximum number of distinct keys kept (None = unbounded)
    pub max_entries: Option<usize>,
}

/// Key derivation configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct KdfSettings {
    /// Derived key length requested from the KDF provider, in bytes
    pub key_length: usize,
    /// Keep only this many characters of the base64 output (None = keep all).
    /// 32 matches keys derived by earlier releases.
    pub truncate_chars: Option<usize>,
}

impl Default for KdfSettings {
    fn default() -> Self {
        Self {
            key_length: 32,
            truncate_chars: Some(32),
        }
    }
}

/// Bridge settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Settings format version
    pub version: u32,
    pub key_cache: KeyCacheSettings,
    pub kdf: KdfSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

impl Settings {
    /// Create default settings
    pub fn new() -> Self {
        Self {
            version: 1,
            key_cache: KeyCacheSettings::default(),
            kdf: KdfSettings::default(),
        }
    }

    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(contents: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(contents)
            .map_err(|e| BridgeError::InvalidData(format!("invalid settings: {}", e)))?;
        settings.validate()?;
        debug!(version = settings.version, "Loaded bridge settings");
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| BridgeError::InvalidData(format!("invalid settings: {}", e)))
    }

    pub fn validate(&self) -> Result<()> {
        if self.kdf.key_length == 0 {
            return Err(BridgeError::InvalidData(
                "kdf.keyLength must be positive".to_string(),
            ));
        }
        if self.key_cache.max_entries == Some(0) {
            return Err(BridgeError::InvalidData(
                "keyCache.maxEntries must be positive when set".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default() {
        let settings = Settings::new();
        assert_eq!(settings.version, 1);
        assert_eq!(settings.kdf.key_length, 32);
        assert_eq!(settings.kdf.truncate_chars, Some(32));
        assert_eq!(settings.key_cache.max_entries, None);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{"keyCache": {"maxEntries": 64}}"#).unwrap();
        assert_eq!(settings.key_cache.max_entries, Some(64));
        assert_eq!(settings.kdf, KdfSettings::default());
    }

    #[test]
    fn test_disable_truncation() {
        let settings = Settings::from_json(r#"{"kdf": {"truncateChars": null}}"#).unwrap();
        assert_eq!(settings.kdf.truncate_chars, None);
        assert_eq!(settings.kdf.key_length, 32);
    }

    #[test]
    fn test_json_roundtrip() {
        let mut settings = Settings::new();
        settings.key_cache.max_entries = Some(10);
        let parsed = Settings::from_json(&settings.to_json().unwrap()).unwrap();
        assert_eq!(parsed, settings);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        assert!(Settings::from_json("not json").is_err());
        assert!(Settings::from_json(r#"{"kdf": {"keyLength": 0}}"#).is_err());
        assert!(Settings::from_json(r#"{"keyCache": {"maxEntries": 0}}"#).is_err());
    }
}
