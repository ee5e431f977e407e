//! Cipher suite selection.
//!
//! The suite is never negotiated with a peer. Each deployment picks one, by
//! default [`CipherSuite::Standard`]; [`CipherSuite::Legacy`] exists only to
//! interoperate with clients that still speak the original wire format.
//!
//! ```json
//! { "suite": "legacy" }
//! ```
//!
//! `SHIELDTALK_SUITE=standard|legacy` overrides whatever the JSON says.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::CryptoError;

/// Environment variable that overrides the configured suite.
pub const SUITE_ENV_VAR: &str = "SHIELDTALK_SUITE";

/// The fixed algorithm pairing used for key wrapping and message encryption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
#[cfg_attr(feature = "uniffi-bindgen", derive(uniffi::Enum))]
pub enum CipherSuite {
    /// RSA-OAEP (SHA-256) key wrapping, AES-256-GCM messages with a random nonce.
    #[default]
    Standard,
    /// RSA PKCS#1 v1.5 key wrapping, AES-256-ECB/PKCS#7 messages.
    ///
    /// Deterministic and unauthenticated. Only for talking to old clients.
    Legacy,
}

impl CipherSuite {
    pub fn name(self) -> &'static str {
        match self {
            CipherSuite::Standard => "standard",
            CipherSuite::Legacy => "legacy",
        }
    }
}

impl std::fmt::Display for CipherSuite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CipherSuite {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(CipherSuite::Standard),
            "legacy" => Ok(CipherSuite::Legacy),
            other => Err(CryptoError::InvalidConfig(format!(
                "unknown cipher suite {other:?} (expected \"standard\" or \"legacy\")"
            ))),
        }
    }
}

impl TryFrom<String> for CipherSuite {
    type Error = CryptoError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Configuration for the operations table and the method channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BridgeConfig {
    pub suite: CipherSuite,
}

impl BridgeConfig {
    pub fn new(suite: CipherSuite) -> Self {
        Self { suite }
    }

    /// Parse a JSON configuration document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, CryptoError> {
        serde_json::from_str(json).map_err(|e| CryptoError::InvalidConfig(e.to_string()))
    }

    /// Load a JSON configuration file, then apply the environment override.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CryptoError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            CryptoError::InvalidConfig(format!("failed to read {}: {e}", path.display()))
        })?;
        let config = Self::from_json(&contents)?.with_env_override()?;
        info!(path = %path.display(), suite = %config.suite, "loaded bridge configuration");
        Ok(config)
    }

    /// Defaults plus the environment override.
    pub fn from_env() -> Result<Self, CryptoError> {
        Self::default().with_env_override()
    }

    /// Replace the suite with `SHIELDTALK_SUITE` when it is set.
    pub fn with_env_override(self) -> Result<Self, CryptoError> {
        self.with_override(std::env::var(SUITE_ENV_VAR).ok().as_deref())
    }

    fn with_override(mut self, value: Option<&str>) -> Result<Self, CryptoError> {
        if let Some(value) = value {
            self.suite = value.parse()?;
            debug!(suite = %self.suite, "cipher suite overridden from {SUITE_ENV_VAR}");
        }
        Ok(self)
    }
}
