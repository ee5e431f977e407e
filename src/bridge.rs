//! The six operations the application shell calls, bound to one configured
//! cipher suite.
//!
//! Argument and result shapes follow the method channel: byte arrays for keys,
//! text for messages, a two-element list for a generated key pair.

use tracing::instrument;

use crate::cipher;
use crate::config::{BridgeConfig, CipherSuite};
use crate::errors::CryptoError;
use crate::keys;
use crate::wrap;

/// Stateless entry point for the hybrid encryption operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bridge {
    config: BridgeConfig,
}

impl Bridge {
    pub fn new(config: BridgeConfig) -> Self {
        Self { config }
    }

    pub fn with_suite(suite: CipherSuite) -> Self {
        Self::new(BridgeConfig::new(suite))
    }

    pub fn suite(&self) -> CipherSuite {
        self.config.suite
    }

    /// `generateKeys`: `[privateKey, publicKey]`, both base64 DER.
    #[instrument(level = "debug", skip(self))]
    pub fn generate_keys(&self) -> Result<Vec<String>, CryptoError> {
        Ok(keys::generate_key_pair()?.into_list())
    }

    /// `generateSymmetricKey`: 32 raw key bytes.
    #[instrument(level = "debug", skip(self))]
    pub fn generate_symmetric_key(&self) -> Result<Vec<u8>, CryptoError> {
        Ok(keys::generate_symmetric_key()?.to_vec())
    }

    /// `encryptKey`: wrap `key_to_encrypt` under a SubjectPublicKeyInfo DER key.
    #[instrument(level = "debug", skip_all, fields(suite = %self.suite()))]
    pub fn encrypt_key(
        &self,
        key_to_encrypt: &[u8],
        public_key: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        wrap::wrap_key(key_to_encrypt, public_key, self.suite())
    }

    /// `decryptKey`: unwrap with a PKCS#8 DER private key, returning raw key bytes.
    #[instrument(level = "debug", skip_all, fields(suite = %self.suite()))]
    pub fn decrypt_key(
        &self,
        key_to_decrypt: &[u8],
        private_key: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        wrap::unwrap_key(key_to_decrypt, private_key, self.suite())
    }

    /// `encryptMessage`: base64 ciphertext of `message`.
    #[instrument(level = "debug", skip_all, fields(suite = %self.suite()))]
    pub fn encrypt_message(&self, key: &[u8], message: &str) -> Result<String, CryptoError> {
        cipher::encrypt_message(key, message, self.suite())
    }

    /// `decryptMessage`: plaintext of a base64 ciphertext.
    #[instrument(level = "debug", skip_all, fields(suite = %self.suite()))]
    pub fn decrypt_message(&self, key: &[u8], message: &str) -> Result<String, CryptoError> {
        cipher::decrypt_message(key, message, self.suite())
    }
}
