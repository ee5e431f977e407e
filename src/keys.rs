//! Key generation and decoding.
//!
//! RSA-2048 key pairs travel as DER: the public half as SubjectPublicKeyInfo,
//! the private half as PKCS#8 PrivateKeyInfo. These are the encodings
//! `X509EncodedKeySpec` and `PKCS8EncodedKeySpec` read on the JVM, so keys
//! move freely between this crate and other implementations.

use rand::rngs::OsRng;
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey};
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::encoding;
use crate::errors::CryptoError;

/// Modulus size of every generated key pair.
pub const RSA_KEY_BITS: usize = 2048;

/// Length of a symmetric key in bytes (256 bits).
pub const SYMMETRIC_KEY_LEN: usize = 32;

/// A freshly generated RSA key pair, both halves base64-encoded DER.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "uniffi-bindgen", derive(uniffi::Record))]
pub struct KeyPair {
    /// base64 PKCS#8 PrivateKeyInfo DER
    pub private_key: String,
    /// base64 SubjectPublicKeyInfo DER
    pub public_key: String,
}

impl KeyPair {
    /// The `[privateKey, publicKey]` list shape returned over the method channel.
    pub fn into_list(self) -> Vec<String> {
        vec![self.private_key, self.public_key]
    }
}

/// Generate a new RSA-2048 key pair from the OS random source.
pub fn generate_key_pair() -> Result<KeyPair, CryptoError> {
    let private_key = RsaPrivateKey::new(&mut OsRng, RSA_KEY_BITS).map_err(|e| {
        warn!(error = %e, "RSA key generation failed");
        CryptoError::KeyGenerationFailure(e.to_string())
    })?;

    let private_der = private_key
        .to_pkcs8_der()
        .map_err(|e| CryptoError::KeyGenerationFailure(e.to_string()))?;
    let public_der = private_key
        .to_public_key()
        .to_public_key_der()
        .map_err(|e| CryptoError::KeyGenerationFailure(e.to_string()))?;

    debug!(bits = RSA_KEY_BITS, "generated RSA key pair");

    Ok(KeyPair {
        private_key: encoding::encode(private_der.as_bytes()),
        public_key: encoding::encode(public_der.as_bytes()),
    })
}

/// Generate a new random 256-bit symmetric key.
pub fn generate_symmetric_key() -> Result<[u8; SYMMETRIC_KEY_LEN], CryptoError> {
    let mut key = [0u8; SYMMETRIC_KEY_LEN];
    getrandom::getrandom(&mut key).map_err(|e| {
        warn!(error = %e, "OS random source unavailable");
        CryptoError::KeyGenerationFailure(e.to_string())
    })?;
    Ok(key)
}

/// Decode a SubjectPublicKeyInfo DER into a 2048-bit RSA public key.
pub(crate) fn decode_public_key(der: &[u8]) -> Result<RsaPublicKey, CryptoError> {
    let key = RsaPublicKey::from_public_key_der(der).map_err(|_| CryptoError::InvalidPublicKey)?;
    if key.n().bits() != RSA_KEY_BITS {
        return Err(CryptoError::InvalidPublicKey);
    }
    Ok(key)
}

/// Decode a PKCS#8 PrivateKeyInfo DER into an RSA private key.
pub(crate) fn decode_private_key(der: &[u8]) -> Result<RsaPrivateKey, CryptoError> {
    RsaPrivateKey::from_pkcs8_der(der).map_err(|_| CryptoError::InvalidPrivateKey)
}

/// Derive the SubjectPublicKeyInfo DER matching a PKCS#8 private key.
pub fn public_key_from_private(private_key_der: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let private_key = decode_private_key(private_key_der)?;
    let der = private_key
        .to_public_key()
        .to_public_key_der()
        .map_err(|_| CryptoError::InvalidPrivateKey)?;
    Ok(der.as_bytes().to_vec())
}

/// Modulus size in bits of a SubjectPublicKeyInfo DER public key.
pub fn public_key_bits(public_key_der: &[u8]) -> Result<usize, CryptoError> {
    let key = RsaPublicKey::from_public_key_der(public_key_der)
        .map_err(|_| CryptoError::InvalidPublicKey)?;
    Ok(key.n().bits())
}
