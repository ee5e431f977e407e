//! FFI wrapper functions for UniFFI export.
//!
//! Owned `Vec<u8>`/`String` boundaries with the cipher suite passed explicitly,
//! since the bindings hold no [`Bridge`] state. These are the only versions
//! visible to Swift/Kotlin; Rust callers use [`Bridge`] or the modules directly.

use zeroize::Zeroize;

use crate::bridge::Bridge;
use crate::config::CipherSuite;
use crate::errors::CryptoError;
use crate::keys::{self, KeyPair};

/// Generate an RSA-2048 key pair, both halves base64 DER.
#[uniffi::export]
pub fn ffi_generate_key_pair() -> Result<KeyPair, CryptoError> {
    keys::generate_key_pair()
}

/// Generate 32 random key bytes.
#[uniffi::export]
pub fn ffi_generate_symmetric_key() -> Result<Vec<u8>, CryptoError> {
    let mut key = keys::generate_symmetric_key()?;
    let out = key.to_vec();
    key.zeroize();
    Ok(out)
}

/// Wrap a 32-byte key under a SubjectPublicKeyInfo DER public key.
#[uniffi::export]
pub fn ffi_encrypt_key(
    key_to_encrypt: Vec<u8>,
    public_key: Vec<u8>,
    suite: CipherSuite,
) -> Result<Vec<u8>, CryptoError> {
    let mut key_to_encrypt = key_to_encrypt;
    let result = Bridge::with_suite(suite).encrypt_key(&key_to_encrypt, &public_key);
    key_to_encrypt.zeroize();
    result
}

/// Unwrap a key with a PKCS#8 DER private key.
#[uniffi::export]
pub fn ffi_decrypt_key(
    key_to_decrypt: Vec<u8>,
    private_key: Vec<u8>,
    suite: CipherSuite,
) -> Result<Vec<u8>, CryptoError> {
    let mut private_key = private_key;
    let result = Bridge::with_suite(suite).decrypt_key(&key_to_decrypt, &private_key);
    private_key.zeroize();
    result
}

#[uniffi::export]
pub fn ffi_encrypt_message(
    key: Vec<u8>,
    message: String,
    suite: CipherSuite,
) -> Result<String, CryptoError> {
    let mut key = key;
    let result = Bridge::with_suite(suite).encrypt_message(&key, &message);
    key.zeroize();
    result
}

#[uniffi::export]
pub fn ffi_decrypt_message(
    key: Vec<u8>,
    message: String,
    suite: CipherSuite,
) -> Result<String, CryptoError> {
    let mut key = key;
    let result = Bridge::with_suite(suite).decrypt_message(&key, &message);
    key.zeroize();
    result
}

/// Route a JSON method call, as the platform channel handler does.
#[uniffi::export]
pub fn ffi_dispatch_json(request: String, suite: CipherSuite) -> String {
    crate::channel::dispatch_json(&Bridge::with_suite(suite), &request)
}
