//! Symmetric message encryption under a 256-bit key.
//!
//! Wire format of the ciphertext before transport encoding:
//! - [`CipherSuite::Standard`]: `nonce(12) || ciphertext || tag(16)`, AES-256-GCM
//!   with a fresh random nonce per message. Repeated messages look unrelated
//!   and any tampering is rejected.
//! - [`CipherSuite::Legacy`]: bare AES-256-ECB blocks with PKCS#7 padding
//!   (`AES/ECB/PKCS5Padding` on the JVM). No nonce, no tag: equal plaintexts
//!   under one key give equal ciphertexts.
//!
//! Both directions cross the caller boundary as base64 text.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut};
use aes_gcm::{
    aead::{Aead, AeadCore, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};
use tracing::{debug, warn};

use crate::config::CipherSuite;
use crate::encoding;
use crate::errors::CryptoError;
use crate::keys::SYMMETRIC_KEY_LEN;

type Aes256EcbEnc = ecb::Encryptor<aes::Aes256>;
type Aes256EcbDec = ecb::Decryptor<aes::Aes256>;

const AES_BLOCK_LEN: usize = 16;
const GCM_NONCE_LEN: usize = 12;
const GCM_TAG_LEN: usize = 16;

/// Encrypt UTF-8 text and return the ciphertext as base64.
pub fn encrypt_message(
    symmetric_key: &[u8],
    plaintext: &str,
    suite: CipherSuite,
) -> Result<String, CryptoError> {
    if symmetric_key.len() != SYMMETRIC_KEY_LEN {
        return Err(CryptoError::EncryptionFailure(format!(
            "key must be {SYMMETRIC_KEY_LEN} bytes, got {}",
            symmetric_key.len()
        )));
    }

    let ciphertext = match suite {
        CipherSuite::Standard => seal_gcm(symmetric_key, plaintext.as_bytes())?,
        CipherSuite::Legacy => seal_ecb(symmetric_key, plaintext.as_bytes())?,
    };

    debug!(%suite, ciphertext_len = ciphertext.len(), "encrypted message");
    Ok(encoding::encode(&ciphertext))
}

/// Decrypt base64 ciphertext produced by [`encrypt_message`] back to text.
///
/// Every failure, from bad base64 to a bad tag to invalid UTF-8, is reported
/// as [`CryptoError::DecryptionFailure`].
pub fn decrypt_message(
    symmetric_key: &[u8],
    transport_text: &str,
    suite: CipherSuite,
) -> Result<String, CryptoError> {
    let plaintext = open(symmetric_key, transport_text, suite).ok_or_else(|| {
        warn!(%suite, "message decryption failed");
        CryptoError::DecryptionFailure
    })?;

    debug!(%suite, plaintext_len = plaintext.len(), "decrypted message");
    Ok(plaintext)
}

fn open(symmetric_key: &[u8], transport_text: &str, suite: CipherSuite) -> Option<String> {
    if symmetric_key.len() != SYMMETRIC_KEY_LEN {
        return None;
    }
    let data = encoding::decode(transport_text).ok()?;
    let plaintext = match suite {
        CipherSuite::Standard => open_gcm(symmetric_key, &data)?,
        CipherSuite::Legacy => open_ecb(symmetric_key, &data)?,
    };
    String::from_utf8(plaintext).ok()
}

fn seal_gcm(key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| CryptoError::EncryptionFailure(e.to_string()))?;
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| CryptoError::EncryptionFailure(e.to_string()))?;

    let mut packed = Vec::with_capacity(GCM_NONCE_LEN + ciphertext.len());
    packed.extend_from_slice(&nonce);
    packed.extend_from_slice(&ciphertext);
    Ok(packed)
}

fn open_gcm(key: &[u8], data: &[u8]) -> Option<Vec<u8>> {
    if data.len() < GCM_NONCE_LEN + GCM_TAG_LEN {
        return None;
    }
    let (nonce, ciphertext) = data.split_at(GCM_NONCE_LEN);
    let cipher = Aes256Gcm::new_from_slice(key).ok()?;
    cipher.decrypt(Nonce::from_slice(nonce), ciphertext).ok()
}

fn seal_ecb(key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let cipher = Aes256EcbEnc::new_from_slice(key)
        .map_err(|e| CryptoError::EncryptionFailure(e.to_string()))?;
    Ok(cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
}

fn open_ecb(key: &[u8], data: &[u8]) -> Option<Vec<u8>> {
    if data.is_empty() || data.len() % AES_BLOCK_LEN != 0 {
        return None;
    }
    let cipher = Aes256EcbDec::new_from_slice(key).ok()?;
    cipher.decrypt_padded_vec_mut::<Pkcs7>(data).ok()
}
