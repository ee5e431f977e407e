//! RSA key wrapping and unwrapping.
//!
//! A 32-byte symmetric key is encrypted under the recipient's RSA-2048 public
//! key. The wrapped key is the raw RSA ciphertext, always 256 bytes.
//!
//! - [`CipherSuite::Standard`]: OAEP with SHA-256 digest and MGF1-SHA-256
//! - [`CipherSuite::Legacy`]: PKCS#1 v1.5 (`RSA/ECB/PKCS1Padding` on the JVM)
//!
//! Unwrapping reports every decryption problem as the same
//! [`CryptoError::UnwrapFailure`], so callers never learn whether padding
//! or the key was at fault.

use rand::rngs::OsRng;
use rsa::{Oaep, Pkcs1v15Encrypt, RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::config::CipherSuite;
use crate::errors::CryptoError;
use crate::keys::{decode_private_key, decode_public_key, SYMMETRIC_KEY_LEN};

fn encrypt_with(
    public_key: &RsaPublicKey,
    payload: &[u8],
    suite: CipherSuite,
) -> rsa::Result<Vec<u8>> {
    match suite {
        CipherSuite::Standard => public_key.encrypt(&mut OsRng, Oaep::new::<Sha256>(), payload),
        CipherSuite::Legacy => public_key.encrypt(&mut OsRng, Pkcs1v15Encrypt, payload),
    }
}

fn decrypt_with(
    private_key: &RsaPrivateKey,
    ciphertext: &[u8],
    suite: CipherSuite,
) -> rsa::Result<Vec<u8>> {
    match suite {
        CipherSuite::Standard => private_key.decrypt(Oaep::new::<Sha256>(), ciphertext),
        CipherSuite::Legacy => private_key.decrypt(Pkcs1v15Encrypt, ciphertext),
    }
}

/// Wrap a 32-byte symmetric key for the holder of `recipient_public_key_der`.
///
/// `recipient_public_key_der` is a SubjectPublicKeyInfo DER encoding.
pub fn wrap_key(
    symmetric_key: &[u8],
    recipient_public_key_der: &[u8],
    suite: CipherSuite,
) -> Result<Vec<u8>, CryptoError> {
    let public_key = decode_public_key(recipient_public_key_der)?;

    if symmetric_key.len() != SYMMETRIC_KEY_LEN {
        return Err(CryptoError::WrapFailure(format!(
            "symmetric key must be {SYMMETRIC_KEY_LEN} bytes, got {}",
            symmetric_key.len()
        )));
    }

    let wrapped = encrypt_with(&public_key, symmetric_key, suite).map_err(|e| {
        warn!(%suite, error = %e, "key wrap failed");
        CryptoError::WrapFailure(e.to_string())
    })?;

    debug!(%suite, wrapped_len = wrapped.len(), "wrapped symmetric key");
    Ok(wrapped)
}

/// Recover the raw symmetric key bytes from a wrapped key.
///
/// `private_key_der` is a PKCS#8 PrivateKeyInfo DER encoding. Must use the
/// same suite that was used for wrapping.
pub fn unwrap_key(
    wrapped_key: &[u8],
    private_key_der: &[u8],
    suite: CipherSuite,
) -> Result<Vec<u8>, CryptoError> {
    let private_key = decode_private_key(private_key_der)?;

    // Padding errors, wrong keys and wrong lengths all collapse here.
    let key = decrypt_with(&private_key, wrapped_key, suite)
        .ok()
        .map(Zeroizing::new)
        .filter(|key| key.len() == SYMMETRIC_KEY_LEN)
        .ok_or_else(|| {
            warn!(%suite, "key unwrap failed");
            CryptoError::UnwrapFailure
        })?;

    debug!(%suite, "unwrapped symmetric key");
    Ok(key.to_vec())
}
