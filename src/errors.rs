//! Error types for shieldtalk-core operations.
//!
//! Every fallible operation returns `Result<_, CryptoError>`. Callers that need
//! a stable, serializable error code (the method channel, mobile bindings)
//! use [`CryptoError::kind`]; the `Display` text is the human-readable message.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "uniffi-bindgen", derive(uniffi::Error))]
#[cfg_attr(feature = "uniffi-bindgen", uniffi(flat_error))]
pub enum CryptoError {
    #[error("Key generation failed: {0}")]
    KeyGenerationFailure(String),

    #[error("Invalid public key: expected a 2048-bit RSA SubjectPublicKeyInfo")]
    InvalidPublicKey,

    #[error("Invalid private key: expected an RSA PKCS#8 PrivateKeyInfo")]
    InvalidPrivateKey,

    #[error("Key wrap failed: {0}")]
    WrapFailure(String),

    // Carries no cause: wrong key and bad padding must be indistinguishable.
    #[error("Key unwrap failed")]
    UnwrapFailure,

    #[error("Encryption failed: {0}")]
    EncryptionFailure(String),

    // No cause, see UnwrapFailure.
    #[error("Decryption failed")]
    DecryptionFailure,

    #[error("Invalid base64 transport encoding: {0}")]
    InvalidTransportEncoding(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Stable name of a [`CryptoError`] variant, used as the error code at the
/// method-channel boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    KeyGenerationFailure,
    InvalidPublicKey,
    InvalidPrivateKey,
    WrapFailure,
    UnwrapFailure,
    EncryptionFailure,
    DecryptionFailure,
    InvalidTransportEncoding,
    InvalidArgument,
    InvalidConfig,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::KeyGenerationFailure => "KeyGenerationFailure",
            ErrorKind::InvalidPublicKey => "InvalidPublicKey",
            ErrorKind::InvalidPrivateKey => "InvalidPrivateKey",
            ErrorKind::WrapFailure => "WrapFailure",
            ErrorKind::UnwrapFailure => "UnwrapFailure",
            ErrorKind::EncryptionFailure => "EncryptionFailure",
            ErrorKind::DecryptionFailure => "DecryptionFailure",
            ErrorKind::InvalidTransportEncoding => "InvalidTransportEncoding",
            ErrorKind::InvalidArgument => "InvalidArgument",
            ErrorKind::InvalidConfig => "InvalidConfig",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl CryptoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CryptoError::KeyGenerationFailure(_) => ErrorKind::KeyGenerationFailure,
            CryptoError::InvalidPublicKey => ErrorKind::InvalidPublicKey,
            CryptoError::InvalidPrivateKey => ErrorKind::InvalidPrivateKey,
            CryptoError::WrapFailure(_) => ErrorKind::WrapFailure,
            CryptoError::UnwrapFailure => ErrorKind::UnwrapFailure,
            CryptoError::EncryptionFailure(_) => ErrorKind::EncryptionFailure,
            CryptoError::DecryptionFailure => ErrorKind::DecryptionFailure,
            CryptoError::InvalidTransportEncoding(_) => ErrorKind::InvalidTransportEncoding,
            CryptoError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            CryptoError::InvalidConfig(_) => ErrorKind::InvalidConfig,
        }
    }
}
