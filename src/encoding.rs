//! Transport encoding for the text-only caller boundary.
//!
//! Standard RFC 4648 alphabet with `=` padding and no line wrapping, which is
//! what `java.util.Base64` and Dart's `base64` codec produce.

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::errors::CryptoError;

/// Encode bytes as standard base64.
pub fn encode<T: AsRef<[u8]>>(data: T) -> String {
    STANDARD.encode(data)
}

/// Decode standard base64 back into bytes.
pub fn decode<T: AsRef<[u8]>>(encoded: T) -> Result<Vec<u8>, CryptoError> {
    STANDARD
        .decode(encoded)
        .map_err(|e| CryptoError::InvalidTransportEncoding(e.to_string()))
}

/// `#[serde(with = "encoding::serde_base64")]` for byte fields carried as base64 strings.
pub mod serde_base64 {
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let text = String::deserialize(deserializer)?;
        super::decode(&text).map_err(D::Error::custom)
    }
}
