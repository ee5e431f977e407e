//! # shieldtalk-core
//!
//! Hybrid encryption core for the ShieldTalk messenger.
//!
//! A conversation key is a random 256-bit symmetric key. It travels to each
//! participant wrapped under their RSA-2048 public key, and every message is
//! encrypted under it and carried as base64 text.
//!
//! The mobile shell reaches the operations two ways:
//! - **Method channel**: [`channel::dispatch`] routes `generateKeys`,
//!   `generateSymmetricKey`, `encryptKey`, `decryptKey`, `encryptMessage` and
//!   `decryptMessage` by name, answering "not implemented" for anything else
//! - **UniFFI** (`uniffi-bindgen` feature): the exports in `ffi`
//!
//! ## Cipher suites
//!
//! [`CipherSuite::Standard`] (RSA-OAEP-SHA256, AES-256-GCM) is the default.
//! [`CipherSuite::Legacy`] (RSA PKCS#1 v1.5, AES-256-ECB) reproduces the
//! original wire format for old clients and is never chosen implicitly.
//!
//! Key material held by this crate is zeroized once it is no longer needed.

pub mod bridge;
pub mod channel;
pub mod cipher;
pub mod config;
pub mod encoding;
pub mod errors;
pub mod keys;
pub mod wrap;

#[cfg(feature = "uniffi-bindgen")]
pub mod ffi;

#[cfg(feature = "uniffi-bindgen")]
uniffi::setup_scaffolding!();

// Re-export core types
pub use bridge::Bridge;
pub use channel::{dispatch, dispatch_json, ChannelValue, Method, MethodCall, MethodResponse};
pub use config::{BridgeConfig, CipherSuite};
pub use errors::{CryptoError, ErrorKind};
pub use keys::{generate_key_pair, generate_symmetric_key, KeyPair};
