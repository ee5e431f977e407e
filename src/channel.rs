//! Name-based dispatch for the platform method channel.
//!
//! The shell sends a method name plus named arguments and expects exactly one
//! of three answers: a result, an error with a code and message, or
//! "not implemented" for names it does not know. Unknown names are not errors.
//!
//! JSON form of a call and its responses:
//!
//! ```json
//! {"method":"encryptMessage","arguments":{
//!     "key":{"type":"bytes","value":"<base64>"},
//!     "message":{"type":"text","value":"hello"}}}
//!
//! {"status":"success","result":{"type":"text","value":"<base64 ciphertext>"}}
//! {"status":"error","code":"DecryptionFailure","message":"Decryption failed"}
//! {"status":"notImplemented"}
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span, warn};
use zeroize::Zeroize;

use crate::bridge::Bridge;
use crate::encoding;
use crate::errors::{CryptoError, ErrorKind};

/// Channel name registered by the mobile shell.
pub const CHANNEL_NAME: &str = "com.shieldtalk/security_channel";

/// A value crossing the channel: the subset of the platform codec this core uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum ChannelValue {
    Bytes(#[serde(with = "encoding::serde_base64")] Vec<u8>),
    Text(String),
    List(Vec<String>),
}

impl ChannelValue {
    fn type_name(&self) -> &'static str {
        match self {
            ChannelValue::Bytes(_) => "bytes",
            ChannelValue::Text(_) => "text",
            ChannelValue::List(_) => "list",
        }
    }
}

/// An incoming method call. Argument buffers are wiped when the call is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodCall {
    pub method: String,
    #[serde(default)]
    pub arguments: BTreeMap<String, ChannelValue>,
}

impl MethodCall {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            arguments: BTreeMap::new(),
        }
    }

    pub fn with_bytes(mut self, name: &str, value: impl Into<Vec<u8>>) -> Self {
        self.arguments
            .insert(name.to_string(), ChannelValue::Bytes(value.into()));
        self
    }

    pub fn with_text(mut self, name: &str, value: impl Into<String>) -> Self {
        self.arguments
            .insert(name.to_string(), ChannelValue::Text(value.into()));
        self
    }

    fn bytes(&self, name: &str) -> Result<&[u8], CryptoError> {
        match self.argument(name)? {
            ChannelValue::Bytes(bytes) => Ok(bytes),
            other => Err(wrong_type(name, "bytes", other)),
        }
    }

    fn text(&self, name: &str) -> Result<&str, CryptoError> {
        match self.argument(name)? {
            ChannelValue::Text(text) => Ok(text),
            other => Err(wrong_type(name, "text", other)),
        }
    }

    fn argument(&self, name: &str) -> Result<&ChannelValue, CryptoError> {
        self.arguments
            .get(name)
            .ok_or_else(|| CryptoError::InvalidArgument(format!("missing argument {name:?}")))
    }
}

impl Drop for MethodCall {
    fn drop(&mut self) {
        self.arguments.values_mut().for_each(Zeroize::zeroize);
    }
}

fn wrong_type(name: &str, expected: &str, actual: &ChannelValue) -> CryptoError {
    CryptoError::InvalidArgument(format!(
        "argument {name:?} must be {expected}, got {}",
        actual.type_name()
    ))
}

/// The single answer to a [`MethodCall`]. A successful result is wiped on drop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum MethodResponse {
    Success { result: ChannelValue },
    Error { code: ErrorKind, message: String },
    NotImplemented,
}

impl Zeroize for MethodResponse {
    fn zeroize(&mut self) {
        if let MethodResponse::Success { result } = self {
            result.zeroize();
        }
    }
}

impl Drop for MethodResponse {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl From<CryptoError> for MethodResponse {
    fn from(err: CryptoError) -> Self {
        MethodResponse::Error {
            code: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Method names understood by [`dispatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    GenerateKeys,
    GenerateSymmetricKey,
    EncryptKey,
    DecryptKey,
    EncryptMessage,
    DecryptMessage,
}

impl Method {
    pub const ALL: [Method; 6] = [
        Method::GenerateKeys,
        Method::GenerateSymmetricKey,
        Method::EncryptKey,
        Method::DecryptKey,
        Method::EncryptMessage,
        Method::DecryptMessage,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Method::GenerateKeys => "generateKeys",
            Method::GenerateSymmetricKey => "generateSymmetricKey",
            Method::EncryptKey => "encryptKey",
            Method::DecryptKey => "decryptKey",
            Method::EncryptMessage => "encryptMessage",
            Method::DecryptMessage => "decryptMessage",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|method| method.name() == name)
    }
}

fn invoke(bridge: &Bridge, method: Method, call: &MethodCall) -> Result<ChannelValue, CryptoError> {
    let value = match method {
        Method::GenerateKeys => ChannelValue::List(bridge.generate_keys()?),
        Method::GenerateSymmetricKey => ChannelValue::Bytes(bridge.generate_symmetric_key()?),
        Method::EncryptKey => ChannelValue::Bytes(
            bridge.encrypt_key(call.bytes("keyToEncrypt")?, call.bytes("publicKey")?)?,
        ),
        Method::DecryptKey => ChannelValue::Bytes(
            bridge.decrypt_key(call.bytes("keyToDecrypt")?, call.bytes("privateKey")?)?,
        ),
        Method::EncryptMessage => ChannelValue::Text(
            bridge.encrypt_message(call.bytes("key")?, call.text("message")?)?,
        ),
        Method::DecryptMessage => ChannelValue::Text(
            bridge.decrypt_message(call.bytes("key")?, call.text("message")?)?,
        ),
    };
    Ok(value)
}

/// Route a call to its operation.
pub fn dispatch(bridge: &Bridge, call: &MethodCall) -> MethodResponse {
    let Some(method) = Method::from_name(&call.method) else {
        debug!(method = %call.method, "method not implemented");
        return MethodResponse::NotImplemented;
    };

    let span = debug_span!(
        "method_call",
        channel = CHANNEL_NAME,
        method = method.name(),
        suite = %bridge.suite()
    );
    let _enter = span.enter();

    match invoke(bridge, method, call) {
        Ok(result) => MethodResponse::Success { result },
        Err(err) => {
            warn!(code = %err.kind(), "method call failed");
            err.into()
        }
    }
}

/// Method name plus still-untyped arguments.
#[derive(Deserialize)]
struct JsonEnvelope {
    method: String,
    #[serde(default)]
    arguments: serde_json::Value,
}

/// `None` for a name [`dispatch`] does not know; its arguments are never inspected.
fn parse_json_call(request: &str) -> Result<Option<MethodCall>, CryptoError> {
    let malformed = |e: serde_json::Error| {
        CryptoError::InvalidArgument(format!("malformed method call: {e}"))
    };

    let envelope: JsonEnvelope = serde_json::from_str(request).map_err(malformed)?;
    if Method::from_name(&envelope.method).is_none() {
        debug!(method = %envelope.method, "method not implemented");
        return Ok(None);
    }

    let arguments = match envelope.arguments {
        serde_json::Value::Null => BTreeMap::new(),
        value => serde_json::from_value(value).map_err(malformed)?,
    };
    Ok(Some(MethodCall {
        method: envelope.method,
        arguments,
    }))
}

/// [`dispatch`] for a JSON-encoded call, answering with a JSON-encoded response.
pub fn dispatch_json(bridge: &Bridge, request: &str) -> String {
    let response = match parse_json_call(request) {
        Ok(Some(call)) => dispatch(bridge, &call),
        Ok(None) => MethodResponse::NotImplemented,
        Err(err) => err.into(),
    };
    serde_json::to_string(&response).unwrap_or_else(|e| {
        format!(r#"{{"status":"error","code":"InvalidArgument","message":"{e}"}}"#)
    })
}
