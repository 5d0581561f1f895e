//! # Payload and Signature Codec
//!
//! ## Wire Format
//!
//! - `data` = base64(JSON object), standard alphabet, padded, single line
//! - `signature` = base64(SHA1(private_key || data || private_key))
//!
//! The private key is mixed in on both sides of the base64 payload, not the
//! raw JSON. Everything the gateway authenticates is therefore the exact
//! transport string, and any re-serialisation that changes a single byte of
//! `data` changes the signature.
//!
//! ## Security
//!
//! - Verification compares signatures in constant time
//! - Decoding failures are returned, never swallowed: an unparsable payload
//!   cannot be authenticated

use crate::{FieldMap, LiqpayError, Result, SigningContext};
use base64::engine::{general_purpose::STANDARD as BASE64, Engine};
use serde_json::Value;
use sha1::{Digest, Sha1};
use std::fmt;
use subtle::ConstantTimeEq;

/// Base64-encoded JSON field map sent as the `data` field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Payload(String);

impl Payload {
    /// Wrap a transport string exactly as received.
    pub fn new(data: impl Into<String>) -> Self {
        Self(data.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Payload {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Payload {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Base64-encoded SHA-1 digest authenticating a [`Payload`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature(String);

impl Signature {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Compare against a transmitted signature in constant time.
    ///
    /// Length mismatches return `false` without leaking where the strings
    /// diverge.
    pub fn matches(&self, candidate: &str) -> bool {
        self.0.as_bytes().ct_eq(candidate.as_bytes()).into()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Serialize `fields` in their insertion order and base64-encode the JSON.
///
/// Key order is the caller's: [`FieldMap`] preserves insertion order, so the
/// checkout builder controls the exact byte layout that gets signed.
pub fn encode(fields: &FieldMap) -> Result<Payload> {
    let json = serde_json::to_vec(fields)?;
    Ok(encode_bytes(&json))
}

/// Base64-encode already-serialised bytes.
///
/// The standard engine never wraps lines, so the result is a single-line
/// token as the gateway requires.
pub fn encode_bytes(raw: &[u8]) -> Payload {
    Payload(BASE64.encode(raw))
}

/// Decode a payload back into its field map.
///
/// # Errors
///
/// [`LiqpayError::MalformedPayload`] if the payload is not base64, not UTF-8
/// JSON, or the JSON is not an object.
pub fn decode(payload: &Payload) -> Result<FieldMap> {
    let raw = decode_bytes(payload)?;
    parse_fields(&raw)
}

/// Base64-decode a payload without interpreting the JSON.
///
/// ASCII whitespace is ignored so that line-wrapped encodings from other
/// encoders are still accepted.
pub fn decode_bytes(payload: &Payload) -> Result<Vec<u8>> {
    let compact: String = payload
        .as_str()
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    BASE64
        .decode(compact.as_bytes())
        .map_err(|e| LiqpayError::malformed("base64", e))
}

/// Parse decoded payload bytes as a JSON object.
pub fn parse_fields(raw: &[u8]) -> Result<FieldMap> {
    let text = std::str::from_utf8(raw).map_err(|e| LiqpayError::malformed("utf-8", e))?;
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(LiqpayError::malformed(
            "json",
            format!("expected object, got {}", json_kind(&other)),
        )),
        Err(e) => Err(LiqpayError::malformed("json", e)),
    }
}

/// Compute `base64(SHA1(private_key || payload || private_key))`.
pub fn sign(payload: &Payload, ctx: &SigningContext) -> Signature {
    let key = ctx.private_key().as_bytes();
    let mut hasher = Sha1::new();
    hasher.update(key);
    hasher.update(payload.as_str().as_bytes());
    hasher.update(key);
    let digest = hasher.finalize();

    Signature(BASE64.encode(digest).trim_end().to_string())
}

/// Recompute the signature of `payload` and compare it with `candidate`.
pub fn verify(payload: &Payload, ctx: &SigningContext, candidate: &str) -> bool {
    sign(payload, ctx).matches(candidate)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
