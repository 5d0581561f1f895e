//! Test fixtures and signed message generators.

use crate::codec;
use crate::{FieldMap, SigningContext};
use serde_json::Value;

/// Collection of commonly used test fixtures.
pub struct TestFixtures;

impl TestFixtures {
    /// Sandbox-style merchant private key.
    pub const PRIVATE_KEY: &'static str = "sandbox_a1b2c3d4e5f6a7b8c9d0e1f2a3b4c5d6e7f8a9b0";

    /// Sandbox-style merchant public key.
    pub const PUBLIC_KEY: &'static str = "sandbox_i00000000001";

    /// Sample order amounts, as the gateway formats them.
    pub const SAMPLE_AMOUNTS: &'static [&'static str] = &["0.01", "1", "10.00", "149.99", "25000"];

    /// Signing context built from the fixture key pair.
    pub fn signing_context() -> SigningContext {
        SigningContext::new(Self::PRIVATE_KEY, Self::PUBLIC_KEY)
    }
}

/// Build a raw callback whose `data` is exactly `json` and whose signature
/// is computed with the fixture key pair.
pub fn signed_message(json: &[u8]) -> FieldMap {
    signed_message_with(json, &TestFixtures::signing_context())
}

/// Like [`signed_message`], signed with `ctx`.
pub fn signed_message_with(json: &[u8], ctx: &SigningContext) -> FieldMap {
    let data = codec::encode_bytes(json);
    let signature = codec::sign(&data, ctx);

    let mut raw = FieldMap::new();
    raw.insert("data".to_string(), Value::String(data.into_string()));
    raw.insert("signature".to_string(), Value::String(signature.into_string()));
    raw
}
