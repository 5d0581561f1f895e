//! Common helpers for liqpay-lib integration tests

use liqpay_lib::{codec, FieldMap, SigningContext};
use serde_json::Value;

#[allow(dead_code)]
pub const PRIVATE_KEY: &str = "integration_private_key";
#[allow(dead_code)]
pub const PUBLIC_KEY: &str = "integration_public_key";

#[allow(dead_code)]
pub fn merchant() -> SigningContext {
    SigningContext::new(PRIVATE_KEY, PUBLIC_KEY)
}

/// Raw callback as the gateway would send it: `data` carrying `json`
/// verbatim, signed with the merchant key, plus the plain `amount` and
/// `order_id` copies dispatchers look for.
#[allow(dead_code)]
pub fn gateway_callback(json: &Value) -> FieldMap {
    let text = json.to_string();
    let data = codec::encode_bytes(text.as_bytes());
    let signature = codec::sign(&data, &merchant());

    let mut raw = FieldMap::new();
    for key in ["amount", "order_id"] {
        if let Some(value) = json.get(key) {
            raw.insert(key.to_string(), value.clone());
        }
    }
    raw.insert("data".to_string(), Value::String(data.into_string()));
    raw.insert("signature".to_string(), Value::String(signature.into_string()));
    raw
}
