//! Inbound callback verification.
//!
//! The gateway reports the outcome of a checkout twice: a server-to-server
//! [`Notification`] POSTed to `server_url`, and a browser [`Return`] to
//! `result_url`. Both carry the base64 `data` payload and its signature;
//! they differ only in which bytes they re-sign to authenticate it.
//!
//! Callers must refuse to act on any callback whose
//! [`Callback::acknowledge`] is `false`.

mod browser_return;
mod notification;
mod status;

pub use browser_return::Return;
pub use notification::Notification;
pub use status::{PaymentStatus, PaymentType};

use crate::codec::{self, Payload, Signature};
use crate::{Amount, FieldMap, GatewayConfig, LiqpayError, Result};
use serde_json::Value;

/// `action_name` of a server-to-server notification.
pub const ACTION_SERVER_URL: &str = "server_url";

/// `action_name` of a browser return.
pub const ACTION_RESULT_URL: &str = "result_url";

/// Whether a raw callback belongs to this gateway.
///
/// Used by dispatchers choosing among several integrations; a message is
/// recognised iff it carries both `amount` and `order_id`.
pub fn recognizes(raw: &FieldMap) -> bool {
    raw.contains_key("amount") && raw.contains_key("order_id")
}

/// Build a [`FieldMap`] from decoded query-string or form pairs.
///
/// Later duplicates replace earlier ones.
pub fn field_map_from_pairs<I, K, V>(pairs: I) -> FieldMap
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), Value::String(v.into())))
        .collect()
}

/// Decoded callback parameters.
///
/// Holds the merged view (raw fields overlaid by the decoded payload) plus
/// the original `data` and signature exactly as transmitted. Verification
/// always reads the originals, so a payload that carries its own
/// `signature` key cannot vouch for itself.
#[derive(Debug, Clone)]
pub struct CallbackParams {
    params: FieldMap,
    raw_data: Payload,
    decoded: Vec<u8>,
    security_key: Option<String>,
}

impl CallbackParams {
    /// Decode the `data` field of a raw message and merge it in.
    ///
    /// # Errors
    ///
    /// - [`LiqpayError::InvalidArgument`] if `raw` is empty
    /// - [`LiqpayError::MalformedPayload`] if `data` is missing or undecodable
    pub fn parse(raw: FieldMap, config: &GatewayConfig) -> Result<Self> {
        if raw.is_empty() {
            return Err(LiqpayError::InvalidArgument(
                "callback message is empty".to_string(),
            ));
        }

        let raw_data = match raw.get("data") {
            Some(Value::String(data)) => Payload::new(data.as_str()),
            Some(other) => {
                return Err(LiqpayError::malformed(
                    "data",
                    format!("expected string, got {}", other),
                ))
            }
            None => return Err(LiqpayError::malformed("data", "field is missing")),
        };
        let security_key = raw
            .get(&config.signature_parameter_name)
            .and_then(scalar_text);

        let decoded = codec::decode_bytes(&raw_data)?;
        let fields = codec::parse_fields(&decoded)?;

        let shadowed: Vec<&str> = fields
            .keys()
            .map(String::as_str)
            .filter(|k| *k == "data" || *k == config.signature_parameter_name)
            .collect();
        if !shadowed.is_empty() {
            tracing::warn!(?shadowed, "decoded payload shadows transport fields");
        }

        let mut params = raw;
        for (key, value) in fields {
            params.insert(key, value);
        }

        Ok(Self {
            params,
            raw_data,
            decoded,
            security_key,
        })
    }

    /// Merged parameter map.
    pub fn params(&self) -> &FieldMap {
        &self.params
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.params.get(key).filter(|v| !v.is_null())
    }

    /// Scalar parameter rendered as text; `None` for absent or null values.
    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key).and_then(scalar_text)
    }

    /// `data` exactly as transmitted.
    pub fn raw_data(&self) -> &Payload {
        &self.raw_data
    }

    /// The JSON bytes `data` decoded to, before any parsing.
    pub fn decoded_bytes(&self) -> &[u8] {
        &self.decoded
    }

    /// Signature exactly as transmitted.
    pub fn security_key(&self) -> Option<&str> {
        self.security_key.as_deref()
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Read-only accessors and authentication shared by both callback kinds.
pub trait Callback {
    fn params(&self) -> &CallbackParams;

    /// Signature this callback should carry, derived per callback kind.
    fn generate_signature(&self) -> Result<Signature>;

    /// Whether a raw message belongs to this gateway; see [`recognizes`].
    fn recognizes(raw: &FieldMap) -> bool
    where
        Self: Sized,
    {
        crate::callback::recognizes(raw)
    }

    /// Raw `status` string.
    fn status(&self) -> Option<String> {
        self.params().text("status")
    }

    fn payment_status(&self) -> Option<PaymentStatus> {
        self.status().map(PaymentStatus::from)
    }

    /// True iff status is `success` or `sandbox`.
    fn is_complete(&self) -> bool {
        self.payment_status()
            .map(|s| s.is_complete())
            .unwrap_or(false)
    }

    /// `amount` as transmitted.
    fn gross(&self) -> Option<String> {
        self.params().text("amount")
    }

    /// `amount` as an exact decimal.
    fn amount(&self) -> Result<Amount> {
        let value = self
            .params()
            .get("amount")
            .ok_or_else(|| LiqpayError::malformed("amount", "field is missing"))?;
        Amount::from_json(value)
    }

    fn item_id(&self) -> Option<String> {
        self.params().text("order_id")
    }

    fn order_id(&self) -> Option<String> {
        self.item_id()
    }

    fn transaction_id(&self) -> Option<String> {
        self.params().text("transaction_id")
    }

    /// Either [`ACTION_SERVER_URL`] or [`ACTION_RESULT_URL`].
    fn action_name(&self) -> Option<String> {
        self.params().text("action_name")
    }

    fn version(&self) -> Option<String> {
        self.params().text("version")
    }

    fn sender_phone(&self) -> Option<String> {
        self.params().text("sender_phone")
    }

    fn currency(&self) -> Option<String> {
        self.params().text("currency")
    }

    fn description(&self) -> Option<String> {
        self.params().text("description")
    }

    /// Raw `type` string (`buy`, `donate`, ...).
    fn payment_type(&self) -> Option<String> {
        self.params().text("type")
    }

    fn payment_type_kind(&self) -> Option<PaymentType> {
        self.payment_type().as_deref().map(PaymentType::from)
    }

    /// The transmitted signature, read from the configured field name.
    fn security_key(&self) -> Option<&str> {
        self.params().security_key()
    }

    /// True iff the transmitted signature matches the regenerated one.
    ///
    /// A `false` result is a security rejection, not a retryable error.
    fn acknowledge(&self) -> bool {
        let Some(candidate) = self.security_key() else {
            tracing::warn!(order_id = ?self.item_id(), "callback carries no signature");
            return false;
        };
        match self.generate_signature() {
            Ok(expected) if expected.matches(candidate) => true,
            Ok(_) => {
                tracing::warn!(order_id = ?self.item_id(), "callback signature mismatch");
                false
            }
            Err(e) => {
                tracing::warn!(order_id = ?self.item_id(), error = %e, "cannot derive callback signature");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> FieldMap {
        match value {
            Value::Object(map) => map,
            _ => unreachable!("test fixture must be an object"),
        }
    }

    fn payload(value: Value) -> String {
        codec::encode(&raw(value)).unwrap().into_string()
    }

    #[test]
    fn test_recognizes_requires_amount_and_order_id() {
        assert!(recognizes(&raw(json!({ "amount": "1", "order_id": "A" }))));
        assert!(!recognizes(&raw(json!({ "amount": "1" }))));
        assert!(!recognizes(&raw(json!({ "order_id": "A" }))));
        assert!(!recognizes(&raw(json!({ "data": "e30=", "signature": "x" }))));
        assert!(!recognizes(&FieldMap::new()));
    }

    #[test]
    fn test_field_map_from_pairs() {
        let map = field_map_from_pairs(vec![("data", "e30="), ("signature", "abc")]);
        assert_eq!(map["data"], "e30=");
        assert_eq!(map["signature"], "abc");
    }

    #[test]
    fn test_parse_rejects_empty() {
        let err = CallbackParams::parse(FieldMap::new(), &GatewayConfig::default()).unwrap_err();
        assert!(matches!(err, LiqpayError::InvalidArgument(_)));
    }

    #[test]
    fn test_parse_rejects_missing_data() {
        let err = CallbackParams::parse(raw(json!({ "signature": "x" })), &GatewayConfig::default())
            .unwrap_err();
        assert!(matches!(err, LiqpayError::MalformedPayload(_)));
    }

    #[test]
    fn test_parse_rejects_undecodable_data() {
        let err = CallbackParams::parse(
            raw(json!({ "data": "%%%", "signature": "x" })),
            &GatewayConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, LiqpayError::MalformedPayload(_)));
    }

    #[test]
    fn test_decoded_keys_win_over_raw() {
        let params = CallbackParams::parse(
            raw(json!({
                "data": payload(json!({ "amount": "10.00", "status": "success" })),
                "amount": "99.00",
                "action_name": "server_url",
            })),
            &GatewayConfig::default(),
        )
        .unwrap();
        assert_eq!(params.text("amount").as_deref(), Some("10.00"));
        assert_eq!(params.text("action_name").as_deref(), Some("server_url"));
    }

    #[test]
    fn test_original_signature_survives_merge() {
        let data = payload(json!({ "signature": "forged", "data": "forged" }));
        let params = CallbackParams::parse(
            raw(json!({ "data": data.clone(), "signature": "transmitted" })),
            &GatewayConfig::default(),
        )
        .unwrap();
        assert_eq!(params.security_key(), Some("transmitted"));
        assert_eq!(params.raw_data().as_str(), data);
        assert_eq!(params.text("signature").as_deref(), Some("forged"));
    }

    #[test]
    fn test_custom_signature_parameter() {
        let config = GatewayConfig::default().with_signature_parameter_name("sig");
        let params = CallbackParams::parse(
            raw(json!({ "data": payload(json!({})), "sig": "abc", "signature": "other" })),
            &config,
        )
        .unwrap();
        assert_eq!(params.security_key(), Some("abc"));
    }

    #[test]
    fn test_text_renders_scalars() {
        let params = CallbackParams::parse(
            raw(json!({
                "data": payload(json!({ "version": 3, "amount": 1.5, "is_3ds": false, "x": null })),
            })),
            &GatewayConfig::default(),
        )
        .unwrap();
        assert_eq!(params.text("version").as_deref(), Some("3"));
        assert_eq!(params.text("amount").as_deref(), Some("1.5"));
        assert_eq!(params.text("is_3ds").as_deref(), Some("false"));
        assert_eq!(params.text("x"), None);
        assert!(params.get("x").is_none());
    }
}
