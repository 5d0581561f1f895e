use super::{Callback, CallbackParams};
use crate::codec::{self, Signature};
use crate::{FieldMap, GatewayConfig, Result, SigningContext};
use serde_json::Value;

/// Fields re-serialised, in this order, to authenticate a browser return.
pub const RETURN_SIGNATURE_FIELDS: [&str; 8] = [
    "version",
    "public_key",
    "amount",
    "currency",
    "description",
    "order_id",
    "type",
    "sender_phone",
];

/// Browser redirect to `result_url` after payment.
///
/// Unlike [`Notification`](super::Notification), a return is authenticated
/// against a payload rebuilt from its own accessors: the fields in
/// [`RETURN_SIGNATURE_FIELDS`] are re-serialised (absent ones omitted, the
/// public key taken from the signing context, the amount rendered from its
/// exact decimal), base64-encoded and signed. A gateway payload whose
/// original layout differs from that reconstruction will not acknowledge.
#[derive(Debug, Clone)]
pub struct Return {
    params: CallbackParams,
    ctx: SigningContext,
}

impl Return {
    #[tracing::instrument(skip_all, fields(fields = raw.len()))]
    pub fn new(raw: FieldMap, ctx: SigningContext, config: &GatewayConfig) -> Result<Self> {
        let params = CallbackParams::parse(raw, config)?;
        tracing::debug!(order_id = ?params.text("order_id"), "decoded return");
        Ok(Self { params, ctx })
    }

    /// The field map whose encoding is signed to authenticate this return.
    pub fn signature_fields(&self) -> Result<FieldMap> {
        let mut json = FieldMap::new();
        for field in RETURN_SIGNATURE_FIELDS {
            let value = match field {
                "public_key" => Some(self.ctx.public_key())
                    .filter(|key| !key.is_empty())
                    .map(|key| Value::String(key.to_string())),
                "amount" => match self.params.get("amount") {
                    Some(_) => Some(Value::String(self.amount()?.to_string())),
                    None => None,
                },
                other => self.params.get(other).cloned(),
            };
            if let Some(value) = value {
                json.insert(field.to_string(), value);
            }
        }
        Ok(json)
    }
}

impl Callback for Return {
    fn params(&self) -> &CallbackParams {
        &self.params
    }

    fn generate_signature(&self) -> Result<Signature> {
        let data = codec::encode(&self.signature_fields()?)?;
        Ok(codec::sign(&data, &self.ctx))
    }
}
