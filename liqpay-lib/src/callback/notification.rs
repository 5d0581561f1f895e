use super::{Callback, CallbackParams};
use crate::codec::{self, Signature};
use crate::{FieldMap, GatewayConfig, Result, SigningContext};

/// Server-to-server callback POSTed to `server_url`.
///
/// Authenticates the exact bytes the gateway sent: the decoded JSON is
/// re-encoded as-is and signed, never re-serialised, so key order and number
/// formatting cannot drift from what the gateway signed.
///
/// # Example
///
/// ```rust
/// use liqpay_lib::callback::{field_map_from_pairs, Callback, Notification};
/// use liqpay_lib::{codec, GatewayConfig, SigningContext};
///
/// let ctx = SigningContext::new("private", "public");
/// let data = codec::encode_bytes(br#"{"status":"success","amount":"10.00","order_id":"X1"}"#);
/// let signature = codec::sign(&data, &ctx);
///
/// let raw = field_map_from_pairs([
///     ("data", data.as_str()),
///     ("signature", signature.as_str()),
/// ]);
/// let notification = Notification::new(raw, ctx, &GatewayConfig::default()).unwrap();
/// assert!(notification.acknowledge());
/// assert!(notification.is_complete());
/// ```
#[derive(Debug, Clone)]
pub struct Notification {
    params: CallbackParams,
    ctx: SigningContext,
}

impl Notification {
    #[tracing::instrument(skip_all, fields(fields = raw.len()))]
    pub fn new(raw: FieldMap, ctx: SigningContext, config: &GatewayConfig) -> Result<Self> {
        let params = CallbackParams::parse(raw, config)?;
        tracing::debug!(order_id = ?params.text("order_id"), "decoded notification");
        Ok(Self { params, ctx })
    }
}

impl Callback for Notification {
    fn params(&self) -> &CallbackParams {
        &self.params
    }

    fn generate_signature(&self) -> Result<Signature> {
        let data = codec::encode_bytes(self.params.decoded_bytes());
        Ok(codec::sign(&data, &self.ctx))
    }
}
