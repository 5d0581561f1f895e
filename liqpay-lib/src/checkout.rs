//! Checkout request construction.
//!
//! A [`CheckoutBuilder`] collects merchant fields, keeps only the ones the
//! gateway understands, and produces the two-field [`CheckoutRequest`] the
//! payer's browser POSTs to the service URL.

use crate::codec::{self, Payload, Signature};
use crate::{Amount, FieldMap, Result, SigningContext};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Protocol version forced into every checkout payload.
pub const PROTOCOL_VERSION: &str = "3";

/// Transport keys allowed in the payload, in the order they are serialised.
pub const CHECKOUT_FIELDS: [&str; 15] = [
    "version",
    "public_key",
    "amount",
    "currency",
    "description",
    "order_id",
    "type",
    "subscribe",
    "subscribe_date_start",
    "subscribe_periodicity",
    "server_url",
    "result_url",
    "pay_way",
    "language",
    "sandbox",
];

/// Logical option names that are sent under a different transport key.
///
/// Options not listed here use their own name as the transport key.
/// `phone` maps to `default_phone`, which is outside [`CHECKOUT_FIELDS`] and
/// therefore never transmitted.
pub const FIELD_MAPPINGS: [(&str, &str); 10] = [
    ("account", "public_key"),
    ("amount", "amount"),
    ("currency", "currency"),
    ("order", "order_id"),
    ("description", "description"),
    ("phone", "default_phone"),
    ("test", "sandbox"),
    ("sandbox", "sandbox"),
    ("notify_url", "server_url"),
    ("return_url", "result_url"),
];

/// Resolve the transport key for a logical option name.
pub fn transport_key(logical: &str) -> &str {
    FIELD_MAPPINGS
        .iter()
        .find(|(name, _)| *name == logical)
        .map(|(_, key)| *key)
        .unwrap_or(logical)
}

/// Merchant-supplied checkout options.
///
/// All fields are optional; blank values are dropped rather than sent empty.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckoutOptions {
    #[serde(default)]
    pub amount: Option<Amount>,
    /// ISO 4217 currency code.
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Server-to-server callback URL (`server_url`).
    #[serde(default)]
    pub notify_url: Option<String>,
    /// Browser redirect URL after payment (`result_url`).
    #[serde(default)]
    pub return_url: Option<String>,
    /// Payment method hint, e.g. `card,privat24`.
    #[serde(default)]
    pub pay_way: Option<String>,
    /// Checkout page locale hint.
    #[serde(default)]
    pub language: Option<String>,
    /// Operation type, e.g. `buy`, `donate` or `subscribe`.
    #[serde(default, rename = "type")]
    pub payment_type: Option<String>,
    #[serde(default)]
    pub subscribe: Option<String>,
    #[serde(default)]
    pub subscribe_date_start: Option<String>,
    #[serde(default)]
    pub subscribe_periodicity: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    /// Raw test-mode flag; see [`normalize_sandbox`].
    #[serde(default)]
    pub sandbox: Option<String>,
}

impl CheckoutOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_amount(mut self, amount: Amount) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_notify_url(mut self, url: impl Into<String>) -> Self {
        self.notify_url = Some(url.into());
        self
    }

    pub fn with_return_url(mut self, url: impl Into<String>) -> Self {
        self.return_url = Some(url.into());
        self
    }

    pub fn with_pay_way(mut self, pay_way: impl Into<String>) -> Self {
        self.pay_way = Some(pay_way.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_payment_type(mut self, payment_type: impl Into<String>) -> Self {
        self.payment_type = Some(payment_type.into());
        self
    }

    /// Set recurring-payment parameters.
    pub fn with_subscription(
        mut self,
        date_start: impl Into<String>,
        periodicity: impl Into<String>,
    ) -> Self {
        self.subscribe = Some("1".to_string());
        self.subscribe_date_start = Some(date_start.into());
        self.subscribe_periodicity = Some(periodicity.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Set the test-mode flag from a boolean.
    pub fn with_sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = Some(sandbox.to_string());
        self
    }

    /// Set the test-mode flag from an untyped value, as read from merchant
    /// configuration.
    pub fn with_sandbox_raw(mut self, sandbox: impl Into<String>) -> Self {
        self.sandbox = Some(sandbox.into());
        self
    }

    /// Logical name/value pairs, excluding the sandbox flag.
    fn entries(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("amount", self.amount.map(|a| a.to_string())),
            ("currency", self.currency.clone()),
            ("description", self.description.clone()),
            ("notify_url", self.notify_url.clone()),
            ("return_url", self.return_url.clone()),
            ("pay_way", self.pay_way.clone()),
            ("language", self.language.clone()),
            ("type", self.payment_type.clone()),
            ("subscribe", self.subscribe.clone()),
            ("subscribe_date_start", self.subscribe_date_start.clone()),
            ("subscribe_periodicity", self.subscribe_periodicity.clone()),
            ("phone", self.phone.clone()),
        ]
    }
}

/// Normalise the test-mode flag to the gateway's `"1"`/`"0"` form.
///
/// A value that already contains a run of digits is passed through untouched;
/// anything else becomes `"1"` when it is exactly `"true"` and `"0"`
/// otherwise, including when no flag was given.
///
/// ```rust
/// use liqpay_lib::checkout::normalize_sandbox;
///
/// assert_eq!(normalize_sandbox(Some("true")), "1");
/// assert_eq!(normalize_sandbox(Some("1")), "1");
/// assert_eq!(normalize_sandbox(None), "0");
/// ```
pub fn normalize_sandbox(raw: Option<&str>) -> String {
    let raw = raw.unwrap_or_default();
    if raw.trim().chars().any(|c| c.is_ascii_digit()) {
        raw.to_string()
    } else if raw == "true" {
        "1".to_string()
    } else {
        "0".to_string()
    }
}

/// The only two fields ever submitted to the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRequest {
    pub data: Payload,
    pub signature: Signature,
}

impl CheckoutRequest {
    /// Ordered form fields for the external form renderer.
    pub fn form_fields(&self) -> [(&'static str, &str); 2] {
        [
            ("data", self.data.as_str()),
            ("signature", self.signature.as_str()),
        ]
    }
}

/// Assembles the whitelisted checkout payload for one order.
///
/// # Example
///
/// ```rust
/// use liqpay_lib::checkout::{CheckoutBuilder, CheckoutOptions};
/// use liqpay_lib::{codec, Amount, SigningContext};
///
/// let ctx = SigningContext::new("private", "public");
/// let options = CheckoutOptions::new()
///     .with_amount(Amount::from_str_checked("10.00").unwrap())
///     .with_currency("UAH")
///     .with_sandbox(true);
///
/// let request = CheckoutBuilder::new("order-1", &ctx, options).build().unwrap();
/// assert!(codec::verify(&request.data, &ctx, request.signature.as_str()));
/// ```
#[derive(Debug, Clone)]
pub struct CheckoutBuilder<'a> {
    ctx: &'a SigningContext,
    fields: HashMap<String, String>,
    test: Option<String>,
}

impl<'a> CheckoutBuilder<'a> {
    /// Start a checkout for `order_id`, signed with `ctx`.
    ///
    /// The account (`public_key`) comes from the signing context.
    pub fn new(
        order_id: impl Into<String>,
        ctx: &'a SigningContext,
        options: CheckoutOptions,
    ) -> Self {
        let mut builder = Self {
            ctx,
            fields: HashMap::new(),
            test: options.sandbox.clone(),
        };
        builder.add_field(transport_key("order"), order_id.into());
        for (logical, value) in options.entries() {
            if let Some(value) = value {
                builder.add_field(transport_key(logical), value);
            }
        }
        builder
    }

    /// Set a raw transport field.
    ///
    /// Blank names or values are ignored. Keys outside [`CHECKOUT_FIELDS`]
    /// are accepted here but never reach the payload.
    pub fn add_field(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        if key.trim().is_empty() || value.trim().is_empty() {
            return self;
        }
        self.fields.insert(key, value);
        self
    }

    /// The ordered, whitelisted field map that will be encoded.
    pub fn field_map(&self) -> FieldMap {
        let mut json = FieldMap::new();
        for field in CHECKOUT_FIELDS {
            let value = match field {
                "version" => Some(PROTOCOL_VERSION.to_string()),
                "public_key" => Some(self.ctx.public_key().to_string())
                    .filter(|key| !key.trim().is_empty()),
                "sandbox" => Some(normalize_sandbox(self.test.as_deref())),
                other => self.fields.get(other).cloned(),
            };
            if let Some(value) = value {
                json.insert(field.to_string(), Value::String(value));
            }
        }
        json
    }

    /// Encode and sign the checkout payload.
    #[tracing::instrument(skip(self), fields(order_id = self.fields.get("order_id").map(String::as_str)))]
    pub fn build(&self) -> Result<CheckoutRequest> {
        let fields = self.field_map();
        let dropped = self
            .fields
            .keys()
            .filter(|key| !CHECKOUT_FIELDS.contains(&key.as_str()))
            .count();
        if dropped > 0 {
            tracing::debug!(dropped, "ignoring fields outside the checkout whitelist");
        }

        let data = codec::encode(&fields)?;
        let signature = codec::sign(&data, self.ctx);
        tracing::debug!(fields = fields.len(), "built checkout request");

        Ok(CheckoutRequest { data, signature })
    }
}
