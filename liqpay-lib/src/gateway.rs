//! Merchant-facing entry point tying configuration and keys together.

use crate::callback::{self, Notification, Return};
use crate::checkout::{CheckoutBuilder, CheckoutOptions, CheckoutRequest};
use crate::{FieldMap, GatewayConfig, Result, SigningContext};

/// A configured LiqPay merchant integration.
///
/// Cheap to clone and safe to share across threads; every checkout and
/// callback it creates is independent.
///
/// # Example
///
/// ```rust
/// use liqpay_lib::prelude::*;
///
/// let liqpay = Liqpay::new(
///     GatewayConfig::default(),
///     SigningContext::new("private", "public"),
/// );
/// let request = liqpay
///     .checkout("order-7", CheckoutOptions::new().with_currency("UAH"))
///     .unwrap();
/// assert_eq!(liqpay.service_url(), "https://www.liqpay.com/api/checkout");
/// assert!(!request.data.as_str().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Liqpay {
    config: GatewayConfig,
    ctx: SigningContext,
}

impl Liqpay {
    pub fn new(config: GatewayConfig, ctx: SigningContext) -> Self {
        Self { config, ctx }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn signing_context(&self) -> &SigningContext {
        &self.ctx
    }

    /// Form action for the checkout request.
    pub fn service_url(&self) -> &str {
        &self.config.service_url
    }

    /// Start a checkout builder for further field customisation.
    pub fn checkout_builder(
        &self,
        order_id: impl Into<String>,
        options: CheckoutOptions,
    ) -> CheckoutBuilder<'_> {
        CheckoutBuilder::new(order_id, &self.ctx, options)
    }

    /// Build a signed checkout request.
    pub fn checkout(
        &self,
        order_id: impl Into<String>,
        options: CheckoutOptions,
    ) -> Result<CheckoutRequest> {
        self.checkout_builder(order_id, options).build()
    }

    /// Parse a server-to-server notification.
    pub fn notification(&self, raw: FieldMap) -> Result<Notification> {
        Notification::new(raw, self.ctx.clone(), &self.config)
    }

    /// Parse a browser return.
    pub fn return_callback(&self, raw: FieldMap) -> Result<Return> {
        Return::new(raw, self.ctx.clone(), &self.config)
    }

    /// Whether a raw callback belongs to this gateway.
    pub fn recognizes(&self, raw: &FieldMap) -> bool {
        callback::recognizes(raw)
    }
}
