//! Configuration types for the LiqPay integration.

use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Default checkout endpoint the payer's browser is redirected to.
pub const DEFAULT_SERVICE_URL: &str = "https://www.liqpay.com/api/checkout";

/// Default name of the callback field carrying the signature.
pub const DEFAULT_SIGNATURE_PARAMETER: &str = "signature";

/// Gateway-wide settings, set once at startup and shared read-only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// URL the checkout form is POSTed to.
    #[serde(default = "default_service_url")]
    pub service_url: String,

    /// Callback field holding the transmitted signature.
    #[serde(default = "default_signature_parameter")]
    pub signature_parameter_name: String,
}

fn default_service_url() -> String {
    DEFAULT_SERVICE_URL.to_string()
}

fn default_signature_parameter() -> String {
    DEFAULT_SIGNATURE_PARAMETER.to_string()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            service_url: default_service_url(),
            signature_parameter_name: default_signature_parameter(),
        }
    }
}

impl GatewayConfig {
    /// Create a configuration with the documented defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the checkout service URL.
    pub fn with_service_url(mut self, url: impl Into<String>) -> Self {
        self.service_url = url.into();
        self
    }

    /// Override the callback signature field name.
    pub fn with_signature_parameter_name(mut self, name: impl Into<String>) -> Self {
        self.signature_parameter_name = name.into();
        self
    }
}

/// Merchant key pair used to sign and verify one transaction.
///
/// The private key is wiped on drop and never printed by `Debug`.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SigningContext {
    private_key: String,
    public_key: String,
}

impl SigningContext {
    /// Create a signing context from the merchant's key pair.
    pub fn new(private_key: impl Into<String>, public_key: impl Into<String>) -> Self {
        Self {
            private_key: private_key.into(),
            public_key: public_key.into(),
        }
    }

    pub fn private_key(&self) -> &str {
        &self.private_key
    }

    /// Public key (merchant account identifier) sent as `public_key`.
    pub fn public_key(&self) -> &str {
        &self.public_key
    }
}

impl fmt::Debug for SigningContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningContext")
            .field("private_key", &"<redacted>")
            .field("public_key", &self.public_key)
            .finish()
    }
}
