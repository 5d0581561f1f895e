//! LiqPay checkout library.
//!
//! Client side of the LiqPay redirect checkout (API v3): build the signed
//! `data`/`signature` pair that sends a payer to the gateway, and
//! authenticate the callbacks the gateway sends back.
//!
//! This crate is stateless and performs no I/O. Rendering the checkout form,
//! parsing query strings, and persisting orders are left to the caller.
//!
//! # Features
//!
//! - **Signature codec**: base64 JSON payloads signed with
//!   `SHA1(private_key || data || private_key)`
//! - **Checkout builder**: whitelisted, ordered payload fields
//! - **Callback verification**: server notifications and browser returns
//!
//! # Example
//!
//! ```
//! use liqpay_lib::prelude::*;
//!
//! let liqpay = Liqpay::new(GatewayConfig::default(), SigningContext::new("private", "public"));
//!
//! let request = liqpay
//!     .checkout(
//!         "order-42",
//!         CheckoutOptions::new()
//!             .with_amount(Amount::from_str_checked("10.00").unwrap())
//!             .with_currency("UAH")
//!             .with_description("Coffee beans"),
//!     )
//!     .unwrap();
//!
//! for (name, value) in request.form_fields() {
//!     assert!(!value.is_empty(), "{} must be set", name);
//! }
//! ```

pub mod amount;
pub mod callback;
pub mod checkout;
pub mod codec;
pub mod config;
pub mod errors;
pub mod gateway;
pub mod prelude;

/// Test utilities for callback testing.
///
/// This module is only available with the `test-utils` feature or in test builds.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use amount::Amount;
pub use callback::{Callback, Notification, PaymentStatus, PaymentType, Return};
pub use checkout::{CheckoutBuilder, CheckoutOptions, CheckoutRequest};
pub use codec::{Payload, Signature};
pub use config::{GatewayConfig, SigningContext};
pub use errors::{LiqpayError, LiqpayErrorCode};
pub use gateway::Liqpay;

/// Common result alias for LiqPay operations.
pub type Result<T> = std::result::Result<T, LiqpayError>;

/// Insertion-ordered map of payload fields.
pub type FieldMap = serde_json::Map<String, serde_json::Value>;
