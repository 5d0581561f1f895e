//! Test utilities for LiqPay integrations.
//!
//! Provides a fixed merchant key pair and helpers that produce callback
//! messages signed the way the gateway signs them.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use liqpay_lib::test_utils::{signed_message, TestFixtures};
//!
//! let raw = signed_message(br#"{"status":"success","amount":"1","order_id":"A"}"#);
//! let notification = Notification::new(raw, TestFixtures::signing_context(), &config)?;
//! assert!(notification.acknowledge());
//! ```

mod fixtures;

pub use fixtures::{signed_message, signed_message_with, TestFixtures};
