//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use liqpay_lib::prelude::*;
//! ```
//!
//! ## What's Included
//!
//! - Entry point: `Liqpay`, `GatewayConfig`, `SigningContext`
//! - Checkout: `CheckoutBuilder`, `CheckoutOptions`, `CheckoutRequest`
//! - Callbacks: the `Callback` trait, `Notification`, `Return`, `PaymentStatus`
//! - Error types: `LiqpayError`, `LiqpayErrorCode`, `Result`

// Entry point and configuration
pub use crate::config::{GatewayConfig, SigningContext};
pub use crate::gateway::Liqpay;

// Core types
pub use crate::codec::{Payload, Signature};
pub use crate::{Amount, FieldMap};

// Error handling
pub use crate::errors::{LiqpayError, LiqpayErrorCode};
pub use crate::Result;

// Checkout
pub use crate::checkout::{CheckoutBuilder, CheckoutOptions, CheckoutRequest};

// Callbacks
pub use crate::callback::{
    field_map_from_pairs, Callback, Notification, PaymentStatus, PaymentType, Return,
};
