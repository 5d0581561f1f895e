//! Merchant Checkout Example
//!
//! This example walks through one LiqPay order:
//! - Building the signed checkout form fields
//! - Receiving the gateway's server notification
//! - Authenticating it before marking the order paid
//!
//! # Usage
//!
//! ```bash
//! RUST_LOG=liqpay_lib=debug cargo run --example merchant_checkout
//! ```

use liqpay_lib::callback::field_map_from_pairs;
use liqpay_lib::prelude::*;
use liqpay_lib::codec;
use std::collections::HashMap;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug, PartialEq)]
enum OrderStatus {
    AwaitingPayment,
    Paid,
    Rejected,
}

#[derive(Clone, Debug)]
struct Order {
    total: Amount,
    currency: String,
    status: OrderStatus,
}

/// Simple merchant order book.
struct Shop {
    liqpay: Liqpay,
    orders: HashMap<String, Order>,
}

impl Shop {
    fn new(liqpay: Liqpay) -> Self {
        Self {
            liqpay,
            orders: HashMap::new(),
        }
    }

    fn place_order(&mut self, order_id: &str, total: Amount, currency: &str) -> Result<CheckoutRequest> {
        self.orders.insert(
            order_id.to_string(),
            Order {
                total,
                currency: currency.to_string(),
                status: OrderStatus::AwaitingPayment,
            },
        );

        self.liqpay.checkout(
            order_id,
            CheckoutOptions::new()
                .with_amount(total)
                .with_currency(currency)
                .with_description(format!("Order {}", order_id))
                .with_notify_url("https://shop.example/liqpay/server")
                .with_return_url("https://shop.example/thanks")
                .with_sandbox(true),
        )
    }

    fn handle_server_callback(&mut self, raw: FieldMap) -> Result<()> {
        if !self.liqpay.recognizes(&raw) {
            println!("   Ignoring callback for another integration");
            return Ok(());
        }

        let notification = self.liqpay.notification(raw)?;
        let order_id = notification.order_id().unwrap_or_default();
        let Some(order) = self.orders.get_mut(&order_id) else {
            println!("   Unknown order {}", order_id);
            return Ok(());
        };

        if !notification.acknowledge() {
            println!("   Signature rejected for order {}", order_id);
            order.status = OrderStatus::Rejected;
            return Ok(());
        }

        let paid = notification.amount()?;
        if notification.is_complete()
            && paid == order.total
            && notification.currency().as_deref() == Some(order.currency.as_str())
        {
            order.status = OrderStatus::Paid;
        }
        println!(
            "   Order {} -> {:?} (status {:?})",
            order_id,
            order.status,
            notification.status()
        );
        Ok(())
    }
}

/// What the gateway would POST back to `server_url` once the payer paid.
fn simulate_gateway(ctx: &SigningContext, order_id: &str, amount: &str, currency: &str) -> FieldMap {
    let json = format!(
        r#"{{"action":"pay","status":"sandbox","amount":{},"currency":"{}","order_id":"{}","transaction_id":1000001,"action_name":"server_url"}}"#,
        amount, currency, order_id
    );
    let data = codec::encode_bytes(json.as_bytes());
    let signature = codec::sign(&data, ctx);

    field_map_from_pairs([
        ("data", data.as_str()),
        ("signature", signature.as_str()),
        ("amount", amount),
        ("order_id", order_id),
    ])
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== LiqPay merchant checkout ===\n");

    let ctx = SigningContext::new("sandbox_private_key", "sandbox_public_key");
    let mut shop = Shop::new(Liqpay::new(GatewayConfig::default(), ctx.clone()));

    println!("1. Placing order");
    let total = Amount::from_str_checked("249.50")?;
    let request = shop.place_order("order-1001", total, "UAH")?;
    println!("   POST {}", shop.liqpay.service_url());
    for (name, value) in request.form_fields() {
        println!("   {} = {}", name, value);
    }

    println!("\n2. Genuine server notification");
    shop.handle_server_callback(simulate_gateway(&ctx, "order-1001", "249.5", "UAH"))?;

    println!("\n3. Forged notification (wrong key)");
    shop.place_order("order-1002", total, "UAH")?;
    let forger = SigningContext::new("guessed_key", "sandbox_public_key");
    shop.handle_server_callback(simulate_gateway(&forger, "order-1002", "249.5", "UAH"))?;

    println!("\n=== Done ===");
    Ok(())
}
