//! Property-based tests for liqpay-lib
//!
//! These tests use proptest to verify codec and verification invariants
//! across a wide range of inputs.

mod common;

#[cfg(test)]
mod codec_properties {
    use liqpay_lib::{codec, FieldMap, SigningContext};
    use proptest::prelude::*;
    use serde_json::Value;

    fn field_map() -> impl Strategy<Value = FieldMap> {
        prop::collection::vec(("[a-z_]{1,12}", "\\PC{0,40}"), 0..10).prop_map(|pairs| {
            pairs
                .into_iter()
                .map(|(k, v)| (k, Value::String(v)))
                .collect()
        })
    }

    proptest! {
        /// decode(encode(f)) == f
        #[test]
        fn encode_decode_roundtrip(fields in field_map()) {
            let payload = codec::encode(&fields).unwrap();
            prop_assert_eq!(codec::decode(&payload).unwrap(), fields);
        }

        /// Payloads are always a single line
        #[test]
        fn payload_single_line(fields in field_map()) {
            let payload = codec::encode(&fields).unwrap();
            prop_assert!(!payload.as_str().contains('\n'));
        }

        /// Same payload and key always yield the same signature
        #[test]
        fn sign_deterministic(data in "[A-Za-z0-9+/=]{0,200}", key in "\\PC{1,32}") {
            let ctx = SigningContext::new(key.clone(), "pk");
            let payload = codec::Payload::new(data);
            prop_assert_eq!(codec::sign(&payload, &ctx), codec::sign(&payload, &ctx));
        }

        /// A signature produced for a payload always verifies
        #[test]
        fn verification_sound(fields in field_map(), key in "\\PC{1,32}") {
            let ctx = SigningContext::new(key, "pk");
            let payload = codec::encode(&fields).unwrap();
            let signature = codec::sign(&payload, &ctx);
            prop_assert!(codec::verify(&payload, &ctx, signature.as_str()));
        }

        /// Flipping any byte of the payload breaks verification
        #[test]
        fn payload_tamper_detected(fields in field_map(), index in any::<prop::sample::Index>()) {
            let ctx = SigningContext::new("secret", "pk");
            let payload = codec::encode(&fields).unwrap();
            let signature = codec::sign(&payload, &ctx);

            let mut bytes = payload.as_str().as_bytes().to_vec();
            let i = index.index(bytes.len());
            bytes[i] = if bytes[i] == b'A' { b'B' } else { b'A' };
            let tampered = codec::Payload::new(String::from_utf8(bytes).unwrap());

            prop_assert!(!codec::verify(&tampered, &ctx, signature.as_str()));
        }

        /// Flipping any byte of the signature breaks verification
        #[test]
        fn signature_tamper_detected(fields in field_map(), index in any::<prop::sample::Index>()) {
            let ctx = SigningContext::new("secret", "pk");
            let payload = codec::encode(&fields).unwrap();
            let signature = codec::sign(&payload, &ctx).into_string();

            let mut bytes = signature.into_bytes();
            let i = index.index(bytes.len());
            bytes[i] = if bytes[i] == b'A' { b'B' } else { b'A' };
            let tampered = String::from_utf8(bytes).unwrap();

            prop_assert!(!codec::verify(&payload, &ctx, &tampered));
        }

        /// A different private key never verifies
        #[test]
        fn wrong_key_rejected(fields in field_map(), a in "[a-z]{8,16}", b in "[A-Z]{8,16}") {
            let payload = codec::encode(&fields).unwrap();
            let signature = codec::sign(&payload, &SigningContext::new(a, "pk"));
            prop_assert!(!codec::verify(&payload, &SigningContext::new(b, "pk"), signature.as_str()));
        }
    }
}

#[cfg(test)]
mod callback_properties {
    use super::common::gateway_callback;
    use liqpay_lib::callback::recognizes;
    use liqpay_lib::{FieldMap, PaymentStatus};
    use proptest::prelude::*;
    use serde_json::{json, Value};

    proptest! {
        /// Messages lacking amount or order_id are never recognised
        #[test]
        fn recognition_requires_both_keys(keys in prop::collection::vec("[a-z_]{1,10}", 0..8)) {
            let map: FieldMap = keys
                .iter()
                .filter(|k| k.as_str() != "amount" && k.as_str() != "order_id")
                .map(|k| (k.clone(), Value::String("v".into())))
                .collect();

            let mut with_amount = map.clone();
            with_amount.insert("amount".into(), json!("1"));
            let mut with_order = map.clone();
            with_order.insert("order_id".into(), json!("1"));

            prop_assert!(!recognizes(&map));
            prop_assert!(!recognizes(&with_amount));
            prop_assert!(!recognizes(&with_order));

            with_amount.insert("order_id".into(), json!("1"));
            prop_assert!(recognizes(&with_amount));
        }

        /// Only success and sandbox are complete
        #[test]
        fn completion_classification(status in "[a-z_]{1,16}") {
            let expected = status == "success" || status == "sandbox";
            prop_assert_eq!(PaymentStatus::from(status.as_str()).is_complete(), expected);
        }

        /// Gateway-signed notifications always acknowledge
        #[test]
        fn signed_notification_acknowledged(
            amount in "[1-9][0-9]{0,5}\\.[0-9]{2}",
            order_id in "[A-Z0-9-]{1,20}",
        ) {
            use liqpay_lib::{Callback, GatewayConfig, Liqpay};

            let raw = gateway_callback(&json!({
                "amount": amount.clone(),
                "order_id": order_id,
                "status": "success",
            }));
            let liqpay = Liqpay::new(GatewayConfig::default(), super::common::merchant());
            let notification = liqpay.notification(raw).unwrap();
            prop_assert!(notification.acknowledge());
            prop_assert_eq!(notification.amount().unwrap().to_string(), amount);
        }
    }
}
