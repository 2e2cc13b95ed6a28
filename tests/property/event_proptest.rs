//! Property-based tests for relay events
//!
//! Payloads are opaque: whatever JSON a client sends is what the other
//! connections receive.

use proptest::prelude::*;
use relaychat::shared::{ClientEvent, ServerEvent};
use serde_json::{json, Value};

fn payload_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        ".*".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 16, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::hash_map("[a-z]{1,6}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

proptest! {
    #[test]
    fn test_message_payload_relayed_verbatim(payload in payload_strategy()) {
        let frame = json!({ "event": "send_message", "data": payload.clone() }).to_string();
        let event = ClientEvent::from_frame(&frame).unwrap();
        let relayed = event.into_relayed();

        prop_assert_eq!(&relayed, &ServerEvent::ReceiveMessage(payload.clone()));

        let outbound: Value = serde_json::from_str(&relayed.to_frame().unwrap()).unwrap();
        prop_assert_eq!(&outbound["event"], &json!("receive_message"));
        prop_assert_eq!(&outbound["data"], &payload);
    }

    #[test]
    fn test_unknown_event_names_rejected(name in "[a-z_]{1,12}") {
        prop_assume!(name != "send_message" && name != "send_image");
        let frame = json!({ "event": name, "data": null }).to_string();
        prop_assert!(ClientEvent::from_frame(&frame).is_err());
    }
}
