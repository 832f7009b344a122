//! Integration test for the pieces a view composes during one fetch: the
//! request slot, the fabricated progress timeline, and the normalizer output
//! that eventually settles the slot.

use std::time::Duration;

use ff_app::{GateDecision, RequestSlot, RequestState, gate, progress};
use ff_model::ProductCard;
use ff_normalize::normalize_products;
use serde_json::json;

#[test]
fn product_search_happy_path() {
    // Gate passes for a signed-in non-admin user on an ordinary view.
    assert_eq!(gate::decide(true, false, false), GateDecision::Allow);

    let mut slot: RequestSlot<Vec<ProductCard>> = RequestSlot::default();
    let ticket = slot.begin();
    assert!(slot.is_loading());

    // While in flight the view samples the fabricated timeline.
    let timeline = progress::product_search();
    let early = timeline.sample(Duration::from_secs(1));
    let late = timeline.sample(Duration::from_secs(60));
    assert!(early.percent < late.percent);
    assert_eq!(late.percent, 100.0);

    // The real response settles the slot; the timeline is simply no longer
    // sampled after this point.
    let payload = json!({
        "products": [{
            "name": "Global Growth Fund",
            "ticker": "GGF",
            "performance": {"oneYear": 7.4},
            "expenseRatio": 0.35
        }]
    });
    assert!(slot.resolve(ticket, Ok(normalize_products(&payload))));

    let cards = slot.state().value().expect("slot should hold results");
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].ticker, "GGF");
}

#[test]
fn retry_during_flight_keeps_only_the_retry_result() {
    let mut slot: RequestSlot<Vec<ProductCard>> = RequestSlot::default();
    let stale = slot.begin();
    let current = slot.begin();

    let stale_cards = normalize_products(&json!({"products": [{"name": "Old"}]}));
    let fresh_cards = normalize_products(&json!({"products": [{"name": "New"}]}));

    assert!(!slot.resolve(stale, Ok(stale_cards)));
    assert!(slot.resolve(current, Ok(fresh_cards)));
    assert_eq!(slot.state().value().map(|c| c[0].name.as_str()), Some("New"));
}

#[test]
fn unrecognized_payload_settles_as_empty_not_failed() {
    let mut slot: RequestSlot<Vec<ProductCard>> = RequestSlot::default();
    let ticket = slot.begin();
    assert!(slot.resolve(ticket, Ok(normalize_products(&json!({"status": "ok"})))));
    match slot.state() {
        RequestState::Ready(cards) => assert!(cards.is_empty()),
        other => panic!("expected Ready, got {other:?}"),
    }
}
