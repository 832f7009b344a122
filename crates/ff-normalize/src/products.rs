//! Product payload normalization.
//!
//! Strict priority order, first matching branch wins:
//! 1. `products`: array of structured product objects (camelCase fields).
//! 2. `results`: array of database-row records, or a wrapped recommendation.
//! 3. `explanation`: freeform text, pipe-table extraction (may yield zero
//!    rows — that still settles the match).
//! 4. nothing recognizable: empty list.
//!
//! Branches never merge and the function never errors.

use ff_core::numeric::{field_f64, field_string};
use ff_model::ProductCard;
use serde_json::Value;

use crate::table::extract_table_rows;

/// Normalize any product-bearing payload into view cards.
pub fn normalize_products(payload: &Value) -> Vec<ProductCard> {
    let matchers: [fn(&Value) -> Option<Vec<ProductCard>>; 3] =
        [match_structured, match_rows, match_explanation];

    for matcher in matchers {
        if let Some(cards) = matcher(payload) {
            return cards;
        }
    }
    Vec::new()
}

/// Branch 1: explicit `products` array with structured fields.
fn match_structured(payload: &Value) -> Option<Vec<ProductCard>> {
    let items = payload.get("products")?.as_array()?;
    Some(items.iter().map(structured_card).collect())
}

fn structured_card(item: &Value) -> ProductCard {
    let mut card = ProductCard::placeholder();
    card.name = field_string(item.get("name"), "Unknown product");
    card.ticker = field_string(item.get("ticker").or_else(|| item.get("symbol")), "N/A");
    card.provider = field_string(item.get("provider").or_else(|| item.get("company")), "N/A");
    card.category = field_string(item.get("category"), "N/A");
    card.expense_ratio = field_f64(item.get("expenseRatio").or_else(|| item.get("expense_ratio")));
    card.description = field_string(item.get("description"), "");
    card.suitable_for = field_string(item.get("suitableFor").or_else(|| item.get("suitable_for")), "");

    if let Some(perf) = item.get("performance") {
        card.performance.one_year = field_f64(perf.get("oneYear").or_else(|| perf.get("one_year")));
        card.performance.three_year =
            field_f64(perf.get("threeYear").or_else(|| perf.get("three_year")));
        card.performance.since_inception = field_f64(
            perf.get("sinceInception")
                .or_else(|| perf.get("since_inception")),
        );
    }
    card
}

/// Branch 2: `results` rows straight from the product tables, with a side
/// door for the wrapped single-recommendation shape.
fn match_rows(payload: &Value) -> Option<Vec<ProductCard>> {
    if let Some(items) = payload.get("results").and_then(Value::as_array) {
        return Some(items.iter().map(row_card).collect());
    }

    // {has_recommendation, recommendations: [{recommended_symbol, ...}]}
    let recs = payload
        .get("recommendations")
        .and_then(Value::as_array)
        .filter(|items| {
            items
                .iter()
                .any(|r| r.get("recommended_symbol").is_some())
        })?;
    Some(recs.iter().map(recommendation_card).collect())
}

fn row_card(item: &Value) -> ProductCard {
    let mut card = ProductCard::placeholder();
    card.name = field_string(
        item.get("fund_name").or_else(|| item.get("name")),
        "Unknown product",
    );
    card.ticker = field_string(
        item.get("fund_symbol").or_else(|| item.get("symbol")),
        "N/A",
    );
    card.provider = field_string(
        item.get("fund_company").or_else(|| item.get("company")),
        "N/A",
    );
    card.category = field_string(
        item.get("assetclass_primary")
            .or_else(|| item.get("asset_class")),
        "N/A",
    );
    card.expense_ratio = field_f64(item.get("expense_ratio"));
    card.performance.one_year = field_f64(item.get("returns_1_year"));
    card.performance.three_year = field_f64(item.get("returns_3_year"));
    card.performance.since_inception = field_f64(item.get("returns_since_inception"));
    card.description = field_string(
        item.get("short_description")
            .or_else(|| item.get("description")),
        "",
    );
    card.suitable_for = field_string(item.get("suitable_for"), "");
    card
}

fn recommendation_card(item: &Value) -> ProductCard {
    let mut card = ProductCard::placeholder();
    card.ticker = field_string(item.get("recommended_symbol"), "N/A");
    card.name = field_string(item.get("recommended_symbol"), "Unknown product");
    card.description = field_string(item.get("recommended_rationale"), "");
    card.category = field_string(item.get("product_type"), "N/A");
    card
}

/// Branch 3: freeform explanation text. Present text settles the match even
/// when extraction finds nothing.
fn match_explanation(payload: &Value) -> Option<Vec<ProductCard>> {
    let text = payload.get("explanation")?.as_str()?;
    Some(extract_table_rows(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn structured_products_coerce_field_by_field() {
        let payload = json!({
            "products": [{
                "name": "Fund A",
                "ticker": "FA",
                "performance": {"oneYear": "12.5"},
                "expenseRatio": "0.5",
                "category": "Equity",
                "description": "Large-cap growth"
            }]
        });
        let cards = normalize_products(&payload);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].performance.one_year, 12.5);
        assert_eq!(cards[0].expense_ratio, 0.5);
        assert_eq!(cards[0].ticker, "FA");
    }

    #[test]
    fn structured_wins_over_explanation() {
        let payload = json!({
            "products": [{"name": "Fund A", "ticker": "FA"}],
            "explanation": "| Fund B (FB) | 0.40% | +8.3% | Equity |"
        });
        let cards = normalize_products(&payload);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].ticker, "FA");
    }

    #[test]
    fn db_rows_use_their_own_field_table() {
        let payload = json!({
            "results": [{
                "fund_name": "Vanguard Growth ETF",
                "fund_symbol": "VUG",
                "fund_company": "Vanguard",
                "assetclass_primary": "Equity",
                "returns_1_year": 12.5,
                "returns_3_year": "35.8",
                "expense_ratio": null,
                "short_description": "Growth-focused ETF"
            }]
        });
        let cards = normalize_products(&payload);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].name, "Vanguard Growth ETF");
        assert_eq!(cards[0].ticker, "VUG");
        assert_eq!(cards[0].performance.three_year, 35.8);
        assert_eq!(cards[0].expense_ratio, 0.0);
    }

    #[test]
    fn explanation_rows_extracted_when_no_arrays_present() {
        let payload = json!({"explanation": "| Fund B (FB) | 0.40% | +8.3% | Equity |"});
        let cards = normalize_products(&payload);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].ticker, "FB");
        assert_eq!(cards[0].performance.one_year, 8.3);
    }

    #[test]
    fn explanation_without_table_settles_as_empty() {
        let payload = json!({
            "explanation": "Sorry, I can only answer investment product related questions.",
            // a later-priority array must not resurrect the match
            "rows": [{"fund_name": "X"}]
        });
        assert!(normalize_products(&payload).is_empty());
    }

    #[test]
    fn wrapped_recommendation_maps_to_one_card() {
        let payload = json!({
            "has_recommendation": true,
            "recommendations": [{
                "product_type": "investment",
                "recommended_symbol": "VUG",
                "recommended_rationale": "Matches your growth profile"
            }],
            "is_existing": false
        });
        let cards = normalize_products(&payload);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].ticker, "VUG");
        assert!(cards[0].description.contains("growth profile"));
    }

    #[test]
    fn unrecognized_payload_is_empty_not_an_error() {
        assert!(normalize_products(&json!({})).is_empty());
        assert!(normalize_products(&json!(null)).is_empty());
        assert!(normalize_products(&json!({"products": "not an array"})).is_empty());
        assert!(normalize_products(&json!([1, 2, 3])).is_empty());
    }

    #[test]
    fn normalization_is_idempotent() {
        let payload = json!({
            "products": [{"name": "Fund A", "expenseRatio": "abc"}],
            "explanation": "| Fund B (FB) | 0.40% | +8.3% | Equity |"
        });
        assert_eq!(normalize_products(&payload), normalize_products(&payload));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_value() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::from),
            any::<f64>().prop_map(|f| serde_json::json!(f)),
            "[a-zA-Z0-9 |%().-]{0,32}".prop_map(Value::from),
        ];
        leaf.prop_recursive(3, 24, 6, |inner| {
            prop_oneof![
                proptest::collection::vec(inner.clone(), 0..4).prop_map(Value::from),
                proptest::collection::btree_map("[a-z_]{1,12}", inner, 0..4)
                    .prop_map(|m| serde_json::json!(m)),
            ]
        })
    }

    proptest! {
        // Totality and idempotence over arbitrary payloads: never panics,
        // never NaN, same output twice.
        #[test]
        fn total_and_idempotent(payload in arb_value()) {
            let a = normalize_products(&payload);
            let b = normalize_products(&payload);
            prop_assert_eq!(&a, &b);
            for card in &a {
                prop_assert!(card.expense_ratio.is_finite());
                prop_assert!(card.performance.one_year.is_finite());
                prop_assert!(card.performance.three_year.is_finite());
                prop_assert!(card.performance.since_inception.is_finite());
                prop_assert!(!card.name.is_empty());
            }
        }
    }
}
