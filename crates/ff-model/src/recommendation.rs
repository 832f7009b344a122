//! Saved product recommendations.

use serde::{Deserialize, Serialize};

/// One stored recommendation row.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct UserRecommendation {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub product_type: String,
    #[serde(default)]
    pub product_id: i64,
    #[serde(default)]
    pub recommended_symbol: String,
    #[serde(default)]
    pub recommended_rationale: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// `GET/POST /api/recommendations` response.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RecommendationResponse {
    #[serde(default)]
    pub has_recommendation: bool,
    #[serde(default)]
    pub recommendations: Vec<UserRecommendation>,
    #[serde(default)]
    pub is_existing: bool,
    /// Present when the backend has nothing to recommend ("no_products").
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_recommendation_payload() {
        let r: RecommendationResponse = serde_json::from_str(
            r#"{"has_recommendation":false,
                "message":"No suitable investment products found at this time. Please try again later.",
                "action":"no_products"}"#,
        )
        .expect("no-products payload");
        assert!(!r.has_recommendation);
        assert!(r.recommendations.is_empty());
        assert_eq!(r.action.as_deref(), Some("no_products"));
    }
}
