//! Canonical product view model consumed by the render layer.
//!
//! Produced exclusively by `ff-normalize`; views never read raw payloads.

use serde::{Deserialize, Serialize};

/// Return figures in percent. Always finite; malformed inputs coerce to 0.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Performance {
    pub one_year: f64,
    pub three_year: f64,
    pub since_inception: f64,
}

/// One normalized product card.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ProductCard {
    pub name: String,
    /// "N/A" when no ticker could be determined.
    pub ticker: String,
    pub provider: String,
    pub category: String,
    /// Percent; 0 when unknown.
    pub expense_ratio: f64,
    pub performance: Performance,
    pub description: String,
    pub suitable_for: String,
}

impl ProductCard {
    /// Placeholder-filled card; normalizer branches start from this and
    /// overwrite what the payload provides.
    pub fn placeholder() -> Self {
        Self {
            name: "Unknown product".to_string(),
            ticker: "N/A".to_string(),
            provider: "N/A".to_string(),
            category: "N/A".to_string(),
            expense_ratio: 0.0,
            performance: Performance::default(),
            description: String::new(),
            suitable_for: String::new(),
        }
    }
}
