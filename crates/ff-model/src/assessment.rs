//! Financial health assessment (dashboard cards).

use serde::{Deserialize, Serialize};

/// One dimension of the assessment ("Everyday money", "Investments",
/// "Retirement").
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DiagnosticDimension {
    /// "Good", "Needs Attention", "Critical".
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub areas_for_improvement: Vec<String>,
}

/// `GET /api/financial-assessment` response.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FinancialAssessment {
    #[serde(default)]
    pub introduction: String,
    #[serde(default)]
    pub everyday_money: DiagnosticDimension,
    #[serde(default)]
    pub investments: DiagnosticDimension,
    #[serde(default)]
    pub retirement: DiagnosticDimension,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub schema_version: Option<String>,
}

impl FinancialAssessment {
    pub fn dimensions(&self) -> [(&'static str, &DiagnosticDimension); 3] {
        [
            ("Everyday money", &self.everyday_money),
            ("Investments", &self.investments),
            ("Retirement", &self.retirement),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assessment_deserializes_and_enumerates() {
        let a: FinancialAssessment = serde_json::from_str(
            r#"{"introduction":"Overall you are on track.",
                "everyday_money":{"status":"Good","strengths":["Positive cashflow"],
                                  "areas_for_improvement":[]},
                "investments":{"status":"Needs Attention","strengths":[],
                               "areas_for_improvement":["Diversify holdings"]},
                "retirement":{"status":"Good","strengths":[],"areas_for_improvement":[]}}"#,
        )
        .expect("assessment payload");
        let dims = a.dimensions();
        assert_eq!(dims[0].0, "Everyday money");
        assert_eq!(dims[1].1.status, "Needs Attention");
    }
}
