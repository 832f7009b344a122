//! Retirement planner models: current plan, what-if scenarios, health check.

use std::collections::BTreeMap;

use ff_core::{FfError, FfResult};
use serde::{Deserialize, Serialize};

/// `GET /api/retirement/current-plan` response.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RetirementPlan {
    #[serde(default)]
    pub retirement_age: u32,
    #[serde(default)]
    pub current_age: u32,
    #[serde(default)]
    pub years_until_retirement: u32,
    #[serde(default)]
    pub years_in_retirement: u32,
    #[serde(default)]
    pub monthly_income: f64,
    #[serde(default)]
    pub monthly_expenses: f64,
    #[serde(default)]
    pub current_savings: f64,
    #[serde(default)]
    pub monthly_contribution: f64,
    #[serde(default)]
    pub projected_savings: f64,
    #[serde(default)]
    pub required_savings: f64,
    #[serde(default)]
    pub savings_gap: f64,
    #[serde(default)]
    pub retirement_income: f64,
    #[serde(default)]
    pub retirement_expenses: f64,
    /// Monthly income from CPP & OAS.
    #[serde(default)]
    pub government_benefits: f64,
    /// Monthly income from savings.
    #[serde(default)]
    pub savings_income: f64,
}

/// `POST /api/retirement/what-if` request body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WhatIfRequest {
    pub current_age: u32,
    pub retirement_age: u32,
    pub life_expectancy: u32,
    pub current_savings: f64,
    pub monthly_contribution: f64,
    pub expected_return_rate: f64,
    pub inflation_rate: f64,
    pub desired_retirement_income: f64,
    #[serde(default = "default_true")]
    pub include_cpp_oas: bool,
}

fn default_true() -> bool {
    true
}

impl Default for WhatIfRequest {
    fn default() -> Self {
        Self {
            current_age: 35,
            retirement_age: 65,
            life_expectancy: 90,
            current_savings: 0.0,
            monthly_contribution: 0.0,
            expected_return_rate: 5.0,
            inflation_rate: 2.0,
            desired_retirement_income: 4000.0,
            include_cpp_oas: true,
        }
    }
}

impl WhatIfRequest {
    /// Client-side mirror of the backend's field constraints, so an invalid
    /// scenario never leaves the client.
    pub fn validate(&self) -> FfResult<()> {
        if !(55..=75).contains(&self.retirement_age) {
            return Err(FfError::InvalidArg {
                what: "retirement_age must be between 55 and 75",
            });
        }
        if self.current_age >= self.retirement_age {
            return Err(FfError::InvalidArg {
                what: "current_age must be below retirement_age",
            });
        }
        if self.life_expectancy <= self.retirement_age {
            return Err(FfError::InvalidArg {
                what: "life_expectancy must exceed retirement_age",
            });
        }
        if self.current_savings < 0.0
            || self.monthly_contribution < 0.0
            || self.desired_retirement_income < 0.0
        {
            return Err(FfError::InvalidArg {
                what: "amounts must be non-negative",
            });
        }
        Ok(())
    }
}

/// One point of the projected savings curve.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SavingsYear {
    #[serde(default)]
    pub year: u32,
    #[serde(default)]
    pub amount: f64,
}

/// `POST /api/retirement/what-if` response.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct WhatIfResponse {
    #[serde(default)]
    pub retirement_age: u32,
    #[serde(default)]
    pub total_savings_at_retirement: f64,
    #[serde(default)]
    pub monthly_retirement_income: f64,
    #[serde(default)]
    pub savings_gap: f64,
    #[serde(default)]
    pub monthly_contribution_needed: f64,
    #[serde(default)]
    pub years_until_retirement: u32,
    #[serde(default)]
    pub retirement_duration: u32,
    #[serde(default)]
    pub savings_by_year: Vec<SavingsYear>,
    /// Keys: "savings_income", "government_benefits".
    #[serde(default)]
    pub monthly_income_breakdown: BTreeMap<String, f64>,
}

/// One item of the retirement health checklist.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ChecklistItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub current: String,
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub message: String,
}

/// `GET /api/retirement/health` response. `status` is "complete",
/// "incomplete", or "error"; the checklist may be empty for the latter two.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RetirementHealth {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub checklist: BTreeMap<String, ChecklistItem>,
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub total_retirement_savings: Option<f64>,
    #[serde(default)]
    pub missing_fields: Vec<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn what_if_bounds() {
        let ok = WhatIfRequest::default();
        assert!(ok.validate().is_ok());

        let mut bad = WhatIfRequest::default();
        bad.retirement_age = 80;
        assert!(bad.validate().is_err());

        let mut bad = WhatIfRequest::default();
        bad.current_age = 70;
        bad.retirement_age = 65;
        assert!(bad.validate().is_err());

        let mut bad = WhatIfRequest::default();
        bad.monthly_contribution = -5.0;
        assert!(bad.validate().is_err());
    }

    #[test]
    fn what_if_response_tolerates_sparse_payload() {
        let r: WhatIfResponse = serde_json::from_str(
            r#"{"retirement_age":65,"savings_by_year":[{"year":2030,"amount":120000.0}]}"#,
        )
        .expect("sparse response");
        assert_eq!(r.retirement_age, 65);
        assert_eq!(r.savings_by_year.len(), 1);
        assert_eq!(r.monthly_contribution_needed, 0.0);
    }

    #[test]
    fn health_checklist_deserializes() {
        let r: RetirementHealth = serde_json::from_str(
            r#"{"status":"complete","progress":50.0,
                "checklist":{"rrsp_setup":{"title":"Have you set up your RRSP?",
                "status":"completed","current":"$12,000.00","target":"Started",
                "message":"Great job starting your RRSP!"}},
                "total_retirement_savings":12000.0}"#,
        )
        .expect("health payload");
        assert_eq!(r.status, "complete");
        assert_eq!(r.checklist["rrsp_setup"].status, "completed");
    }
}
