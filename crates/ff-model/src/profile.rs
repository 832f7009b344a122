//! User profile: server shape, update payload, and the in-progress form draft.

use ff_core::{FfError, FfResult, numeric};
use serde::{Deserialize, Serialize};

/// Profile as returned by `GET /api/profile`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Profile {
    // Personal
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub country_of_residence: Option<String>,
    #[serde(default)]
    pub marital_status: Option<String>,
    #[serde(default)]
    pub number_of_dependents: Option<u32>,
    #[serde(default)]
    pub postal_code: Option<String>,

    // Financial
    #[serde(default)]
    pub monthly_income: Option<f64>,
    #[serde(default)]
    pub monthly_expenses: Option<f64>,
    #[serde(default)]
    pub cash_balance: Option<f64>,
    #[serde(default)]
    pub investments: Option<f64>,
    #[serde(default)]
    pub debt: Option<f64>,

    // Investment preferences
    #[serde(default)]
    pub investor_type: Option<String>,
    #[serde(default)]
    pub advisor_preference: Option<String>,
    #[serde(default)]
    pub investing_interests: Vec<String>,
    #[serde(default)]
    pub product_preferences: Vec<String>,

    // Retirement
    #[serde(default)]
    pub rrsp_savings: Option<f64>,
    #[serde(default)]
    pub tfsa_savings: Option<f64>,
    #[serde(default)]
    pub other_retirement_accounts: Option<f64>,
    #[serde(default)]
    pub desired_retirement_lifestyle: Option<String>,

    // Advisor
    #[serde(default)]
    pub has_advisor: bool,
    #[serde(default)]
    pub advisor_name: Option<String>,
    #[serde(default)]
    pub advisor_email_address: Option<String>,
    #[serde(default)]
    pub advisor_company_name: Option<String>,
}

/// Payload for `PUT /api/profile`. Same shape as [`Profile`] minus
/// server-owned fields; numeric fields are already coerced.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ProfileUpdate {
    pub name: String,
    pub age: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_of_residence: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marital_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_dependents: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_income: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_expenses: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cash_balance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub investments: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debt: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub investor_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advisor_preference: Option<String>,
    #[serde(default)]
    pub investing_interests: Vec<String>,
    #[serde(default)]
    pub product_preferences: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rrsp_savings: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tfsa_savings: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_retirement_accounts: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desired_retirement_lifestyle: Option<String>,
    pub has_advisor: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advisor_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advisor_email_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advisor_company_name: Option<String>,
}

/// In-progress form edits. Numeric fields are held as text while typing and
/// coerced wholesale in [`ProfileDraft::to_update`]; a draft with junk in a
/// numeric field never leaves the client.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileDraft {
    pub name: String,
    pub age: String,
    pub country_of_residence: String,
    pub marital_status: String,
    pub number_of_dependents: String,
    pub postal_code: String,
    pub monthly_income: String,
    pub monthly_expenses: String,
    pub cash_balance: String,
    pub investments: String,
    pub debt: String,
    pub investor_type: String,
    pub advisor_preference: String,
    pub investing_interests: Vec<String>,
    pub product_preferences: Vec<String>,
    pub rrsp_savings: String,
    pub tfsa_savings: String,
    pub other_retirement_accounts: String,
    pub desired_retirement_lifestyle: String,
    pub has_advisor: bool,
    pub advisor_name: String,
    pub advisor_email_address: String,
    pub advisor_company_name: String,
}

impl ProfileDraft {
    /// Seed a draft from the last-fetched server profile.
    pub fn from_profile(p: &Profile) -> Self {
        fn money(v: Option<f64>) -> String {
            v.map(|x| format!("{x}")).unwrap_or_default()
        }
        Self {
            name: p.name.clone(),
            age: p.age.map(|a| a.to_string()).unwrap_or_default(),
            country_of_residence: p.country_of_residence.clone().unwrap_or_default(),
            marital_status: p.marital_status.clone().unwrap_or_default(),
            number_of_dependents: p
                .number_of_dependents
                .map(|n| n.to_string())
                .unwrap_or_default(),
            postal_code: p.postal_code.clone().unwrap_or_default(),
            monthly_income: money(p.monthly_income),
            monthly_expenses: money(p.monthly_expenses),
            cash_balance: money(p.cash_balance),
            investments: money(p.investments),
            debt: money(p.debt),
            investor_type: p.investor_type.clone().unwrap_or_default(),
            advisor_preference: p.advisor_preference.clone().unwrap_or_default(),
            investing_interests: p.investing_interests.clone(),
            product_preferences: p.product_preferences.clone(),
            rrsp_savings: money(p.rrsp_savings),
            tfsa_savings: money(p.tfsa_savings),
            other_retirement_accounts: money(p.other_retirement_accounts),
            desired_retirement_lifestyle: p.desired_retirement_lifestyle.clone().unwrap_or_default(),
            has_advisor: p.has_advisor,
            advisor_name: p.advisor_name.clone().unwrap_or_default(),
            advisor_email_address: p.advisor_email_address.clone().unwrap_or_default(),
            advisor_company_name: p.advisor_company_name.clone().unwrap_or_default(),
        }
    }

    /// Coerce the draft into an update payload. Empty numeric fields become
    /// `None`; unparseable ones are an error so the save button can refuse.
    pub fn to_update(&self) -> FfResult<ProfileUpdate> {
        if self.name.trim().is_empty() {
            return Err(FfError::InvalidField {
                field: "name",
                value: self.name.clone(),
            });
        }
        let age = parse_u32("age", &self.age)?.ok_or(FfError::InvalidField {
            field: "age",
            value: self.age.clone(),
        })?;

        Ok(ProfileUpdate {
            name: self.name.trim().to_string(),
            age,
            country_of_residence: opt_text(&self.country_of_residence),
            marital_status: opt_text(&self.marital_status),
            number_of_dependents: parse_u32("number_of_dependents", &self.number_of_dependents)?,
            postal_code: opt_text(&self.postal_code),
            monthly_income: parse_money("monthly_income", &self.monthly_income)?,
            monthly_expenses: parse_money("monthly_expenses", &self.monthly_expenses)?,
            cash_balance: parse_money("cash_balance", &self.cash_balance)?,
            investments: parse_money("investments", &self.investments)?,
            debt: parse_money("debt", &self.debt)?,
            investor_type: opt_text(&self.investor_type),
            advisor_preference: opt_text(&self.advisor_preference),
            investing_interests: self.investing_interests.clone(),
            product_preferences: self.product_preferences.clone(),
            rrsp_savings: parse_money("rrsp_savings", &self.rrsp_savings)?,
            tfsa_savings: parse_money("tfsa_savings", &self.tfsa_savings)?,
            other_retirement_accounts: parse_money(
                "other_retirement_accounts",
                &self.other_retirement_accounts,
            )?,
            desired_retirement_lifestyle: opt_text(&self.desired_retirement_lifestyle),
            has_advisor: self.has_advisor,
            advisor_name: opt_text(&self.advisor_name),
            advisor_email_address: opt_text(&self.advisor_email_address),
            advisor_company_name: opt_text(&self.advisor_company_name),
        })
    }
}

fn opt_text(s: &str) -> Option<String> {
    let t = s.trim();
    if t.is_empty() { None } else { Some(t.to_string()) }
}

fn parse_money(field: &'static str, s: &str) -> FfResult<Option<f64>> {
    if s.trim().is_empty() {
        return Ok(None);
    }
    numeric::strict_number(s)
        .map(Some)
        .ok_or(FfError::InvalidField {
            field,
            value: s.to_string(),
        })
}

fn parse_u32(field: &'static str, s: &str) -> FfResult<Option<u32>> {
    if s.trim().is_empty() {
        return Ok(None);
    }
    s.trim()
        .parse::<u32>()
        .map(Some)
        .map_err(|_| FfError::InvalidField {
            field,
            value: s.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ProfileDraft {
        ProfileDraft {
            name: "Ada".to_string(),
            age: "44".to_string(),
            monthly_income: "$6,500".to_string(),
            rrsp_savings: "".to_string(),
            ..ProfileDraft::default()
        }
    }

    #[test]
    fn draft_coerces_numeric_fields() {
        let update = draft().to_update().expect("valid draft");
        assert_eq!(update.age, 44);
        assert_eq!(update.monthly_income, Some(6500.0));
        assert_eq!(update.rrsp_savings, None);
    }

    #[test]
    fn junk_numeric_field_refuses_submission() {
        let mut d = draft();
        d.debt = "lots".to_string();
        let err = d.to_update().unwrap_err();
        assert!(format!("{err}").contains("debt"));
    }

    #[test]
    fn draft_round_trips_from_profile() {
        let profile = Profile {
            name: "Ada".to_string(),
            age: Some(44),
            monthly_income: Some(6500.0),
            has_advisor: true,
            ..Profile::default()
        };
        let d = ProfileDraft::from_profile(&profile);
        let u = d.to_update().expect("valid");
        assert_eq!(u.name, "Ada");
        assert_eq!(u.monthly_income, Some(6500.0));
        assert!(u.has_advisor);
    }

    #[test]
    fn sparse_payload_deserializes() {
        let p: Profile = serde_json::from_str(r#"{"name":"Ada"}"#).expect("sparse profile");
        assert_eq!(p.name, "Ada");
        assert_eq!(p.age, None);
        assert!(p.investing_interests.is_empty());
    }
}
