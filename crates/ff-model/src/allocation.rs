//! Asset-allocation extraction results (admin workflow).

use ff_core::{FfError, FfResult};
use serde::{Deserialize, Serialize};

/// Allocation percentages extracted from a fund fact sheet.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AssetAllocation {
    #[serde(default)]
    pub product_symbol: String,
    #[serde(default)]
    pub equity_us: f64,
    #[serde(default)]
    pub equity_europe: f64,
    #[serde(default)]
    pub equity_canada: f64,
    #[serde(default)]
    pub equity_emerging_markets: f64,
    #[serde(default)]
    pub commodity_gold: f64,
    #[serde(default)]
    pub commodity_other: f64,
    #[serde(default)]
    pub bonds_investmentgrade_us: f64,
    #[serde(default)]
    pub bonds_investmentgrade_canada: f64,
    #[serde(default)]
    pub bonds_international_ex_us: f64,
    #[serde(default)]
    pub bonds_emerging_markets: f64,
    #[serde(default)]
    pub real_estate: f64,
    #[serde(default)]
    pub alternatives: f64,
}

impl AssetAllocation {
    /// Field name / value pairs, for table rendering and validation.
    pub fn fields(&self) -> [(&'static str, f64); 12] {
        [
            ("equity_us", self.equity_us),
            ("equity_europe", self.equity_europe),
            ("equity_canada", self.equity_canada),
            ("equity_emerging_markets", self.equity_emerging_markets),
            ("commodity_gold", self.commodity_gold),
            ("commodity_other", self.commodity_other),
            ("bonds_investmentgrade_us", self.bonds_investmentgrade_us),
            (
                "bonds_investmentgrade_canada",
                self.bonds_investmentgrade_canada,
            ),
            ("bonds_international_ex_us", self.bonds_international_ex_us),
            ("bonds_emerging_markets", self.bonds_emerging_markets),
            ("real_estate", self.real_estate),
            ("alternatives", self.alternatives),
        ]
    }

    /// Mutable variant of [`fields`](Self::fields), for editable tables.
    pub fn fields_mut(&mut self) -> [(&'static str, &mut f64); 12] {
        [
            ("equity_us", &mut self.equity_us),
            ("equity_europe", &mut self.equity_europe),
            ("equity_canada", &mut self.equity_canada),
            ("equity_emerging_markets", &mut self.equity_emerging_markets),
            ("commodity_gold", &mut self.commodity_gold),
            ("commodity_other", &mut self.commodity_other),
            ("bonds_investmentgrade_us", &mut self.bonds_investmentgrade_us),
            (
                "bonds_investmentgrade_canada",
                &mut self.bonds_investmentgrade_canada,
            ),
            (
                "bonds_international_ex_us",
                &mut self.bonds_international_ex_us,
            ),
            ("bonds_emerging_markets", &mut self.bonds_emerging_markets),
            ("real_estate", &mut self.real_estate),
            ("alternatives", &mut self.alternatives),
        ]
    }

    /// Each slice must be a percentage; enforced before save.
    pub fn validate(&self) -> FfResult<()> {
        if self.product_symbol.trim().is_empty() {
            return Err(FfError::InvalidArg {
                what: "product_symbol must not be empty",
            });
        }
        for (name, value) in self.fields() {
            if !(0.0..=100.0).contains(&value) || !value.is_finite() {
                return Err(FfError::InvalidField {
                    field: name,
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// `POST /api/admin/save-asset-allocation` request body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssetAllocationSave {
    pub investment_product_id: i64,
    pub allocations: AssetAllocation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocation_bounds_enforced() {
        let mut a = AssetAllocation {
            product_symbol: "VUG".to_string(),
            equity_us: 62.5,
            ..AssetAllocation::default()
        };
        assert!(a.validate().is_ok());

        a.real_estate = 120.0;
        assert!(a.validate().is_err());

        a.real_estate = 5.0;
        a.product_symbol.clear();
        assert!(a.validate().is_err());
    }
}
