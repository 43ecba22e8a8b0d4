//! Investment assumptions: holding costs, rent and growth

use serde::{Deserialize, Serialize};

/// Annual costs of holding the property, excluding loan repayments
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HoldingCosts {
    pub council_rates: f64,
    pub strata: f64,
    pub land_tax: f64,
    pub sinking_fund: f64,
    pub other: f64,
}

impl HoldingCosts {
    /// Sum of all components
    pub fn total(&self) -> f64 {
        self.council_rates + self.strata + self.land_tax + self.sinking_fund + self.other
    }

    /// Every component scaled by `factor`
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            council_rates: self.council_rates * factor,
            strata: self.strata * factor,
            land_tax: self.land_tax * factor,
            sinking_fund: self.sinking_fund * factor,
            other: self.other * factor,
        }
    }
}

/// Rental and growth assumptions for the projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InvestmentInputs {
    /// Year-one annual holding costs
    pub holding_costs: HoldingCosts,

    /// Year-one weekly rent
    pub target_weekly_rent: f64,

    /// Annual property value growth in percent
    pub capital_growth_rate_percent: f64,

    /// Annual inflation of rent and holding costs in percent
    pub inflation_rate_percent: f64,

    /// When false, growth and inflation are both treated as 0
    pub projection_enabled: bool,
}

impl Default for InvestmentInputs {
    fn default() -> Self {
        Self {
            holding_costs: HoldingCosts {
                council_rates: 2_500.0,
                strata: 0.0,
                land_tax: 3_000.0,
                sinking_fund: 0.0,
                other: 1_500.0,
            },
            target_weekly_rent: 600.0,
            capital_growth_rate_percent: 5.0,
            inflation_rate_percent: 3.0,
            projection_enabled: true,
        }
    }
}

/// Decimal growth rates actually applied in a projection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthRates {
    pub capital_growth: f64,
    pub inflation: f64,
}

impl InvestmentInputs {
    /// Rates used by the projection loop, forced to 0 when projection is off
    pub fn growth_rates(&self) -> GrowthRates {
        if !self.projection_enabled {
            return GrowthRates {
                capital_growth: 0.0,
                inflation: 0.0,
            };
        }
        GrowthRates {
            capital_growth: self.capital_growth_rate_percent / 100.0,
            inflation: self.inflation_rate_percent / 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_holding_cost_total() {
        let costs = HoldingCosts {
            council_rates: 1.0,
            strata: 2.0,
            land_tax: 3.0,
            sinking_fund: 4.0,
            other: 5.0,
        };
        assert_eq!(costs.total(), 15.0);
        assert_eq!(costs.scaled(2.0).total(), 30.0);
    }

    #[test]
    fn test_disabled_projection_zeroes_rates() {
        let inputs = InvestmentInputs {
            projection_enabled: false,
            ..InvestmentInputs::default()
        };
        let rates = inputs.growth_rates();
        assert_eq!(rates.capital_growth, 0.0);
        assert_eq!(rates.inflation, 0.0);

        let enabled = InvestmentInputs::default().growth_rates();
        assert_eq!(enabled.capital_growth, 0.05);
        assert_eq!(enabled.inflation, 0.03);
    }
}
