//! Scenario runner for batch evaluations
//!
//! Holds one set of rate tables and evaluates many purchase scenarios against
//! them. Scenarios are independent, so batches run in parallel.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::RateTableError;
use crate::loan::{LoanCostCalculator, LoanInputs, LoanResult};
use crate::projection::{InvestmentInputs, ProjectionConfig, ProjectionEngine, ProjectionResult};
use crate::rates::RateTables;
use crate::sweep::{self, RentScenario};

/// One set of purchase and investment inputs
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Scenario {
    pub loan: LoanInputs,
    pub investment: InvestmentInputs,
}

/// Everything computed for one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub scenario: Scenario,
    pub loan: LoanResult,
    pub projection: ProjectionResult,
    pub rent_sweep: Vec<RentScenario>,
}

/// Pre-loaded scenario runner
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::from_csv()?;
/// let outcomes = runner.interest_rate_sensitivity(&scenario, &[5.0, 6.0, 7.0], &config);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    calculator: LoanCostCalculator,
}

impl ScenarioRunner {
    /// Create runner with the in-memory ACT tables
    pub fn new() -> Self {
        Self::with_rates(RateTables::default_act())
    }

    /// Create runner by loading rate tables from CSV files
    pub fn from_csv() -> Result<Self, RateTableError> {
        Ok(Self::with_rates(RateTables::from_csv()?))
    }

    /// Create runner from a specific rate tables directory
    pub fn from_csv_path(path: &std::path::Path) -> Result<Self, RateTableError> {
        Ok(Self::with_rates(RateTables::from_csv_path(path)?))
    }

    pub fn with_rates(rates: RateTables) -> Self {
        Self {
            calculator: LoanCostCalculator::new(rates),
        }
    }

    pub fn rates(&self) -> &RateTables {
        self.calculator.rates()
    }

    /// Evaluate a single scenario
    pub fn run(&self, scenario: &Scenario, config: &ProjectionConfig) -> ScenarioOutcome {
        let loan = self.calculator.compute_loan(&scenario.loan);
        let projection = ProjectionEngine::new(config.clone()).project(&loan, &scenario.investment);
        let monthly_costs = sweep::total_monthly_costs(&loan, &scenario.investment);
        let rent_sweep = sweep::compute_rent_sweep(scenario.investment.target_weekly_rent, monthly_costs);

        ScenarioOutcome {
            scenario: *scenario,
            loan,
            projection,
            rent_sweep,
        }
    }

    /// Evaluate many scenarios in parallel, preserving input order
    pub fn run_batch(&self, scenarios: &[Scenario], config: &ProjectionConfig) -> Vec<ScenarioOutcome> {
        scenarios
            .par_iter()
            .map(|scenario| self.run(scenario, config))
            .collect()
    }

    /// Re-run one scenario at each of several interest rates (percent)
    pub fn interest_rate_sensitivity(
        &self,
        scenario: &Scenario,
        rates_percent: &[f64],
        config: &ProjectionConfig,
    ) -> Vec<ScenarioOutcome> {
        let scenarios: Vec<Scenario> = rates_percent
            .iter()
            .map(|&rate| Scenario {
                loan: LoanInputs {
                    annual_interest_rate_percent: rate,
                    ..scenario.loan
                },
                ..*scenario
            })
            .collect();
        self.run_batch(&scenarios, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_matches_sequential() {
        let runner = ScenarioRunner::new();
        let config = ProjectionConfig::default();

        let scenarios: Vec<Scenario> = [500_000.0, 800_000.0, 1_600_000.0]
            .iter()
            .map(|&value| Scenario {
                loan: LoanInputs {
                    property_value: value,
                    ..LoanInputs::default()
                },
                ..Scenario::default()
            })
            .collect();

        let batch = runner.run_batch(&scenarios, &config);
        let sequential: Vec<_> = scenarios.iter().map(|s| runner.run(s, &config)).collect();

        assert_eq!(batch, sequential);
        assert_eq!(batch[2].scenario.loan.property_value, 1_600_000.0);
    }

    #[test]
    fn test_interest_rate_sensitivity() {
        let runner = ScenarioRunner::new();
        let outcomes = runner.interest_rate_sensitivity(
            &Scenario::default(),
            &[4.0, 6.0, 8.0],
            &ProjectionConfig::default(),
        );

        assert_eq!(outcomes.len(), 3);
        // Higher rate means higher repayments and lower total net position
        assert!(outcomes[2].loan.monthly_payment > outcomes[0].loan.monthly_payment);
        assert!(
            outcomes[2].projection.summary().final_net_position
                < outcomes[0].projection.summary().final_net_position
        );
    }

    #[test]
    fn test_outcome_includes_rent_sweep() {
        let outcome = ScenarioRunner::new().run(&Scenario::default(), &ProjectionConfig::default());
        assert_eq!(outcome.rent_sweep.len(), 7);
        assert_eq!(outcome.rent_sweep[0].weekly_rent, 450.0);
    }
}
