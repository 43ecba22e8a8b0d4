//! Property Investment - loan cost and investment projection engine
//!
//! This library provides:
//! - Tiered rate tables (stamp duty brackets, LMI grid, fixed fees)
//! - Upfront loan cost derivation (stamp duty, LMI, capitalised fees, LVR)
//! - Level-payment amortization
//! - Year-by-year investment projections with growth and inflation
//! - Rent sensitivity sweeps and parallel batch scenarios
//!
//! Every calculation is a pure function of its inputs.

pub mod amortization;
pub mod error;
pub mod inputs;
pub mod loan;
pub mod projection;
pub mod rates;
pub mod scenario;
pub mod sweep;

// Re-export commonly used types
pub use error::{InputError, RateTableError};
pub use inputs::{InputField, InputForm};
pub use loan::{LoanCostCalculator, LoanInputs, LoanResult};
pub use projection::{InvestmentInputs, ProjectionConfig, ProjectionEngine, ProjectionResult, YearRecord};
pub use rates::RateTables;
pub use scenario::{Scenario, ScenarioRunner};
pub use sweep::RentScenario;

/// Derive loan costs and repayment using the default ACT rate tables
pub fn compute_loan(inputs: &LoanInputs) -> LoanResult {
    LoanCostCalculator::default().compute_loan(inputs)
}

/// Project the investment over the full loan term
pub fn compute_projection(loan: &LoanResult, investment: &InvestmentInputs) -> ProjectionResult {
    ProjectionEngine::default().project(loan, investment)
}

/// Net monthly position for rents around a target
pub fn compute_rent_sweep(target_weekly_rent: f64, total_monthly_costs: f64) -> Vec<RentScenario> {
    sweep::compute_rent_sweep(target_weekly_rent, total_monthly_costs)
}
