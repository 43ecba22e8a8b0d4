//! Rent sensitivity sweep around a target weekly rent

use serde::{Deserialize, Serialize};

use crate::loan::LoanResult;
use crate::projection::{InvestmentInputs, WEEKS_PER_YEAR};

/// Distance either side of the target rent covered by the sweep
pub const SWEEP_SPAN: f64 = 150.0;

/// Spacing between swept rents
pub const SWEEP_STEP: f64 = 50.0;

/// Net monthly position at one weekly rent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RentScenario {
    pub weekly_rent: f64,
    pub net_monthly_position: f64,
}

/// Monthly rent income less monthly costs
pub fn net_monthly_position(weekly_rent: f64, total_monthly_costs: f64) -> f64 {
    weekly_rent * WEEKS_PER_YEAR / 12.0 - total_monthly_costs
}

/// Sweep rents from below the target up to `target + 150` in steps of 50
///
/// The first rent is the target less 150 rounded down to a multiple of 50,
/// never below 0.
pub fn compute_rent_sweep(target_weekly_rent: f64, total_monthly_costs: f64) -> Vec<RentScenario> {
    let start = (((target_weekly_rent - SWEEP_SPAN) / SWEEP_STEP).floor() * SWEEP_STEP).max(0.0);
    let end = target_weekly_rent + SWEEP_SPAN;

    (0u32..)
        .map(|i| start + i as f64 * SWEEP_STEP)
        .take_while(|&rent| rent <= end)
        .map(|weekly_rent| RentScenario {
            weekly_rent,
            net_monthly_position: net_monthly_position(weekly_rent, total_monthly_costs),
        })
        .collect()
}

/// Monthly repayment plus holding costs spread across the year
pub fn total_monthly_costs(loan: &LoanResult, investment: &InvestmentInputs) -> f64 {
    loan.monthly_payment + investment.holding_costs.total() / 12.0
}
