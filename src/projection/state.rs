//! Projection state carried from one year to the next

use crate::loan::LoanResult;

use super::investment::{HoldingCosts, InvestmentInputs};

/// Snapshot of the investment at the start of a projection year
///
/// States are never mutated; each year produces a fresh state from the
/// previous one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionState {
    /// Number of completed projection years
    pub year: u32,

    /// Outstanding loan balance
    pub balance: f64,

    /// Holding costs for the coming year, already inflated
    pub holding_costs: HoldingCosts,

    /// Weekly rent for the coming year, already inflated
    pub weekly_rent: f64,

    /// Property value for the coming year, already grown
    pub property_value: f64,

    /// Running cash position; starts at minus the deposit
    pub cumulative_cash_position: f64,

    pub principal_paid: f64,
    pub interest_paid: f64,

    /// First year with positive net cashflow
    pub break_even_year: Option<u32>,
}

impl ProjectionState {
    /// State before the first projection year
    ///
    /// Only the deposit counts as upfront cash; fees and LMI sit in the loan.
    pub fn initial(loan: &LoanResult, investment: &InvestmentInputs) -> Self {
        Self {
            year: 0,
            balance: loan.total_loan,
            holding_costs: investment.holding_costs,
            weekly_rent: investment.target_weekly_rent,
            property_value: loan.property_value,
            cumulative_cash_position: -loan.deposit_amount,
            principal_paid: 0.0,
            interest_paid: 0.0,
            break_even_year: None,
        }
    }
}
