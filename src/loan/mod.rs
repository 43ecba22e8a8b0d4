//! Loan structure: inputs, derived upfront costs and repayment

mod calculator;

pub use calculator::{LoanCostCalculator, HIGH_LVR_THRESHOLD};

use serde::{Deserialize, Serialize};

/// Purchase and loan terms supplied by the caller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanInputs {
    /// Purchase price
    pub property_value: f64,

    /// Deposit as a percent of the purchase price
    pub deposit_percent: f64,

    /// Annual interest rate in percent
    pub annual_interest_rate_percent: f64,

    /// Loan term in years
    pub loan_term_years: u32,
}

impl Default for LoanInputs {
    fn default() -> Self {
        Self {
            property_value: 800_000.0,
            deposit_percent: 20.0,
            annual_interest_rate_percent: 6.0,
            loan_term_years: 30,
        }
    }
}

/// Upfront costs and repayment derived from `LoanInputs`
///
/// Stamp duty, fixed fees and LMI are all capitalised into the loan. The
/// deposit is the only cash paid at settlement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanResult {
    /// Purchase price the loan was sized against
    pub property_value: f64,
    pub annual_interest_rate_percent: f64,
    pub loan_term_years: u32,

    pub deposit_amount: f64,
    pub stamp_duty: f64,

    /// Stamp duty plus fixed fees
    pub total_fees: f64,

    /// Price less deposit, plus fees
    pub base_loan: f64,

    /// Base loan as a percent of the property value
    pub lvr_percent: f64,
    pub lmi_cost: f64,

    /// Base loan plus LMI
    pub total_loan: f64,
    pub monthly_payment: f64,
}

impl LoanResult {
    /// Whether the LVR is above the lender risk threshold
    pub fn is_high_lvr(&self) -> bool {
        self.lvr_percent > HIGH_LVR_THRESHOLD
    }

    /// Total of all scheduled repayments over the full term
    pub fn total_scheduled_repayments(&self) -> f64 {
        self.monthly_payment * crate::amortization::total_periods(self.loan_term_years) as f64
    }
}
