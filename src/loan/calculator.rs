//! Upfront cost calculation: stamp duty, fees, LVR and LMI

use crate::amortization;
use crate::rates::RateTables;

use super::{LoanInputs, LoanResult};

/// LVR above which callers should flag the loan as high risk
pub const HIGH_LVR_THRESHOLD: f64 = 95.0;

/// Derives loan costs from a set of rate tables
#[derive(Debug, Clone, Default)]
pub struct LoanCostCalculator {
    rates: RateTables,
}

impl LoanCostCalculator {
    pub fn new(rates: RateTables) -> Self {
        Self { rates }
    }

    pub fn rates(&self) -> &RateTables {
        &self.rates
    }

    /// Stamp duty on a purchase price
    pub fn stamp_duty(&self, property_value: f64) -> f64 {
        self.rates.stamp_duty.duty(property_value)
    }

    /// LMI premium, zero at or below 80% LVR
    pub fn lmi(&self, lvr_percent: f64, loan_amount: f64) -> f64 {
        self.rates
            .lmi
            .rate(lvr_percent, loan_amount)
            .map_or(0.0, |rate| rate * loan_amount)
    }

    /// Stamp duty plus the fixed registration, transfer and other fees
    pub fn total_fees(&self, stamp_duty: f64) -> f64 {
        self.rates.fees.total_fees(stamp_duty)
    }

    /// Price less deposit, with fees capitalised into the loan
    pub fn base_loan(&self, property_value: f64, deposit_percent: f64, total_fees: f64) -> f64 {
        (property_value - property_value * deposit_percent / 100.0) + total_fees
    }

    /// Loan-to-value ratio in percent
    ///
    /// A non-positive property value has no meaningful ratio; it is reported
    /// as 0 so NaN never reaches the results.
    pub fn lvr(&self, base_loan: f64, property_value: f64) -> f64 {
        if property_value <= 0.0 {
            log::warn!("property value {} gives an undefined LVR, reporting 0", property_value);
            return 0.0;
        }
        base_loan / property_value * 100.0
    }

    /// Full loan derivation
    pub fn compute_loan(&self, inputs: &LoanInputs) -> LoanResult {
        let property_value = inputs.property_value;
        let deposit_amount = property_value * inputs.deposit_percent / 100.0;

        let stamp_duty = self.stamp_duty(property_value);
        let total_fees = self.total_fees(stamp_duty);
        let base_loan = self.base_loan(property_value, inputs.deposit_percent, total_fees);
        let lvr_percent = self.lvr(base_loan, property_value);
        let lmi_cost = self.lmi(lvr_percent, base_loan);
        let total_loan = base_loan + lmi_cost;
        let monthly_payment = amortization::monthly_payment(
            inputs.annual_interest_rate_percent,
            inputs.loan_term_years,
            total_loan,
        );

        log::debug!(
            "loan for {:.2}: fees {:.2}, base {:.2}, lvr {:.2}%, lmi {:.2}, payment {:.2}",
            property_value,
            total_fees,
            base_loan,
            lvr_percent,
            lmi_cost,
            monthly_payment,
        );

        LoanResult {
            property_value,
            annual_interest_rate_percent: inputs.annual_interest_rate_percent,
            loan_term_years: inputs.loan_term_years,
            deposit_amount,
            stamp_duty,
            total_fees,
            base_loan,
            lvr_percent,
            lmi_cost,
            total_loan,
            monthly_payment,
        }
    }
}
