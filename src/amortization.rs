//! Level-payment loan amortization
//!
//! Standard PMT formula over monthly periods, plus the single-period step the
//! projection engine runs twelve times per year.

use serde::{Deserialize, Serialize};

/// Months per year
pub const PERIODS_PER_YEAR: u32 = 12;

/// Monthly rate (decimal) from an annual rate in percent
pub fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / PERIODS_PER_YEAR as f64 / 100.0
}

/// Number of monthly payments in a term, saturating at `u32::MAX`
pub fn total_periods(term_years: u32) -> u32 {
    term_years.saturating_mul(PERIODS_PER_YEAR)
}

/// Level monthly payment that fully amortizes `principal` over `term_years`
///
/// A zero rate falls back to straight-line repayment so the compounding
/// formula never divides by zero. A zero term has no payments. Terms long
/// enough for the compounding factor to overflow pay interest only.
pub fn monthly_payment(annual_rate_percent: f64, term_years: u32, principal: f64) -> f64 {
    let periods = total_periods(term_years);
    if periods == 0 {
        return 0.0;
    }
    if annual_rate_percent == 0.0 {
        return principal / periods as f64;
    }

    let rate = monthly_rate(annual_rate_percent);
    let growth = (1.0 + rate).powi(i32::try_from(periods).unwrap_or(i32::MAX));
    if growth.is_infinite() {
        return principal * rate;
    }
    principal * rate * growth / (growth - 1.0)
}

/// Result of one monthly repayment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmortizationStep {
    pub interest_portion: f64,
    pub principal_portion: f64,
    pub new_balance: f64,
}

/// Apply one payment to a balance
///
/// The balance is clamped at zero; the principal portion is reported
/// unclamped so that principal plus interest always equals the payment.
pub fn step_one_period(balance: f64, monthly_rate: f64, payment: f64) -> AmortizationStep {
    let interest_portion = balance * monthly_rate;
    let principal_portion = payment - interest_portion;
    AmortizationStep {
        interest_portion,
        principal_portion,
        new_balance: (balance - principal_portion).max(0.0),
    }
}

/// One row of a full amortization schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// Payment number (1-indexed)
    pub month: u32,
    pub payment: f64,
    pub interest: f64,
    pub principal: f64,
    pub balance: f64,
}

/// Month-by-month schedule for a level-payment loan
pub fn amortization_schedule(
    principal: f64,
    annual_rate_percent: f64,
    term_years: u32,
) -> Vec<ScheduleRow> {
    let payment = monthly_payment(annual_rate_percent, term_years, principal);
    let rate = monthly_rate(annual_rate_percent);

    (1..=total_periods(term_years))
        .scan(principal, |balance, month| {
            let step = step_one_period(*balance, rate, payment);
            *balance = step.new_balance;
            Some(ScheduleRow {
                month,
                payment,
                interest: step.interest_portion,
                principal: step.principal_portion,
                balance: step.new_balance,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use proptest::prelude::*;

    #[test]
    fn test_huge_term_does_not_overflow() {
        assert_eq!(total_periods(u32::MAX), u32::MAX);
        assert_eq!(total_periods(30), 360);

        let payment = monthly_payment(6.0, u32::MAX, 100_000.0);
        assert!(payment.is_finite());
        assert_abs_diff_eq!(payment, 500.0, epsilon = 1e-9);

        let straight = monthly_payment(0.0, u32::MAX, 100_000.0);
        assert!(straight.is_finite() && straight > 0.0);
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        assert_eq!(monthly_payment(0.0, 30, 360_000.0), 360_000.0 / 360.0);
        assert_eq!(monthly_payment(0.0, 25, 123_456.0), 123_456.0 / 300.0);
    }

    #[test]
    fn test_zero_term_has_no_payment() {
        assert_eq!(monthly_payment(6.0, 0, 500_000.0), 0.0);
    }

    #[test]
    fn test_known_payment() {
        // 500k over 30 years at 6%
        assert_abs_diff_eq!(monthly_payment(6.0, 30, 500_000.0), 2_997.75, epsilon = 0.01);
    }

    #[test]
    fn test_step_splits_payment() {
        let step = step_one_period(100_000.0, 0.005, 1_000.0);
        assert_relative_eq!(step.interest_portion, 500.0);
        assert_relative_eq!(step.principal_portion, 500.0);
        assert_relative_eq!(step.new_balance, 99_500.0);
    }

    #[test]
    fn test_step_clamps_balance() {
        let step = step_one_period(100.0, 0.01, 1_000.0);
        assert_eq!(step.new_balance, 0.0);
        assert_relative_eq!(step.principal_portion, 999.0);
    }

    #[test]
    fn test_schedule_pays_off_loan() {
        let schedule = amortization_schedule(400_000.0, 5.5, 25);
        assert_eq!(schedule.len(), 300);
        assert_abs_diff_eq!(schedule.last().unwrap().balance, 0.0, epsilon = 1e-4);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_principal_plus_interest_equals_payments(
            principal in 10_000u32..2_000_000,
            rate_bp in 0u32..1_500,
            term in 1u32..40,
        ) {
            let principal = principal as f64;
            let rate = rate_bp as f64 / 100.0;
            let schedule = amortization_schedule(principal, rate, term);
            let payment = monthly_payment(rate, term, principal);

            let paid: f64 = schedule.iter().map(|r| r.principal + r.interest).sum();
            let expected = (term * PERIODS_PER_YEAR) as f64 * payment;
            prop_assert!((paid - expected).abs() <= expected * 1e-9);

            let mut previous = principal;
            for row in &schedule {
                prop_assert!(row.balance <= previous);
                prop_assert!(row.balance >= 0.0);
                previous = row.balance;
            }
        }
    }
}
