//! Core projection engine for yearly investment cashflow projections

use crate::amortization::{self, PERIODS_PER_YEAR};
use crate::loan::LoanResult;

use super::investment::{GrowthRates, InvestmentInputs};
use super::records::{ProjectionResult, YearRecord};
use super::state::ProjectionState;
use super::WEEKS_PER_YEAR;

/// Configuration for a projection run
#[derive(Debug, Clone, Default)]
pub struct ProjectionConfig {
    /// Number of years to project, capped at the loan term
    /// If None, projects the full loan term
    pub horizon_years: Option<u32>,
}

/// Main projection engine
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    /// Create a new projection engine with given config
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    /// Number of years projected for a loan
    pub fn horizon(&self, loan: &LoanResult) -> u32 {
        self.config
            .horizon_years
            .map_or(loan.loan_term_years, |h| h.min(loan.loan_term_years))
    }

    /// Run the projection for a loan and set of investment assumptions
    pub fn project(&self, loan: &LoanResult, investment: &InvestmentInputs) -> ProjectionResult {
        let rates = investment.growth_rates();
        let horizon = self.horizon(loan);
        let initial = ProjectionState::initial(loan, investment);

        let (years, last) = (1..=horizon).fold(
            (Vec::with_capacity(horizon as usize), initial),
            |(mut years, state), _| {
                let (next, record) = self.project_year(&state, loan, rates);
                years.push(record);
                (years, next)
            },
        );

        log::debug!(
            "projected {} years: final balance {:.2}, break-even {:?}",
            years.len(),
            last.balance,
            last.break_even_year,
        );

        ProjectionResult {
            years,
            break_even_year: last.break_even_year,
        }
    }

    /// Advance one year: twelve repayments, the year's cashflow, then growth
    ///
    /// Returns the state for the following year and the record for this one.
    pub fn project_year(
        &self,
        state: &ProjectionState,
        loan: &LoanResult,
        rates: GrowthRates,
    ) -> (ProjectionState, YearRecord) {
        let year = state.year + 1;
        let monthly_rate = amortization::monthly_rate(loan.annual_interest_rate_percent);

        let (balance, yearly_principal, yearly_interest) = (0..PERIODS_PER_YEAR).fold(
            (state.balance, 0.0, 0.0),
            |(balance, principal, interest), _| {
                let step = amortization::step_one_period(balance, monthly_rate, loan.monthly_payment);
                (
                    step.new_balance,
                    principal + step.principal_portion,
                    interest + step.interest_portion,
                )
            },
        );

        let holding_costs = state.holding_costs.total();
        let rental_income = state.weekly_rent * WEEKS_PER_YEAR;
        let total_outgoings = yearly_principal + yearly_interest + holding_costs;
        let net_cashflow = rental_income - total_outgoings;

        let cumulative_cash_position = state.cumulative_cash_position + net_cashflow;
        let equity = state.property_value - balance;
        let total_net_position = equity + cumulative_cash_position;
        let discount = (1.0 + rates.inflation).powi(i32::try_from(year).unwrap_or(i32::MAX));
        let real_net_position = total_net_position / discount;

        let break_even_year = state
            .break_even_year
            .or_else(|| (net_cashflow > 0.0).then_some(year));

        let record = YearRecord {
            year,
            principal_paid_cumulative: state.principal_paid + yearly_principal,
            interest_paid_cumulative: state.interest_paid + yearly_interest,
            remaining_balance: balance,
            property_value: state.property_value,
            equity,
            holding_costs,
            rental_income,
            net_cashflow,
            total_outgoings,
            cumulative_cash_position,
            total_net_position,
            real_net_position,
        };

        let inflation_factor = 1.0 + rates.inflation;
        let next = ProjectionState {
            year,
            balance,
            holding_costs: state.holding_costs.scaled(inflation_factor),
            weekly_rent: state.weekly_rent * inflation_factor,
            property_value: state.property_value * (1.0 + rates.capital_growth),
            cumulative_cash_position,
            principal_paid: record.principal_paid_cumulative,
            interest_paid: record.interest_paid_cumulative,
            break_even_year,
        };

        (next, record)
    }
}
