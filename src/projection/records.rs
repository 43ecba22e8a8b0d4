//! Projection output structures

use serde::{Deserialize, Serialize};

/// Snapshot of one projection year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearRecord {
    /// Projection year (1-indexed)
    pub year: u32,

    // Loan
    pub principal_paid_cumulative: f64,
    pub interest_paid_cumulative: f64,
    pub remaining_balance: f64,

    // Property
    pub property_value: f64,
    pub equity: f64,

    // Cashflow for the year
    pub holding_costs: f64,
    pub rental_income: f64,
    pub net_cashflow: f64,
    pub total_outgoings: f64,

    // Position
    pub cumulative_cash_position: f64,
    pub total_net_position: f64,

    /// Total net position discounted to today's dollars
    pub real_net_position: f64,
}

/// Complete projection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// One record per projected year, in order
    pub years: Vec<YearRecord>,

    /// First year with positive net cashflow
    pub break_even_year: Option<u32>,
}

impl ProjectionResult {
    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let total_holding_costs: f64 = self.years.iter().map(|r| r.holding_costs).sum();
        let total_rental_income: f64 = self.years.iter().map(|r| r.rental_income).sum();
        let net_cashflow_total: f64 = self.years.iter().map(|r| r.net_cashflow).sum();

        let (principal, interest) = self
            .years
            .last()
            .map(|r| (r.principal_paid_cumulative, r.interest_paid_cumulative))
            .unwrap_or((0.0, 0.0));

        ProjectionSummary {
            total_years: self.years.len() as u32,
            total_repayments: principal + interest,
            total_interest: interest,
            total_holding_costs,
            total_rental_income,
            net_cashflow_total,
            break_even_year: self.break_even_year,
            final_equity: self.years.last().map(|r| r.equity).unwrap_or(0.0),
            final_net_position: self.years.last().map(|r| r.total_net_position).unwrap_or(0.0),
        }
    }

    /// Column series for charting, e.g. equity by year
    pub fn series(&self, field: impl Fn(&YearRecord) -> f64) -> Vec<f64> {
        self.years.iter().map(field).collect()
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub total_years: u32,
    pub total_repayments: f64,
    pub total_interest: f64,
    pub total_holding_costs: f64,
    pub total_rental_income: f64,
    pub net_cashflow_total: f64,
    pub break_even_year: Option<u32>,
    pub final_equity: f64,
    pub final_net_position: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(year: u32, net_cashflow: f64) -> YearRecord {
        YearRecord {
            year,
            principal_paid_cumulative: 0.0,
            interest_paid_cumulative: 0.0,
            remaining_balance: 0.0,
            property_value: 0.0,
            equity: year as f64 * 1_000.0,
            holding_costs: 100.0,
            rental_income: 0.0,
            net_cashflow,
            total_outgoings: 0.0,
            cumulative_cash_position: 0.0,
            total_net_position: 0.0,
            real_net_position: 0.0,
        }
    }

    #[test]
    fn test_empty_summary() {
        let result = ProjectionResult {
            years: Vec::new(),
            break_even_year: None,
        };
        let summary = result.summary();
        assert_eq!(summary.total_years, 0);
        assert_eq!(summary.total_repayments, 0.0);
        assert_eq!(summary.final_equity, 0.0);
    }

    #[test]
    fn test_series_and_totals() {
        let result = ProjectionResult {
            years: vec![record(1, -500.0), record(2, 250.0)],
            break_even_year: Some(2),
        };

        assert_eq!(result.series(|r| r.equity), vec![1_000.0, 2_000.0]);

        let summary = result.summary();
        assert_eq!(summary.total_holding_costs, 200.0);
        assert_eq!(summary.net_cashflow_total, -250.0);
        assert_eq!(summary.final_equity, 2_000.0);
        assert_eq!(summary.break_even_year, Some(2));
    }
}
