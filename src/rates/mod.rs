//! Jurisdictional rate tables: stamp duty brackets, LMI grid and fixed fees

mod fees;
mod lmi;
mod stamp_duty;
pub mod loader;

pub use fees::FeeSchedule;
pub use lmi::{LmiRateRow, LmiRateTable, LoanTierCeilings, LMI_LVR_CUTOFF};
pub use loader::LoadedRates;
pub use stamp_duty::{
    StampDutyBracket, StampDutySchedule, OVERRIDE_CEILING, OVERRIDE_RATE_PERCENT,
};

use std::path::Path;

use crate::error::RateTableError;

/// Container for all rate tables used by the loan cost calculation
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RateTables {
    pub stamp_duty: StampDutySchedule,
    pub lmi: LmiRateTable,
    pub fees: FeeSchedule,
}

impl RateTables {
    /// In-memory ACT tables
    pub fn default_act() -> Self {
        Self {
            stamp_duty: StampDutySchedule::act_default(),
            lmi: LmiRateTable::default_table(),
            fees: FeeSchedule::act_default(),
        }
    }

    /// Load tables from CSV files in the default location (data/rates/)
    pub fn from_csv() -> Result<Self, RateTableError> {
        Self::from_csv_path(Path::new(loader::DEFAULT_RATES_PATH))
    }

    /// Load tables from CSV files in a specific directory
    pub fn from_csv_path(path: &Path) -> Result<Self, RateTableError> {
        let loaded = LoadedRates::load_from(path)?;
        log::info!(
            "loaded rate tables from {}: {} stamp duty brackets, {} LMI rows x {} tiers",
            path.display(),
            loaded.stamp_duty.brackets().len(),
            loaded.lmi.rows().len(),
            loaded.lmi.tiers().len(),
        );

        Ok(Self {
            stamp_duty: loaded.stamp_duty,
            lmi: loaded.lmi,
            fees: loaded.fees,
        })
    }

    /// Stamp duty bracket applying to a property value
    pub fn stamp_duty_bracket_for(&self, value: f64) -> StampDutyBracket {
        self.stamp_duty.bracket_for(value)
    }

    /// LMI row for an LVR, `None` at or below the cutoff
    pub fn lmi_row(&self, lvr_percent: f64) -> Option<&LmiRateRow> {
        self.lmi.row(lvr_percent)
    }

    /// LMI column for a loan amount
    pub fn lmi_column(&self, loan_amount: f64) -> usize {
        self.lmi.column(loan_amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_tables_match_defaults() {
        let loaded = RateTables::from_csv().expect("Failed to load rate tables");
        assert_eq!(loaded, RateTables::default_act());
    }

    #[test]
    fn test_lookups() {
        let rates = RateTables::default_act();

        assert_eq!(rates.stamp_duty_bracket_for(800_000.0).base, 22_200.0);
        assert!(rates.lmi_row(80.0).is_none());
        assert_eq!(rates.lmi_row(85.01).map(|r| r.lvr_lower_bound), Some(85.01));
        assert_eq!(rates.lmi_column(550_000.0), 2);
    }
}
