//! CSV-based rate table loader
//!
//! Loads jurisdictional rate tables from CSV files in data/rates/

use std::fs::File;
use std::path::Path;

use crate::error::RateTableError;

use super::fees::FeeSchedule;
use super::lmi::{LmiRateRow, LmiRateTable, LoanTierCeilings};
use super::stamp_duty::{StampDutyBracket, StampDutySchedule};

/// Default path to the rate tables directory
pub const DEFAULT_RATES_PATH: &str = "data/rates";

const STAMP_DUTY_FILE: &str = "stamp_duty_brackets.csv";
const LMI_FILE: &str = "lmi_rates.csv";
const FEES_FILE: &str = "fees.csv";

fn open_reader(dir: &Path, file: &str) -> Result<csv::Reader<File>, RateTableError> {
    let path = dir.join(file);
    let handle = File::open(&path).map_err(|source| RateTableError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(handle))
}

fn parse_number(file: &'static str, column: usize, raw: &str) -> Result<f64, RateTableError> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| RateTableError::Parse {
            file,
            column,
            value: raw.to_string(),
        })
}

fn field<'a>(record: &'a csv::StringRecord, column: usize) -> &'a str {
    record.get(column).unwrap_or("")
}

/// Load stamp duty brackets from CSV
///
/// Columns: `threshold,base,rate_percent,kind`. `kind` is `bracket` for a
/// regular tier or `override` for the flat rate, whose threshold column holds
/// the override ceiling.
pub fn load_stamp_duty(dir: &Path) -> Result<StampDutySchedule, RateTableError> {
    let path = dir.join(STAMP_DUTY_FILE);
    let mut reader = open_reader(dir, STAMP_DUTY_FILE)?;

    let mut brackets = Vec::new();
    let mut override_row = None;

    for result in reader.records() {
        let record = result.map_err(|source| RateTableError::Csv {
            path: path.clone(),
            source,
        })?;
        let threshold = parse_number(STAMP_DUTY_FILE, 0, field(&record, 0))?;
        let base = parse_number(STAMP_DUTY_FILE, 1, field(&record, 1))?;
        let rate = parse_number(STAMP_DUTY_FILE, 2, field(&record, 2))?;

        if field(&record, 3).eq_ignore_ascii_case("override") {
            override_row = Some((threshold, rate));
        } else {
            brackets.push(StampDutyBracket::new(threshold, base, rate));
        }
    }

    let (ceiling, rate) = override_row.ok_or(RateTableError::Empty {
        table: "stamp duty override",
    })?;
    StampDutySchedule::new(brackets, ceiling, rate)
}

/// Load the LMI grid from CSV
///
/// The header row is `lvr_lower_bound` followed by one loan tier ceiling per
/// column; each data row is an LVR lower bound followed by its rates.
pub fn load_lmi_rates(dir: &Path) -> Result<LmiRateTable, RateTableError> {
    let path = dir.join(LMI_FILE);
    let mut reader = open_reader(dir, LMI_FILE)?;

    let headers = reader
        .headers()
        .map_err(|source| RateTableError::Csv {
            path: path.clone(),
            source,
        })?
        .clone();
    let ceilings = headers
        .iter()
        .enumerate()
        .skip(1)
        .map(|(column, raw)| parse_number(LMI_FILE, column, raw))
        .collect::<Result<Vec<_>, _>>()?;
    let tiers = LoanTierCeilings::new(ceilings)?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|source| RateTableError::Csv {
            path: path.clone(),
            source,
        })?;
        let lvr = parse_number(LMI_FILE, 0, field(&record, 0))?;
        let rates = record
            .iter()
            .enumerate()
            .skip(1)
            .map(|(column, raw)| parse_number(LMI_FILE, column, raw))
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(LmiRateRow::new(lvr, rates));
    }

    LmiRateTable::new(tiers, rows)
}

/// Load fixed fees from CSV
///
/// Columns: `fee,amount` with rows `registration`, `transfer` and `other`.
pub fn load_fees(dir: &Path) -> Result<FeeSchedule, RateTableError> {
    let path = dir.join(FEES_FILE);
    let mut reader = open_reader(dir, FEES_FILE)?;

    let mut registration = None;
    let mut transfer = None;
    let mut other = None;

    for result in reader.records() {
        let record = result.map_err(|source| RateTableError::Csv {
            path: path.clone(),
            source,
        })?;
        let amount = parse_number(FEES_FILE, 1, field(&record, 1))?;
        match field(&record, 0) {
            "registration" => registration = Some(amount),
            "transfer" => transfer = Some(amount),
            "other" => other = Some(amount),
            unknown => log::warn!("ignoring unknown fee `{}` in {}", unknown, path.display()),
        }
    }

    Ok(FeeSchedule {
        registration: registration.ok_or(RateTableError::MissingFee("registration"))?,
        transfer: transfer.ok_or(RateTableError::MissingFee("transfer"))?,
        other: other.ok_or(RateTableError::MissingFee("other"))?,
    })
}

/// All rate tables as read from disk
pub struct LoadedRates {
    pub stamp_duty: StampDutySchedule,
    pub lmi: LmiRateTable,
    pub fees: FeeSchedule,
}

impl LoadedRates {
    /// Load all tables from the default path
    pub fn load_default() -> Result<Self, RateTableError> {
        Self::load_from(Path::new(DEFAULT_RATES_PATH))
    }

    /// Load all tables from a specific directory
    pub fn load_from(path: &Path) -> Result<Self, RateTableError> {
        Ok(Self {
            stamp_duty: load_stamp_duty(path)?,
            lmi: load_lmi_rates(path)?,
            fees: load_fees(path)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_default_rates() {
        let result = LoadedRates::load_default();
        assert!(result.is_ok(), "Failed to load rates: {:?}", result.err());

        let rates = result.unwrap();

        // Shipped CSVs mirror the in-memory defaults
        assert_eq!(rates.stamp_duty, StampDutySchedule::act_default());
        assert_eq!(rates.lmi, LmiRateTable::default_table());
        assert_eq!(rates.fees, FeeSchedule::act_default());
    }

    #[test]
    fn test_missing_directory() {
        let result = LoadedRates::load_from(Path::new("data/does-not-exist"));
        assert!(matches!(result, Err(RateTableError::Io { .. })));
    }
}
