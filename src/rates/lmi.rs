//! Lender's mortgage insurance rate grid
//!
//! Rows are keyed by LVR lower bound, columns by loan size tier. The premium
//! is `rate * loan_amount`. No insurance is charged at or below 80% LVR.

use serde::{Deserialize, Serialize};

use crate::error::RateTableError;

/// LVR at or below which no LMI is charged
pub const LMI_LVR_CUTOFF: f64 = 80.0;

/// One LVR band of the LMI grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LmiRateRow {
    /// Lowest LVR (percent) this row applies to
    pub lvr_lower_bound: f64,

    /// Premium rates, one per loan tier ceiling
    pub rates_by_loan_tier: Vec<f64>,
}

impl LmiRateRow {
    pub fn new(lvr_lower_bound: f64, rates_by_loan_tier: Vec<f64>) -> Self {
        Self {
            lvr_lower_bound,
            rates_by_loan_tier,
        }
    }
}

/// Ascending loan-size ceilings defining the LMI columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTierCeilings(Vec<f64>);

impl LoanTierCeilings {
    pub fn new(ceilings: Vec<f64>) -> Result<Self, RateTableError> {
        if ceilings.is_empty() {
            return Err(RateTableError::Empty {
                table: "loan tier ceilings",
            });
        }
        if let Some(index) = ceilings.windows(2).position(|pair| pair[1] <= pair[0]) {
            return Err(RateTableError::Unsorted {
                table: "loan tier ceilings",
                index: index + 1,
            });
        }
        Ok(Self(ceilings))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Index of the first ceiling at or above `loan_amount`
    ///
    /// Loans above every ceiling are priced from the last column.
    pub fn column_for(&self, loan_amount: f64) -> usize {
        let idx = self.0.partition_point(|&ceiling| ceiling < loan_amount);
        idx.min(self.0.len() - 1)
    }
}

/// Full LMI grid: loan tiers plus LVR rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LmiRateTable {
    tiers: LoanTierCeilings,
    rows: Vec<LmiRateRow>,
}

impl LmiRateTable {
    /// Build a grid, checking row ordering and that every row covers every tier
    pub fn new(tiers: LoanTierCeilings, rows: Vec<LmiRateRow>) -> Result<Self, RateTableError> {
        if rows.is_empty() {
            return Err(RateTableError::Empty { table: "LMI rows" });
        }
        if let Some(index) = rows
            .windows(2)
            .position(|pair| pair[1].lvr_lower_bound <= pair[0].lvr_lower_bound)
        {
            return Err(RateTableError::Unsorted {
                table: "LMI rows",
                index: index + 1,
            });
        }
        if let Some((row, found)) = rows
            .iter()
            .enumerate()
            .map(|(i, r)| (i, r.rates_by_loan_tier.len()))
            .find(|&(_, len)| len != tiers.len())
        {
            return Err(RateTableError::RaggedLmiRow {
                row,
                expected: tiers.len(),
                found,
            });
        }

        Ok(Self { tiers, rows })
    }

    /// Default grid in one-point LVR bands from 80.01% to 95.01%
    pub fn default_table() -> Self {
        let tiers = LoanTierCeilings(vec![300_000.0, 500_000.0, 600_000.0, 750_000.0, 1_000_000.0]);
        let grid: [(f64, [f64; 5]); 16] = [
            (80.01, [0.00475, 0.00568, 0.00703, 0.00781, 0.00845]),
            (81.01, [0.00504, 0.00634, 0.00754, 0.00823, 0.00900]),
            (82.01, [0.00532, 0.00695, 0.00807, 0.00889, 0.00967]),
            (83.01, [0.00580, 0.00770, 0.00900, 0.00996, 0.01081]),
            (84.01, [0.00639, 0.00866, 0.01015, 0.01126, 0.01217]),
            (85.01, [0.00817, 0.01087, 0.01258, 0.01389, 0.01497]),
            (86.01, [0.00860, 0.01145, 0.01334, 0.01478, 0.01590]),
            (87.01, [0.00945, 0.01268, 0.01480, 0.01631, 0.01758]),
            (88.01, [0.01060, 0.01413, 0.01645, 0.01812, 0.01954]),
            (89.01, [0.01203, 0.01615, 0.01886, 0.02078, 0.02240]),
            (90.01, [0.01512, 0.02006, 0.02341, 0.02583, 0.02787]),
            (91.01, [0.01700, 0.02258, 0.02634, 0.02906, 0.03135]),
            (92.01, [0.01978, 0.02635, 0.03074, 0.03393, 0.03661]),
            (93.01, [0.02349, 0.03143, 0.03669, 0.04049, 0.04370]),
            (94.01, [0.02712, 0.03629, 0.04239, 0.04678, 0.05048]),
            (95.01, [0.03061, 0.04100, 0.04786, 0.05282, 0.05702]),
        ];

        Self {
            tiers,
            rows: grid
                .iter()
                .map(|(lvr, rates)| LmiRateRow::new(*lvr, rates.to_vec()))
                .collect(),
        }
    }

    pub fn tiers(&self) -> &LoanTierCeilings {
        &self.tiers
    }

    pub fn rows(&self) -> &[LmiRateRow] {
        &self.rows
    }

    /// Row for an LVR, or `None` at or below the 80% cutoff
    ///
    /// Picks the row with the largest lower bound not above `lvr_percent`, so
    /// LVRs beyond the top row use the top row. An LVR above the cutoff but
    /// below the first row's bound is priced from the first row.
    pub fn row(&self, lvr_percent: f64) -> Option<&LmiRateRow> {
        if lvr_percent <= LMI_LVR_CUTOFF {
            return None;
        }

        let idx = self.rows.partition_point(|r| r.lvr_lower_bound <= lvr_percent);
        self.rows.get(idx.saturating_sub(1))
    }

    /// Column index for a loan amount
    pub fn column(&self, loan_amount: f64) -> usize {
        self.tiers.column_for(loan_amount)
    }

    /// Premium rate for an LVR and loan amount, `None` when no LMI applies
    pub fn rate(&self, lvr_percent: f64, loan_amount: f64) -> Option<f64> {
        let row = self.row(lvr_percent)?;
        Some(row.rates_by_loan_tier[self.column(loan_amount)])
    }
}

impl Default for LmiRateTable {
    fn default() -> Self {
        Self::default_table()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_row_at_or_below_cutoff() {
        let table = LmiRateTable::default_table();

        assert!(table.row(0.0).is_none());
        assert!(table.row(79.99).is_none());
        assert!(table.row(80.0).is_none());
        assert!(table.rate(80.0, 500_000.0).is_none());
    }

    #[test]
    fn test_row_is_largest_lower_bound() {
        let table = LmiRateTable::default_table();

        assert_eq!(table.row(85.01).unwrap().lvr_lower_bound, 85.01);
        assert_eq!(table.row(85.5).unwrap().lvr_lower_bound, 85.01);
        assert_eq!(table.row(85.0).unwrap().lvr_lower_bound, 84.01);
        // Just above the cutoff but below the first band
        assert_eq!(table.row(80.005).unwrap().lvr_lower_bound, 80.01);
    }

    #[test]
    fn test_lvr_above_top_row_uses_last_row() {
        let table = LmiRateTable::default_table();
        assert_eq!(table.row(99.0).unwrap().lvr_lower_bound, 95.01);
    }

    #[test]
    fn test_column_lookup() {
        let table = LmiRateTable::default_table();

        assert_eq!(table.column(0.0), 0);
        assert_eq!(table.column(300_000.0), 0);
        assert_eq!(table.column(300_000.01), 1);
        assert_eq!(table.column(550_000.0), 2);
        assert_eq!(table.column(1_000_000.0), 4);
    }

    #[test]
    fn test_over_cap_loan_uses_last_column() {
        let table = LmiRateTable::default_table();
        assert_eq!(table.column(5_000_000.0), table.tiers().len() - 1);
    }

    #[test]
    fn test_rate_85_01_at_550k() {
        let table = LmiRateTable::default_table();
        assert_eq!(table.rate(85.01, 550_000.0), Some(0.01258));
    }

    #[test]
    fn test_rejects_ragged_rows() {
        let tiers = LoanTierCeilings::new(vec![100.0, 200.0]).unwrap();
        let result = LmiRateTable::new(
            tiers,
            vec![
                LmiRateRow::new(80.01, vec![0.01, 0.02]),
                LmiRateRow::new(90.01, vec![0.03]),
            ],
        );
        assert!(matches!(
            result,
            Err(RateTableError::RaggedLmiRow { row: 1, expected: 2, found: 1 })
        ));
    }

    #[test]
    fn test_rejects_unsorted_tiers() {
        assert!(LoanTierCeilings::new(vec![200.0, 100.0]).is_err());
        assert!(LoanTierCeilings::new(vec![]).is_err());
    }
}
