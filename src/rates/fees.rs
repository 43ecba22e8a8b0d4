//! Fixed government and settlement fees

use serde::{Deserialize, Serialize};

/// Fixed fees charged on every purchase
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeeSchedule {
    /// Mortgage registration fee
    pub registration: f64,

    /// Land title transfer fee
    pub transfer: f64,

    /// Legal, conveyancing and inspection allowance
    pub other: f64,
}

impl FeeSchedule {
    /// ACT registration and transfer fees with a conveyancing allowance
    pub fn act_default() -> Self {
        Self {
            registration: 172.0,
            transfer: 463.0,
            other: 1_500.0,
        }
    }

    /// Sum of the fixed fees
    pub fn fixed_total(&self) -> f64 {
        self.registration + self.transfer + self.other
    }

    /// Stamp duty plus the fixed fees
    pub fn total_fees(&self, stamp_duty: f64) -> f64 {
        stamp_duty + self.fixed_total()
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self::act_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_fees() {
        let fees = FeeSchedule::act_default();
        assert_eq!(fees.fixed_total(), 2_135.0);
        assert_eq!(fees.total_fees(10_000.0), 12_135.0);
    }
}
