//! Stamp duty (conveyance duty) brackets
//!
//! Duty is tiered by property value. Each bracket charges a base amount plus a
//! marginal rate on the value above its threshold. Above the override ceiling a
//! single flat rate applies to the whole value instead of the bracket search.

use serde::{Deserialize, Serialize};

use crate::error::RateTableError;

/// Values strictly above this use the flat override rate
pub const OVERRIDE_CEILING: f64 = 1_455_000.0;

/// Flat rate (percent of the whole value) above the override ceiling
pub const OVERRIDE_RATE_PERCENT: f64 = 4.54;

/// One tier of the stamp duty schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StampDutyBracket {
    /// Lowest property value this bracket applies to
    pub threshold: f64,

    /// Duty payable at the threshold
    pub base: f64,

    /// Percent charged on the value above the threshold
    pub marginal_rate_percent: f64,
}

impl StampDutyBracket {
    pub fn new(threshold: f64, base: f64, marginal_rate_percent: f64) -> Self {
        Self {
            threshold,
            base,
            marginal_rate_percent,
        }
    }

    /// Duty for a value falling in this bracket
    pub fn duty(&self, value: f64) -> f64 {
        self.base + (value - self.threshold) * self.marginal_rate_percent / 100.0
    }
}

/// Ordered stamp duty brackets plus the flat-rate override
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StampDutySchedule {
    brackets: Vec<StampDutyBracket>,
    override_ceiling: f64,
    override_rate_percent: f64,
}

impl StampDutySchedule {
    /// Build a schedule, checking that the brackets partition `[0, ∞)`
    pub fn new(
        brackets: Vec<StampDutyBracket>,
        override_ceiling: f64,
        override_rate_percent: f64,
    ) -> Result<Self, RateTableError> {
        let first = brackets.first().ok_or(RateTableError::Empty {
            table: "stamp duty brackets",
        })?;
        if first.threshold != 0.0 {
            return Err(RateTableError::MissingZeroBracket);
        }
        if let Some(index) = brackets
            .windows(2)
            .position(|pair| pair[1].threshold <= pair[0].threshold)
        {
            return Err(RateTableError::Unsorted {
                table: "stamp duty brackets",
                index: index + 1,
            });
        }

        Ok(Self {
            brackets,
            override_ceiling,
            override_rate_percent,
        })
    }

    /// ACT non-owner-occupier conveyance duty schedule
    ///
    /// Thresholds start one dollar above the previous bracket's upper value,
    /// so the marginal part is measured from e.g. 750,001 rather than 750,000.
    pub fn act_default() -> Self {
        Self {
            brackets: vec![
                StampDutyBracket::new(0.0, 0.0, 1.20),
                StampDutyBracket::new(200_001.0, 2_400.0, 2.20),
                StampDutyBracket::new(300_001.0, 4_600.0, 3.40),
                StampDutyBracket::new(500_001.0, 11_400.0, 4.32),
                StampDutyBracket::new(750_001.0, 22_200.0, 5.90),
                StampDutyBracket::new(1_000_001.0, 36_950.0, 6.40),
            ],
            override_ceiling: OVERRIDE_CEILING,
            override_rate_percent: OVERRIDE_RATE_PERCENT,
        }
    }

    /// Regular brackets, ascending by threshold
    pub fn brackets(&self) -> &[StampDutyBracket] {
        &self.brackets
    }

    pub fn override_ceiling(&self) -> f64 {
        self.override_ceiling
    }

    /// The override expressed as a bracket charging its rate on the whole value
    pub fn override_bracket(&self) -> StampDutyBracket {
        StampDutyBracket::new(0.0, 0.0, self.override_rate_percent)
    }

    /// Bracket applying to `value`
    ///
    /// Values strictly above the override ceiling get the override. Everything
    /// else gets the bracket with the largest threshold not above `value`; a
    /// value exactly at the ceiling still uses the regular search.
    ///
    /// # Panics
    /// If `value` is negative or NaN. Callers validate inputs, so no bracket
    /// for a supplied value is a programming error.
    pub fn bracket_for(&self, value: f64) -> StampDutyBracket {
        if value > self.override_ceiling {
            return self.override_bracket();
        }
        self.brackets[self.bracket_index(value)]
    }

    fn bracket_index(&self, value: f64) -> usize {
        let idx = self.brackets.partition_point(|b| b.threshold <= value);
        match idx.checked_sub(1) {
            Some(i) => i,
            None => panic!("no stamp duty bracket covers property value {value}"),
        }
    }

    /// Stamp duty payable on a property value
    ///
    /// Below the ceiling, a bracket's duty never exceeds the next bracket's
    /// base. This keeps the gap between a bracket's upper value and the next
    /// `x001` threshold flat instead of overshooting it.
    pub fn duty(&self, property_value: f64) -> f64 {
        if property_value > self.override_ceiling {
            return self.override_bracket().duty(property_value);
        }

        let idx = self.bracket_index(property_value);
        let duty = self.brackets[idx].duty(property_value);
        match self.brackets.get(idx + 1) {
            Some(next) => duty.min(next.base),
            None => duty,
        }
    }
}

impl Default for StampDutySchedule {
    fn default() -> Self {
        Self::act_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    #[test]
    fn test_bracket_selection() {
        let schedule = StampDutySchedule::act_default();

        assert_eq!(schedule.bracket_for(0.0).threshold, 0.0);
        assert_eq!(schedule.bracket_for(200_000.0).threshold, 0.0);
        assert_eq!(schedule.bracket_for(200_001.0).threshold, 200_001.0);
        assert_eq!(schedule.bracket_for(800_000.0).threshold, 750_001.0);
        assert_eq!(schedule.bracket_for(OVERRIDE_CEILING).threshold, 1_000_001.0);
    }

    #[test]
    fn test_override_above_ceiling() {
        let schedule = StampDutySchedule::act_default();

        let bracket = schedule.bracket_for(OVERRIDE_CEILING + 1.0);
        assert_eq!(bracket.base, 0.0);
        assert_eq!(bracket.marginal_rate_percent, OVERRIDE_RATE_PERCENT);
        assert_abs_diff_eq!(schedule.duty(2_000_000.0), 90_800.0, epsilon = 1e-6);
    }

    #[test]
    fn test_ceiling_boundary_uses_bracket_formula() {
        let schedule = StampDutySchedule::act_default();

        // At the ceiling: 36,950 + 454,999 * 6.4%
        assert_abs_diff_eq!(schedule.duty(OVERRIDE_CEILING), 66_069.936, epsilon = 1e-6);
        // One dollar over: flat 4.54% of the whole value, lower than the bracket figure
        assert_abs_diff_eq!(schedule.duty(OVERRIDE_CEILING + 1.0), 66_057.0454, epsilon = 1e-6);
    }

    #[test]
    fn test_800k_duty() {
        let schedule = StampDutySchedule::act_default();
        assert_abs_diff_eq!(schedule.duty(800_000.0), 25_149.941, epsilon = 1e-6);
    }

    #[test]
    fn test_non_decreasing_across_boundaries() {
        let schedule = StampDutySchedule::act_default();

        for bracket in schedule.brackets().iter().skip(1) {
            let below = schedule.duty(bracket.threshold - 1.0);
            let at = schedule.duty(bracket.threshold);
            assert!(at >= below, "duty drops at {}: {} -> {}", bracket.threshold, below, at);
        }
    }

    #[test]
    fn test_gap_before_second_bracket_is_flat() {
        let schedule = StampDutySchedule::act_default();

        assert_abs_diff_eq!(schedule.duty(200_000.0), 2_400.0, epsilon = 1e-9);
        assert_eq!(schedule.duty(200_000.5), 2_400.0);
        assert!(schedule.duty(200_001.0) >= schedule.duty(200_000.5));
    }

    proptest! {
        #[test]
        fn prop_duty_non_decreasing_up_to_ceiling(
            a in 0.0..=OVERRIDE_CEILING,
            b in 0.0..=OVERRIDE_CEILING,
        ) {
            let schedule = StampDutySchedule::act_default();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(
                schedule.duty(hi) >= schedule.duty(lo),
                "duty({}) = {} < duty({}) = {}",
                hi, schedule.duty(hi), lo, schedule.duty(lo)
            );
        }

        #[test]
        fn prop_duty_non_decreasing_near_thresholds(
            index in 1usize..6,
            below in 0.0f64..2.0,
            above in 0.0f64..2.0,
        ) {
            let schedule = StampDutySchedule::act_default();
            let threshold = schedule.brackets()[index].threshold;
            prop_assert!(schedule.duty(threshold + above) >= schedule.duty(threshold - below));
        }
    }

    #[test]
    fn test_rejects_bad_schedules() {
        let missing_zero = StampDutySchedule::new(
            vec![StampDutyBracket::new(100.0, 0.0, 1.0)],
            OVERRIDE_CEILING,
            OVERRIDE_RATE_PERCENT,
        );
        assert!(matches!(missing_zero, Err(RateTableError::MissingZeroBracket)));

        let unsorted = StampDutySchedule::new(
            vec![
                StampDutyBracket::new(0.0, 0.0, 1.0),
                StampDutyBracket::new(500.0, 5.0, 2.0),
                StampDutyBracket::new(400.0, 4.0, 3.0),
            ],
            OVERRIDE_CEILING,
            OVERRIDE_RATE_PERCENT,
        );
        assert!(matches!(unsorted, Err(RateTableError::Unsorted { index: 2, .. })));
    }

    #[test]
    #[should_panic(expected = "no stamp duty bracket")]
    fn test_negative_value_is_a_bug() {
        StampDutySchedule::act_default().bracket_for(-1.0);
    }
}
