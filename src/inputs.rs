//! Bounded numeric inputs
//!
//! Every input field declares a `[min, max]` range and a default. Values are
//! clamped into range; non-numeric or non-finite values fall back to the
//! default. The engine only ever sees values that passed through here.

use std::collections::HashMap;
use std::str::FromStr;

use crate::error::InputError;
use crate::loan::LoanInputs;
use crate::projection::{HoldingCosts, InvestmentInputs};

/// Declared range and default for one input
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputBounds {
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

impl InputBounds {
    fn new(min: f64, max: f64, default: f64) -> Self {
        Self { min, max, default }
    }

    /// Clamp into range, substituting the default for NaN or infinities
    pub fn clamp(&self, value: f64) -> f64 {
        if !value.is_finite() {
            return self.default;
        }
        value.clamp(self.min, self.max)
    }

    /// Parse raw text, substituting the default when it is not a number
    pub fn parse_or_default(&self, raw: &str) -> f64 {
        self.try_parse(raw).unwrap_or(self.default)
    }

    /// Parse raw text strictly, clamping a finite number into range
    pub fn try_parse(&self, raw: &str) -> Result<f64, InputError> {
        match raw.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value.clamp(self.min, self.max)),
            _ => Err(InputError::InvalidNumber(raw.to_string())),
        }
    }
}

/// Every numeric input the engine accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputField {
    PropertyValue,
    DepositPercent,
    InterestRate,
    LoanTerm,
    CouncilRates,
    Strata,
    LandTax,
    SinkingFund,
    OtherCosts,
    WeeklyRent,
    CapitalGrowth,
    Inflation,
}

impl InputField {
    pub const ALL: [InputField; 12] = [
        InputField::PropertyValue,
        InputField::DepositPercent,
        InputField::InterestRate,
        InputField::LoanTerm,
        InputField::CouncilRates,
        InputField::Strata,
        InputField::LandTax,
        InputField::SinkingFund,
        InputField::OtherCosts,
        InputField::WeeklyRent,
        InputField::CapitalGrowth,
        InputField::Inflation,
    ];

    /// Range and default for this field
    pub fn bounds(&self) -> InputBounds {
        match self {
            InputField::PropertyValue => InputBounds::new(0.0, 20_000_000.0, 800_000.0),
            InputField::DepositPercent => InputBounds::new(0.0, 100.0, 20.0),
            InputField::InterestRate => InputBounds::new(0.0, 25.0, 6.0),
            InputField::LoanTerm => InputBounds::new(1.0, 100.0, 30.0),
            InputField::CouncilRates => InputBounds::new(0.0, 100_000.0, 2_500.0),
            InputField::Strata => InputBounds::new(0.0, 100_000.0, 0.0),
            InputField::LandTax => InputBounds::new(0.0, 200_000.0, 3_000.0),
            InputField::SinkingFund => InputBounds::new(0.0, 100_000.0, 0.0),
            InputField::OtherCosts => InputBounds::new(0.0, 100_000.0, 1_500.0),
            InputField::WeeklyRent => InputBounds::new(0.0, 20_000.0, 600.0),
            InputField::CapitalGrowth => InputBounds::new(0.0, 30.0, 5.0),
            InputField::Inflation => InputBounds::new(0.0, 30.0, 3.0),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            InputField::PropertyValue => "property_value",
            InputField::DepositPercent => "deposit_percent",
            InputField::InterestRate => "interest_rate",
            InputField::LoanTerm => "loan_term",
            InputField::CouncilRates => "council_rates",
            InputField::Strata => "strata",
            InputField::LandTax => "land_tax",
            InputField::SinkingFund => "sinking_fund",
            InputField::OtherCosts => "other_costs",
            InputField::WeeklyRent => "weekly_rent",
            InputField::CapitalGrowth => "capital_growth",
            InputField::Inflation => "inflation",
        }
    }
}

impl FromStr for InputField {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InputField::ALL
            .iter()
            .copied()
            .find(|field| field.name() == s)
            .ok_or_else(|| InputError::UnknownField(s.to_string()))
    }
}

/// Collected inputs for one recalculation
///
/// Fields never set read as their default.
#[derive(Debug, Clone, Default)]
pub struct InputForm {
    values: HashMap<InputField, f64>,
}

impl InputForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a numeric value, clamped into the field's range
    pub fn set(&mut self, field: InputField, value: f64) -> f64 {
        let clamped = field.bounds().clamp(value);
        if clamped != value {
            log::warn!("{} = {} adjusted to {}", field.name(), value, clamped);
        }
        self.values.insert(field, clamped);
        clamped
    }

    /// Store a raw text value for a named field, defaulting unparsable text
    pub fn set_raw(&mut self, name: &str, raw: &str) -> Result<f64, InputError> {
        let field: InputField = name.parse()?;
        let value = field.bounds().parse_or_default(raw);
        if raw.trim().parse::<f64>().map_or(true, |v| v != value) {
            log::warn!("{} = `{}` adjusted to {}", name, raw, value);
        }
        self.values.insert(field, value);
        Ok(value)
    }

    /// Like `set_raw`, but unparsable text is an error and leaves the form unchanged
    pub fn set_raw_strict(&mut self, name: &str, raw: &str) -> Result<f64, InputError> {
        let field: InputField = name.parse()?;
        let value = field.bounds().try_parse(raw)?;
        self.values.insert(field, value);
        Ok(value)
    }

    pub fn get(&self, field: InputField) -> f64 {
        self.values
            .get(&field)
            .copied()
            .unwrap_or_else(|| field.bounds().default)
    }

    pub fn loan_inputs(&self) -> LoanInputs {
        LoanInputs {
            property_value: self.get(InputField::PropertyValue),
            deposit_percent: self.get(InputField::DepositPercent),
            annual_interest_rate_percent: self.get(InputField::InterestRate),
            loan_term_years: self.get(InputField::LoanTerm).round() as u32,
        }
    }

    pub fn investment_inputs(&self, projection_enabled: bool) -> InvestmentInputs {
        InvestmentInputs {
            holding_costs: HoldingCosts {
                council_rates: self.get(InputField::CouncilRates),
                strata: self.get(InputField::Strata),
                land_tax: self.get(InputField::LandTax),
                sinking_fund: self.get(InputField::SinkingFund),
                other: self.get(InputField::OtherCosts),
            },
            target_weekly_rent: self.get(InputField::WeeklyRent),
            capital_growth_rate_percent: self.get(InputField::CapitalGrowth),
            inflation_rate_percent: self.get(InputField::Inflation),
            projection_enabled,
        }
    }
}
