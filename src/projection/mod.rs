//! Multi-year investment projection

mod engine;
mod investment;
mod records;
mod state;

pub use engine::{ProjectionConfig, ProjectionEngine};
pub use investment::{GrowthRates, HoldingCosts, InvestmentInputs};
pub use records::{ProjectionResult, ProjectionSummary, YearRecord};
pub use state::ProjectionState;

/// Weeks of rent per year
pub const WEEKS_PER_YEAR: f64 = 52.0;
