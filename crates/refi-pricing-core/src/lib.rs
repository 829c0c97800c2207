pub mod amortization;
pub mod error;
pub mod pricing;
pub mod types;

#[cfg(feature = "schedule")]
pub mod schedule;

#[cfg(feature = "rate_sheet")]
pub mod rate_sheet;

pub use error::RefiPricingError;
pub use pricing::engine::{
    compute_scenario, compute_scenario_with_rules, price_scenario, ScenarioResult,
};
pub use pricing::input::{LoanProgram, ScenarioInput, TemporaryBuydown};
pub use pricing::presentation::{present, Audience};
pub use pricing::rules::PricingRules;
pub use types::*;

/// Standard result type for all refi-pricing operations
pub type RefiPricingResult<T> = Result<T, RefiPricingError>;
