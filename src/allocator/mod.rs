//! Budget allocation engine
//!
//! Pure and synchronous: everything it needs (spending history, an optional
//! forecast, the anchor date) is passed in, and nothing here does I/O. The
//! services layer fetches the inputs and persists the results.

pub mod distribute;
pub mod fixed_bills;
pub mod forecast_weights;
pub mod history;
pub mod rescale;

pub use distribute::{
    distribute_budget, AllocationInputs, AllocationPolicy, DistributionRequest,
    DEFAULT_MIN_RESERVE, DEFAULT_SAVINGS_PERCENT,
};
pub use fixed_bills::{detect_fixed_bills, DEFAULT_FIXED_BILL_THRESHOLD};
pub use forecast_weights::{forecast_allocations, FORECAST_HEADROOM, FORECAST_SCALE_CAP};
pub use history::{historical_averages, DEFAULT_HISTORY_MONTHS};
pub use rescale::adjust_to_match_total;
