#![doc(test(attr(deny(warnings))))]

//! Budget Plan unrolls sparse budget-change events into a per-day spending
//! schedule, answers daily and monthly limit queries against it, and simulates
//! randomized costs constrained by those limits.

pub mod config;
pub mod errors;
pub mod ledger;
pub mod plan;
pub mod simulation;
pub mod timeline;
pub mod utils;

use std::sync::Once;

pub use errors::{BudgetError, ParseError, RangeError, Result, SimulationError};
pub use plan::{DailyPlan, MonthKey};
pub use simulation::{DaySummary, Simulator};
pub use timeline::{BudgetInput, BudgetTimeline};

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Budget Plan tracing initialized.");
    });
}
