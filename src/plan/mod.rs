//! Dense per-day budget schedule derived from a [`crate::timeline::BudgetTimeline`].

pub mod daily_plan;
pub mod day;
pub mod month;

pub use daily_plan::{DailyPlan, DAILY_BUDGET_FACTOR};
pub use day::{DailyBudgetRecord, DailyCostRecord, DayPlan};
pub use month::{MonthKey, MonthlyAggregate};
