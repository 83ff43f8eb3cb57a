//! Budget-change events and the calendar span they cover.

pub mod input;
pub mod span;
#[allow(clippy::module_inception)]
pub mod timeline;

pub use input::{BudgetInput, RawCeiling};
pub use span::DateSpan;
pub use timeline::{
    parse_timestamp, BudgetEvent, BudgetTimeline, DATETIME_FORMAT, DATE_FORMAT, MAX_CEILING,
};
