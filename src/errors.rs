use std::result::Result as StdResult;

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

use crate::plan::MonthKey;

/// Failures parsing raw timeline input or month keys.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid timestamp `{value}`: expected MM.DD.YYYY HH:MM:SS")]
    InvalidTimestamp { value: String },
    #[error("Invalid budget value `{value}` at {timestamp}")]
    InvalidCeiling { timestamp: String, value: String },
    #[error("Negative budget value `{value}` at {timestamp}")]
    NegativeCeiling { timestamp: String, value: String },
    #[error("Budget value `{value}` at {timestamp} exceeds the supported maximum")]
    CeilingTooLarge { timestamp: String, value: String },
    #[error("Invalid month key `{value}`: expected YYYY-MM")]
    InvalidMonthKey { value: String },
}

/// Lookups outside the span covered by a daily plan, and arithmetic that
/// leaves the decimal range.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RangeError {
    #[error("Date {0} is outside the planned span")]
    DateOutOfSpan(NaiveDate),
    #[error("No budget ceiling is in effect at {0}")]
    NoCeilingInEffect(NaiveDateTime),
    #[error("Month {0} has no budget aggregate")]
    MonthNotPlanned(MonthKey),
    #[error("Budget arithmetic overflowed while {0}")]
    Overflow(&'static str),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimulationError {
    #[error("Simulation has already been run")]
    AlreadyRun,
    #[error("Simulation has not been run yet")]
    NotRun,
    #[error("Simulation failed part-way and holds no usable result")]
    Failed,
    #[error(transparent)]
    Range(#[from] RangeError),
}

/// Unified error type for the crate's public surface.
#[derive(Debug, Error)]
pub enum BudgetError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Range(#[from] RangeError),
    #[error(transparent)]
    Simulation(#[from] SimulationError),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

pub type Result<T> = StdResult<T, BudgetError>;

impl From<std::io::Error> for BudgetError {
    fn from(err: std::io::Error) -> Self {
        BudgetError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for BudgetError {
    fn from(err: serde_json::Error) -> Self {
        BudgetError::Storage(err.to_string())
    }
}
