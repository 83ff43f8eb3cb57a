//! Randomized cost generation constrained by daily and monthly limits.

pub mod simulator;
pub mod summary;

use serde::{Deserialize, Serialize};

pub use simulator::{SimulatedCost, Simulator};
pub use summary::DaySummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimulationState {
    NotRun,
    Running,
    Done,
    /// A run stopped on an error. Terminal: the plan holds partial costs.
    Failed,
}

impl Default for SimulationState {
    fn default() -> Self {
        SimulationState::NotRun
    }
}
