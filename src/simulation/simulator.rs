use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    config::SimulationConfig,
    errors::{RangeError, SimulationError},
    plan::DailyPlan,
    timeline::BudgetTimeline,
    utils::money::{from_minor_units, minor_units, quantize},
};

use super::{summary::DaySummary, SimulationState};

const SECONDS_PER_DAY: i64 = 86_400;

/// A generated cost. Never edited after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulatedCost {
    pub timestamp: NaiveDateTime,
    pub amount: Decimal,
}

/// Injects random costs into a [`DailyPlan`] it owns. Single-shot: one
/// [`Simulator::generate_costs`] call per instance.
pub struct Simulator<R: Rng = SmallRng> {
    plan: DailyPlan,
    rng: R,
    state: SimulationState,
    costs: Vec<SimulatedCost>,
    max_costs_per_day: u32,
    precision: u32,
}

impl Simulator<SmallRng> {
    pub fn new(timeline: &BudgetTimeline) -> Result<Self, RangeError> {
        Ok(Self::from_plan(
            DailyPlan::from_timeline(timeline)?,
            SmallRng::from_entropy(),
        ))
    }

    /// Builds the plan with the configured factor; seeds the RNG when `config.seed` is set.
    pub fn from_timeline(
        timeline: &BudgetTimeline,
        config: &SimulationConfig,
    ) -> Result<Self, RangeError> {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let plan = DailyPlan::with_factor(timeline, config.daily_budget_factor)?;
        Ok(Self::from_plan(plan, rng)
            .with_max_costs_per_day(config.max_costs_per_day)
            .with_precision(config.cost_precision))
    }
}

impl<R: Rng> Simulator<R> {
    pub fn from_plan(plan: DailyPlan, rng: R) -> Self {
        let defaults = SimulationConfig::default();
        Self {
            plan,
            rng,
            state: SimulationState::default(),
            costs: Vec::new(),
            max_costs_per_day: defaults.max_costs_per_day,
            precision: defaults.cost_precision,
        }
    }

    pub fn with_max_costs_per_day(mut self, max_costs_per_day: u32) -> Self {
        self.max_costs_per_day = max_costs_per_day;
        self
    }

    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    /// For every planned day, draws up to `max_costs_per_day` costs at random
    /// seconds and records each one before drawing the next, so later costs see
    /// the limits depleted by earlier ones. An error leaves the simulator
    /// [`SimulationState::Failed`].
    pub fn generate_costs(&mut self) -> Result<(), SimulationError> {
        if self.state != SimulationState::NotRun {
            return Err(SimulationError::AlreadyRun);
        }
        self.state = SimulationState::Running;

        match self.apply_random_costs() {
            Ok(days) => {
                self.state = SimulationState::Done;
                info!(days, costs = self.costs.len(), "simulation finished");
                Ok(())
            }
            Err(err) => {
                self.state = SimulationState::Failed;
                warn!(%err, costs = self.costs.len(), "simulation aborted");
                Err(err.into())
            }
        }
    }

    /// Returns the number of days visited.
    fn apply_random_costs(&mut self) -> Result<usize, RangeError> {
        let dates: Vec<NaiveDate> = self.plan.dates().collect();
        for date in &dates {
            let count = self.rng.gen_range(0..=self.max_costs_per_day);
            let midnight = date.and_time(NaiveTime::MIN);
            let mut timestamps = Vec::with_capacity(count as usize);
            for _ in 0..count {
                let offset = self.rng.gen_range(0..SECONDS_PER_DAY);
                timestamps.push(midnight + Duration::seconds(offset));
            }

            // generation order, not time-of-day order
            for at in timestamps {
                let limit = self.cost_limit(at)?;
                let amount = self.draw_amount(limit)?;
                debug!(%at, %limit, %amount, "simulated cost");
                self.plan.add_cost(at, amount)?;
                self.costs.push(SimulatedCost {
                    timestamp: at,
                    amount,
                });
            }
        }
        Ok(dates.len())
    }

    /// The tighter of the daily and monthly limits. An instant before the first
    /// ceiling takes effect has nothing to spend.
    fn cost_limit(&self, at: NaiveDateTime) -> Result<Decimal, RangeError> {
        let daily = match self.plan.daily_limit(at) {
            Ok(limit) => limit,
            Err(RangeError::NoCeilingInEffect(_)) => Decimal::ZERO,
            Err(err) => return Err(err),
        };
        Ok(daily.min(self.plan.monthly_limit(at)?))
    }

    /// Uniform over `[0, limit)` in whole minor units.
    fn draw_amount(&mut self, limit: Decimal) -> Result<Decimal, RangeError> {
        if limit <= Decimal::ZERO {
            return Ok(quantize(Decimal::ZERO, self.precision));
        }
        let bound = minor_units(limit, self.precision)
            .ok_or(RangeError::Overflow("scaling a limit to minor units"))?;
        if bound <= 0 {
            return Ok(quantize(Decimal::ZERO, self.precision));
        }
        let units = self.rng.gen_range(0..bound);
        Ok(quantize(
            from_minor_units(units, self.precision),
            self.precision,
        ))
    }

    /// Per-day report sorted by date. Available once costs have been generated.
    pub fn summary(&self) -> Result<Vec<DaySummary>, SimulationError> {
        match self.state {
            SimulationState::Done => {}
            SimulationState::Failed => return Err(SimulationError::Failed),
            SimulationState::NotRun | SimulationState::Running => {
                return Err(SimulationError::NotRun)
            }
        }
        Ok(self
            .plan
            .days()
            .map(|(date, day)| DaySummary::from_day(date, day, self.precision))
            .collect())
    }

    /// Costs in the order they were generated.
    pub fn costs(&self) -> &[SimulatedCost] {
        &self.costs
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    pub fn plan(&self) -> &DailyPlan {
        &self.plan
    }

    pub fn into_plan(self) -> DailyPlan {
        self.plan
    }
}
