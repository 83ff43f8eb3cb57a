use std::collections::{btree_map::Entry, BTreeMap};

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{errors::RangeError, timeline::BudgetTimeline};

use super::{
    day::DayPlan,
    month::{MonthKey, MonthlyAggregate},
};

/// Multiplier applied to a day's resolved ceiling to obtain its soft spending limit.
pub const DAILY_BUDGET_FACTOR: Decimal = Decimal::TWO;

/// A budget timeline unrolled into one entry per calendar day, plus monthly roll-ups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPlan {
    days: BTreeMap<NaiveDate, DayPlan>,
    months: BTreeMap<MonthKey, MonthlyAggregate>,
    daily_factor: Decimal,
}

impl DailyPlan {
    pub fn from_timeline(timeline: &BudgetTimeline) -> Result<Self, RangeError> {
        Self::with_factor(timeline, DAILY_BUDGET_FACTOR)
    }

    /// Sweeps the events in timestamp order. Days between two event dates get the
    /// previous day's maximum as a midnight entry.
    pub fn with_factor(
        timeline: &BudgetTimeline,
        daily_factor: Decimal,
    ) -> Result<Self, RangeError> {
        let mut plan = Self {
            days: BTreeMap::new(),
            months: BTreeMap::new(),
            daily_factor,
        };

        let mut cursor: Option<NaiveDate> = None;
        let mut last_max = Decimal::ZERO;
        for event in timeline.events() {
            let date = event.timestamp.date();
            let mut day = *cursor.get_or_insert(date);
            while day < date {
                day += Duration::days(1);
                if day != date {
                    debug!(%day, ceiling = %last_max, "carrying budget ceiling forward");
                    plan.days.insert(day, DayPlan::carried_forward(last_max));
                }
            }
            cursor = Some(date);
            last_max = plan.add_budget_entry(event.timestamp, event.ceiling);
        }

        plan.compute_monthly_totals()?;
        info!(
            days = plan.days.len(),
            months = plan.months.len(),
            "daily plan built"
        );
        Ok(plan)
    }

    /// Returns the day's maximum after the entry is added.
    fn add_budget_entry(&mut self, timestamp: NaiveDateTime, ceiling: Decimal) -> Decimal {
        match self.days.entry(timestamp.date()) {
            Entry::Occupied(entry) => {
                let day = entry.into_mut();
                day.budget.add(timestamp.time(), ceiling);
                day.budget.maximum()
            }
            Entry::Vacant(entry) => entry
                .insert(DayPlan::new(timestamp.time(), ceiling))
                .budget
                .maximum(),
        }
    }

    fn compute_monthly_totals(&mut self) -> Result<(), RangeError> {
        for (date, day) in &self.days {
            let month = self.months.entry(MonthKey::of(date)).or_default();
            month.budget = month
                .budget
                .checked_add(day.budget.maximum())
                .ok_or(RangeError::Overflow("summing monthly budgets"))?;
        }
        Ok(())
    }

    /// Soft limit at `at`: the ceiling in effect times the daily factor, minus the
    /// day's costs so far. Negative when the day is over budget.
    pub fn daily_limit(&self, at: NaiveDateTime) -> Result<Decimal, RangeError> {
        let date = at.date();
        let day = self
            .days
            .get(&date)
            .ok_or(RangeError::DateOutOfSpan(date))?;
        let ceiling = match day.budget.resolve(at.time()) {
            Some(ceiling) => ceiling,
            None => date
                .pred_opt()
                .and_then(|previous| self.days.get(&previous))
                .map(|previous| previous.budget.maximum())
                .ok_or(RangeError::NoCeilingInEffect(at))?,
        };
        ceiling
            .checked_mul(self.daily_factor)
            .and_then(|limit| limit.checked_sub(day.cost.total()))
            .ok_or(RangeError::Overflow("applying the daily budget factor"))
    }

    /// Aggregate budget of the month containing `at` minus its costs so far.
    pub fn monthly_limit<D: Datelike>(&self, at: D) -> Result<Decimal, RangeError> {
        let key = MonthKey::of(&at);
        self.months
            .get(&key)
            .ok_or(RangeError::MonthNotPlanned(key))?
            .remaining()
            .ok_or(RangeError::Overflow("subtracting monthly costs"))
    }

    /// Records a cost against its day and month. Limits are not enforced here.
    /// On overflow neither the day nor the month changes.
    pub fn add_cost(&mut self, at: NaiveDateTime, amount: Decimal) -> Result<(), RangeError> {
        let date = at.date();
        let day = self
            .days
            .get_mut(&date)
            .ok_or(RangeError::DateOutOfSpan(date))?;
        let key = MonthKey::of(&date);
        let month = self
            .months
            .get_mut(&key)
            .ok_or(RangeError::MonthNotPlanned(key))?;
        let costs = month
            .costs
            .checked_add(amount)
            .ok_or(RangeError::Overflow("recording a cost"))?;
        day.cost.add(at.time(), amount)?;
        month.costs = costs;
        Ok(())
    }

    pub fn day(&self, date: NaiveDate) -> Option<&DayPlan> {
        self.days.get(&date)
    }

    pub fn days(&self) -> impl Iterator<Item = (NaiveDate, &DayPlan)> + '_ {
        self.days.iter().map(|(date, day)| (*date, day))
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.keys().copied()
    }

    pub fn month(&self, key: MonthKey) -> Option<&MonthlyAggregate> {
        self.months.get(&key)
    }

    pub fn months(&self) -> impl Iterator<Item = (MonthKey, &MonthlyAggregate)> + '_ {
        self.months.iter().map(|(key, month)| (*key, month))
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.days.keys().next().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.days.keys().next_back().copied()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn daily_factor(&self) -> Decimal {
        self.daily_factor
    }
}
