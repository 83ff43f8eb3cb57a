use std::collections::BTreeMap;

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::RangeError;

/// Ceilings that became effective during one day, with the day's maximum cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyBudgetRecord {
    entries: BTreeMap<NaiveTime, Decimal>,
    maximum: Decimal,
}

impl DailyBudgetRecord {
    pub fn new(time: NaiveTime, ceiling: Decimal) -> Self {
        Self {
            entries: BTreeMap::from([(time, ceiling)]),
            maximum: ceiling,
        }
    }

    /// A day without events: the previous day's maximum as a single midnight entry.
    pub fn carried_forward(ceiling: Decimal) -> Self {
        Self::new(NaiveTime::MIN, ceiling)
    }

    pub fn add(&mut self, time: NaiveTime, ceiling: Decimal) {
        self.entries.insert(time, ceiling);
        if ceiling > self.maximum {
            self.maximum = ceiling;
        }
    }

    pub fn maximum(&self) -> Decimal {
        self.maximum
    }

    pub fn entries(&self) -> &BTreeMap<NaiveTime, Decimal> {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ceiling of the latest entry at or before `time`.
    pub fn resolve(&self, time: NaiveTime) -> Option<Decimal> {
        self.entries
            .range(..=time)
            .next_back()
            .map(|(_, ceiling)| *ceiling)
    }
}

/// Costs recorded during one day and their running total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCostRecord {
    entries: BTreeMap<NaiveTime, Decimal>,
    total: Decimal,
}

impl DailyCostRecord {
    /// Costs landing on the same second accumulate into one entry. Leaves the
    /// record untouched when either sum overflows.
    pub fn add(&mut self, time: NaiveTime, cost: Decimal) -> Result<(), RangeError> {
        let overflow = || RangeError::Overflow("recording a cost");
        let total = self.total.checked_add(cost).ok_or_else(overflow)?;
        let entry = self
            .entries
            .get(&time)
            .copied()
            .unwrap_or(Decimal::ZERO)
            .checked_add(cost)
            .ok_or_else(overflow)?;
        self.entries.insert(time, entry);
        self.total = total;
        Ok(())
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn entries(&self) -> &BTreeMap<NaiveTime, Decimal> {
        &self.entries
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPlan {
    pub budget: DailyBudgetRecord,
    pub cost: DailyCostRecord,
}

impl DayPlan {
    pub fn new(time: NaiveTime, ceiling: Decimal) -> Self {
        Self {
            budget: DailyBudgetRecord::new(time, ceiling),
            cost: DailyCostRecord::default(),
        }
    }

    pub fn carried_forward(ceiling: Decimal) -> Self {
        Self {
            budget: DailyBudgetRecord::carried_forward(ceiling),
            cost: DailyCostRecord::default(),
        }
    }
}
