use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::{
    errors::{BudgetError, ParseError},
    timeline::{parse_timestamp, BudgetInput, BudgetTimeline, RawCeiling},
};

/// A raw budget-change entry as entered by a user, not yet validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetEntry {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub datetime: String,
    pub budget: RawCeiling,
}

impl BudgetEntry {
    pub fn new(datetime: impl Into<String>, budget: impl Into<RawCeiling>) -> Self {
        Self {
            id: Uuid::new_v4(),
            datetime: datetime.into(),
            budget: budget.into(),
        }
    }

    fn parsed_datetime(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.datetime).ok()
    }
}

/// In-memory store of budget-change entries. Nothing here is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetLedger {
    #[serde(default)]
    entries: Vec<BudgetEntry>,
    pub updated_at: DateTime<Utc>,
}

impl Default for BudgetLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl BudgetLedger {
    pub fn new() -> Self {
        Self::from_entries(Vec::new())
    }

    pub fn from_entries(entries: Vec<BudgetEntry>) -> Self {
        Self {
            entries,
            updated_at: Utc::now(),
        }
    }

    pub fn add(&mut self, datetime: impl Into<String>, budget: impl Into<RawCeiling>) -> Uuid {
        let entry = BudgetEntry::new(datetime, budget);
        let id = entry.id;
        self.entries.push(entry);
        self.touch();
        id
    }

    /// Drops the entry and re-adds the new values under a fresh id.
    pub fn replace(
        &mut self,
        id: Uuid,
        datetime: impl Into<String>,
        budget: impl Into<RawCeiling>,
    ) -> Option<Uuid> {
        if !self.remove(id) {
            return None;
        }
        Some(self.add(datetime, budget))
    }

    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        let removed = self.entries.len() != before;
        if removed {
            self.touch();
        } else {
            debug!(%id, "budget entry not found");
        }
        removed
    }

    pub fn get(&self, id: Uuid) -> Option<&BudgetEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries ordered by timestamp; entries whose timestamp does not parse come last.
    pub fn entries_sorted(&self) -> Vec<&BudgetEntry> {
        let mut sorted: Vec<&BudgetEntry> = self.entries.iter().collect();
        sorted.sort_by_cached_key(|entry| {
            let parsed = entry.parsed_datetime();
            (parsed.is_none(), parsed, entry.datetime.clone())
        });
        sorted
    }

    /// Timeline input keyed by timestamp string. Later entries win on duplicates.
    pub fn to_input(&self) -> BudgetInput {
        self.entries
            .iter()
            .map(|entry| (entry.datetime.clone(), entry.budget.clone()))
            .collect()
    }

    pub fn timeline(&self) -> Result<BudgetTimeline, ParseError> {
        BudgetTimeline::from_input(&self.to_input())
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum InputDocument {
    Mapping(BudgetInput),
    Entries(Vec<BudgetEntry>),
}

/// Reads timeline input from JSON: either a timestamp-to-ceiling object or a
/// list of `{datetime, budget}` entries.
pub fn input_from_json(json: &str) -> Result<BudgetInput, BudgetError> {
    match serde_json::from_str::<InputDocument>(json)? {
        InputDocument::Mapping(input) => Ok(input),
        InputDocument::Entries(entries) => Ok(BudgetLedger::from_entries(entries).to_input()),
    }
}
