//! Raw budget-change entries, kept in memory and turned into timeline input on demand.

pub mod budget_ledger;

pub use budget_ledger::{input_from_json, BudgetEntry, BudgetLedger};
