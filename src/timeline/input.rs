use std::{borrow::Cow, collections::BTreeMap};

use serde::{Deserialize, Serialize};

/// Raw timeline input as received from the surrounding service layer:
/// timestamp string to budget ceiling.
pub type BudgetInput = BTreeMap<String, RawCeiling>;

/// A budget ceiling as it appears on the wire, either quoted or as a bare number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCeiling {
    Text(String),
    Number(serde_json::Number),
}

impl RawCeiling {
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            RawCeiling::Text(text) => Cow::Borrowed(text.as_str()),
            RawCeiling::Number(number) => Cow::Owned(number.to_string()),
        }
    }
}

impl From<&str> for RawCeiling {
    fn from(value: &str) -> Self {
        RawCeiling::Text(value.to_string())
    }
}

impl From<String> for RawCeiling {
    fn from(value: String) -> Self {
        RawCeiling::Text(value)
    }
}

impl From<i64> for RawCeiling {
    fn from(value: i64) -> Self {
        RawCeiling::Number(value.into())
    }
}
