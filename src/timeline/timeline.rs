use std::{collections::BTreeMap, str::FromStr};

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::ParseError;

use super::{input::BudgetInput, span::DateSpan};

/// Format of timestamp keys in timeline input.
pub const DATETIME_FORMAT: &str = "%m.%d.%Y %H:%M:%S";
/// Format of dates rendered in summaries.
pub const DATE_FORMAT: &str = "%m.%d.%Y";
/// Largest accepted ceiling, in whole units. Products with the daily factor and
/// monthly sums of ceilings up to this value stay representable.
pub const MAX_CEILING: i64 = 1_000_000_000_000_000;

/// A budget ceiling that takes effect at `timestamp` and holds until superseded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetEvent {
    pub timestamp: NaiveDateTime,
    pub ceiling: Decimal,
}

/// Sparse set of budget-change events keyed by timestamp.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetTimeline {
    events: BTreeMap<NaiveDateTime, Decimal>,
}

impl BudgetTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `(timestamp, ceiling)` string pairs. The first malformed pair aborts
    /// the whole build; repeated timestamps keep the last value.
    pub fn from_events<I, K, V>(events: I) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut timeline = Self::new();
        for (key, value) in events {
            let timestamp = parse_timestamp(key.as_ref())?;
            let ceiling = parse_ceiling(key.as_ref(), value.as_ref())?;
            timeline.events.insert(timestamp, ceiling);
        }
        debug!(events = timeline.events.len(), "budget timeline parsed");
        Ok(timeline)
    }

    pub fn from_input(input: &BudgetInput) -> Result<Self, ParseError> {
        Self::from_events(
            input
                .iter()
                .map(|(key, raw)| (key.as_str(), raw.as_text())),
        )
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events in ascending timestamp order.
    pub fn events(&self) -> impl Iterator<Item = BudgetEvent> + '_ {
        self.events
            .iter()
            .map(|(timestamp, ceiling)| BudgetEvent {
                timestamp: *timestamp,
                ceiling: *ceiling,
            })
    }

    pub fn first(&self) -> Option<BudgetEvent> {
        self.events().next()
    }

    pub fn last(&self) -> Option<BudgetEvent> {
        self.events
            .iter()
            .next_back()
            .map(|(timestamp, ceiling)| BudgetEvent {
                timestamp: *timestamp,
                ceiling: *ceiling,
            })
    }

    pub fn ceiling_at(&self, timestamp: NaiveDateTime) -> Option<Decimal> {
        self.events.get(&timestamp).copied()
    }

    /// Every calendar date from the first to the last event date, inclusive.
    pub fn date_span(&self) -> DateSpan {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) => {
                DateSpan::new(first.timestamp.date(), last.timestamp.date())
            }
            _ => DateSpan::empty(),
        }
    }

    pub fn events_on_date(&self, date: NaiveDate) -> BTreeMap<NaiveDateTime, Decimal> {
        let start = date.and_time(NaiveTime::MIN);
        let end = start + Duration::days(1);
        self.events
            .range(start..end)
            .map(|(timestamp, ceiling)| (*timestamp, *ceiling))
            .collect()
    }
}

pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, ParseError> {
    NaiveDateTime::parse_from_str(value.trim(), DATETIME_FORMAT).map_err(|_| {
        ParseError::InvalidTimestamp {
            value: value.to_string(),
        }
    })
}

fn parse_ceiling(timestamp: &str, value: &str) -> Result<Decimal, ParseError> {
    let trimmed = value.trim();
    let ceiling = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| ParseError::InvalidCeiling {
            timestamp: timestamp.to_string(),
            value: value.to_string(),
        })?;
    if ceiling.is_sign_negative() && !ceiling.is_zero() {
        return Err(ParseError::NegativeCeiling {
            timestamp: timestamp.to_string(),
            value: value.to_string(),
        });
    }
    if ceiling > Decimal::from(MAX_CEILING) {
        return Err(ParseError::CeilingTooLarge {
            timestamp: timestamp.to_string(),
            value: value.to_string(),
        });
    }
    Ok(ceiling)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn basic_events() -> Vec<(&'static str, &'static str)> {
        vec![
            ("01.01.2019 00:00:00", "07.00"),
            ("01.04.2019 00:00:00", "00.00"),
            ("01.07.2019 00:00:00", "100.50"),
        ]
    }

    #[test]
    fn parses_every_event() {
        let timeline = BudgetTimeline::from_events(basic_events()).unwrap();
        assert_eq!(timeline.len(), 3);
        let ceilings: Vec<_> = timeline.events().map(|event| event.ceiling).collect();
        assert!(ceilings.contains(&dec!(7)));
        assert!(ceilings.contains(&dec!(100.5)));
        assert!(ceilings.contains(&Decimal::ZERO));
    }

    #[test]
    fn keeps_input_scale() {
        let timeline = BudgetTimeline::from_events(basic_events()).unwrap();
        let first = timeline.first().unwrap();
        assert_eq!(first.ceiling.to_string(), "7.00");
    }

    #[test]
    fn date_span_covers_every_day() {
        let timeline = BudgetTimeline::from_events([
            ("01.01.2020 00:00:00", "0"),
            ("01.31.2020 00:00:00", "0"),
        ])
        .unwrap();
        assert_eq!(timeline.date_span().len(), 31);
        // recomputed on every call
        assert_eq!(timeline.date_span().count(), 31);
    }

    #[test]
    fn empty_timeline_has_empty_span() {
        let timeline = BudgetTimeline::new();
        assert!(timeline.is_empty());
        assert_eq!(timeline.date_span().count(), 0);
    }

    #[test]
    fn filters_events_by_date() {
        let timeline = BudgetTimeline::from_events([
            ("01.01.2020 00:00:00", "0"),
            ("01.01.2020 00:30:00", "0"),
            ("01.01.2020 06:00:00", "0"),
            ("01.15.2020 12:00:00", "0"),
            ("01.15.2020 06:30:00", "0"),
            ("01.31.2020 00:00:00", "0"),
        ])
        .unwrap();
        assert_eq!(timeline.events_on_date(date(2020, 1, 1)).len(), 3);
        assert_eq!(timeline.events_on_date(date(2020, 1, 15)).len(), 2);
        assert_eq!(timeline.events_on_date(date(2020, 1, 31)).len(), 1);
        assert!(timeline.events_on_date(date(2020, 1, 2)).is_empty());
    }

    #[test]
    fn rejects_malformed_timestamp() {
        let err = BudgetTimeline::from_events([("2019-01-01 00:00:00", "1")]).unwrap_err();
        assert!(matches!(err, ParseError::InvalidTimestamp { .. }));
    }

    #[test]
    fn rejects_non_numeric_ceiling() {
        let err = BudgetTimeline::from_events([("01.01.2019 00:00:00", "seven")]).unwrap_err();
        assert!(matches!(err, ParseError::InvalidCeiling { .. }));
    }

    #[test]
    fn rejects_negative_ceiling() {
        let err = BudgetTimeline::from_events([("01.01.2019 00:00:00", "-1.00")]).unwrap_err();
        assert!(matches!(err, ParseError::NegativeCeiling { .. }));
    }

    #[test]
    fn rejects_ceiling_beyond_supported_maximum() {
        for value in [
            "79228162514264337593543950335",
            "50000000000000000000000000000",
            "1000000000000000.01",
        ] {
            let err = BudgetTimeline::from_events([("01.01.2019 00:00:00", value)]).unwrap_err();
            assert!(matches!(err, ParseError::CeilingTooLarge { .. }), "{value}");
        }
        let timeline =
            BudgetTimeline::from_events([("01.01.2019 00:00:00", "1000000000000000")]).unwrap();
        assert_eq!(timeline.first().unwrap().ceiling, Decimal::from(MAX_CEILING));
    }

    #[test]
    fn duplicate_keys_keep_last_value() {
        let timeline = BudgetTimeline::from_events([
            ("01.01.2019 00:00:00", "1"),
            ("01.01.2019 00:00:00", "2"),
        ])
        .unwrap();
        assert_eq!(timeline.len(), 1);
        let at = parse_timestamp("01.01.2019 00:00:00").unwrap();
        assert_eq!(timeline.ceiling_at(at), Some(dec!(2)));
    }
}
