#![allow(dead_code)]

use budget_plan::timeline::BudgetTimeline;
use chrono::{NaiveDate, NaiveDateTime};

pub const BASIC_INPUT: &str = r#"{
    "01.01.2019 00:00:00": "07.00",
    "01.04.2019 00:00:00": "00.00",
    "01.07.2019 00:00:00": "100.50"
}"#;

pub fn basic_timeline() -> BudgetTimeline {
    BudgetTimeline::from_events([
        ("01.01.2019 00:00:00", "07.00"),
        ("01.04.2019 00:00:00", "00.00"),
        ("01.07.2019 00:00:00", "100.50"),
    ])
    .expect("basic timeline parses")
}

pub fn complex_timeline() -> BudgetTimeline {
    BudgetTimeline::from_events([
        ("01.01.2019 00:00:00", "07.00"),
        ("01.01.2019 00:30:00", "0"),
        ("01.01.2019 16:00:00", "1.35"),
        ("01.01.2019 22:00:00", "06.00"),
        ("01.05.2019 12:00:00", "2"),
        ("01.06.2019 06:30:00", "0"),
        ("01.09.2019 00:00:00", "100.50"),
    ])
    .expect("complex timeline parses")
}

/// Spans a year boundary with a ceiling change in each month.
pub fn multi_month_timeline() -> BudgetTimeline {
    BudgetTimeline::from_events([
        ("12.20.2019 09:00:00", "15"),
        ("01.03.2020 00:00:00", "20.25"),
        ("01.03.2020 18:00:00", "4"),
        ("02.10.2020 12:00:00", "0"),
        ("03.01.2020 00:00:00", "8.80"),
    ])
    .expect("multi-month timeline parses")
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(h, min, 0).unwrap()
}
