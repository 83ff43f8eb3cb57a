use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{plan::DayPlan, timeline::DATE_FORMAT, utils::money::quantize};

/// One row of a simulation report, shaped for the service boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySummary {
    pub date: String,
    pub budget: String,
    pub costs: String,
}

impl DaySummary {
    pub fn from_day(date: NaiveDate, day: &DayPlan, precision: u32) -> Self {
        Self {
            date: date.format(DATE_FORMAT).to_string(),
            budget: day.budget.maximum().to_string(),
            costs: quantize(day.cost.total(), precision).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use rust_decimal_macros::dec;

    #[test]
    fn renders_boundary_strings() {
        let mut day = DayPlan::carried_forward(dec!(7.00));
        day.cost
            .add(NaiveTime::from_hms_opt(9, 0, 0).unwrap(), dec!(1.5))
            .unwrap();
        let row = DaySummary::from_day(NaiveDate::from_ymd_opt(2019, 1, 2).unwrap(), &day, 2);
        assert_eq!(row.date, "01.02.2019");
        assert_eq!(row.budget, "7.00");
        assert_eq!(row.costs, "1.50");
    }

    #[test]
    fn untouched_day_reports_zero_costs() {
        let day = DayPlan::carried_forward(dec!(0));
        let row = DaySummary::from_day(NaiveDate::from_ymd_opt(2019, 1, 5).unwrap(), &day, 2);
        assert_eq!(row.costs, "0.00");
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["date"], "01.05.2019");
    }
}
