use chrono::{Duration, NaiveDate};

/// Every calendar date from `start` to `end`, inclusive.
///
/// Each [`super::BudgetTimeline::date_span`] call yields a fresh span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateSpan {
    next: Option<NaiveDate>,
    end: NaiveDate,
}

impl DateSpan {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            next: (start <= end).then_some(start),
            end,
        }
    }

    pub fn empty() -> Self {
        Self {
            next: None,
            end: NaiveDate::MIN,
        }
    }

    pub fn remaining(&self) -> usize {
        match self.next {
            Some(next) => ((self.end - next).num_days() + 1) as usize,
            None => 0,
        }
    }
}

impl Iterator for DateSpan {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let current = self.next?;
        self.next = if current < self.end {
            Some(current + Duration::days(1))
        } else {
            None
        };
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DateSpan {}
