use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// An inclusive run of days off for one assignee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacationRange {
    pub assignee: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl VacationRange {
    pub fn new(assignee: impl Into<String>, from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            assignee: assignee.into(),
            from,
            to,
        }
    }

    pub fn single_day(assignee: impl Into<String>, date: NaiveDate) -> Self {
        Self::new(assignee, date, date)
    }

    /// Every calendar day in the range, `from` and `to` included.
    /// An inverted range yields nothing.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let mut next = Some(self.from);
        std::iter::from_fn(move || {
            let day = next.filter(|day| *day <= self.to)?;
            next = day.succ_opt();
            Some(day)
        })
    }
}

/// Vacation days keyed by assignee, expanded from ranges at load time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VacationCalendar {
    days_off: HashMap<String, HashSet<NaiveDate>>,
}

impl VacationCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ranges<'a, I>(ranges: I) -> Self
    where
        I: IntoIterator<Item = &'a VacationRange>,
    {
        let mut calendar = Self::new();
        for range in ranges {
            calendar.add_range(range);
        }
        calendar
    }

    pub fn add_range(&mut self, range: &VacationRange) {
        if range.to < range.from {
            warn!(
                assignee = %range.assignee,
                from = %range.from,
                to = %range.to,
                "vacation range ends before it starts; ignoring"
            );
        }
        self.days_off
            .entry(range.assignee.clone())
            .or_default()
            .extend(range.days());
    }

    /// Unknown assignees have no vacation.
    pub fn is_on_vacation(&self, assignee: &str, date: NaiveDate) -> bool {
        self.days_off
            .get(assignee)
            .is_some_and(|days| days.contains(&date))
    }

    pub fn is_empty(&self) -> bool {
        self.days_off.values().all(HashSet::is_empty)
    }
}
