use crate::error::{PlanError, PlanResult};
use crate::vacation::VacationCalendar;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Decides which days count as working days for a given assignee.
///
/// A day is skipped when it falls on a non-working weekday (Saturday and Sunday by
/// default) or when it is one of the assignee's vacation days.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkCalendar {
    non_working_days: HashSet<Weekday>,
    vacations: VacationCalendar,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkCalendarConfig {
    working_days: Vec<Weekday>,
}

impl Default for WorkCalendar {
    fn default() -> Self {
        Self::new(VacationCalendar::new())
    }
}

impl WorkCalendar {
    const ALL_WEEKDAYS: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    /// Monday to Friday calendar with the given vacations.
    pub fn new(vacations: VacationCalendar) -> Self {
        Self {
            non_working_days: HashSet::from([Weekday::Sat, Weekday::Sun]),
            vacations,
        }
    }

    /// Fails when the config has no working weekday; walking such a calendar
    /// would never terminate.
    pub fn from_config(
        config: &WorkCalendarConfig,
        vacations: VacationCalendar,
    ) -> PlanResult<Self> {
        let working_set: HashSet<Weekday> = config.working_days.iter().copied().collect();
        if working_set.is_empty() {
            return Err(PlanError::NoWorkingDays);
        }
        let non_working_days = Self::ALL_WEEKDAYS
            .into_iter()
            .filter(|day| !working_set.contains(day))
            .collect();
        Ok(Self {
            non_working_days,
            vacations,
        })
    }

    pub fn to_config(&self) -> WorkCalendarConfig {
        WorkCalendarConfig::from(self)
    }

    pub fn vacations(&self) -> &VacationCalendar {
        &self.vacations
    }

    pub fn is_weekend(&self, date: NaiveDate) -> bool {
        self.non_working_days.contains(&date.weekday())
    }

    pub fn is_skipped(&self, assignee: &str, date: NaiveDate) -> bool {
        self.is_weekend(date) || self.vacations.is_on_vacation(assignee, date)
    }

    pub fn is_working_day(&self, assignee: &str, date: NaiveDate) -> bool {
        !self.is_skipped(assignee, date)
    }

    /// Stay on `date` if it is a working day, otherwise move forward until one is
    /// found. Both skip reasons are re-checked after every single-day step, so a
    /// vacation that starts on the Monday after a weekend is skipped too.
    ///
    /// The walk stops at `NaiveDate::MAX`.
    pub fn skip_to_working_day(&self, assignee: &str, date: NaiveDate) -> NaiveDate {
        let mut current = date;
        while self.is_skipped(assignee, current) {
            match current.succ_opt() {
                Some(next) => current = next,
                None => break,
            }
        }
        current
    }

    /// First working day strictly after `date`, or `date` itself when it is
    /// already the last representable day.
    pub fn next_working_day(&self, assignee: &str, date: NaiveDate) -> NaiveDate {
        date.succ_opt()
            .map_or(date, |next| self.skip_to_working_day(assignee, next))
    }

    /// Count the assignee's working days in an inclusive range.
    pub fn count_working_days(&self, assignee: &str, start: NaiveDate, end: NaiveDate) -> i64 {
        let mut count = 0;
        let mut current = start;

        while current <= end {
            if self.is_working_day(assignee, current) {
                count += 1;
            }
            match current.succ_opt() {
                Some(next) => current = next,
                None => break,
            }
        }
        count
    }
}

impl WorkCalendarConfig {
    pub fn new<I>(working_days: I) -> PlanResult<Self>
    where
        I: IntoIterator<Item = Weekday>,
    {
        let mut working: Vec<Weekday> = working_days.into_iter().collect();
        if working.is_empty() {
            return Err(PlanError::NoWorkingDays);
        }
        working.sort_by_key(|wd| wd.num_days_from_monday());
        working.dedup_by(|a, b| a.num_days_from_monday() == b.num_days_from_monday());

        Ok(Self {
            working_days: working,
        })
    }

    pub fn working_days(&self) -> &[Weekday] {
        &self.working_days
    }
}

impl Default for WorkCalendarConfig {
    fn default() -> Self {
        WorkCalendarConfig::from(&WorkCalendar::default())
    }
}

impl From<&WorkCalendar> for WorkCalendarConfig {
    fn from(calendar: &WorkCalendar) -> Self {
        let working_days = WorkCalendar::ALL_WEEKDAYS
            .into_iter()
            .filter(|day| !calendar.non_working_days.contains(day))
            .collect();
        Self { working_days }
    }
}
