use crate::calendar::WorkCalendar;
use chrono::NaiveDate;

const EPSILON: f64 = 1e-9;

/// Which edge of a task an offset is being projected for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    Start,
    End,
}

/// Number of working-day advances from the project start for a man-day offset.
///
/// A fractional offset lands inside a working day, so it rounds down. An integral
/// offset is the first moment of a day: a start lands on that day, an end belongs
/// to the day before it.
pub fn working_day_advances(offset: f64, boundary: Boundary) -> u64 {
    let rounded = offset.round();
    if (offset - rounded).abs() <= EPSILON {
        let whole = rounded.max(0.0) as u64;
        match boundary {
            Boundary::Start => whole,
            Boundary::End => whole.saturating_sub(1),
        }
    } else {
        offset.floor().max(0.0) as u64
    }
}

/// Calendar date for `offset` man-days into `assignee`'s timeline.
///
/// Each advance steps one calendar day and then settles onto the assignee's next
/// working day. With zero advances the project start is returned as-is. A walk that
/// runs off the end of the calendar stops at `NaiveDate::MAX`.
pub fn project_date(
    calendar: &WorkCalendar,
    assignee: &str,
    project_start: NaiveDate,
    offset: f64,
    boundary: Boundary,
) -> NaiveDate {
    let mut current = project_start;
    for _ in 0..working_day_advances(offset, boundary) {
        let Some(next) = current.succ_opt() else {
            break;
        };
        current = calendar.skip_to_working_day(assignee, next);
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_offsets_split_on_boundary() {
        assert_eq!(working_day_advances(0.0, Boundary::Start), 0);
        assert_eq!(working_day_advances(0.0, Boundary::End), 0);
        assert_eq!(working_day_advances(2.0, Boundary::Start), 2);
        assert_eq!(working_day_advances(2.0, Boundary::End), 1);
    }

    #[test]
    fn fractional_offsets_round_down_for_both_boundaries() {
        assert_eq!(working_day_advances(1.5, Boundary::Start), 1);
        assert_eq!(working_day_advances(1.5, Boundary::End), 1);
        assert_eq!(working_day_advances(0.5, Boundary::End), 0);
    }

    #[test]
    fn accumulated_float_drift_counts_as_integral() {
        let offset = 0.6 + 0.3 + 0.1;
        assert_ne!(offset, 1.0);
        assert_eq!(working_day_advances(offset, Boundary::Start), 1);
        assert_eq!(working_day_advances(offset, Boundary::End), 0);
    }
}
