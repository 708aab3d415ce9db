use crate::calculations::{Boundary, project_date};
use crate::calendar::{WorkCalendar, WorkCalendarConfig};
use crate::task::Task;
use chrono::{Duration, NaiveDate};
use polars::prelude::PlSmallStr;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// A task with its projected calendar dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledTask {
    pub name: String,
    pub assignee: String,
    pub effort: f64,
    pub start_offset: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub completion: u8,
}

impl ScheduledTask {
    /// Project `task` onto `calendar`, starting `start_offset` working days into
    /// the assignee's timeline.
    pub fn project(
        task: &Task,
        start_offset: f64,
        calendar: &WorkCalendar,
        project_start: NaiveDate,
    ) -> Self {
        let start_date = project_date(
            calendar,
            &task.assignee,
            project_start,
            start_offset,
            Boundary::Start,
        );
        let end_date = project_date(
            calendar,
            &task.assignee,
            project_start,
            start_offset + task.effort,
            Boundary::End,
        );

        Self {
            name: task.name.clone(),
            assignee: task.assignee.clone(),
            effort: task.effort,
            start_offset,
            start_date,
            end_date,
            completion: task.completion,
        }
    }

    pub fn completed_man_days(&self) -> f64 {
        self.effort * f64::from(self.completion) / 100.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub total_man_days: f64,
    pub completed_man_days: f64,
    /// `completed / total`, or 0 when there is no work at all.
    pub completion_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssigneeSummary {
    pub assignee: String,
    pub tasks: usize,
    pub man_days: f64,
    pub completed_man_days: f64,
    pub first_start: NaiveDate,
    pub last_end: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    project_start: NaiveDate,
    calendar: WorkCalendarConfig,
    rows: Vec<ScheduledTask>,
}

impl Schedule {
    pub fn new(
        project_start: NaiveDate,
        calendar: WorkCalendarConfig,
        rows: Vec<ScheduledTask>,
    ) -> Self {
        Self {
            project_start,
            calendar,
            rows,
        }
    }

    pub fn project_start(&self) -> NaiveDate {
        self.project_start
    }

    pub fn calendar_config(&self) -> &WorkCalendarConfig {
        &self.calendar
    }

    pub fn rows(&self) -> &[ScheduledTask] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Only the rows owned by `assignee`; an unknown assignee gives an empty schedule.
    pub fn filtered(&self, assignee: &str) -> Self {
        let rows = self
            .rows
            .iter()
            .filter(|row| row.assignee == assignee)
            .cloned()
            .collect();
        Self::new(self.project_start, self.calendar.clone(), rows)
    }

    pub fn summary(&self) -> ScheduleSummary {
        let total_man_days: f64 = self.rows.iter().map(|row| row.effort).sum();
        let completed_man_days: f64 = self.rows.iter().map(ScheduledTask::completed_man_days).sum();
        let completion_ratio = if total_man_days > 0.0 {
            completed_man_days / total_man_days
        } else {
            0.0
        };

        ScheduleSummary {
            total_man_days,
            completed_man_days,
            completion_ratio,
        }
    }

    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let names: Vec<&str> = self.rows.iter().map(|row| row.name.as_str()).collect();
        let assignees: Vec<&str> = self.rows.iter().map(|row| row.assignee.as_str()).collect();
        let efforts: Vec<f64> = self.rows.iter().map(|row| row.effort).collect();
        let offsets: Vec<f64> = self.rows.iter().map(|row| row.start_offset).collect();
        let starts: Vec<i32> = self.rows.iter().map(|row| date_to_i32(row.start_date)).collect();
        let ends: Vec<i32> = self.rows.iter().map(|row| date_to_i32(row.end_date)).collect();
        let completion: Vec<i32> = self.rows.iter().map(|row| i32::from(row.completion)).collect();
        let completed: Vec<f64> = self
            .rows
            .iter()
            .map(ScheduledTask::completed_man_days)
            .collect();

        let columns: Vec<Column> = vec![
            Series::new(PlSmallStr::from_static("name"), names).into_column(),
            Series::new(PlSmallStr::from_static("assignee"), assignees).into_column(),
            Series::new(PlSmallStr::from_static("effort"), efforts).into_column(),
            Series::new(PlSmallStr::from_static("start_offset"), offsets).into_column(),
            Series::new(PlSmallStr::from_static("start_date"), starts)
                .cast(&DataType::Date)?
                .into_column(),
            Series::new(PlSmallStr::from_static("end_date"), ends)
                .cast(&DataType::Date)?
                .into_column(),
            Series::new(PlSmallStr::from_static("completion"), completion).into_column(),
            Series::new(PlSmallStr::from_static("completed_man_days"), completed).into_column(),
        ];

        DataFrame::new(columns)
    }

    /// Per-assignee totals, in the order assignees first appear in the plan.
    pub fn assignee_summaries(&self) -> PolarsResult<Vec<AssigneeSummary>> {
        let grouped = self
            .to_dataframe()?
            .lazy()
            .group_by_stable([col("assignee")])
            .agg([
                col("name").count().cast(DataType::Int64).alias("tasks"),
                col("effort").sum().alias("man_days"),
                col("completed_man_days").sum().alias("completed_man_days"),
                col("start_date").min().alias("first_start"),
                col("end_date").max().alias("last_end"),
            ])
            .collect()?;

        let assignees = grouped.column("assignee")?.str()?;
        let tasks = grouped.column("tasks")?.i64()?;
        let man_days = grouped.column("man_days")?.f64()?;
        let completed = grouped.column("completed_man_days")?.f64()?;
        let first_start = grouped.column("first_start")?.date()?;
        let last_end = grouped.column("last_end")?.date()?;

        let mut summaries = Vec::with_capacity(grouped.height());
        for idx in 0..grouped.height() {
            let missing = |column: &str| {
                PolarsError::ComputeError(format!("assignee summary row missing {column}").into())
            };
            summaries.push(AssigneeSummary {
                assignee: assignees.get(idx).ok_or_else(|| missing("assignee"))?.to_string(),
                tasks: tasks.get(idx).unwrap_or(0) as usize,
                man_days: man_days.get(idx).unwrap_or(0.0),
                completed_man_days: completed.get(idx).unwrap_or(0.0),
                first_start: first_start
                    .get(idx)
                    .map(date_from_i32)
                    .ok_or_else(|| missing("first_start"))?,
                last_end: last_end
                    .get(idx)
                    .map(date_from_i32)
                    .ok_or_else(|| missing("last_end"))?,
            });
        }
        Ok(summaries)
    }
}

fn date_to_i32(date: NaiveDate) -> i32 {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default();
    (date - epoch).num_days() as i32
}

fn date_from_i32(days: i32) -> NaiveDate {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default();
    epoch + Duration::days(i64::from(days))
}
