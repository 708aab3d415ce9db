use crate::calculations::assign_start_offsets;
use crate::calendar::{WorkCalendar, WorkCalendarConfig};
use crate::error::{PlanError, PlanResult};
use crate::schedule::{Schedule, ScheduledTask};
use crate::source::{PlanDocument, load_plan_document};
use crate::task::Task;
use crate::task_validation::validate_task_collection;
use crate::vacation::VacationCalendar;
use chrono::NaiveDate;
use std::path::Path;
use tracing::info;

/// A validated plan: tasks in declaration order, the project start and the
/// calendar the tasks are walked on.
#[derive(Debug, Clone)]
pub struct Plan {
    project_start: NaiveDate,
    tasks: Vec<Task>,
    calendar: WorkCalendar,
}

impl Plan {
    pub fn new(
        project_start: NaiveDate,
        tasks: Vec<Task>,
        calendar: WorkCalendar,
    ) -> PlanResult<Self> {
        validate_task_collection(&tasks)?;
        Ok(Self {
            project_start,
            tasks,
            calendar,
        })
    }

    pub fn from_document(document: PlanDocument) -> PlanResult<Self> {
        Self::from_document_with_config(document, &WorkCalendarConfig::default())
    }

    pub fn from_document_with_config(
        document: PlanDocument,
        config: &WorkCalendarConfig,
    ) -> PlanResult<Self> {
        let project_start = document.project_start.ok_or(PlanError::MissingStartDate)?;
        let vacations = VacationCalendar::from_ranges(&document.vacations);
        let calendar = WorkCalendar::from_config(config, vacations)?;
        Self::new(project_start, document.tasks, calendar)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> PlanResult<Self> {
        Self::from_document(load_plan_document(path)?)
    }

    pub fn load_with_config<P: AsRef<Path>>(
        path: P,
        config: &WorkCalendarConfig,
    ) -> PlanResult<Self> {
        Self::from_document_with_config(load_plan_document(path)?, config)
    }

    pub fn project_start(&self) -> NaiveDate {
        self.project_start
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn calendar(&self) -> &WorkCalendar {
        &self.calendar
    }

    /// Assign offsets and project every task onto the calendar.
    ///
    /// Works on a copy of the tasks, so calling it twice yields the same schedule.
    pub fn schedule(&self) -> Schedule {
        let mut tasks = self.tasks.clone();
        let offsets = assign_start_offsets(&mut tasks);

        let rows: Vec<ScheduledTask> = tasks
            .iter()
            .zip(offsets)
            .map(|(task, offset)| {
                ScheduledTask::project(task, offset, &self.calendar, self.project_start)
            })
            .collect();

        info!(
            project_start = %self.project_start,
            tasks = rows.len(),
            "plan scheduled"
        );
        Schedule::new(self.project_start, self.calendar.to_config(), rows)
    }
}
