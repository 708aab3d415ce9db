pub mod calculations;
pub mod calendar;
pub mod error;
pub mod plan;
pub mod report;
pub mod schedule;
pub mod source;
pub mod task;
pub(crate) mod task_validation;
pub mod vacation;

pub use calculations::{Boundary, assign_start_offsets, project_date};
pub use calendar::{WorkCalendar, WorkCalendarConfig};
pub use error::{PlanError, PlanResult};
pub use plan::Plan;
pub use report::{ReportFormat, TableLayout, render_table, write_report};
pub use schedule::{AssigneeSummary, Schedule, ScheduleSummary, ScheduledTask};
pub use source::{PlanDocument, PlanLine, classify_line, load_plan_document};
pub use task::Task;
pub use vacation::{VacationCalendar, VacationRange};
