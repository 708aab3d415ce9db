use crate::calendar::WorkCalendarConfig;
use crate::error::{PlanError, PlanResult};
use crate::schedule::{AssigneeSummary, Schedule, ScheduleSummary, ScheduledTask};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::io::Write;
use std::str::FromStr;

const OWNER_LEN: usize = 6;
const MAN_DAYS_LEN: usize = 8;
const DATE_LEN: usize = 10;
const DONE_LEN: usize = 4;

const HEADERS: [&str; 6] = ["Task", "Owner", "Man-days", "Start", "End", "Done"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ReportFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl ReportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFormat::Table => "table",
            ReportFormat::Json => "json",
            ReportFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(ReportFormat::Table),
            "json" => Ok(ReportFormat::Json),
            "csv" => Ok(ReportFormat::Csv),
            other => Err(format!("unknown report format '{other}'")),
        }
    }
}

/// Terminal columns taken by `ch`: anything past Latin-1 is drawn double width.
fn char_width(ch: char) -> usize {
    if (ch as u32) < 256 { 1 } else { 2 }
}

pub fn display_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

/// Right-pad `s` with spaces up to `width` display columns. Never truncates.
pub fn pad_to_width(s: &str, width: usize) -> String {
    let mut out = s.to_string();
    out.push_str(&" ".repeat(width.saturating_sub(display_width(s))));
    out
}

/// `2` renders as `2.0`, `1.5` as `1.5`.
pub fn format_man_days(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

fn table_line(cells: [&str; 6], task_width: usize) -> String {
    let widths = [task_width, OWNER_LEN, MAN_DAYS_LEN, DATE_LEN, DATE_LEN, DONE_LEN];
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| pad_to_width(cell, width))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Column sizing shared by every table rendered from one plan.
///
/// Built from the full schedule before filtering, so a filtered table keeps
/// the same task column as the unfiltered one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLayout {
    task_width: usize,
}

impl TableLayout {
    /// The task column is as wide as the widest name, or the header.
    pub fn for_schedule(schedule: &Schedule) -> Self {
        let task_width = schedule
            .rows()
            .iter()
            .map(|row| display_width(&row.name))
            .chain(std::iter::once(display_width(HEADERS[0])))
            .max()
            .unwrap_or_default();
        Self { task_width }
    }

    pub fn task_width(&self) -> usize {
        self.task_width
    }
}

pub fn summary_line(summary: &ScheduleSummary) -> String {
    format!(
        ">>> Total man-days: {}, completed man-days: {}, completion: {:.2}%",
        format_man_days(summary.total_man_days),
        format_man_days(summary.completed_man_days),
        summary.completion_ratio * 100.0
    )
}

pub fn render_table(schedule: &Schedule) -> String {
    render_table_with_layout(schedule, &TableLayout::for_schedule(schedule))
}

/// Render with a layout computed elsewhere. Names wider than the layout's
/// task column are never truncated.
pub fn render_table_with_layout(schedule: &Schedule, layout: &TableLayout) -> String {
    let rows = schedule.rows();
    let task_width = layout.task_width;

    let mut out = String::new();
    out.push_str(&table_line(HEADERS, task_width));
    out.push('\n');

    let dashes = [task_width, OWNER_LEN, MAN_DAYS_LEN, DATE_LEN, DATE_LEN, DONE_LEN]
        .map(|width| "-".repeat(width));
    out.push_str(&table_line(dashes.each_ref().map(String::as_str), task_width));
    out.push('\n');

    for row in rows {
        let effort = format_man_days(row.effort);
        let start = row.start_date.to_string();
        let end = row.end_date.to_string();
        let done = format!("{}%", row.completion);
        out.push_str(&table_line(
            [
                row.name.as_str(),
                row.assignee.as_str(),
                effort.as_str(),
                start.as_str(),
                end.as_str(),
                done.as_str(),
            ],
            task_width,
        ));
        out.push('\n');
    }

    out.push('\n');
    out.push_str(&summary_line(&schedule.summary()));
    out.push('\n');
    out
}

pub fn render_assignee_summaries(summaries: &[AssigneeSummary]) -> String {
    let owner_width = summaries
        .iter()
        .map(|s| display_width(&s.assignee))
        .chain(std::iter::once(OWNER_LEN))
        .max()
        .unwrap_or(OWNER_LEN);

    let mut out = String::new();
    for summary in summaries {
        out.push_str(&format!(
            "{} | {} tasks | {} man-days | {} done | {} .. {}\n",
            pad_to_width(&summary.assignee, owner_width),
            summary.tasks,
            format_man_days(summary.man_days),
            format_man_days(summary.completed_man_days),
            summary.first_start,
            summary.last_end,
        ));
    }
    out
}

#[derive(Serialize)]
struct ScheduleSnapshot<'a> {
    project_start: NaiveDate,
    calendar: &'a WorkCalendarConfig,
    tasks: &'a [ScheduledTask],
    summary: ScheduleSummary,
}

impl<'a> ScheduleSnapshot<'a> {
    fn from_schedule(schedule: &'a Schedule) -> Self {
        Self {
            project_start: schedule.project_start(),
            calendar: schedule.calendar_config(),
            tasks: schedule.rows(),
            summary: schedule.summary(),
        }
    }
}

pub fn write_json<W: Write>(schedule: &Schedule, writer: W) -> PlanResult<()> {
    serde_json::to_writer_pretty(writer, &ScheduleSnapshot::from_schedule(schedule))?;
    Ok(())
}

#[derive(Serialize)]
struct TaskCsvRecord<'a> {
    name: &'a str,
    assignee: &'a str,
    effort: f64,
    start_date: String,
    end_date: String,
    completion: u8,
}

impl<'a> From<&'a ScheduledTask> for TaskCsvRecord<'a> {
    fn from(row: &'a ScheduledTask) -> Self {
        Self {
            name: &row.name,
            assignee: &row.assignee,
            effort: row.effort,
            start_date: row.start_date.to_string(),
            end_date: row.end_date.to_string(),
            completion: row.completion,
        }
    }
}

const CSV_HEADERS: [&str; 6] = [
    "name",
    "assignee",
    "effort",
    "start_date",
    "end_date",
    "completion",
];

/// The header row is written even when the schedule has no rows.
pub fn write_csv<W: Write>(schedule: &Schedule, writer: W) -> PlanResult<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(CSV_HEADERS)?;
    for row in schedule.rows() {
        csv_writer.serialize(TaskCsvRecord::from(row))?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_report<W: Write>(
    schedule: &Schedule,
    format: ReportFormat,
    writer: W,
) -> PlanResult<()> {
    write_report_with_layout(schedule, format, &TableLayout::for_schedule(schedule), writer)
}

/// Like [`write_report`], but the table uses `layout` instead of sizing its
/// columns from `schedule`. JSON and CSV ignore the layout.
pub fn write_report_with_layout<W: Write>(
    schedule: &Schedule,
    format: ReportFormat,
    layout: &TableLayout,
    mut writer: W,
) -> PlanResult<()> {
    match format {
        ReportFormat::Table => writer
            .write_all(render_table_with_layout(schedule, layout).as_bytes())
            .map_err(PlanError::from),
        ReportFormat::Json => {
            write_json(schedule, &mut writer)?;
            writeln!(writer)?;
            Ok(())
        }
        ReportFormat::Csv => write_csv(schedule, writer),
    }
}
