//! Plan file reader.
//!
//! A plan is free-form text (usually markdown). Only three kinds of lines carry
//! data; everything else is prose and is ignored:
//!
//! ```text
//! 项目开始时间: 2024-03-04
//! * Write parser -- 2 [bob]<50%>
//! * Review parser -- 1.5 [alice]
//! * alice -- 2024-03-06 - 2024-03-08
//! ```

use crate::error::{PlanError, PlanResult};
use crate::task::Task;
use crate::vacation::VacationRange;
use chrono::NaiveDate;
use regex::{Captures, Regex};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{info, warn};

static TASK_LINE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*(.+)--\s*([0-9]+\.?[0-9]?)\s*\[(.+)\](?:<([0-9]+)%>)?")
        .expect("Invalid task line regex pattern")
});

static VACATION_LINE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*(.+)--\s*([0-9]{4}-[0-9]{2}-[0-9]{2})(?:\s*-\s*([0-9]{4}-[0-9]{2}-[0-9]{2}))?")
        .expect("Invalid vacation line regex pattern")
});

static START_DATE_LINE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:项目开始时间|(?i:project start date))\s*[:：]\s*([0-9]{4}-[0-9]{2}-[0-9]{2})")
        .expect("Invalid start date regex pattern")
});

/// One classified line of a plan file.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanLine {
    Task(Task),
    Vacation(VacationRange),
    StartDate(NaiveDate),
    Unrecognized,
}

/// Everything extracted from a plan file, before validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanDocument {
    pub project_start: Option<NaiveDate>,
    pub tasks: Vec<Task>,
    pub vacations: Vec<VacationRange>,
}

/// Classify a single line. `line_no` is 1-based and only used in errors.
///
/// Task lines are tried first, then vacation lines, then the start date.
pub fn classify_line(line_no: usize, line: &str) -> PlanResult<PlanLine> {
    if let Some(caps) = TASK_LINE_PATTERN.captures(line) {
        return parse_task(line_no, &caps).map(PlanLine::Task);
    }

    if let Some(caps) = VACATION_LINE_PATTERN.captures(line) {
        let assignee = caps[1].trim();
        let from = parse_date(line_no, &caps[2])?;
        let to = match caps.get(3) {
            Some(end) => parse_date(line_no, end.as_str())?,
            None => from,
        };
        return Ok(PlanLine::Vacation(VacationRange::new(assignee, from, to)));
    }

    if let Some(caps) = START_DATE_LINE_PATTERN.captures(line) {
        return parse_date(line_no, &caps[1]).map(PlanLine::StartDate);
    }

    let trimmed = line.trim_start();
    if trimmed.starts_with('*') && trimmed.contains("--") {
        warn!(line = line_no, text = %line, "line looks like a plan entry but was not recognized");
    }
    Ok(PlanLine::Unrecognized)
}

fn parse_task(line_no: usize, caps: &Captures<'_>) -> PlanResult<Task> {
    let name = caps[1].trim();
    let effort: f64 = caps[2]
        .parse()
        .map_err(|_| PlanError::invalid_line(line_no, format!("invalid effort '{}'", &caps[2])))?;
    let assignee = caps[3].trim();

    let completion = match caps.get(4) {
        Some(pct) => {
            let value: u32 = pct.as_str().parse().map_err(|_| {
                PlanError::invalid_line(line_no, format!("invalid completion '{}%'", pct.as_str()))
            })?;
            u8::try_from(value).ok().filter(|v| *v <= 100).ok_or_else(|| {
                PlanError::invalid_line(
                    line_no,
                    format!("completion {value}% is outside 0..=100"),
                )
            })?
        }
        None => 0,
    };

    Ok(Task::new(name, effort, assignee).with_completion(completion))
}

fn parse_date(line_no: usize, value: &str) -> PlanResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|err| PlanError::invalid_line(line_no, format!("invalid date '{value}': {err}")))
}

impl PlanDocument {
    pub fn parse(text: &str) -> PlanResult<Self> {
        let mut document = Self::default();

        for (idx, line) in text.lines().enumerate() {
            match classify_line(idx + 1, line)? {
                PlanLine::Task(task) => document.tasks.push(task),
                PlanLine::Vacation(range) => document.vacations.push(range),
                PlanLine::StartDate(date) => document.project_start = Some(date),
                PlanLine::Unrecognized => {}
            }
        }

        Ok(document)
    }
}

pub fn load_plan_document<P: AsRef<Path>>(path: P) -> PlanResult<PlanDocument> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let document = PlanDocument::parse(&text)?;
    info!(
        path = %path.display(),
        tasks = document.tasks.len(),
        vacations = document.vacations.len(),
        "plan file loaded"
    );
    Ok(document)
}
