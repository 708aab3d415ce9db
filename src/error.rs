use polars::prelude::PolarsError;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("please provide the project start date")]
    MissingStartDate,
    #[error("line {line}: {reason}")]
    InvalidLine { line: usize, reason: String },
    #[error("invalid task: {0}")]
    InvalidTask(String),
    #[error("work calendar requires at least one working day")]
    NoWorkingDays,
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("dataframe conversion error: {0}")]
    DataFrame(#[from] PolarsError),
}

impl PlanError {
    pub(crate) fn invalid_line(line: usize, reason: impl Into<String>) -> Self {
        Self::InvalidLine {
            line,
            reason: reason.into(),
        }
    }
}

pub type PlanResult<T> = Result<T, PlanError>;
