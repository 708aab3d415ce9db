use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub name: String,
    /// Man-days of work; fractional values such as `1.5` are allowed.
    pub effort: f64,
    pub assignee: String,
    /// Percent complete, 0 to 100.
    #[serde(default)]
    pub completion: u8,
    /// Position on the assignee's personal timeline, filled in by
    /// [`assign_start_offsets`](crate::calculations::assignment::assign_start_offsets).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_offset: Option<f64>,
}

impl Task {
    pub fn new(name: impl Into<String>, effort: f64, assignee: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            effort,
            assignee: assignee.into(),
            completion: 0,
            start_offset: None,
        }
    }

    pub fn with_completion(mut self, completion: u8) -> Self {
        self.completion = completion;
        self
    }

    pub fn end_offset(&self) -> Option<f64> {
        self.start_offset.map(|start| start + self.effort)
    }
}
