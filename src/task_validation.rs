use crate::error::{PlanError, PlanResult};
use crate::task::Task;

pub fn validate_task(task: &Task) -> PlanResult<()> {
    if !task.effort.is_finite() || task.effort < 0.0 {
        return Err(PlanError::InvalidTask(format!(
            "task '{}' has invalid effort {} (must be a non-negative number of man-days)",
            task.name, task.effort
        )));
    }

    if task.completion > 100 {
        return Err(PlanError::InvalidTask(format!(
            "task '{}' has invalid completion {}% (must be between 0 and 100)",
            task.name, task.completion
        )));
    }

    if task.assignee.trim().is_empty() {
        return Err(PlanError::InvalidTask(format!(
            "task '{}' requires a non-empty assignee",
            task.name
        )));
    }

    Ok(())
}

pub fn validate_task_collection(tasks: &[Task]) -> PlanResult<()> {
    tasks.iter().try_for_each(validate_task)
}
