use crate::task::Task;
use std::collections::HashMap;
use tracing::debug;

/// Lay tasks out back-to-back per assignee, in declaration order.
///
/// Each task starts where the assignee's previous task ended; the first task of
/// every assignee starts at offset 0. Offsets from an earlier pass are overwritten.
/// Returns the assigned offsets in task order.
pub fn assign_start_offsets(tasks: &mut [Task]) -> Vec<f64> {
    let mut running_totals: HashMap<String, f64> = HashMap::new();
    let mut offsets = Vec::with_capacity(tasks.len());

    for task in tasks.iter_mut() {
        let total = running_totals.entry(task.assignee.clone()).or_insert(0.0);
        let start_offset = *total;
        *total += task.effort;
        task.start_offset = Some(start_offset);
        offsets.push(start_offset);
        debug!(
            task = %task.name,
            assignee = %task.assignee,
            start_offset,
            "assigned start offset"
        );
    }
    offsets
}
