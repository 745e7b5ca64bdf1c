#![forbid(unsafe_code)]

//! Change summary for task edits. Only `status` and the assignee are tracked;
//! an edit touching nothing but title/description/priority/due date still
//! reads "task updated". That is the intended behavior, not a gap.

use crate::model::TaskStatus;

pub const TASK_UPDATED: &str = "task updated";

/// Snapshot of the tracked fields, taken before and after an edit. The
/// assignee is carried as its display label (username) so the summary reads
/// the way a human wrote it; `None` renders as the literal `None`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskSnapshot {
    pub status: TaskStatus,
    pub assignee: Option<String>,
}

pub fn change_summary(before: &TaskSnapshot, after: &TaskSnapshot) -> String {
    let mut changes = Vec::new();
    if before.status != after.status {
        changes.push(format!(
            "status {} -> {}",
            before.status.as_str(),
            after.status.as_str()
        ));
    }
    if before.assignee != after.assignee {
        changes.push(format!(
            "assignee {} -> {}",
            assignee_label(before.assignee.as_deref()),
            assignee_label(after.assignee.as_deref())
        ));
    }
    if changes.is_empty() {
        TASK_UPDATED.to_string()
    } else {
        changes.join("; ")
    }
}

fn assignee_label(assignee: Option<&str>) -> &str {
    assignee.unwrap_or("None")
}
