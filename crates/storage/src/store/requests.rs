#![forbid(unsafe_code)]

use tt_core::ids::UserId;
use tt_core::model::{Priority, Role, TaskStatus};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProvisionRequest {
    pub user_id: UserId,
    pub role: Role,
    /// Required when role is admin: the new organization's name.
    pub org_name: Option<String>,
    /// Required when role is manager or member: an existing organization id.
    pub org_choice: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectCreateRequest {
    pub name: String,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectUpdateRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskCreateRequest {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: Priority,
    pub assignee_id: Option<i64>,
    /// `YYYY-MM-DD`; validated by the caller before it reaches storage.
    pub due_date: Option<String>,
}

/// Partial edit. Outer `None` leaves the field untouched; for nullable
/// columns the inner option distinguishes "set" from "clear".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TaskEditRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub assignee_id: Option<Option<i64>>,
    pub due_date: Option<Option<String>>,
}
