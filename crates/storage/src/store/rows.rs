#![forbid(unsafe_code)]

use tt_core::model::{Priority, Role, TaskStatus};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at_ms: i64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrganizationRow {
    pub id: i64,
    pub name: String,
    pub created_at_ms: i64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileRow {
    pub user_id: i64,
    pub org_id: Option<i64>,
    pub role: Role,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectRow {
    pub id: i64,
    pub org_id: i64,
    pub name: String,
    pub description: String,
    pub created_by: Option<i64>,
    pub created_at_ms: i64,
}

/// Task row joined with the assignee's username so callers can render the
/// display label without a second lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskRow {
    pub id: i64,
    pub project_id: i64,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: Priority,
    pub assignee_id: Option<i64>,
    pub assignee_username: Option<String>,
    pub due_date: Option<String>,
    pub created_by: Option<i64>,
    pub created_at_ms: i64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommentRow {
    pub id: i64,
    pub task_id: i64,
    pub author_id: i64,
    pub author_username: String,
    pub content: String,
    pub created_at_ms: i64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActivityRow {
    pub id: i64,
    pub task_id: i64,
    pub actor_id: Option<i64>,
    pub actor_username: Option<String>,
    pub verb: String,
    pub created_at_ms: i64,
}
