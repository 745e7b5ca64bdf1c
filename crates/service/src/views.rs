#![forbid(unsafe_code)]

//! Wire DTOs. Field names and the `status`/`priority`/`role` value sets are
//! the contract for any API surface and round-trip unchanged.

use serde::{Deserialize, Serialize};
use tt_core::model::{Priority, Role, TaskStatus};
use tt_storage::{ActivityRow, CommentRow, OrganizationRow, ProfileRow, ProjectRow, TaskRow};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationView {
    pub id: i64,
    pub name: String,
    pub created_at: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileView {
    pub user: i64,
    #[serde(with = "role_str")]
    pub role: Role,
    pub organization: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectView {
    pub id: i64,
    pub organization: i64,
    pub name: String,
    pub description: String,
    pub created_by: Option<i64>,
    pub created_at: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskView {
    pub id: i64,
    pub project: i64,
    pub title: String,
    pub description: String,
    #[serde(with = "status_str")]
    pub status: TaskStatus,
    #[serde(with = "priority_str")]
    pub priority: Priority,
    pub assignee: Option<i64>,
    pub due_date: Option<String>,
    pub created_by: Option<i64>,
    pub created_at: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentView {
    pub id: i64,
    pub task: i64,
    pub author: i64,
    pub author_username: String,
    pub content: String,
    pub created_at: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityView {
    pub id: i64,
    pub task: i64,
    pub actor: Option<i64>,
    pub actor_username: Option<String>,
    pub verb: String,
    pub created_at: i64,
}

/// The task page: the record, its discussion oldest-first, and its activity
/// feed most-recent-first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDetail {
    pub task: TaskView,
    pub comments: Vec<CommentView>,
    pub activity: Vec<ActivityView>,
}

impl From<OrganizationRow> for OrganizationView {
    fn from(row: OrganizationRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            created_at: row.created_at_ms,
        }
    }
}

impl From<ProfileRow> for ProfileView {
    fn from(row: ProfileRow) -> Self {
        Self {
            user: row.user_id,
            role: row.role,
            organization: row.org_id,
        }
    }
}

impl From<ProjectRow> for ProjectView {
    fn from(row: ProjectRow) -> Self {
        Self {
            id: row.id,
            organization: row.org_id,
            name: row.name,
            description: row.description,
            created_by: row.created_by,
            created_at: row.created_at_ms,
        }
    }
}

impl From<TaskRow> for TaskView {
    fn from(row: TaskRow) -> Self {
        Self {
            id: row.id,
            project: row.project_id,
            title: row.title,
            description: row.description,
            status: row.status,
            priority: row.priority,
            assignee: row.assignee_id,
            due_date: row.due_date,
            created_by: row.created_by,
            created_at: row.created_at_ms,
        }
    }
}

impl From<CommentRow> for CommentView {
    fn from(row: CommentRow) -> Self {
        Self {
            id: row.id,
            task: row.task_id,
            author: row.author_id,
            author_username: row.author_username,
            content: row.content,
            created_at: row.created_at_ms,
        }
    }
}

impl From<ActivityRow> for ActivityView {
    fn from(row: ActivityRow) -> Self {
        Self {
            id: row.id,
            task: row.task_id,
            actor: row.actor_id,
            actor_username: row.actor_username,
            verb: row.verb,
            created_at: row.created_at_ms,
        }
    }
}

pub(crate) mod role_str {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};
    use tt_core::model::Role;

    pub fn serialize<S: Serializer>(value: &Role, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value.as_str())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Role, D::Error> {
        let value = String::deserialize(deserializer)?;
        Role::parse(&value).ok_or_else(|| D::Error::custom(format!("unknown role: {value}")))
    }
}

pub(crate) mod status_str {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};
    use tt_core::model::TaskStatus;

    pub fn serialize<S: Serializer>(value: &TaskStatus, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value.as_str())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TaskStatus, D::Error> {
        let value = String::deserialize(deserializer)?;
        TaskStatus::parse(&value)
            .ok_or_else(|| D::Error::custom(format!("unknown status: {value}")))
    }
}

pub(crate) mod priority_str {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};
    use tt_core::model::Priority;

    pub fn serialize<S: Serializer>(value: &Priority, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value.as_str())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Priority, D::Error> {
        let value = String::deserialize(deserializer)?;
        Priority::parse(&value)
            .ok_or_else(|| D::Error::custom(format!("unknown priority: {value}")))
    }
}
