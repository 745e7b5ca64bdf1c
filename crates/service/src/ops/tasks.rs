#![forbid(unsafe_code)]

use crate::views::{priority_str, status_str};
use crate::{Caller, ServiceError, Service, TaskDetail, TaskView};
use serde::Deserialize;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::Date;
use tracing::{debug, info, warn};
use tt_core::authz::{can, can_edit_task, Action};
use tt_core::ids::UserId;
use tt_core::model::{Priority, TaskStatus};
use tt_storage::{StoreError, TaskCreateRequest, TaskEditRequest};

const DUE_DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

#[derive(Clone, Debug, Deserialize)]
pub struct TaskFields {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "status_str", default = "default_status")]
    pub status: TaskStatus,
    #[serde(with = "priority_str", default = "default_priority")]
    pub priority: Priority,
    #[serde(default)]
    pub assignee: Option<i64>,
    #[serde(default)]
    pub due_date: Option<String>,
}

fn default_status() -> TaskStatus {
    TaskStatus::Todo
}

fn default_priority() -> Priority {
    Priority::Med
}

/// Partial edit; unset fields keep their stored value. Nested options
/// distinguish "leave as is" from "clear".
#[derive(Clone, Debug, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub assignee: Option<Option<i64>>,
    pub due_date: Option<Option<String>>,
}

/// Task edit has a third outcome besides success and error: a caller who is
/// neither privileged nor the assignee is sent back to the parent project
/// view. No mutation, no activity entry.
#[derive(Clone, Debug, PartialEq)]
pub enum TaskEditOutcome {
    Updated(TaskView),
    RedirectToProject(i64),
}

impl Service {
    pub fn list_tasks(
        &self,
        caller: &Caller,
        project_id: i64,
    ) -> Result<Vec<TaskView>, ServiceError> {
        let Some(org) = caller.org else {
            return Ok(Vec::new());
        };
        if self.store.get_project(org, project_id)?.is_none() {
            return Err(ServiceError::NotFound);
        }
        Ok(self
            .store
            .list_tasks(org, project_id)?
            .into_iter()
            .map(TaskView::from)
            .collect())
    }

    pub fn get_task(&self, caller: &Caller, task_id: i64) -> Result<TaskDetail, ServiceError> {
        let org = caller.org.ok_or(ServiceError::NotFound)?;
        let task = self
            .store
            .get_task(org, task_id)?
            .ok_or(ServiceError::NotFound)?;
        let comments = self.store.list_comments(org, task_id)?;
        let activity = self.store.list_activity(org, task_id)?;
        Ok(TaskDetail {
            task: task.into(),
            comments: comments.into_iter().map(Into::into).collect(),
            activity: activity.into_iter().map(Into::into).collect(),
        })
    }

    /// Tenancy is resolved before the role gate: a cross-tenant project id
    /// reads as not-found even to a caller whose role would otherwise fail,
    /// so probing cannot tell the two tenants apart.
    pub fn create_task(
        &mut self,
        caller: &Caller,
        project_id: i64,
        fields: TaskFields,
    ) -> Result<TaskView, ServiceError> {
        let org = caller.org.ok_or(ServiceError::NotFound)?;
        if self.store.get_project(org, project_id)?.is_none() {
            return Err(ServiceError::NotFound);
        }
        if !can(caller.role, Action::CreateTask) {
            warn!(
                user = caller.user.as_i64(),
                role = caller.role.as_str(),
                project = project_id,
                "task creation denied"
            );
            return Err(ServiceError::Auth);
        }

        if fields.title.trim().is_empty() {
            return Err(ServiceError::validation("title", "title must not be empty"));
        }
        if let Some(due_date) = fields.due_date.as_deref() {
            validate_due_date(due_date)?;
        }

        let (task, _) = self
            .store
            .create_task(
                org,
                project_id,
                TaskCreateRequest {
                    title: fields.title,
                    description: fields.description,
                    status: fields.status,
                    priority: fields.priority,
                    assignee_id: fields.assignee,
                    due_date: fields.due_date,
                },
                caller.user,
            )
            .map_err(|err| match err {
                StoreError::InvalidInput(message) => ServiceError::validation("assignee", message),
                other => ServiceError::scoped(other),
            })?;
        info!(task = task.id, user = caller.user.as_i64(), "task created");
        Ok(task.into())
    }

    pub fn edit_task(
        &mut self,
        caller: &Caller,
        task_id: i64,
        patch: TaskPatch,
    ) -> Result<TaskEditOutcome, ServiceError> {
        let org = caller.org.ok_or(ServiceError::NotFound)?;
        let current = self
            .store
            .get_task(org, task_id)?
            .ok_or(ServiceError::NotFound)?;

        let assignee = current.assignee_id.map(UserId::new);
        if !can_edit_task(caller.role, caller.user, assignee) {
            debug!(
                user = caller.user.as_i64(),
                task = task_id,
                "task edit soft-denied, redirecting to project"
            );
            return Ok(TaskEditOutcome::RedirectToProject(current.project_id));
        }

        if let Some(title) = patch.title.as_deref()
            && title.trim().is_empty()
        {
            return Err(ServiceError::validation("title", "title must not be empty"));
        }
        if let Some(Some(due_date)) = patch.due_date.as_ref().map(|d| d.as_deref()) {
            validate_due_date(due_date)?;
        }

        let (task, activity) = self
            .store
            .edit_task(
                org,
                task_id,
                TaskEditRequest {
                    title: patch.title,
                    description: patch.description,
                    status: patch.status,
                    priority: patch.priority,
                    assignee_id: patch.assignee,
                    due_date: patch.due_date,
                },
                caller.user,
            )
            .map_err(|err| match err {
                StoreError::InvalidInput(message) => ServiceError::validation("assignee", message),
                other => ServiceError::scoped(other),
            })?;
        info!(
            task = task_id,
            user = caller.user.as_i64(),
            summary = %activity.verb,
            "task updated"
        );
        Ok(TaskEditOutcome::Updated(task.into()))
    }
}

fn validate_due_date(value: &str) -> Result<(), ServiceError> {
    Date::parse(value, DUE_DATE_FORMAT)
        .map_err(|_| ServiceError::validation("due_date", "due date must be YYYY-MM-DD"))?;
    Ok(())
}
