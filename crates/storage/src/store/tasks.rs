#![forbid(unsafe_code)]

use super::*;
use rusqlite::{params, OptionalExtension, Transaction};
use tt_core::diff::{change_summary, TaskSnapshot};
use tt_core::ids::{OrgId, UserId};
use tt_core::verbs;

const TASK_COLUMNS: &str = "t.id, t.project_id, t.title, t.description, t.status, t.priority, \
     t.assignee_id, u.username, t.due_date, t.created_by, t.created_at_ms";

fn task_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<TaskRow> {
    Ok(TaskRow {
        id: row.get(0)?,
        project_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        status: parse_status(4, row.get(4)?)?,
        priority: parse_priority(5, row.get(5)?)?,
        assignee_id: row.get(6)?,
        assignee_username: row.get(7)?,
        due_date: row.get(8)?,
        created_by: row.get(9)?,
        created_at_ms: row.get(10)?,
    })
}

impl SqliteStore {
    pub fn list_tasks(&self, org: OrgId, project_id: i64) -> Result<Vec<TaskRow>, StoreError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks t \
             JOIN projects p ON p.id = t.project_id \
             LEFT JOIN users u ON u.id = t.assignee_id \
             WHERE p.org_id = ?1 AND t.project_id = ?2 \
             ORDER BY t.created_at_ms ASC, t.id ASC"
        ))?;
        let rows = stmt.query_map(params![org.as_i64(), project_id], task_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Scoped through the parent project; cross-tenant ids come back as
    /// absent, not forbidden.
    pub fn get_task(&self, org: OrgId, task_id: i64) -> Result<Option<TaskRow>, StoreError> {
        Ok(self
            .conn
            .query_row(
                &format!(
                    "SELECT {TASK_COLUMNS} FROM tasks t \
                     JOIN projects p ON p.id = t.project_id \
                     LEFT JOIN users u ON u.id = t.assignee_id \
                     WHERE p.org_id = ?1 AND t.id = ?2"
                ),
                params![org.as_i64(), task_id],
                task_from_row,
            )
            .optional()?)
    }

    /// Inserts the task and its "Task created" activity row in one
    /// transaction; neither persists without the other.
    pub fn create_task(
        &mut self,
        org: OrgId,
        project_id: i64,
        request: TaskCreateRequest,
        actor: UserId,
    ) -> Result<(TaskRow, ActivityRow), StoreError> {
        let title = request.title.trim().to_string();
        if title.is_empty() {
            return Err(StoreError::InvalidInput("task title must not be empty"));
        }

        let now_ms = now_ms();
        let tx = self.conn.transaction()?;

        let project = tx
            .query_row(
                "SELECT id FROM projects WHERE org_id = ?1 AND id = ?2",
                params![org.as_i64(), project_id],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;
        if project.is_none() {
            return Err(StoreError::UnknownId);
        }

        let assignee_username = match request.assignee_id {
            Some(assignee_id) => Some(org_member_username_tx(&tx, org, assignee_id)?),
            None => None,
        };

        tx.execute(
            "INSERT INTO tasks(project_id, title, description, status, priority, \
                               assignee_id, due_date, created_by, created_at_ms) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                project_id,
                title,
                request.description,
                request.status.as_str(),
                request.priority.as_str(),
                request.assignee_id,
                request.due_date,
                actor.as_i64(),
                now_ms
            ],
        )?;
        let task_id = tx.last_insert_rowid();

        let activity = log_activity_tx(&tx, task_id, actor, &verbs::task_created(&title), now_ms)?;
        tx.commit()?;

        Ok((
            TaskRow {
                id: task_id,
                project_id,
                title,
                description: request.description,
                status: request.status,
                priority: request.priority,
                assignee_id: request.assignee_id,
                assignee_username,
                due_date: request.due_date,
                created_by: Some(actor.as_i64()),
                created_at_ms: now_ms,
            },
            activity,
        ))
    }

    /// Applies a partial edit and appends the change summary to the activity
    /// log, atomically. Only status and assignee feed the summary; any other
    /// edit logs "task updated".
    pub fn edit_task(
        &mut self,
        org: OrgId,
        task_id: i64,
        request: TaskEditRequest,
        actor: UserId,
    ) -> Result<(TaskRow, ActivityRow), StoreError> {
        let TaskEditRequest {
            title,
            description,
            status,
            priority,
            assignee_id,
            due_date,
        } = request;

        let now_ms = now_ms();
        let tx = self.conn.transaction()?;

        let current = tx
            .query_row(
                &format!(
                    "SELECT {TASK_COLUMNS} FROM tasks t \
                     JOIN projects p ON p.id = t.project_id \
                     LEFT JOIN users u ON u.id = t.assignee_id \
                     WHERE p.org_id = ?1 AND t.id = ?2"
                ),
                params![org.as_i64(), task_id],
                task_from_row,
            )
            .optional()?;
        let Some(current) = current else {
            return Err(StoreError::UnknownId);
        };

        let before = TaskSnapshot {
            status: current.status,
            assignee: current.assignee_username.clone(),
        };

        let new_title = match title {
            Some(title) => {
                let title = title.trim().to_string();
                if title.is_empty() {
                    return Err(StoreError::InvalidInput("task title must not be empty"));
                }
                title
            }
            None => current.title,
        };
        let new_description = description.unwrap_or(current.description);
        let new_status = status.unwrap_or(current.status);
        let new_priority = priority.unwrap_or(current.priority);
        let new_due_date = due_date.unwrap_or(current.due_date);
        let (new_assignee_id, new_assignee_username) = match assignee_id {
            None => (current.assignee_id, current.assignee_username),
            Some(None) => (None, None),
            Some(Some(user_id)) => {
                let username = org_member_username_tx(&tx, org, user_id)?;
                (Some(user_id), Some(username))
            }
        };

        tx.execute(
            "UPDATE tasks \
             SET title = ?2, description = ?3, status = ?4, priority = ?5, \
                 assignee_id = ?6, due_date = ?7 \
             WHERE id = ?1",
            params![
                task_id,
                new_title,
                new_description,
                new_status.as_str(),
                new_priority.as_str(),
                new_assignee_id,
                new_due_date
            ],
        )?;

        let after = TaskSnapshot {
            status: new_status,
            assignee: new_assignee_username.clone(),
        };
        let summary = change_summary(&before, &after);
        let activity = log_activity_tx(&tx, task_id, actor, &summary, now_ms)?;
        tx.commit()?;

        Ok((
            TaskRow {
                id: task_id,
                project_id: current.project_id,
                title: new_title,
                description: new_description,
                status: new_status,
                priority: new_priority,
                assignee_id: new_assignee_id,
                assignee_username: new_assignee_username,
                due_date: new_due_date,
                created_by: current.created_by,
                created_at_ms: current.created_at_ms,
            },
            activity,
        ))
    }
}

/// The assignee must hold a profile in the task's organization; anything else
/// is reported as bad input rather than leaking whether the user exists.
fn org_member_username_tx(
    tx: &Transaction<'_>,
    org: OrgId,
    user_id: i64,
) -> Result<String, StoreError> {
    tx.query_row(
        "SELECT u.username FROM users u \
         JOIN profiles pr ON pr.user_id = u.id \
         WHERE u.id = ?1 AND pr.org_id = ?2",
        params![user_id, org.as_i64()],
        |row| row.get::<_, String>(0),
    )
    .optional()?
    .ok_or(StoreError::InvalidInput(
        "assignee must belong to the task's organization",
    ))
}

pub(super) fn log_activity_tx(
    tx: &Transaction<'_>,
    task_id: i64,
    actor: UserId,
    verb: &str,
    now_ms: i64,
) -> Result<ActivityRow, StoreError> {
    tx.execute(
        "INSERT INTO activity_log(task_id, actor_id, verb, created_at_ms) \
         VALUES (?1, ?2, ?3, ?4)",
        params![task_id, actor.as_i64(), verb, now_ms],
    )?;
    let id = tx.last_insert_rowid();
    let actor_username = tx
        .query_row(
            "SELECT username FROM users WHERE id = ?1",
            params![actor.as_i64()],
            |row| row.get::<_, String>(0),
        )
        .optional()?;
    Ok(ActivityRow {
        id,
        task_id,
        actor_id: Some(actor.as_i64()),
        actor_username,
        verb: verb.to_string(),
        created_at_ms: now_ms,
    })
}
