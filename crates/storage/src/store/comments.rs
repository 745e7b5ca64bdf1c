#![forbid(unsafe_code)]

use super::tasks::log_activity_tx;
use super::*;
use rusqlite::{params, OptionalExtension};
use tt_core::ids::{OrgId, UserId};
use tt_core::verbs;

impl SqliteStore {
    /// Inserts the comment and its truncated "commented:" activity row in one
    /// transaction.
    pub fn add_comment(
        &mut self,
        org: OrgId,
        task_id: i64,
        author: UserId,
        content: &str,
    ) -> Result<(CommentRow, ActivityRow), StoreError> {
        if content.trim().is_empty() {
            return Err(StoreError::InvalidInput("comment must not be empty"));
        }

        let now_ms = now_ms();
        let tx = self.conn.transaction()?;

        let task = tx
            .query_row(
                "SELECT t.id FROM tasks t \
                 JOIN projects p ON p.id = t.project_id \
                 WHERE p.org_id = ?1 AND t.id = ?2",
                params![org.as_i64(), task_id],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;
        if task.is_none() {
            return Err(StoreError::UnknownId);
        }

        let author_username = tx
            .query_row(
                "SELECT username FROM users WHERE id = ?1",
                params![author.as_i64()],
                |row| row.get::<_, String>(0),
            )
            .optional()?
            .ok_or(StoreError::UnknownId)?;

        tx.execute(
            "INSERT INTO comments(task_id, author_id, content, created_at_ms) \
             VALUES (?1, ?2, ?3, ?4)",
            params![task_id, author.as_i64(), content, now_ms],
        )?;
        let comment_id = tx.last_insert_rowid();

        let activity = log_activity_tx(&tx, task_id, author, &verbs::commented(content), now_ms)?;
        tx.commit()?;

        Ok((
            CommentRow {
                id: comment_id,
                task_id,
                author_id: author.as_i64(),
                author_username,
                content: content.to_string(),
                created_at_ms: now_ms,
            },
            activity,
        ))
    }

    /// Oldest first, the order a discussion reads in.
    pub fn list_comments(&self, org: OrgId, task_id: i64) -> Result<Vec<CommentRow>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT c.id, c.task_id, c.author_id, u.username, c.content, c.created_at_ms \
             FROM comments c \
             JOIN tasks t ON t.id = c.task_id \
             JOIN projects p ON p.id = t.project_id \
             JOIN users u ON u.id = c.author_id \
             WHERE p.org_id = ?1 AND c.task_id = ?2 \
             ORDER BY c.created_at_ms ASC, c.id ASC",
        )?;
        let rows = stmt.query_map(params![org.as_i64(), task_id], |row| {
            Ok(CommentRow {
                id: row.get(0)?,
                task_id: row.get(1)?,
                author_id: row.get(2)?,
                author_username: row.get(3)?,
                content: row.get(4)?,
                created_at_ms: row.get(5)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}
