#![forbid(unsafe_code)]

use super::*;
use rusqlite::params;
use tt_core::ids::OrgId;

impl SqliteStore {
    /// Most recent first, the display order of the feed. Rows are append-only
    /// and only ever removed by cascade from their task.
    pub fn list_activity(&self, org: OrgId, task_id: i64) -> Result<Vec<ActivityRow>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT a.id, a.task_id, a.actor_id, u.username, a.verb, a.created_at_ms \
             FROM activity_log a \
             JOIN tasks t ON t.id = a.task_id \
             JOIN projects p ON p.id = t.project_id \
             LEFT JOIN users u ON u.id = a.actor_id \
             WHERE p.org_id = ?1 AND a.task_id = ?2 \
             ORDER BY a.created_at_ms DESC, a.id DESC",
        )?;
        let rows = stmt.query_map(params![org.as_i64(), task_id], |row| {
            Ok(ActivityRow {
                id: row.get(0)?,
                task_id: row.get(1)?,
                actor_id: row.get(2)?,
                actor_username: row.get(3)?,
                verb: row.get(4)?,
                created_at_ms: row.get(5)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}
