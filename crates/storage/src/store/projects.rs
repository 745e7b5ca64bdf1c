#![forbid(unsafe_code)]

use super::*;
use rusqlite::{params, OptionalExtension};
use tt_core::ids::{OrgId, UserId};

const PROJECT_COLUMNS: &str = "id, org_id, name, description, created_by, created_at_ms";

fn project_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ProjectRow> {
    Ok(ProjectRow {
        id: row.get(0)?,
        org_id: row.get(1)?,
        name: row.get(2)?,
        description: row.get(3)?,
        created_by: row.get(4)?,
        created_at_ms: row.get(5)?,
    })
}

impl SqliteStore {
    pub fn list_projects(&self, org: OrgId) -> Result<Vec<ProjectRow>, StoreError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE org_id = ?1 \
             ORDER BY created_at_ms ASC, id ASC"
        ))?;
        let rows = stmt.query_map(params![org.as_i64()], project_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Scoped lookup: a project in another organization is reported the same
    /// way as a project that does not exist.
    pub fn get_project(&self, org: OrgId, id: i64) -> Result<Option<ProjectRow>, StoreError> {
        Ok(self
            .conn
            .query_row(
                &format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE org_id = ?1 AND id = ?2"),
                params![org.as_i64(), id],
                project_from_row,
            )
            .optional()?)
    }

    pub fn create_project(
        &mut self,
        org: OrgId,
        request: ProjectCreateRequest,
        actor: UserId,
    ) -> Result<ProjectRow, StoreError> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(StoreError::InvalidInput("project name must not be empty"));
        }

        let now_ms = now_ms();
        self.conn.execute(
            "INSERT INTO projects(org_id, name, description, created_by, created_at_ms) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                org.as_i64(),
                name,
                request.description,
                actor.as_i64(),
                now_ms
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        Ok(ProjectRow {
            id,
            org_id: org.as_i64(),
            name: name.to_string(),
            description: request.description,
            created_by: Some(actor.as_i64()),
            created_at_ms: now_ms,
        })
    }

    pub fn update_project(
        &mut self,
        org: OrgId,
        id: i64,
        request: ProjectUpdateRequest,
    ) -> Result<ProjectRow, StoreError> {
        let tx = self.conn.transaction()?;

        let current = tx
            .query_row(
                &format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE org_id = ?1 AND id = ?2"),
                params![org.as_i64(), id],
                project_from_row,
            )
            .optional()?;
        let Some(current) = current else {
            return Err(StoreError::UnknownId);
        };

        let name = match request.name {
            Some(name) => {
                let name = name.trim().to_string();
                if name.is_empty() {
                    return Err(StoreError::InvalidInput("project name must not be empty"));
                }
                name
            }
            None => current.name,
        };
        let description = request.description.unwrap_or(current.description);

        tx.execute(
            "UPDATE projects SET name = ?3, description = ?4 WHERE org_id = ?1 AND id = ?2",
            params![org.as_i64(), id, name, description],
        )?;
        tx.commit()?;

        Ok(ProjectRow {
            id: current.id,
            org_id: current.org_id,
            name,
            description,
            created_by: current.created_by,
            created_at_ms: current.created_at_ms,
        })
    }

    /// Cascades to the project's tasks and their comments and activity rows.
    pub fn delete_project(&mut self, org: OrgId, id: i64) -> Result<(), StoreError> {
        let deleted = self.conn.execute(
            "DELETE FROM projects WHERE org_id = ?1 AND id = ?2",
            params![org.as_i64(), id],
        )?;
        if deleted == 0 {
            return Err(StoreError::UnknownId);
        }
        Ok(())
    }
}
