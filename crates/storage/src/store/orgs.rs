#![forbid(unsafe_code)]

use super::*;
use rusqlite::params;
use tt_core::ids::OrgId;

impl SqliteStore {
    /// Unscoped by design: signup offers the full list of organizations to
    /// join. Nothing tenant-owned is exposed here.
    pub fn list_organizations(&self) -> Result<Vec<OrganizationRow>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, created_at_ms FROM organizations ORDER BY created_at_ms ASC, id ASC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(OrganizationRow {
                id: row.get(0)?,
                name: row.get(1)?,
                created_at_ms: row.get(2)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn get_organization(&self, org: OrgId) -> Result<Option<OrganizationRow>, StoreError> {
        use rusqlite::OptionalExtension;

        Ok(self
            .conn
            .query_row(
                "SELECT id, name, created_at_ms FROM organizations WHERE id = ?1",
                params![org.as_i64()],
                |row| {
                    Ok(OrganizationRow {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        created_at_ms: row.get(2)?,
                    })
                },
            )
            .optional()?)
    }

    /// Removes the organization and, through the foreign-key cascade, its
    /// projects, their tasks, and those tasks' comments and activity rows.
    pub fn delete_organization(&mut self, org: OrgId) -> Result<(), StoreError> {
        let deleted = self.conn.execute(
            "DELETE FROM organizations WHERE id = ?1",
            params![org.as_i64()],
        )?;
        if deleted == 0 {
            return Err(StoreError::UnknownId);
        }
        Ok(())
    }
}
