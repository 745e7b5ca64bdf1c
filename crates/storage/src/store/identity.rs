#![forbid(unsafe_code)]

use super::*;
use rusqlite::{params, ErrorCode, OptionalExtension};
use tt_core::ids::UserId;
use tt_core::model::Role;

impl SqliteStore {
    /// Creates the external user identity. The caller must follow up with
    /// [`SqliteStore::ensure_profile`]; identity creation and profile setup
    /// are deliberately two visible steps, not a hidden hook.
    pub fn create_user(&mut self, username: &str, email: &str) -> Result<UserRow, StoreError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(StoreError::InvalidInput("username must not be empty"));
        }

        let now_ms = now_ms();
        let inserted = self.conn.execute(
            "INSERT INTO users(username, email, created_at_ms) VALUES (?1, ?2, ?3)",
            params![username, email.trim(), now_ms],
        );
        match inserted {
            Ok(_) => {}
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                return Err(StoreError::UsernameTaken);
            }
            Err(err) => return Err(err.into()),
        }

        let id = self.conn.last_insert_rowid();
        Ok(UserRow {
            id,
            username: username.to_string(),
            email: email.trim().to_string(),
            created_at_ms: now_ms,
        })
    }

    pub fn get_user(&self, user_id: UserId) -> Result<Option<UserRow>, StoreError> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, username, email, created_at_ms FROM users WHERE id = ?1",
                params![user_id.as_i64()],
                |row| {
                    Ok(UserRow {
                        id: row.get(0)?,
                        username: row.get(1)?,
                        email: row.get(2)?,
                        created_at_ms: row.get(3)?,
                    })
                },
            )
            .optional()?)
    }

    /// Idempotent: the first call inserts a default `member` profile with no
    /// organization; every later call is a no-op returning the existing row.
    pub fn ensure_profile(&mut self, user_id: UserId) -> Result<ProfileRow, StoreError> {
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO profiles(user_id, role) VALUES (?1, 'member')",
            params![user_id.as_i64()],
        );
        match inserted {
            Ok(_) => {}
            // A missing users row surfaces as an FK violation; report it as
            // an unknown id rather than a raw sqlite error.
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                return Err(StoreError::UnknownId);
            }
            Err(err) => return Err(err.into()),
        }
        self.get_profile(user_id)?.ok_or(StoreError::UnknownId)
    }

    pub fn get_profile(&self, user_id: UserId) -> Result<Option<ProfileRow>, StoreError> {
        Ok(self
            .conn
            .query_row(
                "SELECT user_id, org_id, role FROM profiles WHERE user_id = ?1",
                params![user_id.as_i64()],
                |row| {
                    Ok(ProfileRow {
                        user_id: row.get(0)?,
                        org_id: row.get(1)?,
                        role: parse_role(2, row.get(2)?)?,
                    })
                },
            )
            .optional()?)
    }

    /// Assigns role and organization in one transaction. The admin path
    /// creates the named organization; the manager/member path points the
    /// profile at an existing one. Validation failures leave the profile as
    /// it was (role and organization unset) so the caller can re-prompt.
    pub fn provision(&mut self, request: ProvisionRequest) -> Result<ProfileRow, StoreError> {
        let ProvisionRequest {
            user_id,
            role,
            org_name,
            org_choice,
        } = request;

        let now_ms = now_ms();
        let tx = self.conn.transaction()?;

        let org_id = match role {
            Role::Admin => {
                let name = org_name.as_deref().map(str::trim).unwrap_or("");
                if name.is_empty() {
                    return Err(StoreError::InvalidInput(
                        "organization name is required for the admin role",
                    ));
                }
                tx.execute(
                    "INSERT INTO organizations(name, created_at_ms) VALUES (?1, ?2)",
                    params![name, now_ms],
                )?;
                tx.last_insert_rowid()
            }
            Role::Manager | Role::Member => {
                let Some(choice) = org_choice else {
                    return Err(StoreError::InvalidInput(
                        "an organization must be selected for manager and member roles",
                    ));
                };
                let exists = tx
                    .query_row(
                        "SELECT id FROM organizations WHERE id = ?1",
                        params![choice],
                        |row| row.get::<_, i64>(0),
                    )
                    .optional()?;
                exists.ok_or(StoreError::UnknownId)?
            }
        };

        let updated = tx.execute(
            "UPDATE profiles SET role = ?2, org_id = ?3 WHERE user_id = ?1",
            params![user_id.as_i64(), role.as_str(), org_id],
        )?;
        if updated == 0 {
            return Err(StoreError::UnknownId);
        }

        tx.commit()?;
        Ok(ProfileRow {
            user_id: user_id.as_i64(),
            org_id: Some(org_id),
            role,
        })
    }
}
