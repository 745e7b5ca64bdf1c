#![forbid(unsafe_code)]

use super::*;
use rusqlite::{params, OptionalExtension};
use tt_core::ids::UserId;

impl SqliteStore {
    /// Stores a session by token digest. The clear-text token never touches
    /// the database.
    pub fn session_insert(&mut self, token_hash: &str, user_id: UserId) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO sessions(token_hash, user_id, created_at_ms) VALUES (?1, ?2, ?3)",
            params![token_hash, user_id.as_i64(), now_ms()],
        )?;
        Ok(())
    }

    pub fn session_user(&self, token_hash: &str) -> Result<Option<UserRow>, StoreError> {
        Ok(self
            .conn
            .query_row(
                "SELECT u.id, u.username, u.email, u.created_at_ms \
                 FROM sessions s JOIN users u ON u.id = s.user_id \
                 WHERE s.token_hash = ?1",
                params![token_hash],
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

    /// Logout clears every session the user holds, not just the presented
    /// one, so stale tokens on other clients die too.
    pub fn sessions_revoke_all(&mut self, user_id: UserId) -> Result<usize, StoreError> {
        Ok(self.conn.execute(
            "DELETE FROM sessions WHERE user_id = ?1",
            params![user_id.as_i64()],
        )?)
    }
}
