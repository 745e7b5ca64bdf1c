#![forbid(unsafe_code)]

//! Operation surface for the tracker core. A presentation layer (web
//! handlers, CLI, API) authenticates a token into a [`Caller`] and passes it
//! explicitly into every operation; there is no ambient current-user state.

mod error;
mod ops;
mod session;
mod views;

pub use error::ServiceError;
pub use ops::*;
pub use session::Session;
pub use views::*;

use std::path::Path;
use tt_core::ids::{OrgId, UserId};
use tt_core::model::Role;
use tt_storage::SqliteStore;

/// Authenticated request context: identity plus the profile that scopes it.
/// `org` is `None` for users who never completed provisioning; they see empty
/// listings and not-found lookups everywhere.
#[derive(Clone, Debug)]
pub struct Caller {
    pub user: UserId,
    pub username: String,
    pub role: Role,
    pub org: Option<OrgId>,
}

#[derive(Debug)]
pub struct Service {
    store: SqliteStore,
}

impl Service {
    pub fn open(storage_dir: impl AsRef<Path>) -> Result<Self, ServiceError> {
        Ok(Self {
            store: SqliteStore::open(storage_dir)?,
        })
    }

    pub fn from_store(store: SqliteStore) -> Self {
        Self { store }
    }

    /// Resolves a bearer token into a caller. Unknown or revoked tokens are
    /// indistinguishable from never-issued ones.
    pub fn authenticate(&self, token: &str) -> Result<Caller, ServiceError> {
        let digest = session::token_digest(token);
        let user = self
            .store
            .session_user(&digest)?
            .ok_or(ServiceError::Unauthenticated)?;
        let profile = self
            .store
            .get_profile(UserId::new(user.id))?
            .ok_or(ServiceError::Unauthenticated)?;
        Ok(Caller {
            user: UserId::new(user.id),
            username: user.username,
            role: profile.role,
            org: profile.org_id.map(OrgId::new),
        })
    }
}
