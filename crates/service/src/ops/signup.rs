#![forbid(unsafe_code)]

use crate::views::role_str;
use crate::{session, OrganizationView, ServiceError, Service, Session};
use serde::Deserialize;
use tracing::info;
use tt_core::ids::UserId;
use tt_core::model::Role;
use tt_storage::{ProvisionRequest, StoreError};

/// Signup form payload. Field names follow the wire contract; exactly one of
/// `organization_name` (admin) and `organization` (manager/member) applies.
#[derive(Clone, Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    #[serde(with = "role_str")]
    pub role: Role,
    #[serde(default)]
    pub organization_name: Option<String>,
    #[serde(default)]
    pub organization: Option<i64>,
}

impl Service {
    /// Organizations offered on the manager/member signup path.
    pub fn organizations(&self) -> Result<Vec<OrganizationView>, ServiceError> {
        Ok(self
            .store
            .list_organizations()?
            .into_iter()
            .map(OrganizationView::from)
            .collect())
    }

    /// Creates the identity, its profile, and the organization assignment,
    /// then logs the new user in. The identity is persisted before the
    /// organization step: a provisioning validation failure leaves the user
    /// and a default profile behind so re-prompting keeps the entered fields.
    pub fn signup(&mut self, request: SignupRequest) -> Result<Session, ServiceError> {
        let user = match self.store.create_user(&request.username, &request.email) {
            Ok(user) => user,
            Err(StoreError::UsernameTaken) => {
                return Err(ServiceError::validation(
                    "username",
                    "username already taken",
                ));
            }
            Err(StoreError::InvalidInput(message)) => {
                return Err(ServiceError::validation("username", message));
            }
            Err(err) => return Err(err.into()),
        };
        let user_id = UserId::new(user.id);
        self.store.ensure_profile(user_id)?;

        let profile = match self.store.provision(ProvisionRequest {
            user_id,
            role: request.role,
            org_name: request.organization_name,
            org_choice: request.organization,
        }) {
            Ok(profile) => profile,
            Err(StoreError::InvalidInput(message)) => {
                let field = match request.role {
                    Role::Admin => "organization_name",
                    Role::Manager | Role::Member => "organization",
                };
                return Err(ServiceError::validation(field, message));
            }
            Err(StoreError::UnknownId) => {
                return Err(ServiceError::validation(
                    "organization",
                    "select an existing organization",
                ));
            }
            Err(err) => return Err(err.into()),
        };

        let token = session::issue_token();
        self.store
            .session_insert(&session::token_digest(&token), user_id)?;
        info!(user = user.id, role = request.role.as_str(), "user signed up");

        Ok(Session {
            token,
            user_id: user.id,
            username: user.username,
            role: profile.role,
            organization: profile.org_id,
        })
    }

    /// Revokes every session belonging to the token's user, so the token in
    /// hand and any stale token on another client all die together. Works the
    /// same whichever endpoint style invoked it; an unknown token is already
    /// logged out and clears nothing.
    pub fn logout(&mut self, token: &str) -> Result<usize, ServiceError> {
        let digest = session::token_digest(token);
        let Some(user) = self.store.session_user(&digest)? else {
            return Ok(0);
        };
        let revoked = self.store.sessions_revoke_all(UserId::new(user.id))?;
        info!(user = user.id, revoked, "user logged out");
        Ok(revoked)
    }
}
