#![forbid(unsafe_code)]

use crate::{Caller, ProjectView, ServiceError, Service};
use serde::Deserialize;
use tracing::{info, warn};
use tt_core::authz::{can, Action};
use tt_core::ids::OrgId;
use tt_storage::{ProjectCreateRequest, ProjectUpdateRequest};

#[derive(Clone, Debug, Deserialize)]
pub struct ProjectFields {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl Service {
    pub fn list_projects(&self, caller: &Caller) -> Result<Vec<ProjectView>, ServiceError> {
        let Some(org) = caller.org else {
            return Ok(Vec::new());
        };
        Ok(self
            .store
            .list_projects(org)?
            .into_iter()
            .map(ProjectView::from)
            .collect())
    }

    pub fn get_project(&self, caller: &Caller, id: i64) -> Result<ProjectView, ServiceError> {
        let org = caller.org.ok_or(ServiceError::NotFound)?;
        self.store
            .get_project(org, id)?
            .map(ProjectView::from)
            .ok_or(ServiceError::NotFound)
    }

    pub fn create_project(
        &mut self,
        caller: &Caller,
        fields: ProjectFields,
    ) -> Result<ProjectView, ServiceError> {
        let org = self.gate_project_action(caller, Action::CreateProject)?;
        let project = self
            .store
            .create_project(
                org,
                ProjectCreateRequest {
                    name: fields.name,
                    description: fields.description,
                },
                caller.user,
            )
            .map_err(|err| match err {
                tt_storage::StoreError::InvalidInput(message) => {
                    ServiceError::validation("name", message)
                }
                other => other.into(),
            })?;
        info!(project = project.id, user = caller.user.as_i64(), "project created");
        Ok(project.into())
    }

    pub fn update_project(
        &mut self,
        caller: &Caller,
        id: i64,
        patch: ProjectPatch,
    ) -> Result<ProjectView, ServiceError> {
        let org = self.gate_project_action(caller, Action::EditProject)?;
        let project = self
            .store
            .update_project(
                org,
                id,
                ProjectUpdateRequest {
                    name: patch.name,
                    description: patch.description,
                },
            )
            .map_err(|err| match err {
                tt_storage::StoreError::InvalidInput(message) => {
                    ServiceError::validation("name", message)
                }
                other => ServiceError::scoped(other),
            })?;
        info!(project = id, user = caller.user.as_i64(), "project updated");
        Ok(project.into())
    }

    pub fn delete_project(&mut self, caller: &Caller, id: i64) -> Result<(), ServiceError> {
        let org = self.gate_project_action(caller, Action::DeleteProject)?;
        self.store
            .delete_project(org, id)
            .map_err(ServiceError::scoped)?;
        info!(project = id, user = caller.user.as_i64(), "project deleted");
        Ok(())
    }

    /// Project mutations gate on role before any lookup: a member probing a
    /// gated endpoint gets a rejection, never a tenancy hint.
    fn gate_project_action(
        &self,
        caller: &Caller,
        action: Action,
    ) -> Result<OrgId, ServiceError> {
        if !can(caller.role, action) {
            warn!(
                user = caller.user.as_i64(),
                role = caller.role.as_str(),
                ?action,
                "gated action denied"
            );
            return Err(ServiceError::Auth);
        }
        caller.org.ok_or(ServiceError::Auth)
    }
}
