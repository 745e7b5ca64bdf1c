#![forbid(unsafe_code)]

//! Pure role checks. Tenancy scoping happens before these run: a caller never
//! reaches an action check for a record outside their organization.

use crate::ids::UserId;
use crate::model::Role;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    ViewProject,
    CreateProject,
    EditProject,
    DeleteProject,
    ViewTask,
    CreateTask,
    EditTask,
    AddComment,
}

pub fn can(role: Role, action: Action) -> bool {
    match action {
        Action::ViewProject | Action::ViewTask | Action::AddComment => true,
        Action::CreateProject
        | Action::EditProject
        | Action::DeleteProject
        | Action::CreateTask
        | Action::EditTask => matches!(role, Role::Admin | Role::Manager),
    }
}

/// Task edit has one extra path: the current assignee may edit their own task
/// regardless of role. Everyone else falls back to the plain role check.
pub fn can_edit_task(role: Role, caller: UserId, assignee: Option<UserId>) -> bool {
    can(role, Action::EditTask) || assignee == Some(caller)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn members_cannot_mutate_projects() {
        assert!(!can(Role::Member, Action::CreateProject));
        assert!(!can(Role::Member, Action::EditProject));
        assert!(!can(Role::Member, Action::DeleteProject));
        assert!(!can(Role::Member, Action::CreateTask));
    }

    #[test]
    fn managers_and_admins_mutate_projects() {
        for role in [Role::Admin, Role::Manager] {
            assert!(can(role, Action::CreateProject));
            assert!(can(role, Action::DeleteProject));
            assert!(can(role, Action::CreateTask));
            assert!(can(role, Action::EditTask));
        }
    }

    #[test]
    fn every_role_views_and_comments() {
        for role in Role::ALL {
            assert!(can(*role, Action::ViewProject));
            assert!(can(*role, Action::ViewTask));
            assert!(can(*role, Action::AddComment));
        }
    }

    #[test]
    fn assignee_may_edit_own_task() {
        let caller = UserId::new(7);
        assert!(can_edit_task(Role::Member, caller, Some(caller)));
        assert!(!can_edit_task(Role::Member, caller, Some(UserId::new(8))));
        assert!(!can_edit_task(Role::Member, caller, None));
        assert!(can_edit_task(Role::Manager, caller, None));
    }
}
