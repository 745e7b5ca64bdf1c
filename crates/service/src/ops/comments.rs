#![forbid(unsafe_code)]

use crate::{Caller, CommentView, ServiceError, Service};
use tracing::info;
use tt_core::authz::{can, Action};
use tt_storage::StoreError;

impl Service {
    /// Any role in the task's tenant may comment. The truncated activity
    /// entry is written in the same transaction as the comment.
    pub fn add_comment(
        &mut self,
        caller: &Caller,
        task_id: i64,
        content: &str,
    ) -> Result<CommentView, ServiceError> {
        let org = caller.org.ok_or(ServiceError::NotFound)?;
        if !can(caller.role, Action::AddComment) {
            return Err(ServiceError::Auth);
        }
        let (comment, _) = self
            .store
            .add_comment(org, task_id, caller.user, content)
            .map_err(|err| match err {
                StoreError::InvalidInput(message) => ServiceError::validation("content", message),
                other => ServiceError::scoped(other),
            })?;
        info!(
            task = task_id,
            comment = comment.id,
            user = caller.user.as_i64(),
            "comment added"
        );
        Ok(comment.into())
    }
}
