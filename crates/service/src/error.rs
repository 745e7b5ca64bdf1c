#![forbid(unsafe_code)]

use tt_storage::StoreError;

/// Per-request outcomes; none are fatal to the process.
///
/// `NotFound` covers both truly absent records and records in another tenant;
/// the two are indistinguishable by design. Soft-denied task edits are not an
/// error at all, see [`crate::TaskEditOutcome`].
#[derive(Debug)]
pub enum ServiceError {
    /// Bad or missing input; the caller re-prompts with preserved fields.
    Validation {
        field: &'static str,
        message: String,
    },
    /// Role check failed on a gated action. Distinct from not-found.
    Auth,
    NotFound,
    Unauthenticated,
    Storage(StoreError),
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation { field, message } => write!(f, "validation ({field}): {message}"),
            Self::Auth => write!(f, "not permitted"),
            Self::NotFound => write!(f, "not found"),
            Self::Unauthenticated => write!(f, "not authenticated"),
            Self::Storage(err) => write!(f, "storage: {err}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Storage(value)
    }
}

impl ServiceError {
    pub(crate) fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// For scoped lookups, where an unknown id means the record is absent or
    /// belongs to another tenant.
    pub(crate) fn scoped(err: StoreError) -> Self {
        match err {
            StoreError::UnknownId => Self::NotFound,
            other => Self::Storage(other),
        }
    }
}
