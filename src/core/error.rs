use thiserror::Error;

/// Failure kinds reported by the mock file system.
///
/// Operations return `anyhow::Error`; the kind is recovered with
/// `err.downcast_ref::<FsError>()` or [`FsError::kind_of`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FsError {
    #[error("{0} does not exist")]
    NotFound(String),
    #[error("The file {0} already exists.")]
    AlreadyExists(String),
    #[error("invalid path '{path}': {reason}")]
    Malformed { path: String, reason: &'static str },
}

impl FsError {
    pub fn kind_of(err: &anyhow::Error) -> Option<&FsError> {
        err.downcast_ref::<FsError>()
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FsError::NotFound(_))
    }

    pub fn is_already_exists(&self) -> bool {
        matches!(self, FsError::AlreadyExists(_))
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, FsError::Malformed { .. })
    }
}
