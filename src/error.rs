use thiserror::Error;

/// Failures surfaced by the dashboard.
///
/// Only [`DashboardError::InvalidCredentials`] is expected during normal use
/// and is recovered where it occurs. Every other variant aborts the page or
/// command that triggered it.
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Object not found: {0}")]
    ObjectNotFound(String),

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Field missing: {0}")]
    FieldMissing(String),

    #[error("Username/Password invalid")]
    InvalidCredentials,
}

impl From<reqwest::Error> for DashboardError {
    fn from(err: reqwest::Error) -> Self {
        DashboardError::StorageUnavailable(err.to_string())
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        DashboardError::MalformedPayload(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
