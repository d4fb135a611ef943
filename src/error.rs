use thiserror::Error;

#[derive(Error, Debug)]
pub enum GovernanceError {
    #[error("Governance config not found: {0}")]
    ConfigNotFound(String),

    #[error("Malformed storage: {0}")]
    MalformedStorage(String),

    #[error("Voter {0} is not a registered maintainer")]
    UnknownVoter(String),

    #[error("{0} does not have override permissions")]
    PermissionDenied(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<serde_json::Error> for GovernanceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Storage(format!("JSON serialization error: {}", err))
    }
}
