use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrmError {
    #[error("not initialized: run 'presscrm init'")]
    NotInitialized,

    #[error("invalid status: {0}")]
    InvalidStatus(String),

    #[error("invalid role: {0}")]
    InvalidRole(String),

    #[error("invalid transition from {from} to {to}: {reason}")]
    InvalidTransition {
        from: String,
        to: String,
        reason: String,
    },

    #[error("lead not found: {0}")]
    LeadNotFound(String),

    #[error("user not found: {0}")]
    UserNotFound(String),

    #[error("lead '{lead}' is not visible to user '{user}'")]
    NotVisible { lead: String, user: String },

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CrmError>;
