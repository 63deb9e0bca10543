use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid event definition '{id}': {reason}")]
    InvalidEventDefinition { id: String, reason: String },

    #[error("Invalid game config: {reason}")]
    InvalidConfig { reason: String },

    #[error("Game not started")]
    NotStarted,

    #[error("Game already started")]
    AlreadyStarted,

    #[error("No eligible event on day {day}")]
    NoEligibleEvent { day: u32 },

    #[error("Cannot pick from an empty collection")]
    EmptyCollection,

    #[error("Registry not booted: {missing} missing")]
    NotBooted { missing: &'static str },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SimError {
    pub(crate) fn invalid_event(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidEventDefinition {
            id:     id.into(),
            reason: reason.into(),
        }
    }
}

pub type SimResult<T> = Result<T, SimError>;
