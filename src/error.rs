use thiserror::Error;

#[derive(Error, Debug)]
pub enum GhCdError {
    #[error("{0}")]
    Usage(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("could not clone repository {0}")]
    CloneFailed(String),

    #[error("repository {name} not created: {reason}")]
    CreateFailed { name: String, reason: String },

    #[error("could not launch {command}: {source}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl GhCdError {
    /// Process exit code used when this error terminates the run.
    pub fn exit_code(&self) -> u8 {
        match self {
            GhCdError::Usage(_) => 2,
            GhCdError::Launch { .. } => 127,
            _ => 1,
        }
    }
}
