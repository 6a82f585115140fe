use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("No home directory")]
    NoHomeDir,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Task join error: {0}")]
    TaskJoin(String),

    #[error("Chores not finished after {after:?}: {chores}")]
    ChoresTimedOut {
        chores: String,
        after: std::time::Duration,
    },

    #[error("Chore '{chore}' failed: {reason}")]
    ChoreFailed { chore: String, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
