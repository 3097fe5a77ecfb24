use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
///
/// A failure inside the per-account loop is wrapped with the account it
/// interrupted; a batch that aborts mid-run therefore names the culprit.
/// The wrap changes the message only, never the exit code.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("account '{account}': {source}")]
    Account {
        account: String,
        source: steamstash_core::Error,
    },

    #[error(transparent)]
    Core(#[from] steamstash_core::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Configuration(_) => 2,
            Self::Account { source, .. } => core_exit_code(source),
            Self::Core(error) => core_exit_code(error),
            Self::Io(_) => 10,
        }
    }
}

const fn core_exit_code(error: &steamstash_core::Error) -> i32 {
    match error {
        steamstash_core::Error::Configuration(_) => 2,
        steamstash_core::Error::Resolution { .. } => 3,
        steamstash_core::Error::Fetch { .. } => 4,
        steamstash_core::Error::CacheIo { .. } => 5,
        steamstash_core::Error::Validation(_) => 6,
    }
}
