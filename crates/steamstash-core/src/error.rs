use std::path::{Path, PathBuf};

use thiserror::Error;

/// Pipeline stage a transport or structural failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStage {
    Summaries,
    Inventory,
}

impl FetchStage {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Summaries => "player summaries",
            Self::Inventory => "inventory",
        }
    }
}

impl std::fmt::Display for FetchStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error taxonomy for the acquisition pipeline.
///
/// Nothing in this crate retries: a single failed attempt is terminal for
/// the account being loaded, so every variant carries enough context to
/// diagnose the failing stage without re-running it.
#[derive(Debug, Error)]
pub enum Error {
    /// Caller-side setup problem, such as a missing credential or an
    /// unresolvable cache location.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A vanity handle could not be turned into an account id.
    #[error("could not resolve handle '{handle}': {reason}")]
    Resolution { handle: String, reason: String },

    /// Transport failure or a structurally invalid remote response.
    #[error("{stage} fetch failed: {reason}")]
    Fetch { stage: FetchStage, reason: String },

    /// Blob store read or write failure.
    #[error("cache i/o failed for '{}': {reason}", .path.display())]
    CacheIo { path: PathBuf, reason: String },

    /// A record is missing required identity fields, or an identifier
    /// failed to parse.
    #[error("validation failed: {0}")]
    Validation(String),
}

impl Error {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn resolution(handle: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Resolution {
            handle: handle.into(),
            reason: reason.into(),
        }
    }

    pub fn fetch(stage: FetchStage, reason: impl Into<String>) -> Self {
        Self::Fetch {
            stage,
            reason: reason.into(),
        }
    }

    pub fn cache_io(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Self::CacheIo {
            path: path.as_ref().to_path_buf(),
            reason: reason.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
