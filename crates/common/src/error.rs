use thiserror::Error;

/// Crate-wide result type for apps subsystem operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Typed errors shared by expansion, provisioning, and linking.
///
/// The variants form the full failure taxonomy of the subsystem; callers
/// are expected to match on them rather than parse messages.
#[derive(Debug, Error)]
pub enum Error {
    /// Input failed validation before any work was attempted.
    #[error("invalid input: {message}")]
    Validation { message: String },

    /// A referenced entity or record does not exist.
    #[error("not found: {message}")]
    NotFound { message: String },

    /// The record already exists and the caller did not ask to overwrite.
    #[error("already exists: {message}")]
    AlreadyExists { message: String },

    /// The operation collides with state owned by someone else.
    #[error("conflict: {message}")]
    Conflict { message: String },

    /// A platform or store call failed, timed out, or returned non-success.
    #[error("upstream failure: {message}")]
    Upstream { message: String },

    /// JSON (de)serialization failed.
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    #[must_use]
    pub fn validation(message: impl std::fmt::Display) -> Self {
        Self::Validation {
            message: message.to_string(),
        }
    }

    #[must_use]
    pub fn not_found(message: impl std::fmt::Display) -> Self {
        Self::NotFound {
            message: message.to_string(),
        }
    }

    #[must_use]
    pub fn already_exists(message: impl std::fmt::Display) -> Self {
        Self::AlreadyExists {
            message: message.to_string(),
        }
    }

    #[must_use]
    pub fn conflict(message: impl std::fmt::Display) -> Self {
        Self::Conflict {
            message: message.to_string(),
        }
    }

    #[must_use]
    pub fn upstream(message: impl std::fmt::Display) -> Self {
        Self::Upstream {
            message: message.to_string(),
        }
    }

    /// Prefix `context` onto the message while keeping the variant, so the
    /// failure kind survives wrapping. Pass-through variants (`Serialization`,
    /// `Io`) are returned unchanged.
    #[must_use]
    pub fn context(self, context: impl std::fmt::Display) -> Self {
        match self {
            Self::Validation { message } => Self::Validation {
                message: format!("{context}: {message}"),
            },
            Self::NotFound { message } => Self::NotFound {
                message: format!("{context}: {message}"),
            },
            Self::AlreadyExists { message } => Self::AlreadyExists {
                message: format!("{context}: {message}"),
            },
            Self::Conflict { message } => Self::Conflict {
                message: format!("{context}: {message}"),
            },
            Self::Upstream { message } => Self::Upstream {
                message: format!("{context}: {message}"),
            },
            other => other,
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
