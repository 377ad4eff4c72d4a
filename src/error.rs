//! Custom error types for minbar.
//!
//! This module provides a centralized error handling system with specific error
//! kinds for user input, static-data faults and upstream failures. The command
//! layer maps each kind to its own user-facing message, so no kind may be
//! collapsed into another.

use std::fmt;

/// Main error type for minbar operations.
#[derive(Debug)]
pub enum MinbarError {
    /// Malformed reference text (wrong separators, non-integer parts)
    BadReference(String),
    /// Surah number outside 1..=114
    InvalidSurah,
    /// Verse number exceeds the surah's actual verse count.
    /// Carries the true count so the message can state it.
    InvalidAyah { num_verses: u16 },
    /// Hadith collection key not recognised
    InvalidCollection(String),
    /// Translation key that resolves to nothing
    InvalidTranslation(String),
    /// Tafsir key that resolves to nothing
    InvalidTafsir(String),
    /// Prayer-time calculation method id outside the known set
    InvalidCalculationMethod(String),
    /// Name resolution against an empty or unmatched table
    NotFound(String),
    /// An alias table entry points to a key absent from the main table.
    /// This is a static-data bug, not a user-input problem.
    BadAlias { alias: String, target: String },
    /// Backing-store or content-fetch connectivity failure
    UpstreamUnavailable(String),
    /// Configuration errors (missing env vars, invalid values)
    Config(String),
    /// Database operation errors
    Database(String),
    /// Network/HTTP errors
    Network(String),
    /// Generic I/O errors
    Io(std::io::Error),
}

impl fmt::Display for MinbarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadReference(text) => write!(f, "Malformed reference: {}", text),
            Self::InvalidSurah => write!(f, "Surah number must be between 1 and 114"),
            Self::InvalidAyah { num_verses } => {
                write!(f, "There are only {} verses in this surah", num_verses)
            }
            Self::InvalidCollection(name) => write!(f, "Unknown hadith collection: {}", name),
            Self::InvalidTranslation(key) => write!(f, "Unknown translation: {}", key),
            Self::InvalidTafsir(key) => write!(f, "Unknown tafsir: {}", key),
            Self::InvalidCalculationMethod(id) => {
                write!(f, "Unknown calculation method: {}", id)
            }
            Self::NotFound(what) => write!(f, "Not found: {}", what),
            Self::BadAlias { alias, target } => {
                write!(f, "Alias '{}' points to missing entry '{}'", alias, target)
            }
            Self::UpstreamUnavailable(msg) => write!(f, "Upstream unavailable: {}", msg),
            Self::Config(msg) => write!(f, "Configuration error: {}", msg),
            Self::Database(msg) => write!(f, "Database error: {}", msg),
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for MinbarError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MinbarError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl MinbarError {
    /// Whether this kind is caused by user input, as opposed to a static-data
    /// bug or an upstream failure. User-input kinds are surfaced verbatim as
    /// usage hints; the rest are logged at error severity.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::BadReference(_)
                | Self::InvalidSurah
                | Self::InvalidAyah { .. }
                | Self::InvalidCollection(_)
                | Self::InvalidTranslation(_)
                | Self::InvalidTafsir(_)
                | Self::InvalidCalculationMethod(_)
                | Self::NotFound(_)
        )
    }
}

// Implement From traits for automatic error conversion
impl From<std::io::Error> for MinbarError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<rusqlite::Error> for MinbarError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<reqwest::Error> for MinbarError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            Self::UpstreamUnavailable(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for MinbarError {
    fn from(err: serde_json::Error) -> Self {
        Self::Network(format!("JSON parsing error: {}", err))
    }
}

impl From<std::env::VarError> for MinbarError {
    fn from(err: std::env::VarError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<tokio::task::JoinError> for MinbarError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Database(format!("Task join error: {}", err))
    }
}

/// Result type alias for minbar operations.
pub type Result<T> = std::result::Result<T, MinbarError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_ayah_reports_count() {
        let err = MinbarError::InvalidAyah { num_verses: 7 };
        assert!(err.to_string().contains('7'));
    }

    #[test]
    fn test_user_error_classification() {
        assert!(MinbarError::BadReference("x".into()).is_user_error());
        assert!(MinbarError::InvalidSurah.is_user_error());
        assert!(MinbarError::NotFound("dua".into()).is_user_error());

        assert!(!MinbarError::BadAlias {
            alias: "saadi".into(),
            target: "saddi".into()
        }
        .is_user_error());
        assert!(!MinbarError::UpstreamUnavailable("timeout".into()).is_user_error());
        assert!(!MinbarError::Database("locked".into()).is_user_error());
    }
}
