//! Error types for content loading and the service boundary

use thiserror::Error;

/// Result alias used by the content pipeline
pub type Result<T> = std::result::Result<T, ContentError>;

/// Errors raised while loading or serving content
#[derive(Debug, Error)]
pub enum ContentError {
    /// The caller asked for a content type that does not exist
    #[error("Invalid type parameter: {0}")]
    InvalidKind(String),

    /// No document of the requested kind carries this id
    #[error("{kind} item not found")]
    NotFound { kind: String, id: String },

    /// A single file could not be read; recovered by the store
    #[error("Failed to read {file}: {source}")]
    FileRead {
        file: String,
        #[source]
        source: std::io::Error,
    },

    /// A single file could not be turned into a document; recovered by the store
    #[error("Failed to parse {file}: {message}")]
    Parse { file: String, message: String },

    /// Anything else that went wrong while answering a request
    #[error("{0}")]
    Internal(String),
}

impl ContentError {
    pub fn not_found(kind: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            kind: kind.into(),
            id: id.to_string(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = ContentError::not_found("books", 999999);
        assert_eq!(err.to_string(), "books item not found");
    }
}
