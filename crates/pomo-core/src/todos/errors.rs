use crate::errors::PomoError;
use crate::storage::StorageError;

#[derive(Debug, thiserror::Error)]
pub enum TodoError {
    #[error("Todo text cannot be empty")]
    EmptyText,

    #[error("No todo at position {position} (list has {len} items)")]
    NotFound { position: usize, len: usize },

    #[error("Stored todo list could not be read, refusing to overwrite it: {message}")]
    Unreadable { message: String },

    #[error("Failed to save todos: {source}")]
    PersistFailed {
        #[from]
        source: StorageError,
    },
}

impl PomoError for TodoError {
    fn error_code(&self) -> &'static str {
        match self {
            TodoError::EmptyText => "TODO_EMPTY_TEXT",
            TodoError::NotFound { .. } => "TODO_NOT_FOUND",
            TodoError::Unreadable { .. } => "TODO_UNREADABLE",
            TodoError::PersistFailed { .. } => "TODO_PERSIST_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            TodoError::EmptyText | TodoError::NotFound { .. } => true,
            TodoError::Unreadable { .. } | TodoError::PersistFailed { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let error = TodoError::NotFound {
            position: 4,
            len: 2,
        };
        assert_eq!(error.to_string(), "No todo at position 4 (list has 2 items)");
        assert_eq!(error.error_code(), "TODO_NOT_FOUND");
        assert!(error.is_user_error());
    }

    #[test]
    fn test_persist_failed_is_system_error() {
        let error = TodoError::from(StorageError::Unavailable {
            message: "disk full".to_string(),
        });
        assert_eq!(error.error_code(), "TODO_PERSIST_FAILED");
        assert!(!error.is_user_error());
    }
}
