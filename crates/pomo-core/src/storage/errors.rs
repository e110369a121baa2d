use crate::errors::PomoError;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Invalid storage key '{key}': only letters, digits, '-' and '_' are allowed")]
    InvalidKey { key: String },

    #[error("IO error for key '{key}': {source}")]
    IoError {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize value for key '{key}': {message}")]
    SerializationFailed { key: String, message: String },

    #[error("Stored value for key '{key}' is corrupted: {message}")]
    Corrupted { key: String, message: String },

    #[error("Storage backend unavailable: {message}")]
    Unavailable { message: String },
}

impl PomoError for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            StorageError::InvalidKey { .. } => "STORAGE_INVALID_KEY",
            StorageError::IoError { .. } => "STORAGE_IO_ERROR",
            StorageError::SerializationFailed { .. } => "STORAGE_SERIALIZATION_FAILED",
            StorageError::Corrupted { .. } => "STORAGE_CORRUPTED",
            StorageError::Unavailable { .. } => "STORAGE_UNAVAILABLE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corrupted_display() {
        let error = StorageError::Corrupted {
            key: "todos".to_string(),
            message: "expected value at line 1 column 1".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Stored value for key 'todos' is corrupted: expected value at line 1 column 1"
        );
        assert_eq!(error.error_code(), "STORAGE_CORRUPTED");
        assert!(!error.is_user_error());
    }

    #[test]
    fn test_invalid_key_display() {
        let error = StorageError::InvalidKey {
            key: "../etc".to_string(),
        };
        assert!(error.to_string().contains("'../etc'"));
        assert_eq!(error.error_code(), "STORAGE_INVALID_KEY");
    }
}
