//! Errors raised by collaborator implementations (registry, entity store,
//! relation store, snapshot store).

use super::error_code::{self, TermsErrorCode};

/// Errors that can occur in the storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("Migration failed at version {version}: {message}")]
    MigrationFailed { version: u32, message: String },

    #[error("Database busy (another operation in progress)")]
    DbBusy,

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Invalid category name {name:?} in group {group}")]
    InvalidCategoryName { group: String, name: String },

    #[error("Category {name:?} already exists in group {group}")]
    DuplicateCategory { group: String, name: String },

    #[error("Category group not found: {0}")]
    GroupNotFound(String),

    #[error("Duplicate relation: entity {entity_id} already holds relation {relation_id}")]
    DuplicateRelation { entity_id: i64, relation_id: i64 },
}

impl StorageError {
    pub fn sqlite(message: impl Into<String>) -> Self {
        Self::SqliteError {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization {
            message: e.to_string(),
        }
    }
}

impl TermsErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::DbBusy => error_code::DB_BUSY,
            Self::MigrationFailed { .. } => error_code::MIGRATION_FAILED,
            Self::Serialization { .. } => error_code::SERIALIZATION_ERROR,
            Self::InvalidCategoryName { .. } => error_code::INVALID_CATEGORY_NAME,
            Self::DuplicateCategory { .. } => error_code::DUPLICATE_CATEGORY,
            Self::GroupNotFound(_) => error_code::GROUP_NOT_FOUND,
            Self::DuplicateRelation { .. } => error_code::DUPLICATE_RELATION,
            Self::SqliteError { .. } => error_code::STORAGE_ERROR,
        }
    }
}
