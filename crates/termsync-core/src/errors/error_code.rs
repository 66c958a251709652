//! Stable error codes surfaced to operator tooling.

/// Maps an error to a stable, machine-readable code.
pub trait TermsErrorCode {
    fn error_code(&self) -> &'static str;
}

pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const DB_BUSY: &str = "DB_BUSY";
pub const MIGRATION_FAILED: &str = "MIGRATION_FAILED";
pub const SERIALIZATION_ERROR: &str = "SERIALIZATION_ERROR";
pub const INVALID_CATEGORY_NAME: &str = "INVALID_CATEGORY_NAME";
pub const DUPLICATE_CATEGORY: &str = "DUPLICATE_CATEGORY";
pub const GROUP_NOT_FOUND: &str = "GROUP_NOT_FOUND";
pub const DUPLICATE_RELATION: &str = "DUPLICATE_RELATION";
pub const UNKNOWN_GROUP: &str = "UNKNOWN_GROUP";
pub const BULK_WRITE_FAILED: &str = "BULK_WRITE_FAILED";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
