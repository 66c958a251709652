//! Error types shared by every collaborator implementation.

pub mod error_code;
mod storage_error;

pub use error_code::TermsErrorCode;
pub use storage_error::StorageError;
