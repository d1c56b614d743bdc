//! Error types for whosnext.
//!
//! This module defines the centralized error type [`WhosNextError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! Only genuine failures live here. Advisory conditions such as drawing from an
//! empty roster or an exhausted pool are ordinary outcomes, not errors.

use thiserror::Error;

/// The main error type for whosnext operations.
///
/// # Examples
///
/// ```
/// use whosnext::WhosNextError;
///
/// fn read_store() -> Result<(), WhosNextError> {
///     Err(WhosNextError::Storage("store file is locked".to_string()))
/// }
///
/// assert!(read_store().is_err());
/// ```
#[derive(Debug, Error)]
pub enum WhosNextError {
    /// Storage operation failed.
    ///
    /// Occurs when the key-value store cannot be serialized or written. The
    /// string contains a description of what went wrong.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations. Automatically converts
    /// from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or missing.
    ///
    /// Occurs when a configuration file cannot be parsed or a value is malformed.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for whosnext operations.
pub type Result<T> = std::result::Result<T, WhosNextError>;
