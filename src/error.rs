//! Error types for ledgerkit

use thiserror::Error;

/// Result type alias for ledgerkit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in ledgerkit operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Malformed encoding: {0}")]
    MalformedEncoding(String),

    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    #[error("Invalid hash: {0}")]
    InvalidHash(String),

    #[error("Invalid account: {0}")]
    InvalidAccount(String),

    #[error("Invalid currency: {0}")]
    InvalidCurrency(String),
}
