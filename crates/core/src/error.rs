//! Domain error model.

use std::path::PathBuf;

use thiserror::Error;

/// Result type used across the inventory domain.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every failure the inventory core can report is one of these kinds. None of
/// them is fatal: callers render the message and carry on.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Malformed or negative numeric input (construction, decrement amount).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The product is not (or no longer) a member of the inventory.
    #[error("product not found: {0}")]
    ProductNotFound(String),

    /// A decrement would drive stock below zero. Nothing was changed.
    #[error("insufficient stock (available: {available}, requested: {requested})")]
    InsufficientStock { available: u64, requested: u64 },

    /// Undo was requested with nothing recorded in the history.
    #[error("no previous actions to undo")]
    EmptyHistory,

    /// The import source does not resolve to a readable file.
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// An I/O failure aborted an import midway.
    #[error("import failed: {0}")]
    ImportFailed(String),
}

impl DomainError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn product_not_found(what: impl Into<String>) -> Self {
        Self::ProductNotFound(what.into())
    }

    pub fn insufficient_stock(available: u64, requested: u64) -> Self {
        Self::InsufficientStock {
            available,
            requested,
        }
    }

    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound(path.into())
    }

    pub fn import_failed(msg: impl Into<String>) -> Self {
        Self::ImportFailed(msg.into())
    }
}
