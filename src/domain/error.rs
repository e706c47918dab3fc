//! Domain Layer - Errors
//!
//! One error type shared by the stores and the controller. Variants follow
//! the failure categories of the application: auth transitions, list
//! retrieval, writes, and ownership violations.

use serde::{Deserialize, Serialize};

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DomainError {
    /// Sign-up / sign-in / sign-out / session restore failure
    Auth(String),
    /// List retrieval failure
    Fetch(String),
    /// Insert / update / delete failure
    Write(String),
    /// Cross-owner access rejected at the record store boundary
    Forbidden(String),
    /// Input rejected before any network call
    InvalidInput(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::Auth(msg) => write!(f, "Auth error: {}", msg),
            DomainError::Fetch(msg) => write!(f, "Fetch error: {}", msg),
            DomainError::Write(msg) => write!(f, "Write error: {}", msg),
            DomainError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            DomainError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}
