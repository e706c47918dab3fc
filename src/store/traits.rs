//! Store Layer - Core Traits
//!
//! Abstract interfaces over the external session and record services.
//! Implementations can be HTTP-backed, in-memory, etc.

use async_trait::async_trait;
use tokio::sync::watch;
use uuid::Uuid;

use crate::domain::{DomainResult, Session, TodoDraft, TodoItem, TodoPatch, UserId};

/// The external authentication/session service
///
/// Identity changes are published through a watch channel: `sign_in` and
/// `sign_out` send the new value, and subscribers observe every transition.
/// Dropping the receiver is the unsubscribe.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// One-shot restore of a previously established session, if any.
    /// A failed restore is reported as an error; callers treat it the same
    /// as "no session".
    async fn restore_session(&self) -> DomainResult<Option<Session>>;

    /// Register a new account. Does not establish a session by itself.
    async fn sign_up(&self, email: &str, password: &str) -> DomainResult<()>;

    /// Authenticate. On success the new session is published to subscribers.
    async fn sign_in(&self, email: &str, password: &str) -> DomainResult<()>;

    /// Terminate the current session. On success "none" is published.
    async fn sign_out(&self) -> DomainResult<()>;

    /// Subscribe to session transitions
    fn subscribe(&self) -> watch::Receiver<Option<Session>>;
}

/// The external table of to-do rows
///
/// Ownership is explicit at this boundary: every operation names the owner,
/// and implementations must hide other owners' rows from reads and reject
/// cross-owner writes.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// All rows owned by `owner`, ordered by `created_at` descending
    async fn list(&self, owner: &UserId) -> DomainResult<Vec<TodoItem>>;

    /// Insert a new row for `owner`; the store assigns `id` and `created_at`
    /// and starts the row as not completed
    async fn insert(&self, owner: &UserId, draft: &TodoDraft) -> DomainResult<()>;

    /// Partial update of a row's mutable fields
    async fn update_fields(&self, owner: &UserId, id: Uuid, patch: &TodoPatch) -> DomainResult<()>;

    /// Remove a row
    async fn delete(&self, owner: &UserId, id: Uuid) -> DomainResult<()>;
}
