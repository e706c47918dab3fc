//! Domain Layer
//!
//! Contains all domain entities and core rules.
//! This layer has NO external services behind it (except serde/chrono for
//! serialization and dates).

mod error;
mod filter;
mod session;
mod todo;

pub use error::{DomainError, DomainResult};
pub use filter::Filter;
pub use session::{Session, UserId};
pub use todo::{days_until_due, Priority, TodoDraft, TodoItem, TodoPatch};
