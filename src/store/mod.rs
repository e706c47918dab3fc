//! Store Layer
//!
//! Interfaces to the two external services the application consumes: the
//! session store (authentication) and the record store (to-do rows), plus
//! their implementations.

mod memory;
mod supabase;
mod traits;

#[cfg(test)]
mod tests;

pub use memory::{MemoryRecordStore, MemorySessionStore};
pub use supabase::{SupabaseRecordStore, SupabaseSessionStore};
pub use traits::{RecordStore, SessionStore};
