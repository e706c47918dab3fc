//! In-Memory Store Implementations
//!
//! Process-local session and record stores. Used by the test suite and as
//! the fallback backend when no remote service is configured. Failures can
//! be injected to exercise the error paths.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{watch, Mutex};
use uuid::Uuid;

use crate::domain::{DomainError, DomainResult, Session, TodoDraft, TodoItem, TodoPatch, UserId};
use super::traits::{RecordStore, SessionStore};

// ========================
// Session store
// ========================

struct Account {
    password: String,
    user_id: UserId,
}

/// In-memory session store keyed by email
pub struct MemorySessionStore {
    accounts: Mutex<HashMap<String, Account>>,
    /// Session returned by `restore_session`, if seeded
    restorable: Mutex<Option<Session>>,
    tx: watch::Sender<Option<Session>>,
    fail_auth: AtomicBool,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(None);
        Self {
            accounts: Mutex::new(HashMap::new()),
            restorable: Mutex::new(None),
            tx,
            fail_auth: AtomicBool::new(false),
        }
    }

    /// Seed a session that `restore_session` will revive
    #[cfg(test)]
    pub async fn seed_session(&self, session: Session) {
        *self.restorable.lock().await = Some(session);
    }

    /// Make every auth operation fail until switched off
    #[cfg(test)]
    pub fn set_fail_auth(&self, fail: bool) {
        self.fail_auth.store(fail, Ordering::SeqCst);
    }

    fn check_available(&self) -> DomainResult<()> {
        if self.fail_auth.load(Ordering::SeqCst) {
            return Err(DomainError::Auth("session service unavailable".to_string()));
        }
        Ok(())
    }
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn restore_session(&self) -> DomainResult<Option<Session>> {
        self.check_available()?;
        Ok(self.restorable.lock().await.clone())
    }

    async fn sign_up(&self, email: &str, password: &str) -> DomainResult<()> {
        self.check_available()?;
        if email.trim().is_empty() || password.is_empty() {
            return Err(DomainError::InvalidInput("email and password required".to_string()));
        }
        let mut accounts = self.accounts.lock().await;
        if accounts.contains_key(email) {
            return Err(DomainError::Auth(format!("account already exists: {}", email)));
        }
        accounts.insert(
            email.to_string(),
            Account {
                password: password.to_string(),
                user_id: UserId::new(Uuid::new_v4().to_string()),
            },
        );
        Ok(())
    }

    async fn sign_in(&self, email: &str, password: &str) -> DomainResult<()> {
        self.check_available()?;
        let accounts = self.accounts.lock().await;
        let account = accounts
            .get(email)
            .filter(|a| a.password == password)
            .ok_or_else(|| DomainError::Auth("invalid credentials".to_string()))?;

        let session = Session {
            user_id: account.user_id.clone(),
            email: email.to_string(),
            access_token: Uuid::new_v4().to_string(),
        };
        let _ = self.tx.send(Some(session));
        Ok(())
    }

    async fn sign_out(&self) -> DomainResult<()> {
        self.check_available()?;
        let _ = self.tx.send(None);
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.tx.subscribe()
    }
}

// ========================
// Record store
// ========================

/// In-memory record store with explicit per-owner authorization
pub struct MemoryRecordStore {
    rows: Mutex<Vec<TodoItem>>,
    fail_writes: AtomicBool,
    fail_fetches: AtomicBool,
    list_calls: AtomicUsize,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            fail_writes: AtomicBool::new(false),
            fail_fetches: AtomicBool::new(false),
            list_calls: AtomicUsize::new(0),
        }
    }

    /// Make every write fail until switched off
    #[cfg(test)]
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Make every list call fail until switched off
    #[cfg(test)]
    pub fn set_fail_fetches(&self, fail: bool) {
        self.fail_fetches.store(fail, Ordering::SeqCst);
    }

    /// How many times `list` has been called (any owner)
    #[cfg(test)]
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    fn check_writable(&self) -> DomainResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::Write("record service unavailable".to_string()));
        }
        Ok(())
    }
}

impl Default for MemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn list(&self, owner: &UserId) -> DomainResult<Vec<TodoItem>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetches.load(Ordering::SeqCst) {
            return Err(DomainError::Fetch("record service unavailable".to_string()));
        }

        // Reads never surface other owners' rows
        let mut items: Vec<TodoItem> = self
            .rows
            .lock()
            .await
            .iter()
            .filter(|row| &row.user_id == owner)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    async fn insert(&self, owner: &UserId, draft: &TodoDraft) -> DomainResult<()> {
        self.check_writable()?;
        let row = TodoItem {
            id: Uuid::new_v4(),
            user_id: owner.clone(),
            text: draft.text.clone(),
            completed: false,
            created_at: Utc::now(),
            due_date: draft.due_date,
            priority: draft.priority,
            notes: draft.notes.clone(),
        };
        self.rows.lock().await.push(row);
        Ok(())
    }

    async fn update_fields(&self, owner: &UserId, id: Uuid, patch: &TodoPatch) -> DomainResult<()> {
        self.check_writable()?;
        let mut rows = self.rows.lock().await;
        let row = rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or_else(|| DomainError::Write(format!("no such row: {}", id)))?;
        if &row.user_id != owner {
            return Err(DomainError::Forbidden(format!("row {} has another owner", id)));
        }
        patch.apply_to(row);
        Ok(())
    }

    async fn delete(&self, owner: &UserId, id: Uuid) -> DomainResult<()> {
        self.check_writable()?;
        let mut rows = self.rows.lock().await;
        let row = rows
            .iter()
            .find(|row| row.id == id)
            .ok_or_else(|| DomainError::Write(format!("no such row: {}", id)))?;
        if &row.user_id != owner {
            return Err(DomainError::Forbidden(format!("row {} has another owner", id)));
        }
        rows.retain(|row| row.id != id);
        Ok(())
    }
}
