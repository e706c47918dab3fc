//! Application State Controller
//!
//! Holds the in-memory view of the world (current session, to-do list,
//! active filter, selected detail item) and reconciles it with the record
//! store by refetching after every successful write.
//!
//! Error policy: every store error is caught here, logged, and turned into
//! a no-op. Nothing is optimistically applied, so there is never anything
//! to roll back.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{Filter, Session, TodoDraft, TodoItem, TodoPatch};
use crate::store::{RecordStore, SessionStore};

pub struct AppController {
    sessions: Arc<dyn SessionStore>,
    records: Arc<dyn RecordStore>,
    session: Option<Session>,
    todos: Vec<TodoItem>,
    filter: Filter,
    selected: Option<TodoItem>,
    loading: bool,
}

impl AppController {
    pub fn new(sessions: Arc<dyn SessionStore>, records: Arc<dyn RecordStore>) -> Self {
        Self {
            sessions,
            records,
            session: None,
            todos: Vec::new(),
            filter: Filter::default(),
            selected: None,
            loading: true,
        }
    }

    // ========================
    // Session lifecycle
    // ========================

    /// Restore any existing session and apply it. Until this resolves the
    /// controller reports `is_loading()` and no other state is observable.
    pub async fn init(&mut self) {
        let restored = match self.sessions.restore_session().await {
            Ok(session) => session,
            Err(e) => {
                // A failed restore is the same as no session
                warn!("session restore failed: {}", e);
                None
            }
        };
        self.apply_session(restored).await;
        self.loading = false;
    }

    /// Follow session transitions published by the session store. Subscribe
    /// after `init` so the restored value is not applied twice.
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.sessions.subscribe()
    }

    /// Replace the current identity. A concrete session triggers a full list
    /// retrieval; "none" clears the list locally with no network call.
    pub async fn apply_session(&mut self, session: Option<Session>) {
        match session {
            Some(session) => {
                info!("signed in as {}", session.email);
                self.session = Some(session);
                self.refresh().await;
            }
            None => {
                self.session = None;
                self.todos.clear();
                self.selected = None;
            }
        }
    }

    /// Returns whether the request was accepted, so the view can clear its
    /// credential fields only on success.
    pub async fn sign_up(&self, email: &str, password: &str) -> bool {
        if email.trim().is_empty() || password.is_empty() {
            return false;
        }
        match self.sessions.sign_up(email, password).await {
            Ok(()) => true,
            Err(e) => {
                warn!("sign-up failed: {}", e);
                false
            }
        }
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> bool {
        if email.trim().is_empty() || password.is_empty() {
            return false;
        }
        match self.sessions.sign_in(email, password).await {
            Ok(()) => true,
            Err(e) => {
                warn!("sign-in failed: {}", e);
                false
            }
        }
    }

    pub async fn sign_out(&self) {
        if let Err(e) = self.sessions.sign_out().await {
            warn!("sign-out failed: {}", e);
        }
    }

    // ========================
    // List retrieval
    // ========================

    /// Replace the whole list from the record store. On failure the stale
    /// list is kept rather than cleared.
    async fn refresh(&mut self) {
        let Some(session) = &self.session else { return };
        match self.records.list(&session.user_id).await {
            Ok(items) => self.todos = items,
            Err(e) => warn!("fetch failed, keeping stale list: {}", e),
        }
    }

    // ========================
    // Mutations
    // ========================

    /// Create a new item. Rejected before any network call when the trimmed
    /// text is empty. Returns whether the write succeeded, so the view can
    /// reset its form fields only on success.
    pub async fn create(&mut self, draft: TodoDraft) -> bool {
        let text = draft.text.trim().to_string();
        if text.is_empty() {
            return false;
        }
        let Some(session) = self.session.clone() else {
            return false;
        };

        let draft = TodoDraft {
            text,
            notes: draft.notes.trim().to_string(),
            ..draft
        };
        match self.records.insert(&session.user_id, &draft).await {
            Ok(()) => {
                self.refresh().await;
                true
            }
            Err(e) => {
                warn!("create failed: {}", e);
                false
            }
        }
    }

    /// Persist the negation of an item's current completion state. Silent
    /// no-op when the id is not held locally.
    pub async fn toggle_completion(&mut self, id: Uuid) {
        let Some(completed) = self.todos.iter().find(|t| t.id == id).map(|t| t.completed) else {
            return;
        };
        let Some(session) = self.session.clone() else {
            return;
        };

        match self
            .records
            .update_fields(&session.user_id, id, &TodoPatch::completed(!completed))
            .await
        {
            Ok(()) => self.refresh().await,
            Err(e) => warn!("toggle failed: {}", e),
        }
    }

    pub async fn delete(&mut self, id: Uuid) {
        let Some(session) = self.session.clone() else {
            return;
        };

        match self.records.delete(&session.user_id, id).await {
            Ok(()) => {
                if self.selected.as_ref().is_some_and(|s| s.id == id) {
                    self.selected = None;
                }
                self.refresh().await;
            }
            Err(e) => warn!("delete failed: {}", e),
        }
    }

    /// Partial update. On success the patch is merged into the held
    /// selection immediately so the detail panel reflects the edit without
    /// waiting on the refetch.
    pub async fn update(&mut self, id: Uuid, patch: TodoPatch) {
        let Some(session) = self.session.clone() else {
            return;
        };

        match self.records.update_fields(&session.user_id, id, &patch).await {
            Ok(()) => {
                if let Some(selected) = self.selected.as_mut().filter(|s| s.id == id) {
                    patch.apply_to(selected);
                }
                self.refresh().await;
            }
            Err(e) => warn!("update failed: {}", e),
        }
    }

    // ========================
    // Local state
    // ========================

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    /// The displayed list: a pure function of (list, filter)
    pub fn visible(&self) -> Vec<&TodoItem> {
        self.todos.iter().filter(|t| self.filter.matches(t)).collect()
    }

    pub fn todos(&self) -> &[TodoItem] {
        &self.todos
    }

    pub fn select(&mut self, id: Uuid) {
        self.selected = self.todos.iter().find(|t| t.id == id).cloned();
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&TodoItem> {
        self.selected.as_ref()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}
