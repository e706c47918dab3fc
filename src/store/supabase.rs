//! Supabase Store Implementations
//!
//! HTTP clients for the hosted backend: GoTrue for sessions, PostgREST for
//! the `todos` table. Row-level security already scopes table calls to the
//! bearer token's user; the client filters by owner id as well so the
//! scoping is visible at this boundary.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::warn;
use uuid::Uuid;

use crate::domain::{
    DomainError, DomainResult, Priority, Session, TodoDraft, TodoItem, TodoPatch, UserId,
};
use super::traits::{RecordStore, SessionStore};

#[derive(Deserialize)]
struct AuthUser {
    id: String,
    email: Option<String>,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    user: AuthUser,
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

/// On-disk shape of a persisted session
#[derive(Serialize, Deserialize)]
struct CachedSession {
    user_id: String,
    email: String,
    access_token: String,
}

// ========================
// Session store
// ========================

/// GoTrue-backed session store
///
/// Sessions established by `sign_in` are cached in an optional local file so
/// `restore_session` can revive them across restarts; a cached token is
/// validated against the backend before being trusted.
pub struct SupabaseSessionStore {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
    session_file: Option<PathBuf>,
    tx: watch::Sender<Option<Session>>,
}

impl SupabaseSessionStore {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>, session_file: Option<PathBuf>) -> Self {
        let (tx, _) = watch::channel(None);
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            anon_key: anon_key.into(),
            session_file,
            tx,
        }
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    fn read_cached(&self) -> Option<CachedSession> {
        let path = self.session_file.as_ref()?;
        let raw = std::fs::read_to_string(path).ok()?;
        serde_json::from_str(&raw).ok()
    }

    fn persist(&self, session: &Session) {
        let Some(path) = &self.session_file else { return };
        let cached = CachedSession {
            user_id: session.user_id.as_str().to_string(),
            email: session.email.clone(),
            access_token: session.access_token.clone(),
        };
        match serde_json::to_string(&cached) {
            Ok(json) => {
                if let Err(e) = std::fs::write(path, json) {
                    warn!("failed to persist session to {}: {}", path.display(), e);
                }
            }
            Err(e) => warn!("failed to serialize session: {}", e),
        }
    }

    fn forget(&self) {
        if let Some(path) = &self.session_file {
            let _ = std::fs::remove_file(path);
        }
    }
}

#[async_trait]
impl SessionStore for SupabaseSessionStore {
    async fn restore_session(&self) -> DomainResult<Option<Session>> {
        let Some(cached) = self.read_cached() else {
            return Ok(None);
        };

        // Validate the cached token before trusting it
        let resp = self
            .http
            .get(self.auth_url("user"))
            .header("apikey", &self.anon_key)
            .bearer_auth(&cached.access_token)
            .send()
            .await
            .map_err(|e| DomainError::Auth(format!("session validation failed: {}", e)))?;

        if !resp.status().is_success() {
            // Stale or revoked token: same as no session
            self.forget();
            return Ok(None);
        }

        let user: AuthUser = resp
            .json()
            .await
            .map_err(|e| DomainError::Auth(format!("malformed user response: {}", e)))?;

        let session = Session {
            user_id: UserId::new(user.id),
            email: user.email.unwrap_or(cached.email),
            access_token: cached.access_token,
        };
        // Publish so record store calls carry the restored token
        let _ = self.tx.send(Some(session.clone()));
        Ok(Some(session))
    }

    async fn sign_up(&self, email: &str, password: &str) -> DomainResult<()> {
        let resp = self
            .http
            .post(self.auth_url("signup"))
            .header("apikey", &self.anon_key)
            .json(&Credentials { email, password })
            .send()
            .await
            .map_err(|e| DomainError::Auth(format!("sign-up request failed: {}", e)))?;

        if !resp.status().is_success() {
            return Err(DomainError::Auth(format!("sign-up rejected: {}", resp.status())));
        }
        Ok(())
    }

    async fn sign_in(&self, email: &str, password: &str) -> DomainResult<()> {
        let resp = self
            .http
            .post(self.auth_url("token?grant_type=password"))
            .header("apikey", &self.anon_key)
            .json(&Credentials { email, password })
            .send()
            .await
            .map_err(|e| DomainError::Auth(format!("sign-in request failed: {}", e)))?;

        if !resp.status().is_success() {
            return Err(DomainError::Auth(format!("sign-in rejected: {}", resp.status())));
        }

        let token: TokenResponse = resp
            .json()
            .await
            .map_err(|e| DomainError::Auth(format!("malformed token response: {}", e)))?;

        let session = Session {
            user_id: UserId::new(token.user.id),
            email: token.user.email.unwrap_or_else(|| email.to_string()),
            access_token: token.access_token,
        };
        self.persist(&session);
        let _ = self.tx.send(Some(session));
        Ok(())
    }

    async fn sign_out(&self) -> DomainResult<()> {
        let token = self.tx.borrow().as_ref().map(|s| s.access_token.clone());
        if let Some(token) = token {
            let resp = self
                .http
                .post(self.auth_url("logout"))
                .header("apikey", &self.anon_key)
                .bearer_auth(&token)
                .send()
                .await
                .map_err(|e| DomainError::Auth(format!("sign-out request failed: {}", e)))?;

            if !resp.status().is_success() {
                return Err(DomainError::Auth(format!("sign-out rejected: {}", resp.status())));
            }
        }
        self.forget();
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

#[derive(Serialize)]
struct InsertRow<'a> {
    user_id: &'a UserId,
    text: &'a str,
    completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    due_date: Option<NaiveDate>,
    priority: Priority,
    notes: &'a str,
}

/// PostgREST-backed record store for the `todos` table
pub struct SupabaseRecordStore {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
    /// Current session, fed by the session store's watch channel
    session: watch::Receiver<Option<Session>>,
}

impl SupabaseRecordStore {
    pub fn new(
        base_url: impl Into<String>,
        anon_key: impl Into<String>,
        session: watch::Receiver<Option<Session>>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            anon_key: anon_key.into(),
            session,
        }
    }

    fn table_url(&self, query: &str) -> String {
        format!("{}/rest/v1/todos{}", self.base_url, query)
    }

    fn token(&self) -> Option<String> {
        self.session.borrow().as_ref().map(|s| s.access_token.clone())
    }
}

#[async_trait]
impl RecordStore for SupabaseRecordStore {
    async fn list(&self, owner: &UserId) -> DomainResult<Vec<TodoItem>> {
        let token = self
            .token()
            .ok_or_else(|| DomainError::Fetch("no active session".to_string()))?;

        let url = self.table_url(&format!(
            "?select=*&user_id=eq.{}&order=created_at.desc",
            owner
        ));
        let resp = self
            .http
            .get(url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&token)
            .send()
            .await
            .map_err(|e| DomainError::Fetch(format!("list request failed: {}", e)))?;

        if !resp.status().is_success() {
            return Err(DomainError::Fetch(format!("list rejected: {}", resp.status())));
        }
        resp.json()
            .await
            .map_err(|e| DomainError::Fetch(format!("malformed row data: {}", e)))
    }

    async fn insert(&self, owner: &UserId, draft: &TodoDraft) -> DomainResult<()> {
        let token = self
            .token()
            .ok_or_else(|| DomainError::Write("no active session".to_string()))?;

        let row = InsertRow {
            user_id: owner,
            text: &draft.text,
            completed: false,
            due_date: draft.due_date,
            priority: draft.priority,
            notes: &draft.notes,
        };
        let resp = self
            .http
            .post(self.table_url(""))
            .header("apikey", &self.anon_key)
            .header("Prefer", "return=minimal")
            .bearer_auth(&token)
            .json(&row)
            .send()
            .await
            .map_err(|e| DomainError::Write(format!("insert request failed: {}", e)))?;

        if !resp.status().is_success() {
            return Err(DomainError::Write(format!("insert rejected: {}", resp.status())));
        }
        Ok(())
    }

    async fn update_fields(&self, owner: &UserId, id: Uuid, patch: &TodoPatch) -> DomainResult<()> {
        let token = self
            .token()
            .ok_or_else(|| DomainError::Write("no active session".to_string()))?;

        let resp = self
            .http
            .patch(self.table_url(&format!("?id=eq.{}&user_id=eq.{}", id, owner)))
            .header("apikey", &self.anon_key)
            .header("Prefer", "return=minimal")
            .bearer_auth(&token)
            .json(patch)
            .send()
            .await
            .map_err(|e| DomainError::Write(format!("update request failed: {}", e)))?;

        if !resp.status().is_success() {
            return Err(DomainError::Write(format!("update rejected: {}", resp.status())));
        }
        Ok(())
    }

    async fn delete(&self, owner: &UserId, id: Uuid) -> DomainResult<()> {
        let token = self
            .token()
            .ok_or_else(|| DomainError::Write("no active session".to_string()))?;

        let resp = self
            .http
            .delete(self.table_url(&format!("?id=eq.{}&user_id=eq.{}", id, owner)))
            .header("apikey", &self.anon_key)
            .bearer_auth(&token)
            .send()
            .await
            .map_err(|e| DomainError::Write(format!("delete request failed: {}", e)))?;

        if !resp.status().is_success() {
            return Err(DomainError::Write(format!("delete rejected: {}", resp.status())));
        }
        Ok(())
    }
}
