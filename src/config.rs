//! Configuration
//!
//! Backend selection from environment variables. When no remote backend is
//! configured the application runs against the in-memory stores.

use std::path::PathBuf;

/// Remote backend settings
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    pub url: String,
    pub anon_key: String,
    /// Where to cache the session between runs. None = no restore.
    pub session_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub supabase: Option<SupabaseConfig>,
}

impl Config {
    pub fn from_env() -> Self {
        let url = std::env::var("TASKPAD_SUPABASE_URL").ok();
        let anon_key = std::env::var("TASKPAD_SUPABASE_ANON_KEY").ok();
        let session_file = std::env::var("TASKPAD_SESSION_FILE").ok().map(PathBuf::from);

        let supabase = match (url, anon_key) {
            (Some(url), Some(anon_key)) => Some(SupabaseConfig {
                // Trailing slashes would break endpoint joins
                url: url.trim_end_matches('/').to_string(),
                anon_key,
                session_file,
            }),
            _ => None,
        };
        Self { supabase }
    }
}
