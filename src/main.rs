//! Taskpad Entry Point
//!
//! Wires the configured stores to the controller and hands control to the
//! terminal view loop.

mod app;
mod config;
mod domain;
mod store;
mod view;

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use app::AppController;
use config::Config;
use store::{
    MemoryRecordStore, MemorySessionStore, RecordStore, SessionStore, SupabaseRecordStore,
    SupabaseSessionStore,
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("taskpad=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env();
    let (sessions, records): (Arc<dyn SessionStore>, Arc<dyn RecordStore>) = match config.supabase {
        Some(supabase) => {
            info!("using remote backend at {}", supabase.url);
            let sessions = Arc::new(SupabaseSessionStore::new(
                supabase.url.clone(),
                supabase.anon_key.clone(),
                supabase.session_file,
            ));
            let records = Arc::new(SupabaseRecordStore::new(
                supabase.url,
                supabase.anon_key,
                sessions.subscribe(),
            ));
            (sessions, records)
        }
        None => {
            info!("no backend configured, using in-memory stores");
            (
                Arc::new(MemorySessionStore::new()),
                Arc::new(MemoryRecordStore::new()),
            )
        }
    };

    let controller = AppController::new(sessions, records);
    view::run(controller).await;
}
