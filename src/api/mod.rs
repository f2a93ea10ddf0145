//! API module for the triage platform
//!
//! This module contains all HTTP-related functionality.

use chrono::Duration;

use crate::config::Config;
use crate::db::Database;
use crate::error::StoreError;
use crate::session::SessionStore;

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use routes::configure;

/// Application state shared by all workers.
#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    pub db: Database,
    pub sessions: SessionStore,
}

impl AppState {
    pub async fn new(config: Config) -> Result<Self, StoreError> {
        let db = Database::open(&config.storage).await?;
        let sessions = SessionStore::new(Duration::hours(config.auth.session_ttl_hours));
        Ok(Self {
            config,
            db,
            sessions,
        })
    }
}
