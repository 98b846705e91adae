//! Server shared state
//!
//! Holds configuration and the lookup session shared by all handlers.

use crate::config::Config;
use crate::error::Result;
use crate::lookup::DefaultSession;
use std::time::Instant;

/// Shared state for the HTTP server
pub struct AppState {
    /// Configuration
    pub config: Config,

    /// Lookup session (current coordinates and flags)
    pub session: DefaultSession,

    started: Instant,
}

impl AppState {
    /// Create new application state
    pub fn new(config: Config) -> Result<Self> {
        let session = DefaultSession::from_config(&config)?;
        Ok(Self {
            config,
            session,
            started: Instant::now(),
        })
    }

    /// Seconds since the state was created
    pub fn uptime_secs(&self) -> u64 {
        self.started.elapsed().as_secs()
    }
}
