//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use draftsmith_core::ports::{ContentGeneration, ProjectStore};
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn ProjectStore>,
    pub oracle: Arc<dyn ContentGeneration>,
    pub config: Arc<Config>,
}
