//! Application state management.
//!
//! Shared state passed to the readiness handler and used to build domain routers.

/// Shared application state.
///
/// Cloned per handler; every field is a cheap handle.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL database connection pool
    pub db: database::postgres::DatabaseConnection,
}
