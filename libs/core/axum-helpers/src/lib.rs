//! # Axum Helpers
//!
//! Shared HTTP plumbing for the catalog services.
//!
//! - **[`errors`]**: the error envelope and the `AppError` classification
//! - **[`extractors`]**: `IdPath` and `ValidatedJson`, rejecting with the envelope
//! - **[`http`]**: CORS, security headers, streamed JSON arrays
//! - **[`server`]**: router assembly, health endpoints, graceful shutdown

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use errors::{AppError, ErrorCode, ErrorResponse, flatten_validation_errors};
pub use extractors::{IdPath, ValidatedJson};
pub use http::{JsonArrayStream, security_headers};
pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks,
};
