//! Connection management for the catalog's PostgreSQL store.
//!
//! # Features
//!
//! - `postgres` (default) - SeaORM connection pool, migration runner and health checks
//! - `config` (default) - `core_config::FromEnv` support for [`postgres::PostgresConfig`]
//!
//! ```ignore
//! use database::postgres::{self, PostgresConfig};
//! use migration::Migrator;
//!
//! let db = postgres::connect_from_config_with_retry(PostgresConfig::from_env()?, None).await?;
//! postgres::run_migrations::<Migrator>(&db, "catalog_api").await?;
//! ```

pub mod common;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult};
