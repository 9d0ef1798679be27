//! Products Domain
//!
//! Catalog items: create, list, fetch, replace and delete, backed by PostgreSQL.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, request validation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business rules, record validation, mapping
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + in-memory / PostgreSQL)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Record, transfer objects, status enum
//! └─────────────┘
//! ```
//!
//! Storage failures are classified in [`error`] and translated into the shared
//! error envelope; constraint names map to client messages in [`constraints`].
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{
//!     handlers,
//!     repository::InMemoryProductRepository,
//!     service::ProductService,
//! };
//!
//! let service = ProductService::new(InMemoryProductRepository::new());
//! let router = handlers::router(service);
//! ```

pub mod constraints;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod mapper;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{ProductError, ProductResult};
pub use models::{CreateProduct, Product, ProductStatus, ReadProduct, UpdateProduct};
pub use postgres::PgProductRepository;
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::ProductService;
