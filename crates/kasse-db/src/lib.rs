//! # kasse-db: Database Layer for Kasse
//!
//! This crate provides storage for the food stand register.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Kasse Data Flow                                  │
//! │                                                                         │
//! │  Till::confirm()  (kasse-core)                                         │
//! │       │  PersistenceGateway::commit_settlement(record)                  │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     kasse-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌──────────────────┐   ┌──────────────┐ │   │
//! │  │   │ SqliteGateway │    │   Repositories   │   │  Migrations  │ │   │
//! │  │   │ (gateway.rs)  │───►│ CatalogRepo      │   │  (embedded)  │ │   │
//! │  │   │ one SQLite tx │    │ TransactionLog   │   │ 001_initial  │ │   │
//! │  │   └───────┬───────┘    └────────┬─────────┘   └──────────────┘ │   │
//! │  │           └──────────► Database (pool.rs) ◄────────┘            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  kasse.db  (food_list, transaction_log)                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - food_list and transaction_log access
//! - [`gateway`] - `PersistenceGateway` implementation
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kasse_db::{Database, DbConfig, SqliteGateway};
//!
//! let db = Database::new(DbConfig::new("kasse.db")).await?;
//! let gateway = SqliteGateway::new(db.clone());
//! let items = gateway.load_catalog().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod gateway;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use gateway::SqliteGateway;
pub use pool::{Database, DbConfig, DbLocation};

// Repository re-exports for convenience
pub use repository::catalog::{CatalogRepository, FoodRow};
pub use repository::transaction_log::TransactionLogRepository;
