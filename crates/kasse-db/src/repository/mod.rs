//! # Repository Module
//!
//! Database repository implementations for Kasse.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  SqliteGateway / seed binary                                           │
//! │       │                                                                 │
//! │       │  db.catalog().increment_sold("SP", 2)                          │
//! │       ▼                                                                 │
//! │  CatalogRepository                TransactionLogRepository             │
//! │  ├── list()                       ├── ensure_code_columns(codes)       │
//! │  ├── read_sold_count(code)        ├── append(record)                   │
//! │  ├── increment_sold(code, by)     ├── count()                          │
//! │  └── upsert(name, code, price)    └── latest(codes)                    │
//! │       │                                  │                              │
//! │       └──────────── SQL ─────────────────┘                              │
//! │                      ▼                                                  │
//! │               SQLite Database                                          │
//! │                                                                         │
//! │  Each repository also exposes `*_on(conn, ..)` functions so several    │
//! │  operations can share one transaction.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`CatalogRepository`](catalog::CatalogRepository) - food_list rows and sold counters
//! - [`TransactionLogRepository`](transaction_log::TransactionLogRepository) - settled sales

pub mod catalog;
pub mod transaction_log;
