//! SQLite storage implementation for Pointfolio.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the state port defined in `pointfolio-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - The single writer actor that runs every write in one transaction
//! - The key-value state repository
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//! The core crate is database-agnostic and works with traits.
//!
//! ```text
//!          core (domain)
//!                │
//!                ▼
//!     storage-sqlite (this crate)
//!                │
//!                ▼
//!            SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod state;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, get_db_path, init, run_migrations, spawn_writer, DbConnection,
    DbPool, WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use state::StateRepository;

// Re-export from pointfolio-core for convenience
pub use pointfolio_core::errors::{DatabaseError, Error, Result};
