//! SQLite storage implementation for the nestegg savings engine.
//!
//! This crate provides all database-related functionality using Diesel ORM
//! with SQLite. It implements the repository traits defined in
//! `nestegg-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for goals, contributions, and rules
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies
//! exist. Everything else is database-agnostic and works with the core
//! traits. Reads go straight to the connection pool; every write is routed
//! through a single writer actor, which serializes mutations and runs each
//! one inside an immediate transaction.

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod contributions;
pub mod goals;
pub mod rules;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, get_db_path, init, run_migrations, spawn_writer, DbConnection,
    DbPool, WriteHandle,
};

// Re-export storage errors
pub use errors::StorageError;

// Re-export from nestegg-core for convenience
pub use nestegg_core::errors::{DatabaseError, Error, Result};
