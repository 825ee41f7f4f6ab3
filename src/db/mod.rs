//! Database module for SQLite operations.
//!
//! This module provides:
//! - Database initialization, migrations, and the category seed
//! - SQLite pragma configuration
//! - Repository layer for question and category operations

pub mod migrations;
pub mod repo;

pub use migrations::init_db;
pub use repo::Repository;
