//! # Taskboard Shared Library
//!
//! This crate contains the types and data-access code shared by the
//! taskboard API server and its integration tests.
//!
//! ## Module Organization
//!
//! - `models`: Database entities and their SQL operations
//! - `auth`: Password hashing, JWT tokens, and ownership checks
//! - `db`: Connection pool and migration runner

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the taskboard shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
