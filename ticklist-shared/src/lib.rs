//! # Ticklist Shared Library
//!
//! Shared types and logic used by the Ticklist web server:
//!
//! - `models`: database models (`User`, `Task`) and their queries
//! - `auth`: password hashing and session token handling
//! - `db`: connection pool and migration runner

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the Ticklist shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
