//! # OpenGallery Shared Library
//!
//! Storage and domain logic for the OpenGallery web server.
//!
//! ## Module Organization
//!
//! - `db`: Connection pool and embedded migrations
//! - `models`: Database models and the artist approval workflow
//! - `auth`: Password hashing, session tokens and roles
//! - `pagination`: Page windows and search patterns for listings
//! - `validation`: Field rules shared by forms and models

pub mod auth;
pub mod db;
pub mod models;
pub mod pagination;
pub mod validation;

/// Current version of the OpenGallery shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
