//! Configuration data models
//!
//! This module defines all configuration structures used throughout the service.

#![allow(missing_docs)]

pub mod acl;
pub mod auth;
pub mod server;
pub mod service;
pub mod storage;

// Re-export all configuration types
pub use acl::*;
pub use auth::*;
pub use server::*;
pub use service::*;
pub use storage::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8000
}

/// Default JWT expiration in seconds
pub fn default_jwt_expiration() -> u64 {
    86400 // 24 hours
}

/// Default header carrying the bearer credential
pub fn default_token_header() -> String {
    "authorization".to_string()
}

/// Default credential scheme
pub fn default_token_scheme() -> String {
    "Bearer".to_string()
}

/// Default token validation timeout in milliseconds
pub fn default_validation_timeout_ms() -> u64 {
    5000
}

pub fn default_database_url() -> String {
    "sqlite::memory:".to_string()
}

pub fn default_max_connections() -> u32 {
    10
}

pub fn default_connection_timeout() -> u64 {
    5
}
