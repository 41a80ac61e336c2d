//! JWT token handling
//!
//! This module provides access token creation and verification, and the
//! JWT-backed [`TokenValidator`](crate::auth::TokenValidator).

mod handler;
pub mod types;


pub use types::{Claims, JwtHandler};
