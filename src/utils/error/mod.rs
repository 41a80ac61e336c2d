//! Error Handling utilities
//!
//! This module provides the error taxonomy and its HTTP mapping.

pub mod error;

// Re-export commonly used types and functions
pub use error::*;
