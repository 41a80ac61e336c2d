//! Integration tests for scanhub
//!
//! These tests verify the interaction between multiple components
//! and test real system behavior without mocking.

pub mod acl_scenarios_tests;
pub mod config_validation_tests;
pub mod database_tests;
pub mod error_handling_tests;
pub mod guard_tests;
pub mod http_tests;
pub mod ownership_tests;
