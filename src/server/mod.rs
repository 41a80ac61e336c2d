//! HTTP server implementation
//!
//! This module provides the HTTP server, its middleware and routing.

pub mod builder;
pub mod middleware;
pub mod routes;
#[allow(clippy::module_inception)]
pub mod server;
pub mod state;


pub use builder::{ServerBuilder, run_server};
pub use server::HttpServer;
pub use state::AppState;
