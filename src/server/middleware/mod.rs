//! HTTP middleware implementations
//!
//! - Access control (guard before the handler, projection after it)
//! - Request ID tracking

mod acl;
mod helpers;
mod request_id;


pub use acl::{AclMiddleware, AclMiddlewareService};
pub use helpers::{authenticated_user, authorized_call, credential_header, is_json, operation_id};
pub use request_id::{REQUEST_ID_HEADER, RequestIdMiddleware, RequestIdMiddlewareService};
