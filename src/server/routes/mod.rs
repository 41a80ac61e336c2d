//! HTTP route modules
//!
//! Each module configures its routes and registers the access rules of the
//! operations it serves. Rules are keyed by the same route patterns the
//! routes are mounted under.

pub mod acl;
pub mod health;
pub mod projects;
pub mod scans;

use crate::auth::RuleTable;
use actix_web::{HttpResponse, web};

/// Standard API response structure
#[derive(Debug, Clone, serde::Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,
    /// Response data (if successful)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error message (if failed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T>
where
    T: serde::Serialize,
{
    /// Create a successful response
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(message: String) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message),
        }
    }

    /// Convert the API response to an HTTP response
    ///
    /// Returns HTTP 200 for successful responses and HTTP 503 otherwise
    pub fn to_http_response(&self) -> HttpResponse {
        if self.success {
            HttpResponse::Ok().json(self)
        } else {
            HttpResponse::ServiceUnavailable().json(self)
        }
    }
}

/// Mount every route
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    health::configure_routes(cfg);
    acl::configure_routes(cfg);
    projects::configure_routes(cfg);
    scans::configure_routes(cfg);
}

/// Access rules of every guarded operation
pub fn rule_table() -> RuleTable {
    let mut table = RuleTable::new();
    acl::register_rules(&mut table);
    projects::register_rules(&mut table);
    scans::register_rules(&mut table);
    table
}
