//! Health check endpoint

use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use actix_web::{HttpResponse, Result as ActixResult, web};
use serde::Serialize;
use std::borrow::Cow;
use tracing::{debug, error};

pub const HEALTH: &str = "/health";

/// Configure health check routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(HEALTH, web::get().to(health_check));
}

/// Health status payload
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub status: Cow<'static, str>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: Cow<'static, str>,
    /// Merged grants snapshot version
    pub grants_version: u64,
}

/// Basic health check endpoint
///
/// Reports unhealthy when the database does not answer a ping.
pub async fn health_check(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    debug!("Health check requested");

    if let Err(e) = state.storage.health_check().await {
        error!("Storage health check failed: {}", e);
        return Ok(ApiResponse::<()>::error("Storage unavailable".to_string()).to_http_response());
    }

    let health_status = HealthStatus {
        status: Cow::Borrowed("healthy"),
        timestamp: chrono::Utc::now(),
        version: Cow::Borrowed(env!("CARGO_PKG_VERSION")),
        grants_version: state.auth.rbac().snapshot().version(),
    };

    Ok(ApiResponse::success(health_status).to_http_response())
}
