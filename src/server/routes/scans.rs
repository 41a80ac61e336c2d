//! Scan configuration endpoints

use crate::auth::rbac::{Action, Rule};
use crate::auth::{OperationRules, RuleTable};
use crate::modules::scans::SCAN_CONFIGS as SCAN_CONFIG_ACCESS;
use crate::server::middleware::authenticated_user;
use crate::server::state::AppState;
use crate::utils::error::Result;
use actix_web::{HttpRequest, HttpResponse, web};
use serde_json::Value;

pub const PROJECT_SCAN_CONFIGS: &str = "/projects/{id}/scan-configs";
pub const SCAN_CONFIG: &str = "/scan-configs/{id}";

/// Configure scan configuration routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource(PROJECT_SCAN_CONFIGS)
            .route(web::get().to(list_scan_configs))
            .route(web::post().to(create_scan_config)),
    )
    .service(
        web::resource(SCAN_CONFIG)
            .route(web::get().to(get_scan_config))
            .route(web::patch().to(update_scan_config))
            .route(web::delete().to(delete_scan_config)),
    );
}

pub fn register_rules(table: &mut RuleTable) {
    let scan_configs = &SCAN_CONFIG_ACCESS.triplet;

    table
        .register(
            "GET",
            PROJECT_SCAN_CONFIGS,
            OperationRules::for_triplet(scan_configs, Action::Read),
        )
        .register(
            "POST",
            PROJECT_SCAN_CONFIGS,
            OperationRules::new(vec![Rule::new(Action::Create, scan_configs.global)]).without_response_filter(),
        )
        .register("GET", SCAN_CONFIG, OperationRules::for_triplet(scan_configs, Action::Read))
        .register(
            "PATCH",
            SCAN_CONFIG,
            OperationRules::for_triplet(scan_configs, Action::Update).without_response_filter(),
        )
        .register(
            "DELETE",
            SCAN_CONFIG,
            OperationRules::for_triplet(scan_configs, Action::Delete)
                .with_forbidden_message("Only the scan config owner or an administrator may delete it"),
        );
}

/// GET /projects/{id}/scan-configs
pub async fn list_scan_configs(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let user = authenticated_user(&req)?;
    Ok(HttpResponse::Ok().json(state.scan_configs.list(&user, path.into_inner()).await?))
}

/// POST /projects/{id}/scan-configs
pub async fn create_scan_config(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<Value>,
) -> Result<HttpResponse> {
    let user = authenticated_user(&req)?;
    let config = state.scan_configs.create(&user, path.into_inner(), &body).await?;
    Ok(HttpResponse::Created().json(config))
}

/// GET /scan-configs/{id}
pub async fn get_scan_config(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let user = authenticated_user(&req)?;
    Ok(HttpResponse::Ok().json(state.scan_configs.get(&user, path.into_inner()).await?))
}

/// PATCH /scan-configs/{id}
pub async fn update_scan_config(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<Value>,
) -> Result<HttpResponse> {
    let user = authenticated_user(&req)?;
    let config = state.scan_configs.update(&user, path.into_inner(), &body).await?;
    Ok(HttpResponse::Ok().json(config))
}

/// DELETE /scan-configs/{id}
pub async fn delete_scan_config(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let user = authenticated_user(&req)?;
    state.scan_configs.delete(&user, path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
