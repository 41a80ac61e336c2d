//! Access-control query endpoints
//!
//! Diagnostic views of the merged grants database plus the pure helpers
//! (`can`, `union`, `filter`) other services call remotely.

use crate::auth::rbac::{
    Action, ExportFormat, ExportView, Permission, Rule, filter, union_attrs, union_attrs_by_resources,
    union_attrs_for,
};
use crate::auth::{OperationRules, RuleTable};
use crate::server::state::AppState;
use crate::utils::error::Result;
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

pub const GRANTS: &str = "/acl/grants";
pub const ROLES: &str = "/acl/roles";
pub const ROLE: &str = "/acl/roles/{role}";
pub const RESOURCES: &str = "/acl/resources";
pub const RESOURCE: &str = "/acl/resources/{resource}";
pub const EXISTS: &str = "/acl/exists";
pub const CAN: &str = "/acl/can";
pub const UNION: &str = "/acl/union";
pub const FILTER: &str = "/acl/filter";

/// Configure ACL routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(GRANTS, web::get().to(get_grants))
        .route(ROLES, web::get().to(list_roles))
        .route(ROLE, web::get().to(get_role))
        .route(RESOURCES, web::get().to(list_resources))
        .route(RESOURCE, web::get().to(get_resource))
        .route(EXISTS, web::post().to(exists))
        .route(CAN, web::post().to(can))
        .route(UNION, web::post().to(union))
        .route(FILTER, web::post().to(filter_value));
}

/// Reading the grants database requires `read` on `role`; the pure
/// union and filter helpers are open
pub fn register_rules(table: &mut RuleTable) {
    let read_roles = || OperationRules::new(vec![Rule::new(Action::Read, "role")]);

    for pattern in [GRANTS, ROLES, ROLE, RESOURCES, RESOURCE] {
        table.register("GET", pattern, read_roles());
    }
    table.register("POST", EXISTS, read_roles());
    table.register("POST", CAN, read_roles());
}

/// Query of `GET /acl/grants`
#[derive(Debug, Default, Deserialize)]
pub struct GrantsQuery {
    #[serde(default)]
    pub format: ExportFormat,
    #[serde(default)]
    pub by: ExportView,
}

/// Body of `POST /acl/exists`
#[derive(Debug, Default, Deserialize)]
pub struct ExistsRequest {
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub resources: Vec<String>,
}

/// Whether any of the named roles/resources is registered
#[derive(Debug, Serialize)]
pub struct ExistsResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<bool>,
}

/// Body of `POST /acl/can`
#[derive(Debug, Deserialize)]
pub struct CanRequest {
    pub roles: Vec<String>,
    pub resource: String,
    pub action: String,
}

/// Body of `POST /acl/union`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnionRequest {
    pub permissions: Vec<Permission>,
    /// Only permissions on this resource, or on any other one when prefixed with `!`
    pub resource: Option<String>,
    /// Return one attribute list per resource
    #[serde(default)]
    pub by_resource: bool,
}

/// Body of `POST /acl/filter`
#[derive(Debug, Deserialize)]
pub struct FilterRequest {
    pub data: Value,
    pub attributes: Vec<String>,
}

/// GET /acl/grants
pub async fn get_grants(state: web::Data<AppState>, query: web::Query<GrantsQuery>) -> Result<HttpResponse> {
    let snapshot = state.auth.rbac().snapshot();
    debug!("Exporting grants v{} as {:?} by {:?}", snapshot.version(), query.format, query.by);

    match query.format {
        ExportFormat::Json => Ok(HttpResponse::Ok().json(snapshot.to_value(query.by)?)),
        ExportFormat::Yaml => Ok(HttpResponse::Ok()
            .content_type("application/yaml")
            .body(snapshot.to_yaml(query.by)?)),
    }
}

/// GET /acl/roles
pub async fn list_roles(state: web::Data<AppState>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.auth.rbac().roles()))
}

/// GET /acl/roles/{role}
pub async fn get_role(state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse> {
    let role = state.auth.rbac().role(&path)?;
    Ok(HttpResponse::Ok().json(role))
}

/// GET /acl/resources
pub async fn list_resources(state: web::Data<AppState>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.auth.rbac().resources()))
}

/// GET /acl/resources/{resource}
pub async fn get_resource(state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse> {
    let grants = state.auth.rbac().resource(&path)?;
    Ok(HttpResponse::Ok().json(grants))
}

/// POST /acl/exists
pub async fn exists(state: web::Data<AppState>, body: web::Json<ExistsRequest>) -> Result<HttpResponse> {
    let rbac = state.auth.rbac();
    let response = ExistsResponse {
        roles: (!body.roles.is_empty()).then(|| rbac.has_any_role(&body.roles)),
        resources: (!body.resources.is_empty()).then(|| rbac.has_any_resource(&body.resources)),
    };
    Ok(HttpResponse::Ok().json(response))
}

/// POST /acl/can
pub async fn can(state: web::Data<AppState>, body: web::Json<CanRequest>) -> Result<HttpResponse> {
    let permission = state.auth.rbac().can_str(&body.roles, &body.resource, &body.action)?;
    Ok(HttpResponse::Ok().json(permission))
}

/// POST /acl/union
pub async fn union(body: web::Json<UnionRequest>) -> Result<HttpResponse> {
    let body = body.into_inner();
    if body.by_resource {
        return Ok(HttpResponse::Ok().json(union_attrs_by_resources(&body.permissions)));
    }

    let attributes = match body.resource.as_deref() {
        Some(resource) => union_attrs_for(&body.permissions, resource),
        None => union_attrs(&body.permissions),
    };
    Ok(HttpResponse::Ok().json(attributes))
}

/// POST /acl/filter
pub async fn filter_value(body: web::Json<FilterRequest>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(filter::filter(&body.data, &body.attributes)))
}
