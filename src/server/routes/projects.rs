//! Project endpoints
//!
//! Reads are projected twice: per record by the service and per operation by
//! the ACL middleware. Mutations project their own output.

use crate::auth::rbac::{Action, Rule};
use crate::auth::{OperationRules, RuleTable};
use crate::modules::projects::{PARTICIPANTS as PARTICIPANT_ACCESS, PROJECTS as PROJECT_ACCESS};
use crate::server::middleware::authenticated_user;
use crate::server::state::AppState;
use crate::utils::error::Result;
use actix_web::{HttpRequest, HttpResponse, web};
use serde_json::Value;

pub const PROJECTS: &str = "/projects";
pub const PROJECT: &str = "/projects/{id}";
pub const PARTICIPANTS: &str = "/projects/{id}/participants";

/// Configure project routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource(PROJECTS)
            .route(web::get().to(list_projects))
            .route(web::post().to(create_project)),
    )
    .service(
        web::resource(PROJECT)
            .route(web::get().to(get_project))
            .route(web::patch().to(update_project))
            .route(web::delete().to(delete_project)),
    )
    .service(
        web::resource(PARTICIPANTS)
            .route(web::get().to(list_participants))
            .route(web::post().to(add_participant)),
    );
}

pub fn register_rules(table: &mut RuleTable) {
    let projects = &PROJECT_ACCESS.triplet;
    let participants = &PARTICIPANT_ACCESS.triplet;

    table
        .register("GET", PROJECTS, OperationRules::for_triplet(projects, Action::Read))
        .register(
            "POST",
            PROJECTS,
            OperationRules::new(vec![Rule::new(Action::Create, projects.global)]).without_response_filter(),
        )
        .register("GET", PROJECT, OperationRules::for_triplet(projects, Action::Read))
        .register(
            "PATCH",
            PROJECT,
            OperationRules::for_triplet(projects, Action::Update).without_response_filter(),
        )
        .register(
            "DELETE",
            PROJECT,
            OperationRules::for_triplet(projects, Action::Delete)
                .with_forbidden_message("Only the project owner or an administrator may delete a project"),
        )
        .register("GET", PARTICIPANTS, OperationRules::for_triplet(participants, Action::Read))
        .register(
            "POST",
            PARTICIPANTS,
            OperationRules::for_triplet(participants, Action::Create).without_response_filter(),
        );
}

/// GET /projects
pub async fn list_projects(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse> {
    let user = authenticated_user(&req)?;
    Ok(HttpResponse::Ok().json(state.projects.list(&user).await?))
}

/// POST /projects
pub async fn create_project(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<Value>,
) -> Result<HttpResponse> {
    let user = authenticated_user(&req)?;
    Ok(HttpResponse::Created().json(state.projects.create(&user, &body).await?))
}

/// GET /projects/{id}
pub async fn get_project(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let user = authenticated_user(&req)?;
    Ok(HttpResponse::Ok().json(state.projects.get(&user, path.into_inner()).await?))
}

/// PATCH /projects/{id}
pub async fn update_project(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<Value>,
) -> Result<HttpResponse> {
    let user = authenticated_user(&req)?;
    let project = state.projects.update(&user, path.into_inner(), &body).await?;
    Ok(HttpResponse::Ok().json(project))
}

/// DELETE /projects/{id}
pub async fn delete_project(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let user = authenticated_user(&req)?;
    state.projects.delete(&user, path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// GET /projects/{id}/participants
pub async fn list_participants(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let user = authenticated_user(&req)?;
    Ok(HttpResponse::Ok().json(state.projects.participants(&user, path.into_inner()).await?))
}

/// POST /projects/{id}/participants
pub async fn add_participant(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<Value>,
) -> Result<HttpResponse> {
    let user = authenticated_user(&req)?;
    let participant = state.projects.add_participant(&user, path.into_inner(), &body).await?;
    Ok(HttpResponse::Created().json(participant))
}
