//! HTTP integration tests
//!
//! Drive the assembled application through actix's test harness.

#[cfg(test)]
mod tests {
    use crate::common::{TestApp, UserFactory};
    use actix_web::http::StatusCode;
    use actix_web::{test, web};
    use scanhub::server::HttpServer;
    use serde_json::{Value, json};

    fn keys(value: &Value) -> Vec<String> {
        let mut keys: Vec<String> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    }

    // ==================== Participation ====================

    /// Owners share projects; participants see and change only their share
    #[actix_web::test]
    async fn test_participant_flow() {
        let app = TestApp::new().await;
        let owner = app.bearer(&UserFactory::basic(1));
        let contributor = app.bearer(&UserFactory::basic(2));
        let stranger = app.bearer(&UserFactory::basic(3));
        let service = test::init_service(HttpServer::create_app(web::Data::new(app.state.clone()))).await;

        let req = test::TestRequest::post()
            .uri("/projects")
            .insert_header(("authorization", owner.clone()))
            .set_json(json!({"name": "Quarry", "description": "east face"}))
            .to_request();
        let created: Value = test::call_and_read_body_json(&service, req).await;
        let project_uri = format!("/projects/{}", created["id"]);
        let participants_uri = format!("{}/participants", project_uri);

        let req = test::TestRequest::post()
            .uri(&participants_uri)
            .insert_header(("authorization", owner.clone()))
            .set_json(json!({"userId": 2, "role": "Contributor"}))
            .to_request();
        let res = test::call_service(&service, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let participant: Value = test::read_body_json(res).await;
        assert_eq!(participant["userId"], 2);
        assert_eq!(participant["role"], "Contributor");

        // Participants only see who takes part and how
        let req = test::TestRequest::get()
            .uri(&participants_uri)
            .insert_header(("authorization", contributor.clone()))
            .to_request();
        let listed: Value = test::call_and_read_body_json(&service, req).await;
        let listed = listed.as_array().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(keys(&listed[0]), vec!["role", "userId"]);

        // Only the description is writable for participants
        let req = test::TestRequest::patch()
            .uri(&project_uri)
            .insert_header(("authorization", contributor.clone()))
            .set_json(json!({"name": "Renamed", "description": "west face"}))
            .to_request();
        let res = test::call_service(&service, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let updated: Value = test::read_body_json(res).await;
        assert_eq!(updated["name"], "Quarry");
        assert_eq!(updated["description"], "west face");

        let req = test::TestRequest::get()
            .uri("/projects")
            .insert_header(("authorization", stranger.clone()))
            .to_request();
        let visible: Value = test::call_and_read_body_json(&service, req).await;
        assert_eq!(visible, json!([]));

        let req = test::TestRequest::post()
            .uri(&participants_uri)
            .insert_header(("authorization", stranger))
            .set_json(json!({"userId": 3, "role": "Contributor"}))
            .to_request();
        let res = test::call_service(&service, req).await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    /// Viewers read a shared project but cannot change it
    #[actix_web::test]
    async fn test_viewer_patch_is_forbidden() {
        let app = TestApp::new().await;
        let viewer = app.bearer(&UserFactory::basic(2));
        let project = app.db.db().create_project(1, "Quay", Some("north".to_string())).await.unwrap();
        app.db.db().add_participant(project.id, 2, "Viewer").await.unwrap();
        let service = test::init_service(HttpServer::create_app(web::Data::new(app.state.clone()))).await;
        let project_uri = format!("/projects/{}", project.id);

        let req = test::TestRequest::get()
            .uri(&project_uri)
            .insert_header(("authorization", viewer.clone()))
            .to_request();
        let seen: Value = test::call_and_read_body_json(&service, req).await;
        assert_eq!(seen["description"], "north");

        let req = test::TestRequest::patch()
            .uri(&project_uri)
            .insert_header(("authorization", viewer))
            .set_json(json!({"description": "south"}))
            .to_request();
        let res = test::call_service(&service, req).await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["error"]["code"], "forbiddenAction");

        let stored = app.db.db().find_project(project.id).await.unwrap().unwrap();
        assert_eq!(stored.description.as_deref(), Some("north"));
    }

    /// Scan configurations are shared with contributors only
    #[actix_web::test]
    async fn test_scan_config_flow() {
        let app = TestApp::new().await;
        let owner = app.bearer(&UserFactory::basic(1));
        let contributor = app.bearer(&UserFactory::basic(2));
        let viewer = app.bearer(&UserFactory::basic(3));
        let project = app.db.db().create_project(1, "Quarry", None).await.unwrap();
        app.db.db().add_participant(project.id, 2, "Contributor").await.unwrap();
        app.db.db().add_participant(project.id, 3, "Viewer").await.unwrap();
        let service = test::init_service(HttpServer::create_app(web::Data::new(app.state.clone()))).await;
        let collection_uri = format!("/projects/{}/scan-configs", project.id);

        let req = test::TestRequest::post()
            .uri(&collection_uri)
            .insert_header(("authorization", owner.clone()))
            .set_json(json!({"name": "East face", "resolution": 4, "sensor": "vlp16"}))
            .to_request();
        let res = test::call_service(&service, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let created: Value = test::read_body_json(res).await;
        let config_uri = format!("/scan-configs/{}", created["id"]);

        let req = test::TestRequest::patch()
            .uri(&config_uri)
            .insert_header(("authorization", contributor.clone()))
            .set_json(json!({"name": "Mine now", "resolution": 2}))
            .to_request();
        let updated: Value = test::call_and_read_body_json(&service, req).await;
        assert_eq!(updated["name"], "East face");
        assert_eq!(updated["resolution"], 2);

        let req = test::TestRequest::get()
            .uri(&config_uri)
            .insert_header(("authorization", viewer.clone()))
            .to_request();
        let res = test::call_service(&service, req).await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::get()
            .uri(&collection_uri)
            .insert_header(("authorization", viewer))
            .to_request();
        let listed: Value = test::call_and_read_body_json(&service, req).await;
        assert_eq!(listed, json!([]));

        let req = test::TestRequest::delete()
            .uri(&config_uri)
            .insert_header(("authorization", contributor))
            .to_request();
        let res = test::call_service(&service, req).await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::delete()
            .uri(&config_uri)
            .insert_header(("authorization", owner))
            .to_request();
        let res = test::call_service(&service, req).await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
    }

    /// Participation roles outside the known set are rejected
    #[actix_web::test]
    async fn test_unknown_participation_role() {
        let app = TestApp::new().await;
        let owner = app.bearer(&UserFactory::basic(1));
        let project = app.db.db().create_project(1, "Pier", None).await.unwrap();
        let service = test::init_service(HttpServer::create_app(web::Data::new(app.state.clone()))).await;

        let req = test::TestRequest::post()
            .uri(&format!("/projects/{}/participants", project.id))
            .insert_header(("authorization", owner))
            .set_json(json!({"userId": 2, "role": "Overlord"}))
            .to_request();
        let res = test::call_service(&service, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    /// Malformed JSON bodies are client errors
    #[actix_web::test]
    async fn test_malformed_json_body() {
        let app = TestApp::new().await;
        let owner = app.bearer(&UserFactory::basic(1));
        let service = test::init_service(HttpServer::create_app(web::Data::new(app.state.clone()))).await;

        let req = test::TestRequest::post()
            .uri("/projects")
            .insert_header(("authorization", owner))
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"name\":")
            .to_request();
        let res = test::call_service(&service, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    // ==================== Access-control queries ====================

    /// Grants export as YAML for callers who may read roles
    #[actix_web::test]
    async fn test_grants_export_as_yaml() {
        let app = TestApp::new().await;
        let admin = app.bearer(&UserFactory::admin(1));
        let basic = app.bearer(&UserFactory::basic(2));
        let service = test::init_service(HttpServer::create_app(web::Data::new(app.state.clone()))).await;

        let req = test::TestRequest::get()
            .uri("/acl/grants?format=yaml&by=resource")
            .insert_header(("authorization", admin))
            .to_request();
        let res = test::call_service(&service, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers().get("content-type").unwrap(), "application/yaml");
        let body = test::read_body(res).await;
        let tree: serde_yaml::Value = serde_yaml::from_slice(&body).unwrap();
        assert!(tree.get("ownProject").is_some());

        let req = test::TestRequest::get()
            .uri("/acl/grants")
            .insert_header(("authorization", basic))
            .to_request();
        let res = test::call_service(&service, req).await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["error"]["code"], "missingPrivileges");
    }

    /// Denials echo the caller's request id
    #[actix_web::test]
    async fn test_denial_echoes_request_id() {
        let app = TestApp::new().await;
        let service = test::init_service(HttpServer::create_app(web::Data::new(app.state.clone()))).await;

        let req = test::TestRequest::get()
            .uri("/projects")
            .insert_header(("x-request-id", "trace-99"))
            .to_request();
        let res = test::call_service(&service, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(res.headers().get("x-request-id").unwrap(), "trace-99");
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["error"]["request_id"], "trace-99");
    }

    /// The union helper is open and merges per resource on request
    #[actix_web::test]
    async fn test_union_endpoint() {
        let app = TestApp::new().await;
        let service = test::init_service(HttpServer::create_app(web::Data::new(app.state.clone()))).await;

        let permissions = json!([
            {"roles": ["A"], "resource": "doc", "action": "read", "granted": true, "attributes": ["id"]},
            {"roles": ["B"], "resource": "doc", "action": "read", "granted": true, "attributes": ["name", "id"]}
        ]);
        let req = test::TestRequest::post()
            .uri("/acl/union")
            .set_json(json!({"permissions": permissions}))
            .to_request();
        let res = test::call_service(&service, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body, json!(["id", "name"]));
    }
}
