//! Error handling integration tests
//!
//! Tests for error types, conversions, and their HTTP rendering.
//! These tests verify that errors flow correctly through the system.

#[cfg(test)]
mod tests {
    use actix_web::ResponseError;
    use actix_web::body::to_bytes;
    use scanhub::auth::rbac::{Action, GrantsDefinition, RbacSystem};
    use scanhub::utils::error::{DenialCode, ErrorResponse, HubError};

    async fn body_of(error: &HubError, request_id: Option<&str>) -> (u16, ErrorResponse) {
        let response = error.response_with_request_id(request_id.map(str::to_string));
        let status = response.status().as_u16();
        let bytes = to_bytes(response.into_body()).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    // ==================== Conversions ====================

    /// Test that serde_json errors convert via `?`
    #[test]
    fn test_json_error_conversion() {
        fn parse() -> scanhub::Result<serde_json::Value> {
            Ok(serde_json::from_str("{not json")?)
        }
        let error = parse().unwrap_err();
        assert!(matches!(error, HubError::Serialization(_)));
        assert_eq!(error.error_response().status().as_u16(), 500);
    }

    /// Test that IO errors convert via `?`
    #[test]
    fn test_io_error_conversion() {
        let error: HubError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(error, HubError::Io(_)));
    }

    /// Test that grant table errors are configuration errors
    #[test]
    fn test_grant_table_errors_are_config_errors() {
        let unknown_action = GrantsDefinition::from_yaml_str("Role:\n  thing:\n    publish:any: [id]\n");
        assert!(matches!(unknown_action, Err(HubError::Config(_))));

        let not_a_map = GrantsDefinition::from_yaml_str("- just\n- a list\n");
        assert!(not_a_map.is_err());
    }

    /// Test that unknown action names are rejected at query time
    #[test]
    fn test_unknown_action_is_rejected() {
        let rbac = RbacSystem::new();
        assert!(rbac.can_str(&["Admin"], "user", "publish").is_err());
        assert!(rbac.can_str(&["Admin"], "user", "read").is_ok());
        assert!(!rbac.can(&["Admin"], "user", Action::Read).granted);
    }

    // ==================== HTTP Rendering ====================

    /// Test the status code of every client-facing error class
    #[test]
    fn test_status_mapping() {
        let cases = [
            (HubError::auth("missing"), 401),
            (HubError::missing_privileges("no"), 403),
            (HubError::forbidden_action("no"), 403),
            (HubError::validation("bad"), 400),
            (HubError::bad_request("bad"), 400),
            (HubError::not_found("gone"), 404),
            (HubError::conflict("dup"), 409),
            (HubError::timeout("slow"), 504),
            (HubError::config("broken"), 500),
        ];
        for (error, status) in cases {
            assert_eq!(error.error_response().status().as_u16(), status, "{}", error);
        }
    }

    /// Test that denials carry their code and message
    #[tokio::test]
    async fn test_denial_body() {
        let error = HubError::forbidden_action("Not allowed to update this project");
        let (status, body) = body_of(&error, Some("req-7")).await;

        assert_eq!(status, 403);
        assert_eq!(body.error.code, DenialCode::ForbiddenAction.as_str());
        assert_eq!(body.error.message, "Not allowed to update this project");
        assert_eq!(body.error.request_id.as_deref(), Some("req-7"));
    }

    /// Test that authentication failures do not say why
    #[tokio::test]
    async fn test_authentication_body_is_generic() {
        let (status, body) = body_of(&HubError::auth("signature mismatch"), None).await;

        assert_eq!(status, 401);
        assert_eq!(body.error.code, "AUTH_ERROR");
        assert!(!body.error.message.contains("signature"));
        assert!(body.error.request_id.is_none());
    }

    /// Test that internal details never reach the client
    #[tokio::test]
    async fn test_internal_details_are_hidden() {
        let (_, body) = body_of(&HubError::config("secret path /etc/scanhub"), None).await;
        assert!(!body.error.message.contains("/etc/scanhub"));

        let (_, body) = body_of(&HubError::internal("panic at line 3"), None).await;
        assert_eq!(body.error.code, "INTERNAL_ERROR");
        assert!(!body.error.message.contains("line 3"));
    }
}
