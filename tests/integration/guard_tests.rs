//! Enforcement guard integration tests
//!
//! The guard with real JWT validation and the built-in grant tables.

#[cfg(test)]
mod tests {
    use crate::common::assertions::assert_denial;
    use scanhub::auth::jwt::JwtHandler;
    use scanhub::auth::rbac::{Action, RbacSystem, Rule};
    use scanhub::auth::{AccessGuard, GuardOutcome, OperationRules, RuleTable};
    use scanhub::config::AuthConfig;
    use scanhub::modules;
    use scanhub::utils::error::{DenialCode, HubError};
    use std::sync::Arc;

    fn guard(config: &AuthConfig) -> (AccessGuard, Arc<JwtHandler>) {
        let rbac = RbacSystem::new();
        modules::register_builtin(&rbac).unwrap();

        let mut table = RuleTable::new();
        table
            .register("GET", "/roles", OperationRules::new(vec![Rule::new(Action::Read, "role")]))
            .register(
                "DELETE",
                "/roles/{role}",
                OperationRules::new(vec![Rule::new(Action::Delete, "role")])
                    .with_forbidden_message("Only super administrators may delete roles"),
            );

        let jwt = Arc::new(JwtHandler::new(config).unwrap());
        (AccessGuard::new(rbac, jwt.clone(), Arc::new(table), config), jwt)
    }

    fn bearer(jwt: &JwtHandler, roles: &[&str]) -> String {
        let roles = roles.iter().map(|r| r.to_string()).collect();
        format!("Bearer {}", jwt.create_access_token(7, roles).unwrap())
    }

    /// A caller whose roles grant nothing for the rule is denied
    #[tokio::test]
    async fn test_missing_privileges() {
        let (guard, jwt) = guard(&AuthConfig::default());

        let error = guard
            .authorize("GET /roles", Some(&bearer(&jwt, &["BasicUser"])))
            .await
            .unwrap_err();
        assert_denial(&error, DenialCode::MissingPrivileges);
    }

    /// The per-operation message replaces the default one
    #[tokio::test]
    async fn test_custom_forbidden_message() {
        let (guard, jwt) = guard(&AuthConfig::default());

        let error = guard
            .authorize("DELETE /roles/{role}", Some(&bearer(&jwt, &["Admin"])))
            .await
            .unwrap_err();
        match error {
            HubError::Authorization { message, .. } => {
                assert_eq!(message, "Only super administrators may delete roles")
            }
            other => panic!("Expected a denial, got {:?}", other),
        }
    }

    /// Inherited grants authorise
    #[tokio::test]
    async fn test_inherited_role_is_authorized() {
        let (guard, jwt) = guard(&AuthConfig::default());

        let outcome = guard
            .authorize("DELETE /roles/{role}", Some(&bearer(&jwt, &["SuperAdmin"])))
            .await
            .unwrap();
        match outcome {
            GuardOutcome::Authorized(call) => {
                assert_eq!(call.user.id, 7);
                assert_eq!(guard.response_attributes(&call), vec!["*"]);
            }
            GuardOutcome::Unrestricted => panic!("Expected an authorised call"),
        }
    }

    /// Operations without rules are open, even without a credential
    #[tokio::test]
    async fn test_unlisted_operation_is_unrestricted() {
        let (guard, _) = guard(&AuthConfig::default());
        let outcome = guard.authorize("GET /health", None).await.unwrap();
        assert!(matches!(outcome, GuardOutcome::Unrestricted));
    }

    /// Missing or foreign credentials fail authentication
    #[tokio::test]
    async fn test_authentication_failures() {
        let (guard, jwt) = guard(&AuthConfig::default());

        let missing = guard.authorize("GET /roles", None).await;
        assert!(matches!(missing, Err(HubError::Auth(_))));

        let token = jwt.create_access_token(7, vec!["Admin".to_string()]).unwrap();
        let wrong_scheme = guard.authorize("GET /roles", Some(&format!("Basic {}", token))).await;
        assert!(matches!(wrong_scheme, Err(HubError::Auth(_))));

        let (other_guard, _) = guard_with_secret("a-completely-different-secret-of-sufficient-length");
        let foreign = other_guard
            .authorize("GET /roles", Some(&format!("Bearer {}", token)))
            .await;
        assert!(matches!(foreign, Err(HubError::Jwt(_) | HubError::Auth(_))));
    }

    /// The credential scheme is configurable and matched case-insensitively
    #[tokio::test]
    async fn test_configured_token_scheme() {
        let config = AuthConfig {
            token_scheme: "Token".to_string(),
            ..Default::default()
        };
        let (guard, jwt) = guard(&config);
        let token = jwt.create_access_token(7, vec!["Admin".to_string()]).unwrap();

        let outcome = guard.authorize("GET /roles", Some(&format!("token {}", token))).await;
        assert!(matches!(outcome, Ok(GuardOutcome::Authorized(_))));
    }

    fn guard_with_secret(secret: &str) -> (AccessGuard, Arc<JwtHandler>) {
        let config = AuthConfig {
            jwt_secret: secret.to_string(),
            ..Default::default()
        };
        guard(&config)
    }
}
