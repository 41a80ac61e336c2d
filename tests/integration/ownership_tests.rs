//! Ownership resolution integration tests
//!
//! Resolve global/owned/shared triplets against a real in-memory database
//! and real JWT credentials.

#[cfg(test)]
mod tests {
    use crate::common::TestDatabase;
    use crate::common::assertions::assert_denial;
    use crate::common::fixtures::{TRIPLET_GRANTS, UserFactory};
    use scanhub::auth::jwt::JwtHandler;
    use scanhub::auth::rbac::{Action, RbacSystem, ResourceTriplet};
    use scanhub::config::AuthConfig;
    use scanhub::services::{EntityAccess, OwnershipLookup, OwnershipResolver};
    use scanhub::utils::error::{DenialCode, HubError};
    use std::sync::Arc;

    const CONTRIBUTED_PROJECTS: EntityAccess = EntityAccess::new(
        "project",
        ResourceTriplet::new("project", "ownProject").with_shared("sharedProject"),
    )
    .qualifying(&["Contributor"]);

    fn resolver(db: &TestDatabase) -> (OwnershipResolver, Arc<JwtHandler>) {
        let rbac = RbacSystem::new();
        rbac.merge_module_yaml("projects", TRIPLET_GRANTS).unwrap();

        let jwt = Arc::new(JwtHandler::new(&AuthConfig::default()).unwrap());
        let lookup: Arc<dyn OwnershipLookup> = db.db_arc();
        (OwnershipResolver::new(rbac, jwt.clone(), lookup), jwt)
    }

    /// Owner sees the owned set, a contributor the shared set, others nothing
    #[tokio::test]
    async fn test_triplet_authorization() {
        let (db, project_id) = TestDatabase::seeded().await;
        let (resolver, jwt) = resolver(&db);
        let member = |id: i64| jwt.create_access_token(id, vec!["Member".to_string()]).unwrap();

        let owner = resolver
            .filter_granted_attributes_for_action(&member(1), Some(project_id), Action::Read, &CONTRIBUTED_PROJECTS)
            .await
            .unwrap();
        assert_eq!(owner, vec!["id", "name", "description", "ownerId"]);

        let contributor = resolver
            .filter_granted_attributes_for_action(&member(2), Some(project_id), Action::Read, &CONTRIBUTED_PROJECTS)
            .await
            .unwrap();
        assert_eq!(contributor, vec!["id", "name"]);

        let viewer = resolver
            .filter_granted_attributes_for_action(&member(3), Some(project_id), Action::Read, &CONTRIBUTED_PROJECTS)
            .await
            .unwrap_err();
        assert_denial(&viewer, DenialCode::ForbiddenAction);

        let stranger = resolver
            .filter_granted_attributes_for_action(&member(4), Some(project_id), Action::Read, &CONTRIBUTED_PROJECTS)
            .await
            .unwrap_err();
        assert_denial(&stranger, DenialCode::ForbiddenAction);
    }

    /// A bad credential is an authentication failure, not a denial
    #[tokio::test]
    async fn test_invalid_token_is_authentication_error() {
        let (db, project_id) = TestDatabase::seeded().await;
        let (resolver, _) = resolver(&db);

        let result = resolver
            .filter_granted_attributes_for_action("not-a-jwt", Some(project_id), Action::Read, &CONTRIBUTED_PROJECTS)
            .await;
        assert!(matches!(result, Err(HubError::Jwt(_) | HubError::Auth(_))));
    }

    /// Missing records are reported as such
    #[tokio::test]
    async fn test_missing_record_is_not_found() {
        let db = TestDatabase::new().await;
        let (resolver, _) = resolver(&db);

        let result = resolver
            .resolve_for_user(&UserFactory::with_roles(1, &["Member"]), Some(99), Action::Read, &CONTRIBUTED_PROJECTS)
            .await;
        assert!(matches!(result, Err(HubError::NotFound(_))));
    }

    /// Without a global grant nobody may create
    #[tokio::test]
    async fn test_create_needs_global_grant() {
        let db = TestDatabase::new().await;
        let (resolver, _) = resolver(&db);

        let error = resolver
            .resolve_for_user(&UserFactory::with_roles(1, &["Member"]), None, Action::Read, &CONTRIBUTED_PROJECTS)
            .await
            .unwrap_err();
        assert_denial(&error, DenialCode::ForbiddenAction);
    }
}
