//! Database integration tests
//!
//! Tests database operations using real in-memory SQLite database.

#[cfg(test)]
mod tests {
    use crate::common::TestDatabase;
    use crate::common::database::test_db_config;
    use scanhub::services::OwnershipLookup;
    use scanhub::storage::database::{Database, PROJECT_ENTITY, SCAN_CONFIG_ENTITY};
    use scanhub::utils::error::HubError;

    /// Test basic database connection and health check
    #[tokio::test]
    async fn test_database_health_check() {
        let db = Database::new(&test_db_config()).await;
        assert!(db.is_ok(), "Failed to create database: {:?}", db.err());

        let db = db.unwrap();
        let migrate_result = db.migrate().await;
        assert!(migrate_result.is_ok(), "Migration failed: {:?}", migrate_result.err());

        let health = db.health_check().await;
        assert!(health.is_ok(), "Health check failed: {:?}", health.err());
    }

    /// Test that migrations can be applied twice
    #[tokio::test]
    async fn test_database_migration_is_idempotent() {
        let db = TestDatabase::new().await;
        let result = db.db().migrate().await;
        assert!(result.is_ok(), "Migration failed: {:?}", result.err());
    }

    /// Test project create, update and delete
    #[tokio::test]
    async fn test_project_operations() {
        let db = TestDatabase::new().await;

        let created = db
            .db()
            .create_project(5, "Harbour survey", None)
            .await
            .unwrap();
        assert_eq!(created.owner_id, 5);
        assert!(created.description.is_none());

        let updated = db
            .db()
            .update_project(created.id, None, Some("north quay".to_string()))
            .await
            .unwrap();
        assert_eq!(updated.name, "Harbour survey");
        assert_eq!(updated.description.as_deref(), Some("north quay"));

        assert_eq!(db.db().list_projects().await.unwrap().len(), 1);
        assert!(db.db().delete_project(created.id).await.unwrap());
        assert!(!db.db().delete_project(created.id).await.unwrap());
        assert!(db.db().find_project(created.id).await.unwrap().is_none());
    }

    /// Test that updating a missing project is reported
    #[tokio::test]
    async fn test_update_missing_project() {
        let db = TestDatabase::new().await;
        let result = db.db().update_project(42, Some("x".to_string()), None).await;
        assert!(matches!(result, Err(HubError::NotFound(_))));
    }

    /// Test participant registration and listing
    #[tokio::test]
    async fn test_participant_operations() {
        let (db, project_id) = TestDatabase::seeded().await;

        let participants = db.db().list_participants(project_id).await.unwrap();
        let roles: Vec<_> = participants.iter().map(|p| (p.user_id, p.role.as_str())).collect();
        assert_eq!(roles, vec![(2, "Contributor"), (3, "Viewer")]);

        let duplicate = db.db().add_participant(project_id, 2, "Viewer").await;
        assert!(matches!(duplicate, Err(HubError::Conflict(_))));
    }

    /// Test that deleting a project removes its participations
    #[tokio::test]
    async fn test_delete_cascades_to_participants() {
        let (db, project_id) = TestDatabase::seeded().await;
        let config = db
            .db()
            .create_scan_config(project_id, 2, "Ridge", Some(5), None)
            .await
            .unwrap();

        db.db().delete_project(project_id).await.unwrap();
        assert!(db.db().list_participants(project_id).await.unwrap().is_empty());
        assert!(db.db().find_scan_config(config.id).await.unwrap().is_none());
    }

    /// Test the ownership lookup backing the resolver
    #[tokio::test]
    async fn test_ownership_lookup() {
        let (db, project_id) = TestDatabase::seeded().await;
        let lookup = db.db();

        assert_eq!(lookup.owner_of(PROJECT_ENTITY, project_id).await.unwrap(), Some(1));
        assert_eq!(lookup.owner_of(PROJECT_ENTITY, 999).await.unwrap(), None);
        assert_eq!(
            lookup.participant_role(PROJECT_ENTITY, project_id, 2).await.unwrap().as_deref(),
            Some("Contributor")
        );
        assert_eq!(lookup.participant_role(PROJECT_ENTITY, project_id, 4).await.unwrap(), None);

        let unknown = lookup.owner_of("scan", project_id).await;
        assert!(matches!(unknown, Err(HubError::NotFound(_))));
    }

    /// Scan configurations take participation from their project
    #[tokio::test]
    async fn test_scan_config_ownership_lookup() {
        let (db, project_id) = TestDatabase::seeded().await;
        let config = db
            .db()
            .create_scan_config(project_id, 2, "Ridge", Some(5), Some("vlp16".to_string()))
            .await
            .unwrap();
        let lookup = db.db();

        assert_eq!(lookup.owner_of(SCAN_CONFIG_ENTITY, config.id).await.unwrap(), Some(2));
        assert_eq!(
            lookup.participant_role(SCAN_CONFIG_ENTITY, config.id, 3).await.unwrap().as_deref(),
            Some("Viewer")
        );
        assert_eq!(lookup.participant_role(SCAN_CONFIG_ENTITY, config.id, 1).await.unwrap(), None);
        assert_eq!(lookup.participant_role(SCAN_CONFIG_ENTITY, 999, 2).await.unwrap(), None);
        let listed = db.db().list_scan_configs(project_id).await.unwrap();
        assert_eq!(listed.iter().map(|c| c.id).collect::<Vec<_>>(), vec![config.id]);
    }
}
