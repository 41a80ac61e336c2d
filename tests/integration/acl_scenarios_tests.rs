//! Access-control scenario tests
//!
//! Exercise the merged grants database through the public API only.

#[cfg(test)]
mod tests {
    use crate::common::assertions::PermissionAssertions;
    use crate::common::fixtures::{HIERARCHY_GRANTS, ROLES_GRANTS, USERS_GRANTS};
    use scanhub::auth::rbac::{
        Action, ExportFormat, ExportView, GrantsDefinition, RbacSystem, filter, union_attrs,
    };
    use scanhub::modules;
    use scanhub::utils::error::HubError;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    // ==================== End-to-end scenarios ====================

    /// A BasicUser reads its own user record through the granted attributes
    #[test]
    fn test_basic_user_reads_own_user() {
        let rbac = RbacSystem::new();
        rbac.merge_module_yaml("users", USERS_GRANTS).unwrap();

        let permission = rbac.can(&["BasicUser"], "ownUser", Action::Read);
        permission.assert_grants(&["id", "name"]);

        let filtered = permission.filter(&json!({"id": 1, "name": "A", "secret": "x"}));
        assert_eq!(filtered, json!({"id": 1, "name": "A"}));
    }

    /// Merging disjoint modules unions their roles, re-merging duplicates nothing
    #[test]
    fn test_merge_disjoint_modules() {
        let rbac = RbacSystem::new();
        rbac.merge_module_yaml("users", USERS_GRANTS).unwrap();
        rbac.merge_module_yaml("roles", ROLES_GRANTS).unwrap();
        assert_eq!(rbac.roles(), vec!["Admin", "BasicUser", "RoleManager"]);

        let changed = rbac.merge_module_yaml("roles", ROLES_GRANTS).unwrap();
        assert!(!changed);
        assert_eq!(rbac.roles(), vec!["Admin", "BasicUser", "RoleManager"]);
    }

    // ==================== Properties ====================

    /// Roles inherit every attribute of their ancestors
    #[test]
    fn test_inheritance_closure() {
        let rbac = RbacSystem::new();
        rbac.merge_module_yaml("reports", HIERARCHY_GRANTS).unwrap();

        rbac.can(&["A"], "report", Action::Read)
            .assert_grants(&["author", "id", "summary"]);
        rbac.can(&["A"], "report", Action::Update).assert_grants(&["summary"]);
        rbac.can(&["C"], "report", Action::Update).assert_denied();
    }

    /// Cycles are rejected and the previous snapshot stays published
    #[test]
    fn test_cycle_rejection() {
        let rbac = RbacSystem::new();
        rbac.merge_module_yaml("a", "A:\n  $extend: B\n  thing:\n    read:any: [id]\n")
            .unwrap();
        let version = rbac.snapshot().version();

        let result = rbac.merge_module_yaml("b", "B:\n  $extend: A\n");
        assert!(matches!(result, Err(HubError::Config(_))));
        assert_eq!(rbac.snapshot().version(), version);
        assert!(!rbac.has_role("B"));
    }

    /// Negations survive only when every contributing role asserts them
    #[test]
    fn test_wildcard_negation_unanimity() {
        let rbac = RbacSystem::new();
        rbac.merge_module_yaml(
            "docs",
            r#"
Open:
  doc:
    read:any: ["*"]
Restricted:
  doc:
    read:any: ["*", "!x"]
AlsoRestricted:
  doc:
    read:any: ["*", "!x"]
"#,
        )
        .unwrap();

        let mixed = rbac.can(&["Open", "Restricted"], "doc", Action::Read);
        assert!(mixed.allows("x"));

        let unanimous = rbac.can(&["Restricted", "AlsoRestricted"], "doc", Action::Read);
        assert!(!unanimous.allows("x"));
        assert_eq!(unanimous.attributes, vec!["*", "!x"]);
    }

    /// Unknown roles and resources resolve to an empty grant
    #[test]
    fn test_empty_grant_safety() {
        let rbac = RbacSystem::new();
        rbac.merge_module_yaml("users", USERS_GRANTS).unwrap();

        rbac.can(&["UnknownRole"], "unknownResource", Action::Read)
            .assert_denied();
    }

    /// The union of a single permission is that permission
    #[test]
    fn test_union_idempotence() {
        let rbac = RbacSystem::new();
        rbac.merge_module_yaml("users", USERS_GRANTS).unwrap();

        let permission = rbac.can(&["Admin"], "user", Action::Read);
        assert_eq!(union_attrs(std::slice::from_ref(&permission)), permission.attributes);
    }

    /// Projection never introduces keys and is the identity on all keys
    #[test]
    fn test_projection_is_pure_filter() {
        let value = json!({"id": 1, "name": "A", "file": {"name": "f", "size": 3}});

        let all = filter::filter(&value, &["id", "name", "file"]);
        assert_eq!(all, value);

        let some = filter::filter(&value, &["name", "file.size", "missing"]);
        assert_eq!(some, json!({"name": "A", "file": {"size": 3}}));
    }

    // ==================== Module registration ====================

    /// Grants files merge after the built-in modules under their file stem
    #[tokio::test]
    async fn test_grants_file_extends_builtin_modules() {
        let mut file = NamedTempFile::with_suffix(".yaml").unwrap();
        writeln!(file, "Auditor:\n  $extend: BasicUser\n  project:\n    read:any: [id, name]").unwrap();

        let rbac = RbacSystem::new();
        let mut acl = scanhub::config::AclConfig::default();
        acl.grants_files.push(file.path().to_path_buf());
        modules::register_all(&rbac, &acl).await.unwrap();

        let stem = file.path().file_stem().unwrap().to_str().unwrap().to_string();
        assert!(rbac.snapshot().modules().contains(&stem));
        rbac.can(&["Auditor"], "project", Action::Read).assert_grants(&["id", "name"]);
        assert!(rbac.can(&["Auditor"], "ownProject", Action::Read).granted);
    }

    /// A malformed grants file stops registration
    #[tokio::test]
    async fn test_malformed_grants_file_is_a_config_error() {
        let mut file = NamedTempFile::with_suffix(".yaml").unwrap();
        writeln!(file, "Auditor:\n  project:\n    publish:any: [id]").unwrap();

        let result = GrantsDefinition::from_file(file.path()).await;
        assert!(matches!(result, Err(HubError::Config(_))));
    }

    /// Exports are sorted, so identical databases export identically
    #[test]
    fn test_export_is_deterministic() {
        let first = RbacSystem::new();
        first.merge_module_yaml("users", USERS_GRANTS).unwrap();
        first.merge_module_yaml("roles", ROLES_GRANTS).unwrap();

        let second = RbacSystem::new();
        second.merge_module_yaml("roles", ROLES_GRANTS).unwrap();
        second.merge_module_yaml("users", USERS_GRANTS).unwrap();

        for view in [ExportView::Role, ExportView::Resource] {
            assert_eq!(
                first.export(view, ExportFormat::Yaml).unwrap(),
                second.export(view, ExportFormat::Yaml).unwrap()
            );
        }
    }
}
