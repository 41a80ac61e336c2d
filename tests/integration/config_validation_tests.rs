//! Configuration validation integration tests
//!
//! Tests for configuration validation across all config components.
//! These tests verify that configuration validates correctly and fails
//! appropriately for invalid configurations.

#[cfg(test)]
mod tests {
    use scanhub::config::{AclConfig, AuthConfig, Config, DatabaseConfig, ServerConfig};
    use scanhub::utils::error::HubError;
    use std::path::PathBuf;

    // ==================== Config Validation ====================

    /// Test that the default configuration is usable as is
    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    /// Test that a component error surfaces as a configuration error
    #[test]
    fn test_component_error_is_config_error() {
        let mut config = Config::default();
        config.service.auth.jwt_secret = "short".to_string();

        match config.validate() {
            Err(HubError::Config(message)) => assert!(message.starts_with("Auth config error")),
            other => panic!("Expected a config error, got {:?}", other),
        }
    }

    // ==================== ServerConfig Validation ====================

    /// Test that server port 0 fails validation
    #[test]
    fn test_server_config_port_zero() {
        let config = ServerConfig {
            port: 0,
            ..Default::default()
        };

        let result = config.validate();
        assert!(result.unwrap_err().contains("Port"));
    }

    /// Test that an empty host fails validation
    #[test]
    fn test_server_config_empty_host() {
        let config = ServerConfig {
            host: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    /// Test that zero workers fails validation while unset falls back to CPUs
    #[test]
    fn test_server_config_workers() {
        let zero = ServerConfig {
            workers: Some(0),
            ..Default::default()
        };
        assert!(zero.validate().is_err());

        let unset = ServerConfig::default();
        assert!(unset.validate().is_ok());
        assert!(unset.worker_count() >= 1);
    }

    /// Test the bind address
    #[test]
    fn test_server_address() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            workers: None,
        };
        assert_eq!(config.address(), "127.0.0.1:8080");
    }

    // ==================== AuthConfig Validation ====================

    /// Test that generated secrets are long enough
    #[test]
    fn test_auth_config_generated_secret() {
        let config = AuthConfig::default();
        assert!(config.jwt_secret.len() >= 32);
        assert!(config.validate().is_ok());
    }

    /// Test that short secrets fail validation
    #[test]
    fn test_auth_config_short_secret() {
        let config = AuthConfig {
            jwt_secret: "x".repeat(31),
            ..Default::default()
        };
        assert!(config.validate().unwrap_err().contains("32"));
    }

    /// Test that zero expiration and zero timeout fail validation
    #[test]
    fn test_auth_config_zero_durations() {
        let expiration = AuthConfig {
            jwt_expiration: 0,
            ..Default::default()
        };
        assert!(expiration.validate().is_err());

        let timeout = AuthConfig {
            validation_timeout_ms: 0,
            ..Default::default()
        };
        assert!(timeout.validate().is_err());
    }

    /// Test that a blank token header fails validation
    #[test]
    fn test_auth_config_blank_header() {
        let config = AuthConfig {
            token_header: "  ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    // ==================== AclConfig Validation ====================

    /// Test that grants files need a file name to become a module name
    #[test]
    fn test_acl_config_grants_file_stem() {
        let valid = AclConfig {
            grants_files: vec![PathBuf::from("config/grants/site.yaml")],
        };
        assert!(valid.validate().is_ok());

        let invalid = AclConfig {
            grants_files: vec![PathBuf::from("/")],
        };
        assert!(invalid.validate().is_err());
    }

    /// Test that merging keeps file order and drops duplicates
    #[test]
    fn test_acl_config_merge() {
        let base = AclConfig {
            grants_files: vec![PathBuf::from("a.yaml"), PathBuf::from("b.yaml")],
        };
        let other = AclConfig {
            grants_files: vec![PathBuf::from("b.yaml"), PathBuf::from("c.yaml")],
        };

        let merged = base.merge(other);
        assert_eq!(
            merged.grants_files,
            vec![PathBuf::from("a.yaml"), PathBuf::from("b.yaml"), PathBuf::from("c.yaml")]
        );
    }

    // ==================== DatabaseConfig Validation ====================

    /// Test that an empty URL fails validation
    #[test]
    fn test_database_config_empty_url() {
        let config = DatabaseConfig {
            url: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    /// Test that zero connections fails validation
    #[test]
    fn test_database_config_zero_connections() {
        let config = DatabaseConfig {
            max_connections: 0,
            ..Default::default()
        };
        assert!(config.validate().unwrap_err().contains("max_connections"));
    }

    // ==================== Serialization ====================

    /// Test that a serialized configuration parses back to the same values
    #[test]
    fn test_yaml_roundtrip_preserves_values() {
        let mut config = Config::default();
        config.service.server.port = 9100;
        config.service.acl.grants_files.push(PathBuf::from("site.yaml"));

        let yaml = config.to_yaml().unwrap();
        let parsed: scanhub::config::ServiceConfig = serde_yaml::from_str(&yaml).unwrap();

        assert_eq!(parsed.server.port, 9100);
        assert_eq!(parsed.auth.jwt_secret, config.service.auth.jwt_secret);
        assert_eq!(parsed.acl.grants_files, vec![PathBuf::from("site.yaml")]);
    }
}
