//! Access-control configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Access-control configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AclConfig {
    /// Extra grant tables merged after the built-in modules, in order
    #[serde(default)]
    pub grants_files: Vec<PathBuf>,
}

impl AclConfig {
    /// Merge access-control configurations
    pub fn merge(mut self, other: Self) -> Self {
        for file in other.grants_files {
            if !self.grants_files.contains(&file) {
                self.grants_files.push(file);
            }
        }
        self
    }

    /// Validate access-control configuration
    pub fn validate(&self) -> Result<(), String> {
        for file in &self.grants_files {
            let has_stem = file
                .file_stem()
                .and_then(|stem| stem.to_str())
                .is_some_and(|stem| !stem.is_empty());
            if !has_stem {
                return Err(format!("Grants file '{}' has no usable file name", file.display()));
            }
        }
        Ok(())
    }
}
