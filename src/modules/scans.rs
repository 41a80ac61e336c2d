//! Scans module: scan configurations and points of interest
//!
//! Shared access to scan data requires an active contribution to the
//! project, not just a viewer seat.

use crate::auth::rbac::ResourceTriplet;
use crate::services::ownership::EntityAccess;

use super::projects::CONTRIBUTOR;

pub const MODULE: &str = "scans";

/// Participants of the parent project share a scan configuration
pub const SCAN_CONFIGS: EntityAccess = EntityAccess::new(
    "scanConfig",
    ResourceTriplet::new("scanConfig", "ownScanConfig").with_shared("sharedScanConfig"),
)
.qualifying(&[CONTRIBUTOR]);

pub const GRANTS: &str = r#"
BasicUser:
  scanConfig:
    create:any: [name, resolution, sensor]
  ownScanConfig:
    read:own: ["*"]
    update:own: [name, resolution, sensor]
    delete:own: ["*"]
  sharedScanConfig:
    read:own: ["*"]
    update:own: [resolution, sensor]
  pointOfInterest:
    create:any: [label, position, scanConfigId]
  ownPointOfInterest:
    read:own: ["*"]
    update:own: [label, position]
    delete:own: ["*"]
  sharedPointOfInterest:
    read:own: ["*"]
    create:own: [label, position]
Admin:
  scanConfig:
    read:any: ["*"]
    delete:any: ["*"]
  pointOfInterest:
    read:any: ["*"]
    delete:any: ["*"]
"#;
