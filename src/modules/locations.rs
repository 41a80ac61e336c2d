//! Locations module: physical sites a project scans

pub const MODULE: &str = "locations";

pub const GRANTS: &str = r#"
BasicUser:
  location:
    create:any: [name, address, latitude, longitude, projectId]
  ownLocation:
    read:own: ["*"]
    update:own: [name, address, latitude, longitude]
    delete:own: ["*"]
  sharedLocation:
    read:own: ["*", "!address"]
Admin:
  location:
    read:any: ["*"]
    update:any: ["*", "!id", "!ownerId"]
    delete:any: ["*"]
"#;
