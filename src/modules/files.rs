//! Files module: uploaded scan files
//!
//! Files have no participants, so there is no shared resource.

pub const MODULE: &str = "files";

pub const GRANTS: &str = r#"
BasicUser:
  file:
    create:any: [name, mimeType, size]
  ownFile:
    read:own: ["*", "!storagePath"]
    delete:own: ["*"]
Admin:
  file:
    read:any: ["*"]
    delete:any: ["*"]
"#;
