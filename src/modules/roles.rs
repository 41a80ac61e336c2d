//! Roles module

pub const MODULE: &str = "roles";

pub const GRANTS: &str = r#"
Admin:
  role:
    read:any: ["*"]
SuperAdmin:
  role:
    create:any: ["*"]
    update:any: ["*"]
    delete:any: ["*"]
"#;
