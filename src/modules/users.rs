//! Users module: accounts and the base role hierarchy

pub const MODULE: &str = "users";

pub const GRANTS: &str = r#"
BasicUser:
  ownUser:
    read:own: ["*", "!password"]
    update:own: [name, email, password]
Admin:
  $extend: BasicUser
  user:
    create:any: ["*"]
    read:any: ["*", "!password"]
    update:any: ["*", "!password"]
SuperAdmin:
  $extend: Admin
  user:
    delete:any: ["*"]
"#;
