/// Project entity module
pub mod project;
/// Project participant entity module
pub mod project_participant;
/// Scan configuration entity module
pub mod scan_config;

pub use project::Entity as Project;
pub use project_participant::Entity as ProjectParticipant;
pub use scan_config::Entity as ScanConfig;
