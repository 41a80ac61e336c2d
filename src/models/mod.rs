//! Domain models

pub mod project;
pub mod scan;

pub use project::{NewParticipant, NewProject, Participant, Project, ProjectUpdate};
pub use scan::{NewScanConfig, ScanConfig, ScanConfigUpdate};
