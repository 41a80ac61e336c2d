//! Services module
//!
//! Business logic sitting behind the ACL middleware: ownership resolution,
//! attribute sanitisation and the record services built on them.

pub mod ownership;
pub mod projects;
pub mod sanitizer;
pub mod scans;

pub use ownership::{EntityAccess, OwnershipLookup, OwnershipResolver, Relation, ResolvedAccess};
pub use projects::ProjectService;
pub use sanitizer::AttributeSanitizer;
pub use scans::ScanConfigService;
