mod resource_assigner;

pub use resource_assigner::{validate_resource_groups, ResourceAssigner, ResourceSummary};
