mod archetype;
mod fleet_classification;
mod fleet_enricher;

pub use archetype::Archetype;
pub use fleet_classification::{ClassificationRule, FleetClassification};
pub use fleet_enricher::{vehicle_id_for, FleetEnricher, FleetSummary};
