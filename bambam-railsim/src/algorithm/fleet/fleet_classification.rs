use super::Archetype;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationRule {
    pub prefix: String,
    pub archetype: Archetype,
}

/// ordered line name prefix rules. the first rule whose prefix starts the
/// line name wins, lines matching no rule get the fallback archetype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetClassification {
    pub rules: Vec<ClassificationRule>,
    pub fallback: Archetype,
}

impl FleetClassification {
    pub fn classify(&self, line_name: &str) -> &Archetype {
        self.rules
            .iter()
            .find(|rule| line_name.starts_with(rule.prefix.as_str()))
            .map(|rule| &rule.archetype)
            .unwrap_or(&self.fallback)
    }
}

impl Default for FleetClassification {
    /// long-distance products (IC, EC, IR) and regional products (RE, S)
    fn default() -> Self {
        let long_distance = |id: &str| ClassificationRule {
            prefix: String::from(id),
            archetype: Archetype::rail(id, 1000, 100.0, 1000.0),
        };
        let regional = |id: &str| ClassificationRule {
            prefix: String::from(id),
            archetype: Archetype::rail(id, 1000, 27.777, 300.0),
        };
        Self {
            rules: vec![
                long_distance("IC"),
                long_distance("EC"),
                long_distance("IR"),
                regional("RE"),
                regional("S"),
            ],
            fallback: Archetype::rail("other", 1000, 27.777, 300.0),
        }
    }
}
