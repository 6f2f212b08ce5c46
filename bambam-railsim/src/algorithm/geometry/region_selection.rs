use super::RegionPolygons;

/// selects whether a trimming stage runs at all. trimming against an empty
/// polygon set removes every route, so "no trimming" is its own variant and
/// never inferred from an empty region.
#[derive(Debug, Clone)]
pub enum RegionSelection {
    PassThrough,
    Region(RegionPolygons),
}

impl std::fmt::Display for RegionSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegionSelection::PassThrough => write!(f, "pass-through"),
            RegionSelection::Region(r) => write!(f, "region with {} polygon(s)", r.len()),
        }
    }
}
