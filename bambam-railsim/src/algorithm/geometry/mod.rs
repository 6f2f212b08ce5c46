mod region_loader;
mod region_polygons;
mod region_selection;

pub use region_loader::read_region_file;
pub use region_polygons::{any_point_in_region, point_in_region, RegionPolygons};
pub use region_selection::RegionSelection;
