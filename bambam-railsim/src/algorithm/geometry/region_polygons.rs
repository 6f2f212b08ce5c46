use geo::{BoundingRect, Contains, Coord, MultiPolygon, Polygon, Rect};

/// an immutable set of region polygons, each prepared with its bounding
/// rectangle so that most containment queries are rejected without a full
/// point-in-polygon test.
#[derive(Debug, Clone, Default)]
pub struct RegionPolygons {
    polygons: Vec<PreparedPolygon>,
}

#[derive(Debug, Clone)]
struct PreparedPolygon {
    bbox: Option<Rect<f64>>,
    polygon: Polygon<f64>,
}

impl PreparedPolygon {
    fn contains(&self, coord: &Coord<f64>) -> bool {
        match &self.bbox {
            None => false,
            Some(bbox) => {
                let (min, max) = (bbox.min(), bbox.max());
                let in_bbox =
                    coord.x >= min.x && coord.x <= max.x && coord.y >= min.y && coord.y <= max.y;
                in_bbox && self.polygon.contains(coord)
            }
        }
    }
}

impl RegionPolygons {
    pub fn new(polygons: Vec<Polygon<f64>>) -> RegionPolygons {
        let polygons = polygons
            .into_iter()
            .map(|polygon| PreparedPolygon {
                bbox: polygon.bounding_rect(),
                polygon,
            })
            .collect();
        RegionPolygons { polygons }
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }
}

impl From<MultiPolygon<f64>> for RegionPolygons {
    fn from(value: MultiPolygon<f64>) -> Self {
        RegionPolygons::new(value.0)
    }
}

/// true iff the coordinate lies inside at least one polygon of the region.
/// points on a polygon boundary are not inside. an empty region contains
/// nothing.
pub fn point_in_region(coord: &Coord<f64>, region: &RegionPolygons) -> bool {
    region.polygons.iter().any(|p| p.contains(coord))
}

/// true as soon as any one of the points lies in the region.
pub fn any_point_in_region<'a, I>(points: I, region: &RegionPolygons) -> bool
where
    I: IntoIterator<Item = &'a Coord<f64>>,
{
    points.into_iter().any(|c| point_in_region(c, region))
}
