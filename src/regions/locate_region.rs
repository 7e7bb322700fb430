use crate::aqhi::LatLon;
use crate::types::region::Region;
use haversine::{distance, Location as HaversineLocation, Units};
use ordered_float::OrderedFloat;
use rstar::{PointDistance, RTree, RTreeObject, AABB};

// Relative slack on squared chord length, wide enough to cover rounding in the
// great-circle distance of near-tied regions.
const CHORD_TOLERANCE: f64 = 1e-9;

/// Great-circle distance between two points in kilometres.
pub fn distance_km(from: LatLon, to: LatLon) -> f64 {
    distance(
        HaversineLocation {
            latitude: from.0,
            longitude: from.1,
        },
        HaversineLocation {
            latitude: to.0,
            longitude: to.1,
        },
        Units::Kilometers,
    )
}

/// Picks the region closest to a point by great-circle distance. On exact ties the
/// region that comes first in catalog order wins.
///
/// Implemented as an exact linear scan on slices of regions, and as an R-Tree lookup
/// on [`RegionIndex`] for callers that query the same catalog many times.
pub trait NearestRegion {
    fn nearest(&self, location: LatLon) -> Option<&Region>;
}

impl NearestRegion for [Region] {
    fn nearest(&self, location: LatLon) -> Option<&Region> {
        self.iter()
            .min_by_key(|region| OrderedFloat(distance_km(location, region.location())))
    }
}

/// Position of a point on the unit sphere.
fn unit_vector(location: LatLon) -> [f64; 3] {
    let (lat, lon) = (location.0.to_radians(), location.1.to_radians());
    [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()]
}

/// A region stored with its position on the unit sphere and its place in the catalog.
#[derive(Debug, Clone)]
struct IndexedRegion {
    point: [f64; 3],
    position: usize,
    region: Region,
}

impl RTreeObject for IndexedRegion {
    type Envelope = AABB<[f64; 3]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for IndexedRegion {
    /// Squared chord length through the sphere, which orders points the same way as
    /// great-circle distance does.
    fn distance_2(&self, point: &[f64; 3]) -> f64 {
        self.point
            .iter()
            .zip(point)
            .map(|(a, b)| (a - b) * (a - b))
            .sum()
    }
}

/// Regions bulk loaded into an R-Tree over their positions on the unit sphere.
///
/// Gives the same answer as the linear scan, including across the antimeridian and
/// near the poles.
#[derive(Debug, Clone)]
pub struct RegionIndex {
    rtree: RTree<IndexedRegion>,
}

impl RegionIndex {
    pub fn new(regions: Vec<Region>) -> Self {
        let indexed = regions
            .into_iter()
            .enumerate()
            .map(|(position, region)| IndexedRegion {
                point: unit_vector(region.location()),
                position,
                region,
            })
            .collect();
        Self {
            rtree: RTree::bulk_load(indexed),
        }
    }
}

impl NearestRegion for RegionIndex {
    fn nearest(&self, location: LatLon) -> Option<&Region> {
        let mut candidates = self
            .rtree
            .nearest_neighbor_iter_with_distance_2(&unit_vector(location));
        let (first, best) = candidates.next()?;
        let cutoff = best * (1.0 + CHORD_TOLERANCE) + f64::EPSILON;

        std::iter::once(first)
            .chain(
                candidates
                    .take_while(|(_, chord_2)| *chord_2 <= cutoff)
                    .map(|(candidate, _)| candidate),
            )
            .min_by_key(|candidate| {
                (
                    OrderedFloat(distance_km(location, candidate.region.location())),
                    candidate.position,
                )
            })
            .map(|candidate| &candidate.region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn region(cgndb: &str, latitude: f64, longitude: f64) -> Region {
        Region {
            abbreviation: "zone".to_string(),
            zone_name: "Zone".to_string(),
            region_name: format!("Region {cgndb}"),
            cgndb: cgndb.to_string(),
            latitude,
            longitude,
            extra: BTreeMap::new(),
        }
    }

    fn fixture() -> Vec<Region> {
        vec![
            region("FAFFD", 43.6529, -79.3849), // Toronto
            region("FCWOV", 45.4215, -75.6972), // Ottawa
            region("FEBSF", 45.5017, -73.5673), // Montreal
        ]
    }

    #[test]
    fn test_nearest_known_region() {
        let regions = fixture();
        // Kingston, ON is closer to Ottawa than to Toronto or Montreal.
        let closest = regions.as_slice().nearest(LatLon(44.2312, -76.4860)).unwrap();
        assert_eq!(closest.cgndb, "FCWOV");
        // Laval sits right next to Montreal.
        let closest = regions.as_slice().nearest(LatLon(45.6066, -73.7124)).unwrap();
        assert_eq!(closest.cgndb, "FEBSF");
    }

    #[test]
    fn test_nearest_empty() {
        let regions: Vec<Region> = Vec::new();
        assert!(regions.as_slice().nearest(LatLon(0.0, 0.0)).is_none());
        assert!(RegionIndex::new(regions).nearest(LatLon(0.0, 0.0)).is_none());
    }

    #[test]
    fn test_tie_picks_first_in_catalog_order() {
        let regions = vec![
            region("WEST", 0.0, -1.0),
            region("EAST", 0.0, 1.0),
            region("WEST2", 0.0, -1.0),
        ];
        let closest = regions.as_slice().nearest(LatLon(0.0, 0.0)).unwrap();
        assert_eq!(closest.cgndb, "WEST");

        let index = RegionIndex::new(regions);
        let closest = index.nearest(LatLon(0.0, 0.0)).unwrap();
        assert_eq!(closest.cgndb, "WEST");
    }

    #[test]
    fn test_index_across_antimeridian() {
        let mut regions: Vec<Region> = (0..25)
            .map(|i| region(&format!("FAR{i}"), 50.0, 170.0 - f64::from(i) * 0.1))
            .collect();
        regions.push(region("NEAR", 50.0, -179.9));
        let index = RegionIndex::new(regions.clone());

        let query = LatLon(50.0, 179.9);
        assert_eq!(regions.as_slice().nearest(query).unwrap().cgndb, "NEAR");
        assert_eq!(index.nearest(query).unwrap().cgndb, "NEAR");
    }

    #[test]
    fn test_index_agrees_with_linear_scan_at_high_latitude() {
        let regions: Vec<Region> = (0..12)
            .flat_map(|i| {
                (0..36).map(move |j| {
                    region(
                        &format!("A{i}_{j}"),
                        60.0 + f64::from(i) * 2.5,
                        -180.0 + f64::from(j) * 10.0,
                    )
                })
            })
            .collect();
        let index = RegionIndex::new(regions.clone());
        for query in [
            LatLon(89.5, 0.0),
            LatLon(82.5, 175.0),
            LatLon(78.1, -179.95),
            LatLon(61.2, 3.3),
            LatLon(70.0, -65.0),
        ] {
            assert_eq!(
                index.nearest(query).map(|r| &r.cgndb),
                regions.as_slice().nearest(query).map(|r| &r.cgndb),
                "index and scan disagree for {query:?}"
            );
        }
    }

    #[test]
    fn test_nearest_is_exact_minimum() {
        let regions: Vec<Region> = (0..15)
            .flat_map(|i| {
                (0..15).map(move |j| {
                    region(
                        &format!("R{i}_{j}"),
                        41.0 + f64::from(i) * 0.9,
                        -95.0 + f64::from(j) * 2.1,
                    )
                })
            })
            .collect();
        let queries = [
            LatLon(49.2827, -123.1207),
            LatLon(53.5461, -113.4938),
            LatLon(46.8139, -71.2080),
            LatLon(44.6488, -63.5752),
            LatLon(42.9849, -81.2453),
        ];
        for query in queries {
            let closest = regions.as_slice().nearest(query).unwrap();
            let best = distance_km(query, closest.location());
            for other in &regions {
                assert!(
                    best <= distance_km(query, other.location()),
                    "{} is closer to {:?} than {}",
                    other.cgndb,
                    query,
                    closest.cgndb
                );
            }
        }
    }

    #[test]
    fn test_index_agrees_with_linear_scan() {
        let regions = fixture();
        let index = RegionIndex::new(regions.clone());
        for query in [
            LatLon(44.2312, -76.4860),
            LatLon(43.2557, -79.8711),
            LatLon(46.8139, -71.2080),
        ] {
            assert_eq!(
                index.nearest(query).map(|r| &r.cgndb),
                regions.as_slice().nearest(query).map(|r| &r.cgndb)
            );
        }
    }

    #[test]
    fn test_distance_km() {
        let toronto = LatLon(43.6529, -79.3849);
        let montreal = LatLon(45.5017, -73.5673);
        let d = distance_km(toronto, montreal);
        assert!((500.0..520.0).contains(&d), "unexpected distance {d}");
        assert_eq!(distance_km(toronto, toronto), 0.0);
    }
}
