//! Point-location over prioritized region polygons.
//!
//! [`PolygonLocator::locate`] answers "which named region contains this
//! point" over a fixed collection of polygons in the XZ plane, each with an
//! optional vertical extent, an optional bounding box, and a priority used
//! to break ties between overlapping regions.
//!
//! # Compatibility note
//!
//! The bounding-box pre-filter combines its four edge comparisons with
//! logical OR, exactly as the data producer that shipped the existing
//! derived datasets does. An AND of the four half-plane tests would be the
//! geometrically correct pre-filter, but changing it would shift per-map
//! region counts against the shipped data, so the OR form is kept and the
//! behavior is pinned by `test_bounding_box_prefilter_is_permissive`.
//!
//! One residual difference: the data producer's loosely-typed bound check
//! also skips a bound whose declared value is exactly `0.0`, while here a
//! declared bound always participates. No shipped polygon declares a zero
//! bound, so results agree on real data; the declared-zero behavior is
//! pinned by `test_zero_bound_participates_in_prefilter`.

use serde::Deserialize;

/// Tolerance used to detect a duplicated closing vertex in a ring.
const RING_CLOSE_EPS: f64 = 1e-7;

// ============================================================================
// RegionPolygon
// ============================================================================

/// One named, prioritized region polygon.
///
/// Deserialized from a GeoJSON-like feature: bounds come from
/// `properties`, the ring from `geometry.coordinates[0]` as `[x, z]`
/// pairs (the ring is closed; the last point may duplicate the first).
#[derive(Debug, Clone)]
pub struct RegionPolygon {
    pub name: String,
    /// Higher wins among overlapping matches.
    pub priority: i64,
    pub xmin: Option<f64>,
    pub xmax: Option<f64>,
    pub zmin: Option<f64>,
    pub zmax: Option<f64>,
    pub ymin: Option<f64>,
    pub ymax: Option<f64>,
    /// Boundary ring in the XZ plane.
    pub ring: Vec<[f64; 2]>,
}

impl RegionPolygon {
    /// Vertical rejection: a bound only applies when declared.
    fn within_vertical_bounds(&self, y: f64) -> bool {
        !(self.ymin.is_some_and(|m| y < m) || self.ymax.is_some_and(|m| y > m))
    }

    /// Horizontal bounding-box pre-filter, OR semantics (see module docs).
    /// Each comparison only participates when its bound is declared;
    /// a declared bound of `0.0` still participates.
    fn bounding_box_prefilter(&self, x: f64, z: f64) -> bool {
        self.xmin.is_some_and(|m| x >= m)
            || self.zmin.is_some_and(|m| z >= m)
            || self.xmax.is_some_and(|m| x <= m)
            || self.zmax.is_some_and(|m| z <= m)
    }

    /// Full horizontal containment test: pre-filter, then ray cast.
    pub fn contains(&self, x: f64, z: f64) -> bool {
        self.bounding_box_prefilter(x, z) && ring_contains(&self.ring, x, z)
    }
}

/// Ray-casting containment test over a ring in the XZ plane.
///
/// A horizontal ray is cast from the point and boundary crossings are
/// counted; an odd count means inside. An exact edge-on-ray intersection
/// (`xi == xp`) is treated as inside immediately. If the ring's first and
/// last points coincide within [`RING_CLOSE_EPS`], the duplicate closing
/// vertex is dropped before the edge walk.
fn ring_contains(ring: &[[f64; 2]], xp: f64, zp: f64) -> bool {
    let mut n = ring.len();
    if n == 0 {
        return false;
    }
    if n > 1 {
        let (first, last) = (ring[0], ring[n - 1]);
        if (first[0] - last[0]).abs() < RING_CLOSE_EPS
            && (first[1] - last[1]).abs() < RING_CLOSE_EPS
        {
            n -= 1;
        }
    }

    let mut x2 = ring[n - 1][0];
    let mut z2 = ring[n - 1][1];
    let mut crossings_left = 0u32;

    for vertex in &ring[..n] {
        let (x1, z1) = (x2, z2);
        x2 = vertex[0];
        z2 = vertex[1];

        // Edge fully on one side of the ray: no crossing.
        if z1 >= zp && z2 >= zp {
            continue;
        }
        if z1 < zp && z2 < zp {
            continue;
        }
        if z1 == z2 {
            // Horizontal edge: count by endpoint inclusion.
            if x1 >= xp && x2 >= xp {
                continue;
            }
            if x1 < xp && x2 < xp {
                continue;
            }
            crossings_left += 1;
        } else {
            let xi = x1 + (zp - z1) * (x2 - x1) / (z2 - z1);
            if xi == xp {
                // Point exactly on an edge: inside by convention.
                crossings_left = 1;
                break;
            }
            if xi > xp {
                crossings_left += 1;
            }
        }
    }
    crossings_left % 2 == 1
}

// ============================================================================
// PolygonLocator
// ============================================================================

/// Spatial point-location engine over a fixed polygon collection.
pub struct PolygonLocator<'a> {
    polygons: &'a [RegionPolygon],
}

impl<'a> PolygonLocator<'a> {
    pub fn new(polygons: &'a [RegionPolygon]) -> Self {
        Self { polygons }
    }

    /// Find the winning polygon for a point, or `None`.
    ///
    /// Candidates are rejected by vertical bound first, then by the
    /// horizontal containment test. Among matches, a later polygon only
    /// displaces the current best when its priority is not lower, so
    /// equal-priority overlaps favor the last polygon in input order and
    /// a strictly lower priority never displaces a match.
    pub fn locate(&self, point: [f32; 3]) -> Option<&'a RegionPolygon> {
        let (x, y, z) = (point[0] as f64, point[1] as f64, point[2] as f64);
        let mut found: Option<&RegionPolygon> = None;
        for poly in self.polygons {
            if !poly.within_vertical_bounds(y) {
                continue;
            }
            if let Some(best) = found {
                if poly.priority < best.priority {
                    continue;
                }
            }
            if poly.contains(x, z) {
                found = Some(poly);
            }
        }
        found
    }
}

// ============================================================================
// GeoJSON-like wire shape
// ============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct FeatureCollection {
    pub features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Feature {
    pub properties: FeatureProperties,
    pub geometry: FeatureGeometry,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FeatureProperties {
    pub name: String,
    #[serde(default)]
    pub priority: i64,
    pub xmin: Option<f64>,
    pub xmax: Option<f64>,
    pub zmin: Option<f64>,
    pub zmax: Option<f64>,
    pub ymin: Option<f64>,
    pub ymax: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FeatureGeometry {
    pub coordinates: Vec<Vec<[f64; 2]>>,
}

impl From<Feature> for RegionPolygon {
    fn from(f: Feature) -> Self {
        let ring = f.geometry.coordinates.into_iter().next().unwrap_or_default();
        RegionPolygon {
            name: f.properties.name,
            priority: f.properties.priority,
            xmin: f.properties.xmin,
            xmax: f.properties.xmax,
            zmin: f.properties.zmin,
            zmax: f.properties.zmax,
            ymin: f.properties.ymin,
            ymax: f.properties.ymax,
            ring,
        }
    }
}
