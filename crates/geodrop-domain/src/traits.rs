//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the proximity core and the
//! collaborators that feed it. Implementations live in other crates.

use crate::distance::haversine;
use crate::geo::GeoPoint;
use crate::target::Target;

/// Supplies the current set of targets
///
/// Implemented by `geodrop-catalog`; a network-backed provider would
/// implement it the same way.
pub trait TargetProvider {
    /// Error type for provider operations
    type Error;

    /// Get the current targets, in a stable order
    fn targets(&self) -> Result<Vec<Target>, Self::Error>;
}

/// Narrows a target set to those that may lie within a radius of a point
///
/// Classification asks the index for candidates and treats every other target
/// as far away. An implementation may return extra candidates but must never
/// omit a target whose distance is within `radius_m`.
pub trait SpatialIndex {
    /// Rebuild the index for a new target set
    fn rebuild(&mut self, targets: &[Target]);

    /// Indices into the last `rebuild` slice, in ascending order
    fn candidates(&self, center: GeoPoint, radius_m: f64) -> Vec<usize>;
}

/// The trivial index: every target is a candidate
///
/// Adequate for the tens of targets a single area carries.
#[derive(Debug, Clone, Default)]
pub struct LinearScan {
    len: usize,
}

impl SpatialIndex for LinearScan {
    fn rebuild(&mut self, targets: &[Target]) {
        self.len = targets.len();
    }

    fn candidates(&self, _center: GeoPoint, _radius_m: f64) -> Vec<usize> {
        (0..self.len).collect()
    }
}

/// A latitude-band index: targets are bucketed by latitude cells
///
/// Candidates are the targets whose latitude cell overlaps the query radius.
/// Longitude is not bucketed, so this only prunes along the north-south axis.
#[derive(Debug, Clone)]
pub struct LatitudeBands {
    cell_deg: f64,
    // (cell, index into target slice), sorted by cell
    cells: Vec<(i64, usize)>,
}

impl LatitudeBands {
    /// Create an index with cells `cell_deg` degrees tall
    pub fn new(cell_deg: f64) -> Self {
        Self {
            cell_deg: if cell_deg.is_finite() && cell_deg > 0.0 { cell_deg } else { 0.01 },
            cells: Vec::new(),
        }
    }

    fn cell_of(&self, latitude: f64) -> i64 {
        (latitude / self.cell_deg).floor() as i64
    }
}

impl SpatialIndex for LatitudeBands {
    fn rebuild(&mut self, targets: &[Target]) {
        let mut cells: Vec<(i64, usize)> = targets
            .iter()
            .enumerate()
            .map(|(i, t)| (self.cell_of(t.location.latitude), i))
            .collect();
        cells.sort_unstable();
        self.cells = cells;
    }

    fn candidates(&self, center: GeoPoint, radius_m: f64) -> Vec<usize> {
        // One degree of latitude is the same length everywhere on a sphere
        let one_degree_m = haversine(GeoPoint::new_unchecked(0.0, 0.0), GeoPoint::new_unchecked(1.0, 0.0));
        let span_deg = radius_m / one_degree_m;
        let low = self.cell_of(center.latitude - span_deg);
        let high = self.cell_of(center.latitude + span_deg);

        let start = self.cells.partition_point(|(cell, _)| *cell < low);
        let mut hits: Vec<usize> = self.cells[start..]
            .iter()
            .take_while(|(cell, _)| *cell <= high)
            .map(|(_, i)| *i)
            .collect();
        hits.sort_unstable();
        hits
    }
}
