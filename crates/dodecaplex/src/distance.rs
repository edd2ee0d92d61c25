//! Tolerance-banded distance queries.
//!
//! Every stage that asks "which points sit at distance r from here" goes
//! through `DistanceIndex`, so cells, neighbors and corner bands all agree on
//! the same inclusive/exclusive convention: a candidate at distance `d`
//! matches `(low, high]` when `low - tol < d <= high + tol`.

use nalgebra::Vector4;

use crate::cfg::BAND_TOL;

#[inline]
pub fn distance(a: &Vector4<f64>, b: &Vector4<f64>) -> f64 {
    (a - b).norm()
}

/// Banded neighbor query over a slice of candidates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DistanceIndex {
    pub tol: f64,
}

impl Default for DistanceIndex {
    fn default() -> Self {
        Self { tol: BAND_TOL }
    }
}

impl DistanceIndex {
    pub fn new(tol: f64) -> Self {
        Self { tol }
    }

    #[inline]
    pub fn within_band(&self, d: f64, low: f64, high: f64) -> bool {
        low - self.tol < d && d <= high + self.tol
    }

    /// Indices of `candidates` whose distance to `origin` lies in `(low, high]`
    /// widened by the tolerance, in candidate order.
    pub fn neighbors_within(
        &self,
        origin: &Vector4<f64>,
        candidates: &[Vector4<f64>],
        low: f64,
        high: f64,
    ) -> Vec<usize> {
        candidates
            .iter()
            .enumerate()
            .filter(|(_, c)| self.within_band(distance(origin, c), low, high))
            .map(|(i, _)| i)
            .collect()
    }

    /// Candidates at (approximately) exactly `radius`.
    #[inline]
    pub fn at_distance(
        &self,
        origin: &Vector4<f64>,
        candidates: &[Vector4<f64>],
        radius: f64,
    ) -> Vec<usize> {
        self.neighbors_within(origin, candidates, radius, radius)
    }
}
