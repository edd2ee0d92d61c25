//! Structural statistics reported alongside the export.
//!
//! None of these feed the export tables; they are cross-checks on the
//! assembled solids that the `report` command prints.

use std::collections::BTreeMap;

use nalgebra::Vector4;
use serde::Serialize;

use crate::hull::CellSurface;
use crate::neighbors::NeighborMap;
use crate::scalar::PHI;
use crate::util::centroid;

/// Points split by whether their xyz projection coincides with another point's.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ProjectionCollisions {
    pub unique: usize,
    pub paired: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Census {
    /// Distinct center-to-neighbor displacement vectors over all directed edges.
    pub displacements: usize,
    /// Max-abs deviation of `2/Φ · centroid(neighbors(n))` from `n`.
    pub centroid_deviation: f64,
    pub dodecaplex_collisions: ProjectionCollisions,
    pub tetraplex_collisions: ProjectionCollisions,
    /// Cells per number of hull attempts.
    pub hull_attempts: BTreeMap<usize, usize>,
}

pub fn displacement_census(centers: &[Vector4<f64>], neighbors: &NeighborMap, eps: f64) -> usize {
    let mut distinct: Vec<Vector4<f64>> = Vec::new();
    for (a, b) in neighbors.directed_edges() {
        let d = centers[b] - centers[a];
        if !distinct.iter().any(|e| (e - d).amax() < eps) {
            distinct.push(d);
        }
    }
    distinct.len()
}

pub fn neighbor_centroid_deviation(centers: &[Vector4<f64>], neighbors: &NeighborMap) -> f64 {
    let scale = 2.0 / PHI;
    centers
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let ns: Vec<Vector4<f64>> = neighbors.neighbors(i).iter().map(|&j| centers[j]).collect();
            (centroid(&ns) * scale - c).amax()
        })
        .fold(0.0, f64::max)
}

pub fn projection_collisions(points: &[Vector4<f64>], eps: f64) -> ProjectionCollisions {
    let paired = (0..points.len())
        .filter(|&i| {
            points.iter().enumerate().any(|(j, q)| {
                let p = &points[i];
                j != i && (p.x - q.x).abs() < eps && (p.y - q.y).abs() < eps && (p.z - q.z).abs() < eps
            })
        })
        .count();
    ProjectionCollisions {
        unique: points.len() - paired,
        paired,
    }
}

pub fn attempt_histogram(surfaces: &[CellSurface]) -> BTreeMap<usize, usize> {
    let mut out = BTreeMap::new();
    for s in surfaces {
        *out.entry(s.attempts).or_insert(0) += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceIndex;
    use crate::neighbors::map_neighbors;
    use crate::polytope::{dodecaplex, tetraplex};

    #[test]
    fn tetraplex_has_120_distinct_edge_vectors() {
        let centers = tetraplex().unwrap().positions();
        let map = map_neighbors(&centers, &DistanceIndex::default()).unwrap();
        assert_eq!(displacement_census(&centers, &map, 1e-4), 120);
    }

    #[test]
    fn neighbor_centroid_scales_back_to_the_vertex() {
        let centers = tetraplex().unwrap().positions();
        let map = map_neighbors(&centers, &DistanceIndex::default()).unwrap();
        assert!(neighbor_centroid_deviation(&centers, &map) < 1e-4);
    }

    #[test]
    fn projection_collision_counts() {
        let large = dodecaplex().unwrap().positions();
        assert_eq!(
            projection_collisions(&large, 1e-4),
            ProjectionCollisions {
                unique: 60,
                paired: 540
            }
        );
        let small = tetraplex().unwrap().positions();
        assert_eq!(
            projection_collisions(&small, 1e-4),
            ProjectionCollisions {
                unique: 30,
                paired: 90
            }
        );
    }
}
