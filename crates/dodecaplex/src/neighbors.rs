//! Edge graph of the tetraplex.
//!
//! Each of the 120 vertices has exactly 12 neighbors at the edge length 1/Φ.
//! The graph doubles as the cell adjacency of the dodecaplex, since cell `i`
//! is keyed to tetraplex vertex `i`.

use nalgebra::Vector4;
use rayon::prelude::*;

use crate::cfg::NEIGHBOR_COUNT;
use crate::distance::DistanceIndex;
use crate::error::PipelineError;
use crate::geometry::tetraplex_edge;

/// Sorted neighbor lists indexed by tetraplex vertex.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NeighborMap {
    lists: Vec<Vec<usize>>,
}

impl NeighborMap {
    /// Neighbors of `vertex` in increasing index order; empty if out of range.
    pub fn neighbors(&self, vertex: usize) -> &[usize] {
        self.lists.get(vertex).map(Vec::as_slice).unwrap_or(&[])
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    pub fn contains(&self, a: usize, b: usize) -> bool {
        self.neighbors(a).binary_search(&b).is_ok()
    }

    /// Undirected edges `(a, b)` with `a < b`.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        self.directed_edges().filter(|(a, b)| a < b).collect()
    }

    /// All directed edges in vertex order.
    pub fn directed_edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.lists
            .iter()
            .enumerate()
            .flat_map(|(a, ns)| ns.iter().map(move |&b| (a, b)))
    }
}

/// Build the neighbor graph; fails on a wrong count or a one-sided edge.
pub fn map_neighbors(
    points: &[Vector4<f64>],
    index: &DistanceIndex,
) -> Result<NeighborMap, PipelineError> {
    let edge = tetraplex_edge();
    let lists = points
        .par_iter()
        .enumerate()
        .map(|(vertex, p)| {
            let found = index.at_distance(p, points, edge);
            if found.len() != NEIGHBOR_COUNT {
                return Err(PipelineError::NeighborCountMismatch {
                    vertex,
                    expected: NEIGHBOR_COUNT,
                    found: found.len(),
                });
            }
            Ok(found)
        })
        .collect::<Result<Vec<_>, _>>()?;
    let map = NeighborMap { lists };
    for (a, b) in map.directed_edges() {
        if !map.contains(b, a) {
            return Err(PipelineError::NeighborAsymmetry { a, b });
        }
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polytope::tetraplex;

    #[test]
    fn every_vertex_has_twelve_symmetric_neighbors() {
        let pts = tetraplex().unwrap().positions();
        let map = map_neighbors(&pts, &DistanceIndex::default()).unwrap();
        assert_eq!(map.len(), 120);
        for v in 0..120 {
            assert_eq!(map.neighbors(v).len(), 12);
            assert!(!map.neighbors(v).contains(&v));
            for &n in map.neighbors(v) {
                assert!(map.contains(n, v));
            }
        }
        assert_eq!(map.edges().len(), 720);
        assert_eq!(map.directed_edges().count(), 1440);
    }

    #[test]
    fn truncated_input_breaks_the_count() {
        let pts = tetraplex().unwrap().positions();
        let err = map_neighbors(&pts[..60], &DistanceIndex::default()).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::NeighborCountMismatch { expected: 12, .. }
        ));
    }

    #[test]
    fn out_of_range_vertex_has_no_neighbors() {
        let pts = tetraplex().unwrap().positions();
        let map = map_neighbors(&pts, &DistanceIndex::default()).unwrap();
        assert!(map.neighbors(500).is_empty());
        assert!(!map.contains(500, 0));
    }
}
