//! Partition of the dodecaplex into its 120 dodecahedral cells.
//!
//! Cell `i` is the set of dodecaplex vertices at distance `cell_radius()` from
//! tetraplex vertex `i`. Members are stored as sorted global indices.

use std::collections::BTreeSet;

use nalgebra::Vector4;
use rayon::prelude::*;

use crate::cfg::{CELL_SIZE, WALL_SIZE};
use crate::distance::DistanceIndex;
use crate::error::PipelineError;
use crate::geometry::cell_radius;
use crate::neighbors::NeighborMap;

/// One dodecahedral cell keyed by its tetraplex center.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub index: usize,
    pub center: Vector4<f64>,
    /// Sorted global dodecaplex indices.
    pub members: Vec<usize>,
}

impl Cell {
    /// Member positions, in member order.
    pub fn positions(&self, vertices: &[Vector4<f64>]) -> Vec<Vector4<f64>> {
        self.members.iter().map(|&i| vertices[i]).collect()
    }

    /// Global indices shared with `other` (sorted).
    pub fn shared_with(&self, other: &Cell) -> Vec<usize> {
        let theirs: BTreeSet<usize> = other.members.iter().copied().collect();
        self.members
            .iter()
            .copied()
            .filter(|i| theirs.contains(i))
            .collect()
    }
}

/// One cell per center; every cell must collect exactly 20 vertices.
pub fn partition_cells(
    vertices: &[Vector4<f64>],
    centers: &[Vector4<f64>],
    index: &DistanceIndex,
) -> Result<Vec<Cell>, PipelineError> {
    let radius = cell_radius();
    centers
        .par_iter()
        .enumerate()
        .map(|(i, c)| {
            let members = index.at_distance(c, vertices, radius);
            if members.len() != CELL_SIZE {
                return Err(PipelineError::CellSizeMismatch {
                    cell: i,
                    expected: CELL_SIZE,
                    found: members.len(),
                });
            }
            Ok(Cell {
                index: i,
                center: *c,
                members,
            })
        })
        .collect()
}

/// Adjacent cells share exactly one pentagonal wall.
pub fn verify_walls(cells: &[Cell], neighbors: &NeighborMap) -> Result<(), PipelineError> {
    for (a, b) in neighbors.edges() {
        let found = cells[a].shared_with(&cells[b]).len();
        if found != WALL_SIZE {
            return Err(PipelineError::WallSizeMismatch {
                a,
                b,
                expected: WALL_SIZE,
                found,
            });
        }
    }
    Ok(())
}
