//! Cross-cell triangle adjacency.
//!
//! Each pentagon is shared by exactly two cells, and both cells fan it from
//! the same smallest index, so every triangle has exactly one twin with the
//! same vertex set in the neighboring cell.

use std::collections::HashMap;

use serde::Serialize;

use super::triangulate::CellSurface;

/// Address of a triangle: owning cell and position in its surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TriangleRef {
    pub cell: usize,
    pub triangle: usize,
}

/// `table[cell][triangle]` is the twin triangle in another cell, if any.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TriangleAdjacency {
    table: Vec<Vec<Option<TriangleRef>>>,
}

impl TriangleAdjacency {
    /// Index every triangle by its sorted vertex set, then pair entries from
    /// different cells.
    pub fn build(surfaces: &[CellSurface]) -> Self {
        let mut by_key: HashMap<[usize; 3], Vec<TriangleRef>> = HashMap::new();
        for s in surfaces {
            for (t, tri) in s.triangles.iter().enumerate() {
                by_key.entry(tri.key()).or_default().push(TriangleRef {
                    cell: s.cell,
                    triangle: t,
                });
            }
        }
        let table = surfaces
            .iter()
            .map(|s| {
                s.triangles
                    .iter()
                    .map(|tri| {
                        by_key
                            .get(&tri.key())
                            .and_then(|refs| refs.iter().find(|r| r.cell != s.cell))
                            .copied()
                    })
                    .collect()
            })
            .collect();
        Self { table }
    }

    pub fn get(&self, cell: usize, triangle: usize) -> Option<TriangleRef> {
        self.table.get(cell)?.get(triangle).copied().flatten()
    }

    pub fn rows(&self) -> &[Vec<Option<TriangleRef>>] {
        &self.table
    }

    /// Number of triangles without a twin.
    pub fn unmatched(&self) -> usize {
        self.table.iter().flatten().filter(|t| t.is_none()).count()
    }

    /// Neighboring cell across each triangle of `cell`.
    pub fn neighbor_cells(&self, cell: usize) -> Vec<Option<usize>> {
        self.table
            .get(cell)
            .map(|row| row.iter().map(|t| t.map(|r| r.cell)).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hull::triangulate::Triangle;

    fn surface(cell: usize, tris: &[[usize; 3]]) -> CellSurface {
        CellSurface {
            cell,
            faces: Vec::new(),
            triangles: tris
                .iter()
                .map(|&vertices| Triangle {
                    cell,
                    face: 0,
                    vertices,
                })
                .collect(),
            attempts: 1,
        }
    }

    #[test]
    fn twins_are_found_regardless_of_winding() {
        let a = surface(0, &[[1, 2, 3], [1, 3, 4]]);
        let b = surface(1, &[[3, 2, 1], [7, 8, 9]]);
        let adj = TriangleAdjacency::build(&[a, b]);
        assert_eq!(adj.get(0, 0), Some(TriangleRef { cell: 1, triangle: 0 }));
        assert_eq!(adj.get(1, 0), Some(TriangleRef { cell: 0, triangle: 0 }));
        assert_eq!(adj.get(0, 1), None);
        assert_eq!(adj.unmatched(), 2);
        assert_eq!(adj.neighbor_cells(1), vec![Some(0), None]);
        assert_eq!(adj.get(5, 0), None);
    }
}
