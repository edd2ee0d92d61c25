//! Per-cell surface triangulation with degenerate-projection recovery.

use nalgebra::{Vector3, Vector4};
use rayon::prelude::*;
use tracing::debug;

use super::convex::hull_faces;
use crate::cells::Cell;
use crate::cfg::{Tolerances, FACES_PER_CELL, TRIANGLES_PER_CELL, WALL_SIZE};
use crate::correspondence::CorrespondenceTransform;
use crate::error::PipelineError;

/// One triangle of a cell surface, in global dodecaplex indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Triangle {
    pub cell: usize,
    /// Index of the pentagonal face the triangle was cut from.
    pub face: usize,
    pub vertices: [usize; 3],
}

impl Triangle {
    /// Vertex set with ordering removed, for cross-cell comparison.
    pub fn key(&self) -> [usize; 3] {
        let mut k = self.vertices;
        k.sort_unstable();
        k
    }
}

/// Triangulated surface of one cell.
#[derive(Clone, Debug, PartialEq)]
pub struct CellSurface {
    pub cell: usize,
    /// Pentagon rings in global indices, each starting at its smallest index.
    /// Faces are sorted by their member sets.
    pub faces: Vec<Vec<usize>>,
    /// Face-major: triangles `3f..3f+3` belong to face `f`.
    pub triangles: Vec<Triangle>,
    /// Projections tried, including the successful one.
    pub attempts: usize,
}

/// `ring` rotated to start at its smallest entry.
pub fn rotate_to_min(ring: &[usize]) -> Vec<usize> {
    let start = ring
        .iter()
        .enumerate()
        .min_by_key(|(_, g)| **g)
        .map_or(0, |(i, _)| i);
    ring[start..].iter().chain(&ring[..start]).copied().collect()
}

/// Fan triangulation of a convex ring from its smallest entry.
pub fn fan(ring: &[usize]) -> Vec<[usize; 3]> {
    let r = rotate_to_min(ring);
    (1..r.len().saturating_sub(1))
        .map(|i| [r[0], r[i], r[i + 1]])
        .collect()
}

/// Faces and triangles of one projection, or `None` if it is flat or does not
/// split into twelve pentagons.
fn surface_from_projection(
    cell: usize,
    members: &[usize],
    projected: &[Vector3<f64>],
    eps: f64,
) -> Option<(Vec<Vec<usize>>, Vec<Triangle>)> {
    let hull = hull_faces(projected, eps)?;
    let mut faces: Vec<Vec<usize>> = hull
        .iter()
        .map(|f| f.ring.iter().map(|&i| members[i]).collect::<Vec<_>>())
        .collect();
    if faces.len() != FACES_PER_CELL || faces.iter().any(|f| f.len() != WALL_SIZE) {
        return None;
    }
    faces.sort_by_cached_key(|f| {
        let mut s = f.clone();
        s.sort_unstable();
        s
    });
    let mut rings = Vec::with_capacity(faces.len());
    let mut triangles = Vec::with_capacity(TRIANGLES_PER_CELL);
    for (face, ring) in faces.iter().enumerate() {
        triangles.extend(fan(ring).into_iter().map(|vertices| Triangle {
            cell,
            face,
            vertices,
        }));
        rings.push(rotate_to_min(ring));
    }
    (triangles.len() == TRIANGLES_PER_CELL).then_some((rings, triangles))
}

#[inline]
fn project(points: &[Vector4<f64>]) -> Vec<Vector3<f64>> {
    points.iter().map(|p| Vector3::new(p.x, p.y, p.z)).collect()
}

/// Triangulates cells against a fixed vertex table, falling back to the
/// correspondence transforms when the plain xyz projection is degenerate.
#[derive(Clone, Copy, Debug)]
pub struct HullTriangulator<'a> {
    vertices: &'a [Vector4<f64>],
    transforms: &'a [CorrespondenceTransform],
    tol: Tolerances,
}

impl<'a> HullTriangulator<'a> {
    pub fn new(
        vertices: &'a [Vector4<f64>],
        transforms: &'a [CorrespondenceTransform],
        tol: Tolerances,
    ) -> Self {
        Self {
            vertices,
            transforms,
            tol,
        }
    }

    /// Plain projection first, then each transform in order, each applied to
    /// the cell's original points.
    pub fn triangulate(&self, cell: &Cell) -> Result<CellSurface, PipelineError> {
        let original = cell.positions(self.vertices);
        let candidates = std::iter::once(None).chain(self.transforms.iter().map(Some));
        for (attempt, transform) in candidates.enumerate() {
            let points = match transform {
                None => original.clone(),
                Some(t) => t.apply(&original),
            };
            let projected = project(&points);
            if let Some((faces, triangles)) =
                surface_from_projection(cell.index, &cell.members, &projected, self.tol.point)
            {
                return Ok(CellSurface {
                    cell: cell.index,
                    faces,
                    triangles,
                    attempts: attempt + 1,
                });
            }
            debug!(
                cell = cell.index,
                attempt = attempt + 1,
                via = ?transform.map(|t| t.neighbor),
                "degenerate projection, retrying"
            );
        }
        Err(PipelineError::TriangulationFailed {
            cell: cell.index,
            attempts: self.transforms.len() + 1,
        })
    }

    pub fn triangulate_all(&self, cells: &[Cell]) -> Result<Vec<CellSurface>, PipelineError> {
        cells.par_iter().map(|c| self.triangulate(c)).collect()
    }
}
