//! Canonical texture-corner ordering of pentagonal faces.
//!
//! From the face's smallest index `r`, the two vertices at edge length
//! (`near`) and the two at diagonal length (`far`) are found with the shared
//! distance bands. With `f0 < f1` the far pair, the ordering is
//! `[r, near ∩ near(f0), f0, f1, near ∩ far(f0)]`, which walks the pentagon
//! once. Anything other than two near, two far and singleton intersections
//! means the ordering is not canonical, and that is reported, not guessed.

use nalgebra::Vector4;
use rayon::prelude::*;

use super::triangulate::CellSurface;
use crate::distance::DistanceIndex;
use crate::error::PipelineError;
use crate::geometry::{dodecaplex_edge, pentagon_diagonal};

/// Band counts observed when an ordering is not canonical.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ambiguity {
    pub near: usize,
    pub far: usize,
}

/// Corner ordering of one pentagon given by its global indices.
pub fn corner_ordering(
    face: &[usize],
    vertices: &[Vector4<f64>],
    index: &DistanceIndex,
) -> Result<[usize; 5], Ambiguity> {
    if face.is_empty() {
        return Err(Ambiguity { near: 0, far: 0 });
    }
    let mut sorted = face.to_vec();
    sorted.sort_unstable();
    let pts: Vec<Vector4<f64>> = sorted.iter().map(|&g| vertices[g]).collect();
    let (edge, diag) = (dodecaplex_edge(), pentagon_diagonal());
    let band = |from: usize, r: f64| index.at_distance(&pts[from], &pts, r);

    let near = band(0, edge);
    let far = band(0, diag);
    let ambiguous = Ambiguity {
        near: near.len(),
        far: far.len(),
    };
    if near.len() != 2 || far.len() != 2 {
        return Err(ambiguous);
    }
    let (f0, f1) = (far[0], far[1]);
    let near_f0 = band(f0, edge);
    let far_f0 = band(f0, diag);
    let pick = |other: &[usize]| -> Option<usize> {
        let hits: Vec<usize> = near.iter().copied().filter(|i| other.contains(i)).collect();
        (hits.len() == 1).then(|| hits[0])
    };
    match (pick(near_f0.as_slice()), pick(far_f0.as_slice())) {
        (Some(a), Some(b)) => Ok([sorted[0], sorted[a], sorted[f0], sorted[f1], sorted[b]]),
        _ => Err(ambiguous),
    }
}

/// Corner ordering for every triangle of a surface (faces repeat per triangle).
pub fn cell_corners(
    surface: &CellSurface,
    vertices: &[Vector4<f64>],
    index: &DistanceIndex,
) -> Result<Vec<[usize; 5]>, PipelineError> {
    let per_face = surface
        .faces
        .iter()
        .enumerate()
        .map(|(face, ring)| {
            corner_ordering(ring, vertices, index).map_err(|a| {
                PipelineError::CornerOrderingAmbiguous {
                    cell: surface.cell,
                    face,
                    near: a.near,
                    far: a.far,
                }
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(surface.triangles.iter().map(|t| per_face[t.face]).collect())
}

pub fn all_corners(
    surfaces: &[CellSurface],
    vertices: &[Vector4<f64>],
    index: &DistanceIndex,
) -> Result<Vec<Vec<[usize; 5]>>, PipelineError> {
    surfaces
        .par_iter()
        .map(|s| cell_corners(s, vertices, index))
        .collect()
}
