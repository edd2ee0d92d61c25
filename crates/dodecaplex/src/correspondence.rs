//! Rigid correspondence between a reference cell and its wall neighbors.
//!
//! Purpose
//! - Relate the local frame of each cell adjacent to the reference cell back
//!   to the reference frame, as a half-turn about the neighbor's center axis
//!   (for matching) and a best-fit 4×4 matrix (for export and for hull
//!   recovery).
//!
//! Conventions
//! - Row-vector convention: a point `p` (as a row) maps to `p · M`. In column
//!   form that is `Mᵀ p`, which is what [`CorrespondenceTransform::apply`] does.
//! - The half-turn acts on the leading three coordinates only:
//!   `R = 2 a aᵀ − I` with `a` the unit xyz part of the neighbor center.
//! - Matching is a strict bijection over the 20 points; ambiguity is an error.
//!
//! References
//! - nalgebra `SVD::solve` for the over-determined least-squares system.

use nalgebra::{DMatrix, Matrix3, Matrix4, Vector3, Vector4, SVD};
use rayon::prelude::*;

use crate::cells::Cell;
use crate::cfg::{Tolerances, SVD_EPS, WALL_SIZE};
use crate::error::PipelineError;
use crate::neighbors::NeighborMap;

/// Transform taking a neighbor cell's points onto the reference cell's points.
#[derive(Clone, Debug, PartialEq)]
pub struct CorrespondenceTransform {
    pub reference: usize,
    pub neighbor: usize,
    /// Unit half-turn axis (xyz of the neighbor center).
    pub axis: Vector3<f64>,
    pub rotation: Matrix3<f64>,
    /// Best-fit matrix in row-vector convention.
    pub affine: Matrix4<f64>,
    /// `(reference vertex, neighbor vertex)` pairs, global indices, in
    /// reference member order.
    pub pairs: Vec<(usize, usize)>,
    /// Max-abs round-trip residual of the fit.
    pub residual: f64,
}

impl CorrespondenceTransform {
    #[inline]
    pub fn apply_point(&self, p: &Vector4<f64>) -> Vector4<f64> {
        self.affine.transpose() * p
    }

    pub fn apply(&self, points: &[Vector4<f64>]) -> Vec<Vector4<f64>> {
        let mt = self.affine.transpose();
        points.iter().map(|p| mt * p).collect()
    }
}

/// Half-turn about `axis` (need not be normalized); `None` for a zero axis.
pub fn half_turn(axis: &Vector3<f64>, eps: f64) -> Option<Matrix3<f64>> {
    let n = axis.norm();
    if n <= eps || !n.is_finite() {
        return None;
    }
    let a = axis / n;
    Some(a * a.transpose() * 2.0 - Matrix3::identity())
}

#[inline]
fn xyz(p: &Vector4<f64>) -> Vector3<f64> {
    Vector3::new(p.x, p.y, p.z)
}

#[inline]
fn parallel_to(d: &Vector3<f64>, axis: &Vector3<f64>, tol: f64) -> bool {
    d.cross(axis).norm() < tol
}

/// For each neighbor point, the unique rotated reference point whose
/// displacement is parallel to `axis`. Returns `slot[j]` = position in
/// `neighbor` matched to reference point `j`, or the first offending neighbor
/// position with its match count.
pub fn match_points(
    rotated_reference: &[Vector3<f64>],
    neighbor: &[Vector3<f64>],
    axis: &Vector3<f64>,
    tol: f64,
) -> Result<Vec<usize>, (usize, usize)> {
    let mut slot = vec![usize::MAX; rotated_reference.len()];
    for (k, p) in neighbor.iter().enumerate() {
        let hits: Vec<usize> = rotated_reference
            .iter()
            .enumerate()
            .filter(|(_, q)| parallel_to(&(*q - p), axis, tol))
            .map(|(j, _)| j)
            .collect();
        match hits.as_slice() {
            [j] if slot[*j] == usize::MAX => slot[*j] = k,
            // reference point already claimed by an earlier neighbor point
            [_] => return Err((k, 2)),
            _ => return Err((k, hits.len())),
        }
    }
    if slot.iter().any(|&s| s == usize::MAX) {
        return Err((neighbor.len(), 0));
    }
    Ok(slot)
}

/// Solves and validates correspondence transforms.
#[derive(Clone, Copy, Debug, Default)]
pub struct CorrespondenceSolver {
    pub tol: Tolerances,
}

impl CorrespondenceSolver {
    pub fn new(tol: Tolerances) -> Self {
        Self { tol }
    }

    /// Transform from `neighbor` onto `reference`; the two cells must share a wall.
    pub fn solve_pair(
        &self,
        reference: &Cell,
        neighbor: &Cell,
        vertices: &[Vector4<f64>],
    ) -> Result<CorrespondenceTransform, PipelineError> {
        let (r, n) = (reference.index, neighbor.index);
        if reference.shared_with(neighbor).len() != WALL_SIZE {
            return Err(PipelineError::NotAdjacent {
                reference: r,
                neighbor: n,
            });
        }
        let axis_raw = xyz(&neighbor.center);
        let rotation =
            half_turn(&axis_raw, self.tol.point).ok_or(PipelineError::DegenerateAxis { neighbor: n })?;
        let axis = axis_raw.normalize();

        let ref_pts = reference.positions(vertices);
        let adj_pts = neighbor.positions(vertices);
        let rotated: Vec<Vector3<f64>> = ref_pts.iter().map(|p| rotation * xyz(p)).collect();
        let adj_xyz: Vec<Vector3<f64>> = adj_pts.iter().map(xyz).collect();
        let slot = match_points(&rotated, &adj_xyz, &axis, self.tol.band).map_err(
            |(point, matches)| PipelineError::CorrespondenceAmbiguous {
                reference: r,
                neighbor: n,
                point: neighbor.members.get(point).copied().unwrap_or(point),
                matches,
            },
        )?;
        let ordered: Vec<Vector4<f64>> = slot.iter().map(|&k| adj_pts[k]).collect();

        let a = DMatrix::from_fn(ordered.len(), 4, |i, j| ordered[i][j]);
        let b = DMatrix::from_fn(ref_pts.len(), 4, |i, j| ref_pts[i][j]);
        let x = SVD::new(a, true, true)
            .solve(&b, SVD_EPS)
            .map_err(|_| PipelineError::SolveFailed {
                reference: r,
                neighbor: n,
            })?;
        let affine = Matrix4::from_fn(|i, j| x[(i, j)]);
        if !affine.iter().all(|v| v.is_finite()) {
            return Err(PipelineError::SolveFailed {
                reference: r,
                neighbor: n,
            });
        }

        let transform = CorrespondenceTransform {
            reference: r,
            neighbor: n,
            axis,
            rotation,
            affine,
            pairs: reference
                .members
                .iter()
                .zip(&slot)
                .map(|(&g, &k)| (g, neighbor.members[k]))
                .collect(),
            residual: 0.0,
        };
        let mapped = transform.apply(&ordered);
        let residual = crate::util::max_abs_residual(&mapped, &ref_pts);
        if residual > self.tol.point {
            return Err(self.residual_error(r, n, "round-trip", residual));
        }
        // undo the half-turn on the mapped points: only an axial offset may remain
        let axial = mapped
            .iter()
            .zip(&ordered)
            .map(|(m, o)| (rotation * xyz(m) - xyz(o)).cross(&axis).norm())
            .fold(0.0, f64::max);
        if axial >= self.tol.band {
            return Err(self.residual_error(r, n, "axis", axial));
        }
        let center = (transform.apply_point(&neighbor.center) - reference.center).amax();
        if center > self.tol.point {
            return Err(self.residual_error(r, n, "center", center));
        }
        Ok(CorrespondenceTransform {
            residual,
            ..transform
        })
    }

    fn residual_error(
        &self,
        reference: usize,
        neighbor: usize,
        check: &'static str,
        residual: f64,
    ) -> PipelineError {
        PipelineError::CorrespondenceResidual {
            reference,
            neighbor,
            check,
            residual,
        }
    }

    /// One transform per wall neighbor of `reference`, in neighbor order.
    /// On failure the error of the first failing neighbor (in neighbor order)
    /// is returned, independent of thread scheduling.
    pub fn solve_primary(
        &self,
        cells: &[Cell],
        neighbors: &NeighborMap,
        vertices: &[Vector4<f64>],
        reference: usize,
    ) -> Result<Vec<CorrespondenceTransform>, PipelineError> {
        let ref_cell = cells
            .get(reference)
            .ok_or(PipelineError::UnknownCell { cell: reference })?;
        let solved: Vec<_> = neighbors
            .neighbors(reference)
            .par_iter()
            .map(|&n| self.solve_pair(ref_cell, &cells[n], vertices))
            .collect();
        solved.into_iter().collect()
    }
}
