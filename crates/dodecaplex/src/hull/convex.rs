//! Brute-force 3D convex hull for small point sets.
//!
//! Every triple of points spans a candidate plane; a plane is a facet when all
//! points lie on one side of it (within `eps`). Facets are keyed by the set of
//! points on them, so coplanar triples of one pentagon collapse to one facet.
//! Twenty points give 1140 triples, which is cheap enough to run per cell.

use std::collections::HashSet;

use nalgebra::Vector3;

use crate::util::{centroid, combinations};

/// One hull facet: member positions (indices into the input slice) in
/// counter-clockwise order seen from outside, plus the outward unit normal.
#[derive(Clone, Debug, PartialEq)]
pub struct HullFace {
    pub ring: Vec<usize>,
    pub normal: Vector3<f64>,
}

/// Facets of the convex hull of `points`, or `None` when the points are flat
/// (some candidate plane contains all of them) or a facet ring cannot be
/// ordered.
pub fn hull_faces(points: &[Vector3<f64>], eps: f64) -> Option<Vec<HullFace>> {
    if points.len() < 4 {
        return None;
    }
    let idxs: Vec<usize> = (0..points.len()).collect();
    let mut seen: HashSet<Vec<usize>> = HashSet::new();
    let mut out = Vec::new();
    for comb in combinations(&idxs, 3) {
        let (p0, p1, p2) = (points[comb[0]], points[comb[1]], points[comb[2]]);
        let n = (p1 - p0).cross(&(p2 - p0));
        let norm = n.norm();
        if norm <= eps || !norm.is_finite() {
            continue;
        }
        let mut n = n / norm;
        let mut c = n.dot(&p0);
        let (lo, hi) = points.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            let s = n.dot(p) - c;
            (lo.min(s), hi.max(s))
        });
        if hi <= eps && lo >= -eps {
            return None;
        }
        if hi > eps {
            if lo < -eps {
                continue;
            }
            // every point is on the positive side: flip to the outward normal
            n = -n;
            c = -c;
        }
        let members: Vec<usize> = idxs
            .iter()
            .copied()
            .filter(|&i| (n.dot(&points[i]) - c).abs() <= eps)
            .collect();
        if seen.insert(members.clone()) {
            let ring = order_ring(points, &members, &n)?;
            out.push(HullFace { ring, normal: n });
        }
    }
    Some(out)
}

/// Sort coplanar points by angle around their centroid, counter-clockwise
/// about `normal`.
fn order_ring(points: &[Vector3<f64>], members: &[usize], normal: &Vector3<f64>) -> Option<Vec<usize>> {
    let pts: Vec<Vector3<f64>> = members.iter().map(|&i| points[i]).collect();
    let center = centroid(&pts);
    let u = (pts[0] - center).try_normalize(f64::EPSILON)?;
    let v = normal.cross(&u);
    let mut items = Vec::with_capacity(members.len());
    for (&i, p) in members.iter().zip(&pts) {
        let rel = p - center;
        let angle = v.dot(&rel).atan2(u.dot(&rel));
        if angle.is_nan() {
            return None;
        }
        items.push((angle, i));
    }
    items.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
    Some(items.into_iter().map(|(_, i)| i).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Rotation3, Unit};
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn cube() -> Vec<Vector3<f64>> {
        let mut pts = Vec::new();
        for s in 0..8 {
            let c = |b: usize| if (s >> b) & 1 == 1 { 1.0 } else { -1.0 };
            pts.push(Vector3::new(c(0), c(1), c(2)));
        }
        pts
    }

    fn member_sets(faces: &[HullFace]) -> Vec<Vec<usize>> {
        let mut sets: Vec<Vec<usize>> = faces
            .iter()
            .map(|f| {
                let mut s = f.ring.clone();
                s.sort_unstable();
                s
            })
            .collect();
        sets.sort();
        sets
    }

    #[test]
    fn cube_has_six_square_faces() {
        let pts = cube();
        let faces = hull_faces(&pts, 1e-9).unwrap();
        assert_eq!(faces.len(), 6);
        for f in &faces {
            assert_eq!(f.ring.len(), 4);
            // outward: the normal points away from the origin-centered cube
            assert!(f.normal.dot(&pts[f.ring[0]]) > 0.0);
        }
    }

    #[test]
    fn rings_wind_counter_clockwise_about_the_normal() {
        let pts = cube();
        for f in hull_faces(&pts, 1e-9).unwrap() {
            let (a, b, c) = (pts[f.ring[0]], pts[f.ring[1]], pts[f.ring[2]]);
            assert!((b - a).cross(&(c - a)).dot(&f.normal) > 0.0);
        }
    }

    #[test]
    fn flat_input_is_rejected() {
        let pts: Vec<_> = (0..6)
            .map(|i| {
                let t = i as f64;
                Vector3::new(t.cos(), t.sin(), 0.0)
            })
            .collect();
        assert!(hull_faces(&pts, 1e-9).is_none());
    }

    #[test]
    fn facets_are_invariant_under_seeded_rotations() {
        let pts = cube();
        let base = member_sets(&hull_faces(&pts, 1e-9).unwrap());
        let mut rng = StdRng::seed_from_u64(2024);
        for _ in 0..8 {
            let axis = Unit::new_normalize(Vector3::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            ));
            let rot = Rotation3::from_axis_angle(&axis, rng.gen_range(0.0..6.28));
            let moved: Vec<_> = pts.iter().map(|p| rot * *p).collect();
            assert_eq!(member_sets(&hull_faces(&moved, 1e-9).unwrap()), base);
        }
    }
}
