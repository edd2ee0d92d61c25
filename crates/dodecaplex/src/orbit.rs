//! Signed-permutation orbits of seed points.
//!
//! Purpose
//! - Expand one seed into all points reachable by the 16 sign flips and the
//!   24 coordinate permutations (or only the 12 even ones).
//!
//! Conventions
//! - Sign assignment `s ∈ 0..16`: bit `i` negates component `i`.
//! - Permutations run in lexicographic order; `p` maps output slot `k` to
//!   input component `p[k]`.
//! - Parity is the inversion count of the index permutation itself, never of
//!   the permuted values (equal values would otherwise make parity ambiguous).
//! - Dedup compares symbolic tags; the first occurrence fixes the order.

use std::collections::HashSet;
use std::fmt;

use crate::error::PipelineError;
use crate::scalar::{Coord, Magnitude, SymbolicPoint};
use crate::util::{inversions, permutations4};

/// One row of a seed table: four magnitudes, a parity flag and the expected
/// orbit cardinality.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeedPoint {
    pub magnitudes: [Magnitude; 4],
    pub even_only: bool,
    pub expected: usize,
}

impl SeedPoint {
    pub const fn new(magnitudes: [Magnitude; 4], even_only: bool, expected: usize) -> Self {
        Self {
            magnitudes,
            even_only,
            expected,
        }
    }
}

impl fmt::Display for SeedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = &self.magnitudes;
        write!(f, "({}, {}, {}, {})", m[0], m[1], m[2], m[3])?;
        if self.even_only {
            f.write_str(" even")?;
        }
        Ok(())
    }
}

#[inline]
pub fn is_even_permutation(p: &[usize]) -> bool {
    inversions(p) % 2 == 0
}

/// Signed (and optionally parity-restricted) permutations of `magnitudes`,
/// deduplicated by tag, in enumeration order.
pub fn signed_permutations(magnitudes: [Magnitude; 4], even_only: bool) -> Vec<SymbolicPoint> {
    let perms: Vec<[usize; 4]> = permutations4()
        .into_iter()
        .filter(|p| !even_only || is_even_permutation(p))
        .collect();
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for s in 0..16u32 {
        let signed: [Coord; 4] =
            std::array::from_fn(|i| Coord::new(magnitudes[i], (s >> i) & 1 == 1));
        for p in &perms {
            let point = SymbolicPoint(std::array::from_fn(|k| signed[p[k]]));
            if seen.insert(point) {
                out.push(point);
            }
        }
    }
    out
}

/// Full orbit of a seed, checked against its expected cardinality.
pub fn orbit(seed: &SeedPoint) -> Result<Vec<SymbolicPoint>, PipelineError> {
    let points = signed_permutations(seed.magnitudes, seed.even_only);
    if points.len() != seed.expected {
        return Err(PipelineError::OrbitSizeMismatch {
            seed: seed.to_string(),
            expected: seed.expected,
            found: points.len(),
        });
    }
    Ok(points)
}
