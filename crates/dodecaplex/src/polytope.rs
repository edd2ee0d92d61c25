//! Vertex sets of the two dual solids.
//!
//! Purpose
//! - Concatenate the orbits of a seed table, dedup by symbolic tag, and assign
//!   stable indices in input order. Every later stage keys data by these
//!   indices, so the order is part of the output contract.
//!
//! Seed tables
//! - Dodecaplex (120-cell, 600 vertices): seven seeds with orbit sizes
//!   24, 64, 64, 64, 96, 96, 192.
//! - Tetraplex (600-cell, 120 vertices): three seeds with orbit sizes 8, 16, 96.
//!   Vertex 0 is `(0, 0, 0, 1)`.

use std::collections::HashSet;

use nalgebra::Vector4;

use crate::cfg::{DODECAPLEX_VERTICES, TETRAPLEX_VERTICES};
use crate::error::PipelineError;
use crate::orbit::{orbit, SeedPoint};
use crate::scalar::{Labeled, Magnitude, SymbolicPoint};

/// Vertex with its stable index and exact symbolic coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    pub index: usize,
    pub symbolic: SymbolicPoint,
    pub position: Vector4<f64>,
}

impl Vertex {
    pub fn labeled(&self) -> Labeled<Vector4<f64>> {
        Labeled::new(self.position, format!("{:>3} {}", self.index, self.symbolic))
    }
}

/// Ordered, deduplicated vertex set of one solid.
#[derive(Clone, Debug)]
pub struct Polytope {
    pub name: &'static str,
    vertices: Vec<Vertex>,
}

impl Polytope {
    /// Assemble a solid from its seed table; fails if any orbit or the total
    /// count is off.
    pub fn build(
        name: &'static str,
        seeds: &[SeedPoint],
        expected: usize,
    ) -> Result<Self, PipelineError> {
        let mut seen = HashSet::new();
        let mut vertices = Vec::with_capacity(expected);
        for seed in seeds {
            for symbolic in orbit(seed)? {
                if seen.insert(symbolic) {
                    vertices.push(Vertex {
                        index: vertices.len(),
                        symbolic,
                        position: symbolic.to_vector(),
                    });
                }
            }
        }
        if vertices.len() != expected {
            return Err(PipelineError::PolytopeSizeMismatch {
                solid: name,
                expected,
                found: vertices.len(),
            });
        }
        Ok(Self { name, vertices })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Vertex> {
        self.vertices.get(index)
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Positions in index order.
    pub fn positions(&self) -> Vec<Vector4<f64>> {
        self.vertices.iter().map(|v| v.position).collect()
    }
}

/// Seeds of the 120-cell (600 vertices, all at radius 2√2).
pub fn dodecaplex_seeds() -> Vec<SeedPoint> {
    use Magnitude::*;
    vec![
        SeedPoint::new([Zero, Zero, Two, Two], false, 24),
        SeedPoint::new([Phi, Phi, Phi, InvPhiSq], false, 64),
        SeedPoint::new([One, One, One, Sqrt5], false, 64),
        SeedPoint::new([InvPhi, InvPhi, InvPhi, PhiSq], false, 64),
        SeedPoint::new([Zero, InvPhi, Phi, Sqrt5], true, 96),
        SeedPoint::new([Zero, InvPhiSq, One, PhiSq], true, 96),
        SeedPoint::new([InvPhi, One, Phi, Two], true, 192),
    ]
}

/// Seeds of the 600-cell (120 vertices on the unit sphere).
pub fn tetraplex_seeds() -> Vec<SeedPoint> {
    use Magnitude::*;
    vec![
        SeedPoint::new([Zero, Zero, Zero, One], false, 8),
        SeedPoint::new([Half, Half, Half, Half], false, 16),
        SeedPoint::new([Zero, HalfPhi, Half, HalfInvPhi], true, 96),
    ]
}

pub fn dodecaplex() -> Result<Polytope, PipelineError> {
    Polytope::build("dodecaplex", &dodecaplex_seeds(), DODECAPLEX_VERTICES)
}

pub fn tetraplex() -> Result<Polytope, PipelineError> {
    Polytope::build("tetraplex", &tetraplex_seeds(), TETRAPLEX_VERTICES)
}
