//! Structural faults raised by the pipeline.
//!
//! Every variant is fatal: consumers of the export assume exact combinatorial
//! counts, so the pipeline aborts instead of producing partial tables.

use std::fmt;

/// Errors surfaced by any pipeline stage.
#[derive(Clone, Debug, PartialEq)]
pub enum PipelineError {
    /// A seed expanded to the wrong number of orbit points.
    OrbitSizeMismatch {
        seed: String,
        expected: usize,
        found: usize,
    },
    /// The assembled solid has the wrong number of distinct vertices.
    PolytopeSizeMismatch {
        solid: &'static str,
        expected: usize,
        found: usize,
    },
    /// A cell did not collect exactly 20 large-solid vertices.
    CellSizeMismatch {
        cell: usize,
        expected: usize,
        found: usize,
    },
    /// A small-solid vertex did not find exactly 12 neighbors.
    NeighborCountMismatch {
        vertex: usize,
        expected: usize,
        found: usize,
    },
    /// `b` lists `a` as a neighbor but not vice versa.
    NeighborAsymmetry { a: usize, b: usize },
    /// Two adjacent cells do not share exactly one pentagonal wall.
    WallSizeMismatch {
        a: usize,
        b: usize,
        expected: usize,
        found: usize,
    },
    /// A cell index outside `0..120` was requested.
    UnknownCell { cell: usize },
    /// A correspondence was requested for cells that are not adjacent.
    NotAdjacent { reference: usize, neighbor: usize },
    /// The neighbor center has no usable leading-three-coordinate axis.
    DegenerateAxis { neighbor: usize },
    /// An adjacent-cell point matched zero or several rotated reference points.
    CorrespondenceAmbiguous {
        reference: usize,
        neighbor: usize,
        point: usize,
        matches: usize,
    },
    /// The least-squares system could not be solved.
    SolveFailed { reference: usize, neighbor: usize },
    /// The solved transform does not reproduce the reference frame.
    CorrespondenceResidual {
        reference: usize,
        neighbor: usize,
        check: &'static str,
        residual: f64,
    },
    /// No projection of the cell produced a 36-triangle hull.
    TriangulationFailed { cell: usize, attempts: usize },
    /// The near/far bands of a pentagon do not single out one corner ordering.
    CornerOrderingAmbiguous {
        cell: usize,
        face: usize,
        near: usize,
        far: usize,
    },
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::OrbitSizeMismatch {
                seed,
                expected,
                found,
            } => write!(
                f,
                "orbit of seed {seed} has {found} points (expected {expected})"
            ),
            PipelineError::PolytopeSizeMismatch {
                solid,
                expected,
                found,
            } => write!(
                f,
                "{solid} has {found} distinct vertices (expected {expected})"
            ),
            PipelineError::CellSizeMismatch {
                cell,
                expected,
                found,
            } => write!(
                f,
                "cell {cell} has {found} vertices at the cell radius (expected {expected})"
            ),
            PipelineError::NeighborCountMismatch {
                vertex,
                expected,
                found,
            } => write!(
                f,
                "vertex {vertex} has {found} neighbors at the edge distance (expected {expected})"
            ),
            PipelineError::NeighborAsymmetry { a, b } => {
                write!(f, "neighbor relation is not symmetric for ({a}, {b})")
            }
            PipelineError::WallSizeMismatch {
                a,
                b,
                expected,
                found,
            } => write!(
                f,
                "cells {a} and {b} share {found} vertices (expected a wall of {expected})"
            ),
            PipelineError::UnknownCell { cell } => write!(f, "no cell with index {cell}"),
            PipelineError::NotAdjacent {
                reference,
                neighbor,
            } => write!(f, "cells {reference} and {neighbor} are not adjacent"),
            PipelineError::DegenerateAxis { neighbor } => write!(
                f,
                "center of cell {neighbor} has a zero leading-three-coordinate axis"
            ),
            PipelineError::CorrespondenceAmbiguous {
                reference,
                neighbor,
                point,
                matches,
            } => write!(
                f,
                "point {point} of cell {neighbor} matches {matches} rotated points of cell {reference} (expected 1)"
            ),
            PipelineError::SolveFailed {
                reference,
                neighbor,
            } => write!(
                f,
                "least-squares solve failed for cells {neighbor} -> {reference}"
            ),
            PipelineError::CorrespondenceResidual {
                reference,
                neighbor,
                check,
                residual,
            } => write!(
                f,
                "transform {neighbor} -> {reference} fails {check} check (residual {residual:.3e})"
            ),
            PipelineError::TriangulationFailed { cell, attempts } => write!(
                f,
                "cell {cell} did not triangulate to 36 triangles after {attempts} attempts"
            ),
            PipelineError::CornerOrderingAmbiguous {
                cell,
                face,
                near,
                far,
            } => write!(
                f,
                "face {face} of cell {cell} has no canonical corner ordering ({near} near, {far} far candidates)"
            ),
        }
    }
}

impl std::error::Error for PipelineError {}
