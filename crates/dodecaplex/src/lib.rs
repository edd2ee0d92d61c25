//! Exact 120-cell / 600-cell geometry and per-cell surface export.
//!
//! Pipeline
//! - `orbit` + `polytope`: the 600 dodecaplex and 120 tetraplex vertices from
//!   signed-permutation orbits of symbolic seed points.
//! - `cells` + `neighbors`: the 120 dodecahedral cells (keyed by tetraplex
//!   vertex) and the 12-neighbor graph that doubles as cell adjacency.
//! - `correspondence`: half-turn matching and best-fit 4×4 maps from each
//!   neighbor of a reference cell back onto it.
//! - `hull`: 36-triangle surfaces per cell, triangle adjacency across cells,
//!   and canonical pentagon corner orderings.
//! - `export`: flat tables for JSON and C headers.
//!
//! API Policy
//! - There is no stable public API; `api` is the curated surface used by the
//!   CLI and benches.

pub mod api;
pub mod cells;
pub mod census;
pub mod cfg;
pub mod correspondence;
pub mod distance;
pub mod error;
pub mod export;
pub mod geometry;
pub mod hull;
pub mod neighbors;
pub mod orbit;
pub mod pipeline;
pub mod polytope;
pub mod scalar;
mod util;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::PipelineError;
pub use nalgebra::{Matrix4 as Mat4, Vector4 as Vec4};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::cfg::Tolerances;
    pub use crate::error::PipelineError;
    pub use crate::export::Export;
    pub use crate::pipeline::{run, PipelineCfg, PipelineOutput};
    pub use crate::polytope::{dodecaplex, tetraplex, Polytope, Vertex};
    pub use nalgebra::{Matrix4 as Mat4, Vector4 as Vec4};
}
