//! Curated internal API (UNSTABLE).
//!
//! Important
//! - This is not a public API. It is a convenience surface for the CLI and
//!   benches; breaking changes are allowed.

// Numbers and seeds
pub use crate::orbit::{is_even_permutation, orbit, signed_permutations, SeedPoint};
pub use crate::polytope::{
    dodecaplex, dodecaplex_seeds, tetraplex, tetraplex_seeds, Polytope, Vertex,
};
pub use crate::scalar::{Coord, Labeled, Magnitude, SymbolicPoint, PHI, SQRT_5};
// Distances and partitions
pub use crate::cells::{partition_cells, verify_walls, Cell};
pub use crate::cfg::{Tolerances, CELL_SIZE, NEIGHBOR_COUNT, TRIANGLES_PER_CELL};
pub use crate::distance::{distance, DistanceIndex};
pub use crate::geometry::{cell_radius, dodecaplex_edge, pentagon_diagonal, tetraplex_edge};
pub use crate::neighbors::{map_neighbors, NeighborMap};
// Transforms and surfaces
pub use crate::correspondence::{half_turn, CorrespondenceSolver, CorrespondenceTransform};
pub use crate::hull::{
    CellSurface, HullTriangulator, Triangle, TriangleAdjacency, TriangleRef,
};
// Run and export
pub use crate::census::{Census, ProjectionCollisions};
pub use crate::export::{Export, TransformRecord};
pub use crate::pipeline::{run, PipelineCfg, PipelineOutput};
