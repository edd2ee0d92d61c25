//! Cell surfaces: hull triangulation, triangle adjacency and corner orderings.
//!
//! Purpose
//! - Turn each 20-vertex cell into 12 pentagons and 36 triangles in global
//!   dodecaplex indices, then cross-reference triangles between cells and
//!   attach a canonical five-corner ordering to each pentagon.
//!
//! Why this design
//! - The hull is computed on the xyz projection. Thirty cells lie in
//!   hyperplanes parallel to the w axis and project flat; for those the
//!   correspondence transforms of the reference cell are applied to the
//!   original points, one at a time, until the projection is full-dimensional.
//! - Pentagons are fanned from their smallest global index, so the two cells
//!   sharing a pentagon emit identical triangle vertex sets and adjacency is a
//!   plain key lookup.
//!
//! Layout
//! - `convex.rs` (brute-force 3D hull), `triangulate.rs` (per-cell surface and
//!   recovery), `adjacency.rs` (twin triangles), `corners.rs` (corner orderings).

mod adjacency;
mod convex;
mod corners;
mod triangulate;

pub use adjacency::{TriangleAdjacency, TriangleRef};
pub use convex::{hull_faces, HullFace};
pub use corners::{all_corners, cell_corners, corner_ordering, Ambiguity};
pub use triangulate::{fan, rotate_to_min, CellSurface, HullTriangulator, Triangle};

#[cfg(test)]
mod tests;
