//! Tolerance defaults and structural counts (internal).
//!
//! Policy
//! - The two tolerances are part of the output contract, not tuning knobs:
//!   `1e-2` absolute for distance banding, `1e-4` for point equality.
//! - They are fixed constants; `Tolerances` only exists so tests and the CLI
//!   can thread them explicitly instead of reaching for globals.

/// Absolute half-width of every distance band (cells, neighbors, corners, axis matching).
pub(crate) const BAND_TOL: f64 = 1e-2;
/// Point/plane equality epsilon (hull membership, displacement dedup).
pub(crate) const POINT_EPS: f64 = 1e-4;
/// Singular-value cutoff for the least-squares solve.
pub(crate) const SVD_EPS: f64 = 1e-12;

/// Vertices of the large solid.
pub const DODECAPLEX_VERTICES: usize = 600;
/// Vertices of the small solid (= number of cells).
pub const TETRAPLEX_VERTICES: usize = 120;
/// Large-solid vertices per cell.
pub const CELL_SIZE: usize = 20;
/// Small-solid neighbors per vertex.
pub const NEIGHBOR_COUNT: usize = 12;
/// Vertices shared by two adjacent cells.
pub const WALL_SIZE: usize = 5;
/// Pentagonal faces per cell.
pub const FACES_PER_CELL: usize = 12;
/// Triangles per cell after fan triangulation of its pentagons.
pub const TRIANGLES_PER_CELL: usize = 36;

/// Tolerances threaded through the pipeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerances {
    /// Absolute half-width of distance bands.
    pub band: f64,
    /// Point/plane equality epsilon.
    pub point: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            band: BAND_TOL,
            point: POINT_EPS,
        }
    }
}
