//! Closed-form distances between and within the two solids.
//!
//! With the dodecaplex at radius 2√2 and the tetraplex on the unit sphere,
//! these are the only lengths the pipeline bands against.

use crate::scalar::{PHI, SQRT_5};

/// Distance from a tetraplex vertex to each of the 20 dodecaplex vertices of
/// its cell: √(6 − √5).
#[inline]
pub fn cell_radius() -> f64 {
    (6.0 - SQRT_5).sqrt()
}

/// Tetraplex edge length 1/Φ.
#[inline]
pub fn tetraplex_edge() -> f64 {
    PHI - 1.0
}

/// Dodecaplex edge length 3 − √5 (the "near" corner band).
#[inline]
pub fn dodecaplex_edge() -> f64 {
    3.0 - SQRT_5
}

/// Pentagon diagonal √5 − 1 (the "far" corner band).
#[inline]
pub fn pentagon_diagonal() -> f64 {
    SQRT_5 - 1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagonal_over_edge_is_phi() {
        assert!((pentagon_diagonal() / dodecaplex_edge() - PHI).abs() < 1e-12);
    }

    #[test]
    fn constants_match_decimal_values() {
        assert!((cell_radius() - 1.940_1).abs() < 1e-4);
        assert!((tetraplex_edge() - 0.618_03).abs() < 1e-5);
        assert!((dodecaplex_edge() - 0.763_93).abs() < 1e-5);
        assert!((pentagon_diagonal() - 1.236_07).abs() < 1e-5);
    }
}
