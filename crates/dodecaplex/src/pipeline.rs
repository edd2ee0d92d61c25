//! End-to-end run: seeds → solids → cells → neighbors → transforms → surfaces.

use nalgebra::Vector4;
use tracing::info;

use crate::cells::{partition_cells, verify_walls, Cell};
use crate::census::{
    attempt_histogram, displacement_census, neighbor_centroid_deviation, projection_collisions,
    Census,
};
use crate::cfg::Tolerances;
use crate::correspondence::{CorrespondenceSolver, CorrespondenceTransform};
use crate::distance::DistanceIndex;
use crate::error::PipelineError;
use crate::hull::{all_corners, CellSurface, HullTriangulator, TriangleAdjacency};
use crate::neighbors::{map_neighbors, NeighborMap};
use crate::polytope::{dodecaplex, tetraplex, Polytope};

/// Run parameters. Only the poles, cells 0 and 4 at `(0, 0, 0, ±1)`, give a
/// bijective matching for all twelve neighbors. The other 118 reference cells
/// fail: the 24 cells next to a pole with `DegenerateAxis`, the rest with
/// `CorrespondenceAmbiguous`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PipelineCfg {
    pub tolerances: Tolerances,
    pub reference_cell: usize,
}

impl Default for PipelineCfg {
    fn default() -> Self {
        Self {
            tolerances: Tolerances::default(),
            reference_cell: 0,
        }
    }
}

/// Everything the pipeline produces, owned and immutable once built.
#[derive(Clone, Debug)]
pub struct PipelineOutput {
    pub dodecaplex: Polytope,
    pub tetraplex: Polytope,
    pub cells: Vec<Cell>,
    pub neighbors: NeighborMap,
    pub transforms: Vec<CorrespondenceTransform>,
    pub surfaces: Vec<CellSurface>,
    pub adjacency: TriangleAdjacency,
    /// `corners[cell][triangle]`, global indices.
    pub corners: Vec<Vec<[usize; 5]>>,
}

impl PipelineOutput {
    pub fn vertex_positions(&self) -> Vec<Vector4<f64>> {
        self.dodecaplex.positions()
    }

    pub fn center_positions(&self) -> Vec<Vector4<f64>> {
        self.tetraplex.positions()
    }

    pub fn census(&self, eps: f64) -> Census {
        let centers = self.center_positions();
        Census {
            displacements: displacement_census(&centers, &self.neighbors, eps),
            centroid_deviation: neighbor_centroid_deviation(&centers, &self.neighbors),
            dodecaplex_collisions: projection_collisions(&self.vertex_positions(), eps),
            tetraplex_collisions: projection_collisions(&centers, eps),
            hull_attempts: attempt_histogram(&self.surfaces),
        }
    }
}

pub fn run(cfg: &PipelineCfg) -> Result<PipelineOutput, PipelineError> {
    let index = DistanceIndex::new(cfg.tolerances.band);

    let dodecaplex = dodecaplex()?;
    let tetraplex = tetraplex()?;
    info!(
        dodecaplex = dodecaplex.len(),
        tetraplex = tetraplex.len(),
        "solids"
    );
    let verts = dodecaplex.positions();
    let centers = tetraplex.positions();

    let cells = partition_cells(&verts, &centers, &index)?;
    let neighbors = map_neighbors(&centers, &index)?;
    verify_walls(&cells, &neighbors)?;
    info!(
        cells = cells.len(),
        edges = neighbors.edges().len(),
        "cells and walls"
    );

    let transforms = CorrespondenceSolver::new(cfg.tolerances).solve_primary(
        &cells,
        &neighbors,
        &verts,
        cfg.reference_cell,
    )?;
    let worst = transforms.iter().map(|t| t.residual).fold(0.0, f64::max);
    info!(
        reference = cfg.reference_cell,
        transforms = transforms.len(),
        max_residual = worst,
        "correspondence"
    );

    let surfaces =
        HullTriangulator::new(&verts, &transforms, cfg.tolerances).triangulate_all(&cells)?;
    let recovered = surfaces.iter().filter(|s| s.attempts > 1).count();
    let adjacency = TriangleAdjacency::build(&surfaces);
    let corners = all_corners(&surfaces, &verts, &index)?;
    info!(
        triangles = surfaces.iter().map(|s| s.triangles.len()).sum::<usize>(),
        recovered,
        unmatched = adjacency.unmatched(),
        "surfaces"
    );

    Ok(PipelineOutput {
        dodecaplex,
        tetraplex,
        cells,
        neighbors,
        transforms,
        surfaces,
        adjacency,
        corners,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_run_produces_full_tables() {
        let out = run(&PipelineCfg::default()).unwrap();
        assert_eq!(out.dodecaplex.len(), 600);
        assert_eq!(out.tetraplex.len(), 120);
        assert_eq!(out.transforms.len(), 12);
        assert_eq!(out.surfaces.len(), 120);
        assert_eq!(out.corners.len(), 120);
        assert!(out.corners.iter().all(|c| c.len() == 36));
        assert_eq!(out.adjacency.unmatched(), 0);
    }

    #[test]
    fn census_matches_known_counts() {
        let out = run(&PipelineCfg::default()).unwrap();
        let census = out.census(1e-4);
        assert_eq!(census.displacements, 120);
        assert!(census.centroid_deviation < 1e-4);
        assert_eq!(census.dodecaplex_collisions.unique, 60);
        assert_eq!(census.tetraplex_collisions.paired, 90);
        assert_eq!(census.hull_attempts.values().sum::<usize>(), 120);
    }

    #[test]
    fn out_of_range_reference_is_reported() {
        let cfg = PipelineCfg {
            reference_cell: 500,
            ..PipelineCfg::default()
        };
        assert_eq!(run(&cfg).unwrap_err(), PipelineError::UnknownCell { cell: 500 });
    }

    fn with_reference(reference_cell: usize) -> PipelineCfg {
        PipelineCfg {
            reference_cell,
            ..PipelineCfg::default()
        }
    }

    #[test]
    fn antipodal_pole_is_a_valid_reference() {
        let out = run(&with_reference(4)).unwrap();
        assert_eq!(out.tetraplex.positions()[4], Vector4::new(0.0, 0.0, 0.0, -1.0));
        assert_eq!(out.transforms.len(), 12);
        assert!(out.transforms.iter().all(|t| t.reference == 4));
        assert_eq!(out.adjacency.unmatched(), 0);
    }

    #[test]
    fn off_pole_reference_fails_matching() {
        let err = run(&with_reference(1)).unwrap_err();
        assert!(
            matches!(
                err,
                PipelineError::CorrespondenceAmbiguous { reference: 1, matches, .. } if matches != 1
            ),
            "{err:?}"
        );
    }

    #[test]
    fn pole_neighbor_reference_fails_on_the_pole_axis() {
        let out = run(&PipelineCfg::default()).unwrap();
        let n = out.neighbors.neighbors(0)[0];
        assert_eq!(
            run(&with_reference(n)).unwrap_err(),
            PipelineError::DegenerateAxis { neighbor: 0 }
        );
    }
}
