//! End-to-end checks of the surface stage on the real solids.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::OnceLock;

use nalgebra::Vector4;

use super::*;
use crate::cells::{partition_cells, Cell};
use crate::cfg::Tolerances;
use crate::correspondence::{CorrespondenceSolver, CorrespondenceTransform};
use crate::distance::DistanceIndex;
use crate::error::PipelineError;
use crate::geometry::dodecaplex_edge;
use crate::neighbors::map_neighbors;
use crate::polytope::{dodecaplex, tetraplex};

struct Fixture {
    verts: Vec<Vector4<f64>>,
    cells: Vec<Cell>,
    transforms: Vec<CorrespondenceTransform>,
    surfaces: Vec<CellSurface>,
}

fn fixture() -> &'static Fixture {
    static FIXTURE: OnceLock<Fixture> = OnceLock::new();
    FIXTURE.get_or_init(|| {
        let verts = dodecaplex().unwrap().positions();
        let centers = tetraplex().unwrap().positions();
        let index = DistanceIndex::default();
        let cells = partition_cells(&verts, &centers, &index).unwrap();
        let map = map_neighbors(&centers, &index).unwrap();
        let transforms = CorrespondenceSolver::default()
            .solve_primary(&cells, &map, &verts, 0)
            .unwrap();
        let surfaces = HullTriangulator::new(&verts, &transforms, Tolerances::default())
            .triangulate_all(&cells)
            .unwrap();
        Fixture {
            verts,
            cells,
            transforms,
            surfaces,
        }
    })
}

#[test]
fn every_cell_has_twelve_pentagons_and_36_triangles() {
    let fx = fixture();
    assert_eq!(fx.surfaces.len(), 120);
    for (s, cell) in fx.surfaces.iter().zip(&fx.cells) {
        assert_eq!(s.cell, cell.index);
        assert_eq!(s.faces.len(), 12);
        assert_eq!(s.triangles.len(), 36);
        for (t, tri) in s.triangles.iter().enumerate() {
            assert_eq!(tri.face, t / 3);
            for g in tri.vertices {
                assert!(cell.members.binary_search(&g).is_ok());
            }
        }
        for ring in &s.faces {
            assert_eq!(ring[0], *ring.iter().min().unwrap());
        }
    }
}

#[test]
fn pentagon_rings_follow_dodecahedron_edges() {
    let fx = fixture();
    let edge = dodecaplex_edge();
    for s in &fx.surfaces {
        for ring in &s.faces {
            for k in 0..5 {
                let d = (fx.verts[ring[k]] - fx.verts[ring[(k + 1) % 5]]).norm();
                assert!((d - edge).abs() < 1e-9, "cell {} ring {ring:?}", s.cell);
            }
        }
    }
}

#[test]
fn flat_cells_recover_through_transforms() {
    let fx = fixture();
    let mut histogram: BTreeMap<usize, usize> = BTreeMap::new();
    for s in &fx.surfaces {
        *histogram.entry(s.attempts).or_default() += 1;
    }
    assert_eq!(histogram.get(&1), Some(&90));
    assert_eq!(histogram.values().sum::<usize>(), 120);
    assert!(histogram.keys().all(|&a| a <= fx.transforms.len() + 1));
    // a cell whose center has w = 0 never succeeds on the plain projection
    for (s, cell) in fx.surfaces.iter().zip(&fx.cells) {
        assert_eq!(s.attempts > 1, cell.center.w.abs() < 1e-9, "cell {}", s.cell);
    }
}

#[test]
fn no_transforms_means_flat_cells_fail() {
    let fx = fixture();
    let flat = fx.cells.iter().find(|c| c.center.w.abs() < 1e-9).unwrap();
    let err = HullTriangulator::new(&fx.verts, &[], Tolerances::default())
        .triangulate(flat)
        .unwrap_err();
    assert_eq!(
        err,
        PipelineError::TriangulationFailed {
            cell: flat.index,
            attempts: 1
        }
    );
}

#[test]
fn every_triangle_is_shared_by_exactly_two_cells() {
    let fx = fixture();
    let mut owners: HashMap<[usize; 3], HashSet<usize>> = HashMap::new();
    for s in &fx.surfaces {
        for t in &s.triangles {
            owners.entry(t.key()).or_default().insert(t.cell);
        }
    }
    assert_eq!(owners.len(), 2160);
    assert!(owners.values().all(|cells| cells.len() == 2));

    let adj = TriangleAdjacency::build(&fx.surfaces);
    assert_eq!(adj.unmatched(), 0);
    for s in &fx.surfaces {
        for (t, tri) in s.triangles.iter().enumerate() {
            let twin = adj.get(s.cell, t).unwrap();
            assert_ne!(twin.cell, s.cell);
            assert_eq!(fx.surfaces[twin.cell].triangles[twin.triangle].key(), tri.key());
            // adjacency is an involution
            assert_eq!(adj.get(twin.cell, twin.triangle), Some(TriangleRef { cell: s.cell, triangle: t }));
        }
    }
}

#[test]
fn corner_orderings_are_canonical_for_every_face() {
    let fx = fixture();
    let corners = all_corners(&fx.surfaces, &fx.verts, &DistanceIndex::default()).unwrap();
    assert_eq!(corners.len(), 120);
    let edge = dodecaplex_edge();
    for (s, rows) in fx.surfaces.iter().zip(&corners) {
        assert_eq!(rows.len(), 36);
        for (tri, order) in s.triangles.iter().zip(rows) {
            let mut members = *order;
            members.sort_unstable();
            let mut face = s.faces[tri.face].clone();
            face.sort_unstable();
            assert_eq!(members.to_vec(), face);
            assert_eq!(order[0], face[0]);
            for k in 0..5 {
                let d = (fx.verts[order[k]] - fx.verts[order[(k + 1) % 5]]).norm();
                assert!((d - edge).abs() < 1e-9);
            }
        }
    }
}
