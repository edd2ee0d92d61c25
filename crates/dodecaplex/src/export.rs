//! Flat export tables and their C/GLSL header rendering.
//!
//! JSON layout (via serde): `vertices`, `vertex_labels`, `centers`,
//! `triangles[cell][t]`, `triangle_adjacency[cell][t]` as `[cell, triangle]`
//! or `null`, `corners[cell][t]`, `transforms`, `hull_attempts[cell]`.

use std::fmt;

use nalgebra::Vector4;
use serde::Serialize;

use crate::pipeline::PipelineOutput;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TransformRecord {
    pub reference: usize,
    pub neighbor: usize,
    /// Neighbor cell center.
    pub center: [f64; 4],
    pub axis: [f64; 3],
    /// Row-major.
    pub rotation: [[f64; 3]; 3],
    /// Row-major, row-vector convention.
    pub affine: [[f64; 4]; 4],
    pub residual: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Export {
    pub vertices: Vec<[f64; 4]>,
    pub vertex_labels: Vec<String>,
    pub centers: Vec<[f64; 4]>,
    pub triangles: Vec<Vec<[usize; 3]>>,
    pub triangle_adjacency: Vec<Vec<Option<[usize; 2]>>>,
    pub corners: Vec<Vec<[usize; 5]>>,
    pub transforms: Vec<TransformRecord>,
    pub hull_attempts: Vec<usize>,
}

#[inline]
fn arr4(v: &Vector4<f64>) -> [f64; 4] {
    [v.x, v.y, v.z, v.w]
}

impl Export {
    pub fn from_output(out: &PipelineOutput) -> Self {
        let transforms = out
            .transforms
            .iter()
            .map(|t| TransformRecord {
                reference: t.reference,
                neighbor: t.neighbor,
                center: arr4(&out.cells[t.neighbor].center),
                axis: [t.axis.x, t.axis.y, t.axis.z],
                rotation: std::array::from_fn(|i| std::array::from_fn(|j| t.rotation[(i, j)])),
                affine: std::array::from_fn(|i| std::array::from_fn(|j| t.affine[(i, j)])),
                residual: t.residual,
            })
            .collect();
        Self {
            vertices: out.dodecaplex.vertices().iter().map(|v| arr4(&v.position)).collect(),
            vertex_labels: out
                .dodecaplex
                .vertices()
                .iter()
                .map(|v| v.symbolic.to_string())
                .collect(),
            centers: out.tetraplex.vertices().iter().map(|v| arr4(&v.position)).collect(),
            triangles: out
                .surfaces
                .iter()
                .map(|s| s.triangles.iter().map(|t| t.vertices).collect())
                .collect(),
            triangle_adjacency: out
                .adjacency
                .rows()
                .iter()
                .map(|row| row.iter().map(|r| r.map(|r| [r.cell, r.triangle])).collect())
                .collect(),
            corners: out.corners.clone(),
            transforms,
            hull_attempts: out.surfaces.iter().map(|s| s.attempts).collect(),
        }
    }

    /// Render as C++ declarations (floats, index blocks, `glm::vec4` axes,
    /// flattened matrices).
    pub fn to_c_header(&self) -> Result<String, fmt::Error> {
        let mut h = String::new();
        self.write_c_header(&mut h)?;
        Ok(h)
    }

    /// Stream the header into any formatter sink; stops at the first failed
    /// write.
    pub fn write_c_header<W: fmt::Write>(&self, h: &mut W) -> fmt::Result {
        writeln!(h, "#pragma once")?;
        writeln!(h, "// Generated by dodecaplex {}", crate::VERSION)?;
        writeln!(h, "#include <glm/glm.hpp>")?;
        writeln!(h)?;

        writeln!(h, "const float DODECAPLEX_VERTICES[{}] = {{", self.vertices.len() * 4)?;
        for v in &self.vertices {
            writeln!(h, "{}, {}, {}, {},", c_float(v[0]), c_float(v[1]), c_float(v[2]), c_float(v[3]))?;
        }
        writeln!(h, "}};\n")?;

        let tri_count: usize = self.triangles.iter().map(Vec::len).sum();
        writeln!(h, "const unsigned int CELL_TRIANGLES[{}] = {{", tri_count * 3)?;
        for (cell, tris) in self.triangles.iter().enumerate() {
            write!(h, "//------Cell {cell}------")?;
            for (i, [a, b, c]) in tris.iter().enumerate() {
                if i % 6 == 0 {
                    writeln!(h)?;
                }
                write!(h, "{:>15}", format!("{a}, {b}, {c},"))?;
            }
            writeln!(h)?;
        }
        writeln!(h, "}};\n")?;

        writeln!(h, "const int TRIANGLE_NEIGHBOR_CELLS[{tri_count}] = {{")?;
        for row in &self.triangle_adjacency {
            let cells: Vec<String> = row
                .iter()
                .map(|r| r.map_or_else(|| "-1".to_string(), |[c, _]| c.to_string()))
                .collect();
            writeln!(h, "{},", cells.join(", "))?;
        }
        writeln!(h, "}};\n")?;

        writeln!(h, "const unsigned int TEXTURE_CORNERS[{}] = {{", tri_count * 5)?;
        let lines: Vec<String> = self
            .corners
            .iter()
            .flatten()
            .map(|c| c.map(|g| g.to_string()).join(", "))
            .collect();
        writeln!(h, "{}", lines.join(",\n"))?;
        writeln!(h, "}};\n")?;

        writeln!(h, "const glm::vec4 TRANSFORM_AXES[{}] = {{", self.transforms.len())?;
        for t in &self.transforms {
            let c = t.center.map(c_float);
            writeln!(h, "glm::vec4({}),", c.join(","))?;
        }
        writeln!(h, "}};\n")?;

        writeln!(h, "const float TRANSFORM_MATRICES[{}][16] = {{", self.transforms.len())?;
        for t in &self.transforms {
            let flat: Vec<String> = t.affine.iter().flatten().map(|&v| c_float(v)).collect();
            writeln!(h, "{{{}}},", flat.join(","))?;
        }
        writeln!(h, "}};")?;
        Ok(())
    }
}

/// Eight decimals with trailing zeros and a bare trailing point removed.
fn c_float(v: f64) -> String {
    let s = format!("{v:.8}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    match s {
        "-0" | "" => "0".to_string(),
        _ => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{run, PipelineCfg};
    use std::sync::OnceLock;

    fn export() -> &'static Export {
        static EXPORT: OnceLock<Export> = OnceLock::new();
        EXPORT.get_or_init(|| Export::from_output(&run(&PipelineCfg::default()).unwrap()))
    }

    #[test]
    fn c_float_trims() {
        assert_eq!(c_float(2.0), "2");
        assert_eq!(c_float(-0.0), "0");
        assert_eq!(c_float(-1e-12), "0");
        assert_eq!(c_float(0.5), "0.5");
        assert_eq!(c_float(1.618033988749895), "1.61803399");
    }

    #[test]
    fn table_shapes() {
        let e = export();
        assert_eq!(e.vertices.len(), 600);
        assert_eq!(e.vertex_labels.len(), 600);
        assert_eq!(e.centers.len(), 120);
        assert_eq!(e.triangles.len(), 120);
        assert!(e.triangles.iter().all(|t| t.len() == 36));
        assert!(e.triangle_adjacency.iter().flatten().all(Option::is_some));
        assert_eq!(e.transforms.len(), 12);
        assert_eq!(e.hull_attempts.len(), 120);
    }

    #[test]
    fn header_has_one_separator_per_cell() {
        let h = export().to_c_header().unwrap();
        assert_eq!(h.matches("//------Cell ").count(), 120);
        assert!(h.contains("//------Cell 119------"));
        assert_eq!(h.matches("glm::vec4(").count(), 12);
        assert!(h.starts_with("#pragma once"));
    }

    /// Accepts `room` bytes, then refuses.
    struct Bounded {
        room: usize,
    }

    impl fmt::Write for Bounded {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            self.room = self.room.checked_sub(s.len()).ok_or(fmt::Error)?;
            Ok(())
        }
    }

    #[test]
    fn header_write_failure_is_returned() {
        let mut sink = Bounded { room: 64 };
        assert_eq!(export().write_c_header(&mut sink), Err(fmt::Error));
        let full = export().to_c_header().unwrap().len();
        let mut sink = Bounded { room: full };
        assert_eq!(export().write_c_header(&mut sink), Ok(()));
        assert_eq!(sink.room, 0);
    }

    #[test]
    fn json_uses_null_free_adjacency_pairs() {
        let v = serde_json::to_value(export()).unwrap();
        assert_eq!(v["triangle_adjacency"][0][0].as_array().unwrap().len(), 2);
        assert_eq!(v["corners"][0][0].as_array().unwrap().len(), 5);
        assert_eq!(v["transforms"][0]["affine"].as_array().unwrap().len(), 4);
    }
}
