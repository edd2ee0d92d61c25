//! Tabular export via polars: one vertex table and one triangle table.

use crate::provenance::{Artifact, ArtifactKind};
use anyhow::{Context, Result};
use dodecaplex::export::Export;
use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Parquet,
}

impl TableFormat {
    pub fn extension(self) -> &'static str {
        match self {
            TableFormat::Csv => "csv",
            TableFormat::Parquet => "parquet",
        }
    }
}

/// `index, x, y, z, w, label` per dodecaplex vertex.
pub fn vertex_frame(export: &Export) -> PolarsResult<DataFrame> {
    let col = |k: usize| export.vertices.iter().map(|v| v[k]).collect::<Vec<f64>>();
    df!(
        "index" => (0..export.vertices.len() as u32).collect::<Vec<u32>>(),
        "x" => col(0),
        "y" => col(1),
        "z" => col(2),
        "w" => col(3),
        "label" => export.vertex_labels.clone(),
    )
}

/// One row per (cell, triangle): vertices, twin triangle and corner ordering.
pub fn triangle_frame(export: &Export) -> PolarsResult<DataFrame> {
    let mut cell = Vec::new();
    let mut triangle = Vec::new();
    let mut verts: [Vec<u32>; 3] = Default::default();
    let mut twin_cell = Vec::new();
    let mut twin_triangle = Vec::new();
    let mut corners: [Vec<u32>; 5] = Default::default();
    for (c, tris) in export.triangles.iter().enumerate() {
        for (t, tri) in tris.iter().enumerate() {
            cell.push(c as u32);
            triangle.push(t as u32);
            for k in 0..3 {
                verts[k].push(tri[k] as u32);
            }
            let twin = export
                .triangle_adjacency
                .get(c)
                .and_then(|row| row.get(t))
                .copied()
                .flatten();
            twin_cell.push(twin.map(|[tc, _]| tc as u32));
            twin_triangle.push(twin.map(|[_, tt]| tt as u32));
            let order = export
                .corners
                .get(c)
                .and_then(|row| row.get(t))
                .copied()
                .unwrap_or_default();
            for k in 0..5 {
                corners[k].push(order[k] as u32);
            }
        }
    }
    let [v0, v1, v2] = verts;
    let [c0, c1, c2, c3, c4] = corners;
    df!(
        "cell" => cell,
        "triangle" => triangle,
        "v0" => v0,
        "v1" => v1,
        "v2" => v2,
        "twin_cell" => twin_cell,
        "twin_triangle" => twin_triangle,
        "corner0" => c0,
        "corner1" => c1,
        "corner2" => c2,
        "corner3" => c3,
        "corner4" => c4,
    )
}

/// `<dir>/<stem>.<table>.<ext>` next to `out`.
pub fn table_path(out: &Path, table: &str, format: TableFormat) -> PathBuf {
    let stem = out
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "dodecaplex".to_string());
    out.with_file_name(format!("{stem}.{table}.{}", format.extension()))
}

fn write_frame(df: &mut DataFrame, path: &Path, format: TableFormat) -> Result<()> {
    let mut file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    match format {
        TableFormat::Csv => {
            CsvWriter::new(&mut file)
                .include_header(true)
                .finish(df)
                .with_context(|| format!("writing {}", path.display()))?;
        }
        TableFormat::Parquet => {
            ParquetWriter::new(&mut file)
                .finish(df)
                .with_context(|| format!("writing {}", path.display()))?;
        }
    }
    Ok(())
}

/// Write both tables and describe what was written.
pub fn write_tables(export: &Export, out: &Path, format: TableFormat) -> Result<Vec<Artifact>> {
    let mut written = Vec::with_capacity(2);
    for (table, kind, frame) in [
        ("vertices", ArtifactKind::VertexTable, vertex_frame(export)),
        ("triangles", ArtifactKind::TriangleTable, triangle_frame(export)),
    ] {
        let mut df = frame.with_context(|| format!("building {table} table"))?;
        let path = table_path(out, table, format);
        write_frame(&mut df, &path, format)?;
        tracing::info!(table, rows = df.height(), path = %path.display(), "table");
        written.push(Artifact::table(path, kind, df.height()));
    }
    Ok(written)
}
