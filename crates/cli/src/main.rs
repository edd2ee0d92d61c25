use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use dodecaplex::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;
mod tables;

use provenance::{Artifact, ArtifactKind};
use tables::TableFormat;

#[derive(Parser)]
#[command(name = "dodecaplex")]
#[command(about = "Build the 120-cell / 600-cell cell tables and export them")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
enum Format {
    Json,
    Header,
    Csv,
    Parquet,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Solid {
    /// 120-cell, 600 vertices
    Large,
    /// 600-cell, 120 vertices
    Small,
}

const REFERENCE_HELP: &str = "Tetraplex cell whose neighbors are solved against. \
Only the poles 0 and 4 succeed; the other 118 cells fail correspondence matching";

#[derive(Subcommand)]
enum Action {
    /// Run the pipeline and write vertices, triangles, adjacency and corners
    Export {
        #[arg(long)]
        out: PathBuf,
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
        #[arg(long, default_value_t = 0, help = REFERENCE_HELP)]
        reference_cell: usize,
    },
    /// Print structural statistics as JSON
    Report {
        #[arg(long, default_value_t = 0, help = REFERENCE_HELP)]
        reference_cell: usize,
    },
    /// List the vertices of one solid with symbolic labels
    Vertices {
        #[arg(long, value_enum, default_value_t = Solid::Large)]
        solid: Solid,
    },
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Export {
            out,
            format,
            reference_cell,
        } => export(&out, format, reference_cell),
        Action::Report { reference_cell } => report(reference_cell),
        Action::Vertices { solid } => vertices(solid),
    }
}

fn pipeline_cfg(reference_cell: usize) -> PipelineCfg {
    PipelineCfg {
        reference_cell,
        ..PipelineCfg::default()
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    Ok(())
}

fn export(out: &Path, format: Format, reference_cell: usize) -> Result<()> {
    tracing::info!(out = %out.display(), ?format, reference_cell, "export");
    let cfg = pipeline_cfg(reference_cell);
    let output = run(&cfg).context("pipeline run")?;
    let export = Export::from_output(&output);

    ensure_parent(out)?;
    let written = match format {
        Format::Json => {
            std::fs::write(out, serde_json::to_vec_pretty(&export)?)
                .with_context(|| format!("writing {}", out.display()))?;
            vec![Artifact::file(out, ArtifactKind::Json)]
        }
        Format::Header => {
            let header = export.to_c_header().context("rendering header")?;
            std::fs::write(out, header).with_context(|| format!("writing {}", out.display()))?;
            vec![Artifact::file(out, ArtifactKind::Header)]
        }
        Format::Csv => tables::write_tables(&export, out, TableFormat::Csv)?,
        Format::Parquet => tables::write_tables(&export, out, TableFormat::Parquet)?,
    };

    let params = serde_json::json!({
        "format": format,
        "reference_cell": reference_cell,
        "band_tol": cfg.tolerances.band,
        "point_tol": cfg.tolerances.point,
        "hull_recoveries": export.hull_attempts.iter().filter(|&&a| a > 1).count(),
    });
    for artifact in &written {
        let prov = provenance::write_sidecar(artifact, params.clone())?;
        tracing::info!(
            artifact = %artifact.path.display(),
            kind = ?artifact.kind,
            provenance = %prov.display(),
            "wrote"
        );
    }
    Ok(())
}

fn report(reference_cell: usize) -> Result<()> {
    let cfg = pipeline_cfg(reference_cell);
    let output = run(&cfg).context("pipeline run")?;
    let census = output.census(cfg.tolerances.point);
    let obj = serde_json::json!({
        "code_rev": provenance::current_git_rev(),
        "dodecaplex_version": dodecaplex::VERSION,
        "params": { "reference_cell": reference_cell },
        "census": census,
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

fn vertices(solid: Solid) -> Result<()> {
    let polytope = match solid {
        Solid::Large => dodecaplex(),
        Solid::Small => tetraplex(),
    }
    .context("building solid")?;
    tracing::info!(solid = polytope.name, count = polytope.len(), "vertices");
    for v in polytope.vertices() {
        let p = v.position;
        println!(
            "{}  [{:+.6}, {:+.6}, {:+.6}, {:+.6}]",
            v.labeled(),
            p.x,
            p.y,
            p.z,
            p.w
        );
    }
    Ok(())
}
