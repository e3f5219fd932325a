//! Bake the built-in procedural meshes and print a JSON report.
//!
//! Useful for eyeballing baked values and for checking that batch size and
//! worker count leave the output unchanged.
//!
//! Run: `cargo run -p smoothnormal --features test-tools --bin bake_report -- [--octahedral] [--batch-size N] [--threads N]`

use std::env;
use std::process;

use serde_json::{Value, json};
use smoothnormal::primitives::{hard_cube, single_triangle};
use smoothnormal::{AccumulatedNormals, BakeConfig, BakedNormals, OutputMode, OwnedMesh, bake};

/// Number of leading baked values included per mesh.
const PREVIEW_LEN: usize = 6;

fn main() {
    tracing_subscriber::fmt::init();

    let config = match parse_args(env::args().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("usage: bake_report [--octahedral] [--batch-size N] [--threads N]");
            process::exit(2);
        }
    };

    let mut reports = Vec::new();
    for mesh in [single_triangle(), hard_cube(0.5)] {
        match report_mesh(&mesh, &config) {
            Ok(report) => reports.push(report),
            Err(e) => {
                eprintln!("Failed to bake '{}': {e}", mesh.name);
                process::exit(1);
            }
        }
    }

    let output = json!({
        "mode": format!("{:?}", config.mode),
        "batch_size": config.effective_batch_size(),
        "threads": config.threads,
        "meshes": reports,
    });
    match serde_json::to_string_pretty(&output) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("Failed to serialize report: {e}");
            process::exit(1);
        }
    }
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<BakeConfig, String> {
    let mut config = BakeConfig::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--octahedral" => config = config.with_mode(OutputMode::Octahedral),
            "--batch-size" => config = config.with_batch_size(parse_count(&arg, args.next())?),
            "--threads" => config = config.with_threads(parse_count(&arg, args.next())?),
            other => return Err(format!("unknown argument: {other}")),
        }
    }
    Ok(config)
}

fn parse_count(flag: &str, value: Option<String>) -> Result<usize, String> {
    let value = value.ok_or(format!("{flag} needs a value"))?;
    value
        .parse()
        .map_err(|e| format!("{flag}: invalid count '{value}': {e}"))
}

fn report_mesh(mesh: &OwnedMesh, config: &BakeConfig) -> Result<Value, smoothnormal::BakeError> {
    let attributes = mesh.attributes();
    let accumulated = AccumulatedNormals::build(&mesh.positions, &mesh.normals);
    let baked = bake(&attributes, &accumulated, config)?;

    let preview: Vec<Value> = match &baked {
        BakedNormals::Tangent(values) => values
            .iter()
            .take(PREVIEW_LEN)
            .map(|v| json!(v.to_array()))
            .collect(),
        BakedNormals::Octahedral(values) => values
            .iter()
            .take(PREVIEW_LEN)
            .map(|v| json!(v.to_array()))
            .collect(),
    };

    Ok(json!({
        "name": mesh.name,
        "vertex_count": mesh.vertex_count(),
        "triangle_count": mesh.triangle_count(),
        "unique_positions": accumulated.len(),
        "baked_count": baked.len(),
        "first_baked": preview,
    }))
}
