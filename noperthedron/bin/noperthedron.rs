//! Build the Noperthedron and write its mesh as JSON
//!
//! Usage:
//!     cargo run --release --bin noperthedron -- --output noperthedron.json
//!     RUST_LOG=info cargo run --bin noperthedron -- --summary-only

use anyhow::Context;
use clap::Parser;
use noperthedron::{FaceMode, JsonSink, MeshSummary, NoperthedronError, Pipeline, PipelineConfig};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "noperthedron")]
#[command(about = "Generate the Noperthedron point cloud and its convex hull mesh")]
struct Args {
    /// Path to JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Emit the raw hull triangulation instead of merged polygons
    #[arg(long)]
    triangulate: bool,

    /// Output JSON file path (stdout when absent)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the generated points before the mesh
    #[arg(long)]
    dump_points: bool,

    /// Print counts and measures only, without the mesh
    #[arg(long)]
    summary_only: bool,
}

fn print_summary(summary: &MeshSummary) {
    println!("Mesh:             {}", summary.name);
    println!("Generated points: {}", summary.generated_points);
    println!("Vertices:         {}", summary.vertices);
    println!("Edges:            {}", summary.edges);
    println!("Faces:            {}", summary.faces);
    for (size, count) in &summary.face_sizes {
        println!("  {:>3}-gons:       {}", size, count);
    }
    println!("V - E + F:        {}", summary.euler_characteristic);
    println!("Volume:           {:.12}", summary.volume);
    println!("Surface area:     {:.12}", summary.surface_area);
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => PipelineConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => PipelineConfig::default(),
    };
    if args.triangulate {
        config.face_mode = FaceMode::Triangles;
    }

    let pipeline = Pipeline::new(config);

    if args.dump_points {
        let points = pipeline.points()?;
        for (i, p) in points.points().iter().enumerate() {
            eprintln!("{:>3}: {:+.16} {:+.16} {:+.16}", i, p.x, p.y, p.z);
        }
    }

    if args.summary_only {
        let output = pipeline.build()?;
        print_summary(&output.summary());
        return Ok(());
    }

    let output = match &args.output {
        Some(path) => {
            let output = pipeline
                .run_with(|| {
                    File::create(path)
                        .map(|file| JsonSink::pretty(BufWriter::new(file)))
                        .map_err(|e| {
                            NoperthedronError::Sink(format!(
                                "Failed to create {}: {}",
                                path.display(),
                                e
                            ))
                        })
                })
                .with_context(|| format!("writing {}", path.display()))?;
            log::info!("Mesh written to {}", path.display());
            output
        }
        None => {
            let mut sink = JsonSink::new(io::stdout().lock());
            pipeline.run(&mut sink)?
        }
    };

    let summary = output.summary();
    eprintln!(
        "{}: {} vertices, {} edges, {} faces",
        summary.name, summary.vertices, summary.edges, summary.faces
    );

    Ok(())
}
