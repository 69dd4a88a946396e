//! Seeds and group to point cloud, hull, mesh and sink

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::group::TransformGroup;
use crate::seeds::SeedSet;
use crate::sink::MeshSink;
use crate::vertices::{PointCloud, generate_vertices};
use noperthedron_hull::{ConvexHull3D, HullMesh};
use serde::Serialize;

/// Everything a run produced
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Name the mesh was (or would be) registered under
    pub name: String,
    /// The generated candidate vertices
    pub points: PointCloud,
    /// The validated hull mesh
    pub mesh: HullMesh,
}

/// Counts and measures of a finished mesh
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeshSummary {
    pub name: String,
    pub generated_points: usize,
    pub vertices: usize,
    pub edges: usize,
    pub faces: usize,
    pub euler_characteristic: i64,
    /// `(face size, count)` pairs, ascending by size
    pub face_sizes: Vec<(usize, usize)>,
    pub volume: f64,
    pub surface_area: f64,
}

impl PipelineOutput {
    pub fn summary(&self) -> MeshSummary {
        MeshSummary {
            name: self.name.clone(),
            generated_points: self.points.len(),
            vertices: self.mesh.vertex_count(),
            edges: self.mesh.edge_count(),
            faces: self.mesh.face_count(),
            euler_characteristic: self.mesh.euler_characteristic(),
            face_sizes: self.mesh.face_size_histogram(),
            volume: self.mesh.volume(),
            surface_area: self.mesh.surface_area(),
        }
    }
}

/// A configured run over a seed set
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    seeds: SeedSet,
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            seeds: SeedSet::NOPERTHEDRON,
            config,
        }
    }

    /// Replace the orbit representatives
    pub fn with_seeds(mut self, seeds: SeedSet) -> Self {
        self.seeds = seeds;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn seeds(&self) -> &SeedSet {
        &self.seeds
    }

    /// Generate the 90-point cloud only
    pub fn points(&self) -> Result<PointCloud> {
        let group = TransformGroup::noperthedron()?;
        generate_vertices(&self.seeds, &group)
    }

    /// Build the mesh without handing it off
    pub fn build(&self) -> Result<PipelineOutput> {
        let points = self.points()?;
        log::info!("Noperthedron created with {} vertices", points.len());

        let hull = ConvexHull3D::build_with_config(points.points(), &self.config.hull)?;
        let mesh = HullMesh::from_hull(&hull, self.config.face_mode)?;

        Ok(PipelineOutput {
            name: self.config.mesh_name.clone(),
            points,
            mesh,
        })
    }

    /// Build the mesh and register it with `sink`
    ///
    /// The sink only sees a mesh that passed validation; any earlier failure
    /// leaves it untouched.
    pub fn run<S: MeshSink + ?Sized>(&self, sink: &mut S) -> Result<PipelineOutput> {
        let output = self.build()?;
        Self::register(&output, sink)?;
        Ok(output)
    }

    /// Build the mesh, then open a sink with `make_sink` and register it
    ///
    /// `make_sink` is only called once the mesh is valid, so a failed build
    /// never creates the destination.
    pub fn run_with<S, F>(&self, make_sink: F) -> Result<PipelineOutput>
    where
        S: MeshSink,
        F: FnOnce() -> Result<S>,
    {
        let output = self.build()?;
        let mut sink = make_sink()?;
        Self::register(&output, &mut sink)?;
        Ok(output)
    }

    fn register<S: MeshSink + ?Sized>(output: &PipelineOutput, sink: &mut S) -> Result<()> {
        sink.register(&output.name, output.mesh.vertices(), output.mesh.faces())?;
        log::info!(
            "Registered mesh '{}': {} vertices, {} faces",
            output.name,
            output.mesh.vertex_count(),
            output.mesh.face_count()
        );
        Ok(())
    }
}

/// Build the Noperthedron with default settings and register it with `sink`
pub fn build_noperthedron<S: MeshSink + ?Sized>(sink: &mut S) -> Result<PipelineOutput> {
    Pipeline::default().run(sink)
}
