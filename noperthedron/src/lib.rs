//! Noperthedron construction
//!
//! The vertex set is the orbit of three seed points under 30 signed rotations
//! about the z axis. Its convex hull, computed by `noperthedron-hull`, is
//! assembled into a validated closed mesh and handed to a [`MeshSink`].
//!
//! # Example
//! ```
//! use noperthedron::{MemorySink, Pipeline};
//!
//! let mut sink = MemorySink::new();
//! let output = Pipeline::default().run(&mut sink).unwrap();
//!
//! assert_eq!(output.points.len(), 90);
//! assert_eq!(output.mesh.euler_characteristic(), 2);
//! assert_eq!(sink.meshes()[0].name, "Noperthedron");
//! ```

mod config;
mod error;
mod group;
mod matrix;
mod pipeline;
mod seeds;
mod sink;
mod vertices;

pub use config::PipelineConfig;
pub use error::{NoperthedronError, Result};
pub use group::{NOPERTHEDRON_ROTATIONS, SIGNS, TransformGroup};
pub use matrix::Matrix3;
pub use pipeline::{MeshSummary, Pipeline, PipelineOutput, build_noperthedron};
pub use seeds::{C_1, C_2, C_3, SeedSet};
pub use sink::{JsonSink, MemorySink, MeshSink, RegisteredMesh};
pub use vertices::{PointCloud, generate_vertices};

pub use noperthedron_hull::{ConvexHull3D, FaceMode, HullConfig, HullMesh, Point3};
