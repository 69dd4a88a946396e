//! Consumers of the finished mesh
//!
//! The pipeline hands a validated mesh to whatever [`MeshSink`] the caller
//! injects. Two sinks ship with the crate: [`MemorySink`] keeps meshes for
//! inspection and [`JsonSink`] streams them as JSON documents.

use crate::error::{NoperthedronError, Result};
use noperthedron_hull::Point3;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Receiver for a named mesh
pub trait MeshSink {
    /// Accept a mesh; an error aborts the run
    fn register(&mut self, name: &str, vertices: &[Point3], faces: &[Vec<usize>]) -> Result<()>;
}

impl<S: MeshSink + ?Sized> MeshSink for &mut S {
    fn register(&mut self, name: &str, vertices: &[Point3], faces: &[Vec<usize>]) -> Result<()> {
        (**self).register(name, vertices, faces)
    }
}

/// A mesh as it was handed to a sink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisteredMesh {
    pub name: String,
    pub vertices: Vec<Point3>,
    pub faces: Vec<Vec<usize>>,
}

/// Keeps every registered mesh in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    meshes: Vec<RegisteredMesh>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn meshes(&self) -> &[RegisteredMesh] {
        &self.meshes
    }

    /// Most recent mesh registered under `name`
    pub fn get(&self, name: &str) -> Option<&RegisteredMesh> {
        self.meshes.iter().rev().find(|m| m.name == name)
    }

    pub fn into_meshes(self) -> Vec<RegisteredMesh> {
        self.meshes
    }
}

impl MeshSink for MemorySink {
    fn register(&mut self, name: &str, vertices: &[Point3], faces: &[Vec<usize>]) -> Result<()> {
        self.meshes.push(RegisteredMesh {
            name: name.to_string(),
            vertices: vertices.to_vec(),
            faces: faces.to_vec(),
        });
        Ok(())
    }
}

#[derive(Serialize)]
struct MeshDocument<'a> {
    name: &'a str,
    vertices: Vec<[f64; 3]>,
    faces: &'a [Vec<usize>],
}

/// Writes each mesh as one JSON document
///
/// Vertices are written as `[x, y, z]` arrays. With `pretty` unset every
/// document takes exactly one line.
#[derive(Debug)]
pub struct JsonSink<W: Write> {
    writer: W,
    pretty: bool,
}

impl<W: Write> JsonSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pretty: false,
        }
    }

    pub fn pretty(writer: W) -> Self {
        Self {
            writer,
            pretty: true,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> MeshSink for JsonSink<W> {
    fn register(&mut self, name: &str, vertices: &[Point3], faces: &[Vec<usize>]) -> Result<()> {
        let document = MeshDocument {
            name,
            vertices: vertices.iter().map(Point3::to_array).collect(),
            faces,
        };

        let written = if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &document)
        } else {
            serde_json::to_writer(&mut self.writer, &document)
        };
        written.map_err(|e| NoperthedronError::Sink(format!("Failed to serialize mesh: {}", e)))?;

        writeln!(self.writer)
            .and_then(|_| self.writer.flush())
            .map_err(|e| NoperthedronError::Sink(format!("Failed to write mesh: {}", e)))?;

        log::debug!("Wrote mesh '{}' as JSON", name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> (Vec<Point3>, Vec<Vec<usize>>) {
        (
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            vec![vec![0, 1, 2]],
        )
    }

    #[test]
    fn test_memory_sink_keeps_meshes() {
        let (vertices, faces) = triangle();
        let mut sink = MemorySink::new();
        sink.register("a", &vertices, &faces).unwrap();
        sink.register("b", &vertices[..2], &[]).unwrap();

        assert_eq!(sink.meshes().len(), 2);
        let a = sink.get("a").unwrap();
        assert_eq!(a.vertices, vertices);
        assert_eq!(a.faces, faces);
        assert!(sink.get("c").is_none());
    }

    #[test]
    fn test_sink_through_mutable_reference() {
        let (vertices, faces) = triangle();
        fn feed<S: MeshSink>(mut sink: S, vertices: &[Point3], faces: &[Vec<usize>]) {
            sink.register("tri", vertices, faces).unwrap();
        }

        let mut sink = MemorySink::new();
        feed(&mut sink, &vertices, &faces);
        feed(&mut sink, &vertices, &faces);
        assert_eq!(sink.into_meshes().len(), 2);
    }

    #[test]
    fn test_json_sink_output() {
        let (vertices, faces) = triangle();
        let mut sink = JsonSink::new(Vec::new());
        sink.register("tri", &vertices, &faces).unwrap();

        let bytes = sink.into_inner();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text.lines().count(), 1);

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["name"], "tri");
        assert_eq!(value["vertices"][1][0], 1.0);
        assert_eq!(value["faces"][0], serde_json::json!([0, 1, 2]));
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("disk full"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_json_sink_write_failure() {
        let (vertices, faces) = triangle();
        let mut sink = JsonSink::new(FailingWriter);
        let err = sink.register("tri", &vertices, &faces).unwrap_err();
        assert!(matches!(err, NoperthedronError::Sink(_)));
        assert!(err.to_string().contains("disk full"));
    }
}
