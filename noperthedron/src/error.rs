//! Error types for the Noperthedron pipeline.
//!
//! Every error is fatal for a single run: the pipeline is deterministic, so
//! retrying with the same constants cannot succeed.

use noperthedron_hull::ConvexHullError;
use thiserror::Error;

/// Errors that can occur while building the Noperthedron.
#[derive(Debug, Error)]
pub enum NoperthedronError {
    /// A group element or generated point has a NaN or infinite coordinate.
    #[error("numeric instability: {what} {index} is not finite")]
    NumericInstability {
        /// Which kind of value failed ("group element", "vertex")
        what: &'static str,
        /// Position of the value in its sequence
        index: usize,
    },

    /// Hull construction or mesh validation failed.
    #[error(transparent)]
    Hull(#[from] ConvexHullError),

    /// The mesh consumer refused the mesh.
    #[error("mesh sink error: {0}")]
    Sink(String),

    /// Configuration could not be read, parsed or written.
    #[error("configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for pipeline operations.
pub type Result<T> = std::result::Result<T, NoperthedronError>;

impl NoperthedronError {
    /// Returns `true` for non-finite trigonometric or matrix results.
    pub fn is_numeric_instability(&self) -> bool {
        matches!(
            self,
            NoperthedronError::NumericInstability { .. }
                | NoperthedronError::Hull(ConvexHullError::NonFiniteInput { .. })
        )
    }

    /// Returns `true` when the point cloud does not span 3D space.
    pub fn is_degenerate_input(&self) -> bool {
        matches!(
            self,
            NoperthedronError::Hull(
                ConvexHullError::DegenerateInput | ConvexHullError::InsufficientVertices
            )
        )
    }

    /// Returns `true` when the hull failed manifold or orientation checks.
    pub fn is_topology_error(&self) -> bool {
        matches!(
            self,
            NoperthedronError::Hull(ConvexHullError::TopologyValidation(_))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NoperthedronError::NumericInstability {
            what: "vertex",
            index: 7,
        };
        assert_eq!(err.to_string(), "numeric instability: vertex 7 is not finite");

        let err = NoperthedronError::from(ConvexHullError::DegenerateInput);
        assert!(err.to_string().contains("Degenerate input"));
    }

    #[test]
    fn test_categories() {
        assert!(
            NoperthedronError::NumericInstability {
                what: "group element",
                index: 0
            }
            .is_numeric_instability()
        );
        assert!(NoperthedronError::from(ConvexHullError::DegenerateInput).is_degenerate_input());
        let topo = NoperthedronError::from(ConvexHullError::TopologyValidation("open".into()));
        assert!(topo.is_topology_error());
        assert!(!topo.is_degenerate_input());
        assert!(!NoperthedronError::Sink("full".into()).is_topology_error());
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<NoperthedronError>();
    }
}
