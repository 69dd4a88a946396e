//! Tolerances and output options for hull construction

use crate::{ConvexHullError, EPSILON, Result};
use serde::{Deserialize, Serialize};

/// How hull faces are emitted by mesh assembly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaceMode {
    /// Coplanar neighbouring triangles are merged into convex polygons
    #[default]
    Polygons,
    /// Raw hull triangulation
    Triangles,
}

/// Hull construction parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HullConfig {
    /// Base distance tolerance, scaled by the extent of the input
    #[serde(default = "default_epsilon_scale")]
    pub epsilon_scale: f64,
    /// Relative plane distance under which adjacent triangles are merged
    #[serde(default = "default_coplanar_tolerance")]
    pub coplanar_tolerance: f64,
    /// Iteration cap for the Quickhull main loop
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    /// Working-set size from which rayon is used
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
}

impl Default for HullConfig {
    fn default() -> Self {
        Self {
            epsilon_scale: default_epsilon_scale(),
            coplanar_tolerance: default_coplanar_tolerance(),
            max_iterations: default_max_iterations(),
            parallel_threshold: default_parallel_threshold(),
        }
    }
}

fn default_epsilon_scale() -> f64 {
    EPSILON
}

fn default_coplanar_tolerance() -> f64 {
    1e-9
}

fn default_max_iterations() -> usize {
    100_000
}

fn default_parallel_threshold() -> usize {
    100
}

impl HullConfig {
    /// Reject tolerances that would make the hull meaningless
    pub fn validate(&self) -> Result<()> {
        if !(self.epsilon_scale.is_finite() && self.epsilon_scale > 0.0) {
            return Err(ConvexHullError::InvalidConfig(format!(
                "epsilon_scale must be positive and finite, got {}",
                self.epsilon_scale
            )));
        }
        if !(self.coplanar_tolerance.is_finite() && self.coplanar_tolerance > 0.0) {
            return Err(ConvexHullError::InvalidConfig(format!(
                "coplanar_tolerance must be positive and finite, got {}",
                self.coplanar_tolerance
            )));
        }
        if self.coplanar_tolerance < self.epsilon_scale {
            return Err(ConvexHullError::InvalidConfig(format!(
                "coplanar_tolerance ({}) must not be below epsilon_scale ({})",
                self.coplanar_tolerance, self.epsilon_scale
            )));
        }
        if self.max_iterations == 0 {
            return Err(ConvexHullError::InvalidConfig(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(HullConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_tolerances() {
        let config = HullConfig {
            epsilon_scale: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConvexHullError::InvalidConfig(_))
        ));

        let config = HullConfig {
            coplanar_tolerance: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = HullConfig {
            epsilon_scale: 1e-6,
            coplanar_tolerance: 1e-8,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_face_mode_default() {
        assert_eq!(FaceMode::default(), FaceMode::Polygons);
    }
}
