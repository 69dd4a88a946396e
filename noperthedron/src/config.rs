//! JSON configuration for a pipeline run

use crate::error::{NoperthedronError, Result};
use noperthedron_hull::{FaceMode, HullConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Options for building and handing off the mesh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Name the mesh is registered under
    #[serde(default = "default_mesh_name")]
    pub mesh_name: String,
    /// Merged polygons or raw triangles
    #[serde(default)]
    pub face_mode: FaceMode,
    /// Hull tolerances and limits
    #[serde(default)]
    pub hull: HullConfig,
}

fn default_mesh_name() -> String {
    "Noperthedron".to_string()
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            mesh_name: default_mesh_name(),
            face_mode: FaceMode::default(),
            hull: HullConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| NoperthedronError::Config(format!("Failed to read config file: {}", e)))?;
        Self::from_json(&contents)
    }

    /// Parse configuration from a JSON string
    pub fn from_json(contents: &str) -> Result<Self> {
        let config: PipelineConfig = serde_json::from_str(contents)
            .map_err(|e| NoperthedronError::Config(format!("Failed to parse JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            NoperthedronError::Config(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(path, json)
            .map_err(|e| NoperthedronError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.mesh_name.trim().is_empty() {
            return Err(NoperthedronError::Config(
                "mesh_name must not be empty".to_string(),
            ));
        }
        self.hull
            .validate()
            .map_err(|e| NoperthedronError::Config(e.to_string()))
    }
}
