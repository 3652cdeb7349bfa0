//! Model configuration
//!
//! Settings that control how a [`KinematicTree`](crate::KinematicTree)
//! validates and initializes its joints. They can be serialized and loaded
//! from RON configuration files.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::RIGID_TOLERANCE;

/// Kinematic model configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ModelConfig {
    /// Tolerance for the rigid transform check on placements
    pub rigid_tolerance: f64,
    /// Refuse placements that are not rigid transforms
    pub validate_placements: bool,
    /// Magnitude of the velocity bounds given to new DOFs
    pub default_velocity_bound: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            rigid_tolerance: RIGID_TOLERANCE,
            validate_placements: true,
            default_velocity_bound: f64::INFINITY,
        }
    }
}

impl ModelConfig {
    /// Parse a configuration from RON text
    pub fn from_ron_str(content: &str) -> Result<Self, ConfigError> {
        ron::from_str(content).map_err(|e| ConfigError::Deserialize(e.to_string()))
    }

    /// Serialize the configuration to RON text
    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Load a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_ron_str(&content)
    }

    /// Save the configuration to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = self.to_ron_string()?;
        std::fs::write(path.as_ref(), content).map_err(|e| ConfigError::Io(e.to_string()))
    }
}

/// Configuration errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialize(String),
    #[error("Deserialization error: {0}")]
    Deserialize(String),
}
