/// Per-call codec configuration
///
/// Every option has one effect:
/// - `selection` picks which scene meshes the export pipeline considers
/// - `coordinates` converts positions and normals on export (and back on import)
/// - `max_triangles` bounds a single object's triangle count while decoding
/// - `closing_name` overrides the label written after the final END marker
///
/// ```toml
/// selection = "all"
/// coordinates = "none"
/// max_triangles = 500000
/// closing_name = "EOF"
/// ```
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TriError};
use crate::format::DEFAULT_MAX_TRIANGLES;
use crate::transform::CoordinateConversion;

/// Which meshes the export pipeline picks up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    /// Only meshes flagged as selected
    #[default]
    Selected,
    /// Every mesh in the scene
    All,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    pub selection: SelectionMode,
    pub coordinates: CoordinateConversion,
    pub max_triangles: u32,
    pub closing_name: Option<String>,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            selection: SelectionMode::default(),
            coordinates: CoordinateConversion::default(),
            max_triangles: DEFAULT_MAX_TRIANGLES,
            closing_name: None,
        }
    }
}

impl CodecConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| TriError::Config(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        log::debug!("Loaded codec config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    pub fn with_max_triangles(mut self, max_triangles: u32) -> Self {
        self.max_triangles = max_triangles;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CodecConfig::default();
        assert_eq!(config.selection, SelectionMode::Selected);
        assert_eq!(config.coordinates, CoordinateConversion::BlenderToQuake);
        assert_eq!(config.max_triangles, 200_000);
        assert_eq!(config.closing_name, None);
    }

    #[test]
    fn test_parse_toml() {
        let config = CodecConfig::from_toml_str(
            "selection = \"all\"\ncoordinates = \"none\"\nmax_triangles = 10\nclosing_name = \"EOF\"\n",
        )
        .unwrap();
        assert_eq!(config.selection, SelectionMode::All);
        assert_eq!(config.coordinates, CoordinateConversion::None);
        assert_eq!(config.max_triangles, 10);
        assert_eq!(config.closing_name.as_deref(), Some("EOF"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = CodecConfig::from_toml_str("max_triangles = 42\n").unwrap();
        assert_eq!(config.max_triangles, 42);
        assert_eq!(config.selection, SelectionMode::Selected);
    }

    #[test]
    fn test_invalid_toml() {
        let err = CodecConfig::from_toml_str("selection = \"some\"\n").unwrap_err();
        assert!(matches!(err, TriError::Config(_)));
    }
}
