//! Game and world settings, loadable from a JSON file.

use std::fs;
use std::path::Path;

use crate::climate::TerrainParams;
use crate::error::Result;

/// Size and seed of the world to generate.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct WorldSettings {
    pub width: usize,
    pub height: usize,
    pub seed: u64,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            width: 64,
            height: 48,
            seed: 42,
        }
    }
}

/// Settings shared read-only with every generation step.
///
/// Missing keys in a settings file fall back to the defaults.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Hex radius in pixels, used when projecting coordinates for display
    pub hex_size: f32,
    pub world: WorldSettings,
    pub terrain: TerrainParams,
    /// Number of locations the location step tries to place
    pub location_count: usize,
    /// Default `tracing` filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            hex_size: 32.0,
            world: WorldSettings::default(),
            terrain: TerrainParams::default(),
            location_count: 12,
            log_level: "info".to_string(),
        }
    }
}

impl GameSettings {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text)?;
        Ok(())
    }
}
