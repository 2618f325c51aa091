//! Maps a generator kind plus configuration to a concrete generator.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::climate::TerrainParams;
use crate::error::{GenerationError, GeneratorRole, Result};
use crate::generator::location::{LocationGenerator, RandomLocationGenerator, SavedLocationGenerator};
use crate::generator::world::{
    ProceduralWorldGenerator, RectangularWorldGenerator, SavedWorldGenerator, WorldGenerator,
};

/// Every generator the factory knows how to build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, clap::ValueEnum, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GeneratorKind {
    /// Noise-driven terrain
    ProceduralWorld,
    /// Uniform forest rectangle, for tests and demos
    RectangularWorld,
    /// World read back from a save file
    SavedWorld,
    /// Cities, settlements and special sites placed on the map
    RandomLocation,
    /// Locations read back from a save file
    SavedLocation,
}

impl GeneratorKind {
    pub fn role(&self) -> GeneratorRole {
        match self {
            GeneratorKind::ProceduralWorld
            | GeneratorKind::RectangularWorld
            | GeneratorKind::SavedWorld => GeneratorRole::World,
            GeneratorKind::RandomLocation | GeneratorKind::SavedLocation => GeneratorRole::Location,
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GeneratorKind::ProceduralWorld => "procedural-world",
            GeneratorKind::RectangularWorld => "rectangular-world",
            GeneratorKind::SavedWorld => "saved-world",
            GeneratorKind::RandomLocation => "random-location",
            GeneratorKind::SavedLocation => "saved-location",
        };
        f.write_str(name)
    }
}

/// Configuration of a world generator: dimensions and seed, or a save file.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldGeneratorConfig {
    pub seed: u64,
    pub width: usize,
    pub height: usize,
    pub save_path: Option<PathBuf>,
    /// Only read by the procedural generator
    pub terrain: TerrainParams,
}

impl WorldGeneratorConfig {
    pub fn new(seed: u64, width: usize, height: usize) -> Self {
        Self {
            seed,
            width,
            height,
            save_path: None,
            terrain: TerrainParams::default(),
        }
    }

    pub fn from_save(path: impl Into<PathBuf>) -> Self {
        Self {
            save_path: Some(path.into()),
            ..Self::new(0, 0, 0)
        }
    }

    pub fn with_terrain(mut self, terrain: TerrainParams) -> Self {
        self.terrain = terrain;
        self
    }

    fn dimensions(&self) -> Result<(usize, usize)> {
        if self.width == 0 || self.height == 0 {
            return Err(GenerationError::InvalidConfig(format!(
                "world must have non-zero size, got {}x{}",
                self.width, self.height
            )));
        }
        Ok((self.width, self.height))
    }
}

/// Configuration of a location generator: seed and target count, or a save file.
#[derive(Clone, Debug, PartialEq)]
pub struct LocationGeneratorConfig {
    pub seed: u64,
    pub count: usize,
    pub save_path: Option<PathBuf>,
}

impl LocationGeneratorConfig {
    pub fn new(seed: u64, count: usize) -> Self {
        Self {
            seed,
            count,
            save_path: None,
        }
    }

    pub fn from_save(path: impl Into<PathBuf>) -> Self {
        Self {
            seed: 0,
            count: 0,
            save_path: Some(path.into()),
        }
    }
}

fn require_path(path: &Option<PathBuf>, kind: GeneratorKind) -> Result<&Path> {
    path.as_deref().ok_or_else(|| {
        GenerationError::InvalidConfig(format!("{kind} generator needs a save path"))
    })
}

/// Builds generators; never falls back to a default kind.
pub struct GeneratorFactory;

impl GeneratorFactory {
    pub fn create_world_generator(
        kind: GeneratorKind,
        config: &WorldGeneratorConfig,
    ) -> Result<Box<dyn WorldGenerator>> {
        match kind {
            GeneratorKind::ProceduralWorld => {
                let (width, height) = config.dimensions()?;
                Ok(Box::new(ProceduralWorldGenerator::with_params(
                    width,
                    height,
                    config.seed,
                    config.terrain.clone(),
                )))
            }
            GeneratorKind::RectangularWorld => {
                let (width, height) = config.dimensions()?;
                Ok(Box::new(RectangularWorldGenerator::new(width, height)))
            }
            GeneratorKind::SavedWorld => {
                let path = require_path(&config.save_path, kind)?;
                Ok(Box::new(SavedWorldGenerator::new(path)))
            }
            GeneratorKind::RandomLocation | GeneratorKind::SavedLocation => {
                Err(GenerationError::UnsupportedKind {
                    kind,
                    role: GeneratorRole::World,
                })
            }
        }
    }

    pub fn create_location_generator(
        kind: GeneratorKind,
        config: &LocationGeneratorConfig,
    ) -> Result<Box<dyn LocationGenerator>> {
        match kind {
            GeneratorKind::RandomLocation => {
                Ok(Box::new(RandomLocationGenerator::new(config.count, config.seed)))
            }
            GeneratorKind::SavedLocation => {
                let path = require_path(&config.save_path, kind)?;
                Ok(Box::new(SavedLocationGenerator::new(path)))
            }
            GeneratorKind::ProceduralWorld
            | GeneratorKind::RectangularWorld
            | GeneratorKind::SavedWorld => Err(GenerationError::UnsupportedKind {
                kind,
                role: GeneratorRole::Location,
            }),
        }
    }
}
