//! World generators and the pipeline step that runs them.
//!
//! The procedural generator works in three phases:
//! 1. Sample height, moisture, temperature and aridity for every cell
//!    (parallel per column)
//! 2. Normalize each map to `[0, 1]` (the four passes run concurrently and are
//!    joined before phase 3)
//! 3. Classify every cell and emit one `Hex` per coordinate

use std::path::{Path, PathBuf};

use crate::biomes::{classify, encode_generation_seed};
use crate::climate::{ClimateFields, NoiseSources, TerrainParams};
use crate::error::{GenerationError, Result};
use crate::generator::context::GenerationContext;
use crate::generator::pipeline::GeneratorStep;
use crate::hex::{Hex, HexCoordinate, TerrainType};
use crate::hex_map::HexMap;

/// Produces a complete hex map.
pub trait WorldGenerator: Send {
    fn name(&self) -> &str;

    fn generate_world(&mut self) -> Result<HexMap>;
}

// =============================================================================
// PROCEDURAL
// =============================================================================

/// Noise-driven terrain over a `width x height` rectangle of axial coordinates.
pub struct ProceduralWorldGenerator {
    width: usize,
    height: usize,
    params: TerrainParams,
    noise: NoiseSources,
}

impl ProceduralWorldGenerator {
    pub fn new(width: usize, height: usize, seed: u64) -> Self {
        Self::with_params(width, height, seed, TerrainParams::default())
    }

    pub fn with_params(width: usize, height: usize, seed: u64, params: TerrainParams) -> Self {
        Self {
            width,
            height,
            params,
            noise: NoiseSources::from_seed(seed),
        }
    }

    /// Phases 1 and 2: the four normalized maps.
    pub fn generate_fields(&self) -> ClimateFields {
        let mut fields = ClimateFields::sample(&self.noise, &self.params, self.width, self.height);
        fields.normalize();
        fields
    }

    /// Phase 3: classify every cell of already normalized fields.
    pub fn build_map(&self, fields: &ClimateFields) -> HexMap {
        let mut map = HexMap::new(self.width, self.height);
        for q in 0..self.width {
            for r in 0..self.height {
                let (h, m, t, a) = fields.at(q, r);
                let hex = Hex::new(HexCoordinate::new(q as i32, r as i32), classify(h, m, t, a))
                    .with_seed(encode_generation_seed(h, m, t, a));
                map.add(hex);
            }
        }
        map
    }
}

impl WorldGenerator for ProceduralWorldGenerator {
    fn name(&self) -> &str {
        "procedural"
    }

    fn generate_world(&mut self) -> Result<HexMap> {
        let fields = self.generate_fields();
        let map = self.build_map(&fields);
        log_generation_summary(&map, &fields);
        Ok(map)
    }
}

fn log_generation_summary(map: &HexMap, fields: &ClimateFields) {
    tracing::info!(
        width = map.width(),
        height = map.height(),
        hexes = map.len(),
        "world generation complete"
    );
    for (name, field) in [
        ("height", &fields.height),
        ("moisture", &fields.moisture),
        ("temperature", &fields.temperature),
        ("aridity", &fields.aridity),
    ] {
        if let Some((lo, hi)) = field.min_max() {
            tracing::debug!(field = name, min = lo, max = hi, "field range");
        }
    }
    let total = map.len().max(1) as f64;
    for (terrain, count) in map.terrain_histogram() {
        tracing::info!(
            terrain = %terrain,
            count,
            percent = format!("{:.1}", 100.0 * count as f64 / total),
            "terrain share"
        );
    }
}

// =============================================================================
// FIXTURES
// =============================================================================

/// Fills the whole rectangle with forest. Used by tests and demos.
pub struct RectangularWorldGenerator {
    width: usize,
    height: usize,
    terrain: TerrainType,
}

impl RectangularWorldGenerator {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            terrain: TerrainType::Forest,
        }
    }
}

impl WorldGenerator for RectangularWorldGenerator {
    fn name(&self) -> &str {
        "rectangular"
    }

    fn generate_world(&mut self) -> Result<HexMap> {
        let mut map = HexMap::new(self.width, self.height);
        map.fill_rectangle(0, 0, self.width, self.height, self.terrain);
        Ok(map)
    }
}

/// Reads a world from a save file. Loading is not implemented yet.
pub struct SavedWorldGenerator {
    path: PathBuf,
}

impl SavedWorldGenerator {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl WorldGenerator for SavedWorldGenerator {
    fn name(&self) -> &str {
        "saved"
    }

    fn generate_world(&mut self) -> Result<HexMap> {
        tracing::info!(path = %self.path.display(), "loading world");
        Err(GenerationError::NotImplemented {
            feature: "loading a saved world",
            path: self.path.clone(),
        })
    }
}

// =============================================================================
// STEP
// =============================================================================

/// Runs a world generator and installs its map into the context.
pub struct WorldGenerationStep {
    generator: Box<dyn WorldGenerator>,
}

impl WorldGenerationStep {
    pub fn new(generator: Box<dyn WorldGenerator>) -> Self {
        Self { generator }
    }
}

impl GeneratorStep for WorldGenerationStep {
    fn name(&self) -> &str {
        "world"
    }

    fn execute(&mut self, context: &mut GenerationContext) -> Result<()> {
        let map = self.generator.generate_world()?;
        tracing::debug!(generator = self.generator.name(), hexes = map.len(), "world map installed");
        context.hex_map = map;
        Ok(())
    }
}
