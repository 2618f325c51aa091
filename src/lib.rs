//! Hex world generation library
//!
//! Re-exports modules for use by binaries and tools.

pub mod ascii;
pub mod biomes;
pub mod climate;
pub mod error;
pub mod generator;
pub mod hex;
pub mod hex_map;
pub mod names;
pub mod noise_field;
pub mod report;
pub mod settings;
pub mod tilemap;

pub use error::{GenerationError, Result};
pub use generator::{GenerationContext, GeneratorKind, GeneratorPipeline};
pub use hex::{Hex, HexCoordinate, TerrainType};
pub use hex_map::HexMap;
pub use settings::GameSettings;
