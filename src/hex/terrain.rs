//! Terrain categories assigned to hex cells.

use std::fmt;

/// Biome category of a hex.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum TerrainType {
    Ocean,
    Coast,
    Plains,
    Forest,
    Mountains,
    Desert,
    Swamp,
}

impl TerrainType {
    pub fn all() -> &'static [TerrainType] {
        &[
            TerrainType::Ocean,
            TerrainType::Coast,
            TerrainType::Plains,
            TerrainType::Forest,
            TerrainType::Mountains,
            TerrainType::Desert,
            TerrainType::Swamp,
        ]
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            TerrainType::Ocean => "Ocean",
            TerrainType::Coast => "Coast",
            TerrainType::Plains => "Plains",
            TerrainType::Forest => "Forest",
            TerrainType::Mountains => "Mountains",
            TerrainType::Desert => "Desert",
            TerrainType::Swamp => "Swamp",
        }
    }

    /// Single character used by the text preview.
    pub fn glyph(&self) -> char {
        match self {
            TerrainType::Ocean => '~',
            TerrainType::Coast => ',',
            TerrainType::Plains => '"',
            TerrainType::Forest => 'T',
            TerrainType::Mountains => '^',
            TerrainType::Desert => 'd',
            TerrainType::Swamp => '%',
        }
    }

    /// Settlements avoid open water and mountain peaks.
    pub fn is_settleable(&self) -> bool {
        !matches!(self, TerrainType::Ocean | TerrainType::Mountains)
    }

    /// Terrain an army or caravan can cross without special means.
    pub fn is_passable(&self) -> bool {
        !matches!(
            self,
            TerrainType::Ocean | TerrainType::Mountains | TerrainType::Swamp
        )
    }
}

impl fmt::Display for TerrainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
