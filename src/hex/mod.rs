//! Hex cells and the coordinate system they live in.

pub mod coords;
pub mod geometry;
pub mod terrain;

pub use coords::HexCoordinate;
pub use geometry::HexDirection;
pub use terrain::TerrainType;

/// A single grid cell.
///
/// `terrain` and `generation_seed` are fixed by the world generator;
/// `danger_level` and `location_id` are filled in by later steps.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Hex {
    pub coordinates: HexCoordinate,
    pub terrain: TerrainType,
    pub danger_level: i32,
    pub location_id: Option<String>,
    pub generation_seed: u64,
}

impl Hex {
    pub fn new(coordinates: HexCoordinate, terrain: TerrainType) -> Self {
        Self {
            coordinates,
            terrain,
            danger_level: 0,
            location_id: None,
            generation_seed: 0,
        }
    }

    pub fn at(q: i32, r: i32, terrain: TerrainType) -> Self {
        Self::new(HexCoordinate::new(q, r), terrain)
    }

    pub fn with_seed(mut self, generation_seed: u64) -> Self {
        self.generation_seed = generation_seed;
        self
    }

    pub fn q(&self) -> i32 {
        self.coordinates.q()
    }

    pub fn r(&self) -> i32 {
        self.coordinates.r()
    }

    pub fn has_location(&self) -> bool {
        self.location_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_hex_defaults() {
        let hex = Hex::at(2, 5, TerrainType::Plains).with_seed(1234);
        assert_eq!(hex.q(), 2);
        assert_eq!(hex.r(), 5);
        assert_eq!(hex.danger_level, 0);
        assert!(!hex.has_location());
        assert_eq!(hex.generation_seed, 1234);
    }
}
