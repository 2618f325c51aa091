//! Terrain classification from normalized climate values.
//!
//! Height decides first (ocean and coast are height-only), then the height
//! band, then aridity with low moisture, and only then the moisture ladder.
//! An arid, dry cell therefore never reaches Forest or Swamp.

use crate::hex::TerrainType;

/// Below this normalized height a cell is ocean.
pub const OCEAN_LEVEL: f32 = 0.40;
/// Below this normalized height (and above ocean) a cell is coast.
pub const COAST_LEVEL: f32 = 0.45;

const HIGHLAND_FLOOR: f32 = 0.80;
const UPLAND_FLOOR: f32 = 0.65;
const MIDLAND_FLOOR: f32 = 0.50;

/// Land elevation bands above the coast.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeightBand {
    /// (0.80, inf)
    Highland,
    /// (0.65, 0.80]
    Upland,
    /// (0.50, 0.65]
    Midland,
    /// (-inf, 0.50]
    Lowland,
}

impl HeightBand {
    pub fn from_height(height: f32) -> Self {
        if height > HIGHLAND_FLOOR {
            HeightBand::Highland
        } else if height > UPLAND_FLOOR {
            HeightBand::Upland
        } else if height > MIDLAND_FLOOR {
            HeightBand::Midland
        } else {
            HeightBand::Lowland
        }
    }

    /// `(plains_below, forest_below)` moisture breakpoints; wetter is swamp.
    fn moisture_ladder(&self) -> (f32, f32) {
        match self {
            HeightBand::Upland => (0.5, 0.7),
            HeightBand::Highland | HeightBand::Midland | HeightBand::Lowland => (0.6, 0.8),
        }
    }
}

/// Classify one cell. Every input, including NaN, yields exactly one type.
pub fn classify(height: f32, moisture: f32, temperature: f32, aridity: f32) -> TerrainType {
    if height < OCEAN_LEVEL {
        return TerrainType::Ocean;
    }
    if height < COAST_LEVEL {
        return TerrainType::Coast;
    }

    match HeightBand::from_height(height) {
        HeightBand::Highland => {
            if temperature < 0.30 {
                TerrainType::Mountains
            } else if aridity > 0.70 && moisture < 0.40 {
                TerrainType::Desert
            } else {
                TerrainType::Mountains
            }
        }
        band => {
            let (plains_below, forest_below) = band.moisture_ladder();
            if aridity > 0.60 && moisture < 0.40 {
                TerrainType::Desert
            } else if moisture < plains_below {
                TerrainType::Plains
            } else if moisture < forest_below {
                TerrainType::Forest
            } else {
                TerrainType::Swamp
            }
        }
    }
}

/// Pack four normalized values into one integer, 16 bits each, height in the
/// top bits. Later systems can recover the values with
/// [`decode_generation_seed`] to derive sub-variation without storing floats.
pub fn encode_generation_seed(height: f32, moisture: f32, temperature: f32, aridity: f32) -> u64 {
    fn quantize(v: f32) -> u64 {
        (v.clamp(0.0, 1.0) * u16::MAX as f32).round() as u64
    }
    quantize(height) << 48 | quantize(moisture) << 32 | quantize(temperature) << 16 | quantize(aridity)
}

/// Inverse of [`encode_generation_seed`], up to 16-bit quantization.
pub fn decode_generation_seed(seed: u64) -> (f32, f32, f32, f32) {
    let part = |shift: u32| ((seed >> shift) & 0xFFFF) as f32 / u16::MAX as f32;
    (part(48), part(32), part(16), part(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_water_is_height_only() {
        for &m in &[0.0, 0.5, 1.0] {
            for &t in &[0.0, 1.0] {
                for &a in &[0.0, 1.0] {
                    assert_eq!(classify(0.1, m, t, a), TerrainType::Ocean);
                    assert_eq!(classify(0.399, m, t, a), TerrainType::Ocean);
                    assert_eq!(classify(0.40, m, t, a), TerrainType::Coast);
                    assert_eq!(classify(0.449, m, t, a), TerrainType::Coast);
                }
            }
        }
    }

    #[test]
    fn test_band_edges() {
        assert_eq!(HeightBand::from_height(0.45), HeightBand::Lowland);
        assert_eq!(HeightBand::from_height(0.50), HeightBand::Lowland);
        assert_eq!(HeightBand::from_height(0.51), HeightBand::Midland);
        assert_eq!(HeightBand::from_height(0.65), HeightBand::Midland);
        assert_eq!(HeightBand::from_height(0.80), HeightBand::Upland);
        assert_eq!(HeightBand::from_height(0.81), HeightBand::Highland);
    }

    #[test]
    fn test_highland() {
        assert_eq!(classify(0.9, 0.1, 0.2, 0.9), TerrainType::Mountains);
        assert_eq!(classify(0.9, 0.1, 0.5, 0.9), TerrainType::Desert);
        assert_eq!(classify(0.9, 0.9, 0.5, 0.9), TerrainType::Mountains);
        assert_eq!(classify(0.9, 0.1, 0.5, 0.65), TerrainType::Mountains);
    }

    #[test]
    fn test_upland_ladder() {
        assert_eq!(classify(0.7, 0.45, 0.5, 0.1), TerrainType::Plains);
        assert_eq!(classify(0.7, 0.55, 0.5, 0.1), TerrainType::Forest);
        assert_eq!(classify(0.7, 0.75, 0.5, 0.1), TerrainType::Swamp);
    }

    #[test]
    fn test_lowland_ladder() {
        assert_eq!(classify(0.47, 0.55, 0.5, 0.1), TerrainType::Plains);
        assert_eq!(classify(0.6, 0.65, 0.5, 0.1), TerrainType::Forest);
        assert_eq!(classify(0.6, 0.85, 0.5, 0.1), TerrainType::Swamp);
    }

    #[test]
    fn test_arid_dry_cells_become_desert_before_ladder() {
        for &h in &[0.46, 0.55, 0.7] {
            assert_eq!(classify(h, 0.39, 0.5, 0.61), TerrainType::Desert);
        }
        // Arid but moist enough is not desert.
        assert_eq!(classify(0.55, 0.85, 0.5, 0.9), TerrainType::Swamp);
    }

    #[test]
    fn test_classification_is_total() {
        let steps: Vec<f32> = (0..=20).map(|i| i as f32 / 20.0).collect();
        let mut seen = std::collections::HashSet::new();
        for &h in &steps {
            for &m in &steps {
                for &t in &steps {
                    for &a in &steps {
                        seen.insert(classify(h, m, t, a));
                    }
                }
            }
        }
        assert_eq!(seen.len(), TerrainType::all().len());
        // NaN compares false everywhere and still lands in a category.
        let _ = classify(f32::NAN, f32::NAN, f32::NAN, f32::NAN);
    }

    #[test]
    fn test_generation_seed_encoding() {
        let seed = encode_generation_seed(1.0, 0.0, 0.5, 0.25);
        let (h, m, t, a) = decode_generation_seed(seed);
        assert_eq!(h, 1.0);
        assert_eq!(m, 0.0);
        assert!((t - 0.5).abs() < 1e-4);
        assert!((a - 0.25).abs() < 1e-4);
        assert_ne!(seed, encode_generation_seed(1.0, 0.0, 0.5, 0.26));
    }
}
