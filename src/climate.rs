//! Raw physical fields for terrain classification: height, moisture,
//! temperature and aridity.
//!
//! Every field is sampled from its own [`CoherentNoise`] at normalized
//! coordinates `nx = q / width`, `ny = r / height`, then min-max normalized to
//! `[0, 1]` across the whole map before any cell is classified.

use std::time::Instant;

use noise::NoiseFn;
use rayon::prelude::*;

use crate::noise_field::CoherentNoise;
use crate::tilemap::Tilemap;

// =============================================================================
// TUNING
// =============================================================================

/// Frequencies, weights and exponents of the terrain fields.
///
/// The defaults are the canonical tuning; none of the values is an invariant.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TerrainParams {
    /// Frequency of the landmass-defining continental field
    pub continental_frequency: f64,
    pub continental_weight: f64,
    /// `(frequency, weight)` octaves of the fine terrain detail
    pub terrain_octaves: Vec<(f64, f64)>,
    pub terrain_weight: f64,
    pub mountain_frequency: f64,
    /// Exponent > 1 that sharpens mountain peaks
    pub mountain_exponent: f64,
    pub mountain_weight: f64,
    /// Very low frequency "plate" sample of the continental field
    pub plate_frequency: f64,
    pub plate_weight: f64,
    /// High frequency ridge sample of the mountain field
    pub ridge_frequency: f64,
    pub ridge_exponent: i32,
    pub ridge_weight: f64,
    /// Exponent applied to the combined height to increase contrast
    pub height_exponent: f64,
    pub moisture_octaves: Vec<(f64, f64)>,
    pub temperature_octaves: Vec<(f64, f64)>,
    /// Temperature lost at the poles (`|ny - 0.5| * 2 == 1`)
    pub latitude_penalty: f64,
    pub temperature_min: f64,
    pub temperature_max: f64,
    pub aridity_octaves: Vec<(f64, f64)>,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            continental_frequency: 1.2,
            continental_weight: 0.5,
            terrain_octaves: vec![(4.0, 0.5), (8.0, 0.3), (16.0, 0.2)],
            terrain_weight: 0.3,
            mountain_frequency: 6.0,
            mountain_exponent: 2.2,
            mountain_weight: 0.2,
            plate_frequency: 0.3,
            plate_weight: 0.1,
            ridge_frequency: 8.0,
            ridge_exponent: 3,
            ridge_weight: 0.15,
            height_exponent: 1.3,
            moisture_octaves: vec![(3.0, 0.6), (6.0, 0.3), (12.0, 0.1)],
            temperature_octaves: vec![(2.0, 0.7), (4.0, 0.3)],
            latitude_penalty: 0.4,
            temperature_min: 0.1,
            temperature_max: 1.0,
            aridity_octaves: vec![(2.0, 0.7), (4.0, 0.3)],
        }
    }
}

// =============================================================================
// NOISE SOURCES
// =============================================================================

/// The six independent fields behind one world, seeded `seed + 0 ..= seed + 5`.
#[derive(Clone)]
pub struct NoiseSources {
    pub continental: CoherentNoise,
    pub terrain: CoherentNoise,
    pub moisture: CoherentNoise,
    pub temperature: CoherentNoise,
    pub mountain: CoherentNoise,
    pub aridity: CoherentNoise,
}

impl NoiseSources {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            continental: CoherentNoise::new(seed),
            terrain: CoherentNoise::new(seed.wrapping_add(1)),
            moisture: CoherentNoise::new(seed.wrapping_add(2)),
            temperature: CoherentNoise::new(seed.wrapping_add(3)),
            mountain: CoherentNoise::new(seed.wrapping_add(4)),
            aridity: CoherentNoise::new(seed.wrapping_add(5)),
        }
    }

    pub fn height(&self, params: &TerrainParams, nx: f64, ny: f64) -> f64 {
        let continental = to_unit(self.continental.get([
            nx * params.continental_frequency,
            ny * params.continental_frequency,
        ]));
        let terrain = to_unit(self.terrain.fractal(nx, ny, &params.terrain_octaves));
        let mountain = to_unit(
            self.mountain
                .get([nx * params.mountain_frequency, ny * params.mountain_frequency]),
        )
        .max(0.0)
        .powf(params.mountain_exponent);
        let plate = to_unit(
            self.continental
                .get([nx * params.plate_frequency, ny * params.plate_frequency]),
        );
        // Signed ridge: odd exponents keep troughs below zero.
        let ridge = self
            .mountain
            .get([nx * params.ridge_frequency, ny * params.ridge_frequency])
            .powi(params.ridge_exponent);

        let combined = continental * params.continental_weight
            + terrain * params.terrain_weight
            + mountain * params.mountain_weight
            + plate * params.plate_weight
            + ridge * params.ridge_weight;

        combined.max(0.0).powf(params.height_exponent)
    }

    pub fn moisture(&self, params: &TerrainParams, nx: f64, ny: f64) -> f64 {
        to_unit(self.moisture.fractal(nx, ny, &params.moisture_octaves))
    }

    /// Fractal temperature minus a latitude penalty, clamped to the configured band.
    pub fn temperature(&self, params: &TerrainParams, nx: f64, ny: f64) -> f64 {
        let base = to_unit(self.temperature.fractal(nx, ny, &params.temperature_octaves));
        let latitude = (ny - 0.5).abs() * 2.0;
        (base - latitude * params.latitude_penalty)
            .clamp(params.temperature_min, params.temperature_max)
    }

    pub fn aridity(&self, params: &TerrainParams, nx: f64, ny: f64) -> f64 {
        to_unit(self.aridity.fractal(nx, ny, &params.aridity_octaves))
    }
}

/// Remap `[-1, 1]` noise to `[0, 1]`.
fn to_unit(value: f64) -> f64 {
    (value + 1.0) * 0.5
}

// =============================================================================
// FIELDS
// =============================================================================

/// The four per-cell maps a world is classified from.
#[derive(Clone, Debug)]
pub struct ClimateFields {
    pub height: Tilemap<f32>,
    pub moisture: Tilemap<f32>,
    pub temperature: Tilemap<f32>,
    pub aridity: Tilemap<f32>,
}

/// Which fields had a non-zero range and were rescaled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NormalizationReport {
    pub height: bool,
    pub moisture: bool,
    pub temperature: bool,
    pub aridity: bool,
}

impl ClimateFields {
    /// Sample all four raw fields for every cell of a `width x height` map.
    ///
    /// Columns are independent, so each rayon task fills one column of each
    /// map and no cell is written twice.
    pub fn sample(noise: &NoiseSources, params: &TerrainParams, width: usize, height: usize) -> Self {
        let mut fields = Self {
            height: Tilemap::new_with(width, height, 0.0),
            moisture: Tilemap::new_with(width, height, 0.0),
            temperature: Tilemap::new_with(width, height, 0.0),
            aridity: Tilemap::new_with(width, height, 0.0),
        };

        let width_f = width as f64;
        let height_f = height as f64;

        fields
            .height
            .par_columns_mut()
            .zip(fields.moisture.par_columns_mut())
            .zip(fields.temperature.par_columns_mut())
            .zip(fields.aridity.par_columns_mut())
            .for_each(|((((q, h_col), (_, m_col)), (_, t_col)), (_, a_col))| {
                let nx = q as f64 / width_f;
                for r in 0..h_col.len() {
                    let ny = r as f64 / height_f;
                    h_col[r] = noise.height(params, nx, ny) as f32;
                    m_col[r] = noise.moisture(params, nx, ny) as f32;
                    t_col[r] = noise.temperature(params, nx, ny) as f32;
                    a_col[r] = noise.aridity(params, nx, ny) as f32;
                }
            });

        fields
    }

    /// Min-max normalize the four maps concurrently.
    ///
    /// Returns only after all four passes have finished. A map with zero range
    /// is left as-is.
    pub fn normalize(&mut self) -> NormalizationReport {
        let start = Instant::now();
        let Self { height, moisture, temperature, aridity } = self;

        let ((h, m), (t, a)) = rayon::join(
            || rayon::join(|| height.normalize(), || moisture.normalize()),
            || rayon::join(|| temperature.normalize(), || aridity.normalize()),
        );

        let report = NormalizationReport {
            height: h,
            moisture: m,
            temperature: t,
            aridity: a,
        };
        for (name, rescaled) in [("height", h), ("moisture", m), ("temperature", t), ("aridity", a)] {
            if !rescaled {
                tracing::debug!(field = name, "flat field, normalization skipped");
            }
        }
        tracing::debug!(elapsed_ms = start.elapsed().as_millis() as u64, "fields normalized");
        report
    }

    /// `(height, moisture, temperature, aridity)` at one cell.
    pub fn at(&self, q: usize, r: usize) -> (f32, f32, f32, f32) {
        (
            *self.height.get(q, r),
            *self.moisture.get(q, r),
            *self.temperature.get(q, r),
            *self.aridity.get(q, r),
        )
    }
}
