//! Profiling tool to identify performance bottlenecks

use std::time::{Duration, Instant};

use hex_world::climate::{ClimateFields, NoiseSources, TerrainParams};
use hex_world::generator::location::{LocationGenerator, RandomLocationGenerator};
use hex_world::generator::world::ProceduralWorldGenerator;

const SIZES: &[(usize, usize)] = &[(64, 48), (128, 96), (256, 192), (512, 384)];

fn percent(part: Duration, total: Duration) -> f64 {
    100.0 * part.as_secs_f64() / total.as_secs_f64().max(f64::EPSILON)
}

fn main() {
    let seed = 1337u64;
    let params = TerrainParams::default();
    let noise = NoiseSources::from_seed(seed);

    println!("=== Performance Profiling ===");
    println!("Seed: {}  Threads: {}", seed, rayon::current_num_threads());

    for &(width, height) in SIZES {
        println!();
        println!("Map size: {}x{} ({} hexes)", width, height, width * height);

        let start = Instant::now();
        let mut fields = ClimateFields::sample(&noise, &params, width, height);
        let sample_time = start.elapsed();
        println!("Field sampling:  {:?}", sample_time);

        let start = Instant::now();
        fields.normalize();
        let normalize_time = start.elapsed();
        println!("Normalization:   {:?}", normalize_time);

        let generator = ProceduralWorldGenerator::with_params(width, height, seed, params.clone());
        let start = Instant::now();
        let map = generator.build_map(&fields);
        let classify_time = start.elapsed();
        println!("Classification:  {:?}", classify_time);

        let start = Instant::now();
        let placed = match RandomLocationGenerator::new(12, seed).generate_locations(&map) {
            Ok(locations) => locations.len(),
            Err(e) => {
                eprintln!("Location generation failed: {}", e);
                0
            }
        };
        let location_time = start.elapsed();
        println!("Locations:       {:?} ({} placed)", location_time, placed);

        let total = sample_time + normalize_time + classify_time + location_time;
        println!("─────────────────────────────────");
        println!("Sampling:        {:>8.2}%", percent(sample_time, total));
        println!("Normalization:   {:>8.2}%", percent(normalize_time, total));
        println!("Classification:  {:>8.2}%", percent(classify_time, total));
        println!("Locations:       {:>8.2}%", percent(location_time, total));
        println!("TOTAL:           {:>8}  {:?}", "100%", total);
    }
}
