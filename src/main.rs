use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use hex_world::ascii::{self, AsciiMode};
use hex_world::generator::{
    GenerationContext, GenerationManager, GeneratorKind, LocationGeneratorConfig, WorldGeneratorConfig,
};
use hex_world::hex::geometry::axial_to_pixel;
use hex_world::report::GenerationReport;
use hex_world::{GameSettings, HexCoordinate};

/// World generator selectable from the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum WorldSource {
    Procedural,
    Rectangular,
    Saved,
}

impl WorldSource {
    fn kind(self) -> GeneratorKind {
        match self {
            WorldSource::Procedural => GeneratorKind::ProceduralWorld,
            WorldSource::Rectangular => GeneratorKind::RectangularWorld,
            WorldSource::Saved => GeneratorKind::SavedWorld,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "hex_world")]
#[command(about = "Generate procedural hexagonal world maps with locations")]
struct Args {
    /// Settings file (JSON); flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Width of the map in hexes
    #[arg(short = 'W', long)]
    width: Option<usize>,

    /// Height of the map in hexes
    #[arg(short = 'H', long)]
    height: Option<usize>,

    /// Random seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of locations to place
    #[arg(short = 'l', long)]
    locations: Option<usize>,

    /// World generator to run
    #[arg(long, value_enum, default_value = "procedural")]
    world: WorldSource,

    /// Save file read by the saved world generator
    #[arg(long)]
    save_path: Option<PathBuf>,

    /// Print the map as ASCII in the given mode
    #[arg(long, value_enum)]
    ascii: Option<AsciiMode>,

    /// Write a JSON generation report (e.g., "report.json")
    #[arg(long)]
    report: Option<PathBuf>,

    /// Export the map, legend and locations to a text file (e.g., "world.txt")
    #[arg(long)]
    export: Option<PathBuf>,

    /// Append a save step for this path (no storage format yet, so the run fails)
    #[arg(long)]
    save: Option<PathBuf>,
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_settings(args: &Args) -> Result<GameSettings, Box<dyn Error>> {
    let mut settings = match &args.config {
        Some(path) => GameSettings::load(path)?,
        None => GameSettings::default(),
    };
    if let Some(width) = args.width {
        settings.world.width = width;
    }
    if let Some(height) = args.height {
        settings.world.height = height;
    }
    if let Some(seed) = args.seed {
        settings.world.seed = seed;
    }
    if let Some(count) = args.locations {
        settings.location_count = count;
    }
    Ok(settings)
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let settings = load_settings(&args)?;
    init_tracing(&settings.log_level);

    let world = &settings.world;
    println!("Generating world with seed: {}", world.seed);
    println!("Map size: {}x{} hexes", world.width, world.height);

    let far_corner = HexCoordinate::new(world.width as i32 - 1, world.height as i32 - 1);
    let (px, py) = axial_to_pixel(far_corner, settings.hex_size);
    tracing::debug!(hex_size = settings.hex_size, px, py, "projected map extent");

    let mut world_config = WorldGeneratorConfig::new(world.seed, world.width, world.height)
        .with_terrain(settings.terrain.clone());
    world_config.save_path = args.save_path.clone();
    let location_config = LocationGeneratorConfig::new(world.seed, settings.location_count);

    let mut pipeline = GenerationManager::standard_pipeline(
        args.world.kind(),
        &world_config,
        GeneratorKind::RandomLocation,
        &location_config,
    )?;
    if let Some(path) = &args.save {
        pipeline = GenerationManager::save_pipeline(pipeline, path.clone());
    }
    tracing::info!(steps = ?pipeline.step_names(), "pipeline assembled");

    let settings = Arc::new(settings);
    let context = pipeline.execute(GenerationContext::new(settings))?;

    let report = GenerationReport::from_context(&context);
    println!();
    print!("{}", report);

    if let Some(mode) = args.ascii {
        println!("\n=== {} ===", mode.name());
        ascii::print_hex_map(&context.hex_map, &context.locations, mode);
        print!("{}", ascii::terrain_legend());
    }

    if let Some(path) = &args.report {
        report.write_json(path)?;
        println!("Report written to {}", path.display());
    }

    if let Some(path) = &args.export {
        ascii::export_world_file(&context, path)?;
        println!("World file written to {}", path.display());
    }

    Ok(())
}
