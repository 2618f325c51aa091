//! Generation pipeline: context, steps, generators and the factory tying
//! them together.

pub mod context;
pub mod factory;
pub mod location;
pub mod persistence;
pub mod pipeline;
pub mod world;

pub use context::{EntityId, GenerationContext};
pub use factory::{GeneratorFactory, GeneratorKind, LocationGeneratorConfig, WorldGeneratorConfig};
pub use location::{Location, LocationGenerator, LocationKind, RandomLocationGenerator};
pub use persistence::{SaveLoadMode, SaveLoadStep};
pub use pipeline::{GenerationManager, GeneratorPipeline, GeneratorStep, PipelineBuilder};
pub use world::{ProceduralWorldGenerator, WorldGenerator};
