//! Ordered generation steps over a shared [`GenerationContext`].

use std::path::PathBuf;

use crate::error::Result;
use crate::generator::context::GenerationContext;
use crate::generator::factory::{GeneratorFactory, GeneratorKind, LocationGeneratorConfig, WorldGeneratorConfig};
use crate::generator::location::LocationGenerationStep;
use crate::generator::persistence::{SaveLoadMode, SaveLoadStep};
use crate::generator::world::WorldGenerationStep;

/// One mutation of the generation context.
pub trait GeneratorStep: Send {
    /// Short label used in logs and error messages.
    fn name(&self) -> &str;

    fn execute(&mut self, context: &mut GenerationContext) -> Result<()>;
}

/// Runs its steps strictly in insertion order.
#[derive(Default)]
pub struct GeneratorPipeline {
    steps: Vec<Box<dyn GeneratorStep>>,
}

impl GeneratorPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_step(&mut self, step: impl GeneratorStep + 'static) {
        self.steps.push(Box::new(step));
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    pub fn clear(&mut self) {
        self.steps.clear();
    }

    /// Run every step on `context` and hand it back.
    ///
    /// The first failing step stops the run; its error is wrapped with the
    /// step's index and name and the later steps never execute.
    pub fn execute(&mut self, mut context: GenerationContext) -> Result<GenerationContext> {
        let total = self.steps.len();
        for (index, step) in self.steps.iter_mut().enumerate() {
            let name = step.name().to_string();
            tracing::debug!(index, total, step = %name, "running generation step");
            step.execute(&mut context)
                .map_err(|e| e.in_step(index, name.clone()))?;
            tracing::debug!(index, step = %name, "generation step finished");
        }
        Ok(context)
    }
}

/// Fluent construction of a pipeline from generator kinds.
#[derive(Default)]
pub struct PipelineBuilder {
    pipeline: GeneratorPipeline,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_world(mut self, kind: GeneratorKind, config: &WorldGeneratorConfig) -> Result<Self> {
        let generator = GeneratorFactory::create_world_generator(kind, config)?;
        self.pipeline.add_step(WorldGenerationStep::new(generator));
        Ok(self)
    }

    pub fn with_locations(mut self, kind: GeneratorKind, config: &LocationGeneratorConfig) -> Result<Self> {
        let generator = GeneratorFactory::create_location_generator(kind, config)?;
        self.pipeline.add_step(LocationGenerationStep::new(generator));
        Ok(self)
    }

    pub fn with_save_load(mut self, path: impl Into<PathBuf>, mode: SaveLoadMode) -> Self {
        self.pipeline.add_step(SaveLoadStep::new(path, mode));
        self
    }

    pub fn with_step(mut self, step: impl GeneratorStep + 'static) -> Self {
        self.pipeline.add_step(step);
        self
    }

    pub fn clear(mut self) -> Self {
        self.pipeline.clear();
        self
    }

    pub fn build(self) -> GeneratorPipeline {
        self.pipeline
    }
}

/// Ready-made pipelines for the usual scenarios.
pub struct GenerationManager;

impl GenerationManager {
    /// World then locations.
    pub fn standard_pipeline(
        world_kind: GeneratorKind,
        world_config: &WorldGeneratorConfig,
        location_kind: GeneratorKind,
        location_config: &LocationGeneratorConfig,
    ) -> Result<GeneratorPipeline> {
        Ok(PipelineBuilder::new()
            .with_world(world_kind, world_config)?
            .with_locations(location_kind, location_config)?
            .build())
    }

    /// A single load step.
    pub fn load_pipeline(path: impl Into<PathBuf>) -> GeneratorPipeline {
        PipelineBuilder::new()
            .with_save_load(path, SaveLoadMode::Load)
            .build()
    }

    /// Append a save step to an existing pipeline.
    pub fn save_pipeline(mut pipeline: GeneratorPipeline, path: impl Into<PathBuf>) -> GeneratorPipeline {
        pipeline.add_step(SaveLoadStep::new(path, SaveLoadMode::Save));
        pipeline
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenerationError;
    use crate::generator::context::EntityId;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Pushes its marker, after checking the previous marker is the expected one.
    struct RecordingStep {
        marker: u64,
        expects_before: Option<u64>,
    }

    impl GeneratorStep for RecordingStep {
        fn name(&self) -> &str {
            "record"
        }

        fn execute(&mut self, context: &mut GenerationContext) -> Result<()> {
            assert_eq!(context.npcs.last().map(|e| e.0), self.expects_before);
            context.add_npc(EntityId(self.marker));
            Ok(())
        }
    }

    struct FailingStep;

    impl GeneratorStep for FailingStep {
        fn name(&self) -> &str {
            "explode"
        }

        fn execute(&mut self, _context: &mut GenerationContext) -> Result<()> {
            Err(GenerationError::InvalidConfig("boom".into()))
        }
    }

    struct CountingStep(Arc<AtomicUsize>);

    impl GeneratorStep for CountingStep {
        fn name(&self) -> &str {
            "count"
        }

        fn execute(&mut self, _context: &mut GenerationContext) -> Result<()> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn test_steps_run_in_order() {
        let mut pipeline = PipelineBuilder::new()
            .with_step(RecordingStep { marker: 1, expects_before: None })
            .with_step(RecordingStep { marker: 2, expects_before: Some(1) })
            .with_step(RecordingStep { marker: 3, expects_before: Some(2) })
            .build();

        let ctx = pipeline.execute(GenerationContext::default()).unwrap();
        assert_eq!(ctx.npcs, vec![EntityId(1), EntityId(2), EntityId(3)]);
    }

    #[test]
    fn test_failure_stops_remaining_steps() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut pipeline = PipelineBuilder::new()
            .with_step(CountingStep(counter.clone()))
            .with_step(FailingStep)
            .with_step(CountingStep(counter.clone()))
            .build();

        let err = pipeline.execute(GenerationContext::default()).unwrap_err();
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        match err {
            GenerationError::StepFailed { index, step, .. } => {
                assert_eq!(index, 1);
                assert_eq!(step, "explode");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_pipeline_returns_context_untouched() {
        let mut pipeline = GeneratorPipeline::new();
        assert!(pipeline.is_empty());
        let ctx = pipeline.execute(GenerationContext::default()).unwrap();
        assert!(ctx.hex_map.is_empty());
    }

    #[test]
    fn test_builder_clear_and_names() {
        let builder = PipelineBuilder::new()
            .with_step(FailingStep)
            .with_save_load("world.sav", SaveLoadMode::Save);
        let pipeline = builder.build();
        assert_eq!(pipeline.step_names(), vec!["explode", "save"]);

        let cleared = PipelineBuilder::new().with_step(FailingStep).clear().build();
        assert_eq!(cleared.len(), 0);
    }

    #[test]
    fn test_manager_pipelines() {
        let world = WorldGeneratorConfig::new(42, 10, 10);
        let locations = LocationGeneratorConfig::new(42, 4);
        let standard = GenerationManager::standard_pipeline(
            GeneratorKind::ProceduralWorld,
            &world,
            GeneratorKind::RandomLocation,
            &locations,
        )
        .unwrap();
        assert_eq!(standard.step_names(), vec!["world", "locations"]);

        let saving = GenerationManager::save_pipeline(standard, "out.sav");
        assert_eq!(saving.step_names(), vec!["world", "locations", "save"]);

        let loading = GenerationManager::load_pipeline("in.sav");
        assert_eq!(loading.step_names(), vec!["load"]);
    }

    fn run_standard(seed: u64) -> GenerationContext {
        let world = WorldGeneratorConfig::new(seed, 10, 10);
        let locations = LocationGeneratorConfig::new(seed, 4);
        let mut pipeline = GenerationManager::standard_pipeline(
            GeneratorKind::ProceduralWorld,
            &world,
            GeneratorKind::RandomLocation,
            &locations,
        )
        .unwrap();
        pipeline.execute(GenerationContext::default()).unwrap()
    }

    #[test]
    fn test_standard_pipeline_ten_by_ten() {
        let first = run_standard(42);
        let map = &first.hex_map;
        assert_eq!(map.len(), 100);

        let coords = map.sorted_coordinates();
        let unique: std::collections::HashSet<_> = coords.iter().copied().collect();
        assert_eq!(unique.len(), 100);
        for q in 0..10 {
            for r in 0..10 {
                assert!(map.get_at(q, r).is_some(), "missing ({q}, {r})");
            }
        }
        assert!(coords.iter().all(|c| (0..10).contains(&c.q()) && (0..10).contains(&c.r())));

        let again = run_standard(42);
        assert_eq!(again.hex_map, first.hex_map);
        assert_eq!(again.locations, first.locations);

        let other = run_standard(43);
        assert_ne!(other.hex_map.terrain_histogram(), first.hex_map.terrain_histogram());
    }

    #[test]
    fn test_manager_rejects_swapped_kinds() {
        let world = WorldGeneratorConfig::new(1, 4, 4);
        let locations = LocationGeneratorConfig::new(1, 2);
        let result = GenerationManager::standard_pipeline(
            GeneratorKind::RandomLocation,
            &world,
            GeneratorKind::ProceduralWorld,
            &locations,
        );
        assert!(matches!(result, Err(e) if e.is_configuration()));
    }
}
