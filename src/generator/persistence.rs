//! Save and load steps for a generation context.

use std::fmt;
use std::path::PathBuf;

use crate::error::{GenerationError, Result};
use crate::generator::context::GenerationContext;
use crate::generator::pipeline::GeneratorStep;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveLoadMode {
    Load,
    Save,
}

impl fmt::Display for SaveLoadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveLoadMode::Load => f.write_str("load"),
            SaveLoadMode::Save => f.write_str("save"),
        }
    }
}

/// Reads or writes the whole context at `path`.
///
/// Neither direction has a storage format yet, so running the step always
/// fails with [`GenerationError::NotImplemented`] instead of silently passing.
pub struct SaveLoadStep {
    path: PathBuf,
    mode: SaveLoadMode,
}

impl SaveLoadStep {
    pub fn new(path: impl Into<PathBuf>, mode: SaveLoadMode) -> Self {
        Self {
            path: path.into(),
            mode,
        }
    }

    pub fn mode(&self) -> SaveLoadMode {
        self.mode
    }
}

impl GeneratorStep for SaveLoadStep {
    fn name(&self) -> &str {
        match self.mode {
            SaveLoadMode::Load => "load",
            SaveLoadMode::Save => "save",
        }
    }

    fn execute(&mut self, context: &mut GenerationContext) -> Result<()> {
        tracing::warn!(
            mode = %self.mode,
            path = %self.path.display(),
            hexes = context.hex_map.len(),
            "save/load requested but no storage format exists"
        );
        let feature = match self.mode {
            SaveLoadMode::Load => "loading a generation context",
            SaveLoadMode::Save => "saving a generation context",
        };
        Err(GenerationError::NotImplemented {
            feature,
            path: self.path.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::pipeline::PipelineBuilder;

    #[test]
    fn test_save_step_fails_loudly() {
        let mut pipeline = PipelineBuilder::new()
            .with_save_load("world.sav", SaveLoadMode::Save)
            .build();
        let err = pipeline.execute(GenerationContext::default()).unwrap_err();
        assert!(err.is_not_implemented());
        assert!(err.to_string().contains("save"));
    }

    #[test]
    fn test_load_step_names_itself() {
        let step = SaveLoadStep::new("world.sav", SaveLoadMode::Load);
        assert_eq!(step.name(), "load");
        assert_eq!(step.mode(), SaveLoadMode::Load);
    }
}
