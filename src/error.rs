//! Error types for world generation.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::generator::factory::GeneratorKind;

/// Which factory method a generator kind was handed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeneratorRole {
    World,
    Location,
}

impl fmt::Display for GeneratorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneratorRole::World => write!(f, "world"),
            GeneratorRole::Location => write!(f, "location"),
        }
    }
}

/// Errors raised while building or running a generation pipeline.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// A generator kind was passed to a factory method that cannot build it.
    #[error("unsupported generator kind {kind} for {role} generation")]
    UnsupportedKind {
        kind: GeneratorKind,
        role: GeneratorRole,
    },

    /// A configuration record lacks something its generator kind needs.
    #[error("invalid generator configuration: {0}")]
    InvalidConfig(String),

    /// The requested feature exists as a slot but has no implementation yet.
    #[error("{feature} is not implemented (resource: {})", .path.display())]
    NotImplemented {
        feature: &'static str,
        path: PathBuf,
    },

    /// A step that reads the hex map ran before any world step produced one.
    #[error("hex map must be generated before placing locations")]
    MissingHexMap,

    /// A pipeline step failed; the steps after it were not run.
    #[error("step {index} ({step}) failed: {source}")]
    StepFailed {
        index: usize,
        step: String,
        #[source]
        source: Box<GenerationError>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings error: {0}")]
    Settings(#[from] serde_json::Error),
}

impl GenerationError {
    /// Wrap this error with the pipeline position of the step that raised it.
    pub fn in_step(self, index: usize, step: impl Into<String>) -> Self {
        GenerationError::StepFailed {
            index,
            step: step.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, looking through `StepFailed` wrappers.
    pub fn root(&self) -> &GenerationError {
        match self {
            GenerationError::StepFailed { source, .. } => source.root(),
            other => other,
        }
    }

    /// True when the failure means "not yet supported" rather than misuse.
    pub fn is_not_implemented(&self) -> bool {
        matches!(self.root(), GenerationError::NotImplemented { .. })
    }

    /// True when the failure is a misconfiguration of a generator.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self.root(),
            GenerationError::UnsupportedKind { .. } | GenerationError::InvalidConfig(_)
        )
    }
}

pub type Result<T, E = GenerationError> = std::result::Result<T, E>;
