//! Core functionality for archgen
//!
//! Turns a requirements questionnaire into a validated solution
//! architecture in two LLM stages: a prompt-enhancement call and a
//! structured generation call, followed by fence stripping and schema
//! validation of the generated JSON.

pub mod architecture;
pub mod config;
pub mod error;
pub mod llm;
pub mod pipeline;
pub mod requirements;

pub use architecture::{Architecture, ArchitectureResult, Component};
pub use config::{ArchitectConfig, PipelineConfig};
pub use error::{ErrorCategory, PipelineError, Stage};
pub use pipeline::{Pipeline, PipelineState, build_pipeline};
pub use requirements::{FormattedRequirements, RequirementsInput, format_requirements};
