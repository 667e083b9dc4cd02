//! Two-stage architecture generation pipeline
//!
//! `Formatting -> Enhancing -> Generating -> Sanitizing -> Validating -> Done`
//!
//! There are no branch-back transitions; the first failing stage ends the
//! run in [`PipelineState::Failed`] and its error is returned unchanged.
//! The enhancement and generation calls are the only suspension points, so
//! dropping the `run` future aborts the in-flight request.

pub mod enhancer;
pub mod generator;


pub use enhancer::{EnhancedPrompt, PromptEnhancer};
pub use generator::{ArchitectureGenerator, RawArchitectureText};

use crate::architecture::{self, ArchitectureResult};
use crate::config::ArchitectConfig;
use crate::error::{PipelineError, Stage};
use crate::llm::{self, LLMResult, TextGenerationClient};
use crate::requirements::{RequirementsInput, format_requirements};
use std::fmt;
use std::sync::Arc;
use tracing::{Instrument, debug, error, info, info_span};
use uuid::Uuid;

/// Where a run currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Formatting,
    Enhancing,
    Generating,
    Sanitizing,
    Validating,
    Done,
    Failed(Stage),
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineState::Formatting => write!(f, "formatting"),
            PipelineState::Enhancing => write!(f, "enhancing"),
            PipelineState::Generating => write!(f, "generating"),
            PipelineState::Sanitizing => write!(f, "sanitizing"),
            PipelineState::Validating => write!(f, "validating"),
            PipelineState::Done => write!(f, "done"),
            PipelineState::Failed(stage) => write!(f, "failed while {stage}"),
        }
    }
}

/// Stateless orchestrator; one instance serves any number of runs
pub struct Pipeline {
    enhancer: PromptEnhancer,
    generator: ArchitectureGenerator,
}

impl Pipeline {
    pub fn new(
        enhancement_client: Arc<dyn TextGenerationClient>,
        generation_client: Arc<dyn TextGenerationClient>,
    ) -> Self {
        Self {
            enhancer: PromptEnhancer::new(enhancement_client),
            generator: ArchitectureGenerator::new(generation_client),
        }
    }

    pub fn enhancer(&self) -> &PromptEnhancer {
        &self.enhancer
    }

    pub fn generator(&self) -> &ArchitectureGenerator {
        &self.generator
    }

    /// Fail before any network call when a stage has no credential
    pub fn preflight(&self) -> Result<(), PipelineError> {
        for (stage, client) in [
            (Stage::Enhancing, self.enhancer.client()),
            (Stage::Generating, self.generator.client()),
        ] {
            if !client.is_configured() {
                return Err(PipelineError::ProviderUnavailable {
                    provider: client.name().to_string(),
                    stage,
                });
            }
        }
        Ok(())
    }

    /// Turn a questionnaire into a validated architecture
    pub async fn run(
        &self,
        input: &RequirementsInput,
    ) -> Result<ArchitectureResult, PipelineError> {
        let run_id = Uuid::new_v4();
        let span = info_span!("pipeline", %run_id);

        async {
            let mut state = PipelineState::Formatting;
            let result = self.run_stages(input, &mut state).await;

            match &result {
                Ok(architecture) => {
                    state = PipelineState::Done;
                    let components = architecture.components().len();
                    info!(%state, components, "Pipeline finished");
                }
                Err(e) => {
                    state = PipelineState::Failed(e.stage());
                    let cause = std::error::Error::source(e).map(ToString::to_string);
                    error!(%state, error = %e, cause = ?cause, "Pipeline failed");
                }
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn run_stages(
        &self,
        input: &RequirementsInput,
        state: &mut PipelineState,
    ) -> Result<ArchitectureResult, PipelineError> {
        self.preflight()?;

        info!(state = %state, "Formatting requirements");
        let formatted = format_requirements(input);
        debug!(chars = formatted.as_str().len(), "Requirements formatted");

        *state = PipelineState::Enhancing;
        info!(state = %state, provider = self.enhancer.client().name(), "Enhancing prompt");
        let enhanced = self.enhancer.enhance(&formatted).await?;

        *state = PipelineState::Generating;
        info!(state = %state, provider = self.generator.client().name(), "Generating architecture");
        let raw = self.generator.generate(&enhanced).await?;

        *state = PipelineState::Sanitizing;
        info!(state = %state, "Sanitizing output");
        let clean = architecture::sanitize(raw.as_str());
        if clean.len() != raw.as_str().len() {
            debug!(before = raw.as_str().len(), after = clean.len(), "Stripped markdown fences");
        }

        *state = PipelineState::Validating;
        info!(state = %state, "Validating architecture");
        architecture::validate(clean)
    }
}

/// Wire a pipeline from configuration, resolving credentials once
///
/// When both stages name the same provider they share a single client.
pub fn build_pipeline(config: &ArchitectConfig) -> LLMResult<Pipeline> {
    let stages = &config.pipeline;
    let enhancement = llm::build_client(stages.enhancement_provider, &config.providers)?;
    let generation = if stages.is_single_provider() {
        Arc::clone(&enhancement)
    } else {
        llm::build_client(stages.generation_provider, &config.providers)?
    };

    info!(
        enhancement = %stages.enhancement_provider,
        generation = %stages.generation_provider,
        "Pipeline wired"
    );
    Ok(Pipeline::new(enhancement, generation))
}
