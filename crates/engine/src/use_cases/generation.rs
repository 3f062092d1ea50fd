//! Domain-specific generation wrappers.
//!
//! Each wrapper pins the system instructions and sampling defaults for one
//! kind of content, then delegates to [`LlmPort::generate`].

use std::sync::Arc;

use crate::infrastructure::ports::{Generated, GenerationRequest, LlmError, LlmPort};
use crate::infrastructure::settings::GenerationDefaults;
use crate::prompt_templates::SystemPrompts;

use super::worker::{GenerationHandle, GenerationWorker};

/// Sampling defaults for one kind of content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingDefaults {
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: u32,
}

impl SamplingDefaults {
    pub const CHAPTER: Self = Self {
        temperature: 0.85,
        top_p: 0.9,
        max_tokens: 4500,
    };
    pub const WORLD: Self = Self {
        temperature: 0.7,
        top_p: 0.85,
        max_tokens: 2000,
    };
    pub const CHARACTER: Self = Self {
        temperature: 0.75,
        top_p: 0.9,
        max_tokens: 2000,
    };
}

pub struct GenerationService {
    llm: Arc<dyn LlmPort>,
    worker: GenerationWorker,
    prompts: SystemPrompts,
    chapter: SamplingDefaults,
    world: SamplingDefaults,
    character: SamplingDefaults,
}

impl GenerationService {
    pub fn new(llm: Arc<dyn LlmPort>, prompts: SystemPrompts) -> Self {
        Self {
            worker: GenerationWorker::new(Arc::clone(&llm)),
            llm,
            prompts,
            chapter: SamplingDefaults::CHAPTER,
            world: SamplingDefaults::WORLD,
            character: SamplingDefaults::CHARACTER,
        }
    }

    /// Use the configured per-kind temperatures.
    pub fn with_generation_defaults(mut self, defaults: &GenerationDefaults) -> Self {
        self.chapter.temperature = defaults.chapter_temperature;
        self.world.temperature = defaults.world_temperature;
        self.character.temperature = defaults.character_temperature;
        self
    }

    /// Run spawned generations under `worker` instead of a private one.
    pub fn with_worker(mut self, worker: GenerationWorker) -> Self {
        self.worker = worker;
        self
    }

    pub fn chapter_request(
        &self,
        prompt: impl Into<String>,
        temperature: Option<f32>,
        target_words: Option<u32>,
    ) -> GenerationRequest {
        GenerationRequest::new(prompt)
            .with_system_prompt(self.prompts.chapter.clone())
            .with_temperature(temperature.unwrap_or(self.chapter.temperature))
            .with_top_p(self.chapter.top_p)
            .with_max_tokens(Some(self.chapter.max_tokens))
            .with_target_words(target_words.map(i64::from))
    }

    pub fn world_request(
        &self,
        prompt: impl Into<String>,
        temperature: Option<f32>,
        max_tokens: Option<u32>,
    ) -> GenerationRequest {
        GenerationRequest::new(prompt)
            .with_system_prompt(self.prompts.world.clone())
            .with_temperature(temperature.unwrap_or(self.world.temperature))
            .with_top_p(self.world.top_p)
            .with_max_tokens(Some(max_tokens.unwrap_or(self.world.max_tokens)))
    }

    pub fn character_request(
        &self,
        prompt: impl Into<String>,
        temperature: Option<f32>,
    ) -> GenerationRequest {
        GenerationRequest::new(prompt)
            .with_system_prompt(self.prompts.character.clone())
            .with_temperature(temperature.unwrap_or(self.character.temperature))
            .with_top_p(self.character.top_p)
            .with_max_tokens(Some(self.character.max_tokens))
    }

    pub async fn generate_for_chapter(
        &self,
        prompt: impl Into<String>,
        temperature: Option<f32>,
        target_words: Option<u32>,
    ) -> Result<Generated, LlmError> {
        self.llm
            .generate(self.chapter_request(prompt, temperature, target_words))
            .await
    }

    pub async fn generate_for_world_detail(
        &self,
        prompt: impl Into<String>,
        temperature: Option<f32>,
        max_tokens: Option<u32>,
    ) -> Result<Generated, LlmError> {
        self.llm
            .generate(self.world_request(prompt, temperature, max_tokens))
            .await
    }

    pub async fn generate_for_character_detail(
        &self,
        prompt: impl Into<String>,
        temperature: Option<f32>,
    ) -> Result<Generated, LlmError> {
        self.llm
            .generate(self.character_request(prompt, temperature))
            .await
    }

    /// Start `request` in the background.
    pub fn spawn(&self, request: GenerationRequest) -> GenerationHandle {
        self.worker.spawn(request)
    }

    pub async fn check_availability(&self) -> bool {
        self.llm.check_availability().await
    }
}

/// Legacy rendering of a generation outcome: the text itself, or a sentence
/// starting with `Error:`.
pub fn display_text(result: &Result<Generated, LlmError>) -> String {
    match result {
        Ok(generated) => generated.text.clone(),
        Err(e) => e.display_text(),
    }
}
