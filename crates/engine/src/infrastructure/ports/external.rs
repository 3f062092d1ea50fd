//! External service port traits (LLM).

use async_trait::async_trait;

use super::error::LlmError;

/// Sampling defaults used when a caller does not pick its own.
const DEFAULT_TEMPERATURE: f32 = 0.8;
const DEFAULT_TOP_P: f32 = 0.9;

/// One text-generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// The assembled prompt
    pub prompt: String,
    /// System instructions, prepended to the prompt when present
    pub system_prompt: Option<String>,
    /// Temperature for response generation (0.0 - 2.0)
    pub temperature: f32,
    /// Nucleus sampling parameter
    pub top_p: f32,
    /// Explicit token budget
    pub max_tokens: Option<u32>,
    /// Desired output length in words; wins over `max_tokens` when both are set
    pub target_words: Option<i64>,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system_prompt: None,
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
            max_tokens: None,
            target_words: None,
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = temp;
        self
    }

    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = top_p;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_target_words(mut self, target_words: Option<i64>) -> Self {
        self.target_words = target_words;
        self
    }

    /// The text actually sent to the model: system instructions first,
    /// separated from the prompt by a blank line.
    pub fn full_prompt(&self) -> String {
        match self.system_prompt.as_deref().map(str::trim) {
            Some(system) if !system.is_empty() => format!("{}\n\n{}", system, self.prompt),
            _ => self.prompt.clone(),
        }
    }
}

/// Successful generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    /// The generated text; empty when the server sent no `response` field
    pub text: String,
    /// Token budget the request was sent with
    pub num_predict: u32,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LlmPort: Send + Sync {
    /// Issue one generation request. Never retries.
    async fn generate(&self, request: GenerationRequest) -> Result<Generated, LlmError>;

    /// Quick reachability probe; any failure reads as unavailable.
    async fn check_availability(&self) -> bool;
}
