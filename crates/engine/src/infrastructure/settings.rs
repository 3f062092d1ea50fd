//! Engine settings
//!
//! Every value has a default, so a missing or partial settings file is fine.
//! Loading order: defaults, then the optional JSON file, then environment
//! variables. Settings are passed explicitly; there is no global instance.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::length_budget::LengthBudget;

/// Default Ollama base URL.
pub const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";

/// Default model for Ollama.
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3.1:8b";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Failed to read settings file {path}: {message}")]
    Io { path: String, message: String },
    #[error("Invalid settings file {path}: {message}")]
    Parse { path: String, message: String },
    #[error("Invalid value for {key}: {value:?}")]
    InvalidEnv { key: &'static str, value: String },
    #[error("Invalid settings: {0}")]
    Invalid(String),
}

// ============================================================================
// Ollama connection
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OllamaSettings {
    pub base_url: String,
    pub model: String,
    /// Generation can take minutes for long chapters
    pub request_timeout_secs: u64,
    pub availability_timeout_secs: u64,
    /// Token budget when a request names neither a word target nor a limit
    pub default_max_tokens: u32,
}

impl Default for OllamaSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OLLAMA_BASE_URL.to_string(),
            model: DEFAULT_OLLAMA_MODEL.to_string(),
            request_timeout_secs: 300,
            availability_timeout_secs: 5,
            default_max_tokens: 4000,
        }
    }
}

// ============================================================================
// Generation defaults
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationDefaults {
    pub default_word_count: u32,
    pub min_word_count: u32,
    pub max_word_count: u32,
    pub chapter_temperature: f32,
    pub world_temperature: f32,
    pub character_temperature: f32,
}

impl Default for GenerationDefaults {
    fn default() -> Self {
        Self {
            default_word_count: 3000,
            min_word_count: 3000,
            max_word_count: 8000,
            chapter_temperature: 0.85,
            world_temperature: 0.7,
            character_temperature: 0.75,
        }
    }
}

impl GenerationDefaults {
    /// Pins a requested chapter length into the configured bounds.
    pub fn clamp_words(&self, words: u32) -> u32 {
        words.clamp(self.min_word_count, self.max_word_count)
    }
}

// ============================================================================
// Style presets
// ============================================================================

/// A named writing style authors can pick for a chapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StylePreset {
    pub name: String,
    pub description: String,
    pub temperature: f32,
    pub style_notes: String,
}

impl StylePreset {
    fn new(name: &str, description: &str, temperature: f32, style_notes: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            temperature,
            style_notes: style_notes.to_string(),
        }
    }
}

fn default_style_presets() -> BTreeMap<String, StylePreset> {
    BTreeMap::from([
        (
            "rezero".to_string(),
            StylePreset::new(
                "ReZero Style",
                "Deep psychological exploration, time loop tension, emotional intensity",
                0.85,
                "Focus on internal monologue, suffering and growth, detailed emotional reactions",
            ),
        ),
        (
            "fate".to_string(),
            StylePreset::new(
                "Fate Style",
                "Epic battles, heroic ideals, complex magic systems",
                0.8,
                "Noble phantasms, servant dynamics, philosophical conflict, grand scale",
            ),
        ),
        (
            "isekai".to_string(),
            StylePreset::new(
                "Classic Isekai",
                "Power fantasy, game mechanics, adventure focus",
                0.8,
                "World building, skill acquisition, world exploration, lighter tone",
            ),
        ),
        (
            "dark_fantasy".to_string(),
            StylePreset::new(
                "Dark Fantasy",
                "Gritty realism, moral ambiguity, high stakes, tactical/intense combat",
                0.8,
                "Consequences matter, complex villains, mature themes",
            ),
        ),
    ])
}

// ============================================================================
// Engine settings
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub ollama: OllamaSettings,
    pub length_budget: LengthBudget,
    pub generation: GenerationDefaults,
    pub style_presets: BTreeMap<String, StylePreset>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            ollama: OllamaSettings::default(),
            length_budget: LengthBudget::default(),
            generation: GenerationDefaults::default(),
            style_presets: default_style_presets(),
        }
    }
}

impl EngineSettings {
    /// Reads a JSON settings file. Keys missing from the file keep their defaults.
    pub fn load_from_file(path: &Path) -> Result<Self, SettingsError> {
        let raw = std::fs::read_to_string(path).map_err(|e| SettingsError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        serde_json::from_str(&raw).map_err(|e| SettingsError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Defaults, overlaid with the process environment.
    pub fn from_env() -> Result<Self, SettingsError> {
        let mut settings = Self::default();
        settings.apply_env_overrides(|key| std::env::var(key).ok())?;
        settings.validate()?;
        Ok(settings)
    }

    /// Overlays values from `lookup`, which maps a variable name to its value.
    ///
    /// `OLLAMA_URL` wins over `OLLAMA_BASE_URL` when both are set.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(url) = lookup("OLLAMA_URL").or_else(|| lookup("OLLAMA_BASE_URL")) {
            self.ollama.base_url = url;
        }
        if let Some(model) = lookup("OLLAMA_MODEL") {
            self.ollama.model = model;
        }
        if let Some(value) = lookup("OLLAMA_TIMEOUT_SECS") {
            self.ollama.request_timeout_secs = parse_env("OLLAMA_TIMEOUT_SECS", value)?;
        }
        if let Some(value) = lookup("LIGHTNOVEL_CONTEXT_LIMIT") {
            self.length_budget.model_context_limit = parse_env("LIGHTNOVEL_CONTEXT_LIMIT", value)?;
        }
        if let Some(value) = lookup("LIGHTNOVEL_TOKENS_PER_WORD") {
            self.length_budget.tokens_per_word = parse_env("LIGHTNOVEL_TOKENS_PER_WORD", value)?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.ollama.base_url.trim().is_empty() {
            return Err(SettingsError::Invalid("ollama.base_url is empty".into()));
        }
        if self.ollama.request_timeout_secs == 0 || self.ollama.availability_timeout_secs == 0 {
            return Err(SettingsError::Invalid("timeouts must be positive".into()));
        }
        let factor = self.length_budget.tokens_per_word;
        if factor.is_nan() || factor <= 0.0 {
            return Err(SettingsError::Invalid(
                "length_budget.tokens_per_word must be positive".into(),
            ));
        }
        if self.length_budget.floor_tokens == 0 {
            return Err(SettingsError::Invalid(
                "length_budget.floor_tokens must be positive".into(),
            ));
        }
        let generation = &self.generation;
        if generation.min_word_count > generation.max_word_count {
            return Err(SettingsError::Invalid(format!(
                "generation.min_word_count ({}) exceeds max_word_count ({})",
                generation.min_word_count, generation.max_word_count
            )));
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, SettingsError> {
    value
        .parse()
        .map_err(|_| SettingsError::InvalidEnv { key, value })
}
