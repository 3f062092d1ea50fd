//! Chapter generation use case.
//!
//! Loads everything a story has, renders the chapter prompt, runs the
//! generation in the background and returns a draft. Persisting the draft is
//! the caller's job.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use lightnovel_domain::{ArcId, StoryId};
use serde::{Deserialize, Serialize};

use crate::infrastructure::ports::{ClockPort, GenerationRequest, StoryReadPort};
use crate::infrastructure::settings::{GenerationDefaults, StylePreset};
use crate::prompts::{build_chapter_prompt, ChapterPromptInput};

use super::error::UseCaseError;
use super::generation::GenerationService;
use super::worker::GenerationHandle;

/// What the author asked for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapterRequest {
    pub story_id: StoryId,
    pub chapter_number: u32,
    pub plot_directive: String,
    #[serde(default)]
    pub previous_chapter_summary: Option<String>,
    /// Falls back to the story's preferred length, then the configured default.
    #[serde(default)]
    pub target_words: Option<u32>,
    /// Arc whose progression to include; story-level progression when unset.
    #[serde(default)]
    pub arc_id: Option<ArcId>,
    #[serde(default)]
    pub style_preset: Option<String>,
    #[serde(default)]
    pub temperature: Option<f32>,
}

impl ChapterRequest {
    pub fn new(story_id: StoryId, chapter_number: u32, plot_directive: impl Into<String>) -> Self {
        Self {
            story_id,
            chapter_number,
            plot_directive: plot_directive.into(),
            previous_chapter_summary: None,
            target_words: None,
            arc_id: None,
            style_preset: None,
            temperature: None,
        }
    }
}

/// Sampling settings a draft was produced with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub temperature: f32,
    pub top_p: f32,
    pub target_words: u32,
    /// Token budget actually sent; zero until the generation has run.
    pub num_predict: u32,
    #[serde(default)]
    pub style_preset: Option<String>,
}

/// A chapter prompt ready to send.
#[derive(Debug, Clone)]
pub struct PreparedChapter {
    pub story_id: StoryId,
    pub chapter_number: u32,
    pub prompt: String,
    pub request: GenerationRequest,
    pub params: GenerationParams,
}

/// A chapter whose generation is running.
pub struct PendingChapter {
    prepared: PreparedChapter,
    handle: GenerationHandle,
}

impl PendingChapter {
    pub fn cancel(&self) {
        self.handle.cancel();
    }
}

/// Generated chapter, not yet saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapterDraft {
    pub story_id: StoryId,
    pub chapter_number: u32,
    pub content: String,
    pub word_count: usize,
    pub prompt_used: String,
    pub generation_params: GenerationParams,
    pub generated_at: DateTime<Utc>,
}

pub struct ChapterGenerator {
    stories: Arc<dyn StoryReadPort>,
    generation: Arc<GenerationService>,
    defaults: GenerationDefaults,
    style_presets: BTreeMap<String, StylePreset>,
    clock: Arc<dyn ClockPort>,
}

impl ChapterGenerator {
    pub fn new(
        stories: Arc<dyn StoryReadPort>,
        generation: Arc<GenerationService>,
        defaults: GenerationDefaults,
        style_presets: BTreeMap<String, StylePreset>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            stories,
            generation,
            defaults,
            style_presets,
            clock,
        }
    }

    /// Load the story and render its chapter prompt.
    pub async fn prepare(&self, request: &ChapterRequest) -> Result<PreparedChapter, UseCaseError> {
        if request.plot_directive.trim().is_empty() {
            return Err(UseCaseError::InvalidRequest(
                "plot directive is empty".to_string(),
            ));
        }

        let preset = match request.style_preset.as_deref() {
            Some(key) => Some(
                self.style_presets
                    .get(key)
                    .ok_or_else(|| UseCaseError::UnknownStylePreset(key.to_string()))?,
            ),
            None => None,
        };

        let story_id = request.story_id;
        let story = self
            .stories
            .get_story(story_id)
            .await?
            .ok_or(UseCaseError::StoryNotFound(story_id))?;
        let characters = self.stories.list_characters(story_id).await?;
        let locations = self.stories.list_locations(story_id).await?;
        let power_systems = self.stories.list_power_systems(story_id).await?;
        let lore = self.stories.list_lore(story_id).await?;
        let progression = self
            .stories
            .get_progression(story_id, request.arc_id)
            .await?;

        let requested_words = request
            .target_words
            .or(story.target_chapter_words)
            .unwrap_or(self.defaults.default_word_count);
        let target_words = self.defaults.clamp_words(requested_words);
        if target_words != requested_words {
            tracing::debug!(
                requested_words,
                target_words,
                "Target word count clamped to configured bounds"
            );
        }

        let prompt = build_chapter_prompt(&ChapterPromptInput {
            story: &story,
            characters: &characters,
            locations: &locations,
            power_systems: &power_systems,
            lore: &lore,
            progression: progression.as_ref(),
            chapter_number: request.chapter_number,
            plot_directive: request.plot_directive.trim(),
            previous_chapter_summary: request.previous_chapter_summary.as_deref(),
            target_words: Some(target_words),
            style_notes: preset.map(|p| p.style_notes.as_str()),
        });

        let temperature = request
            .temperature
            .or(preset.map(|p| p.temperature));
        let generation_request =
            self.generation
                .chapter_request(prompt.clone(), temperature, Some(target_words));

        tracing::info!(
            story_id = %story_id,
            chapter = request.chapter_number,
            characters = characters.len(),
            target_words,
            prompt_chars = prompt.chars().count(),
            "Prepared chapter prompt"
        );

        Ok(PreparedChapter {
            story_id,
            chapter_number: request.chapter_number,
            params: GenerationParams {
                temperature: generation_request.temperature,
                top_p: generation_request.top_p,
                target_words,
                num_predict: 0,
                style_preset: request.style_preset.clone(),
            },
            request: generation_request,
            prompt,
        })
    }

    /// Start generating in the background.
    pub fn start(&self, prepared: PreparedChapter) -> PendingChapter {
        let handle = self.generation.spawn(prepared.request.clone());
        PendingChapter { prepared, handle }
    }

    /// Wait for a running generation and turn it into a draft.
    pub async fn finish(&self, pending: PendingChapter) -> Result<ChapterDraft, UseCaseError> {
        let PendingChapter { prepared, handle } = pending;
        let generated = handle.wait().await?;

        let content = generated.text.trim().to_string();
        let word_count = content.split_whitespace().count();
        if content.is_empty() {
            tracing::warn!(
                story_id = %prepared.story_id,
                chapter = prepared.chapter_number,
                "Model returned an empty chapter"
            );
        }

        let mut generation_params = prepared.params;
        generation_params.num_predict = generated.num_predict;

        Ok(ChapterDraft {
            story_id: prepared.story_id,
            chapter_number: prepared.chapter_number,
            content,
            word_count,
            prompt_used: prepared.prompt,
            generation_params,
            generated_at: self.clock.now(),
        })
    }

    /// Prepare, run and collect in one call.
    pub async fn generate(&self, request: &ChapterRequest) -> Result<ChapterDraft, UseCaseError> {
        let prepared = self.prepare(request).await?;
        let pending = self.start(prepared);
        self.finish(pending).await
    }
}
