//! World-building use cases: synopsis analysis, location, power system,
//! lore and character expansion.

use std::sync::Arc;

use lightnovel_domain::{non_blank, CharacterId, Story, StoryId};
use serde::{Deserialize, Serialize};

use crate::infrastructure::ports::StoryReadPort;
use crate::prompts::{
    build_character_expansion_prompt, build_synopsis_structure_prompt, build_world_prompt, clip,
};

use super::error::UseCaseError;
use super::generation::GenerationService;
use super::section_parser::{
    CharacterExpansion, LocationDetails, PowerSystemDetails, StructureSuggestions,
};

/// Aspects covered when a location expansion names none.
pub const DEFAULT_LOCATION_ASPECTS: [&str; 5] =
    ["geography", "culture", "history", "politics", "economy"];

const EXISTING_SUMMARY_MAX_CHARS: usize = 100;
const MAX_EXISTING_LORE: usize = 5;

/// A model reply plus what could be parsed out of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldDetail<T> {
    pub prompt: String,
    pub raw: String,
    pub parsed: T,
}

/// Identifies generated lore; the body stays in `raw`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoreDraft {
    pub topic: String,
    pub category: String,
}

pub struct WorldBuilder {
    stories: Arc<dyn StoryReadPort>,
    generation: Arc<GenerationService>,
}

impl WorldBuilder {
    pub fn new(stories: Arc<dyn StoryReadPort>, generation: Arc<GenerationService>) -> Self {
        Self {
            stories,
            generation,
        }
    }

    async fn story(&self, story_id: StoryId) -> Result<Story, UseCaseError> {
        self.stories
            .get_story(story_id)
            .await?
            .ok_or(UseCaseError::StoryNotFound(story_id))
    }

    /// Suggest characters, locations, power systems, lore and arcs from the
    /// story's synopsis.
    pub async fn analyze_synopsis(
        &self,
        story_id: StoryId,
    ) -> Result<WorldDetail<StructureSuggestions>, UseCaseError> {
        let story = self.story(story_id).await?;
        let synopsis = non_blank(story.synopsis.as_deref()).ok_or_else(|| {
            UseCaseError::InvalidRequest(format!("story {} has no synopsis", story_id))
        })?;
        let genre = non_blank(story.genre.as_deref()).unwrap_or("Light Novel");

        let prompt = build_synopsis_structure_prompt(synopsis, genre);
        tracing::info!(story_id = %story_id, "Analyzing synopsis");
        let generated = self
            .generation
            .generate_for_world_detail(prompt.clone(), Some(0.7), Some(3000))
            .await?;

        Ok(WorldDetail {
            parsed: StructureSuggestions::parse(&generated.text),
            raw: generated.text,
            prompt,
        })
    }

    pub async fn expand_location(
        &self,
        story_id: StoryId,
        name: &str,
        location_type: &str,
        description: &str,
        aspects: &[&str],
    ) -> Result<WorldDetail<LocationDetails>, UseCaseError> {
        let story = self.story(story_id).await?;
        let existing = self.stories.list_locations(story_id).await?;
        let aspects = if aspects.is_empty() {
            &DEFAULT_LOCATION_ASPECTS[..]
        } else {
            aspects
        };

        let request = format!(
            "Create comprehensive details for: {} ({})
Basic Description: {}

Focus on these aspects: {}

Provide rich, specific details that make this location feel real and unique.
Consider how it fits into the broader world and story.",
            name,
            location_type,
            description,
            aspects.join(", ")
        );
        let prompt = build_world_prompt(&story, &existing, "Location Details", &request);

        tracing::info!(story_id = %story_id, location = name, "Expanding location");
        let generated = self
            .generation
            .generate_for_world_detail(prompt.clone(), Some(0.7), Some(2500))
            .await?;

        Ok(WorldDetail {
            parsed: LocationDetails::parse(&generated.text),
            raw: generated.text,
            prompt,
        })
    }

    pub async fn generate_power_system(
        &self,
        story_id: StoryId,
        concept: &str,
    ) -> Result<WorldDetail<PowerSystemDetails>, UseCaseError> {
        let story = self.story(story_id).await?;
        let existing_world = self.stories.list_locations(story_id).await?;
        let existing_systems = self.stories.list_power_systems(story_id).await?;

        let mut existing_text = String::new();
        if !existing_systems.is_empty() {
            existing_text.push_str("Existing Power Systems:\n");
            for system in &existing_systems {
                let description = system.description.as_deref().unwrap_or_default();
                existing_text.push_str(&format!(
                    "• {}: {}\n",
                    system.name,
                    clip(description, EXISTING_SUMMARY_MAX_CHARS)
                ));
            }
        }

        let request = format!(
            "Create a detailed power/magic system based on: {}

{}
Include:
1. System Name and Core Concept
2. How it works (mechanics)
3. Rules and limitations (very important!)
4. How people acquire/learn this power
5. Power levels or progression
6. Examples of abilities/techniques
7. Weaknesses and costs
8. How it affects society/culture

Make it unique, balanced, and story-appropriate.
Ensure it has clear limitations to prevent it from solving all problems easily.",
            concept, existing_text
        );
        let prompt = build_world_prompt(&story, &existing_world, "Power System", &request);

        tracing::info!(story_id = %story_id, concept, "Generating power system");
        let generated = self
            .generation
            .generate_for_world_detail(prompt.clone(), Some(0.75), Some(2500))
            .await?;

        Ok(WorldDetail {
            parsed: PowerSystemDetails::parse(&generated.text),
            raw: generated.text,
            prompt,
        })
    }

    pub async fn generate_lore(
        &self,
        story_id: StoryId,
        topic: &str,
        category: &str,
    ) -> Result<WorldDetail<LoreDraft>, UseCaseError> {
        let story = self.story(story_id).await?;
        let existing_world = self.stories.list_locations(story_id).await?;
        let existing_lore = self.stories.list_lore(story_id).await?;
        let category = non_blank(Some(category)).unwrap_or("History");

        let mut existing_text = String::new();
        if !existing_lore.is_empty() {
            existing_text.push_str("Existing Lore:\n");
            for entry in existing_lore.iter().take(MAX_EXISTING_LORE) {
                let content = entry.content.as_deref().unwrap_or_default();
                existing_text.push_str(&format!(
                    "• {}: {}\n",
                    entry.title,
                    clip(content, EXISTING_SUMMARY_MAX_CHARS)
                ));
            }
        }

        let request = format!(
            "Create detailed lore about: {}
Category: {}

{}
Provide:
1. The core information/event
2. Historical context and timeline
3. Key figures involved
4. Impact on the world/society
5. Modern-day relevance
6. Connections to other lore elements
7. Story hooks this creates

Make it compelling and useful for storytelling.",
            topic, category, existing_text
        );
        let prompt = build_world_prompt(&story, &existing_world, "Lore", &request);

        tracing::info!(story_id = %story_id, topic, category, "Generating lore");
        let generated = self
            .generation
            .generate_for_world_detail(prompt.clone(), Some(0.7), Some(2000))
            .await?;

        Ok(WorldDetail {
            parsed: LoreDraft {
                topic: topic.to_string(),
                category: category.to_string(),
            },
            raw: generated.text,
            prompt,
        })
    }

    /// Deepen an existing character. An empty `focus` asks for a complete profile.
    pub async fn expand_character(
        &self,
        character_id: CharacterId,
        focus: &str,
    ) -> Result<WorldDetail<CharacterExpansion>, UseCaseError> {
        let character = self
            .stories
            .get_character(character_id)
            .await?
            .ok_or(UseCaseError::CharacterNotFound(character_id))?;
        let story = self.story(character.story_id).await?;
        let focus = non_blank(Some(focus)).unwrap_or("complete profile");

        let prompt = build_character_expansion_prompt(&character, &story, focus);
        tracing::info!(character_id = %character_id, name = %character.name, "Expanding character");
        let generated = self
            .generation
            .generate_for_character_detail(prompt.clone(), None)
            .await?;

        Ok(WorldDetail {
            parsed: CharacterExpansion::parse(&generated.text),
            raw: generated.text,
            prompt,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{Generated, LlmError, MockLlmPort, MockStoryReadPort};
    use crate::prompt_templates::{defaults, SystemPrompts};
    use lightnovel_domain::{
        Character, CharacterRole, Importance, LoreEntry, LoreId, PowerSystem, PowerSystemId,
    };
    use mockall::predicate::*;

    fn story() -> Story {
        Story::new(StoryId::new(1), "Ashes of the Loop")
            .with_genre("Dark Fantasy")
            .with_synopsis("A courier relives the day the capital burned.")
    }

    fn reply(text: &'static str) -> impl FnMut(crate::infrastructure::ports::GenerationRequest) -> Result<Generated, LlmError> {
        move |_| {
            Ok(Generated {
                text: text.to_string(),
                num_predict: 2000,
            })
        }
    }

    fn builder(stories: MockStoryReadPort, llm: MockLlmPort) -> WorldBuilder {
        let generation = GenerationService::new(Arc::new(llm), SystemPrompts::default());
        WorldBuilder::new(Arc::new(stories), Arc::new(generation))
    }

    fn stories() -> MockStoryReadPort {
        let mut stories = MockStoryReadPort::new();
        stories
            .expect_get_story()
            .with(eq(StoryId::new(1)))
            .returning(|_| Ok(Some(story())));
        stories.expect_list_locations().returning(|_| Ok(vec![]));
        stories
    }

    #[tokio::test]
    async fn synopsis_analysis_uses_world_wrapper() {
        let mut llm = MockLlmPort::new();
        llm.expect_generate()
            .withf(|request| {
                request.max_tokens == Some(3000)
                    && request.temperature == 0.7
                    && request.system_prompt.as_deref() == Some(defaults::WORLD_SYSTEM_PROMPT)
                    && request.prompt.contains("A courier relives the day the capital burned.")
                    && request.prompt.contains("Genre: Dark Fantasy")
            })
            .times(1)
            .returning(reply("1. KEY CHARACTERS: Ren, the courier\n\nARCS: The burning day"));

        let detail = builder(stories(), llm)
            .analyze_synopsis(StoryId::new(1))
            .await
            .expect("analysis succeeds");
        assert_eq!(detail.parsed.characters.as_deref(), Some("Ren, the courier"));
        assert_eq!(detail.parsed.arcs.as_deref(), Some("The burning day"));
    }

    #[tokio::test]
    async fn synopsis_analysis_requires_a_synopsis() {
        let mut stories = MockStoryReadPort::new();
        stories
            .expect_get_story()
            .returning(|id| Ok(Some(Story::new(id, "Untitled"))));
        let err = builder(stories, MockLlmPort::new())
            .analyze_synopsis(StoryId::new(1))
            .await
            .expect_err("no synopsis");
        assert!(matches!(err, UseCaseError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn location_expansion_defaults_aspects() {
        let mut llm = MockLlmPort::new();
        llm.expect_generate()
            .withf(|request| {
                request.max_tokens == Some(2500)
                    && request.prompt.contains("GENERATION FOCUS: Location Details")
                    && request
                        .prompt
                        .contains("Focus on these aspects: geography, culture, history, politics, economy")
                    && request.prompt.contains("Create comprehensive details for: Veyra (City)")
            })
            .times(1)
            .returning(reply("GEOGRAPHY: River delta\n\nECONOMY: Bell trade"));

        let detail = builder(stories(), llm)
            .expand_location(StoryId::new(1), "Veyra", "City", "A walled city", &[])
            .await
            .expect("expansion succeeds");
        assert_eq!(detail.parsed.geography.as_deref(), Some("River delta"));
        assert_eq!(detail.parsed.economy.as_deref(), Some("Bell trade"));
    }

    #[tokio::test]
    async fn power_system_lists_existing_systems() {
        let mut stories = stories();
        stories.expect_list_power_systems().returning(|story_id| {
            let mut system = PowerSystem::new(PowerSystemId::new(1), story_id, "Runecraft");
            system.description = Some("r".repeat(150));
            Ok(vec![system])
        });
        let mut llm = MockLlmPort::new();
        llm.expect_generate()
            .withf(|request| {
                request.temperature == 0.75
                    && request.prompt.contains(&format!("• Runecraft: {}\n", "r".repeat(100)))
                    && !request.prompt.contains(&"r".repeat(101))
            })
            .times(1)
            .returning(reply("System Name: Bellcraft\n\nRULES: Resonance only"));

        let detail = builder(stories, llm)
            .generate_power_system(StoryId::new(1), "sound magic")
            .await
            .expect("generation succeeds");
        assert_eq!(detail.parsed.name.as_deref(), Some("Bellcraft"));
        assert_eq!(detail.parsed.rules.as_deref(), Some("Resonance only"));
    }

    #[tokio::test]
    async fn lore_includes_first_five_existing_entries() {
        let mut stories = stories();
        stories.expect_list_lore().returning(|story_id| {
            Ok((1..=7)
                .map(|i| {
                    LoreEntry::new(LoreId::new(i), story_id, "History", format!("Tale{i}"))
                        .with_content("content")
                })
                .collect())
        });
        let mut llm = MockLlmPort::new();
        llm.expect_generate()
            .withf(|request| {
                request.max_tokens == Some(2000)
                    && request.prompt.contains("• Tale5: content\n")
                    && !request.prompt.contains("Tale6")
                    && request.prompt.contains("Category: Religion")
            })
            .times(1)
            .returning(reply("The Sundering split the sky."));

        let detail = builder(stories, llm)
            .generate_lore(StoryId::new(1), "The Sundering", "Religion")
            .await
            .expect("generation succeeds");
        assert_eq!(detail.raw, "The Sundering split the sky.");
        assert_eq!(detail.parsed.category, "Religion");
    }

    #[tokio::test]
    async fn character_expansion_loads_character_and_story() {
        let mut stories = stories();
        stories
            .expect_get_character()
            .with(eq(CharacterId::new(2)))
            .returning(|id| {
                Ok(Some(Character::new(
                    id,
                    StoryId::new(1),
                    "Lysa",
                    CharacterRole::Deuteragonist,
                    Importance::new(4).expect("valid importance"),
                )))
            });
        let mut llm = MockLlmPort::new();
        llm.expect_generate()
            .withf(|request| {
                request.system_prompt.as_deref() == Some(defaults::CHARACTER_SYSTEM_PROMPT)
                    && request.temperature == 0.75
                    && request.prompt.contains("EXPANSION FOCUS: complete profile")
            })
            .times(1)
            .returning(reply("PERSONALITY: Guarded\n\nVOICE: Clipped sentences"));

        let detail = builder(stories, llm)
            .expand_character(CharacterId::new(2), "")
            .await
            .expect("expansion succeeds");
        assert_eq!(detail.parsed.personality.as_deref(), Some("Guarded"));
        assert_eq!(detail.parsed.voice.as_deref(), Some("Clipped sentences"));
    }

    #[tokio::test]
    async fn missing_character_is_reported() {
        let mut stories = MockStoryReadPort::new();
        stories.expect_get_character().returning(|_| Ok(None));
        let err = builder(stories, MockLlmPort::new())
            .expand_character(CharacterId::new(9), "voice")
            .await
            .expect_err("character is missing");
        assert!(matches!(err, UseCaseError::CharacterNotFound(_)));
    }

    #[tokio::test]
    async fn llm_failure_is_typed() {
        let mut llm = MockLlmPort::new();
        llm.expect_generate().returning(|_| Err(LlmError::Timeout));
        let mut stories = stories();
        stories.expect_list_lore().returning(|_| Ok(vec![]));
        let err = builder(stories, llm)
            .generate_lore(StoryId::new(1), "The Sundering", "History")
            .await
            .expect_err("timed out");
        assert_eq!(err.llm_error(), Some(&LlmError::Timeout));
    }
}
