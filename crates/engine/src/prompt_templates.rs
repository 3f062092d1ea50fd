//! System instructions sent ahead of every generation.
//!
//! Each template has a built-in default that an environment variable can
//! replace, e.g. `LIGHTNOVEL_PROMPT_CHAPTER_SYSTEM_PROMPT`.

/// All prompt template keys as constants.
pub mod keys {
    pub const CHAPTER_SYSTEM_PROMPT: &str = "chapter.system_prompt";
    pub const WORLD_SYSTEM_PROMPT: &str = "world.system_prompt";
    pub const CHARACTER_SYSTEM_PROMPT: &str = "character.system_prompt";
}

/// Default template values.
pub mod defaults {
    pub const CHAPTER_SYSTEM_PROMPT: &str = "You are a talented light novel author specializing in the style of ReZero and Fate series.
Your writing features:
- Deep internal monologues and character psychology
- Detailed sensory descriptions
- Natural, character-driven dialogue
- Strategic pacing with tension and release
- Vivid action sequences when needed
- Emotional depth and complexity
- Proper light novel formatting with scene breaks

Write engaging, immersive prose that captures the essence of Japanese light novels.";

    pub const WORLD_SYSTEM_PROMPT: &str = "You are a world-building expert for light novel settings.
Generate detailed, internally consistent world elements that feel authentic and immersive.
Focus on practicality, cultural depth, and how elements interconnect.
Avoid generic fantasy tropes unless specifically requested.
Format your response clearly with headers and organized sections.";

    pub const CHARACTER_SYSTEM_PROMPT: &str = "You are a character development specialist for light novels.
Create deep, multi-dimensional characters with realistic motivations, flaws, and growth potential.
Consider their role in the story, relationships, and how they'll evolve.
Write in a detailed but organized format.";
}

/// Convert a template key to its environment variable name.
pub fn key_to_env_var(key: &str) -> String {
    format!("LIGHTNOVEL_PROMPT_{}", key.to_uppercase().replace('.', "_"))
}

/// Get the default value for a template key.
pub fn get_default(key: &str) -> Option<&'static str> {
    match key {
        keys::CHAPTER_SYSTEM_PROMPT => Some(defaults::CHAPTER_SYSTEM_PROMPT),
        keys::WORLD_SYSTEM_PROMPT => Some(defaults::WORLD_SYSTEM_PROMPT),
        keys::CHARACTER_SYSTEM_PROMPT => Some(defaults::CHARACTER_SYSTEM_PROMPT),
        _ => None,
    }
}

/// The three system instructions, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemPrompts {
    pub chapter: String,
    pub world: String,
    pub character: String,
}

impl Default for SystemPrompts {
    fn default() -> Self {
        Self {
            chapter: defaults::CHAPTER_SYSTEM_PROMPT.to_string(),
            world: defaults::WORLD_SYSTEM_PROMPT.to_string(),
            character: defaults::CHARACTER_SYSTEM_PROMPT.to_string(),
        }
    }
}

impl SystemPrompts {
    /// Resolves each template: a non-empty override from `lookup` wins over the default.
    pub fn resolve<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |key: &str| {
            lookup(&key_to_env_var(key))
                .filter(|v| !v.trim().is_empty())
                .or_else(|| get_default(key).map(str::to_string))
                .unwrap_or_default()
        };
        Self {
            chapter: pick(keys::CHAPTER_SYSTEM_PROMPT),
            world: pick(keys::WORLD_SYSTEM_PROMPT),
            character: pick(keys::CHARACTER_SYSTEM_PROMPT),
        }
    }

    pub fn from_env() -> Self {
        Self::resolve(|name| std::env::var(name).ok())
    }
}
