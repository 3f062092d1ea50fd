//! Chapter generation prompt.

use lightnovel_domain::{
    non_blank, Character, CharacterTier, LoreEntry, PowerSystem, Progression, Story, WorldLocation,
};

use super::progression::progression_entries;
use super::{clip, labeled_line};

/// Chapter length asked for when the caller gives none.
pub const DEFAULT_TARGET_WORDS: u32 = 3000;

const MAX_PROTAGONISTS: usize = 2;
const MAX_MAJOR_CHARACTERS: usize = 4;
const MAX_SUPPORTING_CHARACTERS: usize = 6;
const MAX_LOCATIONS: usize = 5;
const MAX_POWER_SYSTEMS: usize = 3;
const MAX_LORE_ENTRIES: usize = 3;

const PROTAGONIST_FIELD_MAX_CHARS: usize = 400;
const MAJOR_FIELD_MAX_CHARS: usize = 120;
const LOCATION_DESCRIPTION_MAX_CHARS: usize = 200;
const POWER_SYSTEM_FIELD_MAX_CHARS: usize = 200;
const LORE_CONTENT_MAX_CHARS: usize = 200;
const PREVIOUS_SUMMARY_MAX_CHARS: usize = 1500;

/// Everything the chapter prompt is rendered from.
#[derive(Debug, Clone, Copy)]
pub struct ChapterPromptInput<'a> {
    pub story: &'a Story,
    pub characters: &'a [Character],
    pub locations: &'a [WorldLocation],
    pub power_systems: &'a [PowerSystem],
    pub lore: &'a [LoreEntry],
    pub progression: Option<&'a Progression>,
    pub chapter_number: u32,
    pub plot_directive: &'a str,
    pub previous_chapter_summary: Option<&'a str>,
    pub target_words: Option<u32>,
    /// Extra style guidance, e.g. from a style preset.
    pub style_notes: Option<&'a str>,
}

impl<'a> ChapterPromptInput<'a> {
    pub fn new(story: &'a Story, chapter_number: u32, plot_directive: &'a str) -> Self {
        Self {
            story,
            characters: &[],
            locations: &[],
            power_systems: &[],
            lore: &[],
            progression: None,
            chapter_number,
            plot_directive,
            previous_chapter_summary: None,
            target_words: None,
            style_notes: None,
        }
    }
}

/// Render the full chapter prompt.
///
/// Sections always appear in the same order: characters, world setting,
/// power systems, lore, progression, previous summary, style, task. List
/// section headers are present even when their list is empty.
pub fn build_chapter_prompt(input: &ChapterPromptInput<'_>) -> String {
    let mut prompt = String::new();

    render_characters(&mut prompt, input.characters);
    render_locations(&mut prompt, input.locations);
    render_power_systems(&mut prompt, input.power_systems);
    render_lore(&mut prompt, input.lore);
    render_progression(&mut prompt, input.progression);

    if let Some(summary) = non_blank(input.previous_chapter_summary) {
        prompt.push_str("\n=== PREVIOUS CHAPTER SUMMARY ===\n\n");
        prompt.push_str(clip(summary, PREVIOUS_SUMMARY_MAX_CHARS));
        prompt.push('\n');
    }

    render_style(&mut prompt, input.story, input.style_notes);
    render_task(&mut prompt, input);

    prompt
}

fn render_characters(out: &mut String, characters: &[Character]) {
    out.push_str("=== CHARACTERS ===\n\n");

    let mut protagonists = Vec::new();
    let mut major = Vec::new();
    let mut supporting = Vec::new();
    for character in characters {
        match character.tier() {
            CharacterTier::Protagonist => protagonists.push(character),
            CharacterTier::Major => major.push(character),
            CharacterTier::Supporting => supporting.push(character),
            CharacterTier::Minor => {}
        }
    }
    // Stable, so equal importance keeps input order
    major.sort_by(|a, b| b.importance.cmp(&a.importance));

    if !protagonists.is_empty() {
        out.push_str("PROTAGONIST(S):\n");
        for character in protagonists.iter().take(MAX_PROTAGONISTS) {
            render_protagonist(out, character);
        }
    }

    if !major.is_empty() {
        out.push_str("\nMAJOR CHARACTERS:\n");
        for character in major.iter().take(MAX_MAJOR_CHARACTERS) {
            out.push_str(&format!("• {} - {}", character.name, character.role));
            let details: Vec<&str> = [&character.personality, &character.abilities]
                .into_iter()
                .filter_map(|field| non_blank(field.as_deref()))
                .map(|field| clip(field, MAJOR_FIELD_MAX_CHARS))
                .collect();
            if !details.is_empty() {
                out.push_str(&format!(": {}", details.join(" | ")));
            }
            out.push('\n');
        }
    }

    if !supporting.is_empty() {
        let names: Vec<String> = supporting
            .iter()
            .take(MAX_SUPPORTING_CHARACTERS)
            .map(|c| format!("{} ({})", c.name, c.role))
            .collect();
        out.push_str("\nSUPPORTING CHARACTERS:\n");
        out.push_str(&names.join(", "));
        out.push('\n');
    }
}

fn render_protagonist(out: &mut String, character: &Character) {
    let mut identity = Vec::new();
    if let Some(age) = character.age {
        identity.push(age.to_string());
    }
    if let Some(gender) = non_blank(character.gender.as_deref()) {
        identity.push(gender.to_string());
    }

    if identity.is_empty() {
        out.push_str(&format!("\n• {}\n", character.name));
    } else {
        out.push_str(&format!("\n• {} ({})\n", character.name, identity.join(", ")));
    }

    let fields = [
        ("Appearance", &character.appearance),
        ("Personality", &character.personality),
        ("Abilities", &character.abilities),
        ("Background", &character.background),
        ("Motivations", &character.motivations),
        ("Speech Style", &character.voice_style),
        ("Character Arc", &character.character_arc),
    ];
    for (label, value) in fields {
        labeled_line(out, "  ", label, value.as_deref(), PROTAGONIST_FIELD_MAX_CHARS);
    }
}

fn render_locations(out: &mut String, locations: &[WorldLocation]) {
    out.push_str("\n=== WORLD SETTING ===\n\n");
    for location in locations.iter().take(MAX_LOCATIONS) {
        out.push_str(&format!("• {} ({})\n", location.name, location.location_type));
        if let Some(description) = non_blank(location.description.as_deref()) {
            out.push_str(&format!(
                "  {}\n",
                clip(description, LOCATION_DESCRIPTION_MAX_CHARS)
            ));
        }
    }
}

fn render_power_systems(out: &mut String, systems: &[PowerSystem]) {
    out.push_str("\n=== POWER SYSTEMS ===\n\n");
    for system in systems.iter().take(MAX_POWER_SYSTEMS) {
        out.push_str(&format!("• {}\n", system.name));
        if let Some(description) = non_blank(system.description.as_deref()) {
            out.push_str(&format!(
                "  {}\n",
                clip(description, POWER_SYSTEM_FIELD_MAX_CHARS)
            ));
        }
        labeled_line(out, "  ", "Rules", system.rules.as_deref(), POWER_SYSTEM_FIELD_MAX_CHARS);
        labeled_line(
            out,
            "  ",
            "Limitations",
            system.limitations.as_deref(),
            POWER_SYSTEM_FIELD_MAX_CHARS,
        );
    }
}

fn render_lore(out: &mut String, lore: &[LoreEntry]) {
    out.push_str("\n=== RELEVANT LORE ===\n\n");
    let mut entries: Vec<&LoreEntry> = lore.iter().collect();
    entries.sort_by(|a, b| b.importance.cmp(&a.importance));
    for entry in entries.into_iter().take(MAX_LORE_ENTRIES) {
        out.push_str(&format!("• {} ({})\n", entry.title, entry.category));
        if let Some(content) = non_blank(entry.content.as_deref()) {
            out.push_str(&format!("  {}\n", clip(content, LORE_CONTENT_MAX_CHARS)));
        }
    }
}

fn render_progression(out: &mut String, progression: Option<&Progression>) {
    out.push_str("\n=== STORY PROGRESSION ===\n\n");
    let entries = progression_entries(progression);
    if entries.is_empty() {
        return;
    }
    out.push_str("Current Arc Progression:\n");
    for (key, value) in entries {
        out.push_str(&format!("- {}: {}\n", key, value));
    }
}

fn render_style(out: &mut String, story: &Story, style_notes: Option<&str>) {
    out.push_str("\n=== WRITING STYLE GUIDELINES ===\n\n");
    out.push_str(&format!(
        "Genre: {}\n",
        non_blank(story.genre.as_deref()).unwrap_or("Light Novel")
    ));
    out.push_str(&format!(
        "Tone: {}\n",
        non_blank(story.tone.as_deref()).unwrap_or("Varied based on scene")
    ));
    out.push_str(&format!(
        "Style: {}\n",
        non_blank(story.writing_style.as_deref()).unwrap_or("ReZero/Fate-inspired")
    ));
    if let Some(themes) = non_blank(story.themes.as_deref()) {
        out.push_str(&format!("Themes: {}\n", themes));
    }
    if let Some(notes) = non_blank(style_notes) {
        out.push_str(&format!("Style Notes: {}\n", notes));
    }

    out.push_str(
        "
Style Requirements:
- Use first-person or close third-person perspective for deep character interiority
- Include internal monologue and character thoughts
- Balance description, action, and dialogue naturally
- Use sensory details to immerse the reader
- Employ strategic pacing - slow for emotional moments, fast for action
- Include scene transitions with \"◇◇◇\" or similar markers
- Write dialogue that reflects each character's unique voice
- Show character emotions through actions and reactions, not just statements
- Build tension progressively within the chapter
- End with a hook or emotional beat that compels reading the next chapter
",
    );
}

fn render_task(out: &mut String, input: &ChapterPromptInput<'_>) {
    let chapter = input.chapter_number;
    let target_words = input.target_words.unwrap_or(DEFAULT_TARGET_WORDS);

    out.push_str(&format!("\n=== CHAPTER {} GENERATION TASK ===\n\n", chapter));
    out.push_str(&format!("Title: {}\n", input.story.title));
    out.push_str(&format!("Chapter: {}\n\n", chapter));
    out.push_str("PLOT DIRECTIVE FOR THIS CHAPTER:\n");
    out.push_str(input.plot_directive);
    out.push_str("\n\nINSTRUCTIONS:\n");
    out.push_str(&format!("Write a complete Chapter {} that:\n", chapter));
    out.push_str(
        "1. Follows the plot directive naturally
2. Stays true to all established characters, world rules, and lore
3. Maintains consistency with previous events
4. Develops characters and relationships meaningfully
5. Advances the overall story arc
6. Creates an engaging, immersive reading experience
",
    );
    out.push_str(&format!(
        "7. Target length: approximately {} words\n",
        target_words
    ));
    out.push_str(
        "8. Includes proper scene breaks and pacing
9. Ends with a compelling hook or resolution
",
    );
    out.push_str(&format!("\nBegin writing Chapter {} now:\n", chapter));
}
