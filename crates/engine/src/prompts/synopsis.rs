//! Synopsis analysis prompt.

use super::clip;

const SYNOPSIS_MAX_CHARS: usize = 4000;

/// Prompt asking the model to break a synopsis into the entities a story needs.
pub fn build_synopsis_structure_prompt(synopsis: &str, genre: &str) -> String {
    let mut prompt = String::from("=== STORY STRUCTURE ANALYSIS ===\n\n");
    prompt.push_str(&format!("Genre: {}\n\n", genre));
    prompt.push_str("Synopsis:\n");
    prompt.push_str(clip(synopsis.trim(), SYNOPSIS_MAX_CHARS));
    prompt.push_str(
        "

TASK:
Analyze this synopsis and suggest:

1. KEY CHARACTERS needed:
   - Protagonist(s) with brief descriptions
   - Major supporting characters
   - Potential antagonists

2. WORLD LOCATIONS required:
   - Primary setting(s)
   - Important secondary locations
   - Brief description of each

3. POWER SYSTEMS (if applicable):
   - Magic/ability systems needed
   - Rules and limitations
   - How they serve the story

4. KEY LORE ELEMENTS:
   - Historical events that matter
   - Cultural/social structures
   - Important background information

5. STORY ARCS suggested:
   - Major plot arcs (3-5)
   - Character development arcs
   - Potential chapter breakdown

Format your response clearly with headers for each section.
Focus on what's essential for this story to work well.

Provide your analysis:
",
    );
    prompt
}
