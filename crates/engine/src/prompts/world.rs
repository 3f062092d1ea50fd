//! World-building prompt.

use lightnovel_domain::{non_blank, Story, WorldLocation};

use super::clip;

const MAX_EXISTING_LOCATIONS: usize = 8;
const EXISTING_DESCRIPTION_MAX_CHARS: usize = 150;

/// Prompt asking for new world details that fit the existing setting.
pub fn build_world_prompt(
    story: &Story,
    existing_locations: &[WorldLocation],
    focus: &str,
    request: &str,
) -> String {
    let mut prompt = String::from("=== WORLD BUILDING TASK ===\n\n");
    prompt.push_str(&format!("Story: {}\n", story.title));
    prompt.push_str(&format!(
        "Genre: {}\n",
        non_blank(story.genre.as_deref()).unwrap_or("Light Novel")
    ));
    if let Some(themes) = non_blank(story.themes.as_deref()) {
        prompt.push_str(&format!("Themes: {}\n", themes));
    }

    if !existing_locations.is_empty() {
        prompt.push_str("\n=== EXISTING WORLD ELEMENTS ===\n\n");
        for location in existing_locations.iter().take(MAX_EXISTING_LOCATIONS) {
            prompt.push_str(&format!("• {} ({})", location.name, location.location_type));
            if let Some(description) = non_blank(location.description.as_deref()) {
                prompt.push_str(&format!(
                    ": {}",
                    clip(description, EXISTING_DESCRIPTION_MAX_CHARS)
                ));
            }
            prompt.push('\n');
        }
    }

    prompt.push_str(&format!("\nGENERATION FOCUS: {}\n\n", focus));
    prompt.push_str("SPECIFIC REQUEST:\n");
    prompt.push_str(request.trim());
    prompt.push_str(
        "

INSTRUCTIONS:
Generate detailed world-building information that:
1. Fits seamlessly with the existing world elements
2. Feels authentic and internally consistent
3. Has depth and interesting details
4. Considers practical implications (economy, society, culture)
5. Avoids generic fantasy clichés
6. Provides hooks for story potential
7. Is organized clearly with headers

Format your response with clear sections for each element you create.
Include practical details that make the world feel real and lived-in.

Generate the requested world details now:
",
    );
    prompt
}
