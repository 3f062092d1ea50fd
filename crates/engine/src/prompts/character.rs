//! Character expansion prompt.

use lightnovel_domain::{Character, Story};

use super::labeled_line;

const EXISTING_FIELD_MAX_CHARS: usize = 400;

/// Prompt asking for a deeper version of an existing character.
pub fn build_character_expansion_prompt(subject: &Character, story: &Story, focus: &str) -> String {
    let mut prompt = String::from("=== CHARACTER DEVELOPMENT TASK ===\n\n");
    prompt.push_str(&format!("Character: {}\n", subject.name));
    prompt.push_str(&format!("Role: {}\n", subject.role));
    prompt.push_str(&format!("Story: {}\n\n", story.title));

    prompt.push_str("EXISTING INFORMATION:\n");
    if let Some(age) = subject.age {
        prompt.push_str(&format!("Age: {}\n", age));
    }
    labeled_line(&mut prompt, "", "Gender", subject.gender.as_deref(), EXISTING_FIELD_MAX_CHARS);
    labeled_line(
        &mut prompt,
        "",
        "Personality",
        subject.personality.as_deref(),
        EXISTING_FIELD_MAX_CHARS,
    );
    labeled_line(
        &mut prompt,
        "",
        "Background",
        subject.background.as_deref(),
        EXISTING_FIELD_MAX_CHARS,
    );
    labeled_line(
        &mut prompt,
        "",
        "Abilities",
        subject.abilities.as_deref(),
        EXISTING_FIELD_MAX_CHARS,
    );

    prompt.push_str(&format!("\nEXPANSION FOCUS: {}\n", focus));
    prompt.push_str(
        "
INSTRUCTIONS:
Expand this character's details with depth and nuance:
1. Create realistic motivations and conflicts
2. Develop their voice and mannerisms
3. Establish meaningful relationships
4. Plan character growth potential
5. Consider their role in the story
6. Add unique quirks and traits
7. Ensure they feel like a real person

Provide detailed character information now:
",
    );
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use lightnovel_domain::{CharacterId, CharacterRole, Importance, StoryId};

    #[test]
    fn lists_only_known_fields() {
        let story = Story::new(StoryId::new(1), "Ashes of the Loop");
        let mut subject = Character::new(
            CharacterId::new(2),
            StoryId::new(1),
            "Lysa",
            CharacterRole::Deuteragonist,
            Importance::new(4).expect("valid importance"),
        )
        .with_personality("p".repeat(450));
        subject.age = Some(19);

        let prompt = build_character_expansion_prompt(&subject, &story, "Motivations and inner conflict");

        assert!(prompt.contains("Character: Lysa\nRole: Deuteragonist\nStory: Ashes of the Loop\n"));
        assert!(prompt.contains("Age: 19\n"));
        assert!(prompt.contains(&format!("Personality: {}\n", "p".repeat(400))));
        assert!(!prompt.contains("Gender:"));
        assert!(!prompt.contains("Background:"));
        assert!(prompt.contains("EXPANSION FOCUS: Motivations and inner conflict\n"));
    }
}
