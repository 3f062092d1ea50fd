//! Prompt assembly
//!
//! Pure functions that render story entities into prompt text. Identical
//! inputs always produce byte-identical prompts: nothing here reads the
//! clock, the environment or a random source.
//!
//! Every free-text field is hard-clipped to a per-section character cap so
//! the prompt leaves room for the generation budget.

mod chapter;
mod character;
mod clip;
mod progression;
mod synopsis;
mod world;

pub use chapter::{build_chapter_prompt, ChapterPromptInput, DEFAULT_TARGET_WORDS};
pub use character::build_character_expansion_prompt;
pub use clip::clip;
pub use progression::{progression_entries, PROGRESSION_PROMPT_KEYS};
pub use synopsis::build_synopsis_structure_prompt;
pub use world::build_world_prompt;

/// Field label followed by its clipped value, or nothing when the field is blank.
fn labeled_line(out: &mut String, indent: &str, label: &str, value: Option<&str>, max_chars: usize) {
    if let Some(value) = lightnovel_domain::non_blank(value) {
        out.push_str(&format!("{}{}: {}\n", indent, label, clip(value, max_chars)));
    }
}
