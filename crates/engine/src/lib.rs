//! Light novel engine library.
//!
//! ## Structure
//!
//! - `prompts/` - Pure prompt assembly from story entities
//! - `use_cases/` - Generation flows composed from ports and prompts
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `prompt_templates` - System instructions and their overrides

pub mod infrastructure;
pub mod prompt_templates;
pub mod prompts;
pub mod use_cases;
