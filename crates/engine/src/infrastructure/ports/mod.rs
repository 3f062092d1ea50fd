//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Story data access (the authoring app's database, or a JSON bundle)
//! - LLM calls (Ollama today)
//! - Clock (for testing)

mod error;
mod external;
mod repos;
mod testing;

pub use error::{LlmError, RepoError};
pub use external::{Generated, GenerationRequest, LlmPort};
pub use repos::StoryReadPort;
pub use testing::{ClockPort, SystemClock};

#[cfg(test)]
pub use external::MockLlmPort;
#[cfg(test)]
pub use repos::MockStoryReadPort;
#[cfg(test)]
pub use testing::MockClockPort;
