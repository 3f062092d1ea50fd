//! Use cases - authoring flows composed from ports and prompts.
//!
//! Nothing here writes story data: every flow returns its result for the
//! caller to review and persist.

pub mod chapter;
pub mod error;
pub mod generation;
pub mod section_parser;
pub mod worker;
pub mod world_building;

pub use chapter::{
    ChapterDraft, ChapterGenerator, ChapterRequest, GenerationParams, PendingChapter,
    PreparedChapter,
};
pub use error::UseCaseError;
pub use generation::{display_text, GenerationService, SamplingDefaults};
pub use worker::{GenerationHandle, GenerationWorker};
pub use world_building::{LoreDraft, WorldBuilder, WorldDetail, DEFAULT_LOCATION_ASPECTS};
