pub mod composer;

pub use composer::{compose, PromptComposer, MEMORY_FACTS_HEADER, VOICE_NOTES_HEADER};
