pub mod billing;
pub mod conversation;
pub mod cues;
pub mod memory;
pub mod moves;
pub mod profile;
pub mod prompt;
