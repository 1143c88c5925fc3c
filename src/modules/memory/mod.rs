pub mod recall;
pub mod store;

pub use recall::{MemoryRecall, ADDRESS_AS_KEY};
pub use store::{MemoryItem, MemoryKind, MemoryStore};
