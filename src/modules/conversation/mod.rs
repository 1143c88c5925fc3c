pub mod store;

pub use store::{ConversationStore, MessageRole, StoredMessage};
