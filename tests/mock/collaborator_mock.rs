#![allow(dead_code)]

use arbor_turn_engine::api::services::collaborators::{
    GenerationMessage, MemoryReader, MessageWriter, ProfileReader, SubscriptionGate, TextGenerator,
};
use arbor_turn_engine::api::services::identity_service::BearerTokenResolver;
use arbor_turn_engine::api::types::{TurnRequest, UserId};
use arbor_turn_engine::api::TurnError;
use arbor_turn_engine::modules::billing::GateDecision;
use arbor_turn_engine::modules::conversation::MessageRole;
use arbor_turn_engine::modules::memory::MemoryRecall;
use mockall::mock;
use uuid::Uuid;

mock! {
    pub Profiles {}
    impl ProfileReader for Profiles {
        fn persona_variant(&self, user_id: &UserId) -> Result<Option<String>, TurnError>;
    }
}

mock! {
    pub Memory {}
    impl MemoryReader for Memory {
        fn recall(&self, user_id: &UserId, cap: usize) -> Result<MemoryRecall, TurnError>;
    }
}

mock! {
    pub Messages {}
    impl MessageWriter for Messages {
        fn ensure_conversation(&self, conversation_id: &Uuid, user_id: &UserId) -> Result<(), TurnError>;
        fn append(&self, conversation_id: &Uuid, role: MessageRole, content: &str) -> Result<(), TurnError>;
    }
}

mock! {
    pub Gate {}
    impl SubscriptionGate for Gate {
        fn check(&self, user_id: &UserId) -> Result<GateDecision, TurnError>;
        fn record_turn(&self, user_id: &UserId) -> Result<(), TurnError>;
    }
}

mock! {
    pub Generator {}
    impl TextGenerator for Generator {
        fn generate(&self, system_prompt: &str, history: &[GenerationMessage]) -> Result<String, TurnError>;
    }
}

pub const TEST_TOKEN: &str = "test-token";
pub const TEST_USER: &str = "user-under-test";

pub fn authorization() -> String {
    format!("Bearer {}", TEST_TOKEN)
}

pub fn resolver() -> BearerTokenResolver {
    let resolver = BearerTokenResolver::new();
    resolver
        .register(TEST_TOKEN, TEST_USER)
        .expect("registering a test token should succeed");
    resolver
}

pub fn turn_request(text: &str) -> TurnRequest {
    TurnRequest {
        conversation_id: Uuid::new_v4().to_string(),
        user_text: text.to_string(),
    }
}

/// No profile row: the configured default persona applies.
pub fn no_profile() -> MockProfiles {
    let mut profiles = MockProfiles::new();
    profiles.expect_persona_variant().returning(|_| Ok(None));
    profiles
}

pub fn recalling(recall: MemoryRecall) -> MockMemory {
    let mut memory = MockMemory::new();
    memory.expect_recall().returning(move |_, _| Ok(recall.clone()));
    memory
}

pub fn accepting_messages() -> MockMessages {
    let mut messages = MockMessages::new();
    messages.expect_ensure_conversation().returning(|_, _| Ok(()));
    messages.expect_append().returning(|_, _, _| Ok(()));
    messages
}

pub fn admitting_gate() -> MockGate {
    let mut gate = MockGate::new();
    gate.expect_check().returning(|_| Ok(GateDecision::Admit));
    gate.expect_record_turn().returning(|_| Ok(()));
    gate
}

pub struct TestTurnData;

impl TestTurnData {
    pub fn spiral_texts() -> Vec<&'static str> {
        vec![
            "I can't do this, nothing matters",
            "everything is falling apart and I hate it",
            "done!!! bye",
        ]
    }

    pub fn uplift_texts() -> Vec<&'static str> {
        vec![
            "lol that was so fun",
            "remember when we painted the fence? lmao",
            "ok this story is ridiculous 😄 you have to hear it",
        ]
    }

    pub fn neutral_texts() -> Vec<&'static str> {
        vec![
            "I went to work and then made dinner.",
            "The meeting ran long again today.",
            "Not sure what to say about this week.",
        ]
    }
}
