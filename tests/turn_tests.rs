pub mod mock;

use arbor_turn_engine::api::services::TurnService;
use arbor_turn_engine::api::TurnError;
use arbor_turn_engine::config::EngineConfig;
use arbor_turn_engine::modules::billing::GateDecision;
use arbor_turn_engine::modules::conversation::MessageRole;
use arbor_turn_engine::modules::memory::MemoryRecall;
use arbor_turn_engine::modules::moves::MoveType;

use mock::{
    accepting_messages, admitting_gate, authorization, no_profile, recalling, resolver, turn_request, MockGate,
    MockGenerator, MockMemory, MockMessages, MockProfiles, TEST_USER,
};

fn service(
    config: EngineConfig,
    profiles: MockProfiles,
    memory: MockMemory,
    messages: MockMessages,
    gate: MockGate,
) -> TurnService {
    TurnService::new(
        config,
        Box::new(resolver()),
        Box::new(profiles),
        Box::new(memory),
        Box::new(messages),
        Box::new(gate),
    )
}

fn painting_recall() -> MemoryRecall {
    MemoryRecall {
        facts: vec!["redirect:escape=painting".to_string(), "anchor:kid=Mia".to_string()],
        redirect_hook: Some("painting".to_string()),
        address_as: None,
    }
}

#[test]
fn test_without_generator_the_move_is_the_reply() {
    let svc = service(
        EngineConfig::default(),
        no_profile(),
        recalling(painting_recall()),
        accepting_messages(),
        admitting_gate(),
    );

    let response = svc.process_turn(Some(&authorization()), &turn_request("lol that was so fun")).unwrap();
    assert_eq!(response.next_move_type, MoveType::RedirectThenReturn);
    assert_eq!(response.cues.coming_up_score, 36);
    assert!(response.assistant_text.contains("**painting**"));
}

#[test]
fn test_generator_receives_system_prompt_and_draft() {
    let mut generator = MockGenerator::new();
    generator
        .expect_generate()
        .withf(|system, history| {
            system.starts_with("You are Arbor")
                && system.contains("- redirect:escape=painting")
                && history.len() == 2
                && history[0].role == MessageRole::User
                && history[0].content == "lol that was so fun"
                && history[1].role == MessageRole::Assistant
                && history[1].content.contains("painting")
        })
        .times(1)
        .returning(|_, _| Ok("Painting sounds right. What's on the easel?".to_string()));

    let mut messages = MockMessages::new();
    messages.expect_ensure_conversation().times(1).returning(|_, _| Ok(()));
    messages
        .expect_append()
        .withf(|_, role, content| *role == MessageRole::User && content == "lol that was so fun")
        .times(1)
        .returning(|_, _, _| Ok(()));
    messages
        .expect_append()
        .withf(|_, role, content| *role == MessageRole::Assistant && content.starts_with("Painting sounds right"))
        .times(1)
        .returning(|_, _, _| Ok(()));

    let mut gate = MockGate::new();
    gate.expect_check().returning(|_| Ok(GateDecision::Admit));
    gate.expect_record_turn()
        .withf(|user_id| user_id == TEST_USER)
        .times(1)
        .returning(|_| Ok(()));

    let svc = service(EngineConfig::default(), no_profile(), recalling(painting_recall()), messages, gate)
        .with_generator(Box::new(generator));

    let response = svc.process_turn(Some(&authorization()), &turn_request("lol that was so fun")).unwrap();
    assert_eq!(response.assistant_text, "Painting sounds right. What's on the easel?");
}

#[test]
fn test_empty_generation_uses_fallback() {
    let mut generator = MockGenerator::new();
    generator.expect_generate().returning(|_, _| Ok("  \n".to_string()));

    let config = EngineConfig::default();
    let fallback = config.generation.fallback_reply.clone();
    let svc = service(config, no_profile(), recalling(MemoryRecall::default()), accepting_messages(), admitting_gate())
        .with_generator(Box::new(generator));

    let response = svc.process_turn(Some(&authorization()), &turn_request("just a normal day")).unwrap();
    assert_eq!(response.assistant_text, fallback);
    assert_eq!(response.next_move_type, MoveType::GentleCheckin);
}

#[test]
fn test_generation_failure_is_surfaced() {
    let mut generator = MockGenerator::new();
    generator
        .expect_generate()
        .returning(|_, _| Err(TurnError::Generation("upstream timeout".to_string())));

    let mut messages = MockMessages::new();
    messages.expect_ensure_conversation().returning(|_, _| Ok(()));
    messages
        .expect_append()
        .withf(|_, role, _| *role == MessageRole::User)
        .times(1)
        .returning(|_, _, _| Ok(()));

    let mut gate = MockGate::new();
    gate.expect_check().returning(|_| Ok(GateDecision::Admit));
    gate.expect_record_turn().never();

    let svc = service(EngineConfig::default(), no_profile(), recalling(MemoryRecall::default()), messages, gate)
        .with_generator(Box::new(generator));

    let err = svc.process_turn(Some(&authorization()), &turn_request("hello there friend")).unwrap_err();
    assert_eq!(err.status_code(), 502);
}

#[test]
fn test_draft_can_be_withheld() {
    let mut generator = MockGenerator::new();
    generator
        .expect_generate()
        .withf(|_, history| history.len() == 1)
        .times(1)
        .returning(|_, _| Ok("ok".to_string()));

    let mut config = EngineConfig::default();
    config.generation.include_move_draft = false;

    let svc = service(config, no_profile(), recalling(MemoryRecall::default()), accepting_messages(), admitting_gate())
        .with_generator(Box::new(generator));

    assert!(svc.process_turn(Some(&authorization()), &turn_request("hello there friend")).is_ok());
}

#[test]
fn test_recall_cap_comes_from_config() {
    let mut memory = MockMemory::new();
    memory
        .expect_recall()
        .withf(|user_id, cap| user_id == TEST_USER && *cap == 5)
        .times(1)
        .returning(|_, _| Ok(MemoryRecall::default()));

    let mut config = EngineConfig::default();
    config.memory.fact_cap = 5;

    let svc = service(config, no_profile(), memory, accepting_messages(), admitting_gate());
    assert!(svc.process_turn(Some(&authorization()), &turn_request("hello there friend")).is_ok());
}

#[test]
fn test_unknown_profile_variant_uses_configured_default() {
    let mut profiles = MockProfiles::new();
    profiles
        .expect_persona_variant()
        .returning(|_| Ok(Some("arbor_retired".to_string())));

    let mut generator = MockGenerator::new();
    generator
        .expect_generate()
        .withf(|system, _| system.contains("- Same being. Slightly softer cadence, still firm."))
        .times(1)
        .returning(|_, _| Ok("hey".to_string()));

    let mut config = EngineConfig::default();
    config.persona.default_variant = arbor_turn_engine::config::PersonaVariant::ArborFem;

    let svc = service(config, profiles, recalling(MemoryRecall::default()), accepting_messages(), admitting_gate())
        .with_generator(Box::new(generator));

    assert!(svc.process_turn(Some(&authorization()), &turn_request("hello there friend")).is_ok());
}

#[test]
fn test_denied_gate_touches_no_store() {
    let mut gate = MockGate::new();
    gate.expect_check()
        .returning(|_| Ok(GateDecision::Deny { reason: "canceled".to_string() }));
    gate.expect_record_turn().never();

    let mut messages = MockMessages::new();
    messages.expect_ensure_conversation().never();
    messages.expect_append().never();

    let mut memory = MockMemory::new();
    memory.expect_recall().never();

    let svc = service(EngineConfig::default(), MockProfiles::new(), memory, messages, gate);

    let err = svc.process_turn(Some(&authorization()), &turn_request("hi there, long day")).unwrap_err();
    assert_eq!(err, TurnError::SubscriptionRequired { reason: "canceled".to_string() });
    assert_eq!(err.status_code(), 402);
}

#[test]
fn test_invalid_request_is_rejected_before_the_gate() {
    let mut gate = MockGate::new();
    gate.expect_check().never();

    let svc = service(EngineConfig::default(), MockProfiles::new(), MockMemory::new(), MockMessages::new(), gate);

    let mut request = turn_request("hello");
    request.conversation_id = "conversation-1".to_string();
    let err = svc.process_turn(Some(&authorization()), &request).unwrap_err();
    assert_eq!(err.status_code(), 400);

    let err = svc.process_turn(Some(&authorization()), &turn_request("")).unwrap_err();
    assert_eq!(err.status_code(), 400);
}

#[test]
fn test_missing_credentials_are_unauthorized() {
    let svc = service(
        EngineConfig::default(),
        MockProfiles::new(),
        MockMemory::new(),
        MockMessages::new(),
        MockGate::new(),
    );

    assert_eq!(svc.process_turn(None, &turn_request("hello")).unwrap_err(), TurnError::Unauthorized);
}

#[test]
fn test_json_body_is_parsed_after_authentication() {
    let mut gate = MockGate::new();
    gate.expect_check().never();

    let svc = service(EngineConfig::default(), MockProfiles::new(), MockMemory::new(), MockMessages::new(), gate);

    assert_eq!(svc.process_turn_json(None, "{").unwrap_err(), TurnError::Unauthorized);
    assert_eq!(svc.process_turn_json(Some("Bearer unknown"), "{").unwrap_err(), TurnError::Unauthorized);
    assert_eq!(svc.process_turn_json(Some(&authorization()), "{").unwrap_err().status_code(), 400);
}

#[test]
fn test_json_body_runs_the_full_turn() {
    let svc = service(
        EngineConfig::default(),
        no_profile(),
        recalling(painting_recall()),
        accepting_messages(),
        admitting_gate(),
    );

    let body = serde_json::to_string(&turn_request("lol that was so fun")).unwrap();
    let response = svc.process_turn_json(Some(&authorization()), &body).unwrap();
    assert_eq!(response.next_move_type, MoveType::RedirectThenReturn);
}

#[test]
fn test_storage_failure_stops_the_turn() {
    let mut messages = MockMessages::new();
    messages.expect_ensure_conversation().returning(|_, _| Ok(()));
    messages
        .expect_append()
        .returning(|_, _, _| Err(TurnError::Storage("disk full".to_string())));

    let mut generator = MockGenerator::new();
    generator.expect_generate().never();

    let mut gate = MockGate::new();
    gate.expect_check().returning(|_| Ok(GateDecision::Admit));
    gate.expect_record_turn().never();

    let svc = service(EngineConfig::default(), MockProfiles::new(), MockMemory::new(), messages, gate)
        .with_generator(Box::new(generator));

    let err = svc.process_turn(Some(&authorization()), &turn_request("hello there friend")).unwrap_err();
    assert_eq!(err.status_code(), 500);
}
