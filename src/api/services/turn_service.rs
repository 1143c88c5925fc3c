use crate::api::error::TurnError;
use crate::api::services::collaborators::{
    GenerationMessage, IdentityResolver, MemoryReader, MessageWriter, ProfileReader, SubscriptionGate,
    TextGenerator,
};
use crate::api::services::identity_service::BearerTokenResolver;
use crate::api::services::validation_service::{parse_turn_request, validate_turn_request};
use crate::api::types::{TurnRequest, TurnResponse, UserId};
use crate::config::{EngineConfig, PersonaCatalog, PersonaConfig, PersonaVariant};
use crate::modules::billing::{GateDecision, SubscriptionLedger};
use crate::modules::conversation::{ConversationStore, MessageRole};
use crate::modules::cues::analyze;
use crate::modules::memory::MemoryStore;
use crate::modules::moves::select_move;
use crate::modules::profile::ProfileStore;
use crate::modules::prompt::compose;

/// Runs one chat turn against its collaborators.
///
/// Only the cue, move and prompt steps are pure; everything else goes
/// through the collaborator traits, in the order a request handler needs:
/// identity, validation, gate, user message, reply, assistant message, usage.
pub struct TurnService {
    config: EngineConfig,
    identity: Box<dyn IdentityResolver>,
    profiles: Box<dyn ProfileReader>,
    memory: Box<dyn MemoryReader>,
    messages: Box<dyn MessageWriter>,
    gate: Box<dyn SubscriptionGate>,
    generator: Option<Box<dyn TextGenerator>>,
}

impl TurnService {
    pub fn new(
        config: EngineConfig,
        identity: Box<dyn IdentityResolver>,
        profiles: Box<dyn ProfileReader>,
        memory: Box<dyn MemoryReader>,
        messages: Box<dyn MessageWriter>,
        gate: Box<dyn SubscriptionGate>,
    ) -> Self {
        Self {
            config,
            identity,
            profiles,
            memory,
            messages,
            gate,
            generator: None,
        }
    }

    /// Wires the process-local stores; `identity` is shared with whoever issues tokens.
    pub fn in_memory(config: EngineConfig, identity: BearerTokenResolver) -> Self {
        Self::new(
            config,
            Box::new(identity),
            Box::new(ProfileStore),
            Box::new(MemoryStore),
            Box::new(ConversationStore),
            Box::new(SubscriptionLedger),
        )
    }

    pub fn with_generator(mut self, generator: Box<dyn TextGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn resolve_persona(&self, user_id: &UserId) -> Result<&'static PersonaConfig, TurnError> {
        let key = self.profiles.persona_variant(user_id)?;
        let parsed = key.as_deref().and_then(PersonaVariant::parse);
        let variant = parsed.unwrap_or(self.config.persona.default_variant);

        if key.is_some() && parsed.is_none() {
            tracing::warn!(user_id = %user_id, key = ?key, fallback = %variant, "unknown persona variant");
        }

        Ok(PersonaCatalog::get(variant))
    }

    pub fn process_turn(&self, authorization: Option<&str>, request: &TurnRequest) -> Result<TurnResponse, TurnError> {
        let user_id = self.identity.resolve(authorization)?;
        self.run_turn(user_id, request)
    }

    /// Same as [`TurnService::process_turn`] for a raw JSON body, which is only
    /// parsed once the caller is authenticated.
    pub fn process_turn_json(&self, authorization: Option<&str>, request_json: &str) -> Result<TurnResponse, TurnError> {
        let user_id = self.identity.resolve(authorization)?;
        let request = parse_turn_request(request_json)?;
        self.run_turn(user_id, &request)
    }

    fn run_turn(&self, user_id: UserId, request: &TurnRequest) -> Result<TurnResponse, TurnError> {
        let turn = validate_turn_request(request)?;

        let span = tracing::info_span!("turn", user_id = %user_id, conversation_id = %turn.conversation_id);
        let _enter = span.enter();

        if let GateDecision::Deny { reason } = self.gate.check(&user_id)? {
            tracing::info!(reason = %reason, "turn rejected by subscription gate");
            return Err(TurnError::SubscriptionRequired { reason });
        }

        self.messages.ensure_conversation(&turn.conversation_id, &user_id)?;
        self.messages
            .append(&turn.conversation_id, MessageRole::User, &turn.user_text)?;

        let persona = self.resolve_persona(&user_id)?;
        let cues = analyze(&turn.user_text);
        let recall = self.memory.recall(&user_id, self.config.memory.fact_cap)?;

        let system_prompt = compose(persona, &recall.facts);
        let next_move = select_move(persona, &cues, &recall.hints());

        tracing::debug!(
            coming_up = cues.coming_up_score,
            going_down = cues.going_down_score,
            signals = ?cues.labels(),
            next_move = %next_move.move_type,
            facts = recall.facts.len(),
            "turn analyzed"
        );

        let assistant_text = match &self.generator {
            Some(generator) => {
                let mut history = vec![GenerationMessage::user(turn.user_text.as_str())];
                if self.config.generation.include_move_draft {
                    history.push(GenerationMessage::assistant(next_move.prompt.as_str()));
                }

                let generated = generator.generate(&system_prompt, &history).map_err(|e| {
                    tracing::error!(error = %e, "generation failed");
                    e
                })?;

                if generated.trim().is_empty() {
                    tracing::warn!("generator returned empty output, using fallback reply");
                    self.config.generation.fallback_reply.clone()
                } else {
                    generated
                }
            }
            None => next_move.prompt.clone(),
        };

        self.messages
            .append(&turn.conversation_id, MessageRole::Assistant, &assistant_text)?;
        self.gate.record_turn(&user_id)?;

        tracing::info!(next_move = %next_move.move_type, "turn completed");

        Ok(TurnResponse {
            cues,
            next_move_type: next_move.move_type,
            assistant_text,
        })
    }
}
