use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::PersonaConfig;
use crate::modules::cues::{CueScore, CueSignals};

pub const SPIRAL_THRESHOLD: CueScore = 35;
pub const UPLIFT_THRESHOLD: CueScore = 25;

const PLAYFUL_HUMOR_LEVEL: u8 = 2;
const FIRM_LEVEL: u8 = 2;

/// Learned per-user hints. Every field is optional; empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MemoryHints {
    pub address_as: Option<String>,
    pub redirect_hook: Option<String>,
    /// Carried for callers that store it; move selection does not read it.
    pub humor_hook: Option<String>,
}

impl MemoryHints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_address_as(mut self, address_as: impl Into<String>) -> Self {
        self.address_as = Some(address_as.into());
        self
    }

    pub fn with_redirect_hook(mut self, redirect_hook: impl Into<String>) -> Self {
        self.redirect_hook = Some(redirect_hook.into());
        self
    }

    pub fn address_for<'a>(&'a self, persona: &'a PersonaConfig) -> &'a str {
        non_empty(self.address_as.as_deref()).unwrap_or(&persona.addressing_default)
    }

    pub fn redirect(&self) -> Option<&str> {
        non_empty(self.redirect_hook.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveType {
    NameStorm,
    RedirectThenReturn,
    GentleCheckin,
}

impl MoveType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MoveType::NameStorm => "name_storm",
            MoveType::RedirectThenReturn => "redirect_then_return",
            MoveType::GentleCheckin => "gentle_checkin",
        }
    }
}

impl fmt::Display for MoveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextMove {
    #[serde(rename = "type")]
    pub move_type: MoveType,
    pub prompt: String,
}

pub struct MoveRule {
    pub move_type: MoveType,
    pub applies: fn(&CueSignals) -> bool,
}

fn is_spiraling(cues: &CueSignals) -> bool {
    cues.going_down_score >= SPIRAL_THRESHOLD
}

fn is_lifting(cues: &CueSignals) -> bool {
    cues.coming_up_score >= UPLIFT_THRESHOLD
}

fn always(_: &CueSignals) -> bool {
    true
}

/// Evaluated top to bottom; the first rule that applies wins. The last rule always applies.
pub const MOVE_RULES: [MoveRule; 3] = [
    MoveRule {
        move_type: MoveType::NameStorm,
        applies: is_spiraling,
    },
    MoveRule {
        move_type: MoveType::RedirectThenReturn,
        applies: is_lifting,
    },
    MoveRule {
        move_type: MoveType::GentleCheckin,
        applies: always,
    },
];

pub fn classify(cues: &CueSignals) -> MoveType {
    MOVE_RULES
        .iter()
        .find(|rule| (rule.applies)(cues))
        .map(|rule| rule.move_type)
        .unwrap_or(MoveType::GentleCheckin)
}

pub fn select_move(persona: &PersonaConfig, cues: &CueSignals, memory: &MemoryHints) -> NextMove {
    let move_type = classify(cues);
    let lines = match move_type {
        MoveType::NameStorm => name_storm(persona, memory),
        MoveType::RedirectThenReturn => redirect_then_return(persona, memory),
        MoveType::GentleCheckin => gentle_checkin(persona, memory),
    };

    NextMove {
        move_type,
        prompt: lines.join("\n"),
    }
}

// Fixed wording: persona dials must not change the voice under distress.
fn name_storm(persona: &PersonaConfig, memory: &MemoryHints) -> Vec<String> {
    let address = memory.address_for(persona);
    vec![
        format!("{}… okay. I’m here.", address),
        "No fixing yet—just point at it.".to_string(),
        "What are the top **three** things crowding your head right now?".to_string(),
        "They can be short: “money / tired / kid stuff.”".to_string(),
    ]
}

fn redirect_then_return(persona: &PersonaConfig, memory: &MemoryHints) -> Vec<String> {
    let opening = if persona.humor_level >= PLAYFUL_HUMOR_LEVEL {
        "Quick detour—because I can hear you coming back up."
    } else {
        "Quick detour."
    };

    let question = match memory.redirect() {
        Some(hook) => format!(
            "You said your escape is **{}**—what’s the first thing you do when you walk in?",
            hook
        ),
        None => "If you could go anywhere for one hour tonight, where are you going?".to_string(),
    };

    vec![
        opening.to_string(),
        question,
        String::new(),
        "Then we’ll come back and check how your body feels.".to_string(),
    ]
}

fn gentle_checkin(persona: &PersonaConfig, memory: &MemoryHints) -> Vec<String> {
    let address = memory.address_for(persona);
    let tone = if persona.firmness_level >= FIRM_LEVEL {
        "Let’s keep this simple and real."
    } else {
        "Let’s take it slow."
    };

    vec![
        format!("{}, I’m with you.", address),
        tone.to_string(),
        "What’s the one part of today that’s taking the most energy to carry?".to_string(),
    ]
}

/// Stateless handle over [`select_move`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveSelector;

impl MoveSelector {
    pub fn new() -> Self {
        MoveSelector
    }

    pub fn select(&self, persona: &PersonaConfig, cues: &CueSignals, memory: &MemoryHints) -> NextMove {
        select_move(persona, cues, memory)
    }
}
