use serde::{Deserialize, Deserializer, Serialize};

pub type CueScore = u8;

pub const MAX_CUE_SCORE: CueScore = 100;

const COMING_UP_MARKERS: [&str; 9] = [
    "lol",
    "lmao",
    "🤣",
    "😄",
    "paint",
    "fun",
    "rave",
    "story",
    "remember when",
];

const GOING_DOWN_MARKERS: [&str; 7] = [
    "done",
    "can't",
    "nothing matters",
    "falling apart",
    "hate",
    "i'm miserable",
    "i don't care",
];

const COMING_UP_BASE: u32 = 20;
const COMING_UP_PER_MARKER: u32 = 8;
const GOING_DOWN_BASE: u32 = 25;
const GOING_DOWN_PER_MARKER: u32 = 10;
const EXCLAMATION_THRESHOLD: usize = 3;
const EXCLAMATION_WEIGHT: u32 = 10;
const SHORT_RESPONSE_CHARS: usize = 12;
const SHORT_RESPONSE_WEIGHT: u32 = 8;
const LONG_FORM_CHARS: usize = 160;
const LONG_FORM_WEIGHT: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CueSignal {
    #[serde(rename = "humor/story markers")]
    HumorStoryMarkers,
    #[serde(rename = "spiral markers")]
    SpiralMarkers,
    #[serde(rename = "high exclamation")]
    HighExclamation,
    #[serde(rename = "very short response")]
    VeryShortResponse,
    #[serde(rename = "long form engagement")]
    LongFormEngagement,
}

impl CueSignal {
    pub fn label(&self) -> &'static str {
        match self {
            CueSignal::HumorStoryMarkers => "humor/story markers",
            CueSignal::SpiralMarkers => "spiral markers",
            CueSignal::HighExclamation => "high exclamation",
            CueSignal::VeryShortResponse => "very short response",
            CueSignal::LongFormEngagement => "long form engagement",
        }
    }
}

/// Scores stay within `0..=MAX_CUE_SCORE` when built by [`analyze`], [`CueSignals::new`]
/// or deserialization. Assigning the public fields directly bypasses the clamp.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CueSignals {
    #[serde(deserialize_with = "deserialize_score")]
    pub coming_up_score: CueScore,
    #[serde(deserialize_with = "deserialize_score")]
    pub going_down_score: CueScore,
    pub signals: Vec<CueSignal>,
}

impl CueSignals {
    pub fn new(coming_up_score: u32, going_down_score: u32) -> Self {
        Self {
            coming_up_score: clamp_score(coming_up_score),
            going_down_score: clamp_score(going_down_score),
            signals: Vec::new(),
        }
    }

    pub fn has_signal(&self, signal: CueSignal) -> bool {
        self.signals.contains(&signal)
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.signals.iter().map(CueSignal::label).collect()
    }
}

fn clamp_score(raw: u32) -> CueScore {
    raw.min(MAX_CUE_SCORE as u32) as CueScore
}

fn deserialize_score<'de, D>(deserializer: D) -> Result<CueScore, D::Error>
where
    D: Deserializer<'de>,
{
    u32::deserialize(deserializer).map(clamp_score)
}

/// Number of markers found in `haystack`. A marker counts once however often it recurs.
fn marker_hits(haystack: &str, markers: &[&str]) -> u32 {
    markers.iter().filter(|marker| haystack.contains(*marker)).count() as u32
}

pub fn analyze(text: &str) -> CueSignals {
    let lowered = text.to_lowercase();
    let mut signals = Vec::new();
    let mut coming: u32 = 0;
    let mut going: u32 = 0;

    let humor_hits = marker_hits(&lowered, &COMING_UP_MARKERS);
    if humor_hits > 0 {
        coming += COMING_UP_BASE + humor_hits * COMING_UP_PER_MARKER;
        signals.push(CueSignal::HumorStoryMarkers);
    }

    let spiral_hits = marker_hits(&lowered, &GOING_DOWN_MARKERS);
    if spiral_hits > 0 {
        going += GOING_DOWN_BASE + spiral_hits * GOING_DOWN_PER_MARKER;
        signals.push(CueSignal::SpiralMarkers);
    }

    if text.matches('!').count() >= EXCLAMATION_THRESHOLD {
        going += EXCLAMATION_WEIGHT;
        signals.push(CueSignal::HighExclamation);
    }

    let trimmed_len = text.trim().chars().count();
    if trimmed_len < SHORT_RESPONSE_CHARS {
        going += SHORT_RESPONSE_WEIGHT;
        signals.push(CueSignal::VeryShortResponse);
    }
    if trimmed_len > LONG_FORM_CHARS {
        coming += LONG_FORM_WEIGHT;
        signals.push(CueSignal::LongFormEngagement);
    }

    CueSignals {
        coming_up_score: clamp_score(coming),
        going_down_score: clamp_score(going),
        signals,
    }
}

/// Stateless handle over [`analyze`] for callers that want a value to pass around.
#[derive(Debug, Clone, Copy, Default)]
pub struct CueAnalyzer;

impl CueAnalyzer {
    pub fn new() -> Self {
        CueAnalyzer
    }

    pub fn analyze(&self, text: &str) -> CueSignals {
        analyze(text)
    }
}
