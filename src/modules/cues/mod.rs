pub mod analyzer;

pub use analyzer::{analyze, CueAnalyzer, CueScore, CueSignal, CueSignals, MAX_CUE_SCORE};
