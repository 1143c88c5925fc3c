pub mod selector;

pub use selector::{
    classify, select_move, MemoryHints, MoveRule, MoveSelector, MoveType, NextMove, MOVE_RULES,
    SPIRAL_THRESHOLD, UPLIFT_THRESHOLD,
};
