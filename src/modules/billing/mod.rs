pub mod subscription;

pub use subscription::{GateDecision, SubscriptionLedger, SubscriptionStatus};
