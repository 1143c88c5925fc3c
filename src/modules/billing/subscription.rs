use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;

use crate::api::types::UserId;

#[derive(Default)]
struct Account {
    status: SubscriptionStatus,
    turns: u64,
}

lazy_static! {
    static ref ACCOUNTS: Mutex<HashMap<UserId, Account>> = Mutex::new(HashMap::new());
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    Trialing,
    PastDue,
    Canceled,
    Incomplete,
    Unpaid,
    #[default]
    None,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Trialing => "trialing",
            SubscriptionStatus::PastDue => "past_due",
            SubscriptionStatus::Canceled => "canceled",
            SubscriptionStatus::Incomplete => "incomplete",
            SubscriptionStatus::Unpaid => "unpaid",
            SubscriptionStatus::None => "none",
        }
    }

    /// Unknown keys map to `None`, which never admits.
    pub fn from_key(key: &str) -> Self {
        match key.trim() {
            "active" => SubscriptionStatus::Active,
            "trialing" => SubscriptionStatus::Trialing,
            "past_due" => SubscriptionStatus::PastDue,
            "canceled" => SubscriptionStatus::Canceled,
            "incomplete" => SubscriptionStatus::Incomplete,
            "unpaid" => SubscriptionStatus::Unpaid,
            _ => SubscriptionStatus::None,
        }
    }

    pub fn admits(&self) -> bool {
        matches!(self, SubscriptionStatus::Active | SubscriptionStatus::Trialing)
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Admit,
    Deny { reason: String },
}

impl GateDecision {
    pub fn is_admitted(&self) -> bool {
        matches!(self, GateDecision::Admit)
    }
}

pub struct SubscriptionLedger;

impl SubscriptionLedger {
    pub fn set_status(user_id: &UserId, status: SubscriptionStatus) -> Result<(), String> {
        let mut accounts = ACCOUNTS.lock().map_err(|_| "Failed to acquire lock")?;
        accounts.entry(user_id.clone()).or_default().status = status;

        tracing::info!(user_id = %user_id, status = %status, "subscription status updated");
        Ok(())
    }

    pub fn status(user_id: &UserId) -> Result<SubscriptionStatus, String> {
        let accounts = ACCOUNTS.lock().map_err(|_| "Failed to acquire lock")?;

        Ok(accounts.get(user_id).map(|account| account.status).unwrap_or_default())
    }

    pub fn check(user_id: &UserId) -> Result<GateDecision, String> {
        let status = Self::status(user_id)?;

        if status.admits() {
            Ok(GateDecision::Admit)
        } else {
            Ok(GateDecision::Deny {
                reason: status.as_str().to_string(),
            })
        }
    }

    pub fn record_turn(user_id: &UserId) -> Result<u64, String> {
        let mut accounts = ACCOUNTS.lock().map_err(|_| "Failed to acquire lock")?;
        let account = accounts.entry(user_id.clone()).or_default();
        account.turns += 1;

        Ok(account.turns)
    }

    pub fn usage(user_id: &UserId) -> Result<u64, String> {
        let accounts = ACCOUNTS.lock().map_err(|_| "Failed to acquire lock")?;

        Ok(accounts.get(user_id).map(|account| account.turns).unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::{GateDecision, SubscriptionLedger, SubscriptionStatus};
    use crate::_test_mock::memory_mock::MemoryTestHelpers;

    #[test]
    fn test_only_active_and_trialing_admit() {
        assert!(SubscriptionStatus::Active.admits());
        assert!(SubscriptionStatus::Trialing.admits());
        assert!(!SubscriptionStatus::PastDue.admits());
        assert!(!SubscriptionStatus::None.admits());
        assert_eq!(SubscriptionStatus::from_key("past_due"), SubscriptionStatus::PastDue);
        assert_eq!(SubscriptionStatus::from_key("gold"), SubscriptionStatus::None);
    }

    #[test]
    fn test_unknown_user_is_denied_with_reason() {
        let user_id = MemoryTestHelpers::test_user_id();
        assert_eq!(
            SubscriptionLedger::check(&user_id).unwrap(),
            GateDecision::Deny { reason: "none".to_string() }
        );

        SubscriptionLedger::set_status(&user_id, SubscriptionStatus::Trialing).unwrap();
        assert!(SubscriptionLedger::check(&user_id).unwrap().is_admitted());
    }

    #[test]
    fn test_usage_counter() {
        let user_id = MemoryTestHelpers::test_user_id();
        assert_eq!(SubscriptionLedger::usage(&user_id).unwrap(), 0);
        assert_eq!(SubscriptionLedger::record_turn(&user_id).unwrap(), 1);
        assert_eq!(SubscriptionLedger::record_turn(&user_id).unwrap(), 2);
        assert_eq!(SubscriptionLedger::usage(&user_id).unwrap(), 2);
    }
}
