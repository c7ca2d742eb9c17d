use crate::shared::entity::ID;
use beacon_utils::create_action_token;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Action tokens stay redeemable for this many days after the occurrence
/// due date.
pub const ACTION_TOKEN_TTL_DAYS: u64 = 7;

/// One row per `(user, reminder, occurrence_date)` successfully notified.
/// Existence of the row is the idempotence guard against duplicate emails
/// for the same occurrence.
#[derive(Debug, Clone, PartialEq)]
pub struct EmailSendLog {
    pub user_id: ID,
    pub reminder_id: ID,
    pub occurrence_date: NaiveDate,
    pub sent_at: i64,
}

/// The state transition a one-click email link is allowed to perform.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Snooze,
    Ignore,
}

impl Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Snooze => write!(f, "snooze"),
            Self::Ignore => write!(f, "ignore"),
        }
    }
}

impl FromStr for ActionKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "snooze" => Ok(Self::Snooze),
            "ignore" => Ok(Self::Ignore),
            _ => Err(()),
        }
    }
}

/// A single-use capability minted at send time and embedded in the outbound
/// email, letting the recipient act on the occurrence without signing in.
#[derive(Debug, Clone, PartialEq)]
pub struct EmailActionToken {
    pub token: String,
    pub user_id: ID,
    pub reminder_id: ID,
    pub occurrence_date: NaiveDate,
    pub action: ActionKind,
    /// Millis timestamp after which the token is rejected.
    pub expires_at: i64,
    pub used_at: Option<i64>,
}

impl EmailActionToken {
    pub fn new(
        user_id: ID,
        reminder_id: ID,
        occurrence_date: NaiveDate,
        action: ActionKind,
    ) -> Self {
        let expiry_date = occurrence_date
            .checked_add_days(Days::new(ACTION_TOKEN_TTL_DAYS))
            .unwrap_or(occurrence_date);
        let expires_at = expiry_date
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp_millis())
            .unwrap_or(0);
        Self {
            token: create_action_token(),
            user_id,
            reminder_id,
            occurrence_date,
            action,
            expires_at,
            used_at: None,
        }
    }
}
