use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

const MAX_INTERVAL: u32 = 1000;

/// How often a recurring `Reminder` repeats.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "DAILY" => Some(Self::Daily),
            "WEEKLY" => Some(Self::Weekly),
            "MONTHLY" => Some(Self::Monthly),
            "YEARLY" => Some(Self::Yearly),
            _ => None,
        }
    }
}

/// The single-frequency subset of RFC 5545 recurrence rules supported for
/// reminders: `FREQ=<DAILY|WEEKLY|MONTHLY|YEARLY>` with an optional
/// `INTERVAL=n`. Other rule parts are allowed through validation so that
/// the stored rule string can be passed through to calendar clients, but
/// they do not affect the computed occurrences.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecurrenceRule {
    pub freq: Frequency,
    pub interval: u32,
}

impl RecurrenceRule {
    /// Parses a stored rrule string. Returns `None` when the FREQ token is
    /// missing or unrecognized, in which case the reminder is treated as
    /// one-time going forward.
    pub fn parse(rrule: &str) -> Option<Self> {
        let mut freq = None;
        let mut interval = 1;
        for part in rrule.split(';') {
            let (key, value) = part.split_once('=')?;
            match key {
                "FREQ" => freq = Frequency::from_token(value),
                "INTERVAL" => interval = value.parse::<u32>().ok()?,
                _ => {}
            }
        }
        freq.map(|freq| Self { freq, interval })
    }

    /// Computes the next due date after `current`.
    ///
    /// Calendar-aware: monthly and yearly steps clamp to the last day of a
    /// shorter target month instead of spilling into the next one, so
    /// `2025-01-31 + FREQ=MONTHLY` lands on `2025-02-28`.
    pub fn next_occurrence(&self, current: NaiveDate) -> Option<NaiveDate> {
        let interval = self.interval.max(1);
        match self.freq {
            Frequency::Daily => current.checked_add_days(Days::new(interval as u64)),
            Frequency::Weekly => current.checked_add_days(Days::new(7 * interval as u64)),
            Frequency::Monthly => current.checked_add_months(Months::new(interval)),
            Frequency::Yearly => current.checked_add_months(Months::new(12 * interval)),
        }
    }
}

/// Validates the shape of a user-supplied rrule string:
/// `FREQ=(DAILY|WEEKLY|MONTHLY|YEARLY)` first, followed by any number of
/// `;KEY=VALUE` groups with uppercase alphabetic keys and alphanumeric
/// (comma separated) values.
pub fn validate_rrule(rrule: &str) -> bool {
    let mut parts = rrule.split(';');

    let freq = match parts.next().and_then(|p| p.strip_prefix("FREQ=")) {
        Some(freq) => freq,
        None => return false,
    };
    if Frequency::from_token(freq).is_none() {
        return false;
    }

    for part in parts {
        let (key, value) = match part.split_once('=') {
            Some(kv) => kv,
            None => return false,
        };
        if key.is_empty() || !key.chars().all(|c| c.is_ascii_uppercase()) {
            return false;
        }
        if value.is_empty()
            || !value
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == ',')
        {
            return false;
        }
        if key == "INTERVAL" {
            match value.parse::<u32>() {
                Ok(interval) if (1..=MAX_INTERVAL).contains(&interval) => {}
                _ => return false,
            }
        }
    }

    true
}
