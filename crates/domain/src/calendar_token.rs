use crate::shared::entity::ID;
use beacon_utils::create_random_secret;

const CALENDAR_TOKEN_LEN: usize = 48;

/// Per-user opaque secret granting read-only access to that user's calendar
/// feed. One live token per user; regenerating overwrites the previous value
/// so old subscription URLs stop working.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarToken {
    pub user_id: ID,
    pub token: String,
    pub created: i64,
}

impl CalendarToken {
    pub fn new(user_id: ID, now: i64) -> Self {
        Self {
            user_id,
            token: create_random_secret(CALENDAR_TOKEN_LEN),
            created: now,
        }
    }
}
