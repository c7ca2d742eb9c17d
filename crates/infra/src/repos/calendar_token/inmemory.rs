use super::ICalendarTokenRepo;
use beacon_domain::{CalendarToken, ID};
use std::sync::Mutex;

pub struct InMemoryCalendarTokenRepo {
    tokens: Mutex<Vec<CalendarToken>>,
}

impl InMemoryCalendarTokenRepo {
    pub fn new() -> Self {
        Self {
            tokens: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl ICalendarTokenRepo for InMemoryCalendarTokenRepo {
    async fn upsert(&self, token: &CalendarToken) -> anyhow::Result<()> {
        let mut tokens = self.tokens.lock().unwrap();
        tokens.retain(|t| t.user_id != token.user_id);
        tokens.push(token.clone());
        Ok(())
    }

    async fn find_by_user(&self, user_id: &ID) -> Option<CalendarToken> {
        self.tokens
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.user_id == *user_id)
            .cloned()
    }

    async fn find_by_token(&self, token: &str) -> Option<CalendarToken> {
        self.tokens
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.token == token)
            .cloned()
    }
}
