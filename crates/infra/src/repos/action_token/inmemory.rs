use super::IActionTokenRepo;
use beacon_domain::EmailActionToken;
use std::sync::Mutex;

pub struct InMemoryActionTokenRepo {
    tokens: Mutex<Vec<EmailActionToken>>,
}

impl InMemoryActionTokenRepo {
    pub fn new() -> Self {
        Self {
            tokens: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IActionTokenRepo for InMemoryActionTokenRepo {
    async fn insert(&self, token: &EmailActionToken) -> anyhow::Result<()> {
        self.tokens.lock().unwrap().push(token.clone());
        Ok(())
    }

    async fn find(&self, token: &str) -> Option<EmailActionToken> {
        self.tokens
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.token == token)
            .cloned()
    }

    async fn consume(&self, token: &str, used_at: i64) -> anyhow::Result<bool> {
        // The mutex makes check-and-mark atomic, mirroring the conditional
        // update in the postgres repo.
        let mut tokens = self.tokens.lock().unwrap();
        match tokens
            .iter_mut()
            .find(|t| t.token == token && t.used_at.is_none())
        {
            Some(t) => {
                t.used_at = Some(used_at);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
