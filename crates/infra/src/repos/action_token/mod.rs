mod inmemory;
mod postgres;

pub use inmemory::InMemoryActionTokenRepo;
pub use postgres::PostgresActionTokenRepo;

use beacon_domain::EmailActionToken;

#[async_trait::async_trait]
pub trait IActionTokenRepo: Send + Sync {
    async fn insert(&self, token: &EmailActionToken) -> anyhow::Result<()>;
    async fn find(&self, token: &str) -> Option<EmailActionToken>;
    /// Marks the token used, but only if it has not been used yet. Returns
    /// whether this call won the race; a second concurrent redemption gets
    /// `false`.
    async fn consume(&self, token: &str, used_at: i64) -> anyhow::Result<bool>;
}

#[cfg(test)]
mod test {
    use super::*;
    use beacon_domain::{ActionKind, ID};
    use chrono::NaiveDate;

    #[tokio::test]
    async fn a_token_can_be_consumed_exactly_once() {
        let repo = InMemoryActionTokenRepo::new();
        let token = EmailActionToken::new(
            ID::new(),
            ID::new(),
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            ActionKind::Snooze,
        );
        repo.insert(&token).await.unwrap();

        assert!(repo.consume(&token.token, 10).await.unwrap());
        assert!(!repo.consume(&token.token, 11).await.unwrap());

        let stored = repo.find(&token.token).await.unwrap();
        assert_eq!(stored.used_at, Some(10));
    }

    #[tokio::test]
    async fn consuming_an_unknown_token_does_nothing() {
        let repo = InMemoryActionTokenRepo::new();
        assert!(!repo.consume("missing", 10).await.unwrap());
    }
}
