mod inmemory;
mod postgres;

pub use inmemory::InMemoryUserRepo;
pub use postgres::PostgresUserRepo;

use beacon_domain::{User, ID};
use chrono_tz::Tz;

#[async_trait::async_trait]
pub trait IUserRepo: Send + Sync {
    async fn insert(&self, user: &User) -> anyhow::Result<()>;
    async fn save(&self, user: &User) -> anyhow::Result<()>;
    async fn find(&self, user_id: &ID) -> Option<User>;
    /// Users in any of the given timezones that have opted in to email
    /// notifications and have an email address on file.
    async fn find_notifiable_by_timezones(&self, timezones: &[Tz]) -> Vec<User>;
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn timezone_lookup_filters_on_opt_in_and_email() {
        let repo = InMemoryUserRepo::new();

        let mut opted_in = User::new(ID::new());
        opted_in.email = Some("a@example.com".into());
        opted_in.email_notifications = true;
        opted_in.timezone = chrono_tz::Europe::Berlin;

        let mut no_email = User::new(ID::new());
        no_email.email_notifications = true;
        no_email.timezone = chrono_tz::Europe::Berlin;

        let mut opted_out = User::new(ID::new());
        opted_out.email = Some("b@example.com".into());
        opted_out.timezone = chrono_tz::Europe::Berlin;

        let mut other_zone = User::new(ID::new());
        other_zone.email = Some("c@example.com".into());
        other_zone.email_notifications = true;
        other_zone.timezone = chrono_tz::Asia::Tokyo;

        for user in [&opted_in, &no_email, &opted_out, &other_zone] {
            repo.insert(user).await.unwrap();
        }

        let found = repo
            .find_notifiable_by_timezones(&[chrono_tz::Europe::Berlin])
            .await;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, opted_in.id);
    }
}
