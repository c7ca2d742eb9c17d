mod inmemory;
mod postgres;

pub use inmemory::InMemoryCalendarTokenRepo;
pub use postgres::PostgresCalendarTokenRepo;

use beacon_domain::{CalendarToken, ID};

/// One live feed token per user; upserting overwrites the previous value so
/// regeneration invalidates old subscription URLs.
#[async_trait::async_trait]
pub trait ICalendarTokenRepo: Send + Sync {
    async fn upsert(&self, token: &CalendarToken) -> anyhow::Result<()>;
    async fn find_by_user(&self, user_id: &ID) -> Option<CalendarToken>;
    async fn find_by_token(&self, token: &str) -> Option<CalendarToken>;
}
