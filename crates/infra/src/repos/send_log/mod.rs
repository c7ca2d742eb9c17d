mod inmemory;
mod postgres;

pub use inmemory::InMemorySendLogRepo;
pub use postgres::PostgresSendLogRepo;

use beacon_domain::{EmailSendLog, ID};
use chrono::NaiveDate;

/// Idempotence ledger for notification emails. Write-once per
/// `(user, reminder, occurrence_date)`.
#[async_trait::async_trait]
pub trait ISendLogRepo: Send + Sync {
    /// Inserts the row unless one already exists for its key. Returns
    /// whether a row was written.
    async fn insert_once(&self, log: &EmailSendLog) -> anyhow::Result<bool>;

    async fn exists(
        &self,
        user_id: &ID,
        reminder_id: &ID,
        occurrence_date: NaiveDate,
    ) -> bool;
}
