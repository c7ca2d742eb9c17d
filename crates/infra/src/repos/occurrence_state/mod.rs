mod inmemory;
mod postgres;

pub use inmemory::InMemoryOccurrenceStateRepo;
pub use postgres::PostgresOccurrenceStateRepo;

use beacon_domain::{OccurrenceState, ID};
use chrono::NaiveDate;

/// Per `(user, reminder, occurrence_date)` action flags.
///
/// Every mutation is a single upsert that touches only its own columns, so
/// concurrent duplicate requests converge instead of racing. Rows are never
/// deleted; old occurrence dates stay behind as history.
#[async_trait::async_trait]
pub trait IOccurrenceStateRepo: Send + Sync {
    async fn set_snoozed(
        &self,
        user_id: &ID,
        reminder_id: &ID,
        occurrence_date: NaiveDate,
        snoozed: bool,
    ) -> anyhow::Result<()>;

    async fn set_ignored(
        &self,
        user_id: &ID,
        reminder_id: &ID,
        occurrence_date: NaiveDate,
        ignored: bool,
        actioned_at: Option<i64>,
    ) -> anyhow::Result<()>;

    async fn set_completed(
        &self,
        user_id: &ID,
        reminder_id: &ID,
        occurrence_date: NaiveDate,
        completed: bool,
        actioned_at: Option<i64>,
    ) -> anyhow::Result<()>;

    async fn find(
        &self,
        user_id: &ID,
        reminder_id: &ID,
        occurrence_date: NaiveDate,
    ) -> Option<OccurrenceState>;

    /// Completed or ignored occurrences for a user since the given date.
    async fn find_history(&self, user_id: &ID, since: NaiveDate) -> Vec<OccurrenceState>;
}
