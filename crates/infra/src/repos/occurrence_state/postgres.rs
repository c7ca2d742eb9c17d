use super::IOccurrenceStateRepo;
use beacon_domain::{OccurrenceState, ID};
use chrono::NaiveDate;
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresOccurrenceStateRepo {
    pool: PgPool,
}

impl PostgresOccurrenceStateRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct OccurrenceStateRaw {
    user_uid: Uuid,
    reminder_uid: Uuid,
    occurrence_date: NaiveDate,
    snoozed: bool,
    ignored: bool,
    completed: bool,
    actioned_at: Option<i64>,
}

impl From<OccurrenceStateRaw> for OccurrenceState {
    fn from(e: OccurrenceStateRaw) -> Self {
        Self {
            user_id: e.user_uid.into(),
            reminder_id: e.reminder_uid.into(),
            occurrence_date: e.occurrence_date,
            snoozed: e.snoozed,
            ignored: e.ignored,
            completed: e.completed,
            actioned_at: e.actioned_at,
        }
    }
}

#[async_trait::async_trait]
impl IOccurrenceStateRepo for PostgresOccurrenceStateRepo {
    async fn set_snoozed(
        &self,
        user_id: &ID,
        reminder_id: &ID,
        occurrence_date: NaiveDate,
        snoozed: bool,
    ) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reminder_occurrence_states
            (user_uid, reminder_uid, occurrence_date, snoozed)
            VALUES($1, $2, $3, $4)
            ON CONFLICT (user_uid, reminder_uid, occurrence_date)
            DO UPDATE SET snoozed = $4
            "#,
        )
        .bind(user_id.inner_ref())
        .bind(reminder_id.inner_ref())
        .bind(occurrence_date)
        .bind(snoozed)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn set_ignored(
        &self,
        user_id: &ID,
        reminder_id: &ID,
        occurrence_date: NaiveDate,
        ignored: bool,
        actioned_at: Option<i64>,
    ) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reminder_occurrence_states
            (user_uid, reminder_uid, occurrence_date, ignored, actioned_at)
            VALUES($1, $2, $3, $4, $5)
            ON CONFLICT (user_uid, reminder_uid, occurrence_date)
            DO UPDATE SET ignored = $4, actioned_at = $5
            "#,
        )
        .bind(user_id.inner_ref())
        .bind(reminder_id.inner_ref())
        .bind(occurrence_date)
        .bind(ignored)
        .bind(actioned_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn set_completed(
        &self,
        user_id: &ID,
        reminder_id: &ID,
        occurrence_date: NaiveDate,
        completed: bool,
        actioned_at: Option<i64>,
    ) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reminder_occurrence_states
            (user_uid, reminder_uid, occurrence_date, completed, actioned_at)
            VALUES($1, $2, $3, $4, $5)
            ON CONFLICT (user_uid, reminder_uid, occurrence_date)
            DO UPDATE SET completed = $4, actioned_at = $5
            "#,
        )
        .bind(user_id.inner_ref())
        .bind(reminder_id.inner_ref())
        .bind(occurrence_date)
        .bind(completed)
        .bind(actioned_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(
        &self,
        user_id: &ID,
        reminder_id: &ID,
        occurrence_date: NaiveDate,
    ) -> Option<OccurrenceState> {
        sqlx::query_as::<_, OccurrenceStateRaw>(
            r#"
            SELECT * FROM reminder_occurrence_states
            WHERE user_uid = $1 AND reminder_uid = $2 AND occurrence_date = $3
            "#,
        )
        .bind(user_id.inner_ref())
        .bind(reminder_id.inner_ref())
        .bind(occurrence_date)
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|s| s.into())
    }

    async fn find_history(&self, user_id: &ID, since: NaiveDate) -> Vec<OccurrenceState> {
        sqlx::query_as::<_, OccurrenceStateRaw>(
            r#"
            SELECT * FROM reminder_occurrence_states
            WHERE user_uid = $1
              AND occurrence_date >= $2
              AND (completed OR ignored)
            ORDER BY occurrence_date DESC
            "#,
        )
        .bind(user_id.inner_ref())
        .bind(since)
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|s| s.into())
        .collect()
    }
}
