use super::IReminderRepo;
use beacon_domain::{Reminder, ID};
use chrono::NaiveDate;
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresReminderRepo {
    pool: PgPool,
}

impl PostgresReminderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderRaw {
    reminder_uid: Uuid,
    owner_uid: Uuid,
    title: String,
    description: Option<String>,
    rrule: Option<String>,
    next_due: NaiveDate,
    advance_notice_days: i64,
    document_uid: Option<Uuid>,
    is_global: bool,
    created: i64,
    updated: i64,
}

impl From<ReminderRaw> for Reminder {
    fn from(e: ReminderRaw) -> Self {
        Self {
            id: e.reminder_uid.into(),
            owner_id: e.owner_uid.into(),
            title: e.title,
            description: e.description,
            rrule: e.rrule,
            next_due: e.next_due,
            advance_notice_days: e.advance_notice_days,
            document_id: e.document_uid.map(|uid| uid.into()),
            is_global: e.is_global,
            created: e.created,
            updated: e.updated,
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for PostgresReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reminders
            (reminder_uid, owner_uid, title, description, rrule, next_due,
             advance_notice_days, document_uid, is_global, created, updated)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(reminder.id.inner_ref())
        .bind(reminder.owner_id.inner_ref())
        .bind(&reminder.title)
        .bind(&reminder.description)
        .bind(&reminder.rrule)
        .bind(reminder.next_due)
        .bind(reminder.advance_notice_days)
        .bind(reminder.document_id.as_ref().map(|id| *id.inner_ref()))
        .bind(reminder.is_global)
        .bind(reminder.created)
        .bind(reminder.updated)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE reminders
            SET title = $2,
                description = $3,
                rrule = $4,
                next_due = $5,
                advance_notice_days = $6,
                document_uid = $7,
                is_global = $8,
                updated = $9
            WHERE reminder_uid = $1
            "#,
        )
        .bind(reminder.id.inner_ref())
        .bind(&reminder.title)
        .bind(&reminder.description)
        .bind(&reminder.rrule)
        .bind(reminder.next_due)
        .bind(reminder.advance_notice_days)
        .bind(reminder.document_id.as_ref().map(|id| *id.inner_ref()))
        .bind(reminder.is_global)
        .bind(reminder.updated)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("Unable to update reminder: {:?}", e);
            e
        })?;

        Ok(())
    }

    async fn find(&self, reminder_id: &ID) -> Option<Reminder> {
        sqlx::query_as::<_, ReminderRaw>(
            r#"
            SELECT * FROM reminders
            WHERE reminder_uid = $1
            "#,
        )
        .bind(reminder_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|r| r.into())
    }

    async fn find_many(&self, reminder_ids: &[ID]) -> Vec<Reminder> {
        let ids: Vec<Uuid> = reminder_ids.iter().map(|id| *id.inner_ref()).collect();
        sqlx::query_as::<_, ReminderRaw>(
            r#"
            SELECT * FROM reminders
            WHERE reminder_uid = ANY($1)
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|r| r.into())
        .collect()
    }

    async fn find_visible_to(&self, user_id: &ID) -> Vec<Reminder> {
        sqlx::query_as::<_, ReminderRaw>(
            r#"
            SELECT * FROM reminders
            WHERE owner_uid = $1 OR is_global
            ORDER BY next_due, title
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|r| r.into())
        .collect()
    }

    async fn delete(&self, reminder_id: &ID) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            DELETE FROM reminders
            WHERE reminder_uid = $1
            "#,
        )
        .bind(reminder_id.inner_ref())
        .execute(&self.pool)
        .await
        .map(|_| ())
        .map_err(anyhow::Error::new)
    }
}
