use super::ISendLogRepo;
use beacon_domain::{EmailSendLog, ID};
use chrono::NaiveDate;
use sqlx::PgPool;

pub struct PostgresSendLogRepo {
    pool: PgPool,
}

impl PostgresSendLogRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ISendLogRepo for PostgresSendLogRepo {
    async fn insert_once(&self, log: &EmailSendLog) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            INSERT INTO reminder_send_log
            (user_uid, reminder_uid, occurrence_date, sent_at)
            VALUES($1, $2, $3, $4)
            ON CONFLICT (user_uid, reminder_uid, occurrence_date) DO NOTHING
            "#,
        )
        .bind(log.user_id.inner_ref())
        .bind(log.reminder_id.inner_ref())
        .bind(log.occurrence_date)
        .bind(log.sent_at)
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected() > 0)
    }

    async fn exists(
        &self,
        user_id: &ID,
        reminder_id: &ID,
        occurrence_date: NaiveDate,
    ) -> bool {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM reminder_send_log
            WHERE user_uid = $1 AND reminder_uid = $2 AND occurrence_date = $3
            "#,
        )
        .bind(user_id.inner_ref())
        .bind(reminder_id.inner_ref())
        .bind(occurrence_date)
        .fetch_one(&self.pool)
        .await
        .map(|count| count > 0)
        .unwrap_or(false)
    }
}
