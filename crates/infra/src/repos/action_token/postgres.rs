use super::IActionTokenRepo;
use beacon_domain::{ActionKind, EmailActionToken};
use chrono::NaiveDate;
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresActionTokenRepo {
    pool: PgPool,
}

impl PostgresActionTokenRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ActionTokenRaw {
    token: String,
    user_uid: Uuid,
    reminder_uid: Uuid,
    occurrence_date: NaiveDate,
    action: String,
    expires_at: i64,
    used_at: Option<i64>,
}

impl From<ActionTokenRaw> for EmailActionToken {
    fn from(e: ActionTokenRaw) -> Self {
        Self {
            token: e.token,
            user_id: e.user_uid.into(),
            reminder_id: e.reminder_uid.into(),
            occurrence_date: e.occurrence_date,
            // Unknown kinds cannot appear: the column is written from
            // ActionKind::to_string only.
            action: e.action.parse().unwrap_or(ActionKind::Ignore),
            expires_at: e.expires_at,
            used_at: e.used_at,
        }
    }
}

#[async_trait::async_trait]
impl IActionTokenRepo for PostgresActionTokenRepo {
    async fn insert(&self, token: &EmailActionToken) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO email_action_tokens
            (token, user_uid, reminder_uid, occurrence_date, action, expires_at, used_at)
            VALUES($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(&token.token)
        .bind(token.user_id.inner_ref())
        .bind(token.reminder_id.inner_ref())
        .bind(token.occurrence_date)
        .bind(token.action.to_string())
        .bind(token.expires_at)
        .bind(token.used_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, token: &str) -> Option<EmailActionToken> {
        sqlx::query_as::<_, ActionTokenRaw>(
            r#"
            SELECT * FROM email_action_tokens
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|t| t.into())
    }

    async fn consume(&self, token: &str, used_at: i64) -> anyhow::Result<bool> {
        // Conditional update, checked via affected rows, so that two
        // concurrent redemptions cannot both succeed.
        let res = sqlx::query(
            r#"
            UPDATE email_action_tokens
            SET used_at = $2
            WHERE token = $1 AND used_at IS NULL
            "#,
        )
        .bind(token)
        .bind(used_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("Unable to consume action token: {:?}", e);
            e
        })?;

        Ok(res.rows_affected() > 0)
    }
}
