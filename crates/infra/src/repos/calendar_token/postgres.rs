use super::ICalendarTokenRepo;
use beacon_domain::{CalendarToken, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresCalendarTokenRepo {
    pool: PgPool,
}

impl PostgresCalendarTokenRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CalendarTokenRaw {
    user_uid: Uuid,
    token: String,
    created: i64,
}

impl From<CalendarTokenRaw> for CalendarToken {
    fn from(e: CalendarTokenRaw) -> Self {
        Self {
            user_id: e.user_uid.into(),
            token: e.token,
            created: e.created,
        }
    }
}

#[async_trait::async_trait]
impl ICalendarTokenRepo for PostgresCalendarTokenRepo {
    async fn upsert(&self, token: &CalendarToken) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO calendar_tokens(user_uid, token, created)
            VALUES($1, $2, $3)
            ON CONFLICT (user_uid)
            DO UPDATE SET token = $2, created = $3
            "#,
        )
        .bind(token.user_id.inner_ref())
        .bind(&token.token)
        .bind(token.created)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_user(&self, user_id: &ID) -> Option<CalendarToken> {
        sqlx::query_as::<_, CalendarTokenRaw>(
            r#"
            SELECT * FROM calendar_tokens
            WHERE user_uid = $1
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|t| t.into())
    }

    async fn find_by_token(&self, token: &str) -> Option<CalendarToken> {
        sqlx::query_as::<_, CalendarTokenRaw>(
            r#"
            SELECT * FROM calendar_tokens
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
}
