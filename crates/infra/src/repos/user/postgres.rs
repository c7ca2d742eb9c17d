use super::IUserRepo;
use beacon_domain::{User, ID};
use chrono_tz::Tz;
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresUserRepo {
    pool: PgPool,
}

impl PostgresUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRaw {
    user_uid: Uuid,
    email: Option<String>,
    timezone: String,
    email_notifications: bool,
}

impl From<UserRaw> for User {
    fn from(e: UserRaw) -> Self {
        Self {
            id: e.user_uid.into(),
            email: e.email,
            timezone: e.timezone.parse().unwrap_or(chrono_tz::UTC),
            email_notifications: e.email_notifications,
        }
    }
}

#[async_trait::async_trait]
impl IUserRepo for PostgresUserRepo {
    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users(user_uid, email, timezone, email_notifications)
            VALUES($1, $2, $3, $4)
            "#,
        )
        .bind(user.id.inner_ref())
        .bind(&user.email)
        .bind(user.timezone.name())
        .bind(user.email_notifications)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn save(&self, user: &User) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET email = $2,
                timezone = $3,
                email_notifications = $4
            WHERE user_uid = $1
            "#,
        )
        .bind(user.id.inner_ref())
        .bind(&user.email)
        .bind(user.timezone.name())
        .bind(user.email_notifications)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, user_id: &ID) -> Option<User> {
        sqlx::query_as::<_, UserRaw>(
            r#"
            SELECT * FROM users
            WHERE user_uid = $1
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|u| u.into())
    }

    async fn find_notifiable_by_timezones(&self, timezones: &[Tz]) -> Vec<User> {
        let names: Vec<String> = timezones.iter().map(|tz| tz.name().to_string()).collect();
        sqlx::query_as::<_, UserRaw>(
            r#"
            SELECT * FROM users
            WHERE timezone = ANY($1)
              AND email_notifications
              AND email IS NOT NULL
            "#,
        )
        .bind(&names)
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|u| u.into())
        .collect()
    }
}
