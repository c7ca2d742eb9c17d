mod action_token;
mod calendar_token;
mod document;
mod occurrence_state;
mod reminder;
mod send_log;
mod user;

pub use action_token::IActionTokenRepo;
use action_token::{InMemoryActionTokenRepo, PostgresActionTokenRepo};
pub use calendar_token::ICalendarTokenRepo;
use calendar_token::{InMemoryCalendarTokenRepo, PostgresCalendarTokenRepo};
pub use document::IDocumentRepo;
use document::{InMemoryDocumentRepo, PostgresDocumentRepo};
pub use occurrence_state::IOccurrenceStateRepo;
use occurrence_state::{InMemoryOccurrenceStateRepo, PostgresOccurrenceStateRepo};
pub use reminder::IReminderRepo;
use reminder::{InMemoryReminderRepo, PostgresReminderRepo};
pub use send_log::ISendLogRepo;
use send_log::{InMemorySendLogRepo, PostgresSendLogRepo};
pub use user::IUserRepo;
use user::{InMemoryUserRepo, PostgresUserRepo};

use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct Repos {
    pub reminders: Arc<dyn IReminderRepo>,
    pub occurrence_states: Arc<dyn IOccurrenceStateRepo>,
    pub send_logs: Arc<dyn ISendLogRepo>,
    pub action_tokens: Arc<dyn IActionTokenRepo>,
    pub calendar_tokens: Arc<dyn ICalendarTokenRepo>,
    pub users: Arc<dyn IUserRepo>,
    pub documents: Arc<dyn IDocumentRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");

        Ok(Self {
            reminders: Arc::new(PostgresReminderRepo::new(pool.clone())),
            occurrence_states: Arc::new(PostgresOccurrenceStateRepo::new(pool.clone())),
            send_logs: Arc::new(PostgresSendLogRepo::new(pool.clone())),
            action_tokens: Arc::new(PostgresActionTokenRepo::new(pool.clone())),
            calendar_tokens: Arc::new(PostgresCalendarTokenRepo::new(pool.clone())),
            users: Arc::new(PostgresUserRepo::new(pool.clone())),
            documents: Arc::new(PostgresDocumentRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            reminders: Arc::new(InMemoryReminderRepo::new()),
            occurrence_states: Arc::new(InMemoryOccurrenceStateRepo::new()),
            send_logs: Arc::new(InMemorySendLogRepo::new()),
            action_tokens: Arc::new(InMemoryActionTokenRepo::new()),
            calendar_tokens: Arc::new(InMemoryCalendarTokenRepo::new()),
            users: Arc::new(InMemoryUserRepo::new()),
            documents: Arc::new(InMemoryDocumentRepo::new()),
        }
    }
}
