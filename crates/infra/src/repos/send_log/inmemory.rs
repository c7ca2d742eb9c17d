use super::ISendLogRepo;
use beacon_domain::{EmailSendLog, ID};
use chrono::NaiveDate;
use std::sync::Mutex;

pub struct InMemorySendLogRepo {
    logs: Mutex<Vec<EmailSendLog>>,
}

impl InMemorySendLogRepo {
    pub fn new() -> Self {
        Self {
            logs: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl ISendLogRepo for InMemorySendLogRepo {
    async fn insert_once(&self, log: &EmailSendLog) -> anyhow::Result<bool> {
        let mut logs = self.logs.lock().unwrap();
        let exists = logs.iter().any(|l| {
            l.user_id == log.user_id
                && l.reminder_id == log.reminder_id
                && l.occurrence_date == log.occurrence_date
        });
        if exists {
            return Ok(false);
        }
        logs.push(log.clone());
        Ok(true)
    }

    async fn exists(
        &self,
        user_id: &ID,
        reminder_id: &ID,
        occurrence_date: NaiveDate,
    ) -> bool {
        self.logs.lock().unwrap().iter().any(|l| {
            l.user_id == *user_id
                && l.reminder_id == *reminder_id
                && l.occurrence_date == occurrence_date
        })
    }
}
