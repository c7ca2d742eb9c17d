use super::IReminderRepo;
use beacon_domain::{Reminder, ID};
use std::sync::Mutex;

pub struct InMemoryReminderRepo {
    reminders: Mutex<Vec<Reminder>>,
}

impl InMemoryReminderRepo {
    pub fn new() -> Self {
        Self {
            reminders: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        self.reminders.lock().unwrap().push(reminder.clone());
        Ok(())
    }

    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()> {
        let mut reminders = self.reminders.lock().unwrap();
        if let Some(existing) = reminders.iter_mut().find(|r| r.id == reminder.id) {
            *existing = reminder.clone();
        }
        Ok(())
    }

    async fn find(&self, reminder_id: &ID) -> Option<Reminder> {
        self.reminders
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == *reminder_id)
            .cloned()
    }

    async fn find_many(&self, reminder_ids: &[ID]) -> Vec<Reminder> {
        self.reminders
            .lock()
            .unwrap()
            .iter()
            .filter(|r| reminder_ids.contains(&r.id))
            .cloned()
            .collect()
    }

    async fn find_visible_to(&self, user_id: &ID) -> Vec<Reminder> {
        let mut visible: Vec<Reminder> = self
            .reminders
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.is_global || r.owner_id == *user_id)
            .cloned()
            .collect();
        visible.sort_by(|a, b| (a.next_due, &a.title).cmp(&(b.next_due, &b.title)));
        visible
    }

    async fn delete(&self, reminder_id: &ID) -> anyhow::Result<()> {
        self.reminders
            .lock()
            .unwrap()
            .retain(|r| r.id != *reminder_id);
        Ok(())
    }
}
