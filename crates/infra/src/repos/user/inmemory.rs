use super::IUserRepo;
use beacon_domain::{User, ID};
use chrono_tz::Tz;
use std::sync::Mutex;

pub struct InMemoryUserRepo {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IUserRepo for InMemoryUserRepo {
    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        self.users.lock().unwrap().push(user.clone());
        Ok(())
    }

    async fn save(&self, user: &User) -> anyhow::Result<()> {
        let mut users = self.users.lock().unwrap();
        if let Some(existing) = users.iter_mut().find(|u| u.id == user.id) {
            *existing = user.clone();
        }
        Ok(())
    }

    async fn find(&self, user_id: &ID) -> Option<User> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == *user_id)
            .cloned()
    }

    async fn find_notifiable_by_timezones(&self, timezones: &[Tz]) -> Vec<User> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| {
                u.email_notifications && u.email.is_some() && timezones.contains(&u.timezone)
            })
            .cloned()
            .collect()
    }
}
