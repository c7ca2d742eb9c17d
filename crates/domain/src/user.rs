use crate::shared::entity::{Entity, ID};
use chrono_tz::Tz;

/// A hub user as seen by the reminder core: identity plus the notification
/// preferences the scheduler filters on. Profile management lives outside
/// this service.
#[derive(Debug, Clone)]
pub struct User {
    pub id: ID,
    pub email: Option<String>,
    pub timezone: Tz,
    pub email_notifications: bool,
}

impl User {
    pub fn new(id: ID) -> Self {
        Self {
            id,
            email: None,
            timezone: chrono_tz::UTC,
            email_notifications: false,
        }
    }
}

impl Entity for User {
    fn id(&self) -> &ID {
        &self.id
    }
}
