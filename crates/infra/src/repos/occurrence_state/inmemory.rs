use super::IOccurrenceStateRepo;
use beacon_domain::{OccurrenceState, ID};
use chrono::NaiveDate;
use std::sync::Mutex;

pub struct InMemoryOccurrenceStateRepo {
    states: Mutex<Vec<OccurrenceState>>,
}

impl InMemoryOccurrenceStateRepo {
    pub fn new() -> Self {
        Self {
            states: Mutex::new(Vec::new()),
        }
    }

    fn upsert_with(
        &self,
        user_id: &ID,
        reminder_id: &ID,
        occurrence_date: NaiveDate,
        apply: impl FnOnce(&mut OccurrenceState),
    ) {
        let mut states = self.states.lock().unwrap();
        match states.iter_mut().find(|s| {
            s.user_id == *user_id
                && s.reminder_id == *reminder_id
                && s.occurrence_date == occurrence_date
        }) {
            Some(state) => apply(state),
            None => {
                let mut state =
                    OccurrenceState::clean(user_id.clone(), reminder_id.clone(), occurrence_date);
                apply(&mut state);
                states.push(state);
            }
        }
    }
}

#[async_trait::async_trait]
impl IOccurrenceStateRepo for InMemoryOccurrenceStateRepo {
    async fn set_snoozed(
        &self,
        user_id: &ID,
        reminder_id: &ID,
        occurrence_date: NaiveDate,
        snoozed: bool,
    ) -> anyhow::Result<()> {
        self.upsert_with(user_id, reminder_id, occurrence_date, |s| {
            s.snoozed = snoozed;
        });
        Ok(())
    }

    async fn set_ignored(
        &self,
        user_id: &ID,
        reminder_id: &ID,
        occurrence_date: NaiveDate,
        ignored: bool,
        actioned_at: Option<i64>,
    ) -> anyhow::Result<()> {
        self.upsert_with(user_id, reminder_id, occurrence_date, |s| {
            s.ignored = ignored;
            s.actioned_at = actioned_at;
        });
        Ok(())
    }

    async fn set_completed(
        &self,
        user_id: &ID,
        reminder_id: &ID,
        occurrence_date: NaiveDate,
        completed: bool,
        actioned_at: Option<i64>,
    ) -> anyhow::Result<()> {
        self.upsert_with(user_id, reminder_id, occurrence_date, |s| {
            s.completed = completed;
            s.actioned_at = actioned_at;
        });
        Ok(())
    }

    async fn find(
        &self,
        user_id: &ID,
        reminder_id: &ID,
        occurrence_date: NaiveDate,
    ) -> Option<OccurrenceState> {
        self.states
            .lock()
            .unwrap()
            .iter()
            .find(|s| {
                s.user_id == *user_id
                    && s.reminder_id == *reminder_id
                    && s.occurrence_date == occurrence_date
            })
            .cloned()
    }

    async fn find_history(&self, user_id: &ID, since: NaiveDate) -> Vec<OccurrenceState> {
        let mut history: Vec<OccurrenceState> = self
            .states
            .lock()
            .unwrap()
            .iter()
            .filter(|s| {
                s.user_id == *user_id
                    && s.occurrence_date >= since
                    && (s.completed || s.ignored)
            })
            .cloned()
            .collect();
        history.sort_by(|a, b| b.occurrence_date.cmp(&a.occurrence_date));
        history
    }
}
