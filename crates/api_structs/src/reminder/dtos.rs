use beacon_domain::{Document, DueStatus, OccurrenceState, Reminder, ID};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDTO {
    pub id: ID,
    pub owner_id: ID,
    pub title: String,
    pub description: Option<String>,
    pub rrule: Option<String>,
    pub next_due: NaiveDate,
    pub advance_notice_days: i64,
    pub document_id: Option<ID>,
    pub is_global: bool,
    pub created: i64,
    pub updated: i64,
}

impl ReminderDTO {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            id: reminder.id.clone(),
            owner_id: reminder.owner_id.clone(),
            title: reminder.title,
            description: reminder.description,
            rrule: reminder.rrule,
            next_due: reminder.next_due,
            advance_notice_days: reminder.advance_notice_days,
            document_id: reminder.document_id.clone(),
            is_global: reminder.is_global,
            created: reminder.created,
            updated: reminder.updated,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDTO {
    pub id: ID,
    pub title: String,
    pub slug: String,
}

impl DocumentDTO {
    pub fn new(document: Document) -> Self {
        Self {
            id: document.id.clone(),
            title: document.title,
            slug: document.slug,
        }
    }
}

/// A reminder joined with the requesting user's per occurrence flags and
/// its computed due status.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReminderWithStateDTO {
    pub reminder: ReminderDTO,
    pub due_status: DueStatus,
    pub snoozed: bool,
    pub ignored: bool,
    pub completed: bool,
    pub document: Option<DocumentDTO>,
}

impl ReminderWithStateDTO {
    pub fn new(
        reminder: Reminder,
        due_status: DueStatus,
        state: Option<OccurrenceState>,
        document: Option<Document>,
    ) -> Self {
        let (snoozed, ignored, completed) = state
            .map(|s| (s.snoozed, s.ignored, s.completed))
            .unwrap_or((false, false, false));
        Self {
            reminder: ReminderDTO::new(reminder),
            due_status,
            snoozed,
            ignored,
            completed,
            document: document.map(DocumentDTO::new),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntryDTO {
    pub reminder: ReminderDTO,
    pub occurrence_date: NaiveDate,
    pub completed: bool,
    pub ignored: bool,
    pub actioned_at: Option<i64>,
}

impl HistoryEntryDTO {
    pub fn new(reminder: Reminder, state: OccurrenceState) -> Self {
        Self {
            reminder: ReminderDTO::new(reminder),
            occurrence_date: state.occurrence_date,
            completed: state.completed,
            ignored: state.ignored,
            actioned_at: state.actioned_at,
        }
    }
}
