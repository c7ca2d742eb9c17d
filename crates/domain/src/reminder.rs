use crate::recurrence::{validate_rrule, RecurrenceRule};
use crate::shared::entity::{Entity, ID};
use chrono::NaiveDate;
use thiserror::Error;

pub const MAX_TITLE_LEN: usize = 100;
pub const MAX_DESCRIPTION_LEN: usize = 500;
pub const MAX_ADVANCE_NOTICE_DAYS: i64 = 365;

/// A recurring or one-time obligation surfaced on the hub dashboard.
///
/// `next_due` always points at the single live occurrence of the reminder.
/// Resolving that occurrence (ignore or complete) moves `next_due` forward
/// through the recurrence rule; per-user state for the old date stays behind
/// as history.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub id: ID,
    /// The `User` that created this reminder. Global reminders keep their
    /// creator but are visible to everyone.
    pub owner_id: ID,
    pub title: String,
    pub description: Option<String>,
    /// Stored rrule string, e.g. `FREQ=MONTHLY;INTERVAL=3`. `None` for
    /// one-time reminders.
    pub rrule: Option<String>,
    /// The calendar date of the current unresolved occurrence.
    pub next_due: NaiveDate,
    /// Days before `next_due` during which the reminder counts as upcoming.
    pub advance_notice_days: i64,
    /// Optional link to a hub document.
    pub document_id: Option<ID>,
    /// Global reminders are visible to every user, not just the owner.
    pub is_global: bool,
    pub created: i64,
    pub updated: i64,
}

impl Reminder {
    pub fn new(owner_id: ID, title: String, next_due: NaiveDate, now: i64) -> Self {
        Self {
            id: Default::default(),
            owner_id,
            title,
            description: None,
            rrule: None,
            next_due,
            advance_notice_days: 0,
            document_id: None,
            is_global: false,
            created: now,
            updated: now,
        }
    }

    /// The parsed recurrence rule, if the stored rrule string carries a
    /// recognized FREQ token.
    pub fn recurrence(&self) -> Option<RecurrenceRule> {
        self.rrule.as_deref().and_then(RecurrenceRule::parse)
    }

    /// Advances `next_due` through the recurrence rule. Returns `false` for
    /// one-time reminders, which stay at their fixed date.
    pub fn advance(&mut self) -> bool {
        let next = self
            .recurrence()
            .and_then(|rule| rule.next_occurrence(self.next_due));
        match next {
            Some(next_due) => {
                self.next_due = next_due;
                true
            }
            None => false,
        }
    }

    pub fn validate(&self) -> Result<(), ReminderValidationError> {
        validate_title(&self.title)?;
        if let Some(description) = &self.description {
            validate_description(description)?;
        }
        if let Some(rrule) = &self.rrule {
            validate_rrule_field(rrule)?;
        }
        validate_advance_notice_days(self.advance_notice_days)?;
        Ok(())
    }
}

impl Entity for Reminder {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum ReminderValidationError {
    #[error("title must be between 1 and {MAX_TITLE_LEN} characters")]
    InvalidTitle,
    #[error("description must be at most {MAX_DESCRIPTION_LEN} characters")]
    InvalidDescription,
    #[error("rrule: `{0}` is not a supported recurrence rule")]
    InvalidRecurrenceRule(String),
    #[error("advanceNoticeDays: {0} must be between 0 and {MAX_ADVANCE_NOTICE_DAYS}")]
    InvalidAdvanceNoticeDays(i64),
}

pub fn validate_title(title: &str) -> Result<(), ReminderValidationError> {
    if title.trim().is_empty() || title.chars().count() > MAX_TITLE_LEN {
        return Err(ReminderValidationError::InvalidTitle);
    }
    Ok(())
}

pub fn validate_description(description: &str) -> Result<(), ReminderValidationError> {
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(ReminderValidationError::InvalidDescription);
    }
    Ok(())
}

pub fn validate_rrule_field(rrule: &str) -> Result<(), ReminderValidationError> {
    if !validate_rrule(rrule) {
        return Err(ReminderValidationError::InvalidRecurrenceRule(
            rrule.to_string(),
        ));
    }
    Ok(())
}

pub fn validate_advance_notice_days(days: i64) -> Result<(), ReminderValidationError> {
    if !(0..=MAX_ADVANCE_NOTICE_DAYS).contains(&days) {
        return Err(ReminderValidationError::InvalidAdvanceNoticeDays(days));
    }
    Ok(())
}

/// Per `(user, reminder, occurrence_date)` action flags.
///
/// A row only affects visibility while `occurrence_date` equals the
/// reminder's current `next_due`; once the reminder advances, the row is
/// pure history. The three flags are stored independently; the documented
/// transitions never set more than one of `ignored`/`completed` for the
/// same occurrence.
#[derive(Debug, Clone, PartialEq)]
pub struct OccurrenceState {
    pub user_id: ID,
    pub reminder_id: ID,
    pub occurrence_date: NaiveDate,
    pub snoozed: bool,
    pub ignored: bool,
    pub completed: bool,
    pub actioned_at: Option<i64>,
}

impl OccurrenceState {
    pub fn clean(user_id: ID, reminder_id: ID, occurrence_date: NaiveDate) -> Self {
        Self {
            user_id,
            reminder_id,
            occurrence_date,
            snoozed: false,
            ignored: false,
            completed: false,
            actioned_at: None,
        }
    }
}
