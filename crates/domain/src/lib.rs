mod calendar_token;
mod date;
mod document;
mod due_window;
mod ical;
mod notification;
mod recurrence;
mod reminder;
mod shared;
mod timezone;
mod user;

pub use calendar_token::CalendarToken;
pub use date::parse_calendar_date;
pub use document::Document;
pub use due_window::{classify_due_status, DueStatus};
pub use ical::{render_calendar_feed, FeedEntry};
pub use notification::{ActionKind, EmailActionToken, EmailSendLog, ACTION_TOKEN_TTL_DAYS};
pub use recurrence::{validate_rrule, Frequency, RecurrenceRule};
pub use reminder::{
    validate_advance_notice_days, validate_description, validate_rrule_field, validate_title,
    OccurrenceState, Reminder, ReminderValidationError, MAX_ADVANCE_NOTICE_DAYS,
    MAX_DESCRIPTION_LEN, MAX_TITLE_LEN,
};
pub use shared::entity::{Entity, ID};
pub use timezone::timezones_at_local_hour;
pub use user::User;
