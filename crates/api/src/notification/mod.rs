pub mod send_due_notifications;
pub mod templates;
