use crate::document::Document;
use crate::reminder::Reminder;
use chrono::{DateTime, Days, NaiveDate, TimeZone, Utc};

const MAX_LINE_OCTETS: usize = 75;

/// A reminder plus its joined document, ready to be rendered as a VEVENT.
#[derive(Debug)]
pub struct FeedEntry {
    pub reminder: Reminder,
    pub document: Option<Document>,
}

/// Renders an RFC 5545 VCALENDAR with one all-day VEVENT per reminder.
///
/// Output uses CRLF line endings (with a trailing CRLF) and folds lines
/// longer than 75 octets. `generated_at` is the DTSTAMP fallback for
/// reminders without a last-updated timestamp.
pub fn render_calendar_feed(entries: &[FeedEntry], generated_at: DateTime<Utc>) -> String {
    let mut lines: Vec<String> = vec![
        "BEGIN:VCALENDAR".into(),
        "VERSION:2.0".into(),
        "PRODID:-//Beacon//Reminder Feed//EN".into(),
        "CALSCALE:GREGORIAN".into(),
    ];

    for entry in entries {
        push_event_lines(&mut lines, entry, generated_at);
    }

    lines.push("END:VCALENDAR".into());

    let mut out = String::new();
    for line in lines {
        for folded in fold_line(&line) {
            out.push_str(&folded);
            out.push_str("\r\n");
        }
    }
    out
}

fn push_event_lines(lines: &mut Vec<String>, entry: &FeedEntry, generated_at: DateTime<Utc>) {
    let reminder = &entry.reminder;
    let dtstamp = Utc
        .timestamp_millis_opt(reminder.updated)
        .single()
        .filter(|_| reminder.updated > 0)
        .unwrap_or(generated_at);
    let dtend = reminder
        .next_due
        .checked_add_days(Days::new(1))
        .unwrap_or(reminder.next_due);

    lines.push("BEGIN:VEVENT".into());
    lines.push(format!("UID:{}@beacon", reminder.id));
    lines.push(format!("DTSTAMP:{}", format_utc_datetime(&dtstamp)));
    lines.push(format!(
        "DTSTART;VALUE=DATE:{}",
        format_date(reminder.next_due)
    ));
    lines.push(format!("DTEND;VALUE=DATE:{}", format_date(dtend)));
    lines.push(format!("SUMMARY:{}", escape_text(&reminder.title)));

    let mut description = reminder.description.clone().unwrap_or_default();
    if let Some(document) = &entry.document {
        if !description.is_empty() {
            description.push('\n');
        }
        description.push_str(&format!("Document: {} ({})", document.title, document.slug));
    }
    if !description.is_empty() {
        lines.push(format!("DESCRIPTION:{}", escape_text(&description)));
    }

    if let Some(rrule) = &reminder.rrule {
        lines.push(format!("RRULE:{}", rrule));
    }

    if reminder.advance_notice_days > 0 {
        lines.push("BEGIN:VALARM".into());
        lines.push(format!("TRIGGER:-P{}D", reminder.advance_notice_days));
        lines.push("ACTION:DISPLAY".into());
        lines.push(format!("DESCRIPTION:{}", escape_text(&reminder.title)));
        lines.push("END:VALARM".into());
    }

    lines.push("END:VEVENT".into());
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

fn format_utc_datetime(dt: &DateTime<Utc>) -> String {
    dt.format("%Y%m%dT%H%M%SZ").to_string()
}

/// RFC 5545 TEXT escaping: backslash, semicolon, comma and newline.
fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            ';' => escaped.push_str("\\;"),
            ',' => escaped.push_str("\\,"),
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            c => escaped.push(c),
        }
    }
    escaped
}

/// Folds a content line into chunks of at most 75 octets; continuation
/// lines carry a single leading space that counts against their budget.
fn fold_line(line: &str) -> Vec<String> {
    if line.len() <= MAX_LINE_OCTETS {
        return vec![line.to_string()];
    }

    let mut parts = Vec::new();
    let mut rest = line;
    let mut first = true;
    while !rest.is_empty() {
        let budget = if first {
            MAX_LINE_OCTETS
        } else {
            MAX_LINE_OCTETS - 1
        };
        let mut split = budget.min(rest.len());
        while !rest.is_char_boundary(split) {
            split -= 1;
        }
        let (chunk, remainder) = rest.split_at(split);
        if first {
            parts.push(chunk.to_string());
        } else {
            parts.push(format!(" {}", chunk));
        }
        rest = remainder;
        first = false;
    }
    parts
}
