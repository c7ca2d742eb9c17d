use beacon_domain::{Document, DueStatus, Reminder};

/// Escapes user-controlled text before it is interpolated into HTML.
/// Action URLs are minted by us and inserted verbatim so they stay valid
/// hrefs.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub struct ReminderEmailParams<'a> {
    pub reminder: &'a Reminder,
    pub document: Option<&'a Document>,
    pub due_status: DueStatus,
    pub snooze_url: String,
    pub ignore_url: String,
    pub document_url: Option<String>,
}

pub fn render_subject(params: &ReminderEmailParams) -> String {
    let lead = match params.due_status {
        DueStatus::DueToday => "Due today",
        DueStatus::PastDue => "Past due",
        _ => "Upcoming",
    };
    format!("{}: {}", lead, params.reminder.title)
}

pub fn render_html_body(params: &ReminderEmailParams) -> String {
    let title = escape_html(&params.reminder.title);
    let mut body = format!(
        "<html><body>\
         <h2>{}</h2>\
         <p>Due on <strong>{}</strong></p>",
        title, params.reminder.next_due
    );

    if let Some(description) = &params.reminder.description {
        body.push_str(&format!("<p>{}</p>", escape_html(description)));
    }

    if let (Some(document), Some(url)) = (params.document, &params.document_url) {
        body.push_str(&format!(
            "<p>Related document: <a href=\"{}\">{}</a></p>",
            url,
            escape_html(&document.title)
        ));
    }

    body.push_str(&format!(
        "<p>\
         <a href=\"{}\">Snooze</a> &nbsp; \
         <a href=\"{}\">Ignore</a>\
         </p>",
        params.snooze_url, params.ignore_url
    ));
    body.push_str("</body></html>");
    body
}

pub fn render_text_body(params: &ReminderEmailParams) -> String {
    let mut body = format!(
        "{}\nDue on {}\n",
        params.reminder.title, params.reminder.next_due
    );
    if let Some(description) = &params.reminder.description {
        body.push_str(description);
        body.push('\n');
    }
    if let (Some(document), Some(url)) = (params.document, &params.document_url) {
        body.push_str(&format!("Related document: {} ({})\n", document.title, url));
    }
    body.push_str(&format!(
        "\nSnooze: {}\nIgnore: {}\n",
        params.snooze_url, params.ignore_url
    ));
    body
}

#[cfg(test)]
mod test {
    use super::*;
    use beacon_domain::ID;
    use chrono::NaiveDate;

    fn params(reminder: &Reminder) -> ReminderEmailParams {
        ReminderEmailParams {
            reminder,
            document: None,
            due_status: DueStatus::DueToday,
            snooze_url: "http://localhost:5000/api/v1/email-actions/abc".into(),
            ignore_url: "http://localhost:5000/api/v1/email-actions/def".into(),
            document_url: None,
        }
    }

    #[test]
    fn escapes_user_text_but_not_urls() {
        let mut reminder = Reminder::new(
            ID::new(),
            "Review <Q1> budget & plan".into(),
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            0,
        );
        reminder.description = Some("a < b".into());

        let html = render_html_body(&params(&reminder));
        assert!(html.contains("Review &lt;Q1&gt; budget &amp; plan"));
        assert!(html.contains("a &lt; b"));
        assert!(html.contains("href=\"http://localhost:5000/api/v1/email-actions/abc\""));
        assert!(!html.contains("<Q1>"));
    }

    #[test]
    fn subject_reflects_the_due_status() {
        let reminder = Reminder::new(
            ID::new(),
            "Standup".into(),
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            0,
        );
        let mut p = params(&reminder);
        assert_eq!(render_subject(&p), "Due today: Standup");
        p.due_status = DueStatus::InWindow;
        assert_eq!(render_subject(&p), "Upcoming: Standup");
    }

    #[test]
    fn text_body_lists_both_action_links() {
        let reminder = Reminder::new(
            ID::new(),
            "Standup".into(),
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            0,
        );
        let text = render_text_body(&params(&reminder));
        assert!(text.contains("Snooze: http://localhost:5000/api/v1/email-actions/abc"));
        assert!(text.contains("Ignore: http://localhost:5000/api/v1/email-actions/def"));
    }
}
