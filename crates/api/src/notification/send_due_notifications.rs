use crate::notification::templates::{
    render_html_body, render_subject, render_text_body, ReminderEmailParams,
};
use crate::shared::usecase::UseCase;
use beacon_domain::{
    classify_due_status, timezones_at_local_hour, ActionKind, DueStatus, EmailActionToken,
    EmailSendLog, Reminder, User,
};
use beacon_infra::{BeaconContext, EmailMessage};
use chrono::Timelike;
use tracing::{error, info};

/// The local wall-clock hour at which users receive their reminder digest.
pub const LOCAL_SEND_HOUR: u32 = 7;

/// One scheduler tick: finds every user whose local time is 07:00 right
/// now, evaluates the due window for each reminder they can see, and sends
/// at most one notification email per (user, reminder, occurrence).
///
/// A failed delivery leaves no send-log row, so the next eligible tick
/// retries naturally. Failures are isolated per reminder; one broken email
/// never aborts the batch.
#[derive(Debug)]
pub struct SendDueNotificationsUseCase {}

#[derive(Debug, Default, PartialEq)]
pub struct SendSummary {
    pub users_considered: usize,
    pub emails_sent: usize,
    pub delivery_failures: usize,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendDueNotificationsUseCase {
    type Response = SendSummary;

    type Error = UseCaseError;

    const NAME: &'static str = "SendDueNotifications";

    async fn execute(&mut self, ctx: &BeaconContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_utc_now();
        let timezones = timezones_at_local_hour(now.hour(), LOCAL_SEND_HOUR);
        if timezones.is_empty() {
            return Ok(SendSummary::default());
        }

        let users = ctx.repos.users.find_notifiable_by_timezones(&timezones).await;

        let mut summary = SendSummary {
            users_considered: users.len(),
            ..Default::default()
        };

        for user in &users {
            let today = now.with_timezone(&user.timezone).date_naive();
            let reminders = ctx.repos.reminders.find_visible_to(&user.id).await;

            for reminder in reminders {
                match notify(ctx, user, &reminder, today).await {
                    Ok(true) => summary.emails_sent += 1,
                    Ok(false) => {}
                    Err(e) => {
                        summary.delivery_failures += 1;
                        error!(
                            "Failed to notify user: {} about reminder: {} due: {}. Error: {:?}",
                            user.id, reminder.id, reminder.next_due, e
                        );
                    }
                }
            }
        }

        if summary.emails_sent > 0 || summary.delivery_failures > 0 {
            info!(
                "Reminder notifications tick sent: {} failed: {}",
                summary.emails_sent, summary.delivery_failures
            );
        }
        Ok(summary)
    }
}

/// Sends the notification for one (user, reminder) pair if it is eligible.
/// Returns whether an email went out.
async fn notify(
    ctx: &BeaconContext,
    user: &User,
    reminder: &Reminder,
    today: chrono::NaiveDate,
) -> anyhow::Result<bool> {
    let due_status = classify_due_status(today, reminder.next_due, reminder.advance_notice_days);
    match due_status {
        DueStatus::InWindow | DueStatus::DueToday => {}
        DueStatus::NotYet | DueStatus::PastDue => return Ok(false),
    }

    let state = ctx
        .repos
        .occurrence_states
        .find(&user.id, &reminder.id, reminder.next_due)
        .await;
    if let Some(state) = &state {
        if state.ignored || state.completed {
            return Ok(false);
        }
        // The due-today send is the final reminder and overrides snooze
        if state.snoozed && due_status != DueStatus::DueToday {
            return Ok(false);
        }
    }

    if ctx
        .repos
        .send_logs
        .exists(&user.id, &reminder.id, reminder.next_due)
        .await
    {
        return Ok(false);
    }

    let email = match &user.email {
        Some(email) => email.clone(),
        None => return Ok(false),
    };

    let snooze_token = EmailActionToken::new(
        user.id.clone(),
        reminder.id.clone(),
        reminder.next_due,
        ActionKind::Snooze,
    );
    let ignore_token = EmailActionToken::new(
        user.id.clone(),
        reminder.id.clone(),
        reminder.next_due,
        ActionKind::Ignore,
    );
    ctx.repos.action_tokens.insert(&snooze_token).await?;
    ctx.repos.action_tokens.insert(&ignore_token).await?;

    let document = match &reminder.document_id {
        Some(document_id) => ctx.repos.documents.find(document_id).await,
        None => None,
    };
    let document_url = document
        .as_ref()
        .map(|d| format!("{}/documents/{}", ctx.config.external_base_url, d.slug));

    let params = ReminderEmailParams {
        reminder,
        document: document.as_ref(),
        due_status,
        snooze_url: action_url(ctx, &snooze_token.token),
        ignore_url: action_url(ctx, &ignore_token.token),
        document_url,
    };

    let message = EmailMessage {
        to: email,
        subject: render_subject(&params),
        html_body: render_html_body(&params),
        text_body: render_text_body(&params),
    };
    ctx.email.send(&message).await?;

    // Only a confirmed delivery is recorded; on failure the tick retries
    let log = EmailSendLog {
        user_id: user.id.clone(),
        reminder_id: reminder.id.clone(),
        occurrence_date: reminder.next_due,
        sent_at: ctx.sys.get_timestamp_millis(),
    };
    ctx.repos.send_logs.insert_once(&log).await?;

    Ok(true)
}

fn action_url(ctx: &BeaconContext, token: &str) -> String {
    format!(
        "{}/api/v1/email-actions/{}",
        ctx.config.external_base_url, token
    )
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::usecase::execute;
    use beacon_domain::ID;
    use beacon_infra::{setup_context_inmemory, ISys, RecordingEmailProvider};
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};
    use std::sync::Arc;

    // 06:00 UTC is 07:00 in Berlin (standard offset +1)
    struct BerlinMorningSys {}
    impl ISys for BerlinMorningSys {
        fn get_timestamp_millis(&self) -> i64 {
            self.get_utc_now().timestamp_millis()
        }
        fn get_utc_now(&self) -> DateTime<Utc> {
            Utc.with_ymd_and_hms(2025, 2, 25, 6, 0, 0).unwrap()
        }
    }

    // No zone in the offset table sits at local 07:00 when it is 18:00 UTC
    struct DeadHourSys {}
    impl ISys for DeadHourSys {
        fn get_timestamp_millis(&self) -> i64 {
            self.get_utc_now().timestamp_millis()
        }
        fn get_utc_now(&self) -> DateTime<Utc> {
            Utc.with_ymd_and_hms(2025, 2, 25, 18, 0, 0).unwrap()
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn berlin_user(ctx: &BeaconContext) -> User {
        let mut user = User::new(ID::new());
        user.email = Some("user@example.com".into());
        user.timezone = chrono_tz::Europe::Berlin;
        user.email_notifications = true;
        ctx.repos.users.insert(&user).await.unwrap();
        user
    }

    #[actix_web::main]
    #[test]
    async fn sends_for_eligible_reminders_only() {
        let mut ctx = setup_context_inmemory();
        ctx.sys = Arc::new(BerlinMorningSys {});
        let provider = Arc::new(RecordingEmailProvider::default());
        ctx.email = provider.clone();

        let user = berlin_user(&ctx).await;

        let due_today = Reminder::new(user.id.clone(), "Due today".into(), ymd(2025, 2, 25), 0);
        let mut in_window =
            Reminder::new(user.id.clone(), "In window".into(), ymd(2025, 3, 1), 0);
        in_window.advance_notice_days = 7;
        let not_yet = Reminder::new(user.id.clone(), "Not yet".into(), ymd(2025, 6, 1), 0);
        let past_due = Reminder::new(user.id.clone(), "Past due".into(), ymd(2025, 2, 1), 0);
        let mut ignored =
            Reminder::new(user.id.clone(), "Ignored".into(), ymd(2025, 2, 26), 0);
        ignored.advance_notice_days = 7;

        for r in [&due_today, &in_window, &not_yet, &past_due, &ignored] {
            ctx.repos.reminders.insert(r).await.unwrap();
        }
        ctx.repos
            .occurrence_states
            .set_ignored(&user.id, &ignored.id, ymd(2025, 2, 26), true, Some(1))
            .await
            .unwrap();

        let summary = execute(SendDueNotificationsUseCase {}, &ctx).await.unwrap();
        assert_eq!(summary.users_considered, 1);
        assert_eq!(summary.emails_sent, 2);
        assert_eq!(summary.delivery_failures, 0);

        let subjects: Vec<String> = provider
            .sent
            .lock()
            .unwrap()
            .iter()
            .map(|m| m.subject.clone())
            .collect();
        assert!(subjects.contains(&"Due today: Due today".to_string()));
        assert!(subjects.contains(&"Upcoming: In window".to_string()));

        // Both sends left an idempotence row
        assert!(
            ctx.repos
                .send_logs
                .exists(&user.id, &due_today.id, ymd(2025, 2, 25))
                .await
        );

        // Rerunning the tick sends nothing new
        let summary = execute(SendDueNotificationsUseCase {}, &ctx).await.unwrap();
        assert_eq!(summary.emails_sent, 0);
        assert_eq!(provider.sent_count(), 2);
    }

    #[actix_web::main]
    #[test]
    async fn snooze_suppresses_until_the_due_date() {
        let mut ctx = setup_context_inmemory();
        ctx.sys = Arc::new(BerlinMorningSys {});
        let provider = Arc::new(RecordingEmailProvider::default());
        ctx.email = provider.clone();

        let user = berlin_user(&ctx).await;

        // Snoozed and only in-window: suppressed
        let mut upcoming =
            Reminder::new(user.id.clone(), "Upcoming".into(), ymd(2025, 3, 1), 0);
        upcoming.advance_notice_days = 7;
        // Snoozed but due today: the final send still goes out
        let mut today = Reminder::new(user.id.clone(), "Today".into(), ymd(2025, 2, 25), 0);
        today.advance_notice_days = 7;
        ctx.repos.reminders.insert(&upcoming).await.unwrap();
        ctx.repos.reminders.insert(&today).await.unwrap();

        ctx.repos
            .occurrence_states
            .set_snoozed(&user.id, &upcoming.id, ymd(2025, 3, 1), true)
            .await
            .unwrap();
        ctx.repos
            .occurrence_states
            .set_snoozed(&user.id, &today.id, ymd(2025, 2, 25), true)
            .await
            .unwrap();

        let summary = execute(SendDueNotificationsUseCase {}, &ctx).await.unwrap();
        assert_eq!(summary.emails_sent, 1);
        assert_eq!(provider.sent.lock().unwrap()[0].subject, "Due today: Today");
    }

    #[actix_web::main]
    #[test]
    async fn delivery_failure_leaves_no_log_and_retries_next_tick() {
        let mut ctx = setup_context_inmemory();
        ctx.sys = Arc::new(BerlinMorningSys {});
        let provider = Arc::new(RecordingEmailProvider::default());
        ctx.email = provider.clone();

        let user = berlin_user(&ctx).await;
        let reminder = Reminder::new(user.id.clone(), "Flaky".into(), ymd(2025, 2, 25), 0);
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        provider.set_failing(true);
        let summary = execute(SendDueNotificationsUseCase {}, &ctx).await.unwrap();
        assert_eq!(summary.emails_sent, 0);
        assert_eq!(summary.delivery_failures, 1);
        assert!(
            !ctx.repos
                .send_logs
                .exists(&user.id, &reminder.id, ymd(2025, 2, 25))
                .await
        );

        provider.set_failing(false);
        let summary = execute(SendDueNotificationsUseCase {}, &ctx).await.unwrap();
        assert_eq!(summary.emails_sent, 1);
        assert_eq!(provider.sent_count(), 1);
    }

    #[actix_web::main]
    #[test]
    async fn a_tick_outside_every_send_hour_is_a_noop() {
        let mut ctx = setup_context_inmemory();
        ctx.sys = Arc::new(DeadHourSys {});
        let provider = Arc::new(RecordingEmailProvider::default());
        ctx.email = provider.clone();

        let user = berlin_user(&ctx).await;
        let reminder = Reminder::new(user.id.clone(), "Waiting".into(), ymd(2025, 2, 25), 0);
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        let summary = execute(SendDueNotificationsUseCase {}, &ctx).await.unwrap();
        assert_eq!(summary, SendSummary::default());
        assert_eq!(provider.sent_count(), 0);
    }
}
