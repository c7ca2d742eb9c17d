use crate::error::BeaconError;
use crate::reminder::resolve_reminder::{Resolution, ResolveReminderUseCase};
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use beacon_domain::ActionKind;
use beacon_infra::BeaconContext;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct PathParams {
    pub token: String,
}

/// Public endpoint behind the one-click links in notification emails.
/// Responds with small HTML pages since the visitor arrives straight from
/// an email client, not from the app.
pub async fn consume_action_token_controller(
    path: web::Path<PathParams>,
    ctx: web::Data<BeaconContext>,
) -> Result<HttpResponse, BeaconError> {
    let usecase = ConsumeActionTokenUseCase {
        token: path.token.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(render_outcome)
        .map_err(BeaconError::from)
}

#[derive(Debug)]
pub struct ConsumeActionTokenUseCase {
    pub token: String,
}

/// Every way a token redemption can end. All of these are expected
/// outcomes rendered as pages, not errors.
#[derive(Debug, PartialEq)]
pub enum ConsumeOutcome {
    Invalid,
    AlreadyUsed,
    Expired,
    /// The reminder became due today after the email went out; snoozing is
    /// no longer allowed.
    SnoozeRejected,
    Applied {
        action: ActionKind,
        reminder_title: String,
    },
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for BeaconError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for ConsumeActionTokenUseCase {
    type Response = ConsumeOutcome;

    type Error = UseCaseError;

    const NAME: &'static str = "ConsumeActionToken";

    async fn execute(&mut self, ctx: &BeaconContext) -> Result<Self::Response, Self::Error> {
        let token = match ctx.repos.action_tokens.find(&self.token).await {
            Some(token) => token,
            None => return Ok(ConsumeOutcome::Invalid),
        };

        if token.used_at.is_some() {
            return Ok(ConsumeOutcome::AlreadyUsed);
        }

        let now = ctx.sys.get_timestamp_millis();
        if now > token.expires_at {
            return Ok(ConsumeOutcome::Expired);
        }

        let reminder = match ctx.repos.reminders.find(&token.reminder_id).await {
            Some(reminder) => reminder,
            None => return Ok(ConsumeOutcome::Invalid),
        };
        let user = match ctx.repos.users.find(&token.user_id).await {
            Some(user) => user,
            None => return Ok(ConsumeOutcome::Invalid),
        };

        // The due date may have moved between send and click
        if token.action == ActionKind::Snooze {
            let today = ctx
                .sys
                .get_utc_now()
                .with_timezone(&user.timezone)
                .date_naive();
            if reminder.next_due == today {
                return Ok(ConsumeOutcome::SnoozeRejected);
            }
        }

        // Atomic: only one concurrent redemption of the same token wins
        let consumed = ctx
            .repos
            .action_tokens
            .consume(&token.token, now)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        if !consumed {
            return Ok(ConsumeOutcome::AlreadyUsed);
        }

        match token.action {
            ActionKind::Snooze => {
                ctx.repos
                    .occurrence_states
                    .set_snoozed(&user.id, &reminder.id, reminder.next_due, true)
                    .await
                    .map_err(|_| UseCaseError::StorageError)?;
            }
            ActionKind::Ignore => {
                let usecase = ResolveReminderUseCase {
                    user_id: user.id.clone(),
                    reminder_id: reminder.id.clone(),
                    resolution: Resolution::Ignore,
                };
                execute(usecase, ctx)
                    .await
                    .map_err(|_| UseCaseError::StorageError)?;
            }
        }

        Ok(ConsumeOutcome::Applied {
            action: token.action,
            reminder_title: reminder.title,
        })
    }
}

fn render_outcome(outcome: ConsumeOutcome) -> HttpResponse {
    match outcome {
        ConsumeOutcome::Invalid => {
            page(HttpResponse::NotFound(), "Link not recognized", "This link is not valid. It may have been copied incompletely from the email.")
        }
        ConsumeOutcome::AlreadyUsed => {
            page(HttpResponse::Gone(), "Link already used", "This link has already been used. Each link in a reminder email works exactly once.")
        }
        ConsumeOutcome::Expired => {
            page(HttpResponse::Gone(), "Link expired", "This link has expired. You can manage the reminder from your dashboard instead.")
        }
        ConsumeOutcome::SnoozeRejected => {
            page(HttpResponse::Conflict(), "Reminder is due today", "This reminder is now due today and can no longer be snoozed. Complete or ignore it from your dashboard.")
        }
        ConsumeOutcome::Applied { action, reminder_title } => {
            let body = match action {
                ActionKind::Snooze => format!(
                    "\u{201c}{}\u{201d} is snoozed. You will still get a final reminder on its due date.",
                    crate::notification::templates::escape_html(&reminder_title)
                ),
                ActionKind::Ignore => format!(
                    "\u{201c}{}\u{201d} is ignored and will not notify you again for this occurrence.",
                    crate::notification::templates::escape_html(&reminder_title)
                ),
            };
            page(HttpResponse::Ok(), "Done", &body)
        }
    }
}

fn page(mut builder: actix_web::HttpResponseBuilder, title: &str, body: &str) -> HttpResponse {
    builder
        .content_type("text/html; charset=utf-8")
        .body(format!(
            "<html><head><title>{title}</title></head><body><h2>{title}</h2><p>{body}</p></body></html>"
        ))
}

#[cfg(test)]
mod test {
    use super::*;
    use beacon_domain::{EmailActionToken, Reminder, User, ID};
    use beacon_infra::{setup_context_inmemory, ISys};
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};
    use std::sync::Arc;

    struct StaticTimeSys {}
    impl ISys for StaticTimeSys {
        fn get_timestamp_millis(&self) -> i64 {
            self.get_utc_now().timestamp_millis()
        }
        fn get_utc_now(&self) -> DateTime<Utc> {
            Utc.with_ymd_and_hms(2025, 2, 25, 12, 0, 0).unwrap()
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn seed(ctx: &BeaconContext, due: NaiveDate, action: ActionKind) -> EmailActionToken {
        let user = User::new(ID::new());
        ctx.repos.users.insert(&user).await.unwrap();

        let mut reminder = Reminder::new(user.id.clone(), "Water plants".into(), due, 0);
        reminder.rrule = Some("FREQ=WEEKLY".into());
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        let token = EmailActionToken::new(user.id, reminder.id, due, action);
        ctx.repos.action_tokens.insert(&token).await.unwrap();
        token
    }

    #[actix_web::main]
    #[test]
    async fn unknown_token_is_invalid() {
        let ctx = setup_context_inmemory();
        let outcome = execute(
            ConsumeActionTokenUseCase {
                token: "nope".into(),
            },
            &ctx,
        )
        .await
        .unwrap();
        assert_eq!(outcome, ConsumeOutcome::Invalid);
    }

    #[actix_web::main]
    #[test]
    async fn ignore_applies_once_then_reports_already_used() {
        let mut ctx = setup_context_inmemory();
        ctx.sys = Arc::new(StaticTimeSys {});
        let token = seed(&ctx, ymd(2025, 2, 26), ActionKind::Ignore).await;

        let outcome = execute(
            ConsumeActionTokenUseCase {
                token: token.token.clone(),
            },
            &ctx,
        )
        .await
        .unwrap();
        assert!(matches!(outcome, ConsumeOutcome::Applied { action: ActionKind::Ignore, .. }));

        // The occurrence is flagged and the recurring reminder advanced
        let state = ctx
            .repos
            .occurrence_states
            .find(&token.user_id, &token.reminder_id, ymd(2025, 2, 26))
            .await
            .unwrap();
        assert!(state.ignored);
        let reminder = ctx.repos.reminders.find(&token.reminder_id).await.unwrap();
        assert_eq!(reminder.next_due, ymd(2025, 3, 5));

        let outcome = execute(
            ConsumeActionTokenUseCase {
                token: token.token.clone(),
            },
            &ctx,
        )
        .await
        .unwrap();
        assert_eq!(outcome, ConsumeOutcome::AlreadyUsed);
    }

    #[actix_web::main]
    #[test]
    async fn snooze_is_rejected_when_the_reminder_became_due_today() {
        let mut ctx = setup_context_inmemory();
        ctx.sys = Arc::new(StaticTimeSys {});
        let token = seed(&ctx, ymd(2025, 2, 25), ActionKind::Snooze).await;

        let outcome = execute(
            ConsumeActionTokenUseCase {
                token: token.token.clone(),
            },
            &ctx,
        )
        .await
        .unwrap();
        assert_eq!(outcome, ConsumeOutcome::SnoozeRejected);

        // The token survives for a later attempt from the dashboard page
        let stored = ctx.repos.action_tokens.find(&token.token).await.unwrap();
        assert!(stored.used_at.is_none());
    }

    #[actix_web::main]
    #[test]
    async fn expired_tokens_are_refused() {
        let mut ctx = setup_context_inmemory();
        ctx.sys = Arc::new(StaticTimeSys {});
        // Due long before the static clock; expiry was 7 days after
        let token = seed(&ctx, ymd(2025, 1, 1), ActionKind::Snooze).await;

        let outcome = execute(
            ConsumeActionTokenUseCase {
                token: token.token.clone(),
            },
            &ctx,
        )
        .await
        .unwrap();
        assert_eq!(outcome, ConsumeOutcome::Expired);
    }
}
