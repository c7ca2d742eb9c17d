use crate::error::BeaconError;
use crate::shared::{auth::protect_route, usecase::execute, usecase::UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use beacon_api_structs::snooze_reminder::{APIResponse, PathParams};
use beacon_domain::{Reminder, ID};
use beacon_infra::BeaconContext;
use chrono_tz::Tz;

pub async fn snooze_reminder_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    ctx: web::Data<BeaconContext>,
) -> Result<HttpResponse, BeaconError> {
    let (user, _policy) = protect_route(&http_req, &ctx).await?;

    let usecase = SnoozeReminderUseCase {
        user_id: user.id,
        timezone: user.timezone,
        reminder_id: path.reminder_id.clone(),
        snoozed: true,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(reminder)))
        .map_err(BeaconError::from)
}

pub async fn unsnooze_reminder_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    ctx: web::Data<BeaconContext>,
) -> Result<HttpResponse, BeaconError> {
    let (user, _policy) = protect_route(&http_req, &ctx).await?;

    let usecase = SnoozeReminderUseCase {
        user_id: user.id,
        timezone: user.timezone,
        reminder_id: path.reminder_id.clone(),
        snoozed: false,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(reminder)))
        .map_err(BeaconError::from)
}

/// Sets or clears the snoozed flag on the current occurrence. Snoozing is
/// rejected once the occurrence is due today; the user has to act on or
/// ignore it instead. Clearing has no date restriction.
#[derive(Debug)]
pub struct SnoozeReminderUseCase {
    pub user_id: ID,
    pub timezone: Tz,
    pub reminder_id: ID,
    pub snoozed: bool,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    DueToday,
    StorageError,
}

impl From<UseCaseError> for BeaconError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(reminder_id) => Self::NotFound(format!(
                "The reminder with id: {}, was not found.",
                reminder_id
            )),
            UseCaseError::DueToday => Self::Conflict(
                "A reminder that is due today can no longer be snoozed".into(),
            ),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SnoozeReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "SnoozeReminder";

    async fn execute(&mut self, ctx: &BeaconContext) -> Result<Self::Response, Self::Error> {
        let reminder = match ctx.repos.reminders.find(&self.reminder_id).await {
            Some(r) if r.owner_id == self.user_id || r.is_global => r,
            _ => return Err(UseCaseError::NotFound(self.reminder_id.clone())),
        };

        if self.snoozed {
            let today = ctx
                .sys
                .get_utc_now()
                .with_timezone(&self.timezone)
                .date_naive();
            if reminder.next_due == today {
                return Err(UseCaseError::DueToday);
            }
        }

        ctx.repos
            .occurrence_states
            .set_snoozed(&self.user_id, &reminder.id, reminder.next_due, self.snoozed)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(reminder)
    }
}

#[cfg(test)]
mod test {
    use super::*;
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

    #[actix_web::main]
    #[test]
    async fn snoozes_an_upcoming_occurrence() {
        let mut ctx = setup_context_inmemory();
        ctx.sys = Arc::new(StaticTimeSys {});
        let user = ID::new();

        let reminder = Reminder::new(user.clone(), "Plan offsite".into(), ymd(2025, 3, 1), 0);
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        execute(
            SnoozeReminderUseCase {
                user_id: user.clone(),
                timezone: chrono_tz::UTC,
                reminder_id: reminder.id.clone(),
                snoozed: true,
            },
            &ctx,
        )
        .await
        .unwrap();

        let state = ctx
            .repos
            .occurrence_states
            .find(&user, &reminder.id, ymd(2025, 3, 1))
            .await
            .unwrap();
        assert!(state.snoozed);
    }

    #[actix_web::main]
    #[test]
    async fn snoozing_is_rejected_on_the_due_date() {
        let mut ctx = setup_context_inmemory();
        ctx.sys = Arc::new(StaticTimeSys {});
        let user = ID::new();

        let reminder = Reminder::new(user.clone(), "File return".into(), ymd(2025, 2, 25), 0);
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        let res = execute(
            SnoozeReminderUseCase {
                user_id: user,
                timezone: chrono_tz::UTC,
                reminder_id: reminder.id.clone(),
                snoozed: true,
            },
            &ctx,
        )
        .await;
        assert!(matches!(res, Err(UseCaseError::DueToday)));
    }

    #[actix_web::main]
    #[test]
    async fn unsnoozing_works_even_on_the_due_date() {
        let mut ctx = setup_context_inmemory();
        ctx.sys = Arc::new(StaticTimeSys {});
        let user = ID::new();

        let reminder = Reminder::new(user.clone(), "File return".into(), ymd(2025, 2, 25), 0);
        ctx.repos.reminders.insert(&reminder).await.unwrap();
        ctx.repos
            .occurrence_states
            .set_snoozed(&user, &reminder.id, ymd(2025, 2, 25), true)
            .await
            .unwrap();

        execute(
            SnoozeReminderUseCase {
                user_id: user.clone(),
                timezone: chrono_tz::UTC,
                reminder_id: reminder.id.clone(),
                snoozed: false,
            },
            &ctx,
        )
        .await
        .unwrap();

        let state = ctx
            .repos
            .occurrence_states
            .find(&user, &reminder.id, ymd(2025, 2, 25))
            .await
            .unwrap();
        assert!(!state.snoozed);
    }
}
