use crate::error::BeaconError;
use crate::shared::{
    auth::{protect_route, Permission},
    usecase::{execute_with_policy, PermissionBoundary, UseCase, UseCaseErrorContainer},
};
use actix_web::{web, HttpRequest, HttpResponse};
use beacon_api_structs::dtos::HistoryEntryDTO;
use beacon_api_structs::get_reminder_history::APIResponse;
use beacon_domain::ID;
use beacon_infra::BeaconContext;
use chrono::Days;
use chrono_tz::Tz;

pub async fn get_reminder_history_controller(
    http_req: HttpRequest,
    ctx: web::Data<BeaconContext>,
) -> Result<HttpResponse, BeaconError> {
    let (user, policy) = protect_route(&http_req, &ctx).await?;

    let usecase = GetReminderHistoryUseCase {
        user_id: user.id,
        timezone: user.timezone,
        window_days: ctx.config.history_window_days,
    };

    execute_with_policy(usecase, &policy, &ctx)
        .await
        .map(|entries| HttpResponse::Ok().json(APIResponse { entries }))
        .map_err(BeaconError::from)
}

/// Completed and ignored occurrences for this user over the trailing
/// window, newest first, joined with their reminders.
#[derive(Debug)]
pub struct GetReminderHistoryUseCase {
    pub user_id: ID,
    pub timezone: Tz,
    pub window_days: i64,
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

impl From<UseCaseErrorContainer<UseCaseError>> for BeaconError {
    fn from(e: UseCaseErrorContainer<UseCaseError>) -> Self {
        match e {
            UseCaseErrorContainer::Unauthorized(e) => Self::Unauthorized(e),
            UseCaseErrorContainer::UseCase(e) => e.into(),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetReminderHistoryUseCase {
    type Response = Vec<HistoryEntryDTO>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetReminderHistory";

    async fn execute(&mut self, ctx: &BeaconContext) -> Result<Self::Response, Self::Error> {
        let today = ctx.sys.get_utc_now().with_timezone(&self.timezone).date_naive();
        let since = today
            .checked_sub_days(Days::new(self.window_days.max(0) as u64))
            .unwrap_or(today);

        let states = ctx.repos.occurrence_states.find_history(&self.user_id, since).await;

        let reminder_ids: Vec<ID> = states.iter().map(|s| s.reminder_id.clone()).collect();
        let reminders = ctx.repos.reminders.find_many(&reminder_ids).await;

        let entries = states
            .into_iter()
            .filter_map(|state| {
                reminders
                    .iter()
                    .find(|r| r.id == state.reminder_id)
                    .cloned()
                    .map(|reminder| HistoryEntryDTO::new(reminder, state))
            })
            .collect();
        Ok(entries)
    }
}

impl PermissionBoundary for GetReminderHistoryUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::ReadReminders]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::usecase::execute;
    use beacon_domain::Reminder;
    use beacon_infra::{setup_context_inmemory, ISys};
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};
    use std::sync::Arc;

    struct StaticTimeSys {}
    impl ISys for StaticTimeSys {
        fn get_timestamp_millis(&self) -> i64 {
            self.get_utc_now().timestamp_millis()
        }
        fn get_utc_now(&self) -> DateTime<Utc> {
            Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[actix_web::main]
    #[test]
    async fn history_is_limited_to_the_trailing_window() {
        let mut ctx = setup_context_inmemory();
        ctx.sys = Arc::new(StaticTimeSys {});
        let user = ID::new();

        let reminder = Reminder::new(user.clone(), "Rotate logs".into(), ymd(2025, 6, 8), 0);
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        // Inside the 90 day window
        ctx.repos
            .occurrence_states
            .set_completed(&user, &reminder.id, ymd(2025, 5, 1), true, Some(1))
            .await
            .unwrap();
        // Outside the window
        ctx.repos
            .occurrence_states
            .set_ignored(&user, &reminder.id, ymd(2024, 12, 1), true, Some(2))
            .await
            .unwrap();
        // Snoozed only, never part of history
        ctx.repos
            .occurrence_states
            .set_snoozed(&user, &reminder.id, ymd(2025, 5, 20), true)
            .await
            .unwrap();

        let entries = execute(
            GetReminderHistoryUseCase {
                user_id: user,
                timezone: chrono_tz::UTC,
                window_days: 90,
            },
            &ctx,
        )
        .await
        .unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].occurrence_date, ymd(2025, 5, 1));
        assert!(entries[0].completed);
        assert_eq!(entries[0].reminder.title, "Rotate logs");
    }
}
