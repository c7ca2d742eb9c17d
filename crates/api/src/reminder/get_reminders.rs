use crate::error::BeaconError;
use crate::shared::{
    auth::{protect_route, Permission},
    usecase::{execute_with_policy, PermissionBoundary, UseCase, UseCaseErrorContainer},
};
use actix_web::{web, HttpRequest, HttpResponse};
use beacon_api_structs::dtos::ReminderWithStateDTO;
use beacon_api_structs::get_reminders::APIResponse;
use beacon_domain::{classify_due_status, DueStatus, ID};
use beacon_infra::BeaconContext;
use chrono_tz::Tz;

pub async fn get_reminders_controller(
    http_req: HttpRequest,
    ctx: web::Data<BeaconContext>,
) -> Result<HttpResponse, BeaconError> {
    let (user, policy) = protect_route(&http_req, &ctx).await?;

    let usecase = GetRemindersUseCase {
        user_id: user.id,
        timezone: user.timezone,
    };

    execute_with_policy(usecase, &policy, &ctx)
        .await
        .map(|reminders| HttpResponse::Ok().json(APIResponse { reminders }))
        .map_err(BeaconError::from)
}

/// Lists every reminder visible to the user, joined with the user's own
/// occurrence flags and the computed due status. "Today" is the calendar
/// date in the user's timezone.
#[derive(Debug)]
pub struct GetRemindersUseCase {
    pub user_id: ID,
    pub timezone: Tz,
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
impl UseCase for GetRemindersUseCase {
    type Response = Vec<ReminderWithStateDTO>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetReminders";

    async fn execute(&mut self, ctx: &BeaconContext) -> Result<Self::Response, Self::Error> {
        let today = ctx.sys.get_utc_now().with_timezone(&self.timezone).date_naive();

        let reminders = ctx.repos.reminders.find_visible_to(&self.user_id).await;

        let document_ids: Vec<ID> = reminders
            .iter()
            .filter_map(|r| r.document_id.clone())
            .collect();
        let documents = ctx.repos.documents.find_many(&document_ids).await;

        let mut res = Vec::with_capacity(reminders.len());
        for reminder in reminders {
            let due_status =
                classify_due_status(today, reminder.next_due, reminder.advance_notice_days);
            let state = ctx
                .repos
                .occurrence_states
                .find(&self.user_id, &reminder.id, reminder.next_due)
                .await;
            let document = reminder
                .document_id
                .as_ref()
                .and_then(|id| documents.iter().find(|d| d.id == *id).cloned());
            res.push(ReminderWithStateDTO::new(reminder, due_status, state, document));
        }
        Ok(res)
    }
}

impl PermissionBoundary for GetRemindersUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::ReadReminders]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::usecase::execute;
    use beacon_domain::{Document, Reminder, User};
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
    async fn joins_due_status_state_and_document() {
        let mut ctx = setup_context_inmemory();
        ctx.sys = Arc::new(StaticTimeSys {});

        let user = User::new(ID::new());
        ctx.repos.users.insert(&user).await.unwrap();

        let document = Document {
            id: ID::new(),
            title: "Runbook".into(),
            slug: "runbook".into(),
        };
        ctx.repos.documents.insert(&document).await.unwrap();

        let mut in_window = Reminder::new(user.id.clone(), "Audit".into(), ymd(2025, 3, 1), 0);
        in_window.advance_notice_days = 7;
        in_window.document_id = Some(document.id.clone());
        ctx.repos.reminders.insert(&in_window).await.unwrap();

        let past_due = Reminder::new(user.id.clone(), "Backup".into(), ymd(2025, 2, 20), 0);
        ctx.repos.reminders.insert(&past_due).await.unwrap();

        ctx.repos
            .occurrence_states
            .set_snoozed(&user.id, &in_window.id, ymd(2025, 3, 1), true)
            .await
            .unwrap();

        let usecase = GetRemindersUseCase {
            user_id: user.id.clone(),
            timezone: chrono_tz::UTC,
        };
        let res = execute(usecase, &ctx).await.unwrap();
        assert_eq!(res.len(), 2);

        let audit = res.iter().find(|r| r.reminder.title == "Audit").unwrap();
        assert_eq!(audit.due_status, DueStatus::InWindow);
        assert!(audit.snoozed);
        assert_eq!(audit.document.as_ref().unwrap().slug, "runbook");

        let backup = res.iter().find(|r| r.reminder.title == "Backup").unwrap();
        assert_eq!(backup.due_status, DueStatus::PastDue);
        assert!(!backup.snoozed);
    }

    #[actix_web::main]
    #[test]
    async fn today_follows_the_users_timezone() {
        let mut ctx = setup_context_inmemory();
        // 2025-02-25 12:00 UTC is already 2025-02-26 01:00 in Auckland
        ctx.sys = Arc::new(StaticTimeSys {});

        let user = User::new(ID::new());
        ctx.repos.users.insert(&user).await.unwrap();

        let reminder = Reminder::new(user.id.clone(), "Lodge report".into(), ymd(2025, 2, 25), 0);
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        let utc_view = execute(
            GetRemindersUseCase {
                user_id: user.id.clone(),
                timezone: chrono_tz::UTC,
            },
            &ctx,
        )
        .await
        .unwrap();
        assert_eq!(utc_view[0].due_status, DueStatus::DueToday);

        let auckland_view = execute(
            GetRemindersUseCase {
                user_id: user.id.clone(),
                timezone: chrono_tz::Pacific::Auckland,
            },
            &ctx,
        )
        .await
        .unwrap();
        // Already the 26th in Auckland, so the occurrence is overdue there
        assert_eq!(auckland_view[0].due_status, DueStatus::PastDue);
    }
}
