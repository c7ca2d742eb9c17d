use crate::error::BeaconError;
use crate::shared::{
    auth::{protect_route, Permission},
    usecase::{execute_with_policy, PermissionBoundary, UseCase, UseCaseErrorContainer},
};
use actix_web::{web, HttpRequest, HttpResponse};
use beacon_api_structs::dtos::ReminderWithStateDTO;
use beacon_api_structs::get_snoozed_reminders::APIResponse;
use beacon_domain::{classify_due_status, ID};
use beacon_infra::BeaconContext;
use chrono_tz::Tz;

pub async fn get_snoozed_reminders_controller(
    http_req: HttpRequest,
    ctx: web::Data<BeaconContext>,
) -> Result<HttpResponse, BeaconError> {
    let (user, policy) = protect_route(&http_req, &ctx).await?;

    let usecase = GetSnoozedRemindersUseCase {
        user_id: user.id,
        timezone: user.timezone,
    };

    execute_with_policy(usecase, &policy, &ctx)
        .await
        .map(|reminders| HttpResponse::Ok().json(APIResponse { reminders }))
        .map_err(BeaconError::from)
}

/// Visible reminders whose current occurrence this user has snoozed.
#[derive(Debug)]
pub struct GetSnoozedRemindersUseCase {
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
impl UseCase for GetSnoozedRemindersUseCase {
    type Response = Vec<ReminderWithStateDTO>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetSnoozedReminders";

    async fn execute(&mut self, ctx: &BeaconContext) -> Result<Self::Response, Self::Error> {
        let today = ctx.sys.get_utc_now().with_timezone(&self.timezone).date_naive();

        let reminders = ctx.repos.reminders.find_visible_to(&self.user_id).await;

        let document_ids: Vec<ID> = reminders
            .iter()
            .filter_map(|r| r.document_id.clone())
            .collect();
        let documents = ctx.repos.documents.find_many(&document_ids).await;

        let mut res = Vec::new();
        for reminder in reminders {
            let state = ctx
                .repos
                .occurrence_states
                .find(&self.user_id, &reminder.id, reminder.next_due)
                .await;
            let snoozed = state.as_ref().map(|s| s.snoozed).unwrap_or(false);
            if !snoozed {
                continue;
            }
            let due_status =
                classify_due_status(today, reminder.next_due, reminder.advance_notice_days);
            let document = reminder
                .document_id
                .as_ref()
                .and_then(|id| documents.iter().find(|d| d.id == *id).cloned());
            res.push(ReminderWithStateDTO::new(reminder, due_status, state, document));
        }
        Ok(res)
    }
}

impl PermissionBoundary for GetSnoozedRemindersUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::ReadReminders]
    }
}
