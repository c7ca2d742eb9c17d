use crate::error::BeaconError;
use crate::shared::{auth::protect_route, usecase::execute, usecase::UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use beacon_api_structs::ignore_reminder::{APIResponse, PathParams};
use beacon_domain::{Reminder, ID};
use beacon_infra::BeaconContext;

pub async fn ignore_reminder_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    ctx: web::Data<BeaconContext>,
) -> Result<HttpResponse, BeaconError> {
    let (user, _policy) = protect_route(&http_req, &ctx).await?;
    resolve(user.id, path.reminder_id.clone(), Resolution::Ignore, &ctx).await
}

pub async fn complete_reminder_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    ctx: web::Data<BeaconContext>,
) -> Result<HttpResponse, BeaconError> {
    let (user, _policy) = protect_route(&http_req, &ctx).await?;
    resolve(user.id, path.reminder_id.clone(), Resolution::Complete, &ctx).await
}

async fn resolve(
    user_id: ID,
    reminder_id: ID,
    resolution: Resolution,
    ctx: &BeaconContext,
) -> Result<HttpResponse, BeaconError> {
    let usecase = ResolveReminderUseCase {
        user_id,
        reminder_id,
        resolution,
    };
    execute(usecase, ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(reminder)))
        .map_err(BeaconError::from)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    Ignore,
    Complete,
}

/// Resolves the current occurrence for this user by flagging it ignored or
/// completed, then rolls a recurring reminder forward to its next
/// occurrence. The new occurrence date has no state row, so every user
/// starts it clean. One-time reminders stay at their fixed date.
#[derive(Debug)]
pub struct ResolveReminderUseCase {
    pub user_id: ID,
    pub reminder_id: ID,
    pub resolution: Resolution,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

impl From<UseCaseError> for BeaconError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(reminder_id) => Self::NotFound(format!(
                "The reminder with id: {}, was not found.",
                reminder_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for ResolveReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "ResolveReminder";

    async fn execute(&mut self, ctx: &BeaconContext) -> Result<Self::Response, Self::Error> {
        let mut reminder = match ctx.repos.reminders.find(&self.reminder_id).await {
            Some(r) if r.owner_id == self.user_id || r.is_global => r,
            _ => return Err(UseCaseError::NotFound(self.reminder_id.clone())),
        };

        let occurrence_date = reminder.next_due;
        let now = ctx.sys.get_timestamp_millis();

        match self.resolution {
            Resolution::Ignore => ctx
                .repos
                .occurrence_states
                .set_ignored(&self.user_id, &reminder.id, occurrence_date, true, Some(now))
                .await
                .map_err(|_| UseCaseError::StorageError)?,
            Resolution::Complete => ctx
                .repos
                .occurrence_states
                .set_completed(&self.user_id, &reminder.id, occurrence_date, true, Some(now))
                .await
                .map_err(|_| UseCaseError::StorageError)?,
        }

        if reminder.advance() {
            reminder.updated = now;
            ctx.repos
                .reminders
                .save(&reminder)
                .await
                .map_err(|_| UseCaseError::StorageError)?;
        }

        Ok(reminder)
    }
}
