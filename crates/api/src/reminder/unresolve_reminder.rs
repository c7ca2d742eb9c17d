use crate::error::BeaconError;
use crate::reminder::resolve_reminder::Resolution;
use crate::shared::{auth::protect_route, usecase::execute, usecase::UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use beacon_api_structs::unignore_reminder::{APIResponse, PathParams};
use beacon_domain::{Reminder, ID};
use beacon_infra::BeaconContext;

pub async fn unignore_reminder_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    ctx: web::Data<BeaconContext>,
) -> Result<HttpResponse, BeaconError> {
    let (user, _policy) = protect_route(&http_req, &ctx).await?;
    unresolve(user.id, path.reminder_id.clone(), Resolution::Ignore, &ctx).await
}

pub async fn uncomplete_reminder_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    ctx: web::Data<BeaconContext>,
) -> Result<HttpResponse, BeaconError> {
    let (user, _policy) = protect_route(&http_req, &ctx).await?;
    unresolve(user.id, path.reminder_id.clone(), Resolution::Complete, &ctx).await
}

async fn unresolve(
    user_id: ID,
    reminder_id: ID,
    resolution: Resolution,
    ctx: &BeaconContext,
) -> Result<HttpResponse, BeaconError> {
    let usecase = UnresolveReminderUseCase {
        user_id,
        reminder_id,
        resolution,
    };
    execute(usecase, ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(reminder)))
        .map_err(BeaconError::from)
}

/// Clears the ignored or completed flag (and actioned_at) on the current
/// occurrence. A recurring reminder that already advanced stays advanced;
/// the undo only affects the occurrence `next_due` points at now.
#[derive(Debug)]
pub struct UnresolveReminderUseCase {
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
impl UseCase for UnresolveReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "UnresolveReminder";

    async fn execute(&mut self, ctx: &BeaconContext) -> Result<Self::Response, Self::Error> {
        let reminder = match ctx.repos.reminders.find(&self.reminder_id).await {
            Some(r) if r.owner_id == self.user_id || r.is_global => r,
            _ => return Err(UseCaseError::NotFound(self.reminder_id.clone())),
        };

        match self.resolution {
            Resolution::Ignore => ctx
                .repos
                .occurrence_states
                .set_ignored(&self.user_id, &reminder.id, reminder.next_due, false, None)
                .await
                .map_err(|_| UseCaseError::StorageError)?,
            Resolution::Complete => ctx
                .repos
                .occurrence_states
                .set_completed(&self.user_id, &reminder.id, reminder.next_due, false, None)
                .await
                .map_err(|_| UseCaseError::StorageError)?,
        }

        Ok(reminder)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::NaiveDate;
    use beacon_infra::setup_context_inmemory;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[actix_web::main]
    #[test]
    async fn uncomplete_clears_the_flag_for_the_current_occurrence() {
        let ctx = setup_context_inmemory();
        let user = ID::new();

        let reminder = Reminder::new(user.clone(), "One off".into(), ymd(2025, 3, 1), 0);
        ctx.repos.reminders.insert(&reminder).await.unwrap();
        ctx.repos
            .occurrence_states
            .set_completed(&user, &reminder.id, ymd(2025, 3, 1), true, Some(7))
            .await
            .unwrap();

        execute(
            UnresolveReminderUseCase {
                user_id: user.clone(),
                reminder_id: reminder.id.clone(),
                resolution: Resolution::Complete,
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
        assert!(!state.completed);
        assert!(state.actioned_at.is_none());
    }

    #[actix_web::main]
    #[test]
    async fn unignore_does_not_roll_an_advanced_reminder_back() {
        let ctx = setup_context_inmemory();
        let user = ID::new();

        let mut reminder = Reminder::new(user.clone(), "Patch day".into(), ymd(2025, 3, 1), 0);
        reminder.rrule = Some("FREQ=WEEKLY".into());
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        // Resolve it, which advances next_due to 2025-03-08
        execute(
            crate::reminder::resolve_reminder::ResolveReminderUseCase {
                user_id: user.clone(),
                reminder_id: reminder.id.clone(),
                resolution: Resolution::Ignore,
            },
            &ctx,
        )
        .await
        .unwrap();

        let res = execute(
            UnresolveReminderUseCase {
                user_id: user.clone(),
                reminder_id: reminder.id.clone(),
                resolution: Resolution::Ignore,
            },
            &ctx,
        )
        .await
        .unwrap();

        assert_eq!(res.next_due, ymd(2025, 3, 8));
        // The historical occurrence keeps its ignored flag
        let old = ctx
            .repos
            .occurrence_states
            .find(&user, &reminder.id, ymd(2025, 3, 1))
            .await
            .unwrap();
        assert!(old.ignored);
    }
}
