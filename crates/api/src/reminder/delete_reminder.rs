use crate::error::BeaconError;
use crate::shared::{
    auth::{can_modify_reminder, protect_route, Permission, Policy},
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use beacon_api_structs::delete_reminder::{APIResponse, PathParams};
use beacon_domain::{Reminder, ID};
use beacon_infra::BeaconContext;

pub async fn delete_reminder_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    ctx: web::Data<BeaconContext>,
) -> Result<HttpResponse, BeaconError> {
    let (user, policy) = protect_route(&http_req, &ctx).await?;

    let usecase = DeleteReminderUseCase {
        user_id: user.id,
        policy,
        reminder_id: path.reminder_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(reminder)))
        .map_err(BeaconError::from)
}

/// Permission follows the stored record's scope, like update.
#[derive(Debug)]
pub struct DeleteReminderUseCase {
    pub user_id: ID,
    pub policy: Policy,
    pub reminder_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    NotAllowed,
    StorageError,
}

impl From<UseCaseError> for BeaconError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(reminder_id) => Self::NotFound(format!(
                "The reminder with id: {}, was not found.",
                reminder_id
            )),
            UseCaseError::NotAllowed => {
                Self::NotAllowed("Client is not permitted to delete this reminder".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteReminder";

    async fn execute(&mut self, ctx: &BeaconContext) -> Result<Self::Response, Self::Error> {
        let reminder = match ctx.repos.reminders.find(&self.reminder_id).await {
            Some(r) if r.owner_id == self.user_id || r.is_global => r,
            _ => return Err(UseCaseError::NotFound(self.reminder_id.clone())),
        };

        let is_owner = reminder.owner_id == self.user_id;
        if !can_modify_reminder(
            &self.policy,
            is_owner,
            reminder.is_global,
            Permission::DeleteReminder,
            Permission::DeleteGlobalReminder,
        ) {
            return Err(UseCaseError::NotAllowed);
        }

        ctx.repos
            .reminders
            .delete(&reminder.id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(reminder)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use beacon_infra::setup_context_inmemory;
    use chrono::NaiveDate;
    use serde_json::json;

    fn policy_from(value: serde_json::Value) -> Policy {
        serde_json::from_value(value).unwrap()
    }

    #[actix_web::main]
    #[test]
    async fn owner_can_delete_a_personal_reminder() {
        let ctx = setup_context_inmemory();
        let owner = ID::new();
        let due = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let reminder = Reminder::new(owner.clone(), "Tidy up".into(), due, 0);
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        let usecase = DeleteReminderUseCase {
            user_id: owner,
            policy: policy_from(json!({ "allow": ["DeleteReminder"] })),
            reminder_id: reminder.id.clone(),
        };
        execute(usecase, &ctx).await.unwrap();

        assert!(ctx.repos.reminders.find(&reminder.id).await.is_none());
    }

    #[actix_web::main]
    #[test]
    async fn deleting_a_global_reminder_takes_the_global_permission() {
        let ctx = setup_context_inmemory();
        let owner = ID::new();
        let due = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let mut reminder = Reminder::new(owner.clone(), "Shared".into(), due, 0);
        reminder.is_global = true;
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        let usecase = DeleteReminderUseCase {
            user_id: owner.clone(),
            policy: policy_from(json!({ "allow": ["DeleteReminder"] })),
            reminder_id: reminder.id.clone(),
        };
        let res = execute(usecase, &ctx).await;
        assert!(matches!(res, Err(UseCaseError::NotAllowed)));

        let usecase = DeleteReminderUseCase {
            user_id: owner,
            policy: policy_from(json!({ "allow": ["DeleteGlobalReminder"] })),
            reminder_id: reminder.id.clone(),
        };
        execute(usecase, &ctx).await.unwrap();
        assert!(ctx.repos.reminders.find(&reminder.id).await.is_none());
    }
}
