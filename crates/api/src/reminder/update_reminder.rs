use crate::error::BeaconError;
use crate::shared::{
    auth::{can_modify_reminder, protect_route, Permission, Policy},
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use beacon_api_structs::update_reminder::{APIResponse, PathParams, RequestBody};
use beacon_domain::{
    parse_calendar_date, validate_advance_notice_days, validate_description, validate_rrule_field,
    validate_title, Reminder, ReminderValidationError, ID,
};
use beacon_infra::BeaconContext;

pub async fn update_reminder_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<BeaconContext>,
) -> Result<HttpResponse, BeaconError> {
    let (user, policy) = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = UpdateReminderUseCase {
        user_id: user.id,
        policy,
        reminder_id: path.reminder_id.clone(),
        title: body.title,
        description: body.description,
        rrule: body.rrule,
        next_due: body.next_due,
        advance_notice_days: body.advance_notice_days,
        document_id: body.document_id,
        is_global: body.is_global,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(reminder)))
        .map_err(BeaconError::from)
}

/// Partial update. Permission is checked against the scope of the stored
/// record, so the usecase carries the caller's policy instead of declaring a
/// static `PermissionBoundary`.
#[derive(Debug)]
pub struct UpdateReminderUseCase {
    pub user_id: ID,
    pub policy: Policy,
    pub reminder_id: ID,
    pub title: Option<String>,
    pub description: Option<String>,
    pub rrule: Option<String>,
    pub next_due: Option<String>,
    pub advance_notice_days: Option<i64>,
    pub document_id: Option<ID>,
    pub is_global: Option<bool>,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    NotAllowed,
    InvalidDate(String),
    InvalidFields(ReminderValidationError),
    DocumentNotFound(ID),
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
                Self::NotAllowed("Client is not permitted to modify this reminder".into())
            }
            UseCaseError::InvalidDate(date) => Self::BadClientData(format!(
                "nextDue: `{}` is not a valid YYYY-MM-DD calendar date",
                date
            )),
            UseCaseError::InvalidFields(e) => Self::BadClientData(e.to_string()),
            UseCaseError::DocumentNotFound(document_id) => Self::NotFound(format!(
                "The document with id: {}, was not found.",
                document_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateReminder";

    async fn execute(&mut self, ctx: &BeaconContext) -> Result<Self::Response, Self::Error> {
        let mut reminder = match ctx.repos.reminders.find(&self.reminder_id).await {
            Some(r) if r.owner_id == self.user_id || r.is_global => r,
            _ => return Err(UseCaseError::NotFound(self.reminder_id.clone())),
        };

        let is_owner = reminder.owner_id == self.user_id;
        if !can_modify_reminder(
            &self.policy,
            is_owner,
            reminder.is_global,
            Permission::UpdateReminder,
            Permission::UpdateGlobalReminder,
        ) {
            return Err(UseCaseError::NotAllowed);
        }

        // Promoting a personal reminder to global takes the global add
        // permission on top of the update permission above.
        if self.is_global == Some(true)
            && !reminder.is_global
            && !self.policy.authorize(&[Permission::CreateGlobalReminder])
        {
            return Err(UseCaseError::NotAllowed);
        }

        if let Some(title) = &self.title {
            validate_title(title).map_err(UseCaseError::InvalidFields)?;
            reminder.title = title.clone();
        }
        if let Some(description) = &self.description {
            validate_description(description).map_err(UseCaseError::InvalidFields)?;
            reminder.description = Some(description.clone());
        }
        if let Some(rrule) = &self.rrule {
            validate_rrule_field(rrule).map_err(UseCaseError::InvalidFields)?;
            reminder.rrule = Some(rrule.clone());
        }
        if let Some(next_due) = &self.next_due {
            reminder.next_due =
                parse_calendar_date(next_due).map_err(UseCaseError::InvalidDate)?;
        }
        if let Some(days) = self.advance_notice_days {
            validate_advance_notice_days(days).map_err(UseCaseError::InvalidFields)?;
            reminder.advance_notice_days = days;
        }
        if let Some(document_id) = &self.document_id {
            if ctx.repos.documents.find(document_id).await.is_none() {
                return Err(UseCaseError::DocumentNotFound(document_id.clone()));
            }
            reminder.document_id = Some(document_id.clone());
        }
        if let Some(is_global) = self.is_global {
            reminder.is_global = is_global;
        }
        reminder.updated = ctx.sys.get_timestamp_millis();

        ctx.repos
            .reminders
            .save(&reminder)
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

    fn usecase(user_id: ID, reminder_id: ID, policy: Policy) -> UpdateReminderUseCase {
        UpdateReminderUseCase {
            user_id,
            policy,
            reminder_id,
            title: None,
            description: None,
            rrule: None,
            next_due: None,
            advance_notice_days: None,
            document_id: None,
            is_global: None,
        }
    }

    #[actix_web::main]
    #[test]
    async fn partial_update_keeps_unspecified_fields() {
        let ctx = setup_context_inmemory();
        let owner = ID::new();
        let due = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let mut reminder = Reminder::new(owner.clone(), "Before".into(), due, 0);
        reminder.advance_notice_days = 5;
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        let policy = policy_from(json!({ "allow": ["*"] }));
        let mut uc = usecase(owner, reminder.id.clone(), policy);
        uc.title = Some("After".into());

        let updated = execute(uc, &ctx).await.unwrap();
        assert_eq!(updated.title, "After");
        assert_eq!(updated.advance_notice_days, 5);
        assert_eq!(updated.next_due, due);
    }

    #[actix_web::main]
    #[test]
    async fn promoting_to_global_requires_global_add_permission() {
        let ctx = setup_context_inmemory();
        let owner = ID::new();
        let due = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let reminder = Reminder::new(owner.clone(), "Keep private".into(), due, 0);
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        let policy = policy_from(json!({ "allow": ["UpdateReminder"] }));
        let mut uc = usecase(owner.clone(), reminder.id.clone(), policy);
        uc.is_global = Some(true);
        let res = execute(uc, &ctx).await;
        assert!(matches!(res, Err(UseCaseError::NotAllowed)));

        let policy = policy_from(json!({ "allow": ["UpdateReminder", "CreateGlobalReminder"] }));
        let mut uc = usecase(owner, reminder.id.clone(), policy);
        uc.is_global = Some(true);
        assert!(execute(uc, &ctx).await.unwrap().is_global);
    }

    #[actix_web::main]
    #[test]
    async fn global_reminders_take_the_global_edit_permission() {
        let ctx = setup_context_inmemory();
        let owner = ID::new();
        let colleague = ID::new();
        let due = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let mut reminder = Reminder::new(owner, "Shared".into(), due, 0);
        reminder.is_global = true;
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        let policy = policy_from(json!({ "allow": ["UpdateReminder"] }));
        let res = execute(usecase(colleague.clone(), reminder.id.clone(), policy), &ctx).await;
        assert!(matches!(res, Err(UseCaseError::NotAllowed)));

        let policy = policy_from(json!({ "allow": ["UpdateGlobalReminder"] }));
        let mut uc = usecase(colleague, reminder.id.clone(), policy);
        uc.title = Some("Shared v2".into());
        assert_eq!(execute(uc, &ctx).await.unwrap().title, "Shared v2");
    }
}
