use crate::error::BeaconError;
use crate::shared::{
    auth::{protect_route, Permission},
    usecase::{execute_with_policy, PermissionBoundary, UseCase, UseCaseErrorContainer},
};
use actix_web::{web, HttpRequest, HttpResponse};
use beacon_api_structs::create_reminder::{APIResponse, RequestBody};
use beacon_domain::{parse_calendar_date, Reminder, ReminderValidationError, ID};
use beacon_infra::BeaconContext;

pub async fn create_reminder_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<BeaconContext>,
) -> Result<HttpResponse, BeaconError> {
    let (user, policy) = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = CreateReminderUseCase {
        owner_id: user.id,
        title: body.title,
        description: body.description,
        rrule: body.rrule,
        next_due: body.next_due,
        advance_notice_days: body.advance_notice_days,
        document_id: body.document_id,
        is_global: body.is_global,
    };

    execute_with_policy(usecase, &policy, &ctx)
        .await
        .map(|reminder| HttpResponse::Created().json(APIResponse::new(reminder)))
        .map_err(BeaconError::from)
}

#[derive(Debug)]
pub struct CreateReminderUseCase {
    pub owner_id: ID,
    pub title: String,
    pub description: Option<String>,
    pub rrule: Option<String>,
    pub next_due: String,
    pub advance_notice_days: i64,
    pub document_id: Option<ID>,
    pub is_global: bool,
}

#[derive(Debug)]
pub enum UseCaseError {
    InvalidDate(String),
    InvalidFields(ReminderValidationError),
    DocumentNotFound(ID),
    StorageError,
}

impl From<UseCaseError> for BeaconError {
    fn from(e: UseCaseError) -> Self {
        match e {
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

impl From<UseCaseErrorContainer<UseCaseError>> for BeaconError {
    fn from(e: UseCaseErrorContainer<UseCaseError>) -> Self {
        match e {
            UseCaseErrorContainer::Unauthorized(e) => Self::Unauthorized(e),
            UseCaseErrorContainer::UseCase(e) => e.into(),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateReminder";

    async fn execute(&mut self, ctx: &BeaconContext) -> Result<Self::Response, Self::Error> {
        let next_due =
            parse_calendar_date(&self.next_due).map_err(UseCaseError::InvalidDate)?;

        let mut reminder = Reminder::new(
            self.owner_id.clone(),
            self.title.clone(),
            next_due,
            ctx.sys.get_timestamp_millis(),
        );
        reminder.description = self.description.clone();
        reminder.rrule = self.rrule.clone();
        reminder.advance_notice_days = self.advance_notice_days;
        reminder.document_id = self.document_id.clone();
        reminder.is_global = self.is_global;

        reminder.validate().map_err(UseCaseError::InvalidFields)?;

        if let Some(document_id) = &self.document_id {
            if ctx.repos.documents.find(document_id).await.is_none() {
                return Err(UseCaseError::DocumentNotFound(document_id.clone()));
            }
        }

        ctx.repos
            .reminders
            .insert(&reminder)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(reminder)
    }
}

impl PermissionBoundary for CreateReminderUseCase {
    fn permissions(&self) -> Vec<Permission> {
        let mut permissions = vec![Permission::CreateReminder];
        if self.is_global {
            permissions.push(Permission::CreateGlobalReminder);
        }
        permissions
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::usecase::execute;
    use beacon_infra::setup_context_inmemory;

    fn usecase(title: &str) -> CreateReminderUseCase {
        CreateReminderUseCase {
            owner_id: ID::new(),
            title: title.into(),
            description: None,
            rrule: None,
            next_due: "2025-03-01".into(),
            advance_notice_days: 7,
            document_id: None,
            is_global: false,
        }
    }

    #[actix_web::main]
    #[test]
    async fn creates_and_persists_a_reminder() {
        let ctx = setup_context_inmemory();
        let reminder = execute(usecase("Renew domain"), &ctx).await.unwrap();

        let stored = ctx.repos.reminders.find(&reminder.id).await.unwrap();
        assert_eq!(stored.title, "Renew domain");
        assert_eq!(stored.advance_notice_days, 7);
    }

    #[actix_web::main]
    #[test]
    async fn rejects_malformed_due_dates() {
        let ctx = setup_context_inmemory();
        for bad in ["2025-02-30", "03/01/2025", "someday"] {
            let mut uc = usecase("Renew domain");
            uc.next_due = bad.into();
            let res = execute(uc, &ctx).await;
            assert!(matches!(res, Err(UseCaseError::InvalidDate(_))));
        }
    }

    #[actix_web::main]
    #[test]
    async fn rejects_invalid_fields() {
        let ctx = setup_context_inmemory();
        let res = execute(usecase(""), &ctx).await;
        assert!(matches!(res, Err(UseCaseError::InvalidFields(_))));
    }

    #[actix_web::main]
    #[test]
    async fn rejects_unknown_document_link() {
        let ctx = setup_context_inmemory();
        let mut uc = usecase("Review handbook");
        uc.document_id = Some(ID::new());
        let res = execute(uc, &ctx).await;
        assert!(matches!(res, Err(UseCaseError::DocumentNotFound(_))));
    }
}
