use crate::error::BeaconError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use beacon_api_structs::get_calendar_feed::QueryParams;
use beacon_domain::{render_calendar_feed, FeedEntry, ID};
use beacon_infra::BeaconContext;

/// Token-authenticated feed for calendar apps. No Bearer auth; the token in
/// the query string is the whole credential.
pub async fn get_calendar_feed_controller(
    query: web::Query<QueryParams>,
    ctx: web::Data<BeaconContext>,
) -> Result<HttpResponse, BeaconError> {
    let usecase = GetCalendarFeedUseCase {
        token: query.token.clone(),
    };

    execute(usecase, &ctx).await.map_err(BeaconError::from).map(|feed| {
        HttpResponse::Ok()
            .content_type("text/calendar; charset=utf-8")
            // The feed reflects live state and calendar apps poll it
            .insert_header(("Cache-Control", "no-store"))
            .insert_header(("Content-Disposition", "inline; filename=\"reminders.ics\""))
            .body(feed)
    })
}

#[derive(Debug)]
pub struct GetCalendarFeedUseCase {
    pub token: String,
}

#[derive(Debug)]
pub enum UseCaseError {
    UnknownToken,
}

impl From<UseCaseError> for BeaconError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::UnknownToken => {
                Self::Unauthorized("The provided calendar token is not valid".into())
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetCalendarFeedUseCase {
    type Response = String;

    type Error = UseCaseError;

    const NAME: &'static str = "GetCalendarFeed";

    async fn execute(&mut self, ctx: &BeaconContext) -> Result<Self::Response, Self::Error> {
        let calendar_token = ctx
            .repos
            .calendar_tokens
            .find_by_token(&self.token)
            .await
            .ok_or(UseCaseError::UnknownToken)?;

        let reminders = ctx
            .repos
            .reminders
            .find_visible_to(&calendar_token.user_id)
            .await;

        let document_ids: Vec<ID> = reminders
            .iter()
            .filter_map(|r| r.document_id.clone())
            .collect();
        let documents = ctx.repos.documents.find_many(&document_ids).await;

        let entries: Vec<FeedEntry> = reminders
            .into_iter()
            .map(|reminder| {
                let document = reminder
                    .document_id
                    .as_ref()
                    .and_then(|id| documents.iter().find(|d| d.id == *id).cloned());
                FeedEntry { reminder, document }
            })
            .collect();

        Ok(render_calendar_feed(&entries, ctx.sys.get_utc_now()))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use beacon_domain::{CalendarToken, Reminder};
    use beacon_infra::setup_context_inmemory;
    use chrono::NaiveDate;

    #[actix_web::main]
    #[test]
    async fn unknown_tokens_are_rejected() {
        let ctx = setup_context_inmemory();
        let res = execute(
            GetCalendarFeedUseCase {
                token: "bogus".into(),
            },
            &ctx,
        )
        .await;
        assert!(matches!(res, Err(UseCaseError::UnknownToken)));
    }

    #[actix_web::main]
    #[test]
    async fn feed_covers_owned_and_global_reminders() {
        let ctx = setup_context_inmemory();
        let user = ID::new();
        let colleague = ID::new();

        let due = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let own = Reminder::new(user.clone(), "Own task".into(), due, 0);
        let mut global = Reminder::new(colleague.clone(), "Team task".into(), due, 0);
        global.is_global = true;
        let foreign = Reminder::new(colleague, "Private task".into(), due, 0);
        ctx.repos.reminders.insert(&own).await.unwrap();
        ctx.repos.reminders.insert(&global).await.unwrap();
        ctx.repos.reminders.insert(&foreign).await.unwrap();

        let calendar_token = CalendarToken::new(user, 0);
        ctx.repos.calendar_tokens.upsert(&calendar_token).await.unwrap();

        let feed = execute(
            GetCalendarFeedUseCase {
                token: calendar_token.token,
            },
            &ctx,
        )
        .await
        .unwrap();

        assert!(feed.starts_with("BEGIN:VCALENDAR"));
        assert!(feed.contains("SUMMARY:Own task"));
        assert!(feed.contains("SUMMARY:Team task"));
        assert!(!feed.contains("Private task"));
    }
}
