use crate::error::BeaconError;
use crate::shared::{auth::protect_route, usecase::execute, usecase::UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use beacon_api_structs::get_calendar_token;
use beacon_api_structs::regenerate_calendar_token;
use beacon_domain::{CalendarToken, ID};
use beacon_infra::BeaconContext;

pub async fn get_calendar_token_controller(
    http_req: HttpRequest,
    ctx: web::Data<BeaconContext>,
) -> Result<HttpResponse, BeaconError> {
    let (user, _policy) = protect_route(&http_req, &ctx).await?;

    let usecase = GetCalendarTokenUseCase { user_id: user.id };

    execute(usecase, &ctx)
        .await
        .map(|token| {
            HttpResponse::Ok().json(get_calendar_token::APIResponse {
                feed_url: feed_url(&ctx, &token),
                token: token.token,
            })
        })
        .map_err(BeaconError::from)
}

pub async fn regenerate_calendar_token_controller(
    http_req: HttpRequest,
    ctx: web::Data<BeaconContext>,
) -> Result<HttpResponse, BeaconError> {
    let (user, _policy) = protect_route(&http_req, &ctx).await?;

    let usecase = RegenerateCalendarTokenUseCase { user_id: user.id };

    execute(usecase, &ctx)
        .await
        .map(|token| {
            HttpResponse::Ok().json(regenerate_calendar_token::APIResponse {
                feed_url: feed_url(&ctx, &token),
                token: token.token,
            })
        })
        .map_err(BeaconError::from)
}

fn feed_url(ctx: &BeaconContext, token: &CalendarToken) -> String {
    format!(
        "{}/api/v1/calendar/feed?token={}",
        ctx.config.external_base_url, token.token
    )
}

/// Returns the user's live subscription token, minting one on first use.
#[derive(Debug)]
pub struct GetCalendarTokenUseCase {
    pub user_id: ID,
}

/// Replaces the user's subscription token. The previous feed URL stops
/// working immediately.
#[derive(Debug)]
pub struct RegenerateCalendarTokenUseCase {
    pub user_id: ID,
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

#[async_trait::async_trait(?Send)]
impl UseCase for GetCalendarTokenUseCase {
    type Response = CalendarToken;

    type Error = UseCaseError;

    const NAME: &'static str = "GetCalendarToken";

    async fn execute(&mut self, ctx: &BeaconContext) -> Result<Self::Response, Self::Error> {
        if let Some(existing) = ctx.repos.calendar_tokens.find_by_user(&self.user_id).await {
            return Ok(existing);
        }

        let token = CalendarToken::new(self.user_id.clone(), ctx.sys.get_timestamp_millis());
        ctx.repos
            .calendar_tokens
            .upsert(&token)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        Ok(token)
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for RegenerateCalendarTokenUseCase {
    type Response = CalendarToken;

    type Error = UseCaseError;

    const NAME: &'static str = "RegenerateCalendarToken";

    async fn execute(&mut self, ctx: &BeaconContext) -> Result<Self::Response, Self::Error> {
        let token = CalendarToken::new(self.user_id.clone(), ctx.sys.get_timestamp_millis());
        ctx.repos
            .calendar_tokens
            .upsert(&token)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        Ok(token)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use beacon_infra::setup_context_inmemory;

    #[actix_web::main]
    #[test]
    async fn get_is_stable_until_regenerated() {
        let ctx = setup_context_inmemory();
        let user = ID::new();

        let first = execute(GetCalendarTokenUseCase { user_id: user.clone() }, &ctx)
            .await
            .unwrap();
        let second = execute(GetCalendarTokenUseCase { user_id: user.clone() }, &ctx)
            .await
            .unwrap();
        assert_eq!(first.token, second.token);

        let regenerated = execute(
            RegenerateCalendarTokenUseCase { user_id: user.clone() },
            &ctx,
        )
        .await
        .unwrap();
        assert_ne!(regenerated.token, first.token);

        // The old token no longer resolves
        assert!(ctx.repos.calendar_tokens.find_by_token(&first.token).await.is_none());
        assert!(ctx
            .repos
            .calendar_tokens
            .find_by_token(&regenerated.token)
            .await
            .is_some());
    }
}
