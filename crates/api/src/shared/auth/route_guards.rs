use super::policy::Policy;
use crate::error::BeaconError;
use actix_web::HttpRequest;
use beacon_domain::{User, ID};
use beacon_infra::BeaconContext;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

/// JWT claims minted by the hub for its signed in users
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Expiration time (as UTC timestamp)
    pub exp: usize,
    /// Issued at (as UTC timestamp)
    pub iat: usize,
    /// The `User` this token was issued for
    pub user_id: ID,
    /// The `Policy` restricting what actions the token holder can take
    #[serde(default)]
    pub policy: Policy,
}

fn parse_authtoken_header(token_header_value: &str) -> String {
    if token_header_value.len() < 6 || token_header_value[..6].to_lowercase() != "bearer" {
        String::new()
    } else {
        token_header_value[6..].trim().to_string()
    }
}

fn decode_token(token: &str, secret: &str) -> Result<Claims, BeaconError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map_err(|e| BeaconError::Unauthorized(format!("Invalid auth token. Error: {}", e)))?;

    Ok(token_data.claims)
}

/// Authenticates the request from the `Authorization: Bearer` header and
/// resolves the `User` it was issued for.
pub async fn protect_route(
    req: &HttpRequest,
    ctx: &BeaconContext,
) -> Result<(User, Policy), BeaconError> {
    let token = match req.headers().get("Authorization") {
        Some(token) => token.to_str().map_err(|_| {
            BeaconError::Unauthorized("Authorization header is not valid utf-8".into())
        })?,
        None => {
            return Err(BeaconError::Unauthorized(
                "Missing Authorization header".into(),
            ))
        }
    };
    let token = parse_authtoken_header(token);
    let claims = decode_token(&token, &ctx.config.jwt_secret)?;

    let user = ctx
        .repos
        .users
        .find(&claims.user_id)
        .await
        .ok_or_else(|| {
            BeaconError::Unauthorized(format!(
                "Could not find user with id: {}",
                claims.user_id
            ))
        })?;

    Ok((user, claims.policy))
}
