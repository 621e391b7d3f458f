//! Bearer guard
//!
//! `AuthUser` resolves `Authorization: Bearer <access token>` to the account
//! it was issued for. Handlers that take it are reachable only with a live
//! access token.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use auth_service::dto::AuthenticatedUser;

use crate::response::ApiError;
use crate::state::AppState;

/// Caller identity proven by an access token
#[derive(Debug, Clone)]
pub struct AuthUser(pub AuthenticatedUser);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts, state).await?;
        let app_state = AppState::from_ref(state);

        app_state
            .auth()
            .authenticate(&token)
            .await
            .map(AuthUser)
            .map_err(ApiError::from)
    }
}

/// Raw bearer credential, or `MissingAuth` when the header is absent or not
/// a bearer scheme
async fn bearer_token<S>(parts: &mut Parts, state: &S) -> Result<String, ApiError>
where
    S: Send + Sync,
{
    match TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state).await {
        Ok(TypedHeader(Authorization(bearer))) if !bearer.token().is_empty() => {
            Ok(bearer.token().to_string())
        }
        _ => Err(ApiError::MissingAuth),
    }
}
