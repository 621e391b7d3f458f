//! User session handlers
//!
//! Registration, login, logout and refresh. The refresh token is read from
//! and written to the `REFRESH_TOKEN` cookie, never the JSON body.

use axum::{extract::State, response::IntoResponse, Json};
use axum_extra::extract::cookie::CookieJar;
use auth_service::dto::{
    AuthenticatedUser, LoginRequest, LogoutAllResponse, MessageResponse, RefreshResponse,
    RegisterRequest, UserResponse,
};

use crate::cookies;
use crate::extractors::{AuthUser, ClientFingerprint, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Register a new user
///
/// POST /users/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<Created<Json<MessageResponse>>> {
    state.auth().register(request).await?;
    Ok(Created(Json(MessageResponse::new("You are registered."))))
}

/// Login with email and password
///
/// POST /users/login
pub async fn login(
    State(state): State<AppState>,
    ClientFingerprint(fingerprint): ClientFingerprint,
    jar: CookieJar,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let service = state.auth();
    let outcome = service.login(request, &fingerprint).await?;
    let body: UserResponse = service.build_user_response(outcome.user)?;
    let jar = state.refresh_cookie().issue(jar, outcome.refresh_token);

    Ok((jar, Json(body)))
}

/// Logout the current device
///
/// POST /users/logout
pub async fn logout(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    jar: CookieJar,
) -> ApiResult<impl IntoResponse> {
    state.auth().logout(cookies::refresh_token(&jar)).await?;

    Ok((
        state.refresh_cookie().clear(jar),
        Json(MessageResponse::new("You are logged out.")),
    ))
}

/// Logout every device of the current user
///
/// POST /users/logout-all
pub async fn logout_all(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    jar: CookieJar,
) -> ApiResult<impl IntoResponse> {
    let revoked = state.auth().logout_all(user.id).await?;

    Ok((
        state.refresh_cookie().clear(jar),
        Json(LogoutAllResponse { revoked }),
    ))
}

/// Rotate the refresh token and mint a new access token
///
/// GET /users/refresh
pub async fn refresh(
    State(state): State<AppState>,
    ClientFingerprint(fingerprint): ClientFingerprint,
    jar: CookieJar,
) -> ApiResult<impl IntoResponse> {
    let outcome = state
        .auth()
        .refresh(cookies::refresh_token(&jar), &fingerprint)
        .await?;
    let jar = state.refresh_cookie().issue(jar, outcome.refresh_token.clone());

    Ok((jar, Json(RefreshResponse::from(outcome))))
}

/// Current user
///
/// GET /users/me
pub async fn me(AuthUser(user): AuthUser) -> Json<AuthenticatedUser> {
    Json(user)
}
