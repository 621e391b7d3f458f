//! HTTP-level tests for the /users session endpoints.
//!
//! The full router and middleware stack run in-process against the in-memory
//! stores; requests are driven with `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use auth_api::{create_app, AppState};
use auth_common::{
    AppConfig, AppSettings, CookieConfig, CorsConfig, DatabaseConfig, Environment, JwtConfig,
    ServerConfig, SessionConfig, TokenCodec,
};
use auth_db::{InMemoryRefreshSessionRepository, InMemoryUserRepository};
use auth_service::ServiceContext;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn test_config() -> AppConfig {
    AppConfig {
        app: AppSettings {
            name: "auth-test".to_string(),
            env: Environment::Development,
        },
        api: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            url: "postgres://unused".to_string(),
            max_connections: 1,
            min_connections: 0,
        },
        jwt: JwtConfig {
            access_secret: "test-access-secret".to_string(),
            refresh_secret: "test-refresh-secret".to_string(),
            access_token_expiry: 1800,
            refresh_token_expiry: 1_296_000,
        },
        cookie: CookieConfig { secure: false },
        session: SessionConfig { sweep_interval: 0 },
        cors: CorsConfig {
            allowed_origins: vec![],
        },
    }
}

fn build_test_app() -> Router {
    let config = test_config();
    let ctx = ServiceContext::builder()
        .user_repo(Arc::new(InMemoryUserRepository::new()))
        .session_repo(Arc::new(InMemoryRefreshSessionRepository::new()))
        .token_codec(Arc::new(TokenCodec::from_config(&config.jwt)))
        .build()
        .unwrap();
    create_app(AppState::new(ctx, config))
}

const BROWSER: &str = "Mozilla/5.0 (X11; Linux x86_64) Firefox/128.0";

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::USER_AGENT, BROWSER)
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn refresh_request(cookie: Option<&str>, user_agent: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("GET")
        .uri("/users/refresh")
        .header(header::USER_AGENT, user_agent);
    if let Some(token) = cookie {
        builder = builder.header(header::COOKIE, format!("REFRESH_TOKEN={token}"));
    }
    builder.body(Body::empty()).unwrap()
}

fn authed(method: &str, uri: &str, access: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {access}"))
        .header(header::USER_AGENT, BROWSER);
    if let Some(token) = cookie {
        builder = builder.header(header::COOKIE, format!("REFRESH_TOKEN={token}"));
    }
    builder.body(Body::empty()).unwrap()
}

async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn set_cookie(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("response must set a cookie")
        .to_str()
        .unwrap()
        .to_string()
}

/// Value of REFRESH_TOKEN in a Set-Cookie header
fn cookie_value(set_cookie: &str) -> String {
    set_cookie
        .split(';')
        .next()
        .and_then(|pair| pair.strip_prefix("REFRESH_TOKEN="))
        .unwrap()
        .to_string()
}

fn register_body(username: &str, email: &str) -> Value {
    json!({
        "username": username,
        "email": email,
        "password": "1",
        "confirmedPassword": "1",
    })
}

/// Register and log in, returning (access token, refresh token)
async fn login(app: &Router) -> (String, String) {
    let response = app
        .clone()
        .oneshot(post_json("/users/register", &register_body("nikita", "nikita@gmail.com")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(post_json(
            "/users/login",
            &json!({"email": "nikita@gmail.com", "password": "1"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let refresh = cookie_value(&set_cookie(&response));
    let json = body_json(response).await;
    let access = json["user"]["token"].as_str().unwrap().to_string();
    (access, refresh)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_health() {
    let app = build_test_app();
    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(body_json(response).await["status"], "ok");
}

#[tokio::test]
async fn test_register_returns_message() {
    let app = build_test_app();
    let response = app
        .oneshot(post_json("/users/register", &register_body("nikita", "n@x.com")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(body_json(response).await["message"].is_string());
}

#[tokio::test]
async fn test_register_password_mismatch_is_422() {
    let app = build_test_app();
    let mut body = register_body("nikita", "n@x.com");
    body["confirmedPassword"] = json!("2");

    let response = app.oneshot(post_json("/users/register", &body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_register_invalid_email_is_422_with_details() {
    let app = build_test_app();
    let response = app
        .oneshot(post_json("/users/register", &register_body("nikita", "nope")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert!(json["error"]["details"]["email"].is_array());
}

#[tokio::test]
async fn test_register_duplicate_is_409() {
    let app = build_test_app();
    let first = app
        .clone()
        .oneshot(post_json("/users/register", &register_body("nikita", "n@x.com")))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .oneshot(post_json("/users/register", &register_body("other", "n@x.com")))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_malformed_json_is_400() {
    let app = build_test_app();
    let request = Request::builder()
        .method("POST")
        .uri("/users/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_sets_refresh_cookie_and_returns_user() {
    let app = build_test_app();
    app.clone()
        .oneshot(post_json("/users/register", &register_body("nikita", "n@x.com")))
        .await
        .unwrap();

    let response = app
        .oneshot(post_json("/users/login", &json!({"email": "n@x.com", "password": "1"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = set_cookie(&response);
    assert!(cookie.starts_with("REFRESH_TOKEN="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Strict"));
    assert!(cookie.contains("Max-Age=1296000"));

    let json = body_json(response).await;
    let user = &json["user"];
    assert_eq!(user["username"], "nikita");
    assert_eq!(user["email"], "n@x.com");
    assert_eq!(user["tokenExpiration"], 1800);
    assert!(user["token"].is_string());
    assert!(user["createdAt"].is_string());
    assert!(user.get("password").is_none());
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = build_test_app();
    app.clone()
        .oneshot(post_json("/users/register", &register_body("nikita", "n@x.com")))
        .await
        .unwrap();

    let wrong_password = app
        .clone()
        .oneshot(post_json("/users/login", &json!({"email": "n@x.com", "password": "2"})))
        .await
        .unwrap();
    let unknown_email = app
        .oneshot(post_json("/users/login", &json!({"email": "x@x.com", "password": "1"})))
        .await
        .unwrap();

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(wrong_password).await["error"],
        body_json(unknown_email).await["error"]
    );
}

#[tokio::test]
async fn test_refresh_rotates_cookie() {
    let app = build_test_app();
    let (_, refresh) = login(&app).await;

    let response = app
        .clone()
        .oneshot(refresh_request(Some(&refresh), BROWSER))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let rotated = cookie_value(&set_cookie(&response));
    assert_ne!(rotated, refresh);

    let json = body_json(response).await;
    assert!(json["accessToken"].is_string());
    assert_eq!(json["tokenExpiration"], 1800);
    assert!(json.get("refreshToken").is_none());

    // The consumed token is dead
    let reuse = app
        .oneshot(refresh_request(Some(&refresh), BROWSER))
        .await
        .unwrap();
    assert_eq!(reuse.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_without_cookie_is_401() {
    let app = build_test_app();
    let response = app.oneshot(refresh_request(None, BROWSER)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_from_other_device_is_403() {
    let app = build_test_app();
    let (_, refresh) = login(&app).await;

    let response = app
        .clone()
        .oneshot(refresh_request(Some(&refresh), "curl/8.5.0"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Still usable from the original device
    let response = app
        .oneshot(refresh_request(Some(&refresh), BROWSER))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_survives_network_change() {
    let app = build_test_app();
    app.clone()
        .oneshot(post_json("/users/register", &register_body("nikita", "n@x.com")))
        .await
        .unwrap();

    let mut login = post_json("/users/login", &json!({"email": "n@x.com", "password": "1"}));
    login
        .headers_mut()
        .insert("x-forwarded-for", "198.51.100.1".parse().unwrap());
    let response = app.clone().oneshot(login).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let refresh = cookie_value(&set_cookie(&response));

    // Same browser, different network
    let mut request = refresh_request(Some(&refresh), BROWSER);
    request
        .headers_mut()
        .insert("x-forwarded-for", "203.0.113.9".parse().unwrap());
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_me_requires_bearer() {
    let app = build_test_app();
    let (access, _) = login(&app).await;

    let missing = app
        .clone()
        .oneshot(Request::get("/users/me").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

    let garbage = app
        .clone()
        .oneshot(authed("GET", "/users/me", "garbage", None))
        .await
        .unwrap();
    assert_eq!(garbage.status(), StatusCode::UNAUTHORIZED);

    let ok = app
        .oneshot(authed("GET", "/users/me", &access, None))
        .await
        .unwrap();
    assert_eq!(ok.status(), StatusCode::OK);
    assert_eq!(body_json(ok).await["username"], "nikita");
}

#[tokio::test]
async fn test_logout_clears_cookie_and_kills_refresh() {
    let app = build_test_app();
    let (access, refresh) = login(&app).await;

    let response = app
        .clone()
        .oneshot(authed("POST", "/users/logout", &access, Some(&refresh)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let cleared = set_cookie(&response);
    assert!(cleared.starts_with("REFRESH_TOKEN=;"));
    assert!(cleared.contains("Max-Age=0"));

    let after = app
        .clone()
        .oneshot(refresh_request(Some(&refresh), BROWSER))
        .await
        .unwrap();
    assert_eq!(after.status(), StatusCode::UNAUTHORIZED);

    // Logging out again, or without a cookie, still succeeds
    let again = app
        .oneshot(authed("POST", "/users/logout", &access, None))
        .await
        .unwrap();
    assert_eq!(again.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_logout_requires_bearer() {
    let app = build_test_app();
    let (_, refresh) = login(&app).await;

    let request = Request::builder()
        .method("POST")
        .uri("/users/logout")
        .header(header::COOKIE, format!("REFRESH_TOKEN={refresh}"))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_all_reports_revoked() {
    let app = build_test_app();
    let (access, _) = login(&app).await;

    // a second session from another device
    let mut second = post_json(
        "/users/login",
        &json!({"email": "nikita@gmail.com", "password": "1"}),
    );
    second
        .headers_mut()
        .insert(header::USER_AGENT, "Safari".parse().unwrap());
    assert_eq!(app.clone().oneshot(second).await.unwrap().status(), StatusCode::OK);

    let response = app
        .oneshot(authed("POST", "/users/logout-all", &access, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookie(&response).contains("Max-Age=0"));
    assert_eq!(body_json(response).await["revoked"], 2);
}
