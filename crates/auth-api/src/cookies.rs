//! Refresh-token cookie
//!
//! The refresh token only ever travels in the `REFRESH_TOKEN` cookie:
//! `HttpOnly`, `SameSite=Strict`, `Path=/`, lifetime equal to the token's.

use auth_common::AppConfig;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

/// Name of the cookie carrying the refresh token
pub const REFRESH_COOKIE: &str = "REFRESH_TOKEN";

/// Cookie policy for the refresh token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshCookie {
    max_age: i64,
    secure: bool,
}

impl RefreshCookie {
    pub fn new(max_age: i64, secure: bool) -> Self {
        Self { max_age, secure }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.jwt.refresh_token_expiry, config.cookie.secure)
    }

    /// Cookie storing a refresh token
    pub fn build(&self, refresh_token: impl Into<String>) -> Cookie<'static> {
        Cookie::build((REFRESH_COOKIE, refresh_token.into()))
            .http_only(true)
            .same_site(SameSite::Strict)
            .path("/")
            .max_age(Duration::seconds(self.max_age))
            .secure(self.secure)
            .build()
    }

    /// Jar that sets the refresh cookie on the response
    pub fn issue(&self, jar: CookieJar, refresh_token: impl Into<String>) -> CookieJar {
        jar.add(self.build(refresh_token))
    }

    /// Jar that expires the refresh cookie, whether or not the request sent one
    pub fn clear(&self, jar: CookieJar) -> CookieJar {
        let mut removal = self.build("");
        removal.make_removal();
        jar.add(removal)
    }
}

/// Refresh token sent by the client, if any
pub fn refresh_token(jar: &CookieJar) -> Option<&str> {
    jar.get(REFRESH_COOKIE)
        .map(Cookie::value)
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use axum::http::{header, HeaderMap, HeaderValue};
    use axum::response::IntoResponse;

    use super::*;

    fn set_cookie_of(jar: CookieJar) -> String {
        let response = jar.into_response();
        response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_issue_attributes() {
        let cookie = RefreshCookie::new(1_296_000, false).build("abc.def");

        assert_eq!(cookie.name(), REFRESH_COOKIE);
        assert_eq!(cookie.value(), "abc.def");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(Duration::seconds(1_296_000)));
        assert_ne!(cookie.secure(), Some(true));
    }

    #[test]
    fn test_issue_renders_set_cookie() {
        let jar = RefreshCookie::new(1_296_000, false).issue(CookieJar::new(), "abc.def");
        let text = set_cookie_of(jar);

        assert!(text.starts_with("REFRESH_TOKEN=abc.def"));
        for attribute in ["HttpOnly", "SameSite=Strict", "Path=/", "Max-Age=1296000"] {
            assert!(text.contains(attribute), "{attribute} missing from {text}");
        }
        assert!(!text.contains("Secure"));
    }

    #[test]
    fn test_secure_flag() {
        let text = set_cookie_of(RefreshCookie::new(60, true).issue(CookieJar::new(), "t"));
        assert!(text.contains("; Secure"));
    }

    #[test]
    fn test_clear_expires_immediately() {
        // no cookie in the request, the removal is still sent
        let text = set_cookie_of(RefreshCookie::new(60, false).clear(CookieJar::new()));

        assert!(text.starts_with("REFRESH_TOKEN=;"));
        assert!(text.contains("Max-Age=0"));
        assert!(text.contains("Path=/"));
    }

    #[test]
    fn test_read_from_jar() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; REFRESH_TOKEN=tok"),
        );
        let jar = CookieJar::from_headers(&headers);
        assert_eq!(refresh_token(&jar), Some("tok"));

        let empty = CookieJar::from_headers(&HeaderMap::new());
        assert_eq!(refresh_token(&empty), None);
    }
}
