//! Session cookie helpers
//!
//! The API keeps the session token in a single HttpOnly cookie.

use axum::http::{header, HeaderMap, HeaderValue};
use cookie::{time, Cookie, SameSite};
use std::time::Duration;

use crate::errors::{WebError, INTERNAL_ERROR_MESSAGE};

/// Read a cookie value by name from the `Cookie` request headers
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .filter(|cookie| cookie.name() == name)
        .map(|cookie| cookie.value().to_string())
        .find(|value| !value.is_empty())
}

/// Attributes of the session cookie set at login and cleared at logout
#[derive(Debug, Clone)]
pub struct SessionCookie {
    pub name: String,
    pub max_age: Duration,
    pub secure: bool,
}

impl SessionCookie {
    pub fn new(name: impl Into<String>, max_age: Duration, secure: bool) -> Self {
        Self {
            name: name.into(),
            max_age,
            secure,
        }
    }

    /// `Set-Cookie` value carrying the session token
    pub fn session(&self, token: &str) -> Result<HeaderValue, WebError> {
        let max_age = i64::try_from(self.max_age.as_secs()).unwrap_or(i64::MAX);
        let cookie = self.builder(token.to_string()).max_age(time::Duration::seconds(max_age)).build();
        to_header(&cookie)
    }

    /// `Set-Cookie` value that expires the session immediately
    pub fn clear(&self) -> Result<HeaderValue, WebError> {
        let mut cookie = self.builder(String::new()).build();
        cookie.make_removal();
        to_header(&cookie)
    }

    fn builder(&self, value: String) -> cookie::CookieBuilder<'static> {
        Cookie::build((self.name.clone(), value))
            .http_only(true)
            .path("/")
            .same_site(SameSite::Lax)
            .secure(self.secure)
    }
}

fn to_header(cookie: &Cookie<'_>) -> Result<HeaderValue, WebError> {
    HeaderValue::from_str(&cookie.to_string()).map_err(|e| {
        tracing::error!("Invalid session cookie: {}", e);
        WebError::internal(INTERNAL_ERROR_MESSAGE)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_cookie_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; auth_token=abc.def.ghi; lang=pt"),
        );

        assert_eq!(read_cookie(&headers, "auth_token").as_deref(), Some("abc.def.ghi"));
        assert_eq!(read_cookie(&headers, "lang").as_deref(), Some("pt"));
        assert!(read_cookie(&headers, "missing").is_none());
    }

    #[test]
    fn test_read_cookie_ignores_empty_value() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("auth_token="));
        assert!(read_cookie(&headers, "auth_token").is_none());
    }

    #[test]
    fn test_read_cookie_skips_malformed_pairs() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("garbage; auth_token=abc"));
        headers.append(header::COOKIE, HeaderValue::from_static("other=1"));

        assert_eq!(read_cookie(&headers, "auth_token").as_deref(), Some("abc"));
        assert_eq!(read_cookie(&headers, "other").as_deref(), Some("1"));
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = SessionCookie::new("auth_token", Duration::from_secs(604800), false);

        let set = cookie.session("token123").unwrap();
        let parsed = Cookie::parse(set.to_str().unwrap().to_string()).unwrap();
        assert_eq!(parsed.name(), "auth_token");
        assert_eq!(parsed.value(), "token123");
        assert_eq!(parsed.http_only(), Some(true));
        assert_eq!(parsed.path(), Some("/"));
        assert_eq!(parsed.same_site(), Some(SameSite::Lax));
        assert_eq!(parsed.max_age(), Some(time::Duration::seconds(604800)));
        assert_eq!(parsed.secure(), None);
    }

    #[test]
    fn test_cleared_cookie_expires_immediately() {
        let cookie = SessionCookie::new("auth_token", Duration::from_secs(604800), false);

        let cleared = cookie.clear().unwrap();
        let value = cleared.to_str().unwrap();
        assert!(value.starts_with("auth_token=;"));
        assert!(value.contains("Max-Age=0"));
        assert!(value.contains("HttpOnly"));
    }

    #[test]
    fn test_secure_flag() {
        let cookie = SessionCookie::new("auth_token", Duration::from_secs(60), true);
        let set = cookie.session("t").unwrap();
        let parsed = Cookie::parse(set.to_str().unwrap().to_string()).unwrap();
        assert_eq!(parsed.secure(), Some(true));
    }
}
