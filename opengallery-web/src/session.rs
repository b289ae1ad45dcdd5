//! Session and flash-message cookies
//!
//! Two cookies, both `HttpOnly` and `SameSite=Lax`:
//!
//! - `opengallery_session` holds a signed session token
//!   (see [`opengallery_shared::auth::session`]).
//! - `opengallery_flash` holds one-shot messages as percent-encoded JSON.
//!   A redirect sets it; the next rendered page shows the messages and
//!   clears it.

use axum::{
    http::{header, HeaderMap},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use cookie::{time::Duration, Cookie, SameSite};
use serde::{Deserialize, Serialize};

pub const SESSION_COOKIE: &str = "opengallery_session";
pub const FLASH_COOKIE: &str = "opengallery_flash";

/// Severity of a flash message; doubles as its CSS class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl FlashLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashLevel::Success => "success",
            FlashLevel::Info => "info",
            FlashLevel::Warning => "warning",
            FlashLevel::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub text: String,
}

impl FlashMessage {
    pub fn new(level: FlashLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }
}

/// Value of the named cookie in the request, if present
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| Cookie::split_parse_encoded(value.to_string()))
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == name)
        .map(|cookie| cookie.value().to_string())
}

/// Decodes the flash cookie; anything malformed reads as no messages.
pub fn parse_flashes(value: &str) -> Vec<FlashMessage> {
    serde_json::from_str(value).unwrap_or_default()
}

fn base_cookie(name: &'static str, value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

/// `Set-Cookie` value carrying a session token
pub fn session_cookie(token: String, ttl_hours: i64, secure: bool) -> String {
    let mut cookie = base_cookie(SESSION_COOKIE, token, secure);
    cookie.set_max_age(Duration::hours(ttl_hours));
    cookie.to_string()
}

/// `Set-Cookie` value that deletes the named cookie
pub fn removal_cookie(name: &'static str) -> String {
    let mut cookie = base_cookie(name, String::new(), false);
    cookie.make_removal();
    cookie.to_string()
}

/// `Set-Cookie` value carrying flash messages
pub fn flash_cookie(messages: &[FlashMessage]) -> String {
    let json = serde_json::to_string(messages).unwrap_or_else(|_| "[]".to_string());
    base_cookie(FLASH_COOKIE, json, false).encoded().to_string()
}

/// 303 redirect that leaves a message for the next page
pub fn flash_redirect(to: &str, level: FlashLevel, text: impl Into<String>) -> Response {
    let message = FlashMessage::new(level, text);
    (
        AppendHeaders([(header::SET_COOKIE, flash_cookie(&[message]))]),
        Redirect::to(to),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_flash_cookie_round_trip() {
        let messages = vec![
            FlashMessage::new(FlashLevel::Success, "Account created for 김작가!"),
            FlashMessage::new(FlashLevel::Warning, "50% done; \"quoted\""),
        ];

        let set_cookie = flash_cookie(&messages);
        assert!(set_cookie.starts_with("opengallery_flash="));
        assert!(set_cookie.contains("HttpOnly"));
        assert!(set_cookie.contains("SameSite=Lax"));

        let pair = set_cookie.split(';').next().unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(pair).unwrap());

        let value = read_cookie(&headers, FLASH_COOKIE).unwrap();
        assert_eq!(parse_flashes(&value), messages);
    }

    #[test]
    fn test_read_cookie_among_several() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; opengallery_session=abc.def.ghi; other=1"),
        );

        assert_eq!(
            read_cookie(&headers, SESSION_COOKIE).as_deref(),
            Some("abc.def.ghi")
        );
        assert_eq!(read_cookie(&headers, FLASH_COOKIE), None);
    }

    #[test]
    fn test_malformed_flash_is_ignored() {
        assert!(parse_flashes("not json").is_empty());
        assert!(parse_flashes("").is_empty());
    }

    #[test]
    fn test_session_cookie_attributes() {
        let set_cookie = session_cookie("token".to_string(), 2, true);
        assert!(set_cookie.starts_with("opengallery_session=token"));
        assert!(set_cookie.contains("HttpOnly"));
        assert!(set_cookie.contains("Secure"));
        assert!(set_cookie.contains("Max-Age=7200"));
        assert!(set_cookie.contains("Path=/"));
    }

    #[test]
    fn test_removal_cookie_expires_immediately() {
        let set_cookie = removal_cookie(SESSION_COOKIE);
        assert!(set_cookie.starts_with("opengallery_session=;"));
        assert!(set_cookie.contains("Max-Age=0"));
    }

    #[test]
    fn test_flash_redirect() {
        let response = flash_redirect("/", FlashLevel::Error, "Nope");
        assert_eq!(response.status(), axum::http::StatusCode::SEE_OTHER);
        assert!(response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("opengallery_flash="));
    }
}
