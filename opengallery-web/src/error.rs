/// Error handling for the web server
///
/// Two error types map failures onto HTTP:
///
/// - [`PageError`] for browser pages: redirects with a flash message,
///   plain 404/500 pages.
/// - [`ApiError`] for the JSON endpoint: an [`ErrorResponse`] body with a
///   4xx/5xx status.
///
/// Internal details are logged and never shown to the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use opengallery_shared::auth::authorization::AuthzError;
use opengallery_shared::models::artist::ARTIST_USER_UNIQUE_CONSTRAINT;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::pages;
use crate::session::{flash_redirect, FlashLevel};

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Page result type alias
pub type PageResult<T> = Result<T, PageError>;

/// Error type for the JSON endpoint
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400)
    BadRequest(String),

    /// Unauthorized (401)
    Unauthorized(String),

    /// Forbidden (403)
    Forbidden(String),

    /// Not found (404)
    NotFound(String),

    /// Conflict (409)
    Conflict(String),

    /// Internal server error (500)
    InternalError(String),
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code (e.g., "bad_request", "unauthorized")
    pub error: String,

    /// Human-readable error message
    pub message: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg),
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_code.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

/// Client-facing text for a violated constraint; names stay in the log
fn conflict_message(constraint: &str) -> &'static str {
    match constraint {
        ARTIST_USER_UNIQUE_CONSTRAINT => {
            "An applicant in this batch is already an artist; nothing was processed."
        }
        _ => "The request conflicts with existing data.",
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db_err) => {
                if let Some(constraint) = db_err.constraint() {
                    tracing::warn!(constraint, "Constraint violation");
                    return ApiError::Conflict(conflict_message(constraint).to_string());
                }
                ApiError::InternalError(format!("Database error: {}", db_err))
            }
            _ => ApiError::InternalError(format!("Database error: {}", err)),
        }
    }
}

impl From<AuthzError> for ApiError {
    fn from(err: AuthzError) -> Self {
        match err {
            AuthzError::LoginRequired => ApiError::Unauthorized("Login required.".to_string()),
            AuthzError::StaffOnly => {
                ApiError::Forbidden("You do not have permission to do this.".to_string())
            }
            AuthzError::ArtistOnly => {
                ApiError::Forbidden("An artist profile is required.".to_string())
            }
        }
    }
}

/// Error type for HTML pages
#[derive(Debug)]
pub enum PageError {
    /// Anonymous visitor on a protected page: go to the login form
    LoginRequired,

    /// Send the visitor elsewhere with a one-shot message
    Redirect {
        to: &'static str,
        level: FlashLevel,
        message: String,
    },

    /// 404 page
    NotFound,

    /// 500 page; the detail is logged only
    Internal(String),
}

impl PageError {
    /// Redirect home with an error message
    pub fn home(message: impl Into<String>) -> Self {
        PageError::Redirect {
            to: "/",
            level: FlashLevel::Error,
            message: message.into(),
        }
    }

    pub fn redirect(to: &'static str, level: FlashLevel, message: impl Into<String>) -> Self {
        PageError::Redirect {
            to,
            level,
            message: message.into(),
        }
    }
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageError::LoginRequired => write!(f, "Login required"),
            PageError::Redirect { to, message, .. } => write!(f, "Redirect to {}: {}", to, message),
            PageError::NotFound => write!(f, "Not found"),
            PageError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for PageError {}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self {
            PageError::LoginRequired => {
                Redirect::to(crate::routes::accounts::LOGIN_PATH).into_response()
            }
            PageError::Redirect { to, level, message } => flash_redirect(to, level, message),
            PageError::NotFound => {
                (StatusCode::NOT_FOUND, pages::errors::not_found()).into_response()
            }
            PageError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, pages::errors::internal_error()).into_response()
            }
        }
    }
}

impl From<sqlx::Error> for PageError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => PageError::NotFound,
            _ => PageError::Internal(format!("Database error: {}", err)),
        }
    }
}

impl From<AuthzError> for PageError {
    fn from(err: AuthzError) -> Self {
        match err {
            AuthzError::LoginRequired => PageError::LoginRequired,
            AuthzError::StaffOnly => PageError::home("Only staff can access this page."),
            AuthzError::ArtistOnly => PageError::home("You are not registered as an artist."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header;

    #[test]
    fn test_error_display() {
        let err = ApiError::BadRequest("Invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: Invalid input");

        let err = ApiError::NotFound("Application not found".to_string());
        assert_eq!(err.to_string(), "Not found: Application not found");
    }

    #[test]
    fn test_api_error_status_codes() {
        let cases = [
            (ApiError::BadRequest(String::new()), StatusCode::BAD_REQUEST),
            (ApiError::Unauthorized(String::new()), StatusCode::UNAUTHORIZED),
            (ApiError::Forbidden(String::new()), StatusCode::FORBIDDEN),
            (ApiError::InternalError(String::new()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_conflict_messages_hide_constraint_names() {
        assert_eq!(
            conflict_message(ARTIST_USER_UNIQUE_CONSTRAINT),
            "An applicant in this batch is already an artist; nothing was processed."
        );

        let generic = conflict_message("exhibition_artworks_pkey");
        assert!(!generic.contains("exhibition_artworks_pkey"));

        let response = ApiError::Conflict(generic.to_string()).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_authz_maps_to_api_status() {
        assert!(matches!(
            ApiError::from(AuthzError::LoginRequired),
            ApiError::Unauthorized(_)
        ));
        assert!(matches!(
            ApiError::from(AuthzError::StaffOnly),
            ApiError::Forbidden(_)
        ));
    }

    #[test]
    fn test_login_required_redirects_to_login() {
        let response = PageError::LoginRequired.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/accounts/login"
        );
    }

    #[test]
    fn test_forbidden_page_redirects_home_with_flash() {
        let response = PageError::from(AuthzError::StaffOnly).into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");
        assert!(response.headers().get(header::SET_COOKIE).is_some());
    }

    #[test]
    fn test_not_found_page() {
        let response = PageError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
