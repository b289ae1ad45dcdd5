//! Per-request context
//!
//! Every page handler takes a [`RequestContext`] as an extractor. It
//! resolves the session cookie into an [`AuthContext`] and collects pending
//! flash messages, so handlers and templates get the current user passed in
//! explicitly.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
    response::{AppendHeaders, IntoResponse, Response},
};
use maud::Markup;
use opengallery_shared::auth::context::{AuthContext, Role};
use opengallery_shared::auth::session::validate_session_token;
use tracing::debug;

use crate::app::AppState;
use crate::error::{ApiError, PageError};
use crate::session::{
    parse_flashes, read_cookie, removal_cookie, FlashMessage, FLASH_COOKIE, SESSION_COOKIE,
};

#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub auth: AuthContext,

    /// Messages to show on the page being rendered
    pub messages: Vec<FlashMessage>,

    /// Whether the request carried a flash cookie that must be cleared
    consumed_flash: bool,

    /// Whether the request carried a session cookie that no longer resolves
    stale_session: bool,
}

impl RequestContext {
    pub fn role(&self) -> Role {
        self.auth.role()
    }

    /// Turns rendered markup into a response, clearing the flash cookie
    /// once its messages have been shown and dropping a dead session.
    pub fn render(&self, markup: Markup) -> Response {
        let mut clear = Vec::new();
        if self.consumed_flash {
            clear.push((header::SET_COOKIE, removal_cookie(FLASH_COOKIE)));
        }
        if self.stale_session {
            clear.push((header::SET_COOKIE, removal_cookie(SESSION_COOKIE)));
        }

        (AppendHeaders(clear), markup).into_response()
    }

    async fn resolve(parts: &Parts, state: &AppState) -> Result<Self, sqlx::Error> {
        let mut ctx = RequestContext::default();

        if let Some(value) = read_cookie(&parts.headers, FLASH_COOKIE) {
            ctx.messages = parse_flashes(&value);
            ctx.consumed_flash = true;
        }

        let Some(token) = read_cookie(&parts.headers, SESSION_COOKIE) else {
            return Ok(ctx);
        };

        match validate_session_token(&token, state.session_secret()) {
            Ok(claims) => {
                ctx.auth = AuthContext::load(&state.db, claims.sub).await?;
                ctx.stale_session = ctx.auth.user.is_none();
            }
            Err(e) => {
                debug!(error = %e, "Ignoring invalid session cookie");
                ctx.stale_session = true;
            }
        }

        Ok(ctx)
    }
}

#[async_trait]
impl FromRequestParts<AppState> for RequestContext {
    type Rejection = PageError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self::resolve(parts, state).await?)
    }
}

/// [`RequestContext`] for the JSON endpoint, rejecting with a JSON body
pub struct ApiContext(pub RequestContext);

#[async_trait]
impl FromRequestParts<AppState> for ApiContext {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(ApiContext(RequestContext::resolve(parts, state).await?))
    }
}
