/// Account endpoints
///
/// - `GET/POST /accounts/signup` - Register a new account
/// - `GET/POST /accounts/login` - Start a session
/// - `GET /accounts/logout` - End the session
///
/// A session is an HS256 token in the `opengallery_session` cookie; the
/// [`RequestContext`] extractor turns it back into a user on each request.

use axum::{
    extract::State,
    http::header::SET_COOKIE,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
    Form,
};
use opengallery_shared::{
    auth::{
        password::{hash_password, verify_password},
        session::{create_session_token, SessionClaims},
    },
    models::user::{CreateUser, User},
};
use tracing::{info, warn};

use crate::{
    app::AppState,
    context::RequestContext,
    error::{PageError, PageResult},
    forms::{FormErrors, LoginForm, SignupForm, NON_FIELD},
    pages,
    session::{flash_redirect, removal_cookie, session_cookie, FlashLevel, SESSION_COOKIE},
};

pub const LOGIN_PATH: &str = "/accounts/login";

const USERNAME_TAKEN: &str = "A user with that username already exists.";
const INVALID_CREDENTIALS: &str = "Invalid username or password.";

pub async fn signup_page(ctx: RequestContext) -> Response {
    if ctx.auth.user.is_some() {
        return Redirect::to("/").into_response();
    }

    let page = pages::accounts::signup(&ctx, &SignupForm::default(), &FormErrors::default());
    ctx.render(page)
}

pub async fn signup(
    State(state): State<AppState>,
    ctx: RequestContext,
    Form(form): Form<SignupForm>,
) -> PageResult<Response> {
    let mut errors = form.validate().err().unwrap_or_default();
    let username = form.username.trim();

    if errors.field("username").is_empty()
        && !username.is_empty()
        && User::username_exists(&state.db, username).await?
    {
        errors.add("username", USERNAME_TAKEN);
    }

    if !errors.is_empty() {
        return Ok(ctx.render(pages::accounts::signup(&ctx, &form, &errors)));
    }

    let password_hash =
        hash_password(&form.password1).map_err(|e| PageError::Internal(e.to_string()))?;

    let created = User::create(
        &state.db,
        CreateUser {
            username: username.to_string(),
            password_hash,
            is_staff: false,
        },
    )
    .await;

    match created {
        Ok(user) => {
            info!(user_id = %user.id, username = %user.username, "Account created");
            Ok(flash_redirect(
                LOGIN_PATH,
                FlashLevel::Success,
                format!("Account created for {}!", user.username),
            ))
        }
        // Lost a race with another signup for the same name
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            errors.add("username", USERNAME_TAKEN);
            Ok(ctx.render(pages::accounts::signup(&ctx, &form, &errors)))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn login_page(ctx: RequestContext) -> Response {
    if ctx.auth.user.is_some() {
        return Redirect::to("/").into_response();
    }

    ctx.render(pages::accounts::login(&ctx, "", &FormErrors::default()))
}

pub async fn login(
    State(state): State<AppState>,
    ctx: RequestContext,
    Form(form): Form<LoginForm>,
) -> PageResult<Response> {
    let username = form.username.trim();

    let user = if username.is_empty() || form.password.is_empty() {
        None
    } else {
        User::find_by_username(&state.db, username).await?
    };

    let user = user.filter(|user| match verify_password(&form.password, &user.password_hash) {
        Ok(valid) => valid,
        Err(e) => {
            warn!(user_id = %user.id, error = %e, "Stored password hash is unusable");
            false
        }
    });

    let Some(user) = user else {
        let mut errors = FormErrors::default();
        errors.add(NON_FIELD, INVALID_CREDENTIALS);
        return Ok(ctx.render(pages::accounts::login(&ctx, username, &errors)));
    };

    User::update_last_login(&state.db, user.id).await?;

    let ttl_hours = state.config.session.ttl_hours;
    let claims = SessionClaims::new(user.id, chrono::Duration::hours(ttl_hours));
    let token = create_session_token(&claims, state.session_secret())
        .map_err(|e| PageError::Internal(e.to_string()))?;

    info!(user_id = %user.id, "User logged in");

    Ok((
        AppendHeaders([(
            SET_COOKIE,
            session_cookie(token, ttl_hours, state.config.server.production),
        )]),
        Redirect::to("/"),
    )
        .into_response())
}

pub async fn logout(ctx: RequestContext) -> Response {
    if let Some(user_id) = ctx.auth.user_id() {
        info!(user_id = %user_id, "User logged out");
    }

    (
        AppendHeaders([(SET_COOKIE, removal_cookie(SESSION_COOKIE))]),
        Redirect::to("/"),
    )
        .into_response()
}
