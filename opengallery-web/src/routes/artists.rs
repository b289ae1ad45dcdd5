/// Artist endpoints
///
/// - `GET/POST /artists/apply` - Apply to become an artist (members only)
/// - `GET /artist/dashboard` - The artist's own artworks and exhibitions
/// - `GET/POST /artwork/create` - Add an artwork
/// - `GET/POST /exhibition/create` - Group own artworks into an exhibition

use axum::{extract::State, response::Response, Form};
use opengallery_shared::{
    auth::authorization::{require_artist, require_user},
    models::{
        artist_application::{ApplicationError, ArtistApplication},
        artwork::Artwork,
        exhibition::{Exhibition, ExhibitionError},
        user::User,
    },
};
use tracing::{error, info};

use crate::{
    app::AppState,
    context::RequestContext,
    error::{PageError, PageResult},
    forms::{ApplicationForm, ArtworkForm, ExhibitionForm, FormErrors, FormFields, NON_FIELD},
    pages,
    session::{flash_redirect, FlashLevel},
};

pub const DASHBOARD_PATH: &str = "/artist/dashboard";

/// Turns a refused application into the page the visitor lands on
fn refusal(err: ApplicationError) -> PageError {
    match err {
        ApplicationError::StaffNotAllowed => {
            PageError::home("Staff accounts cannot apply to become artists.")
        }
        ApplicationError::AlreadyArtist => PageError::redirect(
            DASHBOARD_PATH,
            FlashLevel::Warning,
            "You are already registered as an artist.",
        ),
        ApplicationError::AlreadyPending => PageError::redirect(
            "/",
            FlashLevel::Warning,
            "You have already applied. Your application is waiting for review.",
        ),
        ApplicationError::Database(e) => e.into(),
    }
}

async fn eligible_user<'a>(state: &AppState, ctx: &'a RequestContext) -> PageResult<&'a User> {
    let user = require_user(&ctx.auth)?;
    ArtistApplication::check_eligibility(&state.db, user)
        .await
        .map_err(refusal)?;
    Ok(user)
}

pub async fn apply_page(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> PageResult<Response> {
    eligible_user(&state, &ctx).await?;

    let page = pages::artist::apply(&ctx, &ApplicationForm::default(), &FormErrors::default());
    Ok(ctx.render(page))
}

pub async fn apply(
    State(state): State<AppState>,
    ctx: RequestContext,
    Form(form): Form<ApplicationForm>,
) -> PageResult<Response> {
    let user = eligible_user(&state, &ctx).await?;

    let profile = match form.to_profile() {
        Ok(profile) => profile,
        Err(errors) => return Ok(ctx.render(pages::artist::apply(&ctx, &form, &errors))),
    };

    ArtistApplication::submit(&state.db, user, &profile)
        .await
        .map_err(refusal)?;

    Ok(flash_redirect(
        "/",
        FlashLevel::Success,
        "Your application has been submitted. Please wait for staff approval.",
    ))
}

pub async fn dashboard(State(state): State<AppState>, ctx: RequestContext) -> PageResult<Response> {
    let artist = require_artist(&ctx.auth)?;

    let artworks = Artwork::list_by_artist(&state.db, artist.id).await?;
    let exhibitions = Exhibition::list_by_artist(&state.db, artist.id).await?;

    Ok(ctx.render(pages::artist::dashboard(&ctx, artist, &artworks, &exhibitions)))
}

pub async fn artwork_page(ctx: RequestContext) -> PageResult<Response> {
    require_artist(&ctx.auth)?;

    let page = pages::artist::artwork_form(&ctx, &ArtworkForm::default(), &FormErrors::default());
    Ok(ctx.render(page))
}

pub async fn create_artwork(
    State(state): State<AppState>,
    ctx: RequestContext,
    Form(form): Form<ArtworkForm>,
) -> PageResult<Response> {
    let artist = require_artist(&ctx.auth)?;

    let new_artwork = match form.to_new_artwork() {
        Ok(new_artwork) => new_artwork,
        Err(errors) => return Ok(ctx.render(pages::artist::artwork_form(&ctx, &form, &errors))),
    };

    match Artwork::create(&state.db, artist.id, &new_artwork).await {
        Ok(artwork) => {
            info!(artwork_id = %artwork.id, artist_id = %artist.id, "Artwork created");
            Ok(flash_redirect(
                DASHBOARD_PATH,
                FlashLevel::Success,
                "Your artwork has been added.",
            ))
        }
        Err(e) => {
            error!(artist_id = %artist.id, error = %e, "Failed to create artwork");
            let mut errors = FormErrors::default();
            errors.add(NON_FIELD, "Something went wrong while saving the artwork.");
            Ok(ctx.render(pages::artist::artwork_form(&ctx, &form, &errors)))
        }
    }
}

pub async fn exhibition_page(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> PageResult<Response> {
    let artist = require_artist(&ctx.auth)?;
    let artworks = Artwork::list_by_artist(&state.db, artist.id).await?;

    let page = pages::artist::exhibition_form(
        &ctx,
        &ExhibitionForm::default(),
        &FormErrors::default(),
        &artworks,
    );
    Ok(ctx.render(page))
}

pub async fn create_exhibition(
    State(state): State<AppState>,
    ctx: RequestContext,
    Form(fields): Form<FormFields>,
) -> PageResult<Response> {
    let artist = require_artist(&ctx.auth)?;
    let form = ExhibitionForm::from(&fields);

    let (new_exhibition, artwork_ids) = match form.to_new_exhibition() {
        Ok(parsed) => parsed,
        Err(errors) => {
            let artworks = Artwork::list_by_artist(&state.db, artist.id).await?;
            let page = pages::artist::exhibition_form(&ctx, &form, &errors, &artworks);
            return Ok(ctx.render(page));
        }
    };

    match Exhibition::create_with_artworks(&state.db, artist.id, &new_exhibition, &artwork_ids)
        .await
    {
        Ok(_) => Ok(flash_redirect(
            DASHBOARD_PATH,
            FlashLevel::Success,
            "Your exhibition has been created.",
        )),
        Err(e) => {
            if let ExhibitionError::Database(db_err) = &e {
                error!(artist_id = %artist.id, error = %db_err, "Failed to create exhibition");
            }
            let mut errors = FormErrors::default();
            errors.add(NON_FIELD, "The exhibition could not be created.");
            let artworks = Artwork::list_by_artist(&state.db, artist.id).await?;
            let page = pages::artist::exhibition_form(&ctx, &form, &errors, &artworks);
            Ok(ctx.render(page))
        }
    }
}
