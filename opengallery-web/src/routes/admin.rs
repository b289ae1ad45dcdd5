/// Staff endpoints
///
/// - `GET /admin/dashboard` - Gallery totals
/// - `GET /admin/applications` - Every application, `?search=` by name,
///   email or phone number
/// - `GET /admin/applications/download-csv` - Pending applications as CSV
/// - `GET /admin/statistics` - Per-artist artwork statistics
/// - `POST /admin/process-applications` - Bulk approve/reject (JSON)
///
/// The HTML pages redirect non-staff visitors; the JSON endpoint answers
/// with 401/403 instead.

use axum::{
    extract::{Query, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
    Form, Json,
};
use opengallery_shared::{
    auth::authorization::require_staff,
    models::{
        artist_application::{ApplicationAction, ApplicationStatus, ArtistApplication},
        report::{ArtistStatistics, GalleryOverview},
    },
    pagination::search_term,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::{
    app::AppState,
    context::{ApiContext, RequestContext},
    error::{ApiError, ApiResult, PageError, PageResult},
    export::{applications_csv, CSV_FILENAME},
    forms::{FormFields, ListQuery},
    pages,
};

/// Result of a bulk approve/reject
#[derive(Debug, Serialize, Deserialize)]
pub struct ProcessResponse {
    pub success: bool,
    pub message: String,

    /// Applications that were still pending and changed state
    pub processed_count: u64,
}

pub async fn dashboard(State(state): State<AppState>, ctx: RequestContext) -> PageResult<Response> {
    require_staff(&ctx.auth)?;

    let overview = GalleryOverview::load(&state.db).await?;
    Ok(ctx.render(pages::admin::dashboard(&ctx, &overview)))
}

pub async fn applications(
    State(state): State<AppState>,
    ctx: RequestContext,
    Query(query): Query<ListQuery>,
) -> PageResult<Response> {
    require_staff(&ctx.auth)?;

    let search = search_term(query.search());
    let applications = ArtistApplication::list(&state.db, search).await?;

    Ok(ctx.render(pages::admin::applications(&ctx, &applications, search)))
}

pub async fn statistics(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> PageResult<Response> {
    require_staff(&ctx.auth)?;

    let statistics = ArtistStatistics::load(&state.db).await?;
    Ok(ctx.render(pages::admin::statistics(&ctx, &statistics)))
}

pub async fn download_csv(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> PageResult<Response> {
    require_staff(&ctx.auth)?;

    let pending = ArtistApplication::list_by_status(&state.db, ApplicationStatus::Pending).await?;
    let body = applications_csv(&pending).map_err(|e| PageError::Internal(e.to_string()))?;

    Ok((
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", CSV_FILENAME),
            ),
        ],
        body,
    )
        .into_response())
}

/// Bulk approve or reject applications.
///
/// Form fields: `action` (`approve` | `reject`) and one `application_ids`
/// per selected application. Applications that are no longer pending are
/// skipped and not counted.
///
/// # Errors
///
/// - `400 Bad Request`: nothing selected, unknown action or malformed id
/// - `401 Unauthorized`: not logged in
/// - `403 Forbidden`: not staff
/// - `409 Conflict`: an applicant already has an artist profile; nothing
///   in the batch is applied
/// - `500 Internal Server Error`: database failure, also while loading
///   the session
pub async fn process_applications(
    State(state): State<AppState>,
    ApiContext(ctx): ApiContext,
    Form(fields): Form<FormFields>,
) -> ApiResult<Json<ProcessResponse>> {
    let staff = require_staff(&ctx.auth)?;

    let raw_ids = fields.all("application_ids");
    if raw_ids.is_empty() {
        return Err(ApiError::BadRequest("No applications selected.".to_string()));
    }

    let action: ApplicationAction = fields
        .get("action")
        .parse()
        .map_err(|_| ApiError::BadRequest("Invalid action.".to_string()))?;

    let ids = raw_ids
        .iter()
        .map(|raw| Uuid::parse_str(raw))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| ApiError::BadRequest("Invalid application id.".to_string()))?;

    let processed_count = ArtistApplication::process_batch(&state.db, action, &ids).await?;

    info!(
        staff_id = %staff.id,
        ?action,
        processed_count,
        "Applications processed by staff"
    );

    Ok(Json(ProcessResponse {
        success: true,
        message: format!("{} applications processed.", processed_count),
        processed_count,
    }))
}

/// Anything but POST on the bulk endpoint
pub async fn process_applications_invalid(
    ApiContext(ctx): ApiContext,
) -> ApiResult<Json<ProcessResponse>> {
    require_staff(&ctx.auth)?;
    Err(ApiError::BadRequest("Invalid request.".to_string()))
}

/// Script behind the bulk form on the applications page
pub async fn admin_script() -> impl IntoResponse {
    (
        [(CONTENT_TYPE, "text/javascript; charset=utf-8")],
        pages::ADMIN_JS,
    )
}
