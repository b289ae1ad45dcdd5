/// Public pages
///
/// - `GET /` - Home
/// - `GET /artists/`, `GET /artworks/`, `GET /exhibitions/` - Listings,
///   twelve per page, newest first, filtered by `?search=`

use axum::{
    extract::{Query, State},
    response::Response,
};
use opengallery_shared::models::{artist::Artist, artwork::Artwork, exhibition::Exhibition};
use opengallery_shared::pagination::search_term;

use crate::{app::AppState, context::RequestContext, error::PageResult, forms::ListQuery, pages};

pub async fn home(ctx: RequestContext) -> Response {
    ctx.render(pages::home::home(&ctx))
}

pub async fn artists(
    State(state): State<AppState>,
    ctx: RequestContext,
    Query(query): Query<ListQuery>,
) -> PageResult<Response> {
    let search = search_term(query.search());
    let page = Artist::list(&state.db, search, query.page()).await?;

    Ok(ctx.render(pages::gallery::artists(&ctx, &page, search)))
}

pub async fn artworks(
    State(state): State<AppState>,
    ctx: RequestContext,
    Query(query): Query<ListQuery>,
) -> PageResult<Response> {
    let search = search_term(query.search());
    let page = Artwork::list(&state.db, search, query.page()).await?;

    Ok(ctx.render(pages::gallery::artworks(&ctx, &page, search)))
}

pub async fn exhibitions(
    State(state): State<AppState>,
    ctx: RequestContext,
    Query(query): Query<ListQuery>,
) -> PageResult<Response> {
    let search = search_term(query.search());
    let page = Exhibition::list(&state.db, search, query.page()).await?;

    Ok(ctx.render(pages::gallery::exhibitions(&ctx, &page, search)))
}
