//! Public listings

use maud::{html, Markup};
use opengallery_shared::models::artist::Artist;
use opengallery_shared::models::artwork::ArtworkListing;
use opengallery_shared::models::exhibition::ExhibitionListing;
use opengallery_shared::pagination::Page;

use super::layout::{page, pagination, search_form};
use crate::context::RequestContext;

pub const ARTISTS_PATH: &str = "/artists/";
pub const ARTWORKS_PATH: &str = "/artworks/";
pub const EXHIBITIONS_PATH: &str = "/exhibitions/";

fn empty_result(search: Option<&str>) -> Markup {
    html! {
        @if let Some(search) = search {
            p.empty { "Nothing matches \"" (search) "\"." }
        } @else {
            p.empty { "Nothing here yet." }
        }
    }
}

pub fn artists(ctx: &RequestContext, artists: &Page<Artist>, search: Option<&str>) -> Markup {
    let content = html! {
        h1 { "Artists" }
        (search_form(ARTISTS_PATH, search))
        @if artists.is_empty() {
            (empty_result(search))
        } @else {
            table {
                thead {
                    tr { th { "Name" } th { "Gender" } th { "Email" } th { "Phone" } }
                }
                tbody {
                    @for artist in &artists.items {
                        tr {
                            td { (artist.name) }
                            td { (artist.gender.label()) }
                            td { (artist.email) }
                            td { (artist.phone_number) }
                        }
                    }
                }
            }
        }
        (pagination(ARTISTS_PATH, artists, search))
    };

    page(ctx, "Artists", content)
}

pub fn artworks(
    ctx: &RequestContext,
    artworks: &Page<ArtworkListing>,
    search: Option<&str>,
) -> Markup {
    let content = html! {
        h1 { "Artworks" }
        (search_form(ARTWORKS_PATH, search))
        @if artworks.is_empty() {
            (empty_result(search))
        } @else {
            table {
                thead {
                    tr { th { "Title" } th { "Artist" } th { "Price" } th { "Size" } }
                }
                tbody {
                    @for listing in &artworks.items {
                        tr {
                            td { (listing.artwork.title) }
                            td { (listing.artist_name) }
                            td { (listing.artwork.formatted_price()) }
                            td { (listing.artwork.size_number) "호" }
                        }
                    }
                }
            }
        }
        (pagination(ARTWORKS_PATH, artworks, search))
    };

    page(ctx, "Artworks", content)
}

pub fn exhibitions(
    ctx: &RequestContext,
    exhibitions: &Page<ExhibitionListing>,
    search: Option<&str>,
) -> Markup {
    let content = html! {
        h1 { "Exhibitions" }
        (search_form(EXHIBITIONS_PATH, search))
        @if exhibitions.is_empty() {
            (empty_result(search))
        } @else {
            table {
                thead {
                    tr { th { "Title" } th { "Artist" } th { "Dates" } th { "Artworks" } }
                }
                tbody {
                    @for listing in &exhibitions.items {
                        tr {
                            td { (listing.exhibition.title) }
                            td { (listing.artist_name) }
                            td {
                                (listing.exhibition.start_date.to_string())
                                " ~ "
                                (listing.exhibition.end_date.to_string())
                            }
                            td { (listing.artwork_count) }
                        }
                    }
                }
            }
        }
        (pagination(EXHIBITIONS_PATH, exhibitions, search))
    };

    page(ctx, "Exhibitions", content)
}
