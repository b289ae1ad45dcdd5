//! Application form and the artist's own pages

use maud::{html, Markup};
use opengallery_shared::models::artist::Artist;
use opengallery_shared::models::artwork::Artwork;
use opengallery_shared::models::exhibition::Exhibition;

use super::layout::{error_list, input_field, page};
use crate::context::RequestContext;
use crate::forms::{ApplicationForm, ArtworkForm, ExhibitionForm, FormErrors};

pub fn apply(ctx: &RequestContext, form: &ApplicationForm, errors: &FormErrors) -> Markup {
    let gender = form.gender.as_str();

    let content = html! {
        h1 { "Apply as an artist" }
        p { "Staff review every application. You will be listed once it is approved." }
        form method="post" action="/artists/apply" {
            (error_list(errors.general()))
            (input_field("Name", "name", "text", &form.name, errors))
            p.field {
                label for="gender" { "Gender" }
                select id="gender" name="gender" {
                    option value="" { "---------" }
                    option value="male" selected[gender == "male"] { "Male" }
                    option value="female" selected[gender == "female"] { "Female" }
                }
                (error_list(errors.field("gender")))
            }
            (input_field("Birthday", "birthday", "date", &form.birthday, errors))
            (input_field("Email", "email", "email", &form.email, errors))
            (input_field(
                "Phone number (000-0000-0000)",
                "phone_number",
                "tel",
                &form.phone_number,
                errors,
            ))
            button type="submit" { "Submit application" }
        }
    };

    page(ctx, "Apply", content)
}

pub fn dashboard(
    ctx: &RequestContext,
    artist: &Artist,
    artworks: &[Artwork],
    exhibitions: &[Exhibition],
) -> Markup {
    let content = html! {
        h1 { (artist.name) "'s dashboard" }

        h2 { "Artworks" }
        p { a href="/artwork/create" { "Add an artwork" } }
        @if artworks.is_empty() {
            p.empty { "You have not added any artworks yet." }
        } @else {
            table {
                thead {
                    tr { th { "Title" } th { "Price" } th { "Size" } th { "Added" } }
                }
                tbody {
                    @for artwork in artworks {
                        tr {
                            td { (artwork.title) }
                            td { (artwork.formatted_price()) }
                            td { (artwork.size_number) "호" }
                            td { (artwork.created_at.format("%Y-%m-%d").to_string()) }
                        }
                    }
                }
            }
        }

        h2 { "Exhibitions" }
        p { a href="/exhibition/create" { "Plan an exhibition" } }
        @if exhibitions.is_empty() {
            p.empty { "No exhibitions yet." }
        } @else {
            ul {
                @for exhibition in exhibitions {
                    li { (exhibition.to_string()) }
                }
            }
        }
    };

    page(ctx, "Dashboard", content)
}

pub fn artwork_form(ctx: &RequestContext, form: &ArtworkForm, errors: &FormErrors) -> Markup {
    let content = html! {
        h1 { "New artwork" }
        form method="post" action="/artwork/create" {
            (error_list(errors.general()))
            (input_field("Title", "title", "text", &form.title, errors))
            (input_field("Price (KRW)", "price", "text", &form.price, errors))
            (input_field("Size number (1-500)", "size_number", "number", &form.size_number, errors))
            button type="submit" { "Save" }
        }
    };

    page(ctx, "New artwork", content)
}

pub fn exhibition_form(
    ctx: &RequestContext,
    form: &ExhibitionForm,
    errors: &FormErrors,
    artworks: &[Artwork],
) -> Markup {
    let content = html! {
        h1 { "New exhibition" }
        @if artworks.is_empty() {
            p.empty {
                "An exhibition needs at least one artwork. "
                a href="/artwork/create" { "Add an artwork" }
                " first."
            }
        }
        form method="post" action="/exhibition/create" {
            (error_list(errors.general()))
            (input_field("Title", "title", "text", &form.title, errors))
            (input_field("Start date", "start_date", "date", &form.start_date, errors))
            (input_field("End date", "end_date", "date", &form.end_date, errors))
            fieldset {
                legend { "Artworks" }
                @for artwork in artworks {
                    @let id = artwork.id.to_string();
                    label {
                        input type="checkbox" name="artworks" value=(id)
                            checked[form.is_selected(artwork.id)];
                        " " (artwork.title)
                    }
                    br;
                }
                (error_list(errors.field("artworks")))
            }
            button type="submit" { "Save" }
        }
    };

    page(ctx, "New exhibition", content)
}
