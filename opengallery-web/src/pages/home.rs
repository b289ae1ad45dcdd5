use maud::{html, Markup};
use opengallery_shared::auth::context::Role;

use super::layout::page;
use crate::context::RequestContext;

pub fn home(ctx: &RequestContext) -> Markup {
    let content = html! {
        h1 { "OpenGallery" }
        p { "Browse the artists, artworks and exhibitions represented by the gallery." }

        @match ctx.role() {
            Role::Anonymous => {
                p {
                    a href="/accounts/signup" { "Create an account" }
                    " to apply as an artist, or "
                    a href="/accounts/login" { "log in" }
                    "."
                }
            }
            Role::Member => {
                p {
                    "Are you an artist? "
                    a href="/artists/apply" { "Apply to be represented" }
                    "."
                }
            }
            Role::Artist => {
                @if let Some(artist) = &ctx.auth.artist {
                    p { "Welcome back, " (artist.name) "." }
                }
                p { a href="/artist/dashboard" { "Go to your dashboard" } }
            }
            Role::Staff => {
                p { a href="/admin/dashboard" { "Open the gallery administration" } }
            }
        }
    };

    page(ctx, "Home", content)
}
