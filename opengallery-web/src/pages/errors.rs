//! Error pages rendered without a request context

use maud::{html, Markup};
use opengallery_shared::auth::context::Role;

use super::layout::document;

pub fn not_found() -> Markup {
    document(
        "Not found",
        Role::Anonymous,
        None,
        &[],
        html! {
            h1 { "Page not found" }
            p { "The page you asked for does not exist." }
            p { a href="/" { "Back to the gallery" } }
        },
    )
}

pub fn internal_error() -> Markup {
    document(
        "Server error",
        Role::Anonymous,
        None,
        &[],
        html! {
            h1 { "Something went wrong" }
            p { "An unexpected error occurred. Please try again later." }
        },
    )
}
