//! Page chrome and shared widgets

use maud::{html, Markup, DOCTYPE};
use opengallery_shared::auth::context::Role;
use opengallery_shared::pagination::Page;

use crate::context::RequestContext;
use crate::forms::FormErrors;
use crate::session::FlashMessage;

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; color: #222; background: #fafafa; }
.site-header { display: flex; justify-content: space-between; align-items: center; padding: 0.75rem 1.5rem; background: #222; }
.site-header a { color: #eee; text-decoration: none; margin-right: 1rem; }
.site-header .brand { font-weight: bold; }
main { max-width: 960px; margin: 1.5rem auto; padding: 0 1.5rem; }
.messages { list-style: none; padding: 0; }
.messages li { padding: 0.5rem 0.75rem; margin-bottom: 0.5rem; border-radius: 4px; }
.messages .success { background: #e3f5e1; }
.messages .info { background: #e1ecf5; }
.messages .warning { background: #fdf3d8; }
.messages .error { background: #f8dede; }
.errorlist { color: #a00; margin: 0.25rem 0; padding-left: 1.2rem; }
.field label { display: block; font-weight: 600; }
table { border-collapse: collapse; width: 100%; }
th, td { text-align: left; padding: 0.4rem 0.6rem; border-bottom: 1px solid #ddd; }
.pagination { margin-top: 1rem; }
.pagination a, .pagination span { margin-right: 0.75rem; }
.empty { color: #777; }
"#;

/// Full HTML document around `content`
pub fn document(
    title: &str,
    role: Role,
    username: Option<&str>,
    messages: &[FlashMessage],
    content: Markup,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " | OpenGallery" }
                style { (STYLE) }
            }
            body {
                (site_header(role, username))
                main {
                    (flash_messages(messages))
                    (content)
                }
            }
        }
    }
}

/// Document for the current request: navigation follows the visitor's role
pub fn page(ctx: &RequestContext, title: &str, content: Markup) -> Markup {
    document(
        title,
        ctx.role(),
        ctx.auth.username(),
        &ctx.messages,
        content,
    )
}

fn site_header(role: Role, username: Option<&str>) -> Markup {
    html! {
        header.site-header {
            nav {
                a.brand href="/" { "OpenGallery" }
                a href="/artists/" { "Artists" }
                a href="/artworks/" { "Artworks" }
                a href="/exhibitions/" { "Exhibitions" }
            }
            nav {
                @match role {
                    Role::Anonymous => {
                        a href="/accounts/login" { "Log in" }
                        a href="/accounts/signup" { "Sign up" }
                    }
                    Role::Member => {
                        a href="/artists/apply" { "Apply as artist" }
                    }
                    Role::Artist => {
                        a href="/artist/dashboard" { "Dashboard" }
                        a href="/artwork/create" { "New artwork" }
                        a href="/exhibition/create" { "New exhibition" }
                    }
                    Role::Staff => {
                        a href="/admin/dashboard" { "Admin" }
                        a href="/admin/applications" { "Applications" }
                        a href="/admin/statistics" { "Statistics" }
                    }
                }
                @if let Some(username) = username {
                    a href="/accounts/logout" { "Log out (" (username) ")" }
                }
            }
        }
    }
}

fn flash_messages(messages: &[FlashMessage]) -> Markup {
    html! {
        @if !messages.is_empty() {
            ul.messages {
                @for message in messages {
                    li class=(message.level.as_str()) { (message.text) }
                }
            }
        }
    }
}

pub fn error_list(messages: &[String]) -> Markup {
    html! {
        @if !messages.is_empty() {
            ul.errorlist {
                @for message in messages {
                    li { (message) }
                }
            }
        }
    }
}

/// Labelled `<input>` with its validation messages
pub fn input_field(
    label: &str,
    name: &str,
    input_type: &str,
    value: &str,
    errors: &FormErrors,
) -> Markup {
    html! {
        p.field {
            label for=(name) { (label) }
            input type=(input_type) id=(name) name=(name) value=(value);
            (error_list(errors.field(name)))
        }
    }
}

pub fn search_form(action: &str, search: Option<&str>) -> Markup {
    html! {
        form.search method="get" action=(action) {
            input type="search" name="search" value=[search] placeholder="Search";
            " "
            button type="submit" { "Search" }
        }
    }
}

/// Listing URL for one page, keeping the search term
pub fn page_href(base: &str, number: i64, search: Option<&str>) -> String {
    let mut params = Vec::with_capacity(2);
    if let Some(search) = search {
        params.push(("search", search.to_string()));
    }
    params.push(("page", number.to_string()));

    let query = serde_urlencoded::to_string(&params).unwrap_or_default();
    format!("{}?{}", base, query)
}

pub fn pagination<T>(base: &str, page: &Page<T>, search: Option<&str>) -> Markup {
    html! {
        nav.pagination {
            @if page.has_previous() {
                a href=(page_href(base, 1, search)) { "« first" }
                a href=(page_href(base, page.number - 1, search)) { "previous" }
            }
            span.current { "Page " (page.number) " of " (page.num_pages) }
            @if page.has_next() {
                a href=(page_href(base, page.number + 1, search)) { "next" }
                a href=(page_href(base, page.num_pages, search)) { "last »" }
            }
        }
    }
}
