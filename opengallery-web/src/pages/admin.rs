//! Staff pages

use maud::{html, Markup};
use opengallery_shared::models::artist_application::ArtistApplication;
use opengallery_shared::models::report::{ArtistStatistics, GalleryOverview};

use super::layout::{page, search_form};
use crate::context::RequestContext;

pub const APPLICATIONS_PATH: &str = "/admin/applications";

pub fn dashboard(ctx: &RequestContext, overview: &GalleryOverview) -> Markup {
    let content = html! {
        h1 { "Gallery administration" }
        table {
            tbody {
                tr { th { "Artists" } td { (overview.total_artists) } }
                tr { th { "Artworks" } td { (overview.total_artworks) } }
                tr {
                    th { "Pending applications" }
                    td { a href=(APPLICATIONS_PATH) { (overview.pending_applications) } }
                }
            }
        }
        ul {
            li { a href=(APPLICATIONS_PATH) { "Review applications" } }
            li {
                a href="/admin/applications/download-csv" { "Download pending applications (CSV)" }
            }
            li { a href="/admin/statistics" { "Artist statistics" } }
        }
    };

    page(ctx, "Admin", content)
}

/// Application list with bulk approve/reject.
///
/// The form posts to the JSON endpoint; `/static/admin.js` submits it in
/// the background and reloads the list.
pub fn applications(
    ctx: &RequestContext,
    applications: &[ArtistApplication],
    search: Option<&str>,
) -> Markup {
    let content = html! {
        h1 { "Artist applications" }
        (search_form(APPLICATIONS_PATH, search))
        p { a href="/admin/applications/download-csv" { "Download pending applications (CSV)" } }

        @if applications.is_empty() {
            p.empty { "No applications found." }
        } @else {
            form #process-applications method="post" action="/admin/process-applications" {
                p {
                    select name="action" {
                        option value="approve" { "Approve selected" }
                        option value="reject" { "Reject selected" }
                    }
                    " "
                    button type="submit" { "Go" }
                }
                p #process-result {}
                table {
                    thead {
                        tr {
                            th {}
                            th { "Name" } th { "Gender" } th { "Birthday" } th { "Email" }
                            th { "Phone" } th { "Status" } th { "Applied" } th { "Processed" }
                        }
                    }
                    tbody {
                        @for application in applications {
                            tr {
                                td {
                                    @if !application.status.is_terminal() {
                                        input type="checkbox" name="application_ids"
                                            value=(application.id.to_string());
                                    }
                                }
                                td { (application.name) }
                                td { (application.gender.label()) }
                                td { (application.birthday.to_string()) }
                                td { (application.email) }
                                td { (application.phone_number) }
                                td { (application.status.label()) }
                                td { (application.applied_at.format("%Y-%m-%d %H:%M").to_string()) }
                                td {
                                    @if let Some(processed_at) = application.processed_at {
                                        (processed_at.format("%Y-%m-%d %H:%M").to_string())
                                    }
                                }
                            }
                        }
                    }
                }
            }
            script src="/static/admin.js" {}
        }
    };

    page(ctx, "Applications", content)
}

pub fn statistics(ctx: &RequestContext, statistics: &[ArtistStatistics]) -> Markup {
    let content = html! {
        h1 { "Artist statistics" }
        @if statistics.is_empty() {
            p.empty { "No artists yet." }
        } @else {
            table {
                thead {
                    tr {
                        th { "Artist" }
                        th { "Artworks" }
                        th { "Size 100 or smaller" }
                        th { "Average price" }
                    }
                }
                tbody {
                    @for row in statistics {
                        tr {
                            td { (row.name) }
                            td { (row.artwork_count) }
                            td { (row.small_artwork_count) }
                            td { (row.formatted_avg_price()) }
                        }
                    }
                }
            }
        }
    };

    page(ctx, "Statistics", content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use opengallery_shared::models::artist::Gender;
    use opengallery_shared::models::artist_application::ApplicationStatus;
    use uuid::Uuid;

    fn application(status: ApplicationStatus) -> ArtistApplication {
        ArtistApplication {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "김작가".to_string(),
            gender: Gender::Male,
            birthday: NaiveDate::from_ymd_opt(1988, 8, 8).unwrap(),
            email: "kim@example.com".to_string(),
            phone_number: "010-1111-2222".to_string(),
            status,
            applied_at: Utc.with_ymd_and_hms(2025, 6, 1, 9, 30, 0).unwrap(),
            processed_at: None,
        }
    }

    #[test]
    fn test_applications_page_has_bulk_form() {
        let pending = application(ApplicationStatus::Pending);
        let html = applications(&RequestContext::default(), &[pending.clone()], None).into_string();

        assert!(html.contains(r#"<form id="process-applications""#));
        assert!(html.contains(r#"<p id="process-result">"#));
        assert!(html.contains(&format!(r#"value="{}""#, pending.id)));
        assert!(html.contains(r#"src="/static/admin.js""#));
    }

    #[test]
    fn test_processed_applications_have_no_checkbox() {
        let mut approved = application(ApplicationStatus::Approved);
        approved.processed_at = Some(Utc.with_ymd_and_hms(2025, 6, 2, 10, 0, 0).unwrap());

        let html = applications(&RequestContext::default(), &[approved], None).into_string();
        assert!(!html.contains(r#"name="application_ids""#));
        assert!(html.contains("2025-06-02 10:00"));
    }

    #[test]
    fn test_empty_application_list() {
        let html = applications(&RequestContext::default(), &[], Some("nobody")).into_string();
        assert!(html.contains("No applications found."));
        assert!(!html.contains("process-applications"));
    }
}
