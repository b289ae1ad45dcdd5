//! CSV export of artist applications

use csv::Writer;
use opengallery_shared::models::artist_application::ArtistApplication;

pub const CSV_HEADER: [&str; 8] = [
    "id",
    "name",
    "gender",
    "birthday",
    "email",
    "phone_number",
    "status",
    "applied_at",
];

pub const CSV_FILENAME: &str = "pending_applications.csv";

#[derive(Debug, thiserror::Error)]
#[error("failed to write CSV: {0}")]
pub struct ExportError(String);

/// Writes one row per application under [`CSV_HEADER`].
pub fn applications_csv(applications: &[ArtistApplication]) -> Result<Vec<u8>, ExportError> {
    let mut writer = Writer::from_writer(Vec::new());

    writer
        .write_record(CSV_HEADER)
        .map_err(|e| ExportError(e.to_string()))?;

    for application in applications {
        writer
            .write_record([
                application.id.to_string(),
                application.name.clone(),
                application.gender.as_str().to_string(),
                application.birthday.to_string(),
                application.email.clone(),
                application.phone_number.clone(),
                application.status.as_str().to_string(),
                application.applied_at.to_rfc3339(),
            ])
            .map_err(|e| ExportError(e.to_string()))?;
    }

    writer.into_inner().map_err(|e| ExportError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use opengallery_shared::models::artist::Gender;
    use opengallery_shared::models::artist_application::ApplicationStatus;
    use uuid::Uuid;

    fn application(name: &str) -> ArtistApplication {
        ArtistApplication {
            id: Uuid::nil(),
            user_id: Uuid::new_v4(),
            name: name.to_string(),
            gender: Gender::Female,
            birthday: NaiveDate::from_ymd_opt(1990, 3, 1).unwrap(),
            email: "artist@example.com".to_string(),
            phone_number: "010-1234-5678".to_string(),
            status: ApplicationStatus::Pending,
            applied_at: Utc.with_ymd_and_hms(2025, 6, 1, 9, 30, 0).unwrap(),
            processed_at: None,
        }
    }

    #[test]
    fn test_header_only_when_empty() {
        let bytes = applications_csv(&[]).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "id,name,gender,birthday,email,phone_number,status,applied_at\n"
        );
    }

    #[test]
    fn test_rows_follow_header() {
        let bytes = applications_csv(&[application("김작가"), application("Lee, Jr.")]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[1],
            "00000000-0000-0000-0000-000000000000,김작가,female,1990-03-01,\
             artist@example.com,010-1234-5678,pending,2025-06-01T09:30:00+00:00"
        );
        assert!(lines[2].contains("\"Lee, Jr.\""));
    }
}
