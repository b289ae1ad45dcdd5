//! HTML form parsing
//!
//! Browsers submit everything as strings. Each form here keeps the raw
//! values so a failed submission can be re-rendered as typed, and converts
//! them into the typed inputs of the shared models, collecting
//! human-readable [`FormErrors`] along the way.

use chrono::NaiveDate;
use opengallery_shared::auth::password::validate_new_password;
use opengallery_shared::models::artist::{ArtistProfile, Gender};
use opengallery_shared::models::artwork::NewArtwork;
use opengallery_shared::models::exhibition::NewExhibition;
use opengallery_shared::validation::{parse_price, validate_username};
use serde::Deserialize;
use std::collections::BTreeMap;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

/// Key for errors that belong to the form rather than one field
pub const NON_FIELD: &str = "__all__";

const REQUIRED: &str = "This field is required.";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw `application/x-www-form-urlencoded` pairs, in submission order.
///
/// Used where a field may repeat (checkbox groups).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "Vec<(String, String)>")]
pub struct FormFields(Vec<(String, String)>);

impl From<Vec<(String, String)>> for FormFields {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }
}

impl FormFields {
    /// First value of `name`, trimmed; empty when absent
    pub fn get(&self, name: &str) -> &str {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.trim())
            .unwrap_or("")
    }

    /// Every non-blank value of `name`
    pub fn all(&self, name: &str) -> Vec<&str> {
        self.0
            .iter()
            .filter(|(key, _)| key == name)
            .map(|(_, value)| value.trim())
            .filter(|value| !value.is_empty())
            .collect()
    }
}

/// Per-field validation messages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl FormErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Messages for one field
    pub fn field(&self, name: &str) -> &[String] {
        self.fields.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Messages not tied to a field
    pub fn general(&self) -> &[String] {
        self.field(NON_FIELD)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn merge(&mut self, errors: &ValidationErrors) {
        for (field, errors) in errors.field_errors() {
            for error in errors.iter() {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Enter a valid value.".to_string());
                self.add(&field.to_string(), message);
            }
        }
    }

    fn into_result<T>(self, value: T) -> Result<T, FormErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl From<&ValidationErrors> for FormErrors {
    fn from(errors: &ValidationErrors) -> Self {
        let mut form_errors = FormErrors::default();
        form_errors.merge(errors);
        form_errors
    }
}

fn required<'a>(errors: &mut FormErrors, field: &str, value: &'a str) -> Option<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        errors.add(field, REQUIRED);
        None
    } else {
        Some(value)
    }
}

fn parse_date(errors: &mut FormErrors, field: &str, value: &str) -> Option<NaiveDate> {
    let value = required(errors, field, value)?;
    match NaiveDate::parse_from_str(value, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            errors.add(field, "Enter a valid date (YYYY-MM-DD).");
            None
        }
    }
}

/// Account registration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SignupForm {
    pub username: String,
    pub password1: String,
    pub password2: String,
}

impl SignupForm {
    /// Checks everything that does not need the database; the handler
    /// still has to reject a taken username.
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();

        if let Some(username) = required(&mut errors, "username", &self.username) {
            if let Err(e) = validate_username(username) {
                errors.add(
                    "username",
                    e.message.map(|m| m.to_string()).unwrap_or_default(),
                );
            }
        }

        if self.password1.is_empty() {
            errors.add("password1", REQUIRED);
        }
        if self.password2.is_empty() {
            errors.add("password2", REQUIRED);
        }

        if !self.password1.is_empty() && !self.password2.is_empty() {
            if self.password1 != self.password2 {
                errors.add("password2", "The two password fields didn't match.");
            } else if let Err(problems) =
                validate_new_password(&self.password1, self.username.trim())
            {
                for problem in problems {
                    errors.add("password2", problem);
                }
            }
        }

        errors.into_result(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Artist application; the same fields make up an artist profile
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApplicationForm {
    pub name: String,
    pub gender: String,
    pub birthday: String,
    pub email: String,
    pub phone_number: String,
}

impl ApplicationForm {
    pub fn to_profile(&self) -> Result<ArtistProfile, FormErrors> {
        let mut errors = FormErrors::default();

        let name = required(&mut errors, "name", &self.name);
        let gender = required(&mut errors, "gender", &self.gender).and_then(|raw| {
            match raw.parse::<Gender>() {
                Ok(gender) => Some(gender),
                Err(_) => {
                    errors.add("gender", "Select a valid choice.");
                    None
                }
            }
        });
        let birthday = parse_date(&mut errors, "birthday", &self.birthday);
        let email = required(&mut errors, "email", &self.email);
        let phone_number = required(&mut errors, "phone_number", &self.phone_number);

        let (Some(name), Some(gender), Some(birthday), Some(email), Some(phone_number)) =
            (name, gender, birthday, email, phone_number)
        else {
            return Err(errors);
        };

        let profile = ArtistProfile {
            name: name.to_string(),
            gender,
            birthday,
            email: email.to_string(),
            phone_number: phone_number.to_string(),
        };

        if let Err(e) = profile.validate() {
            errors.merge(&e);
        }
        errors.into_result(profile)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ArtworkForm {
    pub title: String,
    pub price: String,
    pub size_number: String,
}

impl ArtworkForm {
    pub fn to_new_artwork(&self) -> Result<NewArtwork, FormErrors> {
        let mut errors = FormErrors::default();

        let title = required(&mut errors, "title", &self.title);
        let price = required(&mut errors, "price", &self.price);
        let size_number = required(&mut errors, "size_number", &self.size_number);

        let (Some(title), Some(price), Some(size_number)) = (title, price, size_number) else {
            return Err(errors);
        };

        let (Some(price), Ok(size_number)) = (parse_price(price), size_number.parse::<i32>())
        else {
            errors.add(NON_FIELD, "price and size must be numbers");
            return Err(errors);
        };

        let artwork = NewArtwork {
            title: title.to_string(),
            price,
            size_number,
        };

        if let Err(e) = artwork.validate() {
            errors.merge(&e);
        }
        errors.into_result(artwork)
    }
}

/// Exhibition with a checkbox group of the artist's artworks
#[derive(Debug, Clone, Default)]
pub struct ExhibitionForm {
    pub title: String,
    pub start_date: String,
    pub end_date: String,

    /// Raw `artworks` values as submitted
    pub artworks: Vec<String>,
}

impl From<&FormFields> for ExhibitionForm {
    fn from(fields: &FormFields) -> Self {
        Self {
            title: fields.get("title").to_string(),
            start_date: fields.get("start_date").to_string(),
            end_date: fields.get("end_date").to_string(),
            artworks: fields.all("artworks").into_iter().map(String::from).collect(),
        }
    }
}

impl ExhibitionForm {
    pub fn is_selected(&self, artwork_id: Uuid) -> bool {
        let id = artwork_id.to_string();
        self.artworks.iter().any(|raw| *raw == id)
    }

    /// Returns the exhibition and the selected artwork ids.
    ///
    /// Ownership of the artworks is checked when the exhibition is saved.
    pub fn to_new_exhibition(&self) -> Result<(NewExhibition, Vec<Uuid>), FormErrors> {
        let mut errors = FormErrors::default();

        let title = required(&mut errors, "title", &self.title);
        let start_date = parse_date(&mut errors, "start_date", &self.start_date);
        let end_date = parse_date(&mut errors, "end_date", &self.end_date);

        let mut artwork_ids = Vec::with_capacity(self.artworks.len());
        for raw in &self.artworks {
            match Uuid::parse_str(raw) {
                Ok(id) => artwork_ids.push(id),
                Err(_) => {
                    errors.add("artworks", "Select a valid choice.");
                    break;
                }
            }
        }
        if self.artworks.is_empty() {
            errors.add("artworks", "Select at least one artwork.");
        }

        let (Some(title), Some(start_date), Some(end_date)) = (title, start_date, end_date) else {
            return Err(errors);
        };

        let exhibition = NewExhibition {
            title: title.to_string(),
            start_date,
            end_date,
        };

        if let Err(e) = exhibition.validate() {
            errors.merge(&e);
        }
        errors.into_result((exhibition, artwork_ids))
    }
}

/// `?search=&page=` on listing pages
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
    pub page: Option<String>,
}

impl ListQuery {
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn page(&self) -> Option<&str> {
        self.page.as_deref()
    }
}
