//! Field rules shared by forms and models
//!
//! The same constraints are repeated as CHECK constraints in the schema;
//! these functions let the web layer reject bad input with a readable
//! message before a query is ever sent.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use validator::ValidationError;

/// `010-1234-5678` style phone numbers, ASCII digits only
pub static PHONE_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{3}-[0-9]{4}-[0-9]{4}$").expect("phone pattern is valid"));

/// Letters, digits and `@ . + - _`
static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\w.@+-]+$").expect("username pattern is valid"));

/// Artworks at or below this size count as "small" in the statistics report
pub const SMALL_ARTWORK_MAX_SIZE: i32 = 100;

/// Longest allowed username
pub const USERNAME_MAX_LEN: usize = 150;

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

pub fn validate_phone_number(phone_number: &str) -> Result<(), ValidationError> {
    if PHONE_NUMBER_RE.is_match(phone_number) {
        Ok(())
    } else {
        Err(error("phone_number", "Enter the phone number as 000-0000-0000."))
    }
}

pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.chars().count() > USERNAME_MAX_LEN {
        return Err(error("username", "Username must be 150 characters or fewer."));
    }

    if !USERNAME_RE.is_match(username) {
        return Err(error(
            "username",
            "Username may contain only letters, digits and @/./+/-/_ characters.",
        ));
    }

    Ok(())
}

/// Parses a price typed with optional thousands separators ("1,000,000").
///
/// Returns `None` when the remaining text is not an integer.
pub fn parse_price(input: &str) -> Option<i64> {
    let digits: String = input.trim().chars().filter(|c| *c != ',').collect();
    digits.parse::<i64>().ok()
}

/// Groups digits in threes: `1234567` becomes `"1,234,567"`.
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}
