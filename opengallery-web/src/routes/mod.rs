/// Route handlers
///
/// - `health`: Health check endpoint
/// - `gallery`: Home page and public listings
/// - `accounts`: Signup, login, logout
/// - `artists`: Artist applications and the artist's own pages
/// - `admin`: Staff pages, CSV export and bulk processing

pub mod accounts;
pub mod admin;
pub mod artists;
pub mod gallery;
pub mod health;
