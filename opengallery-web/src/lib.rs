//! # OpenGallery Web Server Library
//!
//! Server-rendered gallery site: public listings of artists, artworks and
//! exhibitions, artist self-service pages, and staff administration.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `bootstrap`: Startup tasks (staff account)
//! - `config`: Configuration management
//! - `context`: Per-request user and flash messages
//! - `error`: Error handling and HTTP response mapping
//! - `export`: CSV export
//! - `forms`: HTML form parsing and validation
//! - `middleware`: Security headers
//! - `pages`: maud templates
//! - `routes`: Route handlers
//! - `session`: Session and flash cookies

pub mod app;
pub mod bootstrap;
pub mod config;
pub mod context;
pub mod error;
pub mod export;
pub mod forms;
pub mod middleware;
pub mod pages;
pub mod routes;
pub mod session;
