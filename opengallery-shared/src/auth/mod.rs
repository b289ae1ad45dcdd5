/// Authentication and authorization
///
/// # Modules
///
/// - [`password`]: Argon2id hashing and signup password rules
/// - [`session`]: Signed session tokens
/// - [`context`]: The per-request account and its [`Role`](context::Role)
/// - [`authorization`]: Role checks for gated pages

pub mod authorization;
pub mod context;
pub mod password;
pub mod session;
