//! Startup tasks that run before the server accepts requests

use opengallery_shared::auth::password::hash_password;
use opengallery_shared::models::user::{CreateUser, User};
use sqlx::PgPool;
use tracing::info;

use crate::config::StaffAccount;

/// Makes sure the configured staff account exists and is staff.
///
/// An existing account keeps its password; only the staff flag is
/// enforced.
pub async fn ensure_staff_account(pool: &PgPool, account: &StaffAccount) -> anyhow::Result<User> {
    if let Some(user) = User::find_by_username(pool, &account.username).await? {
        if !user.is_staff {
            User::set_staff(pool, user.id, true).await?;
            info!(
                user_id = %user.id,
                username = %user.username,
                "Promoted existing account to staff"
            );
        }
        return Ok(User {
            is_staff: true,
            ..user
        });
    }

    let password_hash = hash_password(&account.password)?;
    let user = User::create(
        pool,
        CreateUser {
            username: account.username.clone(),
            password_hash,
            is_staff: true,
        },
    )
    .await?;

    info!(user_id = %user.id, username = %user.username, "Created staff account");
    Ok(user)
}
