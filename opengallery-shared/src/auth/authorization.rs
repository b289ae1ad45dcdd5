/// Role checks for gated pages
///
/// Each helper either hands back the piece of the context the caller needs
/// or says why access is refused. The web crate decides what a refusal
/// looks like (redirect to login, redirect home, or a JSON error).

use super::context::{AuthContext, Role};
use crate::models::artist::Artist;
use crate::models::user::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthzError {
    /// No session
    #[error("Login required")]
    LoginRequired,

    /// Logged in but not staff
    #[error("Staff access required")]
    StaffOnly,

    /// Logged in but without an artist profile
    #[error("Artist profile required")]
    ArtistOnly,
}

/// Any logged-in account
pub fn require_user(ctx: &AuthContext) -> Result<&User, AuthzError> {
    ctx.user.as_ref().ok_or(AuthzError::LoginRequired)
}

pub fn require_staff(ctx: &AuthContext) -> Result<&User, AuthzError> {
    let user = require_user(ctx)?;
    if ctx.role() == Role::Staff {
        Ok(user)
    } else {
        Err(AuthzError::StaffOnly)
    }
}

/// The caller's own artist profile
pub fn require_artist(ctx: &AuthContext) -> Result<&Artist, AuthzError> {
    require_user(ctx)?;
    ctx.artist.as_ref().ok_or(AuthzError::ArtistOnly)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    use crate::models::artist::Gender;

    fn user(is_staff: bool) -> User {
        User {
            id: Uuid::new_v4(),
            username: "visitor".to_string(),
            password_hash: String::new(),
            is_staff,
            created_at: Utc::now(),
            last_login_at: None,
        }
    }

    fn with_artist(user: User) -> AuthContext {
        let artist = Artist {
            id: Uuid::new_v4(),
            user_id: user.id,
            name: "김작가".to_string(),
            gender: Gender::Female,
            birthday: NaiveDate::from_ymd_opt(1988, 8, 8).unwrap(),
            email: "kim@example.com".to_string(),
            phone_number: "010-1111-2222".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        AuthContext {
            user: Some(user),
            artist: Some(artist),
        }
    }

    #[test]
    fn test_anonymous_needs_login_everywhere() {
        let ctx = AuthContext::anonymous();
        assert_eq!(require_user(&ctx).unwrap_err(), AuthzError::LoginRequired);
        assert_eq!(require_staff(&ctx).unwrap_err(), AuthzError::LoginRequired);
        assert_eq!(require_artist(&ctx).unwrap_err(), AuthzError::LoginRequired);
    }

    #[test]
    fn test_member_is_neither_staff_nor_artist() {
        let ctx = AuthContext {
            user: Some(user(false)),
            artist: None,
        };
        assert!(require_user(&ctx).is_ok());
        assert_eq!(require_staff(&ctx).unwrap_err(), AuthzError::StaffOnly);
        assert_eq!(require_artist(&ctx).unwrap_err(), AuthzError::ArtistOnly);
    }

    #[test]
    fn test_artist_gets_profile() {
        let ctx = with_artist(user(false));
        assert_eq!(require_artist(&ctx).unwrap().name, "김작가");
        assert_eq!(require_staff(&ctx).unwrap_err(), AuthzError::StaffOnly);
    }

    #[test]
    fn test_staff_passes_staff_check() {
        let ctx = AuthContext {
            user: Some(user(true)),
            artist: None,
        };
        assert!(require_staff(&ctx).is_ok());
    }
}
