/// Who is making a request
///
/// The web crate resolves the session cookie into an [`AuthContext`] once
/// per request and passes it to handlers explicitly. Nothing here is global.

use serde::Serialize;
use sqlx::PgPool;
use std::fmt;
use uuid::Uuid;

use crate::models::artist::Artist;
use crate::models::user::User;

/// Coarse access level derived from the account
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// No session
    Anonymous,

    /// Logged in, no artist profile
    Member,

    /// Logged in with an artist profile
    Artist,

    /// Staff account
    Staff,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Anonymous => "anonymous",
            Role::Member => "member",
            Role::Artist => "artist",
            Role::Staff => "staff",
        }
    }

    pub fn is_authenticated(&self) -> bool {
        !matches!(self, Role::Anonymous)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The resolved account behind a request
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
    pub user: Option<User>,

    /// Present only when the user owns an artist profile
    pub artist: Option<Artist>,
}

impl AuthContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Loads the user and their artist profile.
    ///
    /// A session naming a deleted user resolves to an anonymous context.
    pub async fn load(pool: &PgPool, user_id: Uuid) -> Result<Self, sqlx::Error> {
        let Some(user) = User::find_by_id(pool, user_id).await? else {
            return Ok(Self::anonymous());
        };

        let artist = Artist::find_by_user(pool, user.id).await?;

        Ok(Self {
            user: Some(user),
            artist,
        })
    }

    /// Staff wins over artist: a staff account with a profile is staff.
    pub fn role(&self) -> Role {
        match (&self.user, &self.artist) {
            (None, _) => Role::Anonymous,
            (Some(user), _) if user.is_staff => Role::Staff,
            (Some(_), Some(_)) => Role::Artist,
            (Some(_), None) => Role::Member,
        }
    }

    pub fn user_id(&self) -> Option<Uuid> {
        self.user.as_ref().map(|u| u.id)
    }

    pub fn username(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.username.as_str())
    }
}
