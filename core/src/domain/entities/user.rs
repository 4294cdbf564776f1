//! User entity representing a registered account in the Critica system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role assigned to an account, ordered by increasing privilege
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A regular registered user
    User,
    /// A moderator who can edit or remove any review or comment
    Moderator,
    /// An administrator with full control over catalog and accounts
    Admin,
}

impl Role {
    /// String form used in tokens and API payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Moderator => "moderator",
            Role::Admin => "admin",
        }
    }

    /// Parse a role from its wire representation
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "user" => Some(Role::User),
            "moderator" => Some(Role::Moderator),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::User
    }
}

/// User entity representing a registered account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Unique username
    pub username: String,

    /// Unique email address
    pub email: String,

    /// Optional first name
    pub first_name: Option<String>,

    /// Optional last name
    pub last_name: Option<String>,

    /// Optional free-text bio
    pub bio: Option<String>,

    /// Assigned role
    pub role: Role,

    /// Superusers count as administrators in every permission check
    pub is_superuser: bool,

    /// Monotonic counter bound into confirmation codes; advancing it
    /// invalidates every previously issued code for this user
    pub code_epoch: i64,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,

    /// Timestamp of the user's last successful token exchange
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    /// Creates a new User with the default role
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self::with_role(username, email, Role::User)
    }

    /// Creates a new User with an explicit role
    pub fn with_role(
        username: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            email: email.into(),
            first_name: None,
            last_name: None,
            bio: None,
            role,
            is_superuser: false,
            code_epoch: 0,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        }
    }

    /// Changes the assigned role
    pub fn set_role(&mut self, role: Role) {
        self.role = role;
        self.updated_at = Utc::now();
    }

    /// Records a successful token exchange.
    ///
    /// Advancing `code_epoch` is what makes a confirmation code one-time:
    /// the issuer derives codes from the epoch, so the code that was just
    /// exchanged no longer verifies.
    pub fn touch_login(&mut self) {
        let now = Utc::now();
        self.code_epoch += 1;
        self.last_login_at = Some(now);
        self.updated_at = now;
    }

    /// The role this user acts with; superusers act as administrators
    pub fn effective_role(&self) -> Role {
        if self.is_superuser {
            Role::Admin
        } else {
            self.role
        }
    }

    /// Whether the user holds administrator rights
    pub fn is_admin(&self) -> bool {
        self.effective_role() == Role::Admin
    }

    /// Whether the user holds the moderator role
    pub fn is_moderator(&self) -> bool {
        self.role == Role::Moderator
    }
}
