//! Authorization policy.
//!
//! Every mutating operation funnels through [`authorize`], the single place
//! where role, method, and resource ownership are combined into an
//! allow/deny decision. Services never inspect roles directly.

use uuid::Uuid;

use crate::domain::entities::user::Role;
use crate::errors::{AuthError, DomainError, DomainResult};

/// The authenticated identity attached to a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// User id from the token subject
    pub id: Uuid,
    /// Username from the token
    pub username: String,
    /// Effective role at mint time (superusers are minted as admin)
    pub role: Role,
}

impl Actor {
    /// Creates a new actor
    pub fn new(id: Uuid, username: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            username: username.into(),
            role,
        }
    }
}

/// An operation requiring an authorization decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Read catalog, review, or comment data
    ReadContent,
    /// Create, update, or delete categories, genres, or titles
    MutateCatalog,
    /// Post a new review
    CreateReview,
    /// Update or delete the review owned by `owner`
    MutateReview { owner: Uuid },
    /// Post a new comment
    CreateComment,
    /// Update or delete the comment owned by `owner`
    MutateComment { owner: Uuid },
    /// List, create, update, or delete arbitrary user accounts
    AdministerUsers,
    /// Read or update one's own profile
    UseOwnProfile,
}

/// Decide whether `actor` may perform `action`.
///
/// * `Err(DomainError::Unauthorized)` - no actor where one is required (401)
/// * `Err(AuthError::InsufficientPermissions)` - authenticated but the role
///   or ownership does not allow the action (403)
pub fn authorize(actor: Option<&Actor>, action: &Action) -> DomainResult<()> {
    // Reads are public
    if matches!(action, Action::ReadContent) {
        return Ok(());
    }

    let actor = actor.ok_or(DomainError::Unauthorized)?;

    let allowed = match action {
        Action::ReadContent => true,
        Action::CreateReview | Action::CreateComment | Action::UseOwnProfile => true,
        Action::MutateReview { owner } | Action::MutateComment { owner } => {
            matches!(actor.role, Role::Admin | Role::Moderator) || actor.id == *owner
        }
        Action::MutateCatalog | Action::AdministerUsers => actor.role == Role::Admin,
    };

    if allowed {
        Ok(())
    } else {
        Err(DomainError::Auth(AuthError::InsufficientPermissions))
    }
}
