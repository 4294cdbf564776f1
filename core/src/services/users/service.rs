//! Account service: self-profile reads/updates and admin-only account CRUD.

use std::sync::Arc;

use crate::domain::entities::user::{Role, User};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::UserRepository;
use crate::services::access::{authorize, Action, Actor};
use crate::services::auth::{validate_email, validate_username};

/// Partial profile update; absent fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    /// Only applied through the admin endpoints; self-updates drop it
    pub role: Option<Role>,
}

/// Account service over the user store
pub struct UserService<U>
where
    U: UserRepository,
{
    users: Arc<U>,
}

impl<U> UserService<U>
where
    U: UserRepository,
{
    /// Create a new user service
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }

    fn user_not_found() -> DomainError {
        DomainError::NotFound {
            resource: "user".to_string(),
        }
    }

    /// Apply a partial update to a user record.
    ///
    /// `allow_role` distinguishes the admin endpoints from self-service:
    /// on a self-update the role field is dropped without error.
    fn apply(user: &mut User, update: ProfileUpdate, allow_role: bool) -> DomainResult<()> {
        if let Some(username) = update.username {
            validate_username(&username).map_err(DomainError::ValidationErr)?;
            user.username = username;
        }
        if let Some(email) = update.email {
            validate_email(&email).map_err(DomainError::ValidationErr)?;
            user.email = email;
        }
        if let Some(first_name) = update.first_name {
            user.first_name = Some(first_name);
        }
        if let Some(last_name) = update.last_name {
            user.last_name = Some(last_name);
        }
        if let Some(bio) = update.bio {
            user.bio = Some(bio);
        }
        if allow_role {
            if let Some(role) = update.role {
                user.set_role(role);
            }
        }
        user.updated_at = chrono::Utc::now();
        Ok(())
    }

    /// Fetch the actor's own profile
    pub async fn get_me(&self, actor: &Actor) -> DomainResult<User> {
        authorize(Some(actor), &Action::UseOwnProfile)?;
        self.users
            .find_by_id(actor.id)
            .await?
            .ok_or_else(Self::user_not_found)
    }

    /// Update the actor's own profile; any submitted role change is ignored
    pub async fn update_me(&self, actor: &Actor, update: ProfileUpdate) -> DomainResult<User> {
        authorize(Some(actor), &Action::UseOwnProfile)?;
        let mut user = self
            .users
            .find_by_id(actor.id)
            .await?
            .ok_or_else(Self::user_not_found)?;

        Self::apply(&mut user, update, false)?;
        self.users.update(user).await
    }

    /// List all accounts (admin only)
    pub async fn list_users(&self, actor: Option<&Actor>) -> DomainResult<Vec<User>> {
        authorize(actor, &Action::AdministerUsers)?;
        self.users.list().await
    }

    /// Create an account with an explicit role (admin only).
    ///
    /// Unlike signup this issues no confirmation mail; the account is
    /// expected to go through the token flow on its own.
    pub async fn create_user(
        &self,
        actor: Option<&Actor>,
        username: &str,
        email: &str,
        role: Option<Role>,
    ) -> DomainResult<User> {
        authorize(actor, &Action::AdministerUsers)?;
        validate_username(username).map_err(DomainError::ValidationErr)?;
        validate_email(email).map_err(DomainError::ValidationErr)?;

        let user = User::with_role(username, email, role.unwrap_or_default());
        self.users.create(user).await
    }

    /// Fetch an account by username (admin only)
    pub async fn get_user(&self, actor: Option<&Actor>, username: &str) -> DomainResult<User> {
        authorize(actor, &Action::AdministerUsers)?;
        self.users
            .find_by_username(username)
            .await?
            .ok_or_else(Self::user_not_found)
    }

    /// Update an account, including its role (admin only)
    pub async fn update_user(
        &self,
        actor: Option<&Actor>,
        username: &str,
        update: ProfileUpdate,
    ) -> DomainResult<User> {
        authorize(actor, &Action::AdministerUsers)?;
        let mut user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(Self::user_not_found)?;

        Self::apply(&mut user, update, true)?;
        self.users.update(user).await
    }

    /// Delete an account (admin only)
    pub async fn delete_user(&self, actor: Option<&Actor>, username: &str) -> DomainResult<()> {
        authorize(actor, &Action::AdministerUsers)?;
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(Self::user_not_found)?;
        self.users.delete(user.id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AuthError;
    use crate::repositories::MemoryUserRepository;

    struct Fixture {
        users: Arc<MemoryUserRepository>,
        service: UserService<MemoryUserRepository>,
    }

    fn fixture() -> Fixture {
        let users = Arc::new(MemoryUserRepository::new());
        Fixture {
            service: UserService::new(users.clone()),
            users,
        }
    }

    async fn seed(f: &Fixture, username: &str, role: Role) -> Actor {
        let user = f
            .users
            .create(User::with_role(
                username,
                format!("{username}@example.com"),
                role,
            ))
            .await
            .unwrap();
        Actor::new(user.id, username, user.effective_role())
    }

    #[tokio::test]
    async fn test_me_round_trip() {
        let f = fixture();
        let alice = seed(&f, "alice", Role::User).await;

        let me = f.service.get_me(&alice).await.unwrap();
        assert_eq!(me.username, "alice");

        let updated = f
            .service
            .update_me(
                &alice,
                ProfileUpdate {
                    bio: Some("I review films".to_string()),
                    first_name: Some("Alice".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.bio.as_deref(), Some("I review films"));
        assert_eq!(updated.first_name.as_deref(), Some("Alice"));
    }

    #[tokio::test]
    async fn test_self_update_cannot_change_role() {
        let f = fixture();
        let alice = seed(&f, "alice", Role::User).await;

        let updated = f
            .service
            .update_me(
                &alice,
                ProfileUpdate {
                    role: Some(Role::Admin),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.role, Role::User);
        let stored = f.users.find_by_id(alice.id).await.unwrap().unwrap();
        assert_eq!(stored.role, Role::User);
    }

    #[tokio::test]
    async fn test_admin_can_change_roles() {
        let f = fixture();
        let admin = seed(&f, "admin", Role::Admin).await;
        seed(&f, "bob", Role::User).await;

        let updated = f
            .service
            .update_user(
                Some(&admin),
                "bob",
                ProfileUpdate {
                    role: Some(Role::Moderator),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.role, Role::Moderator);
    }

    #[tokio::test]
    async fn test_administration_requires_admin() {
        let f = fixture();
        let alice = seed(&f, "alice", Role::User).await;
        seed(&f, "bob", Role::User).await;

        let err = f.service.list_users(Some(&alice)).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::Auth(AuthError::InsufficientPermissions)
        ));
        let err = f
            .service
            .delete_user(Some(&alice), "bob")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Auth(AuthError::InsufficientPermissions)
        ));
    }

    #[tokio::test]
    async fn test_admin_crud() {
        let f = fixture();
        let admin = seed(&f, "admin", Role::Admin).await;

        let created = f
            .service
            .create_user(Some(&admin), "carol", "carol@example.com", Some(Role::Moderator))
            .await
            .unwrap();
        assert_eq!(created.role, Role::Moderator);

        let fetched = f.service.get_user(Some(&admin), "carol").await.unwrap();
        assert_eq!(fetched.id, created.id);

        assert_eq!(f.service.list_users(Some(&admin)).await.unwrap().len(), 2);

        f.service.delete_user(Some(&admin), "carol").await.unwrap();
        let err = f.service.get_user(Some(&admin), "carol").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_admin_create_validates_identity() {
        let f = fixture();
        let admin = seed(&f, "admin", Role::Admin).await;

        assert!(f
            .service
            .create_user(Some(&admin), "me", "me@example.com", None)
            .await
            .is_err());
        assert!(f
            .service
            .create_user(Some(&admin), "dave", "broken", None)
            .await
            .is_err());
    }
}
