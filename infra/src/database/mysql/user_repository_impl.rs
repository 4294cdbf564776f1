//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use cr_core::domain::entities::user::{Role, User};
use cr_core::errors::{DomainError, ValidationError};
use cr_core::repositories::UserRepository;

use super::{database_error, violated_key};

const USER_COLUMNS: &str = "id, username, email, first_name, last_name, bio, role, \
                            is_superuser, code_epoch, created_at, updated_at, last_login_at";

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::Database {
                message: format!("Failed to get id: {e}"),
            })?;
        let role: String = row
            .try_get("role")
            .map_err(|e| DomainError::Database {
                message: format!("Failed to get role: {e}"),
            })?;

        Ok(User {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Database {
                message: format!("Invalid UUID: {e}"),
            })?,
            username: row.try_get("username").map_err(|e| DomainError::Database {
                message: format!("Failed to get username: {e}"),
            })?,
            email: row.try_get("email").map_err(|e| DomainError::Database {
                message: format!("Failed to get email: {e}"),
            })?,
            first_name: row
                .try_get("first_name")
                .map_err(|e| DomainError::Database {
                    message: format!("Failed to get first_name: {e}"),
                })?,
            last_name: row
                .try_get("last_name")
                .map_err(|e| DomainError::Database {
                    message: format!("Failed to get last_name: {e}"),
                })?,
            bio: row.try_get("bio").map_err(|e| DomainError::Database {
                message: format!("Failed to get bio: {e}"),
            })?,
            role: Role::parse(&role).unwrap_or(Role::User),
            is_superuser: row
                .try_get("is_superuser")
                .map_err(|e| DomainError::Database {
                    message: format!("Failed to get is_superuser: {e}"),
                })?,
            code_epoch: row
                .try_get("code_epoch")
                .map_err(|e| DomainError::Database {
                    message: format!("Failed to get code_epoch: {e}"),
                })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Database {
                    message: format!("Failed to get created_at: {e}"),
                })?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::Database {
                    message: format!("Failed to get updated_at: {e}"),
                })?,
            last_login_at: row
                .try_get("last_login_at")
                .map_err(|e| DomainError::Database {
                    message: format!("Failed to get last_login_at: {e}"),
                })?,
        })
    }

    /// Translate a write error, mapping unique-key violations to the
    /// field-scoped conflict the registration flow expects
    fn map_write_error(context: &str, err: sqlx::Error) -> DomainError {
        match violated_key(&err).as_deref() {
            Some(key) if key.contains("username") => {
                DomainError::ValidationErr(ValidationError::DuplicateValue {
                    field: "username".to_string(),
                })
            }
            Some(key) if key.contains("email") => {
                DomainError::ValidationErr(ValidationError::DuplicateValue {
                    field: "email".to_string(),
                })
            }
            _ => database_error(context, err),
        }
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ? LIMIT 1");

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| database_error("Failed to query user by id", e))?;

        result.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE username = ? LIMIT 1");

        let result = sqlx::query(&query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| database_error("Failed to query user by username", e))?;

        result.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = ? LIMIT 1");

        let result = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| database_error("Failed to query user by email", e))?;

        result.as_ref().map(Self::row_to_user).transpose()
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (
                id, username, email, first_name, last_name, bio, role,
                is_superuser, code_epoch, created_at, updated_at, last_login_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.bio)
            .bind(user.role.as_str())
            .bind(user.is_superuser)
            .bind(user.code_epoch)
            .bind(user.created_at)
            .bind(user.updated_at)
            .bind(user.last_login_at)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::map_write_error("Failed to create user", e))?;

        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            UPDATE users SET
                username = ?,
                email = ?,
                first_name = ?,
                last_name = ?,
                bio = ?,
                role = ?,
                is_superuser = ?,
                code_epoch = ?,
                updated_at = ?,
                last_login_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.bio)
            .bind(user.role.as_str())
            .bind(user.is_superuser)
            .bind(user.code_epoch)
            .bind(Utc::now())
            .bind(user.last_login_at)
            .bind(user.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| Self::map_write_error("Failed to update user", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: "user".to_string(),
            });
        }

        let mut updated = user;
        updated.updated_at = Utc::now();
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| database_error("Failed to delete user", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users ORDER BY username");

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| database_error("Failed to list users", e))?;

        rows.iter().map(Self::row_to_user).collect()
    }
}
