use serde::{Deserialize, Serialize};
use validator::Validate;

use cr_core::domain::entities::user::{Role, User};
use cr_core::errors::ValidationError;
use cr_core::services::users::ProfileUpdate;

/// Profile representation returned by every user endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub role: String,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            bio: user.bio.clone(),
            role: user.role.as_str().to_string(),
        }
    }
}

/// Partial profile update accepted by PATCH endpoints.
///
/// `role` is only honored on the admin endpoint; the self-profile endpoint
/// drops it without error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 150))]
    pub username: Option<String>,

    #[validate(length(min = 1, max = 254))]
    pub email: Option<String>,

    #[validate(length(max = 150))]
    pub first_name: Option<String>,

    #[validate(length(max = 150))]
    pub last_name: Option<String>,

    pub bio: Option<String>,

    pub role: Option<String>,
}

impl UpdateProfileRequest {
    fn base_update(&self) -> ProfileUpdate {
        ProfileUpdate {
            username: self.username.clone(),
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            bio: self.bio.clone(),
            role: None,
        }
    }

    /// Update for the self-profile endpoint: the role field is ignored
    pub fn to_self_update(&self) -> ProfileUpdate {
        self.base_update()
    }

    /// Update for the admin endpoint: the role field is applied and must
    /// name a known role
    pub fn to_admin_update(&self) -> Result<ProfileUpdate, ValidationError> {
        let mut update = self.base_update();
        if let Some(raw) = &self.role {
            let role = Role::parse(raw).ok_or_else(|| ValidationError::InvalidFormat {
                field: "role".to_string(),
            })?;
            update.role = Some(role);
        }
        Ok(update)
    }
}

/// Admin account creation payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 150))]
    pub username: String,

    #[validate(length(min = 1, max = 254))]
    pub email: String,

    pub role: Option<String>,
}

impl CreateUserRequest {
    /// Parse the optional role, rejecting unknown names
    pub fn parsed_role(&self) -> Result<Option<Role>, ValidationError> {
        match &self.role {
            None => Ok(None),
            Some(raw) => Role::parse(raw)
                .map(Some)
                .ok_or_else(|| ValidationError::InvalidFormat {
                    field: "role".to_string(),
                }),
        }
    }
}
