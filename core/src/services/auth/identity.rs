//! Username and email validation rules shared by the registration and
//! account-administration flows.

use cr_shared::utils::validation::{
    is_reserved_username, is_valid_email, is_valid_username_pattern, MAX_USERNAME_LENGTH,
};

use crate::errors::ValidationError;

/// Validate a username against the registration contract.
///
/// Rejects empty values, over-long values, values outside the allowed
/// character set, and the reserved self-profile name.
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.trim().is_empty() {
        return Err(ValidationError::RequiredField {
            field: "username".to_string(),
        });
    }
    if username.len() > MAX_USERNAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "username".to_string(),
            max: MAX_USERNAME_LENGTH,
            actual: username.len(),
        });
    }
    if !is_valid_username_pattern(username) {
        return Err(ValidationError::PatternMismatch {
            field: "username".to_string(),
        });
    }
    if is_reserved_username(username) {
        return Err(ValidationError::ReservedValue {
            field: "username".to_string(),
        });
    }
    Ok(())
}

/// Validate an email address
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() {
        return Err(ValidationError::RequiredField {
            field: "email".to_string(),
        });
    }
    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_normal_identity() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_email("alice@example.com").is_ok());
    }

    #[test]
    fn test_reserved_username_rejected_in_any_case() {
        for name in ["me", "Me", "mE", "ME"] {
            assert!(matches!(
                validate_username(name),
                Err(ValidationError::ReservedValue { .. })
            ));
        }
    }

    #[test]
    fn test_pattern_violations() {
        assert!(matches!(
            validate_username("has space"),
            Err(ValidationError::PatternMismatch { .. })
        ));
        assert!(matches!(
            validate_username(""),
            Err(ValidationError::RequiredField { .. })
        ));
        let long = "x".repeat(MAX_USERNAME_LENGTH + 1);
        assert!(matches!(
            validate_username(&long),
            Err(ValidationError::TooLong { .. })
        ));
    }

    #[test]
    fn test_email_violations() {
        assert!(matches!(
            validate_email(""),
            Err(ValidationError::RequiredField { .. })
        ));
        assert!(matches!(
            validate_email("not-an-email"),
            Err(ValidationError::InvalidEmail)
        ));
    }
}
