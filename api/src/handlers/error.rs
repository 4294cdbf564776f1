//! Mapping from domain errors to HTTP responses.
//!
//! Validation failures become field-scoped 400 bodies
//! (`{"field": ["reason"]}`); everything else becomes an
//! [`ErrorResponse`] with a machine-readable code.

use actix_web::HttpResponse;
use uuid::Uuid;

use cr_core::errors::{AuthError, DomainError, TokenError, ValidationError};
use cr_shared::types::response::{field_error, ErrorResponse, FieldErrors};

/// Build the field-scoped body for a single validation error
fn validation_body(error: &ValidationError) -> FieldErrors {
    match error.field() {
        Some(field) => field_error(field, error.to_string()),
        None => field_error("non_field_errors", error.to_string()),
    }
}

/// Convert a domain error into its HTTP response
pub fn domain_error_response(error: &DomainError) -> HttpResponse {
    match error {
        DomainError::ValidationErr(validation_error) => {
            HttpResponse::BadRequest().json(validation_body(validation_error))
        }
        DomainError::Auth(AuthError::InvalidConfirmationCode) => HttpResponse::BadRequest()
            .json(field_error("confirmation_code", "Invalid confirmation code")),
        DomainError::Auth(AuthError::UserNotFound) => {
            HttpResponse::NotFound().json(ErrorResponse::new("NOT_FOUND", "User not found"))
        }
        DomainError::Auth(AuthError::InsufficientPermissions) => HttpResponse::Forbidden().json(
            ErrorResponse::new("FORBIDDEN", "Insufficient permissions for this action"),
        ),
        DomainError::NotFound { resource } => HttpResponse::NotFound().json(ErrorResponse::new(
            "NOT_FOUND",
            format!("{resource} not found"),
        )),
        DomainError::Unauthorized => HttpResponse::Unauthorized()
            .json(ErrorResponse::new("UNAUTHORIZED", "Authentication required")),
        DomainError::Token(token_error) => {
            let code = match token_error {
                TokenError::TokenExpired => "TOKEN_EXPIRED",
                TokenError::InvalidSignature => "INVALID_SIGNATURE",
                TokenError::InvalidClaims => "INVALID_CLAIMS",
                TokenError::InvalidTokenFormat | TokenError::TokenGenerationFailed => {
                    "INVALID_TOKEN"
                }
            };
            HttpResponse::Unauthorized().json(ErrorResponse::new(code, token_error.to_string()))
        }
        DomainError::Database { message } | DomainError::Internal { message } => {
            log::error!("Internal error: {message}");
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                "INTERNAL_ERROR",
                "An internal error occurred",
            ))
        }
    }
}

/// Convert DTO validation failures into the same field-scoped body shape
pub fn validator_errors_response(errors: &validator::ValidationErrors) -> HttpResponse {
    let mut fields = FieldErrors::new();
    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        fields.insert(field.to_string(), messages);
    }
    HttpResponse::BadRequest().json(fields)
}

/// 404 body for an unknown resource
pub fn not_found_response(resource: &str) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        "NOT_FOUND",
        format!("{resource} not found"),
    ))
}

/// Parse a path segment as a UUID; unparseable ids are treated as missing
/// resources rather than malformed requests
pub fn parse_path_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_scoped_validation_mapping() {
        let error = DomainError::ValidationErr(ValidationError::DuplicateValue {
            field: "username".to_string(),
        });
        let response = domain_error_response(&error);
        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (
                DomainError::Auth(AuthError::UserNotFound),
                actix_web::http::StatusCode::NOT_FOUND,
            ),
            (
                DomainError::Auth(AuthError::InsufficientPermissions),
                actix_web::http::StatusCode::FORBIDDEN,
            ),
            (
                DomainError::Unauthorized,
                actix_web::http::StatusCode::UNAUTHORIZED,
            ),
            (
                DomainError::Internal {
                    message: "boom".to_string(),
                },
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (error, status) in cases {
            assert_eq!(domain_error_response(&error).status(), status);
        }
    }

    #[test]
    fn test_parse_path_id() {
        assert!(parse_path_id(&Uuid::new_v4().to_string()).is_some());
        assert!(parse_path_id("17").is_none());
        assert!(parse_path_id("").is_none());
    }
}
