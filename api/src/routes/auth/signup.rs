use actix_web::{web, HttpResponse};
use validator::Validate;

use cr_core::repositories::{CatalogRepository, ReviewRepository, UserRepository};

use crate::dto::auth::{SignupRequest, SignupResponse};
use crate::handlers::error::{domain_error_response, validator_errors_response};
use crate::routes::AppState;

/// Handler for POST /api/v1/auth/signup
///
/// Registers a new user, or re-sends a confirmation code when the exact
/// `(username, email)` pair is already registered.
///
/// # Responses
/// - 200: `{username, email}` echoed back; a confirmation code is on its way
/// - 400: field-scoped validation or conflict errors
pub async fn signup<U, C, R>(
    state: web::Data<AppState<U, C, R>>,
    request: web::Json<SignupRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    C: CatalogRepository + 'static,
    R: ReviewRepository + 'static,
{
    if let Err(errors) = request.validate() {
        log::warn!("signup request failed DTO validation: {errors}");
        return validator_errors_response(&errors);
    }

    match state
        .auth_service
        .sign_up(&request.username, &request.email)
        .await
    {
        Ok(outcome) => {
            log::info!(
                "signup for {}: {}",
                outcome.user.username,
                if outcome.created { "created" } else { "code re-sent" }
            );
            HttpResponse::Ok().json(SignupResponse {
                username: request.username.clone(),
                email: request.email.clone(),
            })
        }
        Err(error) => domain_error_response(&error),
    }
}
