use actix_web::{web, HttpResponse};
use validator::Validate;

use cr_core::repositories::{CatalogRepository, ReviewRepository, UserRepository};

use crate::dto::auth::{TokenRequest, TokenResponse};
use crate::handlers::error::{domain_error_response, validator_errors_response};
use crate::routes::AppState;

/// Handler for POST /api/v1/auth/token
///
/// Exchanges a `(username, confirmation_code)` pair for a bearer access
/// token. The code stops verifying after its first successful use.
///
/// # Responses
/// - 200: `{token}`
/// - 400: `{confirmation_code: [...]}` when verification fails
/// - 404: unknown username
pub async fn token<U, C, R>(
    state: web::Data<AppState<U, C, R>>,
    request: web::Json<TokenRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    C: CatalogRepository + 'static,
    R: ReviewRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return validator_errors_response(&errors);
    }

    match state
        .auth_service
        .exchange_code(&request.username, &request.confirmation_code)
        .await
    {
        Ok(issued) => {
            log::info!("issued access token for {}", request.username);
            HttpResponse::Ok().json(TokenResponse {
                token: issued.token,
            })
        }
        Err(error) => domain_error_response(&error),
    }
}
