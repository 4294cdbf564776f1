use actix_web::{web, HttpResponse};
use validator::Validate;

use cr_core::repositories::{CatalogRepository, ReviewRepository, UserRepository};

use crate::dto::user::{UpdateProfileRequest, UserProfile};
use crate::handlers::error::{domain_error_response, validator_errors_response};
use crate::middleware::auth::AuthContext;
use crate::routes::AppState;

/// Handler for GET /api/v1/users/me
pub async fn get_me<U, C, R>(
    state: web::Data<AppState<U, C, R>>,
    auth: AuthContext,
) -> HttpResponse
where
    U: UserRepository + 'static,
    C: CatalogRepository + 'static,
    R: ReviewRepository + 'static,
{
    match state.user_service.get_me(&auth.actor()).await {
        Ok(user) => HttpResponse::Ok().json(UserProfile::from(&user)),
        Err(error) => domain_error_response(&error),
    }
}

/// Handler for PATCH /api/v1/users/me
///
/// Updates the caller's own profile. A submitted `role` field is ignored:
/// accounts cannot promote themselves.
pub async fn patch_me<U, C, R>(
    state: web::Data<AppState<U, C, R>>,
    auth: AuthContext,
    request: web::Json<UpdateProfileRequest>,
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
        .user_service
        .update_me(&auth.actor(), request.to_self_update())
        .await
    {
        Ok(user) => HttpResponse::Ok().json(UserProfile::from(&user)),
        Err(error) => domain_error_response(&error),
    }
}
