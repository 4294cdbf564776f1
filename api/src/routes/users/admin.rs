//! Admin-only account administration endpoints.

use actix_web::{web, HttpResponse};
use validator::Validate;

use cr_core::errors::DomainError;
use cr_core::repositories::{CatalogRepository, ReviewRepository, UserRepository};

use crate::dto::user::{CreateUserRequest, UpdateProfileRequest, UserProfile};
use crate::handlers::error::{domain_error_response, validator_errors_response};
use crate::middleware::auth::OptionalAuth;
use crate::routes::AppState;

/// Handler for GET /api/v1/users
pub async fn list_users<U, C, R>(
    state: web::Data<AppState<U, C, R>>,
    auth: OptionalAuth,
) -> HttpResponse
where
    U: UserRepository + 'static,
    C: CatalogRepository + 'static,
    R: ReviewRepository + 'static,
{
    let actor = auth.actor();
    match state.user_service.list_users(actor.as_ref()).await {
        Ok(users) => {
            let profiles: Vec<UserProfile> = users.iter().map(UserProfile::from).collect();
            HttpResponse::Ok().json(profiles)
        }
        Err(error) => domain_error_response(&error),
    }
}

/// Handler for POST /api/v1/users
pub async fn create_user<U, C, R>(
    state: web::Data<AppState<U, C, R>>,
    auth: OptionalAuth,
    request: web::Json<CreateUserRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    C: CatalogRepository + 'static,
    R: ReviewRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return validator_errors_response(&errors);
    }
    let role = match request.parsed_role() {
        Ok(role) => role,
        Err(error) => return domain_error_response(&DomainError::ValidationErr(error)),
    };

    let actor = auth.actor();
    match state
        .user_service
        .create_user(actor.as_ref(), &request.username, &request.email, role)
        .await
    {
        Ok(user) => HttpResponse::Ok().json(UserProfile::from(&user)),
        Err(error) => domain_error_response(&error),
    }
}

/// Handler for GET /api/v1/users/{username}
pub async fn get_user<U, C, R>(
    state: web::Data<AppState<U, C, R>>,
    auth: OptionalAuth,
    path: web::Path<String>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    C: CatalogRepository + 'static,
    R: ReviewRepository + 'static,
{
    let actor = auth.actor();
    match state
        .user_service
        .get_user(actor.as_ref(), path.as_str())
        .await
    {
        Ok(user) => HttpResponse::Ok().json(UserProfile::from(&user)),
        Err(error) => domain_error_response(&error),
    }
}

/// Handler for PATCH /api/v1/users/{username}
///
/// Unlike the self-profile endpoint this may change the account's role.
pub async fn patch_user<U, C, R>(
    state: web::Data<AppState<U, C, R>>,
    auth: OptionalAuth,
    path: web::Path<String>,
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
    let update = match request.to_admin_update() {
        Ok(update) => update,
        Err(error) => return domain_error_response(&DomainError::ValidationErr(error)),
    };

    let actor = auth.actor();
    match state
        .user_service
        .update_user(actor.as_ref(), path.as_str(), update)
        .await
    {
        Ok(user) => HttpResponse::Ok().json(UserProfile::from(&user)),
        Err(error) => domain_error_response(&error),
    }
}

/// Handler for DELETE /api/v1/users/{username}
pub async fn delete_user<U, C, R>(
    state: web::Data<AppState<U, C, R>>,
    auth: OptionalAuth,
    path: web::Path<String>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    C: CatalogRepository + 'static,
    R: ReviewRepository + 'static,
{
    let actor = auth.actor();
    match state
        .user_service
        .delete_user(actor.as_ref(), path.as_str())
        .await
    {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(error) => domain_error_response(&error),
    }
}
