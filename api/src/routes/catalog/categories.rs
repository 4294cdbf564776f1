use actix_web::{web, HttpResponse};
use validator::Validate;

use cr_core::repositories::{CatalogRepository, ReviewRepository, UserRepository};

use crate::dto::catalog::{SlugItemRequest, SlugItemResponse};
use crate::handlers::error::{domain_error_response, validator_errors_response};
use crate::middleware::auth::OptionalAuth;
use crate::routes::AppState;

/// Handler for GET /api/v1/categories
pub async fn list_categories<U, C, R>(state: web::Data<AppState<U, C, R>>) -> HttpResponse
where
    U: UserRepository + 'static,
    C: CatalogRepository + 'static,
    R: ReviewRepository + 'static,
{
    match state.catalog_service.list_categories().await {
        Ok(categories) => {
            let body: Vec<SlugItemResponse> =
                categories.iter().map(SlugItemResponse::from).collect();
            HttpResponse::Ok().json(body)
        }
        Err(error) => domain_error_response(&error),
    }
}

/// Handler for POST /api/v1/categories (admin only)
pub async fn create_category<U, C, R>(
    state: web::Data<AppState<U, C, R>>,
    auth: OptionalAuth,
    request: web::Json<SlugItemRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    C: CatalogRepository + 'static,
    R: ReviewRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return validator_errors_response(&errors);
    }

    let actor = auth.actor();
    match state
        .catalog_service
        .create_category(actor.as_ref(), &request.name, &request.slug)
        .await
    {
        Ok(category) => HttpResponse::Created().json(SlugItemResponse::from(&category)),
        Err(error) => domain_error_response(&error),
    }
}

/// Handler for DELETE /api/v1/categories/{slug} (admin only)
pub async fn delete_category<U, C, R>(
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
        .catalog_service
        .delete_category(actor.as_ref(), path.as_str())
        .await
    {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(error) => domain_error_response(&error),
    }
}
