use actix_web::{web, HttpResponse};
use validator::Validate;

use cr_core::repositories::{CatalogRepository, ReviewRepository, UserRepository};

use crate::dto::catalog::{TitleCreateRequest, TitleResponse, TitleUpdateRequest};
use crate::handlers::error::{
    domain_error_response, not_found_response, parse_path_id, validator_errors_response,
};
use crate::middleware::auth::OptionalAuth;
use crate::routes::AppState;

/// Handler for GET /api/v1/titles
pub async fn list_titles<U, C, R>(state: web::Data<AppState<U, C, R>>) -> HttpResponse
where
    U: UserRepository + 'static,
    C: CatalogRepository + 'static,
    R: ReviewRepository + 'static,
{
    match state.catalog_service.list_titles().await {
        Ok(titles) => {
            let body: Vec<TitleResponse> = titles.iter().map(TitleResponse::from).collect();
            HttpResponse::Ok().json(body)
        }
        Err(error) => domain_error_response(&error),
    }
}

/// Handler for GET /api/v1/titles/{title_id}
pub async fn get_title<U, C, R>(
    state: web::Data<AppState<U, C, R>>,
    path: web::Path<String>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    C: CatalogRepository + 'static,
    R: ReviewRepository + 'static,
{
    let Some(title_id) = parse_path_id(path.as_str()) else {
        return not_found_response("title");
    };

    match state.catalog_service.get_title(title_id).await {
        Ok(details) => HttpResponse::Ok().json(TitleResponse::from(&details)),
        Err(error) => domain_error_response(&error),
    }
}

/// Handler for POST /api/v1/titles (admin only)
pub async fn create_title<U, C, R>(
    state: web::Data<AppState<U, C, R>>,
    auth: OptionalAuth,
    request: web::Json<TitleCreateRequest>,
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
        .create_title(actor.as_ref(), request.into_inner().into_draft())
        .await
    {
        Ok(details) => HttpResponse::Created().json(TitleResponse::from(&details)),
        Err(error) => domain_error_response(&error),
    }
}

/// Handler for PATCH /api/v1/titles/{title_id} (admin only)
pub async fn patch_title<U, C, R>(
    state: web::Data<AppState<U, C, R>>,
    auth: OptionalAuth,
    path: web::Path<String>,
    request: web::Json<TitleUpdateRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    C: CatalogRepository + 'static,
    R: ReviewRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return validator_errors_response(&errors);
    }
    let Some(title_id) = parse_path_id(path.as_str()) else {
        return not_found_response("title");
    };

    let actor = auth.actor();
    match state
        .catalog_service
        .update_title(actor.as_ref(), title_id, request.into_inner().into_patch())
        .await
    {
        Ok(details) => HttpResponse::Ok().json(TitleResponse::from(&details)),
        Err(error) => domain_error_response(&error),
    }
}

/// Handler for DELETE /api/v1/titles/{title_id} (admin only)
pub async fn delete_title<U, C, R>(
    state: web::Data<AppState<U, C, R>>,
    auth: OptionalAuth,
    path: web::Path<String>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    C: CatalogRepository + 'static,
    R: ReviewRepository + 'static,
{
    let Some(title_id) = parse_path_id(path.as_str()) else {
        return not_found_response("title");
    };

    let actor = auth.actor();
    match state
        .catalog_service
        .delete_title(actor.as_ref(), title_id)
        .await
    {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(error) => domain_error_response(&error),
    }
}
