use actix_web::{web, HttpResponse};
use validator::Validate;

use cr_core::repositories::{CatalogRepository, ReviewRepository, UserRepository};

use crate::dto::review::{ReviewCreateRequest, ReviewResponse, ReviewUpdateRequest};
use crate::handlers::error::{
    domain_error_response, not_found_response, parse_path_id, validator_errors_response,
};
use crate::middleware::auth::OptionalAuth;
use crate::routes::AppState;

/// Handler for GET /api/v1/titles/{title_id}/reviews
pub async fn list_reviews<U, C, R>(
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

    match state.review_service.list_reviews(title_id).await {
        Ok(reviews) => {
            let body: Vec<ReviewResponse> = reviews.iter().map(ReviewResponse::from).collect();
            HttpResponse::Ok().json(body)
        }
        Err(error) => domain_error_response(&error),
    }
}

/// Handler for GET /api/v1/titles/{title_id}/reviews/{review_id}
pub async fn get_review<U, C, R>(
    state: web::Data<AppState<U, C, R>>,
    path: web::Path<(String, String)>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    C: CatalogRepository + 'static,
    R: ReviewRepository + 'static,
{
    let (raw_title, raw_review) = path.into_inner();
    let (Some(title_id), Some(review_id)) = (parse_path_id(&raw_title), parse_path_id(&raw_review))
    else {
        return not_found_response("review");
    };

    match state.review_service.get_review(title_id, review_id).await {
        Ok(review) => HttpResponse::Ok().json(ReviewResponse::from(&review)),
        Err(error) => domain_error_response(&error),
    }
}

/// Handler for POST /api/v1/titles/{title_id}/reviews
///
/// Each user may review a title only once.
pub async fn create_review<U, C, R>(
    state: web::Data<AppState<U, C, R>>,
    auth: OptionalAuth,
    path: web::Path<String>,
    request: web::Json<ReviewCreateRequest>,
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
        .review_service
        .create_review(actor.as_ref(), title_id, &request.text, request.score)
        .await
    {
        Ok(review) => HttpResponse::Created().json(ReviewResponse::from(&review)),
        Err(error) => domain_error_response(&error),
    }
}

/// Handler for PATCH /api/v1/titles/{title_id}/reviews/{review_id}
pub async fn patch_review<U, C, R>(
    state: web::Data<AppState<U, C, R>>,
    auth: OptionalAuth,
    path: web::Path<(String, String)>,
    request: web::Json<ReviewUpdateRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    C: CatalogRepository + 'static,
    R: ReviewRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return validator_errors_response(&errors);
    }
    let (raw_title, raw_review) = path.into_inner();
    let (Some(title_id), Some(review_id)) = (parse_path_id(&raw_title), parse_path_id(&raw_review))
    else {
        return not_found_response("review");
    };

    let actor = auth.actor();
    let body = request.into_inner();
    match state
        .review_service
        .update_review(actor.as_ref(), title_id, review_id, body.text, body.score)
        .await
    {
        Ok(review) => HttpResponse::Ok().json(ReviewResponse::from(&review)),
        Err(error) => domain_error_response(&error),
    }
}

/// Handler for DELETE /api/v1/titles/{title_id}/reviews/{review_id}
pub async fn delete_review<U, C, R>(
    state: web::Data<AppState<U, C, R>>,
    auth: OptionalAuth,
    path: web::Path<(String, String)>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    C: CatalogRepository + 'static,
    R: ReviewRepository + 'static,
{
    let (raw_title, raw_review) = path.into_inner();
    let (Some(title_id), Some(review_id)) = (parse_path_id(&raw_title), parse_path_id(&raw_review))
    else {
        return not_found_response("review");
    };

    let actor = auth.actor();
    match state
        .review_service
        .delete_review(actor.as_ref(), title_id, review_id)
        .await
    {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(error) => domain_error_response(&error),
    }
}
