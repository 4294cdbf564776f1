use actix_web::{web, HttpResponse};
use validator::Validate;

use cr_core::repositories::{CatalogRepository, ReviewRepository, UserRepository};

use crate::dto::review::{CommentRequest, CommentResponse};
use crate::handlers::error::{
    domain_error_response, not_found_response, parse_path_id, validator_errors_response,
};
use crate::middleware::auth::OptionalAuth;
use crate::routes::AppState;

fn parse_parents(raw_title: &str, raw_review: &str) -> Option<(uuid::Uuid, uuid::Uuid)> {
    Some((parse_path_id(raw_title)?, parse_path_id(raw_review)?))
}

/// Handler for GET /api/v1/titles/{title_id}/reviews/{review_id}/comments
pub async fn list_comments<U, C, R>(
    state: web::Data<AppState<U, C, R>>,
    path: web::Path<(String, String)>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    C: CatalogRepository + 'static,
    R: ReviewRepository + 'static,
{
    let (raw_title, raw_review) = path.into_inner();
    let Some((title_id, review_id)) = parse_parents(&raw_title, &raw_review) else {
        return not_found_response("review");
    };

    match state.review_service.list_comments(title_id, review_id).await {
        Ok(comments) => {
            let body: Vec<CommentResponse> = comments.iter().map(CommentResponse::from).collect();
            HttpResponse::Ok().json(body)
        }
        Err(error) => domain_error_response(&error),
    }
}

/// Handler for GET .../comments/{comment_id}
pub async fn get_comment<U, C, R>(
    state: web::Data<AppState<U, C, R>>,
    path: web::Path<(String, String, String)>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    C: CatalogRepository + 'static,
    R: ReviewRepository + 'static,
{
    let (raw_title, raw_review, raw_comment) = path.into_inner();
    let (Some((title_id, review_id)), Some(comment_id)) = (
        parse_parents(&raw_title, &raw_review),
        parse_path_id(&raw_comment),
    ) else {
        return not_found_response("comment");
    };

    match state
        .review_service
        .get_comment(title_id, review_id, comment_id)
        .await
    {
        Ok(comment) => HttpResponse::Ok().json(CommentResponse::from(&comment)),
        Err(error) => domain_error_response(&error),
    }
}

/// Handler for POST /api/v1/titles/{title_id}/reviews/{review_id}/comments
pub async fn create_comment<U, C, R>(
    state: web::Data<AppState<U, C, R>>,
    auth: OptionalAuth,
    path: web::Path<(String, String)>,
    request: web::Json<CommentRequest>,
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
    let Some((title_id, review_id)) = parse_parents(&raw_title, &raw_review) else {
        return not_found_response("review");
    };

    let actor = auth.actor();
    match state
        .review_service
        .create_comment(actor.as_ref(), title_id, review_id, &request.text)
        .await
    {
        Ok(comment) => HttpResponse::Created().json(CommentResponse::from(&comment)),
        Err(error) => domain_error_response(&error),
    }
}

/// Handler for PATCH .../comments/{comment_id}
pub async fn patch_comment<U, C, R>(
    state: web::Data<AppState<U, C, R>>,
    auth: OptionalAuth,
    path: web::Path<(String, String, String)>,
    request: web::Json<CommentRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    C: CatalogRepository + 'static,
    R: ReviewRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return validator_errors_response(&errors);
    }
    let (raw_title, raw_review, raw_comment) = path.into_inner();
    let (Some((title_id, review_id)), Some(comment_id)) = (
        parse_parents(&raw_title, &raw_review),
        parse_path_id(&raw_comment),
    ) else {
        return not_found_response("comment");
    };

    let actor = auth.actor();
    match state
        .review_service
        .update_comment(actor.as_ref(), title_id, review_id, comment_id, &request.text)
        .await
    {
        Ok(comment) => HttpResponse::Ok().json(CommentResponse::from(&comment)),
        Err(error) => domain_error_response(&error),
    }
}

/// Handler for DELETE .../comments/{comment_id}
pub async fn delete_comment<U, C, R>(
    state: web::Data<AppState<U, C, R>>,
    auth: OptionalAuth,
    path: web::Path<(String, String, String)>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    C: CatalogRepository + 'static,
    R: ReviewRepository + 'static,
{
    let (raw_title, raw_review, raw_comment) = path.into_inner();
    let (Some((title_id, review_id)), Some(comment_id)) = (
        parse_parents(&raw_title, &raw_review),
        parse_path_id(&raw_comment),
    ) else {
        return not_found_response("comment");
    };

    let actor = auth.actor();
    match state
        .review_service
        .delete_comment(actor.as_ref(), title_id, review_id, comment_id)
        .await
    {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(error) => domain_error_response(&error),
    }
}
