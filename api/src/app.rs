//! Application factory
//!
//! Builds the Actix application around an [`AppState`]. The factory is
//! generic over the repository traits so the same route tree serves both
//! the MySQL-backed binary and the in-memory integration tests.

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{
    middleware::{Logger, NormalizePath},
    web, App, Error, HttpResponse,
};

use cr_core::repositories::{CatalogRepository, ReviewRepository, UserRepository};

use crate::middleware::{auth::JwtAuth, cors::create_cors};
use crate::routes::{auth, catalog, reviews, users, AppState};

/// Create and configure the application with all routes and middleware
pub fn create_app<U, C, R>(
    app_state: web::Data<AppState<U, C, R>>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    C: CatalogRepository + 'static,
    R: ReviewRepository + 'static,
{
    let token_service = app_state.token_service.clone();

    App::new()
        .app_data(app_state)
        .wrap(JwtAuth::new(token_service))
        .wrap(create_cors())
        .wrap(NormalizePath::trim())
        .wrap(Logger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/auth")
                        .route("/signup", web::post().to(auth::signup::signup::<U, C, R>))
                        .route("/token", web::post().to(auth::token::token::<U, C, R>)),
                )
                .service(
                    web::scope("/users")
                        // "/me" must be registered ahead of "/{username}"
                        .route("/me", web::get().to(users::me::get_me::<U, C, R>))
                        .route("/me", web::patch().to(users::me::patch_me::<U, C, R>))
                        .route("", web::get().to(users::admin::list_users::<U, C, R>))
                        .route("", web::post().to(users::admin::create_user::<U, C, R>))
                        .route(
                            "/{username}",
                            web::get().to(users::admin::get_user::<U, C, R>),
                        )
                        .route(
                            "/{username}",
                            web::patch().to(users::admin::patch_user::<U, C, R>),
                        )
                        .route(
                            "/{username}",
                            web::delete().to(users::admin::delete_user::<U, C, R>),
                        ),
                )
                .service(
                    web::scope("/categories")
                        .route(
                            "",
                            web::get().to(catalog::categories::list_categories::<U, C, R>),
                        )
                        .route(
                            "",
                            web::post().to(catalog::categories::create_category::<U, C, R>),
                        )
                        .route(
                            "/{slug}",
                            web::delete().to(catalog::categories::delete_category::<U, C, R>),
                        ),
                )
                .service(
                    web::scope("/genres")
                        .route("", web::get().to(catalog::genres::list_genres::<U, C, R>))
                        .route("", web::post().to(catalog::genres::create_genre::<U, C, R>))
                        .route(
                            "/{slug}",
                            web::delete().to(catalog::genres::delete_genre::<U, C, R>),
                        ),
                )
                .service(
                    web::scope("/titles")
                        .route("", web::get().to(catalog::titles::list_titles::<U, C, R>))
                        .route("", web::post().to(catalog::titles::create_title::<U, C, R>))
                        .service(
                            web::scope("/{title_id}/reviews")
                                .route(
                                    "",
                                    web::get().to(reviews::reviews::list_reviews::<U, C, R>),
                                )
                                .route(
                                    "",
                                    web::post().to(reviews::reviews::create_review::<U, C, R>),
                                )
                                .service(
                                    web::scope("/{review_id}/comments")
                                        .route(
                                            "",
                                            web::get()
                                                .to(reviews::comments::list_comments::<U, C, R>),
                                        )
                                        .route(
                                            "",
                                            web::post()
                                                .to(reviews::comments::create_comment::<U, C, R>),
                                        )
                                        .route(
                                            "/{comment_id}",
                                            web::get()
                                                .to(reviews::comments::get_comment::<U, C, R>),
                                        )
                                        .route(
                                            "/{comment_id}",
                                            web::patch()
                                                .to(reviews::comments::patch_comment::<U, C, R>),
                                        )
                                        .route(
                                            "/{comment_id}",
                                            web::delete()
                                                .to(reviews::comments::delete_comment::<U, C, R>),
                                        ),
                                )
                                .route(
                                    "/{review_id}",
                                    web::get().to(reviews::reviews::get_review::<U, C, R>),
                                )
                                .route(
                                    "/{review_id}",
                                    web::patch().to(reviews::reviews::patch_review::<U, C, R>),
                                )
                                .route(
                                    "/{review_id}",
                                    web::delete().to(reviews::reviews::delete_review::<U, C, R>),
                                ),
                        )
                        .route(
                            "/{title_id}",
                            web::get().to(catalog::titles::get_title::<U, C, R>),
                        )
                        .route(
                            "/{title_id}",
                            web::patch().to(catalog::titles::patch_title::<U, C, R>),
                        )
                        .route(
                            "/{title_id}",
                            web::delete().to(catalog::titles::delete_title::<U, C, R>),
                        ),
                ),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "critica-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "NOT_FOUND",
        "message": "The requested resource was not found"
    }))
}
