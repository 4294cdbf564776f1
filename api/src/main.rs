use actix_web::{web, HttpServer};
use dotenvy::dotenv;
use log::info;
use std::sync::Arc;

use cr_api::app::create_app;
use cr_api::routes::AppState;
use cr_core::services::auth::AuthService;
use cr_core::services::catalog::CatalogService;
use cr_core::services::notification::Mailer;
use cr_core::services::review::ReviewService;
use cr_core::services::token::{TokenService, TokenServiceConfig};
use cr_core::services::users::UserService;
use cr_core::services::verification::CodeIssuer;
use cr_infra::database::{
    create_pool, MySqlCatalogRepository, MySqlReviewRepository, MySqlUserRepository,
};
use cr_infra::mail::{HttpMailService, MockMailService};
use cr_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting Critica API server");

    let config = AppConfig::from_env();

    let pool = create_pool(&config.database)
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;

    let users = Arc::new(MySqlUserRepository::new(pool.clone()));
    let catalog = Arc::new(MySqlCatalogRepository::new(pool.clone()));
    let reviews = Arc::new(MySqlReviewRepository::new(pool));

    let mailer: Arc<dyn Mailer> = if config.mail.is_configured() {
        Arc::new(HttpMailService::new(config.mail.clone()))
    } else {
        info!("No mail provider configured; confirmation codes go to the log");
        Arc::new(MockMailService::new())
    };

    let token_service = Arc::new(TokenService::new(TokenServiceConfig {
        jwt_secret: config.auth.jwt_secret.clone(),
        access_token_expiry_minutes: config.auth.access_token_expiry_minutes,
    }));
    let issuer = CodeIssuer::new(config.auth.confirmation_secret.clone());

    let state = web::Data::new(AppState {
        auth_service: Arc::new(AuthService::new(
            users.clone(),
            mailer,
            issuer,
            token_service.clone(),
        )),
        user_service: Arc::new(UserService::new(users)),
        catalog_service: Arc::new(CatalogService::new(catalog.clone(), reviews.clone())),
        review_service: Arc::new(ReviewService::new(reviews, catalog)),
        token_service,
    });

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {bind_address}");

    let workers = config.server.workers;
    let server = HttpServer::new(move || create_app(state.clone()));
    let server = if workers > 0 {
        server.workers(workers)
    } else {
        server
    };

    server.bind(bind_address)?.run().await
}
