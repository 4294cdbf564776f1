//! Shared fixture for API integration tests: an application backed by the
//! in-memory repositories and the mock mailer.

use actix_web::web;
use std::sync::Arc;

use cr_api::routes::AppState;
use cr_core::domain::entities::user::{Role, User};
use cr_core::repositories::{
    MemoryCatalogRepository, MemoryReviewRepository, MemoryUserRepository, UserRepository,
};
use cr_core::services::auth::AuthService;
use cr_core::services::catalog::CatalogService;
use cr_core::services::review::ReviewService;
use cr_core::services::token::{TokenService, TokenServiceConfig};
use cr_core::services::users::UserService;
use cr_core::services::verification::CodeIssuer;
use cr_infra::mail::MockMailService;

pub const TEST_CONFIRMATION_SECRET: &str = "integration-test-confirmation-secret";

pub struct TestBackend {
    pub users: Arc<MemoryUserRepository>,
    pub catalog: Arc<MemoryCatalogRepository>,
    pub reviews: Arc<MemoryReviewRepository>,
    pub mailer: Arc<MockMailService>,
    pub issuer: CodeIssuer,
    pub tokens: Arc<TokenService>,
}

impl TestBackend {
    pub fn new() -> Self {
        Self {
            users: Arc::new(MemoryUserRepository::new()),
            catalog: Arc::new(MemoryCatalogRepository::new()),
            reviews: Arc::new(MemoryReviewRepository::new()),
            mailer: Arc::new(MockMailService::new()),
            issuer: CodeIssuer::new(TEST_CONFIRMATION_SECRET),
            tokens: Arc::new(TokenService::new(TokenServiceConfig {
                jwt_secret: "integration-test-jwt-secret".to_string(),
                access_token_expiry_minutes: 30,
            })),
        }
    }

    pub fn state(
        &self,
    ) -> web::Data<AppState<MemoryUserRepository, MemoryCatalogRepository, MemoryReviewRepository>>
    {
        web::Data::new(AppState {
            auth_service: Arc::new(AuthService::new(
                self.users.clone(),
                self.mailer.clone(),
                self.issuer.clone(),
                self.tokens.clone(),
            )),
            user_service: Arc::new(UserService::new(self.users.clone())),
            catalog_service: Arc::new(CatalogService::new(
                self.catalog.clone(),
                self.reviews.clone(),
            )),
            review_service: Arc::new(ReviewService::new(
                self.reviews.clone(),
                self.catalog.clone(),
            )),
            token_service: self.tokens.clone(),
        })
    }

    /// Seed a user directly in the store and mint a bearer token for them
    pub async fn seed_user(&self, username: &str, role: Role) -> (User, String) {
        let user = self
            .users
            .create(User::with_role(
                username,
                format!("{username}@example.com"),
                role,
            ))
            .await
            .expect("seeding user");
        let token = self.tokens.issue(&user).expect("minting token").token;
        (user, token)
    }
}

/// Pull the confirmation code out of a captured mail body
pub fn extract_code(body: &str) -> String {
    let tail = body
        .split("confirmation code: ")
        .nth(1)
        .expect("mail body carries a confirmation code");
    tail.chars().take_while(|c| c.is_ascii_hexdigit()).collect()
}

/// Authorization header value for a bearer token
pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}
