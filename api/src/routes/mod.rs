//! Route handlers grouped by resource

pub mod auth;
pub mod catalog;
pub mod reviews;
pub mod users;

use std::sync::Arc;

use cr_core::repositories::{CatalogRepository, ReviewRepository, UserRepository};
use cr_core::services::auth::AuthService;
use cr_core::services::catalog::CatalogService;
use cr_core::services::review::ReviewService;
use cr_core::services::token::TokenService;
use cr_core::services::users::UserService;

/// Application state that holds the shared services
pub struct AppState<U, C, R>
where
    U: UserRepository,
    C: CatalogRepository,
    R: ReviewRepository,
{
    pub auth_service: Arc<AuthService<U>>,
    pub user_service: Arc<UserService<U>>,
    pub catalog_service: Arc<CatalogService<C, R>>,
    pub review_service: Arc<ReviewService<R, C>>,
    pub token_service: Arc<TokenService>,
}
