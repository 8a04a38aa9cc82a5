//! API 라우트.
//!
//! 모든 REST API 엔드포인트를 정의하고 라우터를 구성합니다.
//!
//! # 라우트 구조
//!
//! - `/health` - 헬스 체크 (liveness / readiness)
//! - `/api/v1/auth` - 회원 가입 / 로그인
//! - `/api/v1/users` - 계정 관리
//! - `/api/v1/categories` - 카테고리 관리 (Admin)
//! - `/api/v1/products` - 상품 관리 (Admin)

pub mod auth;
pub mod categories;
pub mod health;
pub mod products;
pub mod users;

pub use auth::{auth_router, LoginRequest, LoginResponse, RegisterRequest, UserResponse};
pub use categories::{
    categories_router, CreateCategoryRequest, UpdateCategoryDescriptionRequest,
    UpdateCategoryNameRequest,
};
pub use health::{health_router, ComponentHealth, ComponentStatus, HealthResponse};
pub use products::{
    products_router, CreateProductRequest, DeleteProductRequest, MoveProductRequest,
    UpdateProductDescriptionRequest, UpdateProductNameRequest, UpdateProductPriceRequest,
};
pub use users::{
    users_router, CreateUserRequest, DeleteUserRequest, UpdatePasswordRequest, UpdateRoleRequest,
    UpdateUsernameRequest,
};

use axum::Router;
use std::sync::Arc;

use crate::state::AppState;

/// 전체 API 라우터 생성.
///
/// 모든 서브 라우터를 조합하여 하나의 라우터로 반환합니다.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        // 헬스 체크 엔드포인트
        .nest("/health", health_router())
        // API v1 엔드포인트
        .nest("/api/v1/auth", auth_router())
        .nest("/api/v1/users", users_router())
        .nest("/api/v1/categories", categories_router())
        .nest("/api/v1/products", products_router())
}
