//! 카탈로그 REST API 서버.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - Axum 기반 REST API
//! - JWT 인증 및 역할 기반 접근 제어
//! - 카테고리/상품/계정 관리
//! - 헬스 체크 엔드포인트
//!
//! # 모듈 구성
//!
//! - [`state`]: 애플리케이션 공유 상태 (AppState)
//! - [`routes`]: REST API 엔드포인트
//! - [`auth`]: JWT 인증 및 권한 관리
//! - [`repository`]: 데이터베이스 연산
//! - [`openapi`]: OpenAPI 문서 및 Swagger UI

pub mod auth;
pub mod error;
pub mod openapi;
pub mod repository;
pub mod routes;
pub mod state;

pub use auth::{
    decode_token, encode_token, hash_password, verify_password, AdminAuth, Claims, JwtAuth,
    JwtAuthError, Role,
};
pub use error::{ApiErrorResponse, ApiResult};
pub use repository::{CategoryRepository, ProductRepository, UserRepository};
pub use routes::create_api_router;
pub use state::AppState;

#[cfg(any(test, feature = "test-utils"))]
pub use state::create_test_state;
