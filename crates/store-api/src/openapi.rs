//! OpenAPI 문서화 설정.
//!
//! utoipa를 사용하여 REST API의 OpenAPI 3.0 스펙을 생성합니다.
//! Swagger UI는 `/swagger-ui` 경로에서 사용 가능합니다.
//!
//! # 자동 생성 구조
//!
//! 각 라우트 모듈은 자체 스키마를 정의하고, 중앙 `ApiDoc`에서 집계합니다.
//! 새로운 엔드포인트를 추가할 때:
//!
//! 1. 응답/요청 타입에 `#[derive(ToSchema)]` 추가
//! 2. 핸들러에 `#[utoipa::path(...)]` 어노테이션 추가
//! 3. 이 파일의 `components(schemas(...))` 및 `paths(...)` 섹션에 추가

use axum::Router;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::error::ApiErrorResponse;
use crate::repository::{CategoryRecord, ProductRecord, UserRecord};
use crate::routes::{
    ComponentHealth, ComponentStatus, CreateCategoryRequest, CreateProductRequest,
    CreateUserRequest, DeleteProductRequest, DeleteUserRequest, HealthResponse, LoginRequest,
    LoginResponse, MoveProductRequest, RegisterRequest, UpdateCategoryDescriptionRequest,
    UpdateCategoryNameRequest, UpdatePasswordRequest, UpdateProductDescriptionRequest,
    UpdateProductNameRequest, UpdateProductPriceRequest, UpdateRoleRequest,
    UpdateUsernameRequest, UserResponse,
};

/// Bearer 인증 스키마 등록.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Storekeeper API 문서.
///
/// 모든 엔드포인트와 스키마를 포함하는 OpenAPI 3.0 스펙입니다.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storekeeper API",
        version = "0.1.0",
        description = r#"
# 카탈로그 관리 REST API

카테고리, 상품, 계정 관리를 위한 REST API입니다.

## 인증

가입/로그인을 제외한 모든 엔드포인트는 JWT Bearer 토큰 인증이 필요합니다.
`Authorization: Bearer <token>` 헤더를 포함하세요.

카탈로그 변경(카테고리/상품)과 계정 생성, 역할 변경은 Admin 역할 전용입니다.
계정 수정/삭제는 본인 또는 Admin만 가능합니다.
"#,
        license(name = "MIT", url = "https://opensource.org/licenses/MIT"),
        contact(name = "Storekeeper Team")
    ),
    servers(
        (url = "http://localhost:3000", description = "로컬 개발 서버"),
    ),
    tags(
        (name = "health", description = "헬스 체크 - 서버 상태 확인"),
        (name = "auth", description = "인증 - 가입 및 로그인"),
        (name = "users", description = "계정 관리"),
        (name = "categories", description = "카테고리 관리 (Admin)"),
        (name = "products", description = "상품 관리 (Admin)")
    ),
    modifiers(&SecurityAddon),
    // ==================== 스키마 등록 ====================
    components(
        schemas(
            // ===== Common =====
            ApiErrorResponse,

            // ===== Health =====
            HealthResponse,
            ComponentHealth,
            ComponentStatus,

            // ===== Auth =====
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            UserResponse,

            // ===== Users =====
            UserRecord,
            CreateUserRequest,
            UpdateUsernameRequest,
            UpdatePasswordRequest,
            UpdateRoleRequest,
            DeleteUserRequest,

            // ===== Categories =====
            CategoryRecord,
            CreateCategoryRequest,
            UpdateCategoryNameRequest,
            UpdateCategoryDescriptionRequest,

            // ===== Products =====
            ProductRecord,
            CreateProductRequest,
            UpdateProductNameRequest,
            UpdateProductPriceRequest,
            UpdateProductDescriptionRequest,
            MoveProductRequest,
            DeleteProductRequest,
        )
    ),
    // ==================== 경로 등록 ====================
    paths(
        // ===== Health =====
        crate::routes::health::health_check,
        crate::routes::health::health_ready,

        // ===== Auth =====
        crate::routes::auth::register,
        crate::routes::auth::login,

        // ===== Users =====
        crate::routes::users::create_user,
        crate::routes::users::update_username,
        crate::routes::users::update_password,
        crate::routes::users::update_role,
        crate::routes::users::delete_user,

        // ===== Categories =====
        crate::routes::categories::create_category,
        crate::routes::categories::update_category_name,
        crate::routes::categories::update_category_description,
        crate::routes::categories::delete_category,

        // ===== Products =====
        crate::routes::products::create_product,
        crate::routes::products::update_product_name,
        crate::routes::products::update_product_price,
        crate::routes::products::update_product_description,
        crate::routes::products::move_product,
        crate::routes::products::delete_product,
    )
)]
pub struct ApiDoc;

/// Swagger UI 라우터 생성.
///
/// 다음 경로에 문서 UI를 마운트합니다:
/// - `/swagger-ui` - Swagger UI 대화형 문서
/// - `/api-docs/openapi.json` - OpenAPI JSON 스펙
pub fn swagger_ui_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_spec_valid() {
        let spec = ApiDoc::openapi();
        let json = serde_json::to_string_pretty(&spec).unwrap();

        assert!(json.contains("Storekeeper API"));

        // 태그 확인
        assert!(json.contains("auth"));
        assert!(json.contains("users"));
        assert!(json.contains("categories"));
        assert!(json.contains("products"));

        // 경로 확인
        assert!(json.contains("/health"));
        assert!(json.contains("/api/v1/auth/register"));
        assert!(json.contains("/api/v1/auth/login"));
        assert!(json.contains("/api/v1/categories"));
        assert!(json.contains("/api/v1/products"));
    }

    #[test]
    fn test_swagger_ui_router_creates() {
        let _router: Router<()> = swagger_ui_router();
    }

    #[test]
    fn test_openapi_contains_schemas() {
        let spec = ApiDoc::openapi();
        let json = serde_json::to_string(&spec).unwrap();

        assert!(json.contains("HealthResponse"));
        assert!(json.contains("LoginResponse"));
        assert!(json.contains("CategoryRecord"));
        assert!(json.contains("ProductRecord"));
        assert!(json.contains("ApiErrorResponse"));
    }
}
